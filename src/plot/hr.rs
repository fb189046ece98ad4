// src/plot/hr.rs

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, instrument};

use super::{axes, colorbar, RenderError, RenderOptions, RenderOutcome, Track, HR_FIGURE_IN};
use crate::process::HistoryTable;

pub(crate) const TEFF_DESC: &str = "log10(Teff / K)";
pub(crate) const L_DESC: &str = "log10(L / Lsun)";
pub(crate) const AGE_DESC: &str = "Stellar age (yr)";

/// Text and marker sizes, in points, for one HR panel.
pub(crate) struct PanelStyle<'a> {
    pub caption: &'a str,
    pub caption_pt: f64,
    pub label_pt: f64,
    pub marker_pt: f64,
}

/// Scatter of `(log_Teff, log_L)` coloured by age, Teff axis reversed,
/// with a colour bar on the right.
pub(crate) fn draw_hr_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    track: &Track<'_>,
    opts: &RenderOptions,
    style: &PanelStyle<'_>,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync,
{
    let (w, _) = area.dim_in_pixel();
    let (plot_area, bar_area) = area.split_horizontally(w * 85 / 100);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(
            style.caption,
            ("sans-serif", opts.px(style.caption_pt)).into_font(),
        )
        .margin(opts.px_u32(8.0))
        .x_label_area_size(opts.px_u32(style.label_pt * 3.0))
        .y_label_area_size(opts.px_u32(style.label_pt * 4.0))
        .build_cartesian_2d(
            axes::reversed(track.teff_range),
            axes::padded(track.l_range),
        )?;

    chart
        .configure_mesh()
        .x_desc(TEFF_DESC)
        .y_desc(L_DESC)
        .x_label_formatter(&axes::unnegate)
        .y_label_formatter(&axes::fixed2)
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(TRANSPARENT)
        .label_style(("sans-serif", opts.px(style.label_pt * 0.8)).into_font())
        .axis_desc_style(("sans-serif", opts.px(style.label_pt)).into_font())
        .draw()?;

    let radius = opts.px_u32(style.marker_pt);
    let age_range = track.age_range;
    chart.draw_series(track.hr_points().map(|(t, l, a)| {
        let color = colorbar::scale_color(a, age_range);
        Circle::new((-t, l), radius, color.mix(0.8).filled())
    }))?;

    colorbar::draw_colorbar(&bar_area, age_range, AGE_DESC, opts, style.label_pt * 0.85)?;
    Ok(())
}

/// Render the standalone HR diagram to `opts.hr_path()`.
///
/// Fails with [`RenderError::MissingColumns`] before touching the output
/// file if `log_Teff`, `log_L` or `star_age` is absent.
#[instrument(level = "info", skip_all, fields(rows = table.row_count()))]
pub fn render_hr_diagram(
    table: &HistoryTable,
    opts: &RenderOptions,
) -> Result<RenderOutcome, RenderError> {
    let track = Track::from_table(table)?;
    track.log_stats();

    opts.ensure_out_dir()?;
    let path = opts.hr_path();
    let size = opts.pixels(HR_FIGURE_IN);

    {
        let root = BitMapBackend::new(&path, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw_hr_panel(
            &root,
            &track,
            opts,
            &PanelStyle {
                caption: "Evolutionary track, 1 Msun",
                caption_pt: 16.0,
                label_pt: 14.0,
                marker_pt: 2.7,
            },
        )?;
        root.present()?;
    }

    info!(path = %path.display(), width = size.0, height = size.1, "saved HR diagram");
    Ok(RenderOutcome { path, panels: 1 })
}
