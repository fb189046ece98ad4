// src/plot/summary.rs

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, info, instrument};

use super::hr::{draw_hr_panel, PanelStyle, AGE_DESC, L_DESC, TEFF_DESC};
use super::{axes, RenderError, RenderOptions, RenderOutcome, Track, SUMMARY_FIGURE_IN};
use crate::process::HistoryTable;
use crate::schema::ColumnRange;

const R_DESC: &str = "log10(R / Rsun)";
const LABEL_PT: f64 = 11.0;
const CAPTION_PT: f64 = 13.0;

/// Line plot of `ys` against age on a log axis. Returns `false`, leaving the
/// panel blank, when no row has both a positive age and a finite value.
fn draw_age_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    track: &Track<'_>,
    ys: &[f64],
    caption: &str,
    y_desc: &str,
    color: &RGBColor,
    opts: &RenderOptions,
) -> Result<bool, RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync,
{
    let points: Vec<(f64, f64)> = track.against_age(ys).collect();
    let ages: Vec<f64> = points.iter().map(|(a, _)| *a).collect();
    let values: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
    let (Some(x_range), Some(y_range)) =
        (ColumnRange::of_positive(&ages), ColumnRange::of(&values))
    else {
        debug!(caption, "no positive ages to plot; leaving panel blank");
        return Ok(false);
    };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", opts.px(CAPTION_PT)).into_font())
        .margin(opts.px_u32(8.0))
        .x_label_area_size(opts.px_u32(LABEL_PT * 3.0))
        .y_label_area_size(opts.px_u32(LABEL_PT * 4.0))
        .build_cartesian_2d(
            axes::log_padded(x_range).log_scale(),
            axes::padded(y_range),
        )?;

    chart
        .configure_mesh()
        .x_desc(AGE_DESC)
        .y_desc(y_desc)
        .x_label_formatter(&axes::sci)
        .y_label_formatter(&axes::fixed2)
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(TRANSPARENT)
        .label_style(("sans-serif", opts.px(LABEL_PT * 0.8)).into_font())
        .axis_desc_style(("sans-serif", opts.px(LABEL_PT)).into_font())
        .draw()?;

    chart.draw_series(LineSeries::new(
        points,
        color.stroke_width(opts.px_u32(1.5)),
    ))?;
    Ok(true)
}

/// Render the 2x2 summary to `opts.summary_path()`:
/// HR diagram, luminosity vs age, Teff vs age, and radius vs age when
/// `log_R` exists. A missing `log_R` leaves the last panel blank.
#[instrument(level = "info", skip_all, fields(rows = table.row_count()))]
pub fn render_summary_grid(
    table: &HistoryTable,
    opts: &RenderOptions,
) -> Result<RenderOutcome, RenderError> {
    let track = Track::from_table(table)?;
    track.log_stats();

    opts.ensure_out_dir()?;
    let path = opts.summary_path();
    let size = opts.pixels(SUMMARY_FIGURE_IN);
    let mut panels = 0;

    {
        let root = BitMapBackend::new(&path, size).into_drawing_area();
        root.fill(&WHITE)?;
        let areas = root.split_evenly((2, 2));

        draw_hr_panel(
            &areas[0],
            &track,
            opts,
            &PanelStyle {
                caption: "HR diagram",
                caption_pt: CAPTION_PT,
                label_pt: LABEL_PT,
                marker_pt: 2.2,
            },
        )?;
        panels += 1;

        let age_panels = [
            (1, track.log_l, "Luminosity evolution", L_DESC, &BLUE),
            (2, track.log_teff, "Surface temperature evolution", TEFF_DESC, &RED),
        ];
        for (i, ys, caption, y_desc, color) in age_panels {
            if draw_age_panel(&areas[i], &track, ys, caption, y_desc, color, opts)? {
                panels += 1;
            }
        }

        match track.log_r {
            Some(log_r) => {
                let green = RGBColor(0, 128, 0);
                let caption = "Radius evolution";
                if draw_age_panel(&areas[3], &track, log_r, caption, R_DESC, &green, opts)? {
                    panels += 1;
                }
            }
            None => info!("no log_R column; radius panel left blank"),
        }

        root.present()?;
    }

    info!(path = %path.display(), panels, "saved summary grid");
    Ok(RenderOutcome { path, panels })
}
