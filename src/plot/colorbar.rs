// src/plot/colorbar.rs

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{axes, RenderError, RenderOptions};
use crate::schema::ColumnRange;

/// Gradient steps drawn in the bar.
const STEPS: usize = 128;

/// Viridis colour for `v` within `range`; the ends of the range clamp.
pub fn scale_color(v: f64, range: ColumnRange) -> RGBColor {
    let t = if range.span() > 0.0 {
        ((v - range.min) / range.span()).clamp(0.0, 1.0)
    } else {
        0.5
    };
    ViridisRGB.get_color(t)
}

/// Vertical colour bar mapping viridis back to `range`, labelled on the right.
pub fn draw_colorbar<DB>(
    area: &DrawingArea<DB, Shift>,
    range: ColumnRange,
    label: &str,
    opts: &RenderOptions,
    font_pt: f64,
) -> Result<(), RenderError>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync,
{
    let y_range = if range.span() > 0.0 {
        range.min..range.max
    } else {
        axes::padded(range)
    };
    let (lo, hi) = (y_range.start, y_range.end);

    let mut chart = ChartBuilder::on(area)
        .margin_top(opts.px_u32(12.0))
        .margin_bottom(opts.px_u32(24.0))
        .margin_right(opts.px_u32(4.0))
        .y_label_area_size(0)
        .right_y_label_area_size(opts.px_u32(font_pt * 5.0))
        .build_cartesian_2d(0.0f64..1.0f64, y_range)?;

    let step = (hi - lo) / STEPS as f64;
    chart.draw_series((0..STEPS).map(|i| {
        let y0 = lo + step * i as f64;
        let color = scale_color(y0 + step / 2.0, ColumnRange { min: lo, max: hi });
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
    }))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&axes::sci)
        .y_desc(label)
        .label_style(("sans-serif", opts.px(font_pt * 0.8)).into_font())
        .axis_desc_style(("sans-serif", opts.px(font_pt)).into_font())
        .draw()?;

    Ok(())
}
