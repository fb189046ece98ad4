// src/plot/axes.rs

use std::ops::Range;

use crate::schema::ColumnRange;

/// Fraction of the data span added on each side of a linear axis.
const PAD: f64 = 0.05;

/// Linear axis range around `r`, widened if the data is a single value.
pub fn padded(r: ColumnRange) -> Range<f64> {
    let span = r.span();
    let pad = if span > 0.0 {
        span * PAD
    } else {
        r.min.abs().max(1.0) * PAD
    };
    (r.min - pad)..(r.max + pad)
}

/// Range for an axis drawn right-to-left. Values are plotted negated and
/// labelled with [`unnegate`], so the largest value lands on the left.
pub fn reversed(r: ColumnRange) -> Range<f64> {
    let p = padded(r);
    -p.end..-p.start
}

pub fn unnegate(v: &f64) -> String {
    format!("{:.2}", -v)
}

/// Log axis range; `r` must be strictly positive. Pads by a quarter decade
/// each side, a full decade if the data is a single value.
pub fn log_padded(r: ColumnRange) -> Range<f64> {
    let factor = if r.max > r.min { 10f64.powf(0.25) } else { 10.0 };
    (r.min / factor)..(r.max * factor)
}

pub fn fixed2(v: &f64) -> String {
    format!("{:.2}", v)
}

pub fn sci(v: &f64) -> String {
    format!("{:.1e}", v)
}
