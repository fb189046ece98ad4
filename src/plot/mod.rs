// src/plot/mod.rs
pub mod axes;
pub mod colorbar;
mod hr;
mod summary;

pub use hr::render_hr_diagram;
pub use summary::render_summary_grid;

use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::process::HistoryTable;
use crate::schema::{ColumnRange, HR_COLUMNS, LOG_L, LOG_R, LOG_TEFF, STAR_AGE};

pub const HR_DIAGRAM_FILE: &str = "hr_diagram_1Msun.png";
pub const SUMMARY_FILE: &str = "stellar_evolution_summary.png";
pub const DEFAULT_DPI: u32 = 300;
/// Accepted dpi values. 1200 dpi is already 16800x12000 for the summary grid.
pub const DPI_RANGE: std::ops::RangeInclusive<u32> = 1..=1200;

/// Figure sizes in inches, as width x height.
pub const HR_FIGURE_IN: (f64, f64) = (10.0, 8.0);
pub const SUMMARY_FIGURE_IN: (f64, f64) = (14.0, 10.0);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("missing required columns {missing:?}; available: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("column {0} has no finite values to plot")]
    NoData(String),

    #[error("creating output directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dpi {dpi} outside {}..={}", DPI_RANGE.start(), DPI_RANGE.end())]
    InvalidDpi { dpi: u32 },

    #[error("drawing failed: {0}")]
    Draw(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(e.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub out_dir: PathBuf,
    pub dpi: u32,
    pub hr_file_name: String,
    pub summary_file_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            dpi: DEFAULT_DPI,
            hr_file_name: HR_DIAGRAM_FILE.to_string(),
            summary_file_name: SUMMARY_FILE.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn hr_path(&self) -> PathBuf {
        self.out_dir.join(&self.hr_file_name)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.out_dir.join(&self.summary_file_name)
    }

    /// Pixel size of a figure given in inches.
    pub fn pixels(&self, (w_in, h_in): (f64, f64)) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        ((w_in * dpi).round() as u32, (h_in * dpi).round() as u32)
    }

    /// Typographic points to pixels.
    pub fn px(&self, pt: f64) -> f64 {
        pt * f64::from(self.dpi) / 72.0
    }

    pub(crate) fn px_u32(&self, pt: f64) -> u32 {
        self.px(pt).round().max(1.0) as u32
    }

    pub fn check_dpi(&self) -> Result<(), RenderError> {
        if DPI_RANGE.contains(&self.dpi) {
            Ok(())
        } else {
            Err(RenderError::InvalidDpi { dpi: self.dpi })
        }
    }

    /// Validate the options, then create `out_dir` if needed.
    fn ensure_out_dir(&self) -> Result<(), RenderError> {
        self.check_dpi()?;
        std::fs::create_dir_all(&self.out_dir).map_err(|source| RenderError::Io {
            path: self.out_dir.clone(),
            source,
        })
    }
}

/// What a successful render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    pub path: PathBuf,
    /// Panels with data drawn in them. Blank panels are not counted.
    pub panels: usize,
}

/// The columns both charts draw from, checked and borrowed from a table.
pub(crate) struct Track<'a> {
    pub log_teff: &'a [f64],
    pub log_l: &'a [f64],
    pub age: &'a [f64],
    pub log_r: Option<&'a [f64]>,
    pub teff_range: ColumnRange,
    pub l_range: ColumnRange,
    pub age_range: ColumnRange,
}

impl<'a> Track<'a> {
    pub fn from_table(table: &'a HistoryTable) -> Result<Self, RenderError> {
        table
            .require(&HR_COLUMNS)
            .map_err(|missing| RenderError::MissingColumns {
                missing,
                available: table.columns().to_vec(),
            })?;

        let column = |name: &str| -> Result<(&'a [f64], ColumnRange), RenderError> {
            let values = table.column(name).unwrap_or_default();
            let range = ColumnRange::of(values).ok_or_else(|| RenderError::NoData(name.into()))?;
            Ok((values, range))
        };
        let (log_teff, teff_range) = column(LOG_TEFF)?;
        let (log_l, l_range) = column(LOG_L)?;
        let (age, age_range) = column(STAR_AGE)?;

        Ok(Self {
            log_teff,
            log_l,
            age,
            log_r: table.column(LOG_R),
            teff_range,
            l_range,
            age_range,
        })
    }

    /// `(log_Teff, log_L, age)` for rows where all three are finite.
    pub fn hr_points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.log_teff
            .iter()
            .zip(self.log_l)
            .zip(self.age)
            .map(|((&t, &l), &a)| (t, l, a))
            .filter(|(t, l, a)| t.is_finite() && l.is_finite() && a.is_finite())
    }

    /// `(age, y)` for rows with a positive age and finite `y`, for log-age panels.
    pub fn against_age<'b>(&'b self, ys: &'b [f64]) -> impl Iterator<Item = (f64, f64)> + 'b {
        self.age
            .iter()
            .zip(ys)
            .map(|(&a, &y)| (a, y))
            .filter(|(a, y)| *a > 0.0 && a.is_finite() && y.is_finite())
    }

    pub fn log_stats(&self) {
        info!(
            min = self.teff_range.min,
            max = self.teff_range.max,
            "log_Teff: {:.3} to {:.3}",
            self.teff_range.min,
            self.teff_range.max
        );
        info!(
            min = self.l_range.min,
            max = self.l_range.max,
            "log_L: {:.3} to {:.3}",
            self.l_range.min,
            self.l_range.max
        );
        info!(
            min = self.age_range.min,
            max = self.age_range.max,
            "star_age: {:.2e} to {:.2e} yr",
            self.age_range.min,
            self.age_range.max
        );
        if let Some(r) = self.log_r.and_then(ColumnRange::of) {
            info!(
                min = r.min,
                max = r.max,
                "log_R: {:.3} to {:.3}",
                r.min,
                r.max
            );
        }
    }
}
