use anyhow::{Context, Result};
use clap::Parser;
use mesaplot::{
    plot::{self, RenderError, RenderOptions},
    process::{read_history, ReadOptions, SegmentPolicy},
    prompt,
    schema::{INITIAL_MASS, KEY_COLUMNS},
};
use std::{io, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const PREVIEW_ROWS: usize = 5;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Plot HR diagrams and evolution summaries from a MESA history.data file"
)]
struct Args {
    /// MESA history file
    #[arg(default_value = "LOGS/history.data")]
    input: PathBuf,

    /// Directory the PNG files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Output resolution
    #[arg(
        long,
        default_value_t = plot::DEFAULT_DPI,
        value_parser = clap::value_parser!(u32).range(
            i64::from(*plot::DPI_RANGE.start())..=i64::from(*plot::DPI_RANGE.end())
        )
    )]
    dpi: u32,

    /// Also render the 2x2 summary grid
    #[arg(long)]
    summary: bool,

    /// Ask on stdin whether to render the summary grid
    #[arg(long, conflicts_with = "summary")]
    interactive: bool,

    /// How to treat a repeated header line from a restarted run
    #[arg(long, value_enum, default_value_t = SegmentPolicy::Append)]
    segments: SegmentPolicy,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = if args.verbose { "debug" } else { "info" };
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("MESA evolution analysis");

    // ─── 2) read the history file ────────────────────────────────────
    let read_opts = ReadOptions {
        segments: args.segments,
    };
    let parsed = read_history(&args.input, &read_opts)
        .with_context(|| format!("cannot load {}", args.input.display()))?;
    let table = &parsed.table;
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        dropped = parsed.report.dropped,
        segments = parsed.report.segments,
        "loaded history"
    );
    if let Some(mass) = table.metadata_value(INITIAL_MASS) {
        info!(initial_mass = mass, "run metadata");
    }

    // ─── 3) preview the first models ─────────────────────────────────
    for col in KEY_COLUMNS {
        if let Some(values) = table.head(col, PREVIEW_ROWS) {
            info!("{}: {:?}", col, values);
        }
    }

    let render_opts = RenderOptions {
        out_dir: args.out_dir.clone(),
        dpi: args.dpi,
        ..Default::default()
    };

    // ─── 4) HR diagram ───────────────────────────────────────────────
    match plot::render_hr_diagram(table, &render_opts) {
        Ok(outcome) => info!(path = %outcome.path.display(), "HR diagram done"),
        Err(e @ RenderError::MissingColumns { .. }) => warn!("skipping HR diagram: {}", e),
        Err(e) => return Err(e).context("rendering HR diagram"),
    }

    // ─── 5) optional summary grid ────────────────────────────────────
    let want_summary = args.summary
        || (args.interactive
            && prompt::confirm(
                "Render the summary grid?",
                io::stdin().lock(),
                io::stdout(),
            )?);

    if want_summary {
        match plot::render_summary_grid(table, &render_opts) {
            Ok(outcome) => info!(
                path = %outcome.path.display(),
                panels = outcome.panels,
                "summary grid done"
            ),
            Err(e @ RenderError::MissingColumns { .. }) => {
                warn!("skipping summary grid: {}", e)
            }
            Err(e) => return Err(e).context("rendering summary grid"),
        }
    }

    info!("all done");
    Ok(())
}
