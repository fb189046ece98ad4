use anyhow::{Context, Result};
use clap::Parser;
use mesaplot::{
    process::{read_history, ReadOptions, SegmentPolicy},
    schema::summarize,
};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "describe_history")]
#[command(about = "Write a YAML summary of the columns in a MESA history file")]
struct Args {
    /// MESA history file
    #[arg(default_value = "LOGS/history.data")]
    input: PathBuf,

    /// Where to write the YAML summary
    #[arg(short, long, default_value = "history_summary.yaml")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = SegmentPolicy::Append)]
    segments: SegmentPolicy,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let parsed = read_history(
        &args.input,
        &ReadOptions {
            segments: args.segments,
        },
    )
    .with_context(|| format!("cannot load {}", args.input.display()))?;
    let summary = summarize(&parsed);

    // The top level looks like:
    //
    // rows: 1234
    // dropped: 0
    // segments: 1
    // metadata:
    //   - name: version_number
    //     value: r23.05.1
    // columns:
    //   - name: model_number
    //     range:
    //       min: 1.0
    //       max: 1234.0
    let yaml = serde_yaml::to_string(&summary)?;

    // Write to a tmp file, then rename over the target
    let file_name = args
        .output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "history_summary.yaml".into());
    let tmp_path = args.output.with_file_name(format!(".{}.tmp", file_name));
    fs::write(&tmp_path, yaml).with_context(|| format!("writing {:?}", tmp_path))?;
    fs::rename(&tmp_path, &args.output)
        .with_context(|| format!("renaming {:?} to {:?}", tmp_path, args.output))?;

    info!(
        columns = summary.columns.len(),
        rows = summary.rows,
        "wrote {}",
        args.output.display()
    );
    Ok(())
}
