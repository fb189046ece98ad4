// Shared fixtures for the integration tests.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// A MESA-shaped history file with `rows` models along a rough
/// pre-main-sequence to giant track. `log_R` is included on request.
pub fn history_text(rows: usize, with_radius: bool) -> String {
    let mut names = vec!["model_number", "num_zones", "star_age", "log_Teff", "log_L"];
    if with_radius {
        names.push("log_R");
    }

    let mut out = String::new();
    out.push_str("                 1                 2                 3\n");
    out.push_str("    version_number          compiler      initial_mass\n");
    out.push_str("        \"r23.05.1\"        \"gfortran\"    1.0000000000E+00\n");
    out.push('\n');
    let index: Vec<String> = (1..=names.len()).map(|i| format!("{:>18}", i)).collect();
    out.push_str(&index.join(""));
    out.push('\n');
    let header: Vec<String> = names.iter().map(|n| format!("{:>18}", n)).collect();
    out.push_str(&header.join(""));
    out.push('\n');

    for i in 0..rows {
        let f = i as f64 / rows.max(1) as f64;
        let age = if i == 0 { 0.0 } else { 1.0e4 * 10f64.powf(6.0 * f) };
        let log_teff = 3.76 - 0.2 * f * f;
        let log_l = -0.1 + 2.0 * f * f * f;
        let mut values = vec![
            format!("{}", i + 1),
            format!("{}", 800 + i),
            format!("{:.16E}", age),
            format!("{:.16E}", log_teff),
            format!("{:.16E}", log_l),
        ];
        if with_radius {
            values.push(format!("{:.16E}", 0.5 * log_l - 2.0 * (log_teff - 3.76)));
        }
        let row: Vec<String> = values.iter().map(|v| format!("{:>26}", v)).collect();
        out.push_str(&row.join(""));
        out.push('\n');
    }
    out
}
