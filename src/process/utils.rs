// src/process/utils.rs

use std::collections::HashMap;

/// Longest line prefix quoted back in diagnostics.
pub const EXCERPT_CHARS: usize = 50;

/// 1) Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// 2) Split a line on runs of whitespace.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Like [`tokenize`], but keeps a `"quoted value"` together even if it
/// contains spaces. Used for the preamble value row, where MESA writes strings.
pub fn tokenize_quoted(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match (c, in_quotes, start) {
            ('"', false, None) => {
                in_quotes = true;
                start = Some(i);
            }
            ('"', true, _) => in_quotes = false,
            (c, false, Some(s)) if c.is_whitespace() => {
                tokens.push(&line[s..i]);
                start = None;
            }
            (c, false, None) if !c.is_whitespace() => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(&line[s..]);
    }
    tokens
}

/// 3) Parse every token as `f64`. On failure, hands back the first token
///    that did not convert.
pub fn parse_numeric_row<'a>(tokens: &[&'a str]) -> Result<Vec<f64>, &'a str> {
    tokens
        .iter()
        .map(|t| t.parse::<f64>().map_err(|_| *t))
        .collect()
}

/// True for MESA's column-numbering rows (`1 2 3 ...`).
pub fn is_index_row(tokens: &[&str]) -> bool {
    !tokens.is_empty() && tokens.iter().all(|t| t.parse::<u64>().is_ok())
}

/// `tokens` is exactly `1 2 3 ... n`, the numbering MESA writes above the
/// column names.
pub fn is_column_index(tokens: &[&str], n: usize) -> bool {
    tokens.len() == n
        && is_index_row(tokens)
        && tokens
            .iter()
            .enumerate()
            .all(|(i, t)| t.parse::<usize>() == Ok(i + 1))
}

/// First [`EXCERPT_CHARS`] characters of a line, for log output.
pub fn excerpt(line: &str) -> String {
    let mut out: String = line.chars().take(EXCERPT_CHARS).collect();
    if line.chars().nth(EXCERPT_CHARS).is_some() {
        out.push_str("...");
    }
    out
}

/// Give repeated header names a positional suffix: the second `x` becomes
/// `x.1`, the third `x.2`. Returns the final names plus `(original, renamed)`
/// for every column that had to change.
pub fn disambiguate_columns(raw: &[&str]) -> (Vec<String>, Vec<(String, String)>) {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(raw.len());
    let mut names = Vec::with_capacity(raw.len());
    let mut renamed = Vec::new();

    for &name in raw {
        let count = seen.entry(name).or_insert(0);
        if *count == 0 {
            names.push(name.to_string());
        } else {
            let new_name = format!("{}.{}", name, count);
            renamed.push((name.to_string(), new_name.clone()));
            names.push(new_name);
        }
        *count += 1;
    }

    (names, renamed)
}
