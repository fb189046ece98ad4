// src/prompt.rs

use std::io::{self, BufRead, Write};

/// Print `question` and read one line; only `y` (any case) counts as yes.
/// End of input is a no.
pub fn confirm<R: BufRead, W: Write>(
    question: &str,
    mut input: R,
    mut out: W,
) -> io::Result<bool> {
    write!(out, "{} (y/n): ", question)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer
        .trim_end_matches(&['\r', '\n'][..])
        .eq_ignore_ascii_case("y"))
}
