// src/process/preamble.rs
//
// MESA writes a small global block above the column header:
//
//     1              2              3
//     version_number compiler       initial_mass
//     "r23.05.1"     "gfortran"     1.0
//
//     1              2 ...
//     model_number   num_zones ...
//
// Index rows are skipped; what remains should be one name row and one value
// row of the same width.

use crate::process::utils::{clean_str, is_index_row, tokenize, tokenize_quoted};

/// Pair up the preamble's name and value rows.
///
/// `Ok(vec![])` when there is no preamble at all; `Err(reason)` when there is
/// one but it does not have the name-row/value-row shape.
pub fn parse_preamble(lines: &[&str]) -> Result<Vec<(String, String)>, String> {
    let rows: Vec<&str> = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !is_index_row(&tokenize(l)))
        .collect();

    match rows.as_slice() {
        [] => Ok(Vec::new()),
        [names, values] => {
            let names = tokenize(names);
            let values = tokenize_quoted(values);
            if names.len() != values.len() {
                return Err(format!(
                    "{} names but {} values",
                    names.len(),
                    values.len()
                ));
            }
            Ok(names
                .into_iter()
                .zip(values)
                .map(|(n, v)| (n.to_string(), clean_str(v)))
                .collect())
        }
        other => Err(format!(
            "expected a name row and a value row, found {} rows",
            other.len()
        )),
    }
}
