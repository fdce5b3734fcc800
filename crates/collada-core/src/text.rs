//! Whitespace-separated array text, as found in `<float_array>`, `<p>` and `<vcount>`.

use std::fmt::Write;

use crate::error::{ColladaError, Result};

/// Parses whitespace-separated floats.
///
/// Tokens that do not parse become `0.0` unless `strict` is set, in which case the first one
/// is reported as [`ColladaError::Malformed`].
pub fn parse_floats(text: &str, strict: bool) -> Result<Vec<f32>> {
    let mut coerced = 0usize;
    let mut values = Vec::new();
    for token in text.split_whitespace() {
        match token.parse::<f32>() {
            Ok(v) => values.push(v),
            Err(_) if strict => {
                return Err(ColladaError::malformed(format!(
                    "invalid float '{token}' in array"
                )));
            }
            Err(_) => {
                coerced += 1;
                values.push(0.0);
            }
        }
    }
    if coerced > 0 {
        log::warn!("{coerced} non-numeric token(s) in float array read as 0");
    }
    Ok(values)
}

/// Parses whitespace-separated non-negative integers.
pub fn parse_ints(text: &str) -> Result<Vec<u32>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| ColladaError::malformed(format!("invalid index '{token}'")))
        })
        .collect()
}

/// Splits a name or id array into its tokens.
pub fn parse_names(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Formats floats with the shortest text that reads back to the same value.
pub fn format_floats(values: &[f32]) -> String {
    join(values, |out, v| write!(out, "{v}"))
}

/// Formats integers separated by single spaces.
pub fn format_ints(values: &[u32]) -> String {
    join(values, |out, v| write!(out, "{v}"))
}

/// Formats names separated by single spaces.
pub fn format_names(values: &[String]) -> String {
    values.join(" ")
}

fn join<T>(values: &[T], mut f: impl FnMut(&mut String, &T) -> std::fmt::Result) -> String {
    let mut out = String::with_capacity(values.len() * 4);
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // writing into a String cannot fail
        let _ = f(&mut out, v);
    }
    out
}
