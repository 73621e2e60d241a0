//! Terraform address grammar.
//!
//! Addresses are dot-separated segments where the final segment of a resource
//! or module call may carry an instance key: `module.net[0].aws_s3_bucket.this["a.b"]`.
//! Dots inside the brackets belong to the key and never split a segment.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("empty segment in address '{0}'")]
    EmptySegment(String),

    #[error("unbalanced brackets or quotes in address '{0}'")]
    Unbalanced(String),
}

/// Splits an address into its segments, keeping instance keys attached.
pub fn split_segments(address: &str) -> Result<Vec<&str>, AddressError> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }

    let mut segments = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in address.char_indices() {
        if in_quotes {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if depth > 0 => in_quotes = true,
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| AddressError::Unbalanced(address.to_string()))?;
            }
            '.' if depth == 0 => {
                if i == start {
                    return Err(AddressError::EmptySegment(address.to_string()));
                }
                segments.push(&address[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 || in_quotes {
        return Err(AddressError::Unbalanced(address.to_string()));
    }
    if start == address.len() {
        return Err(AddressError::EmptySegment(address.to_string()));
    }
    segments.push(&address[start..]);

    Ok(segments)
}

/// The part of a segment before its instance key: `this["a"]` -> `this`.
pub fn base_segment(segment: &str) -> &str {
    segment.split_once('[').map_or(segment, |(base, _)| base)
}

pub fn has_instance_key(segment: &str) -> bool {
    segment.contains('[')
}

/// Removes every instance key from an address.
///
/// `module.a[0].aws_s3_bucket.b["x"]` becomes `module.a.aws_s3_bucket.b`.
/// Addresses that do not parse are returned unchanged.
pub fn strip_instance_keys(address: &str) -> String {
    match split_segments(address) {
        Ok(segments) => segments
            .into_iter()
            .map(base_segment)
            .collect::<Vec<_>>()
            .join("."),
        Err(_) => address.to_string(),
    }
}
