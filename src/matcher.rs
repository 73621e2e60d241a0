//! Address pattern matching.
//!
//! A pattern is an address whose segments may be `*` (any single segment) or
//! contain `*` as a wildcard inside the segment. A pattern segment without an
//! instance key matches every instance of that name. Patterns naming a module
//! (`module.net`, `module.net.*`) also select everything nested below it.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

use crate::address::{self, AddressError};
use crate::resource::Resource;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern: {0}")]
    Address(#[from] AddressError),

    #[error("invalid wildcard in pattern: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone)]
enum SegmentMatcher {
    Any,
    Exact(String),
    Glob { regex: Regex, keyed: bool },
}

impl SegmentMatcher {
    fn parse(segment: &str) -> Result<Self, regex::Error> {
        if segment == "*" {
            return Ok(SegmentMatcher::Any);
        }
        if !segment.contains('*') {
            return Ok(SegmentMatcher::Exact(segment.to_string()));
        }

        let body = segment
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        Ok(SegmentMatcher::Glob {
            regex: Regex::new(&format!("^{body}$"))?,
            keyed: address::has_instance_key(segment),
        })
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            SegmentMatcher::Any => true,
            SegmentMatcher::Exact(expected) => {
                expected == segment
                    || (!address::has_instance_key(expected)
                        && expected == address::base_segment(segment))
            }
            SegmentMatcher::Glob { regex, keyed } => {
                regex.is_match(segment) || (!keyed && regex.is_match(address::base_segment(segment)))
            }
        }
    }

    fn is_literal(&self, value: &str) -> bool {
        matches!(self, SegmentMatcher::Exact(s) if s == value)
    }
}

/// A parsed address selector.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    segments: Vec<SegmentMatcher>,
    module_scope: bool,
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let segments = address::split_segments(raw)?
            .into_iter()
            .map(SegmentMatcher::parse)
            .collect::<Result<Vec<_>, _>>()?;
        let module_scope = names_module(&segments);
        Ok(Self {
            raw: raw.to_string(),
            segments,
            module_scope,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this pattern selects the resource at `address`.
    pub fn matches(&self, address: &str) -> bool {
        match address::split_segments(address) {
            Ok(segments) => self.matches_segments(&segments),
            Err(_) => false,
        }
    }

    fn matches_segments(&self, segments: &[&str]) -> bool {
        let n = self.segments.len();
        if n > segments.len() || (n < segments.len() && !self.module_scope) {
            return false;
        }
        self.segments
            .iter()
            .zip(segments)
            .all(|(matcher, segment)| matcher.matches(segment))
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `module.<name>` pairs, optionally followed by a trailing `*`.
fn names_module(segments: &[SegmentMatcher]) -> bool {
    let body = match segments {
        [head @ .., SegmentMatcher::Any] if head.len() >= 2 => head,
        _ => segments,
    };
    !body.is_empty()
        && body.len() % 2 == 0
        && body.chunks(2).all(|pair| pair[0].is_literal("module"))
}

pub fn parse_patterns<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Pattern>, PatternError> {
    raw.iter().map(|p| Pattern::parse(p.as_ref())).collect()
}

/// Returns the resources matched by any pattern, in state order.
///
/// An empty pattern list selects everything.
pub fn select<'r>(patterns: &[Pattern], resources: &'r [Resource]) -> Vec<&'r Resource> {
    if patterns.is_empty() {
        return resources.iter().collect();
    }

    resources
        .iter()
        .filter(|resource| {
            let Ok(segments) = address::split_segments(&resource.address) else {
                tracing::debug!(address = %resource.address, "skipping unparsable address");
                return false;
            };
            patterns.iter().any(|p| p.matches_segments(&segments))
        })
        .collect()
}
