//! Name filter for a directory view

use std::ops::Range;

use regex::Regex;

/// Active name filter.
///
/// The pattern is a case-sensitive regular expression searched (not anchored)
/// in an entry's base name. A pattern that does not compile is matched as a
/// literal substring instead, so half-typed input like `foo(` still filters.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pattern: String,
    matcher: Option<Regex>,
    literal: bool,
}

impl Filter {
    pub fn new(pattern: &str) -> Self {
        if pattern.is_empty() {
            return Self::default();
        }
        let (matcher, literal) = match Regex::new(pattern) {
            Ok(re) => (re, false),
            Err(e) => {
                tracing::debug!(pattern, error = %e, "filter is not a valid regex, matching literally");
                // An escaped pattern always compiles
                match Regex::new(&regex::escape(pattern)) {
                    Ok(re) => (re, true),
                    Err(_) => return Self::default(),
                }
            }
        };
        Self {
            pattern: pattern.to_string(),
            matcher: Some(matcher),
            literal,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_none()
    }

    /// True when the pattern failed to compile and is matched literally
    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// Does `name` pass the filter? Everything passes an empty filter.
    pub fn is_match(&self, name: &str) -> bool {
        self.matcher.as_ref().is_none_or(|re| re.is_match(name))
    }

    /// Byte ranges of non-empty matches inside `name`, for highlighting
    pub fn match_ranges(&self, name: &str) -> Vec<Range<usize>> {
        match &self.matcher {
            Some(re) => re
                .find_iter(name)
                .map(|m| m.range())
                .filter(|r| !r.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}
