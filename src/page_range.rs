use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

// @module: Page range parsing and selection

/// A user supplied `start-end` page range, 1-based and inclusive.
///
/// The bounds are kept exactly as typed; clamping against the document
/// happens in [`PageRange::indices`] once the page count is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First page, 1-based
    pub first: i64,
    /// Last page, 1-based, inclusive
    pub last: i64,
}

impl PageRange {
    /// Parse a `start-end` expression.
    ///
    /// The input is split on the first `-` and both halves must be integers,
    /// so `abc`, `1` and `1-2-3` are all rejected.
    pub fn parse(expr: &str) -> Result<Self, AppError> {
        let invalid = || AppError::InvalidRange(expr.to_string());

        let (first, last) = expr.split_once('-').ok_or_else(invalid)?;
        let first = first.trim().parse::<i64>().map_err(|_| invalid())?;
        let last = last.trim().parse::<i64>().map_err(|_| invalid())?;

        Ok(Self { first, last })
    }

    /// Zero-based page indices selected from a document of `total_pages` pages.
    ///
    /// The start is clamped to the first page and the end to the last page.
    /// A reversed range yields no pages rather than an error.
    pub fn indices(&self, total_pages: usize) -> Vec<usize> {
        let start = self.first.saturating_sub(1).max(0);
        let end = self.last.saturating_sub(1).min(total_pages as i64 - 1);

        if start > end {
            return Vec::new();
        }

        (start as usize..=end as usize).collect()
    }
}

impl FromStr for PageRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// Resolve the pages to process: the given range, or every page when absent.
pub fn select_pages(range: Option<&PageRange>, total_pages: usize) -> Vec<usize> {
    match range {
        Some(range) => range.indices(total_pages),
        None => (0..total_pages).collect(),
    }
}

/// Parse an optional `--pages` value; an empty value means "all pages".
pub fn parse_optional(expr: Option<&str>) -> Result<Option<PageRange>, AppError> {
    match expr {
        Some(expr) if !expr.is_empty() => PageRange::parse(expr).map(Some),
        _ => Ok(None),
    }
}
