//! Shared regex patterns for structured tokens (email, phone, dates).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Strict local@domain.tld shape.
    pub(crate) static ref EMAIL: Regex =
        Regex::new(r"[A-Za-z0-9][A-Za-z0-9.+_%-]*@[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}")
            .unwrap();

    /// Phone candidate, tolerant of separators and country codes. The digit
    /// count (7–15) is validated separately after stripping separators.
    pub(crate) static ref PHONE: Regex = Regex::new(r"\+?\d[\d\s().\-]{4,}\d").unwrap();

    /// A 4-digit year, 1900–2099.
    pub(crate) static ref YEAR: Regex = Regex::new(r"\b(?:19|20)\d{2}\b").unwrap();

    /// Year range: `2015-2019`, `2019 – Present`.
    pub(crate) static ref YEAR_RANGE: Regex = Regex::new(
        r"(?i)\b(?:19|20)\d{2}\s*(?:[-–—]|to)\s*(?:(?:19|20)\d{2}|present|current|now)\b"
    )
    .unwrap();

    /// Month name + year: `Jan 2020`, `September 2019`.
    pub(crate) static ref MONTH_YEAR: Regex = Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+((?:19|20)\d{2})\b"
    )
    .unwrap();

    /// Month-year range: `Jan 2020 - Mar 2021`, `Jun 2019 – Present`.
    pub(crate) static ref MONTH_RANGE: Regex = Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(?:19|20)\d{2}\s*(?:[-–—]|to)\s*(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(?:19|20)\d{2}|present|current|now)\b"
    )
    .unwrap();

    /// Range separator, shared by the date parser.
    pub(crate) static ref RANGE_SEP: Regex = Regex::new(r"(?i)\s*(?:[–—]|-|\bto\b)\s*").unwrap();

    /// GPA/CGPA mention with the value captured.
    pub(crate) static ref GPA: Regex =
        Regex::new(r"(?i)\b(?:cgpa|gpa)\b[:\s-]*([0-9](?:\.\d+)?(?:\s*/\s*[0-9.]+)?)").unwrap();

    /// Numeric month/year: `02/2020`, `2/2020`.
    pub(crate) static ref NUM_MONTH_YEAR: Regex =
        Regex::new(r"\b(0?[1-9]|1[0-2])/((?:19|20)\d{2})\b").unwrap();

    /// Numeric month/year range: `02/2020 - 06/2023`, `02/2020 – Present`.
    pub(crate) static ref NUM_RANGE: Regex = Regex::new(
        r"(?i)\b(?:0?[1-9]|1[0-2])/(?:19|20)\d{2}\s*(?:[–—]|-|to)\s*(?:(?:0?[1-9]|1[0-2])/(?:19|20)\d{2}|present|current|now)\b"
    )
    .unwrap();
}

/// Finds the most specific date token in a line: a month-level range (named
/// or numeric) beats a year range, which beats a single month+year, which
/// beats a bare year. Returns the byte range of the match and the matched
/// text.
pub(crate) fn date_token(text: &str) -> Option<(std::ops::Range<usize>, &str)> {
    for pattern in [
        &*MONTH_RANGE,
        &*NUM_RANGE,
        &*YEAR_RANGE,
        &*MONTH_YEAR,
        &*NUM_MONTH_YEAR,
        &*YEAR,
    ] {
        if let Some(m) = pattern.find(text) {
            return Some((m.range(), m.as_str()));
        }
    }
    None
}
