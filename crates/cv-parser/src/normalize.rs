//! Normalizer — canonical forms for dates, skills, and degree names, plus
//! order-stable deduplication. Unparseable values are dropped with a warning,
//! never fabricated.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::lexicon::Lexicon;
use crate::patterns;

/// A point in time at resume granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: u16,
    /// 1–12 when the source named a month; `None` for bare years.
    pub month: Option<u8>,
}

/// A date range; `end: None` means open-ended ("Present") or unstated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: YearMonth,
    pub end: Option<YearMonth>,
}

/// Parses a date token captured by the field extractor: `2015-2019`,
/// `Jan 2020 - Mar 2021`, `2019 – Present`, `Sep 2018`, `2017`.
pub fn parse_date_range(token: &str) -> Option<DateRange> {
    let mut sides = patterns::RANGE_SEP.splitn(token.trim(), 2);
    let start = parse_point(sides.next()?)?;
    let end = match sides.next() {
        Some(rest) if is_open_end(rest) => None,
        Some(rest) => parse_point(rest),
        None => None,
    };
    Some(DateRange { start, end })
}

fn parse_point(text: &str) -> Option<YearMonth> {
    let trimmed = text.trim();
    if let Some(caps) = patterns::MONTH_YEAR.captures(trimmed) {
        let month = month_number(caps.get(1)?.as_str());
        let year = caps.get(2)?.as_str().parse().ok()?;
        return Some(YearMonth { year, month });
    }
    if let Some(caps) = patterns::NUM_MONTH_YEAR.captures(trimmed) {
        let month = caps.get(1)?.as_str().parse().ok();
        let year = caps.get(2)?.as_str().parse().ok()?;
        return Some(YearMonth { year, month });
    }
    let year = patterns::YEAR.find(trimmed)?.as_str().parse().ok()?;
    Some(YearMonth { year, month: None })
}

fn is_open_end(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "present" | "current" | "now" | "ongoing"
    )
}

fn month_number(name: &str) -> Option<u8> {
    let number = match name.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

/// Collapses synonyms and deduplicates case-insensitively, keeping the display
/// casing of the first occurrence. Order is stable by first occurrence.
pub fn normalize_skills(raw: &[String], lexicon: &Lexicon) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for token in raw {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        let display = match lexicon.skill_synonyms.get(&trimmed.to_lowercase()) {
            Some(canonical) => canonical.clone(),
            None => trimmed.to_string(),
        };
        if seen.insert(display.to_lowercase()) {
            out.push(display);
        }
    }
    out
}

/// Case-insensitive dedup preserving first occurrence, for certifications and
/// other free-text collections.
pub fn dedup_preserving_order(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in raw {
        let trimmed = item.trim();
        if !trimmed.is_empty() && seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Maps a raw degree token to its canonical display form; unknown tokens pass
/// through unchanged.
pub fn canonical_degree(raw: &str, lexicon: &Lexicon) -> String {
    let lower = raw.trim().to_lowercase();
    lexicon
        .degrees
        .iter()
        .find(|(variant, _)| *variant == lower)
        .map(|(_, canonical)| canonical.clone())
        .unwrap_or_else(|| raw.trim().to_string())
}
