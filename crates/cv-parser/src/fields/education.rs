//! Education rules: degree keyword + co-occurring institution and year tokens.

use crate::lexicon::Lexicon;
use crate::patterns;
use crate::segment::Section;

/// Raw education entry prior to normalization. `degree` holds the keyword as
/// written in the source; the normalizer canonicalizes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EducationCandidate {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    /// Raw date token as matched in the source, e.g. `2015-2019`.
    pub date_raw: Option<String>,
    pub gpa: Option<String>,
}

/// How many lines after a degree line are scanned for the institution, dates,
/// and GPA. Mirrors the lookahead the comma-free layout needs:
///   B.S. Computer Science
///   Stanford University
///   2015 - 2019
const LOOKAHEAD_LINES: usize = 3;

pub(crate) fn extract(section: &Section, lexicon: &Lexicon) -> Vec<EducationCandidate> {
    let lines: Vec<&str> = section
        .lines
        .iter()
        .map(|l| l.text.trim())
        .filter(|t| !t.is_empty())
        .collect();

    let mut entries = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let Some((degree_range, _)) = lexicon.find_degree(line) else {
            continue;
        };
        let mut entry = parse_degree_line(line, degree_range, lexicon);

        for lookahead in lines.iter().skip(i + 1).take(LOOKAHEAD_LINES) {
            // Stop at the next degree line so entries do not bleed together.
            if lexicon.find_degree(lookahead).is_some() {
                break;
            }
            if entry.institution.is_none() && lexicon.has_institution_keyword(lookahead) {
                entry.institution = Some(strip_date(lookahead));
            }
            if entry.date_raw.is_none() {
                if let Some((_, token)) = patterns::date_token(lookahead) {
                    entry.date_raw = Some(token.to_string());
                }
            }
            if entry.gpa.is_none() {
                entry.gpa = find_gpa(lookahead);
            }
        }

        if entry.degree.is_some() || entry.institution.is_some() {
            entries.push(entry);
        }
    }
    entries
}

/// Parses a separator-delimited degree line such as
/// `MIT, B.S. Computer Science, 2015-2019` or
/// `B.Tech - Electronics | NIT Trichy | 2016`.
fn parse_degree_line(
    line: &str,
    degree_range: std::ops::Range<usize>,
    lexicon: &Lexicon,
) -> EducationCandidate {
    let mut entry = EducationCandidate {
        degree: line.get(degree_range.clone()).map(str::to_string),
        gpa: find_gpa(line),
        ..Default::default()
    };
    if let Some((_, token)) = patterns::date_token(line) {
        entry.date_raw = Some(token.to_string());
    }

    for part in split_parts(line) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some((range, _)) = lexicon.find_degree(part) {
            // The degree part: whatever surrounds the keyword is the field of
            // study, e.g. "B.S. Computer Science" -> "Computer Science".
            if entry.field.is_none() {
                entry.field = field_of_study(part, range);
            }
            continue;
        }
        if patterns::date_token(part).is_some_and(|(r, _)| r.len() >= part.trim().len()) {
            continue; // pure date part, already captured above
        }
        if patterns::GPA.is_match(part) {
            continue;
        }
        if entry.institution.is_none() && looks_institutional(part, lexicon) {
            entry.institution = Some(part.to_string());
        }
    }
    entry
}

/// Remainder of the degree part once the keyword itself is removed.
fn field_of_study(part: &str, degree_range: std::ops::Range<usize>) -> Option<String> {
    let before = part.get(..degree_range.start).unwrap_or("");
    let after = part.get(degree_range.end..).unwrap_or("");
    let mut rest = format!("{} {}", before.trim(), after.trim());
    rest = rest.trim().to_string();
    for prefix in ["of ", "in ", "of the "] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped.trim().to_string();
        }
    }
    let rest = rest.trim_matches([',', '-', '–', ' ']).to_string();
    (!rest.is_empty()).then_some(rest)
}

/// Institution heuristic: a known keyword ("University", ...), a capitalized
/// multi-word sequence, or an acronym like MIT.
fn looks_institutional(part: &str, lexicon: &Lexicon) -> bool {
    if lexicon.has_institution_keyword(part) {
        return true;
    }
    let words: Vec<&str> = part.split_whitespace().collect();
    if words.len() >= 2 {
        return words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_uppercase()));
    }
    words.len() == 1
        && words[0].len() >= 2
        && words[0].chars().all(|c| c.is_alphabetic() && c.is_uppercase())
}

fn find_gpa(text: &str) -> Option<String> {
    patterns::GPA
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn strip_date(text: &str) -> String {
    match patterns::date_token(text) {
        Some((range, _)) => {
            let before = text.get(..range.start).unwrap_or("");
            let after = text.get(range.end..).unwrap_or("");
            format!("{} {}", before.trim(), after.trim())
                .trim_matches([',', '-', '–', '|', ' '])
                .to_string()
        }
        None => text.to_string(),
    }
}

/// Splits on commas, pipes, spaced dashes, or 2+ space runs.
fn split_parts(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = line;
    loop {
        let split_at = find_separator(rest);
        match split_at {
            Some((start, len)) => {
                parts.push(&rest[..start]);
                rest = &rest[start + len..];
            }
            None => {
                parts.push(rest);
                return parts;
            }
        }
    }
}

fn find_separator(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b',' | b'|' => return Some((i, 1)),
            b' ' => {
                // spaced dash " - " / " – " or a 2+ space run
                let rest = &text[i + 1..];
                if let Some(stripped) = rest
                    .strip_prefix("- ")
                    .or_else(|| rest.strip_prefix("\u{2013} "))
                    .or_else(|| rest.strip_prefix("\u{2014} "))
                {
                    return Some((i, text.len() - i - stripped.len()));
                }
                if rest.starts_with(' ') {
                    let run = rest.chars().take_while(|&c| c == ' ').count();
                    return Some((i, run + 1));
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentFormat, RawDocument};
    use crate::extract::extract_text;
    use crate::segment::segment;

    fn education_entries(text: &str) -> Vec<EducationCandidate> {
        let doc = RawDocument::new(text.as_bytes().to_vec(), DocumentFormat::Text, "t.txt");
        let block = extract_text(&doc).unwrap();
        let lexicon = Lexicon::default();
        let sections = segment(&block, &lexicon);
        let section = sections
            .iter()
            .find(|s| s.label == crate::segment::SectionLabel::Education)
            .expect("education section");
        extract(section, &lexicon)
    }

    #[test]
    fn test_comma_separated_line() {
        let entries = education_entries("Education\nMIT, B.S. Computer Science, 2015-2019");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].institution.as_deref(), Some("MIT"));
        assert_eq!(entries[0].degree.as_deref(), Some("B.S."));
        assert_eq!(entries[0].field.as_deref(), Some("Computer Science"));
        assert_eq!(entries[0].date_raw.as_deref(), Some("2015-2019"));
    }

    #[test]
    fn test_multiline_layout_with_lookahead() {
        let entries = education_entries(
            "Education\nB.Tech in Electronics\nNIT Trichy\n2012 - 2016\nCGPA: 8.5/10",
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree.as_deref(), Some("B.Tech"));
        assert_eq!(entries[0].field.as_deref(), Some("Electronics"));
        assert_eq!(entries[0].institution.as_deref(), Some("NIT Trichy"));
        assert_eq!(entries[0].date_raw.as_deref(), Some("2012 - 2016"));
        assert_eq!(entries[0].gpa.as_deref(), Some("8.5/10"));
    }

    #[test]
    fn test_bachelor_of_phrase() {
        let entries =
            education_entries("Education\nBachelor of Science, Stanford University, 2018");
        assert_eq!(entries[0].degree.as_deref(), Some("Bachelor"));
        assert_eq!(entries[0].field.as_deref(), Some("Science"));
        assert_eq!(entries[0].institution.as_deref(), Some("Stanford University"));
    }

    #[test]
    fn test_two_degree_lines_do_not_bleed() {
        let entries = education_entries(
            "Education\nM.S. Robotics, CMU, 2021\nB.S. Physics, Caltech, 2019",
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].institution.as_deref(), Some("CMU"));
        assert_eq!(entries[1].institution.as_deref(), Some("Caltech"));
    }

    #[test]
    fn test_line_without_degree_is_ignored() {
        let entries = education_entries("Education\nGraduated with honors in 2019");
        assert!(entries.is_empty());
    }
}
