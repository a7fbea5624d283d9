//! Contact-block rules: email, phone, and candidate name.

use crate::fields::RawFields;
use crate::lexicon::Lexicon;
use crate::patterns;
use crate::segment::Section;

pub(crate) fn extract_into(section: &Section, lexicon: &Lexicon, fields: &mut RawFields) {
    for line in &section.lines {
        if fields.email.is_none() {
            if let Some(m) = patterns::EMAIL.find(&line.text) {
                fields.email = Some(m.as_str().to_string());
            }
        }
        if fields.phone.is_none() {
            match scan_phone(&line.text) {
                PhoneScan::Valid(phone) => fields.phone = Some(phone),
                PhoneScan::Rejected(raw) => fields.warnings.push(format!(
                    "phone-like token '{raw}' rejected: expected 7-15 digits"
                )),
                PhoneScan::None => {}
            }
        }
    }

    if fields.name.is_none() {
        fields.name = detect_name(section, lexicon);
    }
}

/// Name heuristic: the first capitalized multi-token line among the leading
/// contact lines that is not an email or phone line and carries no digits.
/// The scan window is a lexicon tunable, not a hard rule.
fn detect_name(section: &Section, lexicon: &Lexicon) -> Option<String> {
    for line in section
        .lines
        .iter()
        .filter(|l| !l.text.trim().is_empty())
        .take(lexicon.name_scan_lines)
    {
        let text = line.text.trim();
        if patterns::EMAIL.is_match(text) || patterns::PHONE.is_match(text) {
            continue;
        }
        if text.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        let words: Vec<&str> = text.split_whitespace().collect();
        if !(2..=5).contains(&words.len()) {
            continue;
        }
        if words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
        {
            return Some(text.to_string());
        }
    }
    None
}

enum PhoneScan {
    Valid(String),
    Rejected(String),
    None,
}

fn scan_phone(text: &str) -> PhoneScan {
    let mut rejected = None;
    for candidate in patterns::PHONE.find_iter(text) {
        // Year ranges like 2019-2021 satisfy the phone pattern; skip them.
        if patterns::YEAR_RANGE.is_match(candidate.as_str()) {
            continue;
        }
        match normalize_phone(candidate.as_str()) {
            Some(phone) => return PhoneScan::Valid(phone),
            None => rejected = Some(candidate.as_str().trim().to_string()),
        }
    }
    match rejected {
        Some(raw) => PhoneScan::Rejected(raw),
        None => PhoneScan::None,
    }
}

/// Whole-document fallback used when the contact block had no phone.
pub(crate) fn first_valid_phone(text: &str) -> Option<String> {
    match scan_phone(text) {
        PhoneScan::Valid(phone) => Some(phone),
        _ => None,
    }
}

/// Keeps only the digits (plus a leading `+` when a country code was written)
/// and validates the 7–15 digit length bound.
fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if !(7..=15).contains(&digits.len()) {
        return None;
    }
    if raw.trim_start().starts_with('+') {
        Some(format!("+{digits}"))
    } else {
        Some(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentFormat, RawDocument};
    use crate::extract::extract_text;
    use crate::segment::segment;

    fn contact_fields(text: &str) -> RawFields {
        let doc = RawDocument::new(text.as_bytes().to_vec(), DocumentFormat::Text, "t.txt");
        let block = extract_text(&doc).unwrap();
        let lexicon = Lexicon::default();
        let sections = segment(&block, &lexicon);
        let mut fields = RawFields::default();
        extract_into(&sections[0], &lexicon, &mut fields);
        fields
    }

    #[test]
    fn test_email_and_phone_extracted() {
        let fields = contact_fields("John Doe\njohn@example.com\n+1 (555) 123-4567");
        assert_eq!(fields.email.as_deref(), Some("john@example.com"));
        assert_eq!(fields.phone.as_deref(), Some("+15551234567"));
        assert_eq!(fields.name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_phone_without_country_code() {
        let fields = contact_fields("Jane Roe\n555-123-4567");
        assert_eq!(fields.phone.as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_short_digit_run_rejected_with_warning() {
        let fields = contact_fields("Jane Roe\n12-345\njane@example.com");
        assert_eq!(fields.phone, None);
        assert!(fields
            .warnings
            .iter()
            .any(|w| w.contains("rejected")), "warnings: {:?}", fields.warnings);
    }

    #[test]
    fn test_name_skips_email_line() {
        let fields = contact_fields("john@example.com\nJohn Doe");
        assert_eq!(fields.name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_single_token_line_is_not_a_name() {
        let fields = contact_fields("Resume\njohn@example.com");
        assert_eq!(fields.name, None);
    }

    #[test]
    fn test_name_scan_window_is_bounded() {
        let text = "a b\nc d\ne f\ng h\ni j\nJohn Doe";
        let fields = contact_fields(text);
        // "John Doe" sits on line 6, outside the default 5-line window, and
        // the lowercase filler lines are not capitalized.
        assert_eq!(fields.name, None);
    }

    #[test]
    fn test_year_range_not_mistaken_for_phone() {
        let fields = contact_fields("Jane Roe\nWorked 2019-2021 somewhere");
        assert_eq!(fields.phone, None);
    }
}
