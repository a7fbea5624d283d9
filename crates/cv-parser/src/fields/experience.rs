//! Experience rules: blank-line-delimited entries, each scanned for a date
//! range, an organization, a title, and a free-text description.

use crate::patterns;
use crate::segment::Section;

/// Raw experience entry prior to normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperienceCandidate {
    pub organization: Option<String>,
    pub title: Option<String>,
    /// Raw date token as matched in the source.
    pub date_raw: Option<String>,
    pub description: Vec<String>,
}

const BULLETS: [char; 7] = ['•', '◦', '▪', '·', '∙', '-', '*'];

pub(crate) fn extract(section: &Section) -> Vec<ExperienceCandidate> {
    let mut entries = Vec::new();
    for group in line_groups(section) {
        if let Some(entry) = parse_group(&group) {
            entries.push(entry);
        }
    }
    entries
}

fn line_groups(section: &Section) -> Vec<Vec<String>> {
    let mut groups = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in &section.lines {
        let text = line.text.trim();
        if text.is_empty() {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(text.to_string());
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

fn parse_group(group: &[String]) -> Option<ExperienceCandidate> {
    let mut entry = ExperienceCandidate::default();

    // Locate the date token first; the organization line is the line carrying
    // or preceding it.
    let date_hit = group
        .iter()
        .enumerate()
        .find_map(|(i, line)| patterns::date_token(line).map(|(range, tok)| (i, range, tok.to_string())));

    let mut consumed = vec![false; group.len()];
    let header_index = match &date_hit {
        Some((i, range, token)) => {
            entry.date_raw = Some(token.clone());
            let without_date = remove_span(&group[*i], range.clone());
            if without_date.is_empty() {
                // Pure date line: the header is the line above it, or below
                // when the entry leads with its dates.
                consumed[*i] = true;
                if *i > 0 {
                    *i - 1
                } else if group.len() > 1 {
                    1
                } else {
                    return Some(entry); // a lone date line still records the range
                }
            } else {
                *i
            }
        }
        None => 0,
    };

    let header = match &date_hit {
        Some((i, range, _)) if *i == header_index => remove_span(&group[*i], range.clone()),
        _ => strip_bullet(&group[header_index]).to_string(),
    };
    consumed[header_index] = true;
    let (organization, title) = parse_header(&header);
    entry.organization = organization;
    entry.title = title;

    // `Title` on the line above the organization line, e.g.
    //   Software Engineer
    //   Acme Corp
    //   Jan 2020 - Present
    if entry.title.is_none() && header_index > 0 && !consumed[header_index - 1] {
        let above = strip_bullet(&group[header_index - 1]);
        if looks_like_header(above) {
            entry.title = Some(above.to_string());
            consumed[header_index - 1] = true;
        }
    }

    // Remaining lines are the description; explicit bullets win over prose.
    let remaining: Vec<&String> = group
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed[*i])
        .map(|(_, l)| l)
        .collect();
    let bullet_lines: Vec<String> = remaining
        .iter()
        .filter(|l| l.starts_with(BULLETS))
        .map(|l| strip_bullet(l).to_string())
        .collect();
    entry.description = if bullet_lines.is_empty() {
        remaining
            .iter()
            .map(|l| strip_bullet(l).to_string())
            .filter(|l| !l.is_empty())
            .collect()
    } else {
        bullet_lines
    };

    if entry.organization.is_none() && entry.title.is_none() && entry.date_raw.is_none() {
        return None;
    }
    Some(entry)
}

/// Splits a header line into (organization, title). Separator shape decides
/// the order: `Title at Org`, `Title - Org`, `Org, Title`.
fn parse_header(header: &str) -> (Option<String>, Option<String>) {
    let header = header
        .trim_matches(|c: char| c.is_whitespace() || ",;|-–—".contains(c))
        .trim();
    if header.is_empty() {
        return (None, None);
    }
    for sep in [" at ", " @ "] {
        if let Some((title, org)) = header.split_once(sep) {
            return (clean_part(org), clean_part(title));
        }
    }
    if header.contains(',') {
        let mut parts = header.splitn(2, ',');
        let org = parts.next().and_then(clean_part);
        let title = parts
            .next()
            .and_then(|rest| rest.split(',').next())
            .and_then(clean_part);
        return (org, title);
    }
    for sep in [" - ", " – ", " — ", " | "] {
        if let Some((title, org)) = header.split_once(sep) {
            return (clean_part(org), clean_part(title));
        }
    }
    // A lone part only counts as an organization when it is shaped like a
    // header line; running prose stays unclaimed.
    if looks_like_header(header) {
        (clean_part(header), None)
    } else {
        (None, None)
    }
}

fn clean_part(part: &str) -> Option<String> {
    let cleaned = part
        .trim_matches(|c: char| c.is_whitespace() || ",;|".contains(c))
        .trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Short, capitalized, non-bullet lines qualify as a title above the
/// organization line.
fn looks_like_header(text: &str) -> bool {
    let words = text.split_whitespace().count();
    (1..=6).contains(&words)
        && text.chars().next().is_some_and(|c| c.is_uppercase())
        && patterns::date_token(text).is_none()
}

fn strip_bullet(text: &str) -> &str {
    text.trim_start_matches(BULLETS).trim()
}

fn remove_span(text: &str, range: std::ops::Range<usize>) -> String {
    let before = text.get(..range.start).unwrap_or("");
    let after = text.get(range.end..).unwrap_or("");
    format!("{} {}", before.trim(), after.trim())
        .trim_matches(|c: char| c.is_whitespace() || ",;|-–—()".contains(c))
        .to_string()
}
