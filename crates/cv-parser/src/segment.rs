//! Section Segmenter — partitions the extracted line stream into labeled
//! regions. Every line lands in exactly one section: heading lines are stored
//! on the section they open, body lines in its `lines`. Lines before the first
//! detected heading default to the contact block, since resumes conventionally
//! lead with contact info.

use serde::{Deserialize, Serialize};

use crate::extract::{SourceLine, TextBlock};
use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Contact,
    Education,
    Experience,
    Skills,
    Certifications,
    Other,
}

/// A labeled contiguous span of resume text.
#[derive(Debug, Clone)]
pub struct Section {
    pub label: SectionLabel,
    /// The heading line that opened this section; `None` for the implicit
    /// leading contact block.
    pub heading: Option<SourceLine>,
    pub lines: Vec<SourceLine>,
}

impl Section {
    pub(crate) fn body_line_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| !l.text.trim().is_empty())
            .count()
    }
}

/// Stage 2 of the pipeline: a total partition of the line stream.
pub fn segment(block: &TextBlock, lexicon: &Lexicon) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section {
        label: SectionLabel::Contact,
        heading: None,
        lines: Vec::new(),
    };

    for line in &block.lines {
        if let Some(label) = heading_label(&line.text, lexicon) {
            if current.heading.is_some() || !current.lines.is_empty() {
                sections.push(current);
            }
            current = Section {
                label,
                heading: Some(line.clone()),
                lines: Vec::new(),
            };
        } else {
            current.lines.push(line.clone());
        }
    }
    if current.heading.is_some() || !current.lines.is_empty() {
        sections.push(current);
    }

    tracing::debug!(sections = sections.len(), "segmented document");
    sections
}

/// A line is a heading when it matches the vocabulary AND looks like a
/// heading: short, no trailing punctuation (a colon is allowed), and either
/// capitalized or all-caps.
fn heading_label(text: &str, lexicon: &Lexicon) -> Option<SectionLabel> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.len() > lexicon.heading_max_chars {
        return None;
    }
    let stripped = trimmed.trim_end_matches(':').trim_end();
    if stripped.is_empty() || stripped.ends_with(['.', ',', ';', '!', '?']) {
        return None;
    }
    if stripped.split_whitespace().count() > lexicon.heading_max_words {
        return None;
    }
    let starts_upper = stripped.chars().next().is_some_and(|c| c.is_uppercase());
    let all_caps = stripped.chars().any(|c| c.is_alphabetic())
        && stripped
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase());
    if !starts_upper && !all_caps {
        return None;
    }
    lexicon.headings.get(&stripped.to_lowercase()).copied()
}
