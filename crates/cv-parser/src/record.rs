//! Record Assembler — folds the normalized fields into the final
//! `CandidateRecord`. This is the only stage that can fail once text
//! extraction has succeeded: a document with no extractable content at all is
//! an assembly error, everything softer becomes a warning on the record.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ParseError;
use crate::fields::RawFields;
use crate::lexicon::Lexicon;
use crate::normalize::{
    canonical_degree, dedup_preserving_order, normalize_skills, parse_date_range, DateRange,
};
use crate::segment::Section;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub dates: Option<DateRange>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub organization: Option<String>,
    pub title: Option<String>,
    pub dates: Option<DateRange>,
    pub description: Option<String>,
}

/// The structured output of a parse. Every field is best-effort; anything the
/// heuristics could not recover is absent here and explained in
/// `extraction_warnings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub extraction_warnings: Vec<String>,
    pub source_filename: String,
}

pub fn assemble(
    sections: &[Section],
    fields: RawFields,
    lexicon: &Lexicon,
    filename: &str,
) -> Result<CandidateRecord, ParseError> {
    let extractable: usize = sections
        .iter()
        .map(|s| usize::from(s.heading.is_some()) + s.body_line_count())
        .sum();
    if extractable == 0 {
        return Err(ParseError::Assembly);
    }

    let mut warnings = fields.warnings;

    let mut education = Vec::new();
    let mut seen = HashSet::new();
    for candidate in &fields.education {
        let entry = EducationEntry {
            institution: candidate.institution.clone(),
            degree: candidate
                .degree
                .as_deref()
                .map(|d| canonical_degree(d, lexicon)),
            field: candidate.field.clone(),
            dates: resolve_dates(candidate.date_raw.as_deref(), &mut warnings),
            gpa: candidate.gpa.clone(),
        };
        let key = format!(
            "{}|{}|{}|{}",
            lower_or_empty(&entry.institution),
            lower_or_empty(&entry.degree),
            lower_or_empty(&entry.field),
            candidate.date_raw.as_deref().unwrap_or(""),
        );
        if seen.insert(key) {
            education.push(entry);
        }
    }

    let mut experience = Vec::new();
    let mut seen = HashSet::new();
    for candidate in &fields.experience {
        let description = (!candidate.description.is_empty())
            .then(|| candidate.description.join("\n"));
        let entry = ExperienceEntry {
            organization: candidate.organization.clone(),
            title: candidate.title.clone(),
            dates: resolve_dates(candidate.date_raw.as_deref(), &mut warnings),
            description,
        };
        let key = format!(
            "{}|{}|{}",
            lower_or_empty(&entry.organization),
            lower_or_empty(&entry.title),
            candidate.date_raw.as_deref().unwrap_or(""),
        );
        if seen.insert(key) {
            experience.push(entry);
        }
    }

    Ok(CandidateRecord {
        name: fields.name,
        email: fields.email,
        phone: fields.phone,
        education,
        experience,
        skills: normalize_skills(&fields.skills, lexicon),
        certifications: dedup_preserving_order(&fields.certifications),
        extraction_warnings: warnings,
        source_filename: filename.to_string(),
    })
}

fn resolve_dates(raw: Option<&str>, warnings: &mut Vec<String>) -> Option<DateRange> {
    let raw = raw?;
    match parse_date_range(raw) {
        Some(range) => Some(range),
        None => {
            warnings.push(format!("could not parse date range '{raw}'"));
            None
        }
    }
}

fn lower_or_empty(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").to_lowercase()
}
