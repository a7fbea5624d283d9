//! Field Extractor — per-section extraction rules. All rules are best-effort:
//! nothing here returns an error, and every miss is recorded as a warning on
//! the eventual record. Rules only run inside their assigned section, so a
//! span can never satisfy two field types at once.

pub mod certifications;
pub mod contact;
pub mod education;
pub mod experience;
pub mod skills;

use crate::lexicon::Lexicon;
use crate::segment::{Section, SectionLabel};

pub use education::EducationCandidate;
pub use experience::ExperienceCandidate;

/// Raw per-field output of stage 3, prior to normalization.
#[derive(Debug, Default)]
pub struct RawFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Vec<EducationCandidate>,
    pub experience: Vec<ExperienceCandidate>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn extract(sections: &[Section], lexicon: &Lexicon) -> RawFields {
    let mut fields = RawFields::default();

    for section in sections {
        match section.label {
            SectionLabel::Contact => contact::extract_into(section, lexicon, &mut fields),
            SectionLabel::Education => fields
                .education
                .extend(education::extract(section, lexicon)),
            SectionLabel::Experience => {
                fields.experience.extend(experience::extract(section))
            }
            SectionLabel::Skills => fields.skills.extend(skills::extract(section)),
            SectionLabel::Certifications => fields
                .certifications
                .extend(certifications::extract(section, lexicon)),
            SectionLabel::Other => {}
        }
    }

    // Some resumes bury the email or phone outside the leading block; fall
    // back to a whole-document scan before declaring the field missing.
    if fields.email.is_none() {
        fields.email = sections
            .iter()
            .flat_map(|s| &s.lines)
            .find_map(|l| crate::patterns::EMAIL.find(&l.text).map(|m| m.as_str().to_string()));
    }
    if fields.phone.is_none() {
        fields.phone = sections
            .iter()
            .flat_map(|s| &s.lines)
            .find_map(|l| contact::first_valid_phone(&l.text));
    }

    if fields.name.is_none() {
        fields.warnings.push("no candidate name detected".to_string());
    }
    if fields.email.is_none() {
        fields.warnings.push("no email address detected".to_string());
    }
    if fields.phone.is_none() {
        fields.warnings.push("no phone number detected".to_string());
    }

    tracing::debug!(
        education = fields.education.len(),
        experience = fields.experience.len(),
        skills = fields.skills.len(),
        warnings = fields.warnings.len(),
        "field extraction complete"
    );
    fields
}
