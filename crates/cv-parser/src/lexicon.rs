//! Heuristic vocabulary tables and tunable thresholds.
//!
//! Everything the extraction heuristics look up — heading synonyms, degree
//! keywords, skill synonyms, scan windows — lives here as data, so deployments
//! can extend the vocabulary without touching extraction code. `parse` uses
//! `Lexicon::default()`; callers with unusual documents build their own and go
//! through `parse_with_lexicon`.

use std::collections::HashMap;

use crate::segment::SectionLabel;

#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Lowercased heading text (colon stripped) → section label.
    pub headings: HashMap<String, SectionLabel>,
    /// Degree keyword variants (lowercase) → canonical display form, checked
    /// longest-variant-first so "b.tech" wins over "b.e.".
    pub degrees: Vec<(String, String)>,
    /// Words that mark a line as naming an institution.
    pub institution_keywords: Vec<String>,
    /// Words that mark a line as naming a certification.
    pub certification_keywords: Vec<String>,
    /// Skill variant (lowercase) → canonical display form.
    pub skill_synonyms: HashMap<String, String>,
    /// How many leading contact lines are scanned for a candidate name.
    pub name_scan_lines: usize,
    /// Formatting bounds for heading detection.
    pub heading_max_chars: usize,
    pub heading_max_words: usize,
}

impl Default for Lexicon {
    fn default() -> Self {
        let mut headings = HashMap::new();
        let table: &[(&str, SectionLabel)] = &[
            ("contact", SectionLabel::Contact),
            ("contact information", SectionLabel::Contact),
            ("personal information", SectionLabel::Contact),
            ("education", SectionLabel::Education),
            ("education history", SectionLabel::Education),
            ("academics", SectionLabel::Education),
            ("academic background", SectionLabel::Education),
            ("qualification", SectionLabel::Education),
            ("qualifications", SectionLabel::Education),
            ("educational qualification", SectionLabel::Education),
            ("experience", SectionLabel::Experience),
            ("work experience", SectionLabel::Experience),
            ("work history", SectionLabel::Experience),
            ("employment", SectionLabel::Experience),
            ("employment history", SectionLabel::Experience),
            ("professional experience", SectionLabel::Experience),
            ("skills", SectionLabel::Skills),
            ("technical skills", SectionLabel::Skills),
            ("core skills", SectionLabel::Skills),
            ("skillset", SectionLabel::Skills),
            ("areas of expertise", SectionLabel::Skills),
            ("certifications", SectionLabel::Certifications),
            ("certification", SectionLabel::Certifications),
            ("certificates", SectionLabel::Certifications),
            ("licenses", SectionLabel::Certifications),
            ("licenses & certifications", SectionLabel::Certifications),
            // Recognized so they close the previous section, but not extracted.
            ("projects", SectionLabel::Other),
            ("selected projects", SectionLabel::Other),
            ("academic projects", SectionLabel::Other),
            ("summary", SectionLabel::Other),
            ("objective", SectionLabel::Other),
            ("achievements", SectionLabel::Other),
            ("awards", SectionLabel::Other),
            ("publications", SectionLabel::Other),
            ("interests", SectionLabel::Other),
            ("hobbies", SectionLabel::Other),
            ("references", SectionLabel::Other),
        ];
        for (heading, label) in table {
            headings.insert((*heading).to_string(), *label);
        }

        let degree_table: &[(&str, &str)] = &[
            ("bachelors", "Bachelor"),
            ("bachelor", "Bachelor"),
            ("masters", "Master"),
            ("master", "Master"),
            ("doctorate", "Doctorate"),
            ("ph.d.", "Ph.D."),
            ("ph.d", "Ph.D."),
            ("phd", "Ph.D."),
            ("b.s.", "B.S."),
            ("b.s", "B.S."),
            ("b.sc.", "B.Sc."),
            ("b.sc", "B.Sc."),
            ("bsc", "B.Sc."),
            ("m.s.", "M.S."),
            ("m.s", "M.S."),
            ("m.sc.", "M.Sc."),
            ("m.sc", "M.Sc."),
            ("msc", "M.Sc."),
            ("b.a.", "B.A."),
            ("m.a.", "M.A."),
            ("mba", "MBA"),
            ("b.tech", "B.Tech"),
            ("btech", "B.Tech"),
            ("m.tech", "M.Tech"),
            ("mtech", "M.Tech"),
            ("b.e.", "B.E."),
            ("diploma", "Diploma"),
            ("associate", "Associate"),
        ];
        let mut degrees: Vec<(String, String)> = degree_table
            .iter()
            .map(|(variant, canonical)| ((*variant).to_string(), (*canonical).to_string()))
            .collect();
        degrees.sort_by_key(|(variant, _)| std::cmp::Reverse(variant.len()));

        let institution_keywords = [
            "university",
            "college",
            "institute",
            "school",
            "academy",
            "polytechnic",
            "iit",
            "nit",
        ]
        .iter()
        .map(|k| k.to_string())
        .collect();

        let certification_keywords = [
            "certified",
            "certificate",
            "certification",
            "license",
            "licensed",
            "licence",
        ]
        .iter()
        .map(|k| k.to_string())
        .collect();

        let mut skill_synonyms = HashMap::new();
        let synonym_table: &[(&str, &str)] = &[
            ("js", "JavaScript"),
            ("javascript", "JavaScript"),
            ("ts", "TypeScript"),
            ("py", "Python"),
            ("golang", "Go"),
            ("ml", "Machine Learning"),
            ("dl", "Deep Learning"),
            ("ai", "Artificial Intelligence"),
            ("k8s", "Kubernetes"),
            ("postgres", "PostgreSQL"),
            ("nodejs", "Node.js"),
            ("node.js", "Node.js"),
            ("reactjs", "React"),
            ("c plus plus", "C++"),
        ];
        for (variant, canonical) in synonym_table {
            skill_synonyms.insert((*variant).to_string(), (*canonical).to_string());
        }

        Lexicon {
            headings,
            degrees,
            institution_keywords,
            certification_keywords,
            skill_synonyms,
            name_scan_lines: 5,
            heading_max_chars: 48,
            heading_max_words: 4,
        }
    }
}

impl Lexicon {
    /// Finds a degree keyword in `text` on word boundaries, case-insensitive.
    /// Returns the matched byte range and the canonical display form. The
    /// match runs over the original string (ASCII case folding, the variants
    /// are all ASCII), so the range stays valid even when surrounding text
    /// would change byte length under `to_lowercase`.
    pub(crate) fn find_degree(&self, text: &str) -> Option<(std::ops::Range<usize>, &str)> {
        for (variant, canonical) in &self.degrees {
            let mut from = 0;
            while let Some(start) = ascii_find_ci(text, variant, from) {
                let end = start + variant.len();
                let before_ok = text[..start]
                    .chars()
                    .next_back()
                    .map_or(true, |c| !c.is_alphanumeric());
                let after_ok = text[end..]
                    .chars()
                    .next()
                    .map_or(true, |c| !c.is_alphanumeric() && c != '.');
                if before_ok && after_ok {
                    return Some((start..end, canonical.as_str()));
                }
                from = start + 1;
            }
        }
        None
    }

    pub(crate) fn has_institution_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.institution_keywords
            .iter()
            .any(|k| word_match(&lower, k))
    }

    pub(crate) fn has_certification_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.certification_keywords
            .iter()
            .any(|k| word_match(&lower, k))
    }
}

/// ASCII-case-insensitive substring search. A match can only start and end on
/// ASCII bytes, so the returned index is a char boundary in `haystack`.
fn ascii_find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let nee = needle.as_bytes();
    if nee.is_empty() || hay.len() < nee.len() {
        return None;
    }
    (from..=hay.len() - nee.len()).find(|&i| hay[i..i + nee.len()].eq_ignore_ascii_case(nee))
}

/// Whole-word containment over an already-lowercased haystack.
fn word_match(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_degree_dotted_abbreviation() {
        let lexicon = Lexicon::default();
        let (range, canonical) = lexicon.find_degree("B.S. Computer Science").unwrap();
        assert_eq!(canonical, "B.S.");
        assert_eq!(range.start, 0);
    }

    #[test]
    fn test_find_degree_respects_word_boundaries() {
        let lexicon = Lexicon::default();
        // "webmaster" must not match "master"
        assert!(lexicon.find_degree("Webmaster at Acme").is_none());
    }

    #[test]
    fn test_find_degree_case_insensitive() {
        let lexicon = Lexicon::default();
        let (_, canonical) = lexicon.find_degree("bachelor of science").unwrap();
        assert_eq!(canonical, "Bachelor");
    }

    #[test]
    fn test_find_degree_range_valid_after_multibyte_text() {
        let lexicon = Lexicon::default();
        // 'İ' grows by a byte under to_lowercase; the returned range must
        // still slice the original string correctly.
        let line = "İstanbul Üniversitesi, B.Sc. Mathematics";
        let (range, canonical) = lexicon.find_degree(line).unwrap();
        assert_eq!(&line[range], "B.Sc.");
        assert_eq!(canonical, "B.Sc.");
    }

    #[test]
    fn test_institution_keyword_match() {
        let lexicon = Lexicon::default();
        assert!(lexicon.has_institution_keyword("Stanford University"));
        assert!(!lexicon.has_institution_keyword("Universal Pictures"));
    }
}
