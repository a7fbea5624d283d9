//! Skills rules: delimiter-split tokens, with category prefixes stripped.

const DELIMITERS: [char; 6] = [',', ';', '|', '•', '·', '∙'];

pub(crate) fn extract(section: &crate::segment::Section) -> Vec<String> {
    let mut skills = Vec::new();
    for line in &section.lines {
        let text = strip_category(line.text.trim().trim_start_matches(['•', '-', '*', '◦']).trim());
        for token in text.split(DELIMITERS) {
            let token = token.trim();
            if is_skill_token(token) {
                skills.push(token.to_string());
            }
        }
    }
    skills
}

/// Drops a `Languages:` / `Cloud Platforms:` style prefix. Only short,
/// alphabetic prefixes qualify, so `GPA: 3.9` style lines elsewhere would not.
fn strip_category(text: &str) -> &str {
    let Some((category, rest)) = text.split_once(':') else {
        return text;
    };
    let words: Vec<&str> = category.split_whitespace().collect();
    let is_category = (1..=3).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().all(|c| c.is_alphabetic() || c == '/'));
    if is_category {
        rest.trim()
    } else {
        text
    }
}

fn is_skill_token(token: &str) -> bool {
    (2..=40).contains(&token.chars().count()) && token.chars().any(|c| c.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentFormat, RawDocument};
    use crate::extract::extract_text;
    use crate::lexicon::Lexicon;
    use crate::segment::{segment, SectionLabel};

    fn skill_tokens(text: &str) -> Vec<String> {
        let doc = RawDocument::new(text.as_bytes().to_vec(), DocumentFormat::Text, "t.txt");
        let block = extract_text(&doc).unwrap();
        let sections = segment(&block, &Lexicon::default());
        let section = sections
            .iter()
            .find(|s| s.label == SectionLabel::Skills)
            .expect("skills section");
        extract(section)
    }

    #[test]
    fn test_comma_separated() {
        let skills = skill_tokens("Skills\nRust, Python, PostgreSQL");
        assert_eq!(skills, vec!["Rust", "Python", "PostgreSQL"]);
    }

    #[test]
    fn test_category_prefix_stripped() {
        let skills = skill_tokens("Skills\nLanguages: Rust, Go\nCloud Platforms: AWS; GCP");
        assert_eq!(skills, vec!["Rust", "Go", "AWS", "GCP"]);
    }

    #[test]
    fn test_bullet_lines() {
        let skills = skill_tokens("Skills\n• Kubernetes\n• Terraform | Ansible");
        assert_eq!(skills, vec!["Kubernetes", "Terraform", "Ansible"]);
    }

    #[test]
    fn test_junk_tokens_dropped() {
        // single chars, blanks, and digit-only tokens are not skills
        let skills = skill_tokens("Skills\nx, , 42, Rust");
        assert_eq!(skills, vec!["Rust"]);
    }
}
