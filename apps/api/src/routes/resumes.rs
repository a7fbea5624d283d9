use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::{AppState, StoredResume};

/// Per-file result of a multipart upload. A batch reports every file; a
/// single-file upload surfaces its failure as the response status instead.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Parsed {
        id: Uuid,
        filename: String,
        warnings: Vec<String>,
    },
    Failed {
        filename: String,
        error: String,
    },
}

/// POST /api/v1/resumes
/// Accepts one or more resume files as multipart form data, parses each, and
/// stores the resulting records in memory.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<UploadOutcome>>, AppError> {
    let mut outcomes = Vec::new();
    let mut sole_failure: Option<AppError> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue; // non-file form fields are ignored
        };
        let data: bytes::Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read '{filename}': {e}")))?;

        let declared = declared_format(&filename).to_string();
        let parse_filename = filename.clone();
        // PDF extraction is CPU-bound; keep it off the async workers.
        let result = tokio::task::spawn_blocking(move || {
            cv_parser::parse(&data, &declared, &parse_filename)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("parse task failed: {e}")))?;

        match result {
            Ok(record) => {
                let stored = StoredResume {
                    id: Uuid::new_v4(),
                    uploaded_at: Utc::now(),
                    record,
                };
                info!(id = %stored.id, filename, "resume parsed");
                outcomes.push(UploadOutcome::Parsed {
                    id: stored.id,
                    filename,
                    warnings: stored.record.extraction_warnings.clone(),
                });
                state.store.write().await.push(stored);
            }
            Err(err) => {
                info!(filename, %err, "resume rejected");
                outcomes.push(UploadOutcome::Failed {
                    filename,
                    error: err.to_string(),
                });
                sole_failure = Some(AppError::Parse(err));
            }
        }
    }

    match (outcomes.len(), sole_failure) {
        (0, _) => Err(AppError::Validation("no file fields in upload".to_string())),
        (1, Some(err)) => Err(err),
        _ => Ok(Json(outcomes)),
    }
}

/// GET /api/v1/resumes?skill=rust&degree=b.s.
pub async fn handle_list(
    State(state): State<AppState>,
    Query(filter): Query<ResumeFilter>,
) -> Json<Vec<StoredResume>> {
    let store = state.store.read().await;
    let resumes: Vec<StoredResume> = store
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    Json(resumes)
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoredResume>, AppError> {
    let store = state.store.read().await;
    store
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no resume with id {id}")))
}

/// GET /api/v1/resumes/export
/// Dumps every stored record as a single JSON document.
pub async fn handle_export(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.read().await;
    Json(json!({
        "exported_at": Utc::now(),
        "count": store.len(),
        "resumes": &*store,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ResumeFilter {
    /// Exact skill match, case-insensitive.
    pub skill: Option<String>,
    /// Substring match on the degree field, case-insensitive.
    pub degree: Option<String>,
}

impl ResumeFilter {
    fn matches(&self, resume: &StoredResume) -> bool {
        if let Some(skill) = &self.skill {
            let wanted = skill.to_lowercase();
            if !resume
                .record
                .skills
                .iter()
                .any(|s| s.to_lowercase() == wanted)
            {
                return false;
            }
        }
        if let Some(degree) = &self.degree {
            let wanted = degree.to_lowercase();
            if !resume.record.education.iter().any(|e| {
                e.degree
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&wanted))
            }) {
                return false;
            }
        }
        true
    }
}

/// Maps a filename extension to the engine's declared-format string. Unknown
/// extensions pass through so the engine can reject them by name.
fn declared_format(filename: &str) -> &str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => "pdf",
        Some(ext) if ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("text") => "text",
        Some(ext) => ext,
        None => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(skills: &[&str], degree: Option<&str>) -> StoredResume {
        let record = cv_parser::parse(
            format!("Jane Roe\n\nSkills\n{}", skills.join(", ")).as_bytes(),
            "text",
            "jane.txt",
        )
        .unwrap();
        let mut resume = StoredResume {
            id: Uuid::new_v4(),
            uploaded_at: Utc::now(),
            record,
        };
        if let Some(degree) = degree {
            resume.record.education.push(cv_parser::EducationEntry {
                institution: None,
                degree: Some(degree.to_string()),
                field: None,
                dates: None,
                gpa: None,
            });
        }
        resume
    }

    #[test]
    fn test_declared_format_from_extension() {
        assert_eq!(declared_format("resume.pdf"), "pdf");
        assert_eq!(declared_format("resume.PDF"), "pdf");
        assert_eq!(declared_format("resume.txt"), "text");
        assert_eq!(declared_format("resume.docx"), "docx");
        assert_eq!(declared_format("resume"), "text");
    }

    #[test]
    fn test_skill_filter_is_exact_and_case_insensitive() {
        let resume = stored(&["Rust", "Python"], None);
        let filter = ResumeFilter {
            skill: Some("rust".to_string()),
            degree: None,
        };
        assert!(filter.matches(&resume));

        let filter = ResumeFilter {
            skill: Some("rus".to_string()),
            degree: None,
        };
        assert!(!filter.matches(&resume));
    }

    #[test]
    fn test_degree_filter_is_substring() {
        let resume = stored(&["Rust"], Some("B.S."));
        let filter = ResumeFilter {
            skill: None,
            degree: Some("b.s".to_string()),
        };
        assert!(filter.matches(&resume));

        let filter = ResumeFilter {
            skill: None,
            degree: Some("mba".to_string()),
        };
        assert!(!filter.matches(&resume));
    }

    #[test]
    fn test_combined_filters_must_both_match() {
        let resume = stored(&["Rust"], Some("B.S."));
        let filter = ResumeFilter {
            skill: Some("rust".to_string()),
            degree: Some("ph.d".to_string()),
        };
        assert!(!filter.matches(&resume));
    }
}
