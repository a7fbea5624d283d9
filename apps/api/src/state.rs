use std::sync::Arc;

use chrono::{DateTime, Utc};
use cv_parser::CandidateRecord;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;

/// A parsed resume retained in memory for listing and filtering.
#[derive(Debug, Clone, Serialize)]
pub struct StoredResume {
    pub id: Uuid,
    pub uploaded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: CandidateRecord,
}

pub type ResumeStore = Arc<RwLock<Vec<StoredResume>>>;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: ResumeStore,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            store: Arc::new(RwLock::new(Vec::new())),
            config,
        }
    }
}
