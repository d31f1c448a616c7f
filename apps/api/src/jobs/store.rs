//! In-memory job store for background analyses.
//!
//! Nothing is persisted. Finished and failed jobs are evicted once they have
//! been idle longer than the store's TTL; the sweep runs on every `create`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::analysis::models::{AnalysisResult, ParsedPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Processing,
    Failed,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: Uuid,
    pub status: JobStatus,
    pub jd_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedPair>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const DEFAULT_TTL_SECS: i64 = 60 * 60;

impl JobRecord {
    fn is_finished(&self) -> bool {
        matches!(self.status, JobStatus::Done | JobStatus::Failed)
    }
}

/// Cheap to clone; all clones share one map.
#[derive(Debug, Clone)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<Uuid, JobRecord>>>,
    ttl: Duration,
}

impl Default for JobStore {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self, jd_text: &str) -> JobRecord {
        let now = Utc::now();
        self.evict_expired(now).await;
        let job = JobRecord {
            id: Uuid::new_v4(),
            status: JobStatus::Queued,
            jd_text: jd_text.to_string(),
            error: None,
            result: None,
            parsed: None,
            created_at: now,
            updated_at: now,
        };
        self.jobs.write().await.insert(job.id, job.clone());
        job
    }

    pub async fn get(&self, id: Uuid) -> Option<JobRecord> {
        self.jobs.read().await.get(&id).cloned()
    }

    pub async fn start(&self, id: Uuid) {
        self.update(id, |job| job.status = JobStatus::Processing).await;
    }

    pub async fn complete(&self, id: Uuid, result: AnalysisResult, parsed: ParsedPair) {
        self.update(id, |job| {
            job.status = JobStatus::Done;
            job.result = Some(result);
            job.parsed = Some(parsed);
        })
        .await;
    }

    pub async fn fail(&self, id: Uuid, message: impl Into<String>) {
        let message = message.into();
        self.update(id, |job| {
            job.status = JobStatus::Failed;
            job.error = Some(message);
        })
        .await;
    }

    /// Drops finished and failed jobs whose last update is at least `ttl` old.
    /// Queued and processing jobs are never evicted.
    pub async fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - self.ttl;
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| !(job.is_finished() && job.updated_at <= cutoff));
        let evicted = before - jobs.len();
        if evicted > 0 {
            debug!(evicted, remaining = jobs.len(), "Evicted expired jobs");
        }
        evicted
    }

    /// Unknown ids are ignored; a job may have been created by another store.
    async fn update(&self, id: Uuid, apply: impl FnOnce(&mut JobRecord)) {
        if let Some(job) = self.jobs.write().await.get_mut(&id) {
            apply(job);
            job.updated_at = Utc::now();
        }
    }
}
