use std::sync::Arc;

use crate::analysis::SkillTaxonomy;
use crate::config::Config;
use crate::jobs::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only skill catalog shared by every analysis.
    pub taxonomy: Arc<SkillTaxonomy>,
    pub jobs: JobStore,
}

impl AppState {
    pub fn new(config: Config, taxonomy: SkillTaxonomy) -> Self {
        let jobs = JobStore::with_ttl(config.job_ttl());
        Self {
            config,
            taxonomy: Arc::new(taxonomy),
            jobs,
        }
    }
}
