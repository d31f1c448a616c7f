//! Background processing of a queued analysis job.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::analysis::models::{AnalysisResult, ParsedPair};
use crate::analysis::{run_analysis, SkillTaxonomy};
use crate::extraction::{extract_text, UploadedFile};
use crate::jobs::store::JobStore;

/// Extracts the resume text, runs the analysis and records the outcome.
/// Any failure marks the job failed instead of propagating.
pub async fn process_job(
    jobs: JobStore,
    taxonomy: Arc<SkillTaxonomy>,
    job_id: Uuid,
    jd_text: String,
    file: UploadedFile,
) {
    jobs.start(job_id).await;

    match run_job(taxonomy, &jd_text, file).await {
        Ok((result, parsed)) => {
            debug!(
                %job_id,
                fit = result.scores.fit,
                bullet_issues = result.suggestions.bullet_issues.len(),
                "analysis finished"
            );
            jobs.complete(job_id, result, parsed).await;
            info!(%job_id, "job completed");
        }
        Err(e) => {
            error!(%job_id, "job failed: {e:?}");
            jobs.fail(job_id, e.to_string()).await;
        }
    }
}

async fn run_job(
    taxonomy: Arc<SkillTaxonomy>,
    jd_text: &str,
    file: UploadedFile,
) -> Result<(AnalysisResult, ParsedPair)> {
    let resume_text = tokio::task::spawn_blocking(move || extract_text(&file))
        .await
        .context("text extraction task failed")?;

    Ok(run_analysis(&taxonomy, jd_text, &resume_text))
}

/// Queues `process_job` on the runtime and returns immediately.
pub fn spawn_job(
    jobs: JobStore,
    taxonomy: Arc<SkillTaxonomy>,
    job_id: Uuid,
    jd_text: String,
    file: UploadedFile,
) {
    tokio::spawn(process_job(jobs, taxonomy, job_id, jd_text, file));
}
