//! Job sequencing: extract -> generate -> recover change-set -> apply, with
//! best-effort webhooks at each milestone. Strictly sequential; each step
//! completes before the next starts.

use std::path::PathBuf;

use renova_apply::{apply_changes, ApplyError};
use renova_core::{Framework, JobStatus, RunInfo, WebhookPayload};
use renova_llm::{extract_change_set, GenerationError, Generator, ResponseError};
use renova_notify::WebhookNotifier;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("response parsing failed: {0}")]
    Response(#[from] ResponseError),

    #[error("apply failed: {0}")]
    Apply(#[from] ApplyError),
}

pub struct JobConfig {
    pub working_root: PathBuf,
    pub request: String,
    pub fix_mode: bool,
    pub job_id: String,
    pub run: RunInfo,
}

#[derive(Debug)]
pub struct JobReport {
    pub framework: Framework,
    pub operations: usize,
}

/// Run one job end to end. Webhook delivery is best-effort and never fails
/// the job; a `failed` webhook on error is the caller's responsibility so
/// that it is sent even when this function is never reached.
pub async fn run_job(
    config: &JobConfig,
    generator: &dyn Generator,
    notifier: Option<&WebhookNotifier>,
) -> Result<JobReport, PipelineError> {
    let context = renova_context::extract_context(&config.working_root);
    let framework = context.framework;

    let system = renova_llm::prompt::system_prompt(framework);
    let prompt = renova_llm::prompt::user_prompt(&config.request, &context, config.fix_mode);

    let response = generator.generate(&system, &prompt).await?;
    let changes = extract_change_set(&response)?;
    info!(operations = changes.len(), "change-set recovered");

    notify(
        notifier,
        &WebhookPayload::status(
            &config.job_id,
            JobStatus::AiComplete,
            &format!("generated {} file operations", changes.len()),
            &config.run,
        ),
    )
    .await;

    let operations = apply_changes(&config.working_root, &changes)?;

    notify(
        notifier,
        &WebhookPayload::completed(
            &config.job_id,
            &format!("applied {operations} file operations"),
            &config.run,
            None,
            None,
        ),
    )
    .await;

    Ok(JobReport {
        framework,
        operations,
    })
}

/// Send a `failed` status for the job. Best-effort like every delivery.
pub async fn report_failure(
    notifier: Option<&WebhookNotifier>,
    job_id: &str,
    run: &RunInfo,
    message: &str,
) {
    notify(
        notifier,
        &WebhookPayload::status(job_id, JobStatus::Failed, message, run),
    )
    .await;
}

async fn notify(notifier: Option<&WebhookNotifier>, payload: &WebhookPayload) {
    if let Some(notifier) = notifier {
        // Outcome is logged inside the notifier; nothing to check here.
        let _ = notifier.notify(payload).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renova_llm::MockGenerator;
    use std::fs;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("renova_pipeline_{}", uuid::Uuid::now_v7()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(dir: &PathBuf) -> JobConfig {
        JobConfig {
            working_root: dir.clone(),
            request: "Add a landing page".into(),
            fix_mode: false,
            job_id: "J1".into(),
            run: RunInfo {
                run_id: "42".into(),
                run_url: "https://github.com/acme/site/actions/runs/42".into(),
            },
        }
    }

    #[tokio::test]
    async fn full_job_applies_generated_changes() {
        let dir = temp_dir();
        fs::write(
            dir.join("package.json"),
            r#"{"name": "demo", "dependencies": {"react": "^18"}}"#,
        )
        .unwrap();

        let generator = MockGenerator::text(
            r#"Sure, here you go:
[{"path": "a/b.txt", "action": "create", "content": "hi"}]"#,
        );

        let report = run_job(&config(&dir), &generator, None).await.unwrap();
        assert_eq!(report.operations, 1);
        assert_eq!(report.framework, Framework::React);
        assert_eq!(fs::read_to_string(dir.join("a/b.txt")).unwrap(), "hi");
        assert_eq!(generator.call_count(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn unparseable_response_fails_the_job() {
        let dir = temp_dir();
        let generator = MockGenerator::text("I refuse to answer in JSON.");

        let err = run_job(&config(&dir), &generator, None).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Response(ResponseError::MissingChangeSet)
        ));

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn generation_error_propagates() {
        let dir = temp_dir();
        let generator = MockGenerator::new(vec![renova_llm::MockResponse::Error(
            GenerationError::RateLimited,
        )]);

        let err = run_job(&config(&dir), &generator, None).await.unwrap_err();
        assert!(matches!(err, PipelineError::Generation(_)));

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn path_escape_fails_the_job() {
        let dir = temp_dir();
        let generator = MockGenerator::text(
            r#"[{"path": "../../etc/passwd", "action": "create", "content": "evil"}]"#,
        );

        let err = run_job(&config(&dir), &generator, None).await.unwrap_err();
        assert!(matches!(err, PipelineError::Apply(ApplyError::PathEscape { .. })));

        fs::remove_dir_all(&dir).ok();
    }
}
