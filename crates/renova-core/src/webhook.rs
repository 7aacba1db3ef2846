use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Job lifecycle milestones reported to the tracking endpoint. Closed set;
/// the endpoint rejects anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    CloningComplete,
    AiComplete,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloningComplete => "cloning_complete",
            Self::AiComplete => "ai_complete",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Completion-class statuses are the only ones allowed to carry PR info.
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// CI run coordinates echoed back in every payload.
#[derive(Clone, Debug)]
pub struct RunInfo {
    pub run_id: String,
    pub run_url: String,
}

/// The signed status payload. Constructed, signed, sent, discarded — never
/// retried or persisted. Optional fields are omitted from the serialized
/// form, not emitted as null.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub job_id: String,
    pub status: JobStatus,
    pub message: String,
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
    pub github_run_id: String,
    pub github_run_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,
}

impl WebhookPayload {
    /// A milestone payload without PR info.
    pub fn status(job_id: &str, status: JobStatus, message: &str, run: &RunInfo) -> Self {
        Self {
            job_id: job_id.to_string(),
            status,
            message: message.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            github_run_id: run.run_id.clone(),
            github_run_url: run.run_url.clone(),
            pr_url: None,
            pr_number: None,
        }
    }

    /// A completion payload. PR fields are only attachable here, keeping them
    /// off non-completion statuses.
    pub fn completed(
        job_id: &str,
        message: &str,
        run: &RunInfo,
        pr_url: Option<String>,
        pr_number: Option<u64>,
    ) -> Self {
        Self {
            pr_url,
            pr_number,
            ..Self::status(job_id, JobStatus::Completed, message, run)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> RunInfo {
        RunInfo {
            run_id: "1234567890".into(),
            run_url: "https://github.com/acme/site/actions/runs/1234567890".into(),
        }
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&JobStatus::CloningComplete).unwrap(),
            "\"cloning_complete\""
        );
        assert_eq!(serde_json::to_string(&JobStatus::AiComplete).unwrap(), "\"ai_complete\"");
        assert_eq!(JobStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn milestone_payload_omits_pr_fields() {
        let payload = WebhookPayload::status("J1", JobStatus::AiComplete, "generated", &run());
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("pr_url"));
        assert!(!json.contains("pr_number"));
        assert!(json.contains("\"status\":\"ai_complete\""));
    }

    #[test]
    fn completed_payload_carries_pr_fields() {
        let payload = WebhookPayload::completed(
            "J1",
            "done",
            &run(),
            Some("https://github.com/acme/site/pull/7".into()),
            Some(7),
        );
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"pr_number\":7"));
        assert!(json.contains("\"status\":\"completed\""));
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let payload = WebhookPayload::status("J1", JobStatus::Failed, "boom", &run());
        assert!(chrono::DateTime::parse_from_rfc3339(&payload.timestamp).is_ok());
    }

    #[test]
    fn only_completed_is_completion_class() {
        assert!(JobStatus::Completed.is_completion());
        assert!(!JobStatus::AiComplete.is_completion());
        assert!(!JobStatus::CloningComplete.is_completion());
        assert!(!JobStatus::Failed.is_completion());
    }
}
