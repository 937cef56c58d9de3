//! Tool adapter
//!
//! Exposes the poller as one callable operation for a tool registry: JSON
//! arguments in, a JSON success payload or a categorized JSON error out.
//! Framing the output into a specific tool-calling protocol is left to the
//! transport.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use vigil_core::domain::job::{JobRequest, JobResult};

use crate::config::MAX_WAIT_LIMIT;
use crate::error::PollError;
use crate::repository::{JobStatusSource, JobSubmitter};
use crate::scheduler::JobPoller;

/// Description of a tool as advertised to callers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Result of a tool call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub content: Value,
    pub is_error: bool,
}

impl ToolOutput {
    fn success(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    fn error(content: Value) -> Self {
        Self {
            content,
            is_error: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PollingToolArgs {
    kind: String,
    #[serde(default)]
    parameters: HashMap<String, Value>,
    poll_interval_secs: Option<u64>,
    max_wait_secs: Option<u64>,
}

/// A tool that submits a job and waits for it
pub struct PollingTool {
    name: String,
    description: String,
    poller: JobPoller,
    submitter: Arc<dyn JobSubmitter>,
    source: Arc<dyn JobStatusSource>,
}

impl PollingTool {
    /// Creates a tool named `name` backed by the given job API
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        poller: JobPoller,
        submitter: Arc<dyn JobSubmitter>,
        source: Arc<dyn JobStatusSource>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            poller,
            submitter,
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "kind": {
                        "type": "string",
                        "description": "Kind of job to run, e.g. diagnosis or inspection"
                    },
                    "parameters": {
                        "type": "object",
                        "description": "Job parameters passed to the job API unchanged"
                    },
                    "poll_interval_secs": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Seconds between status checks for this call"
                    },
                    "max_wait_secs": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": MAX_WAIT_LIMIT.as_secs(),
                        "description": "Seconds to wait for the job before giving up"
                    }
                },
                "required": ["kind"]
            }),
        }
    }

    /// Runs the tool
    ///
    /// Cancelling `cancel` (e.g. on client disconnect) stops the wait and
    /// yields a `cancelled` error.
    pub async fn call(&self, arguments: Option<Value>, cancel: &CancellationToken) -> ToolOutput {
        let args: PollingToolArgs = match arguments.map(serde_json::from_value).transpose() {
            Ok(Some(args)) => args,
            Ok(None) => return invalid_arguments("missing arguments: `kind` is required"),
            Err(e) => return invalid_arguments(&format!("invalid arguments: {}", e)),
        };

        let mut config = *self.poller.config();
        if let Some(secs) = args.poll_interval_secs {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = args.max_wait_secs {
            config.max_wait = Duration::from_secs(secs);
        }
        let poller = self.poller.clone().with_config(config);

        let request = JobRequest {
            kind: args.kind,
            parameters: args.parameters,
        };

        info!("Tool {} running {} job", self.name, request.kind);

        match poller
            .run_to_completion(
                request,
                self.submitter.as_ref(),
                self.source.as_ref(),
                cancel,
            )
            .await
        {
            Ok(result) => ToolOutput::success(result_json(&result)),
            Err(e) => ToolOutput::error(error_json(&e)),
        }
    }
}

/// JSON report of a successful job
pub fn result_json(result: &JobResult) -> Value {
    json!({
        "status": "succeeded",
        "handle": result.handle,
        "result": result.payload,
        "polls": result.polls,
        "elapsed_ms": result.elapsed.as_millis() as u64,
        "submitted_at": result.submitted_at,
        "completed_at": result.completed_at,
    })
}

/// JSON report of a failed wait, tagged with its error category
pub fn error_json(error: &PollError) -> Value {
    let mut detail = json!({
        "kind": error.kind(),
        "message": error.to_string(),
        "retryable": error.is_retryable(),
    });

    if let Some(handle) = error.handle() {
        detail["handle"] = json!(handle);
    }
    if let PollError::Timeout { last_status, .. } = error {
        detail["last_status"] = json!(last_status);
    }

    json!({ "status": "error", "error": detail })
}

fn invalid_arguments(message: &str) -> ToolOutput {
    ToolOutput::error(json!({
        "status": "error",
        "error": {
            "kind": "invalid_arguments",
            "message": message,
            "retryable": false,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollConfig;
    use crate::repository::{InMemoryJobApi, ScriptStep};
    use vigil_core::domain::job::PollResult;

    fn tool_with(api: InMemoryJobApi) -> (PollingTool, Arc<InMemoryJobApi>) {
        let api = Arc::new(api);
        let poller = JobPoller::new(PollConfig::new(
            Duration::from_secs(1),
            Duration::from_secs(30),
        ));
        let tool = PollingTool::new(
            "diagnose_cluster",
            "Run a cluster diagnosis and wait for the report",
            poller,
            api.clone(),
            api.clone(),
        );
        (tool, api)
    }

    #[test]
    fn test_definition() {
        let (tool, _) = tool_with(InMemoryJobApi::new(Vec::new()));
        let definition = serde_json::to_value(tool.definition()).unwrap();
        assert_eq!(definition["name"], "diagnose_cluster");
        assert_eq!(definition["inputSchema"]["required"], json!(["kind"]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_output() {
        let (tool, _) = tool_with(InMemoryJobApi::new(vec![
            ScriptStep::Status(PollResult::running()),
            ScriptStep::Status(PollResult::succeeded(Some(json!({"healthy": true})))),
        ]));

        let output = tool
            .call(
                Some(json!({"kind": "diagnosis", "parameters": {"cluster_id": "c-1"}})),
                &CancellationToken::new(),
            )
            .await;

        assert!(!output.is_error);
        assert_eq!(output.content["status"], "succeeded");
        assert_eq!(output.content["result"], json!({"healthy": true}));
        assert_eq!(output.content["polls"], 2);
        assert_eq!(output.content["elapsed_ms"], 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_output_is_retryable() {
        let (tool, _) = tool_with(InMemoryJobApi::new(Vec::new()));

        let output = tool
            .call(
                Some(json!({"kind": "diagnosis", "poll_interval_secs": 1, "max_wait_secs": 3})),
                &CancellationToken::new(),
            )
            .await;

        assert!(output.is_error);
        let error = &output.content["error"];
        assert_eq!(error["kind"], "timeout");
        assert_eq!(error["retryable"], true);
        assert_eq!(error["last_status"], "running");
        assert!(error["handle"].is_string());
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_failure_output() {
        let (tool, _) = tool_with(InMemoryJobApi::new(vec![ScriptStep::Status(
            PollResult::failed(Some("quota exceeded".to_string())),
        )]));

        let output = tool
            .call(Some(json!({"kind": "inspection"})), &CancellationToken::new())
            .await;

        assert!(output.is_error);
        assert_eq!(output.content["error"]["kind"], "job_failed");
        assert_eq!(output.content["error"]["retryable"], false);
        assert!(
            output.content["error"]["message"]
                .as_str()
                .unwrap()
                .contains("quota exceeded")
        );
    }

    #[tokio::test]
    async fn test_invalid_overrides_are_config_errors() {
        let (tool, api) = tool_with(InMemoryJobApi::new(Vec::new()));

        let output = tool
            .call(
                Some(json!({"kind": "diagnosis", "poll_interval_secs": 10, "max_wait_secs": 5})),
                &CancellationToken::new(),
            )
            .await;

        assert!(output.is_error);
        assert_eq!(output.content["error"]["kind"], "config");
        assert_eq!(api.submissions(), 0);
    }

    #[tokio::test]
    async fn test_huge_max_wait_is_rejected_before_submission() {
        let (tool, api) = tool_with(InMemoryJobApi::new(Vec::new()));

        let output = tool
            .call(
                Some(json!({"kind": "diagnosis", "max_wait_secs": u64::MAX})),
                &CancellationToken::new(),
            )
            .await;

        assert!(output.is_error);
        assert_eq!(output.content["error"]["kind"], "config");
        assert_eq!(output.content["error"]["retryable"], false);
        assert_eq!(api.submissions(), 0);
    }

    #[tokio::test]
    async fn test_bad_arguments() {
        let (tool, api) = tool_with(InMemoryJobApi::new(Vec::new()));

        let output = tool.call(None, &CancellationToken::new()).await;
        assert_eq!(output.content["error"]["kind"], "invalid_arguments");

        let output = tool
            .call(Some(json!({"parameters": {}})), &CancellationToken::new())
            .await;
        assert_eq!(output.content["error"]["kind"], "invalid_arguments");
        assert_eq!(api.submissions(), 0);
    }

    #[tokio::test]
    async fn test_submission_failure_output() {
        let (tool, api) = tool_with(InMemoryJobApi::rejecting("cluster c-9 not found"));

        let output = tool
            .call(Some(json!({"kind": "diagnosis"})), &CancellationToken::new())
            .await;

        assert_eq!(output.content["error"]["kind"], "submission_failed");
        assert!(output.content["error"].get("handle").is_none());
        assert_eq!(api.polls(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_output() {
        let (tool, _) = tool_with(InMemoryJobApi::new(Vec::new()));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let output = tool.call(Some(json!({"kind": "diagnosis"})), &cancel).await;
        assert_eq!(output.content["error"]["kind"], "cancelled");
    }
}
