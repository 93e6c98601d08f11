//! Spawn-per-call invocation of the external recommendation script.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use crate::output::extract_json_line;

/// Default time budget for one recommendation call.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the recommendation bridge.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// Path to the interpreter binary (e.g. `python3`).
    pub interpreter: PathBuf,
    /// Path to the recommendation script passed as the first argument.
    pub script: PathBuf,
    /// Upper bound on one call's wall-clock time. A hung script must not
    /// block its request forever.
    pub timeout: Duration,
}

impl SuggestConfig {
    /// Load bridge configuration from environment variables.
    ///
    /// | Env Var           | Default                     |
    /// |-------------------|-----------------------------|
    /// | `ML_INTERPRETER`  | `python3`                   |
    /// | `ML_SCRIPT`       | `scripts/suggest_model.py`  |
    /// | `ML_TIMEOUT_SECS` | `60`                        |
    pub fn from_env() -> Self {
        let interpreter = std::env::var("ML_INTERPRETER")
            .unwrap_or_else(|_| "python3".into())
            .into();
        let script = std::env::var("ML_SCRIPT")
            .unwrap_or_else(|_| "scripts/suggest_model.py".into())
            .into();
        let timeout_secs: u64 = std::env::var("ML_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("ML_TIMEOUT_SECS must be a valid u64");

        SuggestConfig {
            interpreter,
            script,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// One recommendation request: the caller's onboarding answers plus an
/// optional free-text chat message. Transient; never persisted.
#[derive(Debug, Clone)]
pub struct SuggestRequest {
    pub onboarding: serde_json::Value,
    pub message: Option<String>,
}

impl SuggestRequest {
    /// The single JSON document written to the script's stdin.
    ///
    /// When a message is present it is merged into the onboarding object
    /// under the `message` key.
    pub fn payload(&self) -> serde_json::Value {
        match (&self.message, &self.onboarding) {
            (Some(msg), serde_json::Value::Object(map)) => {
                let mut map = map.clone();
                map.insert("message".into(), serde_json::Value::String(msg.clone()));
                serde_json::Value::Object(map)
            }
            (Some(msg), other) => serde_json::json!({
                "onboardingData": other,
                "message": msg,
            }),
            (None, other) => other.clone(),
        }
    }
}

/// Failure modes of one bridge call.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("failed to start recommendation process: {0}")]
    Spawn(std::io::Error),

    #[error("I/O error while talking to recommendation process: {0}")]
    Io(std::io::Error),

    #[error("failed to serialize request payload: {0}")]
    Serialize(serde_json::Error),

    #[error("recommendation process wrote diagnostics: {0}")]
    Diagnostics(String),

    #[error("no JSON line found in recommendation output")]
    NoJsonLine,

    #[error("failed to parse recommendation output: {0}")]
    Parse(serde_json::Error),

    #[error("recommendation output is missing the 'suggestion' field")]
    MissingSuggestion,

    #[error("recommendation process timed out after {0:?}")]
    Timeout(Duration),
}

/// Run one recommendation call: spawn the script, feed it the request,
/// and extract the suggestion string.
///
/// At most one external process per call; calls are independent and may
/// run concurrently without coordination. The whole round trip is bounded
/// by [`SuggestConfig::timeout`]; on timeout the child is killed
/// (`kill_on_drop`).
pub async fn run_suggestion(
    config: &SuggestConfig,
    request: &SuggestRequest,
) -> Result<String, SuggestError> {
    let payload = serde_json::to_vec(&request.payload()).map_err(SuggestError::Serialize)?;

    match tokio::time::timeout(config.timeout, invoke(config, payload)).await {
        Ok(result) => result,
        Err(_) => Err(SuggestError::Timeout(config.timeout)),
    }
}

async fn invoke(config: &SuggestConfig, payload: Vec<u8>) -> Result<String, SuggestError> {
    let mut child = Command::new(&config.interpreter)
        .arg(&config.script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(SuggestError::Spawn)?;

    let mut stdout = child.stdout.take().expect("stdout is piped");
    let mut stderr = child.stderr.take().expect("stderr is piped");
    let mut stdin = child.stdin.take().expect("stdin is piped");

    // Both read loops must be running before stdin is written: if either
    // pipe's buffer fills while unread, the child blocks on its write and
    // the stdin write below deadlocks against it.
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).await.map(|_| buf)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).await.map(|_| buf)
    });

    stdin.write_all(&payload).await.map_err(SuggestError::Io)?;
    stdin.shutdown().await.map_err(SuggestError::Io)?;
    drop(stdin);

    let status = child.wait().await.map_err(SuggestError::Io)?;

    let stdout_buf = join_read(stdout_task).await?;
    let stderr_buf = join_read(stderr_task).await?;

    if !stderr_buf.is_empty() {
        let diagnostics = String::from_utf8_lossy(&stderr_buf).into_owned();
        return Err(SuggestError::Diagnostics(diagnostics));
    }

    if !status.success() {
        tracing::warn!(
            exit_code = ?status.code(),
            "Recommendation process exited non-zero without diagnostics"
        );
    }

    let stdout_text = String::from_utf8_lossy(&stdout_buf);
    let line = extract_json_line(&stdout_text).ok_or(SuggestError::NoJsonLine)?;
    let parsed: serde_json::Value = serde_json::from_str(line).map_err(SuggestError::Parse)?;

    parsed
        .get("suggestion")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .ok_or(SuggestError::MissingSuggestion)
}

async fn join_read(
    task: tokio::task::JoinHandle<std::io::Result<Vec<u8>>>,
) -> Result<Vec<u8>, SuggestError> {
    match task.await {
        Ok(result) => result.map_err(SuggestError::Io),
        Err(join_err) => Err(SuggestError::Io(std::io::Error::other(join_err))),
    }
}
