//! Integration tests for the recommendation bridge against real child
//! processes. Fixture scripts are written to temp files and run with
//! `/bin/sh` standing in for the Python interpreter.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use assert_matches::assert_matches;
use helio_ml::{run_suggestion, SuggestConfig, SuggestError, SuggestRequest};
use serde_json::json;
use tempfile::NamedTempFile;

/// Write a shell script fixture and return its handle (the file must stay
/// alive for the duration of the call).
fn fixture(script: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp script");
    file.write_all(script.as_bytes()).expect("write temp script");
    file.flush().expect("flush temp script");
    file
}

fn config_for(script: &Path) -> SuggestConfig {
    SuggestConfig {
        interpreter: "/bin/sh".into(),
        script: script.to_path_buf(),
        timeout: Duration::from_secs(10),
    }
}

fn request() -> SuggestRequest {
    SuggestRequest {
        onboarding: json!({
            "propertyType": "house",
            "energyType": ["wind", "solar"],
            "currentUsage": 800
        }),
        message: None,
    }
}

#[tokio::test]
async fn banner_before_json_yields_suggestion() {
    let script = fixture(
        "cat > /dev/null\n\
         echo 'DEBUG banner'\n\
         echo '{\"suggestion\":\"Use wind.\"}'\n",
    );
    let config = config_for(script.path());

    let suggestion = run_suggestion(&config, &request()).await.unwrap();
    assert_eq!(suggestion, "Use wind.");
}

#[tokio::test]
async fn request_payload_reaches_stdin() {
    let script = fixture(
        "input=$(cat)\n\
         if [ -n \"$input\" ]; then\n\
           echo '{\"suggestion\":\"received\"}'\n\
         else\n\
           echo '{\"suggestion\":\"empty\"}'\n\
         fi\n",
    );
    let config = config_for(script.path());

    let suggestion = run_suggestion(&config, &request()).await.unwrap();
    assert_eq!(suggestion, "received");
}

#[tokio::test]
async fn large_stdout_before_reading_stdin_does_not_deadlock() {
    // The script floods stdout well past the pipe buffer size before it
    // reads stdin. Without concurrent draining this wedges both sides.
    let script = fixture(
        "i=0\n\
         while [ $i -lt 20000 ]; do echo 'banner line of filler text'; i=$((i+1)); done\n\
         cat > /dev/null\n\
         echo '{\"suggestion\":\"survived\"}'\n",
    );
    let config = config_for(script.path());

    let suggestion = run_suggestion(&config, &request()).await.unwrap();
    assert_eq!(suggestion, "survived");
}

#[tokio::test]
async fn diagnostics_output_fails_the_call() {
    // Stderr content wins even when stdout carries a valid answer.
    let script = fixture(
        "cat > /dev/null\n\
         echo 'model file missing' >&2\n\
         echo '{\"suggestion\":\"Use wind.\"}'\n",
    );
    let config = config_for(script.path());

    let err = run_suggestion(&config, &request()).await.unwrap_err();
    assert_matches!(err, SuggestError::Diagnostics(msg) if msg.contains("model file missing"));
}

#[tokio::test]
async fn missing_json_line_is_an_error() {
    let script = fixture("cat > /dev/null\necho 'no structured output here'\n");
    let config = config_for(script.path());

    let err = run_suggestion(&config, &request()).await.unwrap_err();
    assert_matches!(err, SuggestError::NoJsonLine);
}

#[tokio::test]
async fn unparseable_json_line_is_an_error() {
    let script = fixture("cat > /dev/null\necho '{not valid json}'\n");
    let config = config_for(script.path());

    let err = run_suggestion(&config, &request()).await.unwrap_err();
    assert_matches!(err, SuggestError::Parse(_));
}

#[tokio::test]
async fn json_without_suggestion_field_is_an_error() {
    let script = fixture("cat > /dev/null\necho '{\"advice\":\"Use wind.\"}'\n");
    let config = config_for(script.path());

    let err = run_suggestion(&config, &request()).await.unwrap_err();
    assert_matches!(err, SuggestError::MissingSuggestion);
}

#[tokio::test]
async fn missing_interpreter_fails_to_spawn() {
    let script = fixture("echo '{\"suggestion\":\"x\"}'\n");
    let config = SuggestConfig {
        interpreter: "/nonexistent/interpreter".into(),
        script: script.path().to_path_buf(),
        timeout: Duration::from_secs(10),
    };

    let err = run_suggestion(&config, &request()).await.unwrap_err();
    assert_matches!(err, SuggestError::Spawn(_));
}

#[tokio::test]
async fn hung_process_times_out() {
    let script = fixture("cat > /dev/null\nsleep 30\n");
    let config = SuggestConfig {
        interpreter: "/bin/sh".into(),
        script: script.path().to_path_buf(),
        timeout: Duration::from_millis(500),
    };

    let err = run_suggestion(&config, &request()).await.unwrap_err();
    assert_matches!(err, SuggestError::Timeout(_));
}
