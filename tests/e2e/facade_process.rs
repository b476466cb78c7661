//! Process-level tests for the facade: exit codes and sink output.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn run_demo(args: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_logfacade-demo"))
        .args(args)
        .env_remove("LOGFACADE_DEMO_LOG")
        .output()
}

fn temp_log(label: &str) -> io::Result<PathBuf> {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("logfacade-e2e-{label}-{unique}"));
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("app.log"))
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn stderr_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn scenario_writes_info_and_filters_debug() -> io::Result<()> {
    let output = run_demo(&["scenario"])?;
    assert!(output.status.success());

    let lines = stderr_lines(&output);
    assert_eq!(lines.len(), 1, "stderr: {lines:?}");
    assert!(lines[0].contains("level=info"));
    assert!(lines[0].contains("msg=\"starting v1\""));
    Ok(())
}

#[test]
fn fatal_flushes_record_and_exits_with_status_one() -> io::Result<()> {
    let log = temp_log("fatal")?;
    let log_arg = path_arg(&log);
    let output = run_demo(&["--no-console", "--file", &log_arg, "fatal", "disk", "gone"])?;

    assert_eq!(output.status.code(), Some(1));
    let contents = std::fs::read_to_string(&log)?;
    let payload: serde_json::Value = serde_json::from_str(contents.trim())
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
    assert_eq!(payload["level"], "fatal");
    assert_eq!(payload["message"], "disk gone");
    Ok(())
}

#[test]
fn fatal_with_tracing_backend_exits_with_status_one() -> io::Result<()> {
    let log = temp_log("fatal-tracing")?;
    let log_arg = path_arg(&log);
    let output = run_demo(&[
        "--backend",
        "tracing",
        "--no-console",
        "--file",
        &log_arg,
        "--file-text",
        "fatal",
        "bye",
    ])?;

    assert_eq!(output.status.code(), Some(1));
    let contents = std::fs::read_to_string(&log)?;
    assert!(contents.contains("ERROR"));
    assert!(contents.contains("bye"));
    assert!(contents.contains("severity=fatal"));
    Ok(())
}

#[test]
fn uncaught_panic_unwinds_after_logging() -> io::Result<()> {
    let log = temp_log("panic")?;
    let log_arg = path_arg(&log);
    let output = run_demo(&["--no-console", "--file", &log_arg, "panic", "bad", "state"])?;

    assert_eq!(output.status.code(), Some(101));
    let contents = std::fs::read_to_string(&log)?;
    assert!(contents.contains("\"message\":\"bad state\""));
    Ok(())
}

#[test]
fn caught_panic_lets_the_process_continue() -> io::Result<()> {
    let output = run_demo(&["--no-console", "panic", "--catch", "recoverable"])?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "recovered: recoverable"
    );
    Ok(())
}

#[test]
fn unknown_backend_id_fails_initialization() -> io::Result<()> {
    let output = run_demo(&["--backend", "9", "scenario"])?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported_backend"));
    Ok(())
}

#[test]
fn per_sink_levels_and_fields_reach_the_file() -> io::Result<()> {
    let log = temp_log("fields")?;
    let log_arg = path_arg(&log);
    let output = run_demo(&[
        "--console-level",
        "error",
        "--file",
        &log_arg,
        "--file-level",
        "debug",
        "emit",
        "--level",
        "debug",
        "--field",
        "attempt=3",
        "--field",
        "user=u1",
        "cache",
        "miss",
    ])?;

    assert!(output.status.success());
    assert!(stderr_lines(&output).is_empty());
    let contents = std::fs::read_to_string(&log)?;
    let payload: serde_json::Value = serde_json::from_str(contents.trim())
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
    assert_eq!(payload["message"], "cache miss");
    assert_eq!(payload["fields"]["attempt"], 3);
    assert_eq!(payload["fields"]["user"], "u1");
    Ok(())
}

#[test]
fn print_config_emits_effective_config_as_json() -> io::Result<()> {
    let output = run_demo(&["--console-level", "warn", "--console-json", "print-config"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.ends_with("}\n"));
    let payload: serde_json::Value = serde_json::from_str(&stdout)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
    assert_eq!(payload["consoleLevel"], "warn");
    assert_eq!(payload["consoleJsonFormat"], true);
    assert_eq!(payload["enableFile"], false);
    Ok(())
}
