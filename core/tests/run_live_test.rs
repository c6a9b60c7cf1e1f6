#![cfg(unix)]

use tgops_core::error::RunnerError;
use tgops_core::runner::{run_live, RunLiveArgs};

fn sh(script: &str) -> RunLiveArgs {
    RunLiveArgs {
        cmd: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        quiet: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn captures_both_streams_in_emission_order() {
    let result = run_live(sh(
        "echo o1; echo e1 >&2; echo o2; echo e2 >&2; exit 3",
    ))
    .await
    .unwrap();

    assert_eq!(result.code, 3);
    assert_eq!(result.stdout, "o1\no2\n");
    assert_eq!(result.stderr, "e1\ne2\n");
    assert!(!result.success());
}

#[tokio::test]
async fn tees_every_line_to_log_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    // Parent directory does not exist yet; run_live must create it.
    let log_path = dir.path().join("logs").join("plan.log");

    let mut args = sh("echo o1; echo e1 >&2; echo o2");
    args.log_file = Some(log_path.clone());
    let result = run_live(args).await.unwrap();
    assert_eq!(result.code, 0);

    let content = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    for expected in ["o1", "e1", "o2"] {
        assert_eq!(
            lines.iter().filter(|l| **l == expected).count(),
            1,
            "line {expected:?} should appear exactly once"
        );
    }

    // Cross-stream interleaving is unspecified; per-stream order is not.
    let pos = |l: &str| lines.iter().position(|x| *x == l).unwrap();
    assert!(pos("o1") < pos("o2"));
}

#[tokio::test]
async fn drains_streams_concurrently_without_deadlock() {
    // Push well past the pipe buffer on both streams; a sequential drain
    // would wedge here.
    let result = run_live(sh(
        "i=0; while [ $i -lt 5000 ]; do echo \"out line $i\"; echo \"err line $i\" >&2; i=$((i+1)); done",
    ))
    .await
    .unwrap();

    assert_eq!(result.code, 0);
    assert_eq!(result.stdout.lines().count(), 5000);
    assert_eq!(result.stderr.lines().count(), 5000);
    assert_eq!(result.stdout.lines().last().unwrap(), "out line 4999");
}

#[tokio::test]
async fn honors_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "from the workdir\n").unwrap();

    let mut args = sh("cat marker.txt");
    args.cwd = Some(dir.path().to_path_buf());
    let result = run_live(args).await.unwrap();

    assert_eq!(result.code, 0);
    assert_eq!(result.stdout, "from the workdir\n");
}

#[tokio::test]
async fn spawn_failure_is_fatal() {
    let args = RunLiveArgs {
        cmd: "tgops-no-such-binary".to_string(),
        quiet: true,
        ..Default::default()
    };
    let err = run_live(args).await.unwrap_err();
    assert!(matches!(err, RunnerError::Spawn(_)));
}
