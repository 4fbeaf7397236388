#![cfg(unix)]

use pose_view::{WORKER_FLAG, WorkerError, WorkerProcess};

#[tokio::test]
async fn test_worker_exit_code_is_propagated() {
    let mut worker = WorkerProcess::spawn("sh", ["-c", "echo hi; echo oops >&2; exit 3"]).unwrap();
    assert!(worker.pid() > 0);
    assert_eq!(worker.wait().await.unwrap(), 3);
}

#[tokio::test]
async fn test_worker_success() {
    let mut worker = WorkerProcess::spawn("true", Vec::<&str>::new()).unwrap();
    assert_eq!(worker.wait().await.unwrap(), 0);
}

#[tokio::test]
async fn test_killed_worker_reports_signal() {
    let mut worker = WorkerProcess::spawn("sleep", ["30"]).unwrap();
    worker.kill().await.unwrap();
    // SIGKILL
    assert_eq!(worker.wait().await.unwrap(), 128 + 9);
}

#[tokio::test]
async fn test_missing_program() {
    match WorkerProcess::spawn("/nonexistent/pose-view", [WORKER_FLAG]) {
        Err(WorkerError::Spawn(_)) => {}
        Err(other) => panic!("Expected WorkerError::Spawn, got {:?}", other),
        Ok(_) => panic!("Expected spawn to fail"),
    }
}
