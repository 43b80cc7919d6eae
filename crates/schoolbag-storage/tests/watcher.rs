//! Settings watcher behavior against a real file.

use schoolbag_content::ContentCommand;
use schoolbag_storage::run_settings_watcher;
use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

const POLL: Duration = Duration::from_millis(10);
const WAIT: Duration = Duration::from_secs(2);

fn touch(path: &Path, offset_secs: u64) {
    write_at(path, "{}", SystemTime::now() + Duration::from_secs(offset_secs));
}

fn write_at(path: &Path, text: &str, mtime: SystemTime) {
    fs::write(path, text).unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

#[tokio::test]
async fn test_modification_requests_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    touch(&path, 0);

    let (tx, mut rx) = mpsc::channel(4);
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(run_settings_watcher(path.clone(), POLL, tx, cancel.clone()));

    tokio::time::sleep(POLL * 5).await;
    assert!(rx.try_recv().is_err());

    touch(&path, 60);
    let command = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert!(matches!(command, ContentCommand::ReloadSettings));

    cancel.cancel();
    watcher.await.unwrap();
}

#[tokio::test]
async fn test_same_mtime_different_length_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    let mtime = SystemTime::now();
    write_at(&path, "{}", mtime);

    let (tx, mut rx) = mpsc::channel(4);
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(run_settings_watcher(path.clone(), POLL, tx, cancel.clone()));

    tokio::time::sleep(POLL * 3).await;
    write_at(&path, r#"{"lightingMode": "manual"}"#, mtime);

    let command = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert!(matches!(command, ContentCommand::ReloadSettings));

    cancel.cancel();
    watcher.await.unwrap();
}

#[tokio::test]
async fn test_file_created_later() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");

    let (tx, mut rx) = mpsc::channel(4);
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(run_settings_watcher(path.clone(), POLL, tx, cancel.clone()));

    tokio::time::sleep(POLL * 3).await;
    touch(&path, 0);

    let command = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert!(matches!(command, ContentCommand::ReloadSettings));

    cancel.cancel();
    watcher.await.unwrap();
}

#[tokio::test]
async fn test_deleted_file_does_not_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    touch(&path, 0);

    let (tx, mut rx) = mpsc::channel(4);
    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(run_settings_watcher(path.clone(), POLL, tx, cancel.clone()));

    tokio::time::sleep(POLL * 3).await;
    fs::remove_file(&path).unwrap();
    tokio::time::sleep(POLL * 10).await;
    assert!(rx.try_recv().is_err());

    cancel.cancel();
    watcher.await.unwrap();
}

#[tokio::test]
async fn test_stops_when_content_task_gone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    touch(&path, 0);

    let (tx, rx) = mpsc::channel(4);
    drop(rx);
    let watcher = tokio::spawn(run_settings_watcher(
        path.clone(),
        POLL,
        tx,
        CancellationToken::new(),
    ));

    tokio::time::sleep(POLL * 3).await;
    touch(&path, 60);
    timeout(WAIT, watcher).await.unwrap().unwrap();
}
