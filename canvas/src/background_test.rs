use std::path::{Path, PathBuf};

use super::*;

fn temp_file(tag: &str, ext: &str, bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("canvas-bg-{tag}-{}.{ext}", crate::doc::new_id()));
    std::fs::write(&path, bytes).unwrap();
    path
}

// =============================================================
// mime_for_path
// =============================================================

#[test]
fn mime_by_extension() {
    assert_eq!(mime_for_path(Path::new("a.png")), Some("image/png"));
    assert_eq!(mime_for_path(Path::new("a.JPG")), Some("image/jpeg"));
    assert_eq!(mime_for_path(Path::new("a.jpeg")), Some("image/jpeg"));
    assert_eq!(mime_for_path(Path::new("dir/plan.svg")), Some("image/svg+xml"));
    assert_eq!(mime_for_path(Path::new("a.webp")), Some("image/webp"));
}

#[test]
fn mime_rejects_non_images() {
    assert_eq!(mime_for_path(Path::new("notes.txt")), None);
    assert_eq!(mime_for_path(Path::new("no_extension")), None);
}

// =============================================================
// to_data_uri
// =============================================================

#[test]
fn data_uri_is_base64_encoded() {
    assert_eq!(to_data_uri("image/png", b"hello"), "data:image/png;base64,aGVsbG8=");
}

#[test]
fn data_uri_of_empty_file() {
    assert_eq!(to_data_uri("image/gif", b""), "data:image/gif;base64,");
}

// =============================================================
// load_data_uri
// =============================================================

#[tokio::test]
async fn load_reads_file() {
    let path = temp_file("ok", "png", b"hello");
    let uri = load_data_uri(&path, None).await.unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(uri, "data:image/png;base64,aGVsbG8=");
}

#[tokio::test]
async fn load_enforces_size_limit() {
    let path = temp_file("big", "png", &[0u8; 64]);
    let err = load_data_uri(&path, Some(16)).await.unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(err, BackgroundError::TooLarge { size: 64, limit: 16 }));
}

#[tokio::test]
async fn load_within_limit_succeeds() {
    let path = temp_file("fits", "jpg", &[1u8; 16]);
    let uri = load_data_uri(&path, Some(16)).await.unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(uri.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn load_rejects_unsupported_type() {
    let err = load_data_uri(Path::new("plan.docx"), None).await.unwrap_err();
    assert!(matches!(err, BackgroundError::UnsupportedType(_)));
}

#[tokio::test]
async fn load_missing_file_is_io_error() {
    let path = std::env::temp_dir().join(format!("canvas-bg-missing-{}.png", crate::doc::new_id()));
    let err = load_data_uri(&path, None).await.unwrap_err();
    assert!(matches!(err, BackgroundError::Io(_)));
    assert_eq!(crate::error::ErrorCode::error_code(&err), "E_BACKGROUND_IO");
}
