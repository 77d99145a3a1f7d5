//! File loading through [`Loader`].

use std::io::Write;

use navmenu_codec::{CodecError, LoadOutcome, Loader};
use navmenu_model::KeyAllocator;
use navmenu_test_utils::SAMPLE_YAML;

fn menu_file(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn loads_file() {
    let file = menu_file(SAMPLE_YAML);
    let loader = Loader::with_allocator(KeyAllocator::new());

    let outcome = loader.load_path(file.path()).await.unwrap();
    let document = outcome.into_document().unwrap();
    assert_eq!(document.len(), 6);
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let loader = Loader::with_allocator(KeyAllocator::new());

    let err = loader.load_path(dir.path().join("absent.yaml")).await.unwrap_err();
    assert!(matches!(err, CodecError::Io { .. }));
}

#[tokio::test]
async fn newer_load_supersedes_pending_one() {
    let file = menu_file(SAMPLE_YAML);
    let loader = Loader::with_allocator(KeyAllocator::new());

    let stale = loader.begin();
    let fresh = loader.load_path(file.path()).await.unwrap();
    assert!(matches!(fresh, LoadOutcome::Loaded { .. }));
    assert_eq!(loader.finish(stale, SAMPLE_YAML).unwrap(), LoadOutcome::Superseded);
}

#[tokio::test]
async fn bad_shape_is_reported() {
    let file = menu_file("menu:\n  other: []\n");
    let loader = Loader::with_allocator(KeyAllocator::new());

    let err = loader.load_path(file.path()).await.unwrap_err();
    assert!(matches!(err, CodecError::Shape(_)));
}
