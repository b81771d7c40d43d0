//! Tests for the filesystem object store.

use glean_storage::{FileSystemStore, ListRequest, ObjectStore, PutOptions, StorageErrorKind};
use tempfile::TempDir;

#[tokio::test]
async fn test_put_and_get() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    let data = b"Hello, world!".to_vec();
    store
        .put("photos/a.jpg", data.clone(), &PutOptions::default())
        .await
        .unwrap();

    let stored = store.get("photos/a.jpg").await.unwrap().unwrap();
    assert_eq!(stored.body, data);
    assert_eq!(stored.object.key(), "photos/a.jpg");
    assert_eq!(*stored.object.size(), data.len() as u64);

    assert!(temp_dir.path().join("photos").join("a.jpg").exists());
}

#[tokio::test]
async fn test_missing_objects_are_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    assert!(store.head("nope.jpg").await.unwrap().is_none());
    assert!(store.get("nope.jpg").await.unwrap().is_none());
    assert!(store.get_range("nope.jpg", 0..4).await.unwrap().is_none());
}

#[tokio::test]
async fn test_head_reports_size() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    store
        .put("doc.pdf", vec![7u8; 1234], &PutOptions::default())
        .await
        .unwrap();

    let object = store.head("doc.pdf").await.unwrap().unwrap();
    assert_eq!(*object.size(), 1234);
}

#[tokio::test]
async fn test_get_range() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    store
        .put("bytes.bin", b"0123456789".to_vec(), &PutOptions::default())
        .await
        .unwrap();

    let middle = store.get_range("bytes.bin", 2..5).await.unwrap().unwrap();
    assert_eq!(middle, b"234");

    // Reads past the end are truncated
    let tail = store.get_range("bytes.bin", 8..100).await.unwrap().unwrap();
    assert_eq!(tail, b"89");
}

#[tokio::test]
async fn test_list_is_sorted_and_paginated() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    for key in ["c.png", "a.jpg", "nested/b.pdf", "d.txt", "e.mp4"] {
        store
            .put(key, b"x".to_vec(), &PutOptions::default())
            .await
            .unwrap();
    }

    let first = store
        .list(&ListRequest::new("").with_limit(2))
        .await
        .unwrap();
    let keys: Vec<_> = first.objects.iter().map(|o| o.key().as_str()).collect();
    assert_eq!(keys, vec!["a.jpg", "c.png"]);
    assert!(first.truncated);

    let second = store
        .list(&ListRequest::new("").with_limit(2).with_cursor(first.cursor))
        .await
        .unwrap();
    let keys: Vec<_> = second.objects.iter().map(|o| o.key().as_str()).collect();
    assert_eq!(keys, vec!["d.txt", "e.mp4"]);
    assert!(second.truncated);

    let third = store
        .list(&ListRequest::new("").with_limit(2).with_cursor(second.cursor))
        .await
        .unwrap();
    let keys: Vec<_> = third.objects.iter().map(|o| o.key().as_str()).collect();
    assert_eq!(keys, vec!["nested/b.pdf"]);
    assert!(!third.truncated);
    assert!(third.cursor.is_none());
}

#[tokio::test]
async fn test_list_orders_files_before_sibling_directories() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    // '-' < '.' < '/' so the directory "a" sorts after both files.
    for key in ["a/b.jpg", "a.jpg", "a-b.png", "a/z/c.pdf", "a/d.png", "b.jpg"] {
        store
            .put(key, b"x".to_vec(), &PutOptions::default())
            .await
            .unwrap();
    }

    let page = store.list(&ListRequest::new("")).await.unwrap();
    let keys: Vec<_> = page.objects.iter().map(|o| o.key().as_str()).collect();
    assert_eq!(
        keys,
        vec!["a-b.png", "a.jpg", "a/b.jpg", "a/d.png", "a/z/c.pdf", "b.jpg"]
    );
}

#[tokio::test]
async fn test_cursor_inside_nested_directory() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    for key in ["early/a.jpg", "mid/deep/b.jpg", "mid/deep/c.jpg", "mid/e.jpg", "z.jpg"] {
        store
            .put(key, b"x".to_vec(), &PutOptions::default())
            .await
            .unwrap();
    }

    let mut cursor = None;
    let mut seen = Vec::new();
    loop {
        let page = store
            .list(&ListRequest::new("").with_limit(2).with_cursor(cursor))
            .await
            .unwrap();
        seen.extend(page.objects.iter().map(|o| o.key().clone()));
        if !page.truncated {
            break;
        }
        cursor = page.cursor;
    }

    assert_eq!(
        seen,
        vec!["early/a.jpg", "mid/deep/b.jpg", "mid/deep/c.jpg", "mid/e.jpg", "z.jpg"]
    );
}

#[tokio::test]
async fn test_plain_string_prefix_spans_directories() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    for key in ["photos/a.jpg", "photos-old/b.jpg", "photo.png", "docs/c.pdf"] {
        store
            .put(key, b"x".to_vec(), &PutOptions::default())
            .await
            .unwrap();
    }

    let page = store.list(&ListRequest::new("photos")).await.unwrap();
    let keys: Vec<_> = page.objects.iter().map(|o| o.key().as_str()).collect();
    assert_eq!(keys, vec!["photos-old/b.jpg", "photos/a.jpg"]);
}

#[tokio::test]
async fn test_list_respects_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    for key in ["photos/a.jpg", "photos/b.jpg", "docs/c.pdf"] {
        store
            .put(key, b"x".to_vec(), &PutOptions::default())
            .await
            .unwrap();
    }

    let page = store.list(&ListRequest::new("photos/")).await.unwrap();
    assert_eq!(page.objects.len(), 2);
    assert!(page.objects.iter().all(|o| o.key().starts_with("photos/")));
}

#[tokio::test]
async fn test_put_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path()).unwrap();

    store
        .put("a.jpg.metadata.json", b"old".to_vec(), &PutOptions::default())
        .await
        .unwrap();
    store
        .put("a.jpg.metadata.json", b"new".to_vec(), &PutOptions::default())
        .await
        .unwrap();

    let stored = store.get("a.jpg.metadata.json").await.unwrap().unwrap();
    assert_eq!(stored.body, b"new");

    // No temp files are left behind or listed
    let page = store.list(&ListRequest::new("")).await.unwrap();
    assert_eq!(page.objects.len(), 1);
}

#[tokio::test]
async fn test_keys_cannot_escape_root() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(temp_dir.path().join("bucket")).unwrap();

    for key in ["../outside.jpg", "/etc/passwd", "", "dir/"] {
        let err = store
            .put(key, b"x".to_vec(), &PutOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err.kind, StorageErrorKind::InvalidKey(_)), "{key}");
    }
}
