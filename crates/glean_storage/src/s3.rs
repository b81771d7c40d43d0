//! S3-compatible object store backed by the `object_store` crate.
//!
//! Works against AWS S3 and S3-compatible services (R2, MinIO). Credentials
//! and endpoint come from the usual `AWS_*` environment variables.

use crate::{ListPage, ListRequest, ObjectStore, PutOptions, StorageResult, StoredObject};
use futures::{StreamExt, TryStreamExt};
use glean_core::MediaObject;
use glean_error::{StorageError, StorageErrorKind};
use object_store::{
    Attribute, Attributes, GetOptions, GetRange, ObjectMeta, ObjectStore as _, PutPayload,
    aws::{AmazonS3, AmazonS3Builder},
    path::Path as ObjectPath,
};
use std::ops::Range;
use std::sync::Arc;

/// S3 storage backend.
///
/// Keys map onto `object_store` paths verbatim. Listing prefixes are plain
/// string prefixes like the other backends: `photos` lists both
/// `photos/a.jpg` and `photos-old/a.jpg`.
#[derive(Debug, Clone)]
pub struct S3Store {
    inner: Arc<AmazonS3>,
    url: String,
}

impl S3Store {
    /// Connect to a bucket URL such as `s3://media-bucket`.
    ///
    /// # Errors
    ///
    /// Returns error if the URL or environment configuration is invalid.
    #[tracing::instrument]
    pub fn new(url: &str) -> StorageResult<Self> {
        if !url.starts_with("s3://") {
            return Err(StorageError::new(StorageErrorKind::InvalidConfig(format!(
                "URL must start with s3://, got {}",
                url
            ))));
        }

        let inner = AmazonS3Builder::from_env()
            .with_url(url)
            .build()
            .map_err(|e| StorageError::new(StorageErrorKind::InvalidConfig(e.to_string())))?;

        tracing::info!(url, "Connected S3 store");
        Ok(Self {
            inner: Arc::new(inner),
            url: url.to_string(),
        })
    }

    /// Bucket URL this store was built from.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn describe(meta: &ObjectMeta) -> MediaObject {
        MediaObject::new(meta.location.to_string(), meta.size, meta.last_modified)
    }
}

/// Path for a key, without `object_store`'s percent-encoding.
///
/// Keys that would not survive the trip unchanged (empty segments, `.` or
/// `..`, control characters, leading or trailing `/`) are rejected.
fn object_path(key: &str) -> StorageResult<ObjectPath> {
    let path = ObjectPath::parse(key)
        .map_err(|e| StorageError::new(StorageErrorKind::InvalidKey(format!("{}: {}", key, e))))?;

    if key.is_empty() || path.as_ref() != key {
        return Err(StorageError::new(StorageErrorKind::InvalidKey(
            key.to_string(),
        )));
    }
    Ok(path)
}

/// Deepest whole directory covered by a string prefix.
///
/// `photos/2024/ju` lists from `photos/2024`; a prefix without `/` lists the
/// whole bucket. The caller filters the rest of the prefix itself.
fn list_root(prefix: &str) -> StorageResult<Option<ObjectPath>> {
    match prefix.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => object_path(dir).map(Some),
        _ => Ok(None),
    }
}

fn storage_error(key: &str, e: object_store::Error, read: bool) -> StorageError {
    let kind = match &e {
        object_store::Error::NotFound { .. } => StorageErrorKind::NotFound(key.to_string()),
        object_store::Error::PermissionDenied { .. }
        | object_store::Error::Unauthenticated { .. } => {
            StorageErrorKind::PermissionDenied(format!("{}: {}", key, e))
        }
        _ if read => StorageErrorKind::Read(format!("{}: {}", key, e)),
        _ => StorageErrorKind::Write(format!("{}: {}", key, e)),
    };
    StorageError::new(kind)
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    fn backend(&self) -> &'static str {
        "s3"
    }

    #[tracing::instrument(skip(self, request), fields(prefix = %request.prefix, cursor = ?request.cursor))]
    async fn list(&self, request: &ListRequest) -> StorageResult<ListPage> {
        let limit = request.effective_limit();
        let root = list_root(&request.prefix)?;

        let stream = match &request.cursor {
            Some(cursor) => self
                .inner
                .list_with_offset(root.as_ref(), &object_path(cursor)?),
            None => self.inner.list(root.as_ref()),
        };

        // One extra entry tells us whether another page exists.
        let listed: Vec<ObjectMeta> = stream
            .try_filter(|meta| {
                futures::future::ready(meta.location.as_ref().starts_with(&request.prefix))
            })
            .take(limit + 1)
            .try_collect()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::List(e.to_string())))?;

        let objects = listed.iter().map(Self::describe).collect();
        Ok(ListPage::from_lookahead(objects, limit))
    }

    #[tracing::instrument(skip(self))]
    async fn head(&self, key: &str) -> StorageResult<Option<MediaObject>> {
        match self.inner.head(&object_path(key)?).await {
            Ok(meta) => Ok(Some(Self::describe(&meta))),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(storage_error(key, e, true)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> StorageResult<Option<StoredObject>> {
        let result = match self.inner.get(&object_path(key)?).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(storage_error(key, e, true)),
        };

        let object = Self::describe(&result.meta);
        let body = result
            .bytes()
            .await
            .map_err(|e| storage_error(key, e, true))?;

        Ok(Some(StoredObject {
            object,
            body: body.to_vec(),
        }))
    }

    #[tracing::instrument(skip(self))]
    async fn get_range(&self, key: &str, range: Range<u64>) -> StorageResult<Option<Vec<u8>>> {
        let options = GetOptions {
            range: Some(GetRange::Bounded(range)),
            ..Default::default()
        };

        let result = match self.inner.get_opts(&object_path(key)?, options).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(storage_error(key, e, true)),
        };

        let body = result
            .bytes()
            .await
            .map_err(|e| storage_error(key, e, true))?;
        Ok(Some(body.to_vec()))
    }

    #[tracing::instrument(skip(self, body, options), fields(size = body.len()))]
    async fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> StorageResult<()> {
        let mut attributes = Attributes::new();
        if let Some(content_type) = &options.content_type {
            attributes.insert(Attribute::ContentType, content_type.clone().into());
        }

        let put_options = object_store::PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&object_path(key)?, PutPayload::from(body), put_options)
            .await
            .map_err(|e| storage_error(key, e, false))?;

        tracing::info!(key, "Stored object in S3");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_map_to_paths_verbatim() {
        for key in [
            "photos/summer #1.jpg",
            "scans/50%.pdf",
            "a{b}.png",
            "uploads/caf\u{e9} menu.pdf",
            "plain/a.jpg",
        ] {
            let path = object_path(key).unwrap();
            assert_eq!(path.as_ref(), key);
            assert_eq!(path.to_string(), key);
        }
    }

    #[test]
    fn test_sidecar_key_maps_verbatim() {
        let key = glean_core::sidecar_key("photos/summer #1.jpg");
        assert_eq!(object_path(&key).unwrap().as_ref(), "photos/summer #1.jpg.metadata.json");
    }

    #[test]
    fn test_unrepresentable_keys_are_rejected() {
        for key in ["", "a//b.jpg", "../escape.jpg", "photos/./a.jpg", "/lead.jpg", "trail/", "bell\u{7}.jpg"] {
            let err = object_path(key).unwrap_err();
            assert!(
                matches!(err.kind, StorageErrorKind::InvalidKey(_)),
                "{:?} gave {}",
                key,
                err
            );
        }
    }

    #[test]
    fn test_cursor_keeps_special_characters() {
        // The offset handed to list_with_offset must compare equal to the
        // listed location, or the page boundary object is listed twice.
        let cursor = "photos/summer #1.jpg.metadata.json";
        assert_eq!(object_path(cursor).unwrap().as_ref(), cursor);
    }

    #[test]
    fn test_list_root_for_prefixes() {
        assert_eq!(list_root("").unwrap(), None);
        assert_eq!(list_root("photos").unwrap(), None);
        assert_eq!(list_root("photos/").unwrap(), Some(ObjectPath::from("photos")));
        assert_eq!(
            list_root("photos/2024/ju").unwrap(),
            Some(ObjectPath::from("photos/2024"))
        );
        assert_eq!(
            list_root("summer #1/").unwrap().map(|p| p.to_string()),
            Some("summer #1".to_string())
        );
        assert_eq!(list_root("/").unwrap(), None);
    }

    #[test]
    fn test_new_rejects_non_s3_url() {
        let err = S3Store::new("https://example.com/bucket").unwrap_err();
        assert!(matches!(err.kind, StorageErrorKind::InvalidConfig(_)));
    }
}
