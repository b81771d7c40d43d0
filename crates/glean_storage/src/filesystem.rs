//! Filesystem-backed object store.
//!
//! A directory tree stands in for a bucket: every regular file below the root
//! is an object whose key is its `/`-separated relative path.

use crate::{ListPage, ListRequest, ObjectStore, PutOptions, StorageResult, StoredObject};
use chrono::{DateTime, Utc};
use glean_core::MediaObject;
use glean_error::{StorageError, StorageErrorKind};
use std::ops::Range;
use std::path::{Component, Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Suffix of in-flight writes; never listed.
const TEMP_SUFFIX: &str = ".glean-tmp";

/// Filesystem storage backend.
///
/// # Example Structure
///
/// ```text
/// /srv/media/                      (root)
/// ├── photos/
/// │   ├── beach.jpg                key "photos/beach.jpg"
/// │   └── beach.jpg.metadata.json  key "photos/beach.jpg.metadata.json"
/// └── report.pdf                   key "report.pdf"
/// ```
///
/// # Features
///
/// - **Atomic writes**: temp file + rename, so a reader never sees half a sidecar
/// - **Key order listing**: pages are sorted lexicographically by key
/// - **Confined keys**: keys that would escape the root are rejected
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    /// Create a new filesystem store rooted at `root`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(root))]
    pub fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidConfig(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::info!(path = %root.display(), "Opened filesystem store");
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key onto a path below the root.
    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(key);
        let confined = !key.is_empty()
            && !key.ends_with('/')
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !confined {
            return Err(StorageError::new(StorageErrorKind::InvalidKey(
                key.to_string(),
            )));
        }

        Ok(self.root.join(relative))
    }

    fn object_from_metadata(key: String, metadata: &std::fs::Metadata) -> MediaObject {
        let uploaded_at = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        MediaObject::new(key, metadata.len(), uploaded_at)
    }

    /// Entries of one directory in key order.
    ///
    /// A directory sorts as its key prefix (`name/`), so walking the result
    /// depth-first yields keys in global lexicographic order: `a.jpg` comes
    /// before everything under `a/`.
    async fn sorted_entries(&self, dir: &Path, dir_prefix: &str) -> StorageResult<Vec<WalkEntry>> {
        let list_error = |e: std::io::Error| {
            StorageError::new(StorageErrorKind::List(format!("{}: {}", dir.display(), e)))
        };

        let mut found = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await.map_err(list_error)?;

        while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
            // Keys are UTF-8; other names are not objects.
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let file_type = entry.file_type().await.map_err(list_error)?;

            if file_type.is_dir() {
                found.push(WalkEntry::Dir {
                    prefix: format!("{}{}/", dir_prefix, name),
                    path: entry.path(),
                });
            } else if file_type.is_file() && !name.ends_with(TEMP_SUFFIX) {
                found.push(WalkEntry::File {
                    key: format!("{}{}", dir_prefix, name),
                    path: entry.path(),
                });
            }
        }

        found.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
        Ok(found)
    }
}

/// One step of the sorted directory walk.
#[derive(Debug)]
enum WalkEntry {
    /// Directory whose keys all start with `prefix` (ends in `/`)
    Dir { prefix: String, path: PathBuf },
    File { key: String, path: PathBuf },
}

impl WalkEntry {
    fn sort_key(&self) -> &str {
        match self {
            WalkEntry::Dir { prefix, .. } => prefix,
            WalkEntry::File { key, .. } => key,
        }
    }
}

/// Whether a directory with key prefix `dir_prefix` can hold keys for this page.
fn may_contain(request: &ListRequest, dir_prefix: &str) -> bool {
    let under_prefix =
        dir_prefix.starts_with(&request.prefix) || request.prefix.starts_with(dir_prefix);

    // Every key below the directory sorts after `dir_prefix`, and before the
    // cursor unless the cursor itself lies inside the directory.
    let past_cursor = match &request.cursor {
        Some(cursor) => cursor.starts_with(dir_prefix) || dir_prefix > cursor.as_str(),
        None => true,
    };

    under_prefix && past_cursor
}

fn read_error(path: &Path, e: std::io::Error) -> StorageError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => StorageError::new(
            StorageErrorKind::PermissionDenied(path.display().to_string()),
        ),
        _ => StorageError::new(StorageErrorKind::Read(format!("{}: {}", path.display(), e))),
    }
}

#[async_trait::async_trait]
impl ObjectStore for FileSystemStore {
    fn backend(&self) -> &'static str {
        "filesystem"
    }

    #[tracing::instrument(skip(self, request), fields(prefix = %request.prefix, cursor = ?request.cursor))]
    async fn list(&self, request: &ListRequest) -> StorageResult<ListPage> {
        let limit = request.effective_limit();
        let mut objects = Vec::with_capacity(limit + 1);

        // Depth-first in key order; stops as soon as the look-ahead entry is found.
        let mut pending = self.sorted_entries(&self.root, "").await?;
        pending.reverse();

        while let Some(entry) = pending.pop() {
            let (key, path) = match entry {
                WalkEntry::Dir { prefix, path } => {
                    if may_contain(request, &prefix) {
                        let mut children = self.sorted_entries(&path, &prefix).await?;
                        children.reverse();
                        pending.extend(children);
                    }
                    continue;
                }
                WalkEntry::File { key, path } => (key, path),
            };

            if !key.starts_with(&request.prefix) {
                continue;
            }
            if let Some(cursor) = &request.cursor
                && key.as_str() <= cursor.as_str()
            {
                continue;
            }

            // Files can disappear between the directory walk and the stat.
            let metadata = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(read_error(&path, e)),
            };
            objects.push(Self::object_from_metadata(key, &metadata));

            if objects.len() > limit {
                break;
            }
        }

        let page = ListPage::from_lookahead(objects, limit);
        tracing::debug!(
            count = page.objects.len(),
            truncated = page.truncated,
            "Listed filesystem page"
        );
        Ok(page)
    }

    #[tracing::instrument(skip(self))]
    async fn head(&self, key: &str) -> StorageResult<Option<MediaObject>> {
        let path = self.path_for(key)?;

        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {
                Ok(Some(Self::object_from_metadata(key.to_string(), &metadata)))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_error(&path, e)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> StorageResult<Option<StoredObject>> {
        let Some(object) = self.head(key).await? else {
            return Ok(None);
        };
        let path = self.path_for(key)?;

        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_error(&path, e)),
        };

        tracing::debug!(size = body.len(), "Read object");
        Ok(Some(StoredObject { object, body }))
    }

    #[tracing::instrument(skip(self))]
    async fn get_range(&self, key: &str, range: Range<u64>) -> StorageResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;

        let mut file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_error(&path, e)),
        };

        file.seek(std::io::SeekFrom::Start(range.start))
            .await
            .map_err(|e| read_error(&path, e))?;

        let mut body = Vec::new();
        file.take(range.end.saturating_sub(range.start))
            .read_to_end(&mut body)
            .await
            .map_err(|e| read_error(&path, e))?;

        Ok(Some(body))
    }

    #[tracing::instrument(skip(self, body, _options), fields(size = body.len()))]
    async fn put(&self, key: &str, body: Vec<u8>, _options: &PutOptions) -> StorageResult<()> {
        let path = self.path_for(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::Write(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(TEMP_SUFFIX);
        let temp_path = PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, &body).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), size = body.len(), "Stored object");
        Ok(())
    }
}
