use std::{
    error::Error,
    fmt,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Serialize, de::DeserializeOwned};
use social_store::schema::{
    DOC_ANALYTICS_CACHE,
    DOC_COMPETITORS,
    DOC_SCHEDULED_POSTS,
    DOC_TRENDS_CACHE,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// The persisted document families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Posts,
    Analytics,
    Trends,
    Competitors,
}

impl DocumentKind {
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Posts => DOC_SCHEDULED_POSTS,
            Self::Analytics => DOC_ANALYTICS_CACHE,
            Self::Trends => DOC_TRENDS_CACHE,
            Self::Competitors => DOC_COMPETITORS,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Posts => "posts",
            Self::Analytics => "analytics",
            Self::Trends => "trends",
            Self::Competitors => "competitors",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "I/O error on {}: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// File-backed document store rooted at a data directory.
#[derive(Clone)]
pub struct JsonDocStore {
    inner: Arc<JsonDocStoreInner>,
}

struct JsonDocStoreInner {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDocStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(JsonDocStoreInner {
                dir: dir.into(),
                write_lock: Mutex::new(()),
            }),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    #[must_use]
    pub fn path_for(&self, kind: DocumentKind) -> PathBuf {
        self.inner.dir.join(kind.file_name())
    }

    /// Loads a document, returning an empty container when the file is absent
    /// or cannot be parsed.
    pub async fn load<T>(&self, kind: DocumentKind) -> T
    where
        T: DeserializeOwned + Default,
    {
        read_document(&self.path_for(kind), kind).await.document
    }

    /// Overwrites a document wholesale.
    ///
    /// # Errors
    /// Returns `StoreError` if serialization or the file write fails.
    pub async fn save<T>(&self, kind: DocumentKind, document: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let _guard = self.inner.write_lock.lock().await;
        self.write_document(kind, document).await
    }

    /// Runs a load-modify-save cycle while holding the writer lock.
    ///
    /// The document is only written back when `apply` succeeds. A document
    /// that exists but cannot be parsed is first moved aside to
    /// `<name>.json.corrupt` so the rewrite cannot destroy it.
    ///
    /// # Errors
    /// Returns the error produced by `apply`, or a converted `StoreError` if
    /// the write fails.
    pub async fn update<T, R, E, F>(&self, kind: DocumentKind, apply: F) -> Result<R, E>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<StoreError>,
    {
        let _guard = self.inner.write_lock.lock().await;
        let path = self.path_for(kind);
        let loaded: Loaded<T> = read_document(&path, kind).await;
        let mut document = loaded.document;
        let output = apply(&mut document)?;
        if loaded.corrupt {
            preserve_corrupt(&path, kind).await?;
        }
        self.write_document(kind, &document).await?;
        Ok(output)
    }

    async fn write_document<T>(&self, kind: DocumentKind, document: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let path = self.path_for(kind);
        let payload = serde_json::to_vec_pretty(document)?;

        tokio::fs::create_dir_all(&self.inner.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.inner.dir.clone(),
                source,
            })?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp_path.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        debug!(document = %kind, path = %path.display(), "document saved");
        Ok(())
    }
}

struct Loaded<T> {
    document: T,
    corrupt: bool,
}

impl<T: Default> Loaded<T> {
    fn empty(corrupt: bool) -> Self {
        Self {
            document: T::default(),
            corrupt,
        }
    }
}

async fn read_document<T>(path: &Path, kind: DocumentKind) -> Loaded<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Loaded::empty(false),
        Err(err) => {
            warn!(document = %kind, path = %path.display(), "unreadable document treated as empty: {err}");
            return Loaded::empty(false);
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Loaded::empty(false);
    }

    match serde_json::from_slice(&bytes) {
        Ok(document) => Loaded {
            document,
            corrupt: false,
        },
        Err(err) => {
            warn!(document = %kind, path = %path.display(), "corrupt document treated as empty: {err}");
            Loaded::empty(true)
        }
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    path.with_extension("json.corrupt")
}

async fn preserve_corrupt(path: &Path, kind: DocumentKind) -> StoreResult<()> {
    let backup = corrupt_path(path);
    tokio::fs::rename(path, &backup)
        .await
        .map_err(|source| StoreError::Io {
            path: backup.clone(),
            source,
        })?;
    warn!(document = %kind, backup = %backup.display(), "moved corrupt document aside before rewrite");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn temp_store() -> (tempfile::TempDir, JsonDocStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonDocStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[tokio::test]
    async fn missing_document_loads_empty() {
        let (_dir, store) = temp_store();
        let posts: Vec<serde_json::Value> = store.load(DocumentKind::Posts).await;
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn corrupt_document_loads_empty() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.dir()).expect("create data dir");
        std::fs::write(store.path_for(DocumentKind::Trends), b"{ not json").expect("write");

        let trends: BTreeMap<String, serde_json::Value> = store.load(DocumentKind::Trends).await;
        assert!(trends.is_empty());
    }

    #[tokio::test]
    async fn update_moves_corrupt_document_aside() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.dir()).expect("create data dir");
        let path = store.path_for(DocumentKind::Posts);
        std::fs::write(&path, b"[{\"id\": \"ab12cd34\"").expect("write");

        store
            .update(DocumentKind::Posts, |doc: &mut Vec<u32>| {
                doc.push(7);
                Ok::<_, StoreError>(())
            })
            .await
            .expect("update");

        let backup = std::fs::read(corrupt_path(&path)).expect("corrupt copy kept");
        assert_eq!(backup, b"[{\"id\": \"ab12cd34\"");
        let doc: Vec<u32> = store.load(DocumentKind::Posts).await;
        assert_eq!(doc, vec![7]);
    }

    #[tokio::test]
    async fn wrong_shape_loads_empty() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.dir()).expect("create data dir");
        std::fs::write(store.path_for(DocumentKind::Analytics), b"[1, 2, 3]").expect("write");

        let analytics: BTreeMap<String, serde_json::Value> =
            store.load(DocumentKind::Analytics).await;
        assert!(analytics.is_empty());
    }

    #[tokio::test]
    async fn save_creates_directory_and_overwrites() {
        let (_dir, store) = temp_store();
        store
            .save(DocumentKind::Competitors, &vec!["a".to_string(), "b".to_string()])
            .await
            .expect("first save");
        store
            .save(DocumentKind::Competitors, &vec!["c".to_string()])
            .await
            .expect("second save");

        let names: Vec<String> = store.load(DocumentKind::Competitors).await;
        assert_eq!(names, vec!["c".to_string()]);
        assert!(!store.path_for(DocumentKind::Competitors).with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_update_leaves_document_untouched() {
        let (_dir, store) = temp_store();
        store.save(DocumentKind::Posts, &vec![1_u32]).await.expect("seed");

        let result: Result<(), StoreError> = store
            .update(DocumentKind::Posts, |doc: &mut Vec<u32>| {
                doc.push(2);
                Err(StoreError::Io {
                    path: PathBuf::from("rejected"),
                    source: io::Error::other("rejected"),
                })
            })
            .await;
        assert!(result.is_err());

        let doc: Vec<u32> = store.load(DocumentKind::Posts).await;
        assert_eq!(doc, vec![1]);
    }

    #[tokio::test]
    async fn concurrent_updates_do_not_lose_writes() {
        let (_dir, store) = temp_store();
        let mut tasks = Vec::new();
        for value in 0..16_u32 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .update(DocumentKind::Posts, |doc: &mut Vec<u32>| {
                        doc.push(value);
                        Ok::<_, StoreError>(())
                    })
                    .await
            }));
        }
        for task in tasks {
            task.await.expect("join").expect("update");
        }

        let mut doc: Vec<u32> = store.load(DocumentKind::Posts).await;
        doc.sort_unstable();
        assert_eq!(doc, (0..16).collect::<Vec<_>>());
    }
}
