use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context as _;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::model::config::InfoConfig;

/// File name used when no explicit config path is provided.
pub const DEFAULT_CONFIG_PATH: &str = "info_channels.json";

/// Shared handle to the per-guild settings document, passed across crates.
///
/// The in-memory document is authoritative for the process lifetime; every
/// mutation made through [`ConfigStore::update`] is written back to disk.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    path: PathBuf,
    document: RwLock<InfoConfig>,
    /// Set when the file on disk could not be decoded in full; the original is
    /// copied to `<path>.bak` before it is first overwritten.
    backup_pending: AtomicBool,
}

impl ConfigStore {
    /// Create a store around an in-memory document without touching disk.
    pub fn new(path: impl Into<PathBuf>, document: InfoConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: path.into(),
                document: RwLock::new(document),
                backup_pending: AtomicBool::new(false),
            }),
        }
    }

    /// Load the document at `path`, falling back to defaults when the file is
    /// missing or cannot be parsed. Guild entries are decoded one at a time,
    /// so a damaged entry only costs that guild its settings.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (document, damaged) = read_document(&path).await;
        let store = Self::new(path, document);
        store.inner.backup_pending.store(damaged, Ordering::SeqCst);
        store
    }

    pub fn backup_path(&self) -> PathBuf {
        sibling_path(&self.inner.path, ".bak")
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Clone of the current document.
    pub async fn snapshot(&self) -> InfoConfig {
        self.inner.document.read().await.clone()
    }

    /// Run a read-only closure against the current document.
    pub async fn read<R>(&self, reader: impl FnOnce(&InfoConfig) -> R) -> R {
        let document = self.inner.document.read().await;
        reader(&*document)
    }

    /// Apply a mutation and persist the result.
    ///
    /// The write lock is held across the disk write so concurrent updates are
    /// saved in order. A failed write leaves the in-memory mutation applied.
    pub async fn update<R>(&self, mutate: impl FnOnce(&mut InfoConfig) -> R) -> anyhow::Result<R> {
        let mut document = self.inner.document.write().await;
        let output = mutate(&mut *document);
        self.persist(&document).await?;
        Ok(output)
    }

    /// Persist the current document as-is.
    pub async fn save(&self) -> anyhow::Result<()> {
        let document = self.inner.document.write().await;
        self.persist(&document).await
    }

    // Callers hold the document write lock, which serializes the backup check.
    async fn persist(&self, document: &InfoConfig) -> anyhow::Result<()> {
        if self.inner.backup_pending.load(Ordering::SeqCst) {
            let backup = self.backup_path();
            tokio::fs::copy(&self.inner.path, &backup)
                .await
                .with_context(|| format!("failed to back up `{}`", self.inner.path.display()))?;
            self.inner.backup_pending.store(false, Ordering::SeqCst);
            warn!(backup = %backup.display(), "Saved a copy of the damaged config file.");
        }

        write_document(&self.inner.path, document).await
    }
}

/// Returns the decoded document and whether anything on disk was discarded.
async fn read_document(path: &Path) -> (InfoConfig, bool) {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "No config file found; using defaults.");
            return (InfoConfig::default(), false);
        }
        Err(err) => {
            warn!(?err, path = %path.display(), "Failed to read config file; using defaults.");
            return (InfoConfig::default(), false);
        }
    };

    let value = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(value) => value,
        Err(err) => {
            warn!(?err, path = %path.display(), "Config file is not valid JSON; using defaults.");
            return (InfoConfig::default(), true);
        }
    };

    let decoded = InfoConfig::decode_lenient(value);
    if !decoded.is_lossless() {
        warn!(
            path = %path.display(),
            discarded = ?decoded.discarded,
            "Some config entries could not be read; using defaults for them."
        );
    }
    let damaged = !decoded.is_lossless();
    (decoded.config, damaged)
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

async fn write_document(path: &Path, document: &InfoConfig) -> anyhow::Result<()> {
    let payload = serde_json::to_vec_pretty(document).context("failed to serialize config")?;

    let tmp_path = sibling_path(path, ".tmp");

    tokio::fs::write(&tmp_path, payload)
        .await
        .with_context(|| format!("failed to write `{}`", tmp_path.display()))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("failed to replace `{}`", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ConfigStore;
    use crate::model::config::InfoConfig;

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::load(dir.path().join("absent.json")).await;
        assert_eq!(store.snapshot().await, InfoConfig::default());
    }

    #[tokio::test]
    async fn corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = ConfigStore::load(&path).await;
        assert_eq!(store.snapshot().await, InfoConfig::default());
    }

    #[tokio::test]
    async fn corrupt_file_is_backed_up_before_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = ConfigStore::load(&path).await;
        assert!(!store.backup_path().exists());

        store
            .update(|doc| doc.global_settings.default_cooldown = 5)
            .await
            .unwrap();
        assert_eq!(std::fs::read(store.backup_path()).unwrap(), b"{ not json");

        // Only the original damaged file is kept; later writes leave the copy alone.
        store
            .update(|doc| doc.global_settings.default_cooldown = 6)
            .await
            .unwrap();
        assert_eq!(std::fs::read(store.backup_path()).unwrap(), b"{ not json");
        let reloaded = ConfigStore::load(&path).await;
        assert_eq!(reloaded.snapshot().await.global_settings.default_cooldown, 6);
    }

    #[tokio::test]
    async fn clean_file_gets_no_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, br#"{"servers": {"1": {"info_channels": ["2"]}}}"#).unwrap();

        let store = ConfigStore::load(&path).await;
        store.save().await.unwrap();
        assert!(!store.backup_path().exists());
    }

    #[tokio::test]
    async fn update_persists_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = ConfigStore::load(&path).await;

        store
            .update(|doc| doc.global_settings.default_cooldown = 12)
            .await
            .unwrap();

        let reloaded = ConfigStore::load(&path).await;
        assert_eq!(reloaded.snapshot().await.global_settings.default_cooldown, 12);
        assert!(!dir.path().join("config.json.tmp").exists());
    }
}
