use crate::{
    error::Result,
    storage::{validate_key, Storage},
};
use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;

/// File-based storage: one JSON file per key under a root directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const FILE_EXTENSION: &'static str = "json";
    const TMP_EXTENSION: &'static str = "json.tmp";

    /// Creates a new FileStorage rooted at `root`. The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    fn item_file(&self, key: &str) -> PathBuf {
        self.root_path.join(format!("{}.{}", key, Self::FILE_EXTENSION))
    }

    fn tmp_file(&self, key: &str) -> PathBuf {
        self.root_path.join(format!("{}.{}", key, Self::TMP_EXTENSION))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;

        match fs::read_to_string(self.item_file(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        // Write then rename so a crash never leaves a half-written entry
        let tmp = self.tmp_file(key);
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, self.item_file(key)).await?;

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        validate_key(key)?;

        match fs::remove_file(self.item_file(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
