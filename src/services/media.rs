use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Product images on local disk, served back under `/images`.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    dir: PathBuf,
}

impl MediaStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        MediaStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores the bytes under a fresh name and returns that name.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, MediaError> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| MediaError::UnsupportedType(original_name.to_string()))?;

        fs::create_dir_all(&self.dir).await?;

        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        let file_name = format!(
            "image-{}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            suffix,
            extension
        );

        fs::write(self.dir.join(&file_name), bytes).await?;
        tracing::debug!(file_name = %file_name, size = bytes.len(), "Image stored");

        Ok(file_name)
    }

    /// Removes a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, file_name: &str) -> Result<(), MediaError> {
        let Some(name) = Path::new(file_name).file_name() else {
            return Ok(());
        };

        match fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_and_removes_images() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let name = storage.save("Photo.PNG", b"png-bytes").await.unwrap();
        assert!(name.ends_with(".png"));
        assert_eq!(fs::read(dir.path().join(&name)).await.unwrap(), b"png-bytes");

        storage.remove(&name).await.unwrap();
        assert!(!dir.path().join(&name).exists());
        storage.remove(&name).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_unknown_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        assert!(matches!(
            storage.save("script.sh", b"#!").await,
            Err(MediaError::UnsupportedType(_))
        ));
    }
}
