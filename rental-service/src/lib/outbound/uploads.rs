use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::errors::AvatarError;
use crate::domain::user::models::AvatarUpload;
use crate::domain::user::ports::AvatarStorage;

/// Stores avatars as files in a local directory served by the router.
pub struct LocalAvatarStorage {
    directory: PathBuf,
    public_path: String,
}

impl LocalAvatarStorage {
    pub fn new(directory: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            public_path: public_path.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AvatarStorage for LocalAvatarStorage {
    async fn store(&self, upload: AvatarUpload) -> Result<String, AvatarError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| AvatarError::StorageFailed(e.to_string()))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), upload.format.extension());
        let path = self.directory.join(&file_name);

        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| AvatarError::StorageFailed(e.to_string()))?;

        tracing::debug!(path = %path.display(), bytes = upload.bytes.len(), "Avatar stored");

        Ok(format!("{}/{}", self.public_path, file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::AvatarFormat;

    #[tokio::test]
    async fn test_store_writes_file_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalAvatarStorage::new(dir.path().join("avatars"), "/upload/");

        let upload = AvatarUpload::new(AvatarFormat::Png, vec![0x89, 0x50, 0x4e, 0x47]).unwrap();
        let public = storage.store(upload).await.unwrap();

        assert!(public.starts_with("/upload/"));
        assert!(public.ends_with(".png"));

        let file_name = public.trim_start_matches("/upload/");
        let written = std::fs::read(dir.path().join("avatars").join(file_name)).unwrap();
        assert_eq!(written, vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn test_store_reports_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let storage = LocalAvatarStorage::new(&blocker, "/upload");
        let upload = AvatarUpload::new(AvatarFormat::Jpeg, vec![1, 2, 3]).unwrap();

        let result = storage.store(upload).await;
        assert!(matches!(result, Err(AvatarError::StorageFailed(_))));
    }
}
