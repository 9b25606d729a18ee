use crate::config::StorageConfig;
use crate::errors::AvatarError;
use std::path::{Path, PathBuf};

/// Canonical location of the background-removed face image.
///
/// Every successful removal overwrites the same file; an optional gallery
/// directory receives a copy for the user's photo library.
#[derive(Debug, Clone)]
pub struct FaceStore {
    face_path: PathBuf,
    gallery_dir: Option<PathBuf>,
}

impl FaceStore {
    pub fn new(face_path: impl Into<PathBuf>) -> Self {
        Self {
            face_path: face_path.into(),
            gallery_dir: None,
        }
    }

    pub fn with_gallery_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.gallery_dir = Some(dir.into());
        self
    }

    pub fn from_config(storage: &StorageConfig) -> Self {
        let store = Self::new(Path::new(&storage.face_dir).join(&storage.face_file_name));
        match &storage.gallery_dir {
            Some(dir) => store.with_gallery_dir(dir),
            None => store,
        }
    }

    pub fn path(&self) -> &Path {
        &self.face_path
    }

    pub fn exists(&self) -> bool {
        self.face_path.is_file()
    }

    /// Overwrite the face image. The gallery copy is best effort.
    pub async fn write(&self, bytes: &[u8]) -> Result<PathBuf, AvatarError> {
        if let Some(parent) = self.face_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AvatarError::StorageError(format!("Failed to create face directory: {}", e))
            })?;
        }

        // Stage next to the face file so a failed write never clobbers the previous face
        let staging = self.staging_path();
        if let Err(e) = tokio::fs::write(&staging, bytes).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(AvatarError::StorageError(format!(
                "Failed to write face image: {}",
                e
            )));
        }
        tokio::fs::rename(&staging, &self.face_path).await.map_err(|e| {
            AvatarError::StorageError(format!("Failed to replace face image: {}", e))
        })?;
        log::debug!("Saved background-removed image to {:?}", self.face_path);

        if let Some(gallery) = &self.gallery_dir {
            if let Err(e) = self.copy_to_gallery(gallery, bytes).await {
                log::warn!("Failed to copy face image to gallery: {}", e);
            }
        }

        Ok(self.face_path.clone())
    }

    async fn copy_to_gallery(&self, gallery: &Path, bytes: &[u8]) -> std::io::Result<()> {
        tokio::fs::create_dir_all(gallery).await?;
        let name = self
            .face_path
            .file_name()
            .map(|n| n.to_owned())
            .unwrap_or_else(|| "user-face.png".into());
        tokio::fs::write(gallery.join(name), bytes).await
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .face_path
            .file_name()
            .map(|n| n.to_owned())
            .unwrap_or_else(|| "user-face.png".into());
        name.push(".tmp");
        self.face_path.with_file_name(name)
    }
}
