use std::{
    fs,
    path::PathBuf,
};

use crate::core::ScoutError;

/// A photo attachment as it arrives from the submission form.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// Filename-addressed photo storage under the local uploads directory.
pub struct PhotoStore {
    uploads_dir: PathBuf,
}

impl PhotoStore {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        PhotoStore { uploads_dir: uploads_dir.into() }
    }

    pub fn uploads_dir(&self) -> &PathBuf {
        &self.uploads_dir
    }

    /// Write the photo and return the filename the record should carry.
    pub fn save(&self, upload: &PhotoUpload) -> Result<String, ScoutError> {
        fs::create_dir_all(&self.uploads_dir)?;

        let extension = upload
            .original_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && !ext.contains('/'))
            .unwrap_or("jpg");
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("disease_photo_{}.{}", timestamp, extension);

        fs::write(self.uploads_dir.join(&filename), &upload.bytes)?;
        Ok(filename)
    }
}

/// Remote object storage for photos. The returned string is a viewable
/// link; records carry either this link or a local filename, never both.
pub trait ObjectStore {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<String, ScoutError>;
}
