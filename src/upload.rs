//! Local-only upload flow: pick an image, add a caption, submit.
//!
//! Nothing leaves the process. A submit logs the upload and hands back a
//! receipt; the draft is then reset.

use base64::Engine;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not an image file: {0}")]
    NotAnImage(String),
    #[error("Select an image before submitting")]
    NoImage,
}

/// An image held in memory as a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub mime_type: String,
    pub data_url: String,
    pub byte_len: usize,
}

/// Build a `data:<mime>;base64,<payload>` URL.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Read `path` and turn it into a [`SelectedImage`].
///
/// The mime type is guessed from the extension; anything outside `image/*`
/// is rejected. File size is not checked.
pub async fn load_image(path: &Path) -> Result<SelectedImage, UploadError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(UploadError::NotAnImage(path.display().to_string()));
    }

    let read_err = |source: std::io::Error| UploadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let bytes = tokio::fs::read(path).await.map_err(read_err)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(file = %file_name, mime = %mime, bytes = bytes.len(), "Image loaded");

    Ok(SelectedImage {
        file_name,
        mime_type: mime.essence_str().to_string(),
        data_url: encode_data_url(mime.essence_str(), &bytes),
        byte_len: bytes.len(),
    })
}

/// What a successful submit reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub file_name: String,
    pub caption: String,
    pub byte_len: usize,
}

/// Upload form state.
#[derive(Debug, Clone, Default)]
pub struct UploadDraft {
    image: Option<SelectedImage>,
    caption: String,
}

impl UploadDraft {
    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_image(&mut self, image: SelectedImage) {
        self.image = Some(image);
    }

    /// Load `path` and make it the selected image.
    pub async fn select_image(&mut self, path: &Path) -> Result<(), UploadError> {
        let image = load_image(path).await?;
        self.set_image(image);
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    pub fn can_submit(&self) -> bool {
        self.image.is_some()
    }

    /// Report the upload and reset the draft. No backend is contacted.
    pub fn submit(&mut self) -> Result<UploadReceipt, UploadError> {
        let image = self.image.take().ok_or(UploadError::NoImage)?;
        let caption = std::mem::take(&mut self.caption).trim().to_string();

        tracing::info!(
            file = %image.file_name,
            mime = %image.mime_type,
            bytes = image.byte_len,
            caption = %caption,
            "Meme uploaded"
        );

        Ok(UploadReceipt {
            file_name: image.file_name,
            caption,
            byte_len: image.byte_len,
        })
    }
}
