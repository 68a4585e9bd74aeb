/// Local previews of user-selected replacement files
///
/// Reading and decoding never block the UI: the bytes are read with
/// `tokio::fs` and decoded on a blocking worker, and the result comes back
/// to the widget as a message.
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::GenericImageView;
use tokio::task;

use crate::error::{Result, SlotError};

/// Longest edge of a decoded preview, in pixels
pub const PREVIEW_MAX_EDGE: u32 = 512;

/// Extensions offered by the file picker
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff"];

/// A user-selected file that has not been persisted yet
#[derive(Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl PendingFile {
    pub fn new(path: impl Into<PathBuf>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Self {
            path,
            name,
            bytes: bytes.into(),
        }
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// File contents are not useful in debug output
impl fmt::Debug for PendingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFile")
            .field("path", &self.path)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Decoded, downscaled RGBA preview of a pending file
#[derive(Clone, PartialEq, Eq)]
pub struct Preview {
    pub file: PendingFile,
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<[u8]>,
}

impl Preview {
    /// Image handle for rendering, built from the decoded pixels
    pub fn handle(&self) -> iced::widget::image::Handle {
        iced::widget::image::Handle::from_rgba(self.width, self.height, self.rgba.to_vec())
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview")
            .field("file", &self.file)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Read a file from disk and decode it into a preview
pub async fn load_preview(path: PathBuf, max_edge: u32) -> Result<Preview> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| SlotError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let file = PendingFile::new(path, bytes);

    // Decoding is CPU-bound
    task::spawn_blocking(move || decode_preview(file, max_edge)).await?
}

/// Decode already-read bytes into a preview no larger than `max_edge`
pub fn decode_preview(file: PendingFile, max_edge: u32) -> Result<Preview> {
    let img = image::load_from_memory(&file.bytes)?;

    let (width, height) = img.dimensions();
    let img = if width > max_edge || height > max_edge {
        img.thumbnail(max_edge, max_edge)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    log::debug!(
        "🖼️  Decoded preview for {} ({}x{})",
        file.path.display(),
        width,
        height
    );

    Ok(Preview {
        file,
        width,
        height,
        rgba: rgba.into_raw().into(),
    })
}

/// Show the native file picker filtered to images
pub async fn pick_image() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Select an image")
        .add_filter("Images", &IMAGE_EXTENSIONS[..])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
        .filter(|path| {
            let accepted = has_image_extension(path);
            if !accepted {
                log::warn!("⚠️  Ignoring non-image selection {}", path.display());
            }
            accepted
        })
}

/// Whether a path looks like an image the picker would offer
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
