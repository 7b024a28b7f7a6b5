//! Recipe Images
//!
//! Images are attached to recipes as base64 data URIs. Sources implement
//! [`ImageFile`] so the controller does not care whether the bytes come
//! from disk or from a test fixture.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A file picked by the user for upload
#[async_trait]
pub trait ImageFile: Send + Sync {
    /// File name, used to guess the MIME type
    fn name(&self) -> &str;

    /// Read the whole file into memory
    async fn read(&self) -> Result<Vec<u8>, ImageError>;

    /// Explicit MIME type, when the source knows it
    fn mime_type(&self) -> Option<&str> {
        None
    }
}

/// Errors that can occur while reading an image
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image {0} is empty")]
    Empty(String),

    #[error("{0} is not a recognised image format")]
    NotAnImage(String),
}

/// Image file on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalImage {
    path: PathBuf,
    name: String,
}

impl LocalImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ImageFile for LocalImage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> Result<Vec<u8>, ImageError> {
        tokio::fs::read(&self.path).await.map_err(|source| ImageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Read an image and encode it as `data:<mime>;base64,<payload>`
pub async fn read_as_data_uri(file: &dyn ImageFile) -> Result<String, ImageError> {
    let bytes = file.read().await?;
    if bytes.is_empty() {
        return Err(ImageError::Empty(file.name().to_string()));
    }

    // Content wins over the declared type, which wins over the file name
    let detected: Option<&str> = sniff_mime(&bytes);
    let mime = detected
        .or_else(|| file.mime_type().filter(|mime| is_image_mime(mime)))
        .or_else(|| mime_from_name(file.name()))
        .ok_or_else(|| ImageError::NotAnImage(file.name().to_string()))?;

    Ok(to_data_uri(mime, &bytes))
}

pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, base64_encode(bytes))
}

/// Identify an image format from its leading bytes
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"BM", "image/bmp"),
    ];

    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    SIGNATURES
        .iter()
        .find(|(signature, _)| bytes.starts_with(signature))
        .map(|(_, mime)| *mime)
}

fn is_image_mime(mime: &str) -> bool {
    mime.get(..6)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Guess an image MIME type from the file extension
pub fn mime_from_name(name: &str) -> Option<&'static str> {
    let extension = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "heic" => "image/heic",
        _ => return None,
    };
    Some(mime)
}

/// Standard base64 with padding
fn base64_encode(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut result = String::with_capacity(data.len().div_ceil(3) * 4);

    for chunk in data.chunks(3) {
        let b0 = chunk[0] as usize;
        let b1 = chunk.get(1).copied().unwrap_or(0) as usize;
        let b2 = chunk.get(2).copied().unwrap_or(0) as usize;

        result.push(ALPHABET[b0 >> 2] as char);
        result.push(ALPHABET[((b0 & 0x03) << 4) | (b1 >> 4)] as char);

        if chunk.len() > 1 {
            result.push(ALPHABET[((b1 & 0x0f) << 2) | (b2 >> 6)] as char);
        } else {
            result.push('=');
        }

        if chunk.len() > 2 {
            result.push(ALPHABET[b2 & 0x3f] as char);
        } else {
            result.push('=');
        }
    }

    result
}
