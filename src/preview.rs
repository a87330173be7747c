//! Local image previews built before anything is sent to the service.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use base64::Engine;
use egui::ColorImage;

/// Extensions offered by the file dialog.
pub const PICKER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// Largest image file read for a preview or an upload.
pub const MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;

/// Longest edge of the decoded preview texture.
const PREVIEW_MAX_EDGE: u32 = 512;
const FALLBACK_MIME: &str = "application/octet-stream";

/// Decoded preview of a selected image.
#[derive(Clone, Debug)]
pub struct ImagePreview {
    pub mime: String,
    /// `data:<mime>;base64,...` form of the original file.
    pub data_uri: String,
    /// Downscaled pixels ready for upload as a texture.
    pub image: ColorImage,
    /// Width and height of the original image.
    pub source_size: [u32; 2],
}

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Read and decode `path` into an [`ImagePreview`].
pub fn load_preview(path: &Path) -> Result<ImagePreview, PreviewError> {
    let bytes = read_image_file(path).map_err(|source| PreviewError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    preview_from_bytes(path, &bytes)
}

/// Read an image file, refusing anything over [`MAX_IMAGE_BYTES`].
pub fn read_image_file(path: &Path) -> io::Result<Vec<u8>> {
    read_bounded(path, MAX_IMAGE_BYTES)
}

fn read_bounded(path: &Path, max_bytes: u64) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let declared = file.metadata()?.len();
    if declared > max_bytes {
        return Err(too_large(declared, max_bytes));
    }
    let mut bytes = Vec::with_capacity(declared as usize);
    file.take(max_bytes + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        return Err(too_large(bytes.len() as u64, max_bytes));
    }
    Ok(bytes)
}

fn too_large(size: u64, max_bytes: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("Image is {size} bytes; the limit is {max_bytes}"),
    )
}

pub fn preview_from_bytes(path: &Path, bytes: &[u8]) -> Result<ImagePreview, PreviewError> {
    let decoded = image::load_from_memory(bytes).map_err(|source| PreviewError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let source_size = [decoded.width(), decoded.height()];
    let scaled = if decoded.width() > PREVIEW_MAX_EDGE || decoded.height() > PREVIEW_MAX_EDGE {
        decoded.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE)
    } else {
        decoded
    };
    let rgba = scaled.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let image = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    let mime = guess_mime(path, Some(bytes));
    Ok(ImagePreview {
        data_uri: data_uri(&mime, bytes),
        mime,
        image,
        source_size,
    })
}

/// Encode `bytes` as a base64 data URI.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Best-effort MIME type from file content, then extension.
pub fn guess_mime(path: &Path, bytes: Option<&[u8]>) -> String {
    bytes
        .and_then(|bytes| image::guess_format(bytes).ok())
        .or_else(|| image::ImageFormat::from_path(path).ok())
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|| FALLBACK_MIME.to_string())
}

/// MIME type to use for a dropped file, or `None` when it is not an image.
///
/// Platforms that do not report a MIME type fall back to the extension.
pub fn dropped_image_mime(reported: &str, path: Option<&Path>) -> Option<String> {
    let reported = reported.trim();
    let mime = if reported.is_empty() {
        path.map(|path| guess_mime(path, None))?
    } else {
        reported.to_ascii_lowercase()
    };
    mime.starts_with("image/").then_some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let mut img = image::RgbaImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba([200, 30, 30, 255]);
        }
        img.save(path).unwrap();
    }

    #[test]
    fn preview_contains_data_uri_and_pixels() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("part.png");
        write_png(&path, 8, 4);

        let preview = load_preview(&path).unwrap();
        assert_eq!(preview.mime, "image/png");
        assert!(preview.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(preview.image.size, [8, 4]);
        assert_eq!(preview.source_size, [8, 4]);
    }

    #[test]
    fn large_images_are_downscaled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_png(&path, 1024, 256);

        let preview = load_preview(&path).unwrap();
        assert_eq!(preview.image.size[0], 512);
        assert_eq!(preview.source_size, [1024, 256]);
    }

    #[test]
    fn non_image_bytes_fail_to_decode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"not really a png").unwrap();
        assert!(matches!(
            load_preview(&path),
            Err(PreviewError::Decode { .. })
        ));
    }

    #[test]
    fn oversized_files_are_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.png");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let err = read_bounded(&path, 32).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(read_bounded(&path, 64).unwrap().len(), 64);
    }

    #[test]
    fn data_uri_encodes_bytes() {
        assert_eq!(data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }

    #[test]
    fn mime_prefers_content_over_extension() {
        let mut png = Vec::new();
        image::RgbaImage::new(1, 1)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        assert_eq!(guess_mime(Path::new("mislabeled.jpg"), Some(&png)), "image/png");
        assert_eq!(guess_mime(Path::new("photo.jpeg"), None), "image/jpeg");
        assert_eq!(guess_mime(Path::new("data.bin"), None), FALLBACK_MIME);
    }

    #[test]
    fn drops_accept_only_image_types() {
        assert_eq!(
            dropped_image_mime("image/png", None).as_deref(),
            Some("image/png")
        );
        assert_eq!(dropped_image_mime("text/plain", Some(Path::new("a.png"))), None);
        assert_eq!(
            dropped_image_mime("", Some(Path::new("scan.jpg"))).as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(dropped_image_mime("", Some(Path::new("readme.txt"))), None);
        assert_eq!(dropped_image_mime("", None), None);
    }
}
