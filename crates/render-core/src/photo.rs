//! Per-photo loading and decoding.
//!
//! A photo that cannot be fetched or decoded is a per-item failure: the
//! backend draws [`photo_placeholder`] in its slot and carries on.

use image::{DynamicImage, ImageFormat, RgbImage};
use thiserror::Error;
use visit_report_traits::{PhotoRepository, RepositoryError, SharedPhotoData};
use visit_report_types::Photo;

#[derive(Error, Debug)]
pub enum PhotoFailure {
    #[error(transparent)]
    Missing(#[from] RepositoryError),
    #[error("unsupported image encoding")]
    UnsupportedFormat,
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Encodings the backends can embed as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Jpeg,
    Png,
    Gif,
}

impl PhotoFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "jpeg",
            PhotoFormat::Png => "png",
            PhotoFormat::Gif => "gif",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "image/jpeg",
            PhotoFormat::Png => "image/png",
            PhotoFormat::Gif => "image/gif",
        }
    }
}

#[derive(Debug)]
pub struct DecodedPhoto {
    pub format: PhotoFormat,
    /// The bytes as stored, for backends that embed the original encoding.
    pub original: SharedPhotoData,
    image: DynamicImage,
}

impl DecodedPhoto {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// 8-bit RGB pixels with any alpha dropped.
    pub fn to_rgb8(&self) -> RgbImage {
        self.image.to_rgb8()
    }
}

/// Visible text drawn in place of photo `number` when it cannot be shown.
pub fn photo_placeholder(number: usize) -> String {
    format!("[Photo {number} failed to load]")
}

/// Fetch and decode `photo`. Logs a warning on failure; the caller decides
/// where the placeholder goes.
pub fn load_photo(
    repository: &dyn PhotoRepository,
    photo: &Photo,
    number: usize,
) -> Result<DecodedPhoto, PhotoFailure> {
    decode(repository, photo).inspect_err(|err| {
        log::warn!(
            "Photo {} ('{}') from {} repository skipped: {}",
            number,
            photo.id,
            repository.name(),
            err
        );
    })
}

fn decode(repository: &dyn PhotoRepository, photo: &Photo) -> Result<DecodedPhoto, PhotoFailure> {
    let original = repository.load(&photo.id)?;
    let format = match image::guess_format(&original) {
        Ok(ImageFormat::Jpeg) => PhotoFormat::Jpeg,
        Ok(ImageFormat::Png) => PhotoFormat::Png,
        Ok(ImageFormat::Gif) => PhotoFormat::Gif,
        _ => return Err(PhotoFailure::UnsupportedFormat),
    };
    let image = image::load_from_memory(&original).map_err(|e| PhotoFailure::Decode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(PhotoFailure::Decode("image has no pixels".to_string()));
    }
    Ok(DecodedPhoto {
        format,
        original,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};
    use visit_report_traits::InMemoryPhotoRepository;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![200u8; (width * height * 3) as usize];
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    #[test]
    fn decodes_png_from_repository() {
        let repo = InMemoryPhotoRepository::new().with_photo("north", png_bytes(8, 6));
        let decoded = load_photo(&repo, &Photo::new("north"), 1).unwrap();
        assert_eq!(decoded.format, PhotoFormat::Png);
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
        assert_eq!(decoded.to_rgb8().len(), 8 * 6 * 3);
    }

    #[test]
    fn missing_photo_is_reported() {
        let repo = InMemoryPhotoRepository::new();
        let err = load_photo(&repo, &Photo::new("ghost"), 2).unwrap_err();
        assert!(matches!(err, PhotoFailure::Missing(RepositoryError::NotFound(_))));
    }

    #[test]
    fn corrupt_bytes_are_reported() {
        let repo = InMemoryPhotoRepository::new().with_photo("bad", b"not an image".to_vec());
        assert!(load_photo(&repo, &Photo::new("bad"), 3).is_err());

        let mut truncated = png_bytes(4, 4);
        truncated.truncate(20);
        let repo = InMemoryPhotoRepository::new().with_photo("cut", truncated);
        assert!(matches!(
            load_photo(&repo, &Photo::new("cut"), 4),
            Err(PhotoFailure::Decode(_))
        ));
    }

    #[test]
    fn placeholder_text() {
        assert_eq!(photo_placeholder(5), "[Photo 5 failed to load]");
    }
}
