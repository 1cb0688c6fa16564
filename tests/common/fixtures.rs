use chrono::NaiveDate;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use visit_report::{InMemoryPhotoRepository, Outline, Photo, Visit};

/// A small solid-color JPEG.
pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([120, 140, 160]));
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 80)
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)
        .expect("encode jpeg");
    out
}

#[allow(dead_code)]
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([20, 200, 90]));
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)
        .expect("encode png");
    out
}

/// JPEG magic followed by garbage.
#[allow(dead_code)]
pub fn corrupt_jpeg() -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(&[0x13; 64]);
    bytes
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Acme / Plant 1, observations with one bullet, no photos.
pub fn scenario_a() -> Visit {
    let mut visit = Visit::new("Acme", "Plant 1", "P-100", date(2024, 1, 15), "J. Doe");
    visit.observations = Outline::from_stored("Crack in wall\n\tminor\nLeak detected");
    visit
}

/// `count` photos named `p1..pN`, each with a description and notes.
pub fn visit_with_photos(count: usize) -> Visit {
    let mut visit = Visit::new("Acme", "Plant 1", "P-100", date(2024, 1, 15), "J. Doe");
    visit.background = "Quarterly walk-through.".to_string();
    visit.photos = (1..=count)
        .map(|i| {
            Photo::new(format!("p{i}"))
                .with_description(format!("Area {i}"))
                .with_notes(format!("Note for photo {i}\nSecond line"))
        })
        .collect();
    visit
}

/// A repository holding a JPEG for every photo of `visit`.
pub fn repository_for(visit: &Visit) -> InMemoryPhotoRepository {
    visit.photos.iter().fold(InMemoryPhotoRepository::new(), |repo, photo| {
        repo.with_photo(photo.id.clone(), jpeg(40, 30))
    })
}

/// An observations outline long enough to spill over several pages.
#[allow(dead_code)]
pub fn long_outline(entries: usize) -> Outline {
    let stored = (1..=entries)
        .map(|i| {
            if i % 4 == 0 {
                format!("\tdetail under entry {i}")
            } else {
                format!("Observation {i}: the north retaining wall shows hairline cracking along the mortar joints")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    Outline::from_stored(&stored)
}
