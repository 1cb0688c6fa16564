use crate::photos::*;
use visit_report_types::{Density, Photo};

fn photos(n: usize) -> Vec<Photo> {
    (0..n).map(|i| Photo::new(format!("p{i}"))).collect()
}

fn letter_area() -> GridArea {
    GridArea::new(540.0, 636.0)
}

#[test]
fn seven_photos_at_two_per_page() {
    let pages = plan_photo_pages(&photos(7), Density::Two, letter_area());
    let counts: Vec<usize> = pages.iter().map(|p| p.slots.len()).collect();
    assert_eq!(counts, vec![2, 2, 2, 1]);
    assert!(!pages[0].continued);
    assert!(pages[1..].iter().all(|p| p.continued));
}

#[test]
fn page_count_is_ceiling_of_photos_over_density() {
    for n in 0..20 {
        for density in [Density::Two, Density::Six] {
            let pages = plan_photo_pages(&photos(n), density, letter_area());
            let per_page = density.photos_per_page();
            assert_eq!(pages.len(), n.div_ceil(per_page), "n={n} density={per_page}");
            for page in &pages {
                assert!(!page.slots.is_empty());
                assert!(page.slots.len() <= per_page);
            }
        }
    }
}

#[test]
fn no_photos_means_no_pages() {
    assert!(plan_photo_pages(&[], Density::Six, letter_area()).is_empty());
}

#[test]
fn slots_cover_every_photo_in_order() {
    let pages = plan_photo_pages(&photos(13), Density::Six, letter_area());
    let indices: Vec<usize> = pages
        .iter()
        .flat_map(|p| p.slots.iter().map(|s| s.photo_index))
        .collect();
    assert_eq!(indices, (0..13).collect::<Vec<_>>());
    assert_eq!(pages[2].slots[0].number(), 13);
}

#[test]
fn six_per_page_is_two_columns_by_three_rows() {
    let pages = plan_photo_pages(&photos(6), Density::Six, letter_area());
    let positions: Vec<(usize, usize)> = pages[0].slots.iter().map(|s| (s.row, s.column)).collect();
    assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);

    let left = &pages[0].slots[0];
    let right = &pages[0].slots[1];
    assert_eq!(left.cell.width, 260.0);
    assert_eq!(right.cell.x, 280.0);
    assert!(right.cell.right() <= 540.0);
}

#[test]
fn two_per_page_caps_the_image_box() {
    let pages = plan_photo_pages(&photos(2), Density::Two, letter_area());
    let slot = &pages[0].slots[0];
    assert_eq!(slot.image_box.width, 468.0);
    assert_eq!(slot.image_box.height, 252.0);
    // centered inside a full-width cell
    assert_eq!(slot.image_box.x, 36.0);
}

#[test]
fn images_stay_inside_their_box() {
    let mut set = photos(4);
    set[0] = set[0].clone().with_dimensions(4000, 1000);
    set[1] = set[1].clone().with_dimensions(800, 3000);
    set[2] = set[2].clone().with_dimensions(0, 0);
    for density in [Density::Two, Density::Six] {
        for page in plan_photo_pages(&set, density, letter_area()) {
            for slot in &page.slots {
                let (image, bounds) = (slot.image, slot.image_box);
                assert!(image.width <= bounds.width + 0.01);
                assert!(image.height <= bounds.height + 0.01);
                assert!(image.x >= bounds.x - 0.01);
                assert!((image.bottom() - bounds.bottom()).abs() < 0.01);
            }
        }
    }
}

#[test]
fn fit_keeps_aspect_ratio() {
    let pages = plan_photo_pages(&photos(1), Density::Six, letter_area());
    let slot = &pages[0].slots[0];
    let wide = slot.fit(1600, 400);
    assert!((wide.width / wide.height - 4.0).abs() < 0.01);
    assert_eq!(wide.width, slot.image_box.width);

    let unknown = slot.fit(0, 10);
    assert!((unknown.width / unknown.height - DEFAULT_ASPECT).abs() < 0.01);
}

#[test]
fn caption_truncates_long_descriptions() {
    assert_eq!(photo_caption(3, ""), "Photo 3");
    assert_eq!(photo_caption(1, "  North wall  "), "Photo 1: North wall");
    let long = "A".repeat(36);
    assert_eq!(photo_caption(2, &long), format!("Photo 2: {}...", "A".repeat(35)));
    let exact = "B".repeat(35);
    assert_eq!(photo_caption(2, &exact), format!("Photo 2: {exact}"));
}

#[test]
fn notes_excerpt_joins_two_lines() {
    assert_eq!(photo_notes_excerpt("first\n\nsecond\nthird"), "first second");
    assert_eq!(photo_notes_excerpt(""), "");
}
