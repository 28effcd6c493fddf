//! End-to-end export pipeline tests through the public API.

use cardpress::{
    ApplyMode, CARD_HEIGHT, CARD_WIDTH, CardRole, ImageRef, PostData, Theme, capture, export_deck,
    preset, render, render_deck, switch_preset,
};
use image::{Rgba, RgbaImage};
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn sample_post() -> PostData {
    PostData {
        title: "Five Habits\nThat Stick".to_string(),
        pages: vec![
            "Start smaller than feels useful.".to_string(),
            "Attach the habit to one you already have.".to_string(),
        ],
        tags: vec!["habits".to_string(), "growth".to_string()],
        author_name: "Morning Pages".to_string(),
        date: "2025/03/14".to_string(),
        avatar_image: None,
    }
}

fn sample_png() -> ImageRef {
    let img = RgbaImage::from_pixel(8, 8, Rgba([200, 120, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    ImageRef::from_bytes(out.into_inner())
}

fn unzip(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            (entry.name().to_string(), data)
        })
        .collect()
}

#[tokio::test]
async fn export_produces_ordered_fixed_size_pages() {
    let data = sample_post();
    let style = preset(Theme::Journal);

    let bundle = export_deck(&data, &style, "habits").await.unwrap();
    assert!(bundle.file_name.starts_with("habits-"));
    assert!(bundle.file_name.ends_with(".zip"));

    let entries = unzip(&bundle.bytes);
    let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["page_1.png", "page_2.png", "page_3.png"]);

    for (_, png) in &entries {
        let img = image::load_from_memory(png).unwrap();
        assert_eq!(img.width(), CARD_WIDTH * 2);
        assert_eq!(img.height(), CARD_HEIGHT * 2);
    }
}

#[tokio::test]
async fn repeated_exports_render_identical_pixels() {
    let data = sample_post();
    let style = preset(Theme::Tech);

    let first = export_deck(&data, &style, "deck").await.unwrap();
    let second = export_deck(&data, &style, "deck").await.unwrap();

    let first_entries = unzip(&first.bytes);
    let second_entries = unzip(&second.bytes);
    assert_eq!(first_entries.len(), second_entries.len());
    for (a, b) in first_entries.iter().zip(&second_entries) {
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1, "entry {} differs between exports", a.0);
    }
}

#[tokio::test]
async fn broken_avatar_aborts_without_partial_archive() {
    let mut data = sample_post();
    data.avatar_image = Some(ImageRef::from_bytes(vec![0xBA, 0xD0]));
    let style = preset(Theme::Minimal);

    assert!(export_deck(&data, &style, "broken").await.is_err());
}

#[test]
fn title_text_reaches_captured_pixels() {
    let style = preset(Theme::Minimal);

    let mut titled = sample_post();
    titled.title = "HELLO WORLD HELLO WORLD".to_string();
    let mut blank = sample_post();
    blank.title = String::new();

    let a = capture(&render(&titled, &style, CardRole::Cover, 0)).unwrap();
    let b = capture(&render(&blank, &style, CardRole::Cover, 0)).unwrap();
    assert_ne!(a.png, b.png, "title text missing from the captured raster");
}

#[test]
fn embedded_line_break_changes_captured_pixels() {
    let style = preset(Theme::Minimal);

    let mut broken = sample_post();
    broken.title = "Restart\nYour Year".to_string();
    let mut flat = sample_post();
    flat.title = "Restart Your Year".to_string();

    let a = capture(&render(&broken, &style, CardRole::Cover, 0)).unwrap();
    let b = capture(&render(&flat, &style, CardRole::Cover, 0)).unwrap();
    assert_ne!(a.png, b.png);
}

#[test]
fn cover_only_background_respects_apply_mode() {
    let data = sample_post();
    let mut style = preset(Theme::Simplicity);
    style.background_image = Some(sample_png());
    style.background_apply_mode = ApplyMode::Cover;

    let deck = render_deck(&data, &style);
    assert_eq!(deck.len(), 3);
    assert!(deck[0].background_image().is_some());
    assert!(deck[1].background_image().is_none());
    assert!(deck[2].background_image().is_none());
}

#[test]
fn background_survives_theme_hopping() {
    let mut style = preset(Theme::Minimal);
    style.background_image = Some(sample_png());
    style.background_mask_opacity = Some(0.45);

    for theme in [Theme::Shockwave, Theme::Cinematic, Theme::Memo] {
        style = switch_preset(&style, theme);
    }

    assert_eq!(style.theme, Theme::Memo);
    assert!(style.background_image.is_some());
    assert_eq!(style.background_mask_opacity, Some(0.45));
}

#[tokio::test]
async fn every_theme_exports_cleanly() {
    let data = PostData {
        title: "Theme sweep".to_string(),
        pages: vec!["body".to_string()],
        ..PostData::default()
    };

    for theme in Theme::ALL {
        let style = preset(theme);
        let bundle = export_deck(&data, &style, theme.name()).await.unwrap();
        assert_eq!(unzip(&bundle.bytes).len(), 2, "theme {}", theme.name());
    }
}
