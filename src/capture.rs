//! Card capture: rasterizes card visuals to PNG, concurrently per deck.

use crate::card::{CardVisual, Primitive};
use crate::error::{Error, Result};
use crate::svg;
use futures::future::try_join_all;
use image::ImageFormat;
use std::io::Cursor;

/// Uniform raster scale factor. Every card captures at exactly twice its
/// logical size, so a 375x500 card always yields a 750x1000 PNG.
pub const CAPTURE_SCALE: f32 = 2.0;

/// One captured card: PNG bytes tagged with the card's deck position.
#[derive(Debug, Clone)]
pub struct Capture {
    /// 0 = cover, 1..=N = pages. Drives archive entry naming.
    pub sequence_index: usize,
    /// Encoded PNG at capture scale.
    pub png: Vec<u8>,
}

/// Captures a single card to PNG bytes.
///
/// Every image resource on the card is decode-checked first; a broken
/// payload fails the capture instead of rasterizing a blank layer.
pub fn capture(card: &CardVisual) -> Result<Capture> {
    if let Some((image, _)) = card.background_image()
        && !image.decode_check()
    {
        return Err(Error::ImageDecode {
            index: card.sequence_index,
        });
    }
    for p in card.primitives() {
        if let Primitive::Image { image, .. } = p
            && !image.decode_check()
        {
            return Err(Error::ImageDecode {
                index: card.sequence_index,
            });
        }
    }

    let doc = svg::document(card);
    let raster = svg::rasterize(&doc, CAPTURE_SCALE).ok_or_else(|| Error::Capture {
        index: card.sequence_index,
        reason: "svg rasterization failed".to_string(),
    })?;

    let mut png = Cursor::new(Vec::new());
    raster
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| Error::Capture {
            index: card.sequence_index,
            reason: format!("png encoding failed: {e}"),
        })?;

    Ok(Capture {
        sequence_index: card.sequence_index,
        png: png.into_inner(),
    })
}

/// Captures a whole deck concurrently.
///
/// Cards rasterize on blocking worker threads in parallel; the result is
/// always in deck order because each capture carries its sequence index and
/// the batch is sorted before returning, never by completion order. Any
/// single failure aborts the whole batch.
pub async fn capture_all(cards: Vec<CardVisual>) -> Result<Vec<Capture>> {
    let tasks = cards.into_iter().map(|card| {
        tokio::task::spawn_blocking(move || {
            log::debug!("capturing card {}", card.sequence_index);
            capture(&card)
        })
    });

    let joined = try_join_all(tasks).await.map_err(|_| Error::TaskJoin)?;
    let mut captures = joined.into_iter().collect::<Result<Vec<_>>>()?;
    restore_deck_order(&mut captures);
    Ok(captures)
}

/// Restores deck order regardless of the order captures completed in.
pub(crate) fn restore_deck_order(captures: &mut [Capture]) {
    captures.sort_by_key(|c| c.sequence_index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CARD_HEIGHT, CARD_WIDTH, CardRole};
    use crate::media::ImageRef;
    use crate::post::PostData;
    use crate::style::Theme;
    use crate::theme;
    use crate::{catalog, catalog::preset};

    fn data() -> PostData {
        PostData {
            title: "Capture Me".to_string(),
            pages: vec!["one".to_string(), "two".to_string()],
            ..PostData::default()
        }
    }

    #[test]
    fn capture_yields_fixed_size_png() {
        let style = catalog::default_style();
        let card = theme::render(&data(), &style, CardRole::Cover, 0);

        let capture = capture(&card).unwrap();
        assert_eq!(capture.sequence_index, 0);

        let img = image::load_from_memory(&capture.png).unwrap();
        assert_eq!(img.width(), CARD_WIDTH * 2);
        assert_eq!(img.height(), CARD_HEIGHT * 2);
    }

    #[test]
    fn broken_background_image_fails_the_capture() {
        let mut style = catalog::default_style();
        style.background_image = Some(ImageRef::from_bytes(vec![1, 2, 3, 4]));
        let card = theme::render(&data(), &style, CardRole::Cover, 0);

        match capture(&card) {
            Err(crate::Error::ImageDecode { index }) => assert_eq!(index, 0),
            other => panic!("expected ImageDecode, got {other:?}"),
        }
    }

    #[test]
    fn per_item_failures_name_the_card() {
        let mut style = catalog::default_style();
        style.background_image = Some(ImageRef::from_bytes(vec![9, 9]));
        let card = theme::render(&data(), &style, CardRole::Content, 2);

        let err = capture(&card).unwrap_err();
        match &err {
            crate::Error::ImageDecode { index } => assert_eq!(*index, 2),
            other => panic!("expected ImageDecode, got {other:?}"),
        }
        assert!(err.to_string().contains("card 2"));
    }

    #[test]
    fn restore_deck_order_sorts_by_index() {
        let mut captures = vec![
            Capture {
                sequence_index: 2,
                png: vec![2],
            },
            Capture {
                sequence_index: 0,
                png: vec![0],
            },
            Capture {
                sequence_index: 1,
                png: vec![1],
            },
        ];
        restore_deck_order(&mut captures);
        let order: Vec<_> = captures.iter().map(|c| c.sequence_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn capture_all_preserves_deck_order() {
        let style = preset(Theme::Shockwave);
        let deck = theme::render_deck(&data(), &style);

        let captures = capture_all(deck).await.unwrap();
        assert_eq!(captures.len(), 3);
        for (i, c) in captures.iter().enumerate() {
            assert_eq!(c.sequence_index, i);
            assert!(!c.png.is_empty());
        }
    }

    #[tokio::test]
    async fn one_bad_card_aborts_the_batch() {
        let mut style = catalog::default_style();
        style.background_image = Some(ImageRef::from_bytes(vec![0xde, 0xad]));
        let deck = theme::render_deck(&data(), &style);

        assert!(capture_all(deck).await.is_err());
    }
}
