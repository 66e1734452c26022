use crate::catalog::{Picture, Track};
use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

const DEFAULT_SIZE: u32 = 32;

pub fn decode_picture(picture: &Picture) -> Result<DynamicImage> {
    let bytes = picture.decode().context("artwork is not valid base64")?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("cannot decode {} artwork", picture.format))?;
    Ok(img)
}

/// The fixed cover shown for tracks without usable embedded artwork 🎨
pub fn default_image() -> DynamicImage {
    let top = (203u8, 166u8, 247u8);
    let bottom = (137u8, 180u8, 250u8);
    let img = RgbImage::from_fn(DEFAULT_SIZE, DEFAULT_SIZE, |x, y| {
        let t = y as f32 / (DEFAULT_SIZE - 1) as f32;
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        // A dark disc in the middle, like a record label
        let dx = x as f32 - (DEFAULT_SIZE / 2) as f32;
        let dy = y as f32 - (DEFAULT_SIZE / 2) as f32;
        let r = (dx * dx + dy * dy).sqrt();
        if r < 4.0 {
            Rgb([30, 30, 46])
        } else if r < 12.0 {
            Rgb([mix(top.0, bottom.0) / 2, mix(top.1, bottom.1) / 2, mix(top.2, bottom.2) / 2])
        } else {
            Rgb([mix(top.0, bottom.0), mix(top.1, bottom.1), mix(top.2, bottom.2)])
        }
    });
    DynamicImage::ImageRgb8(img)
}

/// Decoded covers per track name. A track whose picture fails to decode is
/// remembered as such so the warning is logged only once.
pub struct ArtworkCache {
    default: Arc<DynamicImage>,
    entries: HashMap<String, Option<Arc<DynamicImage>>>,
}

impl Default for ArtworkCache {
    fn default() -> Self {
        Self {
            default: Arc::new(default_image()),
            entries: HashMap::new(),
        }
    }
}

impl ArtworkCache {
    pub fn get(&mut self, track: &Track) -> Arc<DynamicImage> {
        let Some(picture) = &track.metadata.picture else {
            return self.default.clone();
        };
        let entry = self.entries.entry(track.name.clone()).or_insert_with(|| {
            match decode_picture(picture) {
                Ok(img) => Some(Arc::new(img)),
                Err(e) => {
                    warn!(track = %track.name, error = %e, "Using default artwork");
                    None
                }
            }
        });
        entry.clone().unwrap_or_else(|| self.default.clone())
    }
}

/// Render an image into `width` x `height` cells, two pixels per cell (▀).
pub fn half_block_lines(img: &DynamicImage, width: u16, height: u16) -> Vec<Line<'static>> {
    let target_width = width as u32;
    let target_height = height as u32 * 2;
    if target_width == 0 || target_height == 0 {
        return Vec::new();
    }

    let resized = img.resize(target_width, target_height, FilterType::Triangle);
    let rows = resized.height().div_ceil(2);
    let padding_top = (height as u32).saturating_sub(rows) / 2;

    let mut lines = vec![Line::default(); padding_top as usize];
    for y in (0..resized.height()).step_by(2) {
        let spans: Vec<Span<'static>> = (0..resized.width())
            .map(|x| {
                let p1 = resized.get_pixel(x, y);
                let p2 = if y + 1 < resized.height() {
                    resized.get_pixel(x, y + 1)
                } else {
                    p1
                };
                Span::styled(
                    "▀",
                    Style::default()
                        .fg(Color::Rgb(p1[0], p1[1], p1[2]))
                        .bg(Color::Rgb(p2[0], p2[1], p2[2])),
                )
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use std::io::Cursor;

    fn png_track(name: &str) -> Track {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let mut track = Track::new(name);
        track.metadata.picture = Some(Picture {
            format: "image/png".to_string(),
            data: STANDARD.encode(bytes),
        });
        track
    }

    #[test]
    fn test_embedded_picture_is_decoded() {
        let mut cache = ArtworkCache::default();
        let img = cache.get(&png_track("a.mp3"));
        assert!(!Arc::ptr_eq(&img, &cache.default));
        assert_eq!(img.dimensions(), (4, 4));
    }

    #[test]
    fn test_missing_or_broken_picture_uses_default() {
        let mut cache = ArtworkCache::default();
        let img = cache.get(&Track::new("plain.mp3"));
        assert!(Arc::ptr_eq(&img, &cache.default));

        let mut broken = Track::new("broken.mp3");
        broken.metadata.picture = Some(Picture {
            format: "image/jpeg".to_string(),
            data: "not base64!".to_string(),
        });
        let img = cache.get(&broken);
        assert!(Arc::ptr_eq(&img, &cache.default));
    }

    #[test]
    fn test_half_blocks_fit_area() {
        let lines = half_block_lines(&default_image(), 10, 5);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.width() <= 10));
    }
}
