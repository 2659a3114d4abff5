//! Generated stand-in artwork
//!
//! Produces valid 24-bit BMP files for every [`AssetId`] so the face can run
//! without the real artwork, e.g. in the simulator or in tests.

use std::io::Cursor;
use std::vec::Vec;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use image::{ImageFormat, ImageResult, Rgb, RgbImage};

use crate::assets::{AssetId, AssetSource, ASSET_COUNT};
use crate::config::FACE_SIZE;

pub const OVERLAY_WIDTH: u32 = 64;
pub const OVERLAY_HEIGHT: u32 = 72;

/// Colour overlays use for "no pixel here".
pub const OVERLAY_KEY: Rgb888 = Rgb888::new(0xFF, 0x00, 0xFF);

/// Encode an uncompressed 24-bit BMP.
pub fn encode_bmp(
    width: u32,
    height: u32,
    pixel: impl Fn(u32, u32) -> Rgb888,
) -> ImageResult<Vec<u8>> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        let c = pixel(x, y);
        Rgb([c.r(), c.g(), c.b()])
    });

    let mut out = Vec::new();
    image.write_to(&mut Cursor::new(&mut out), ImageFormat::Bmp)?;
    Ok(out)
}

fn background(ambient: bool) -> ImageResult<Vec<u8>> {
    let c = FACE_SIZE as i32 / 2;
    encode_bmp(FACE_SIZE, FACE_SIZE, |x, y| {
        let (dx, dy) = (x as i32 - c, y as i32 - c);
        let d2 = dx * dx + dy * dy;
        if ambient {
            if d2 > 150 * 150 && d2 < 152 * 152 {
                Rgb888::new(0x40, 0x40, 0x40)
            } else {
                Rgb888::BLACK
            }
        } else {
            let shade = (255 - (d2 / 400).min(255)) as u8 / 4;
            Rgb888::new(shade, shade / 3, shade / 2)
        }
    })
}

/// A teardrop flame whose height flickers with the frame number.
fn flame(frame: u8) -> ImageResult<Vec<u8>> {
    let flicker = [0, 3, 6, 8, 6, 3, 1, 4, 7, 9, 7, 4, 2][frame as usize % 13];
    let cx = OVERLAY_WIDTH as i32 / 2;
    let base = OVERLAY_HEIGHT as i32 - 8;
    let height = 40 + flicker;
    let half_width = 14;

    encode_bmp(OVERLAY_WIDTH, OVERLAY_HEIGHT, |x, y| {
        let dx = (x as i32 - cx).abs();
        let dy = base - y as i32;
        if dy < 0 || dy > height {
            return OVERLAY_KEY;
        }
        // Widest a third of the way up, tapering to a point.
        let widest = height / 3;
        let w = if dy <= widest {
            half_width * (dy + widest) / (2 * widest)
        } else {
            half_width * (height - dy) / (height - widest)
        };
        if dx > w {
            OVERLAY_KEY
        } else if dx * 2 < w {
            Rgb888::new(0xFF, 0xE0, 0x60)
        } else {
            Rgb888::new(0xFF, 0x60, 0x10)
        }
    })
}

/// Owned placeholder bitmaps for every asset.
pub struct PlaceholderAssets {
    files: Vec<Vec<u8>>,
}

impl PlaceholderAssets {
    pub fn generate() -> ImageResult<Self> {
        let files = AssetId::all()
            .map(|id| match id {
                AssetId::InteractiveBackground => background(false),
                AssetId::AmbientBackground => background(true),
                AssetId::Overlay(frame) => flame(frame),
            })
            .collect::<ImageResult<Vec<_>>>()?;
        debug_assert_eq!(files.len(), ASSET_COUNT);
        Ok(Self { files })
    }
}

impl AssetSource for PlaceholderAssets {
    fn asset(&self, id: AssetId) -> Option<&[u8]> {
        self.files.get(id.ordinal()).map(Vec::as_slice)
    }
}
