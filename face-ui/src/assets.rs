//! Bitmaps the face draws and where it draws them

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb565;
use heapless::Vec;
use log::{error, info};
use tinybmp::Bmp;

use crate::frame::BackgroundKind;
use crate::FaceError;

/// Number of frames in the overlay animation
pub const OVERLAY_FRAMES: usize = 25;

/// Number of overlay positions around the dial, one per hour
pub const OVERLAY_SLOTS: usize = 12;

/// Backgrounds plus overlay frames
pub const ASSET_COUNT: usize = 2 + OVERLAY_FRAMES;

/// Top-left corner of the overlay for each hour, starting at 12 o'clock.
pub const OVERLAY_POSITIONS: [Point; OVERLAY_SLOTS] = [
    Point::new(128, -15),
    Point::new(68, 0),
    Point::new(23, 50),
    Point::new(3, 113),
    Point::new(23, 170),
    Point::new(68, 215),
    Point::new(128, 235),
    Point::new(188, 215),
    Point::new(238, 170),
    Point::new(253, 113),
    Point::new(238, 50),
    Point::new(188, 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetId {
    InteractiveBackground,
    AmbientBackground,
    /// Overlay animation frame, `0..OVERLAY_FRAMES`
    Overlay(u8),
}

impl AssetId {
    /// Every asset the face needs, in load order.
    pub fn all() -> impl Iterator<Item = AssetId> {
        [AssetId::InteractiveBackground, AssetId::AmbientBackground]
            .into_iter()
            .chain((0..OVERLAY_FRAMES as u8).map(AssetId::Overlay))
    }

    /// Position of the asset in load order.
    pub fn ordinal(self) -> usize {
        match self {
            AssetId::InteractiveBackground => 0,
            AssetId::AmbientBackground => 1,
            AssetId::Overlay(index) => 2 + index as usize,
        }
    }
}

/// Host-side resource lookup.
pub trait AssetSource {
    /// Raw BMP bytes for `id`, or `None` if the host has no such resource.
    fn asset(&self, id: AssetId) -> Option<&[u8]>;
}

/// Assets baked into the binary, indexed by [`AssetId::ordinal`].
impl<'a> AssetSource for [Option<&'a [u8]>; ASSET_COUNT] {
    fn asset(&self, id: AssetId) -> Option<&[u8]> {
        self.get(id.ordinal()).copied().flatten()
    }
}

/// Decoded bitmaps, borrowed from the asset source.
pub struct AssetTable<'a> {
    interactive_background: Bmp<'a, Rgb565>,
    ambient_background: Bmp<'a, Rgb565>,
    overlays: Vec<Bmp<'a, Rgb565>, OVERLAY_FRAMES>,
}

impl<'a> AssetTable<'a> {
    /// Decode every asset up front. The first missing or undecodable asset
    /// aborts the load.
    pub fn load<S: AssetSource + ?Sized>(source: &'a S) -> Result<Self, FaceError> {
        let interactive_background = decode(source, AssetId::InteractiveBackground)?;
        let ambient_background = decode(source, AssetId::AmbientBackground)?;

        let mut overlays = Vec::new();
        for index in 0..OVERLAY_FRAMES as u8 {
            // Capacity is exactly OVERLAY_FRAMES
            let _ = overlays.push(decode(source, AssetId::Overlay(index))?);
        }

        info!("loaded 2 backgrounds and {} overlay frames", overlays.len());

        Ok(Self {
            interactive_background,
            ambient_background,
            overlays,
        })
    }

    pub fn background(&self, kind: BackgroundKind) -> &Bmp<'a, Rgb565> {
        match kind {
            BackgroundKind::Interactive => &self.interactive_background,
            BackgroundKind::Ambient => &self.ambient_background,
        }
    }

    pub fn overlay(&self, frame: usize) -> Option<&Bmp<'a, Rgb565>> {
        self.overlays.get(frame)
    }
}

fn decode<'a, S: AssetSource + ?Sized>(
    source: &'a S,
    id: AssetId,
) -> Result<Bmp<'a, Rgb565>, FaceError> {
    let bytes = source.asset(id).ok_or_else(|| {
        error!("asset {:?} not found", id);
        FaceError::MissingAsset(id)
    })?;
    Bmp::from_slice(bytes).map_err(|e| {
        error!("asset {:?} could not be decoded: {:?}", id, e);
        FaceError::MalformedAsset(id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::PlaceholderAssets;
    use embedded_graphics::geometry::OriginDimensions;

    struct Without<'a> {
        inner: &'a PlaceholderAssets,
        missing: AssetId,
    }

    impl AssetSource for Without<'_> {
        fn asset(&self, id: AssetId) -> Option<&[u8]> {
            if id == self.missing {
                None
            } else {
                self.inner.asset(id)
            }
        }
    }

    struct Garbage;

    impl AssetSource for Garbage {
        fn asset(&self, _id: AssetId) -> Option<&[u8]> {
            Some(b"not a bitmap")
        }
    }

    #[test]
    fn test_asset_ids_cover_every_ordinal() {
        for (expected, id) in AssetId::all().enumerate() {
            assert_eq!(id.ordinal(), expected);
        }
        assert_eq!(AssetId::all().count(), ASSET_COUNT);
    }

    #[test]
    fn test_load_complete_source() {
        let source = PlaceholderAssets::generate().unwrap();
        let table = AssetTable::load(&source).unwrap();

        assert!(table.overlay(0).is_some());
        assert!(table.overlay(OVERLAY_FRAMES - 1).is_some());
        assert!(table.overlay(OVERLAY_FRAMES).is_none());
        assert_eq!(
            table.background(BackgroundKind::Interactive).size(),
            table.background(BackgroundKind::Ambient).size()
        );
    }

    #[test]
    fn test_missing_overlay_aborts_load() {
        let inner = PlaceholderAssets::generate().unwrap();
        let source = Without {
            inner: &inner,
            missing: AssetId::Overlay(13),
        };
        assert_eq!(
            AssetTable::load(&source).err(),
            Some(FaceError::MissingAsset(AssetId::Overlay(13)))
        );
    }

    #[test]
    fn test_missing_background_aborts_load() {
        let inner = PlaceholderAssets::generate().unwrap();
        let source = Without {
            inner: &inner,
            missing: AssetId::AmbientBackground,
        };
        assert_eq!(
            AssetTable::load(&source).err(),
            Some(FaceError::MissingAsset(AssetId::AmbientBackground))
        );
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        assert_eq!(
            AssetTable::load(&Garbage).err(),
            Some(FaceError::MalformedAsset(AssetId::InteractiveBackground))
        );
    }

    #[test]
    fn test_static_array_source() {
        let owned = PlaceholderAssets::generate().unwrap();
        let mut baked: [Option<&[u8]>; ASSET_COUNT] = [None; ASSET_COUNT];
        for id in AssetId::all() {
            baked[id.ordinal()] = owned.asset(id);
        }
        assert!(AssetTable::load(&baked).is_ok());

        baked[AssetId::Overlay(0).ordinal()] = None;
        assert_eq!(
            AssetTable::load(&baked).err(),
            Some(FaceError::MissingAsset(AssetId::Overlay(0)))
        );
    }
}
