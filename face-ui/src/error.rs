//! Face construction errors

use core::fmt;

use ufmt::{uDisplay, uWrite, Formatter};

use crate::assets::AssetId;

/// Reasons the face refuses to start.
///
/// Once constructed, every callback of the face is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceError {
    /// The asset source has no bytes for this asset
    MissingAsset(AssetId),
    /// The bytes for this asset are not a bitmap tinybmp can decode
    MalformedAsset(AssetId),
    /// A configuration value is out of range
    InvalidConfig(&'static str),
}

impl FaceError {
    fn describe(&self) -> (&'static str, Option<AssetId>) {
        match self {
            FaceError::MissingAsset(id) => ("missing asset ", Some(*id)),
            FaceError::MalformedAsset(id) => ("malformed asset ", Some(*id)),
            FaceError::InvalidConfig(reason) => (reason, None),
        }
    }
}

impl fmt::Display for FaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, id) = self.describe();
        f.write_str(prefix)?;
        match id {
            Some(AssetId::InteractiveBackground) => f.write_str("interactive background"),
            Some(AssetId::AmbientBackground) => f.write_str("ambient background"),
            Some(AssetId::Overlay(index)) => write!(f, "overlay {}", index),
            None => Ok(()),
        }
    }
}

impl uDisplay for FaceError {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let (prefix, id) = self.describe();
        f.write_str(prefix)?;
        match id {
            Some(AssetId::InteractiveBackground) => f.write_str("interactive background"),
            Some(AssetId::AmbientBackground) => f.write_str("ambient background"),
            Some(AssetId::Overlay(index)) => {
                f.write_str("overlay ")?;
                uDisplay::fmt(&index, f)
            }
            None => Ok(()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FaceError {}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;
    use ufmt::uwrite;

    #[test]
    fn test_display_names_the_asset() {
        use core::fmt::Write;

        let mut s = String::<64>::new();
        write!(s, "{}", FaceError::MissingAsset(AssetId::Overlay(7))).unwrap();
        assert_eq!(s.as_str(), "missing asset overlay 7");
    }

    #[test]
    fn test_udisplay_matches_display() {
        let mut s = String::<64>::new();
        uwrite!(s, "{}", FaceError::MalformedAsset(AssetId::AmbientBackground)).unwrap();
        assert_eq!(s.as_str(), "malformed asset ambient background");

        s.clear();
        uwrite!(s, "{}", FaceError::InvalidConfig("update period must be positive")).unwrap();
        assert_eq!(s.as_str(), "update period must be positive");
    }
}
