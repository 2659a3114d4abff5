use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor, WebColors};

use crate::FaceError;

pub const COLOR_FATAL: Rgb565 = Rgb565::RED;
pub const COLOR_FATAL_TEXT: Rgb565 = Rgb565::BLACK;
pub const COLOR_VERSION: Rgb565 = Rgb565::CSS_PALE_GOLDENROD;

/// Face dimension the overlay placement table is laid out for.
pub const FACE_SIZE: u32 = 320;

/// `0xRRGGBB` colour as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(transparent))]
pub struct HexColor(pub u32);

impl From<HexColor> for Rgb565 {
    fn from(color: HexColor) -> Self {
        let [_, r, g, b] = color.0.to_be_bytes();
        Rgb888::new(r, g, b).into()
    }
}

/// Tunables of the face. Defaults reproduce the stock look.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct FaceConfig {
    /// Redraw period in interactive mode
    pub update_period_ms: u32,
    /// Radius of the second arc in pixels
    pub second_radius: u32,
    /// Radius of the minute arc in pixels
    pub minute_radius: u32,
    /// Angle both arcs start from, 0° being 3 o'clock
    pub arc_start_deg: f32,
    /// Growth of a fill-in sweep per frame
    pub fill_step_deg: f32,
    /// Extra rotation of the second arc per frame drawn within one second
    pub second_nudge_deg: f32,
    pub hand_stroke: u32,
    pub hand_color: HexColor,
    /// Background colour for an even tap count
    pub background: HexColor,
    /// Background colour for an odd tap count
    pub background_alt: HexColor,
    /// Overlay pixels of this colour are left undrawn
    pub overlay_key: Option<HexColor>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            update_period_ms: 75,
            second_radius: 60,
            minute_radius: 103,
            arc_start_deg: -75.0,
            fill_step_deg: 27.0,
            second_nudge_deg: 0.45,
            hand_stroke: 3,
            hand_color: HexColor(0xAAAAAA),
            background: HexColor(0x000000),
            background_alt: HexColor(0x8B0000),
            overlay_key: Some(HexColor(0xFF00FF)),
        }
    }
}

impl FaceConfig {
    pub fn validate(&self) -> Result<(), FaceError> {
        if self.update_period_ms == 0 {
            return Err(FaceError::InvalidConfig("update period must be positive"));
        }
        if self.second_radius == 0 || self.minute_radius == 0 {
            return Err(FaceError::InvalidConfig("hand radius must be positive"));
        }
        if self.hand_stroke == 0 {
            return Err(FaceError::InvalidConfig("hand stroke must be positive"));
        }
        if !(self.arc_start_deg.is_finite()
            && self.fill_step_deg.is_finite()
            && self.second_nudge_deg.is_finite())
        {
            return Err(FaceError::InvalidConfig("angles must be finite"));
        }
        Ok(())
    }

    /// Background colour for the given tap count.
    pub fn background_for_taps(&self, tap_count: u32) -> Rgb565 {
        if tap_count % 2 == 0 {
            self.background.into()
        } else {
            self.background_alt.into()
        }
    }
}
