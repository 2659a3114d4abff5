//! Description of a single frame, independent of any draw target

use embedded_graphics::geometry::Point;
use heapless::Vec;

use crate::assets::OVERLAY_SLOTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundKind {
    Interactive,
    /// Low-power background for ambient mode
    Ambient,
}

/// Arc centred on the face, in degrees with 0° at 3 o'clock and positive
/// angles running clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub radius: u32,
    pub start_deg: f32,
    pub sweep_deg: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayPlacement {
    /// Overlay animation frame to draw
    pub frame: usize,
    /// Hour slot on the dial, `0..OVERLAY_SLOTS`
    pub slot: usize,
    /// Top-left corner of the image
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    /// Animation frame index this plan was built for
    pub frame: usize,
    pub background: BackgroundKind,
    /// Absent in ambient mode
    pub second_arc: Option<ArcSpec>,
    pub minute_arc: ArcSpec,
    /// Drawn in order, after the arcs
    pub overlays: Vec<OverlayPlacement, OVERLAY_SLOTS>,
}
