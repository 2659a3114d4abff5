//! Clock state and per-frame hand geometry
//!
//! All animation state of the face lives here. Every call to
//! [`ClockState::plan_frame`] advances it by exactly one frame.

use chrono::{DateTime, FixedOffset, Timelike};
use heapless::Vec;

use crate::assets::{OVERLAY_FRAMES, OVERLAY_POSITIONS, OVERLAY_SLOTS};
use crate::frame::{ArcSpec, BackgroundKind, FramePlan, OverlayPlacement};
use crate::FaceConfig;

/// Local wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    /// 0-23
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockTime {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Convert milliseconds since the Unix epoch to local time at `offset`.
    ///
    /// Returns `None` if the timestamp is outside the representable range.
    pub fn from_epoch_millis(millis: i64, offset: FixedOffset) -> Option<Self> {
        let local = DateTime::from_timestamp_millis(millis)?.with_timezone(&offset);
        Some(Self::new(
            local.hour() as u8,
            local.minute() as u8,
            local.second() as u8,
        ))
    }

    /// Hour slot on a 12-hour dial
    pub fn dial_hour(&self) -> usize {
        self.hour as usize % OVERLAY_SLOTS
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClockState {
    time: ClockTime,
    /// Overlay animation frame, `0..OVERLAY_FRAMES`
    frame: usize,
    second_fill: f32,
    minute_fill: f32,
    /// Frames drawn since the second last changed
    second_fraction: u32,
    last_second: Option<u8>,
    ambient: bool,
    tap_count: u32,
}

impl ClockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn second_fill(&self) -> f32 {
        self.second_fill
    }

    pub fn minute_fill(&self) -> f32 {
        self.minute_fill
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    /// Returns whether the mode actually changed.
    pub fn set_ambient(&mut self, ambient: bool) -> bool {
        let changed = self.ambient != ambient;
        self.ambient = ambient;
        changed
    }

    /// Count a completed tap and return the new total.
    pub fn register_tap(&mut self) -> u32 {
        self.tap_count = self.tap_count.wrapping_add(1);
        self.tap_count
    }

    /// Advance the animation by one frame and describe what to draw.
    pub fn plan_frame(&mut self, time: ClockTime, config: &FaceConfig) -> FramePlan {
        self.time = time;
        self.frame = (self.frame + 1) % OVERLAY_FRAMES;

        if self.last_second != Some(time.second) {
            self.last_second = Some(time.second);
            self.second_fraction = 0;
        }

        let second_rot = time.second as f32 / 60.0 * 360.0
            + config.second_nudge_deg * self.second_fraction as f32;
        let minute_rot = time.minute as f32 / 60.0 * 360.0;
        let start = config.arc_start_deg;
        let hour_slot = time.dial_hour();

        let regular_minute = ArcSpec {
            radius: config.minute_radius,
            start_deg: start,
            sweep_deg: 360.0 - minute_rot,
        };

        let mut overlays = Vec::new();
        let plan = if self.ambient {
            // One static overlay marks the current hour.
            let _ = overlays.push(OverlayPlacement {
                frame: 0,
                slot: hour_slot,
                position: OVERLAY_POSITIONS[hour_slot],
            });

            FramePlan {
                frame: self.frame,
                background: BackgroundKind::Ambient,
                second_arc: None,
                minute_arc: regular_minute,
                overlays,
            }
        } else {
            let second_arc = if time.second == 0 {
                let arc = ArcSpec {
                    radius: config.second_radius,
                    start_deg: start - self.second_fill,
                    sweep_deg: self.second_fill - second_rot,
                };
                self.second_fill += config.fill_step_deg;
                arc
            } else {
                self.second_fill = 0.0;
                ArcSpec {
                    radius: config.second_radius,
                    start_deg: start,
                    sweep_deg: 360.0 - second_rot,
                }
            };

            let minute_arc = if time.minute == 0 && time.second == 0 {
                let arc = ArcSpec {
                    radius: config.minute_radius,
                    start_deg: start - self.minute_fill,
                    sweep_deg: self.minute_fill - second_rot,
                };
                self.minute_fill += config.fill_step_deg;
                arc
            } else {
                self.minute_fill = 0.0;
                regular_minute
            };

            for slot in hour_slot..OVERLAY_SLOTS {
                let _ = overlays.push(OverlayPlacement {
                    frame: self.frame,
                    slot,
                    position: OVERLAY_POSITIONS[slot],
                });
            }

            FramePlan {
                frame: self.frame,
                background: BackgroundKind::Interactive,
                second_arc: Some(second_arc),
                minute_arc,
                overlays,
            }
        };

        self.second_fraction = self.second_fraction.saturating_add(1);
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> FaceConfig {
        FaceConfig::default()
    }

    #[test]
    fn test_from_epoch_millis_applies_offset() {
        // 2024-03-03 13:45:30 UTC
        let millis = 1_709_473_530_000;
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            ClockTime::from_epoch_millis(millis, utc),
            Some(ClockTime::new(13, 45, 30))
        );

        let cet = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            ClockTime::from_epoch_millis(millis, cet),
            Some(ClockTime::new(14, 45, 30))
        );
    }

    #[test]
    fn test_from_epoch_millis_out_of_range() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(ClockTime::from_epoch_millis(i64::MAX, utc), None);
    }

    #[test]
    fn test_dial_hour_wraps_at_twelve() {
        assert_eq!(ClockTime::new(0, 0, 0).dial_hour(), 0);
        assert_eq!(ClockTime::new(12, 0, 0).dial_hour(), 0);
        assert_eq!(ClockTime::new(23, 0, 0).dial_hour(), 11);
    }

    #[test]
    fn test_frame_index_cycles() {
        let mut state = ClockState::new();
        let time = ClockTime::new(10, 10, 10);
        let mut seen = [false; OVERLAY_FRAMES];

        for _ in 0..OVERLAY_FRAMES {
            let plan = state.plan_frame(time, &config());
            assert_eq!(plan.frame, state.frame());
            seen[plan.frame] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(state.frame(), 0);

        state.plan_frame(time, &config());
        assert_eq!(state.frame(), 1);
    }

    #[test]
    fn test_frame_index_advances_in_ambient() {
        let mut state = ClockState::new();
        state.set_ambient(true);
        state.plan_frame(ClockTime::new(1, 2, 3), &config());
        state.plan_frame(ClockTime::new(1, 2, 3), &config());
        assert_eq!(state.frame(), 2);
    }

    #[test]
    fn test_minute_fill_grows_at_top_of_hour() {
        let mut state = ClockState::new();
        let top = ClockTime::new(9, 0, 0);

        let first = state.plan_frame(top, &config());
        assert_eq!(first.minute_arc.start_deg, -75.0);
        assert_eq!(state.minute_fill(), 27.0);

        let second = state.plan_frame(top, &config());
        assert_eq!(second.minute_arc.start_deg, -75.0 - 27.0);
        assert_eq!(state.minute_fill(), 54.0);

        state.plan_frame(top, &config());
        assert_eq!(state.minute_fill(), 81.0);

        state.plan_frame(ClockTime::new(9, 0, 1), &config());
        assert_eq!(state.minute_fill(), 0.0);
    }

    #[test]
    fn test_minute_fill_needs_zero_seconds() {
        let mut state = ClockState::new();
        state.plan_frame(ClockTime::new(9, 0, 30), &config());
        state.plan_frame(ClockTime::new(9, 0, 30), &config());
        assert_eq!(state.minute_fill(), 0.0);
    }

    #[test]
    fn test_second_fill_grows_at_top_of_minute() {
        let mut state = ClockState::new();
        let top = ClockTime::new(9, 15, 0);

        let plan = state.plan_frame(top, &config());
        let arc = plan.second_arc.unwrap();
        assert_eq!(arc.start_deg, -75.0);
        assert_eq!(arc.sweep_deg, 0.0);
        assert_eq!(state.second_fill(), 27.0);
        // Minute hand is not filling outside the top of the hour.
        assert_eq!(state.minute_fill(), 0.0);

        let plan = state.plan_frame(top, &config());
        let arc = plan.second_arc.unwrap();
        assert_eq!(arc.start_deg, -102.0);
        // 27° of fill minus one frame of nudge
        assert!((arc.sweep_deg - (27.0 - 0.45)).abs() < 1e-4);

        state.plan_frame(ClockTime::new(9, 15, 1), &config());
        assert_eq!(state.second_fill(), 0.0);
    }

    #[test]
    fn test_regular_arcs() {
        let mut state = ClockState::new();
        let plan = state.plan_frame(ClockTime::new(3, 15, 30), &config());

        let second = plan.second_arc.unwrap();
        assert_eq!(second.radius, 60);
        assert_eq!(second.start_deg, -75.0);
        assert_eq!(second.sweep_deg, 180.0);

        assert_eq!(plan.minute_arc.radius, 103);
        assert_eq!(plan.minute_arc.sweep_deg, 270.0);
    }

    #[test]
    fn test_second_nudge_resets_on_new_second() {
        let mut state = ClockState::new();
        let t = ClockTime::new(3, 15, 30);

        state.plan_frame(t, &config());
        state.plan_frame(t, &config());
        let nudged = state.plan_frame(t, &config()).second_arc.unwrap();
        assert!((nudged.sweep_deg - (180.0 - 0.9)).abs() < 1e-4);

        let next = state
            .plan_frame(ClockTime::new(3, 15, 31), &config())
            .second_arc
            .unwrap();
        assert!((next.sweep_deg - 174.0).abs() < 1e-4);
    }

    #[test]
    fn test_overlays_from_current_hour_in_order() {
        let mut state = ClockState::new();
        let plan = state.plan_frame(ClockTime::new(20, 5, 5), &config());

        let slots: std::vec::Vec<usize> = plan.overlays.iter().map(|o| o.slot).collect();
        assert_eq!(slots, [8, 9, 10, 11]);
        for overlay in &plan.overlays {
            assert_eq!(overlay.frame, plan.frame);
            assert_eq!(overlay.position, OVERLAY_POSITIONS[overlay.slot]);
        }
    }

    #[test]
    fn test_overlays_at_midnight_cover_whole_dial() {
        let mut state = ClockState::new();
        let plan = state.plan_frame(ClockTime::new(0, 5, 5), &config());
        assert_eq!(plan.overlays.len(), OVERLAY_SLOTS);
    }

    #[test]
    fn test_ambient_plan_is_static() {
        let mut state = ClockState::new();
        state.set_ambient(true);
        let plan = state.plan_frame(ClockTime::new(0, 0, 0), &config());

        assert_eq!(plan.background, BackgroundKind::Ambient);
        assert!(plan.second_arc.is_none());
        assert_eq!(plan.minute_arc.start_deg, -75.0);
        assert_eq!(plan.minute_arc.sweep_deg, 360.0);
        assert_eq!(plan.overlays.len(), 1);
        assert_eq!(plan.overlays[0].frame, 0);
        assert_eq!(state.minute_fill(), 0.0);
        assert_eq!(state.second_fill(), 0.0);
    }

    #[test]
    fn test_set_ambient_reports_change() {
        let mut state = ClockState::new();
        assert!(!state.set_ambient(false));
        assert!(state.set_ambient(true));
        assert!(!state.set_ambient(true));
        assert!(state.is_ambient());
    }

    #[test]
    fn test_register_tap_counts() {
        let mut state = ClockState::new();
        assert_eq!(state.register_tap(), 1);
        assert_eq!(state.register_tap(), 2);
        assert_eq!(state.tap_count(), 2);
    }

    proptest! {
        #[test]
        fn prop_frame_index_follows_draw_count(draws in 0usize..200, ambient in any::<bool>()) {
            let mut state = ClockState::new();
            state.set_ambient(ambient);
            for _ in 0..draws {
                let plan = state.plan_frame(ClockTime::new(4, 20, 0), &config());
                prop_assert!(plan.frame < OVERLAY_FRAMES);
            }
            prop_assert_eq!(state.frame(), draws % OVERLAY_FRAMES);
        }

        #[test]
        fn prop_overlays_start_at_dial_hour(hour in 0u8..24, minute in 0u8..60, second in 0u8..60) {
            let mut state = ClockState::new();
            let plan = state.plan_frame(ClockTime::new(hour, minute, second), &config());
            let dial = hour as usize % 12;
            prop_assert_eq!(plan.overlays.len(), OVERLAY_SLOTS - dial);
            for (i, overlay) in plan.overlays.iter().enumerate() {
                prop_assert_eq!(overlay.slot, dial + i);
            }
        }
    }
}
