use std::convert::Infallible;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{FixedOffset, Local, Offset};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;
use embedded_graphics_simulator::SimulatorDisplay;
use face_ui::fugit::MillisDurationU64;
use face_ui::{FaceHost, HintRefresh};
use log::debug;
use tokio::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(10);

/// Host services backed by the desktop clock and tokio timers.
pub struct SimHost {
    next_tick: Option<Instant>,
    redraw: bool,
    time_zone_listener: bool,
    report_offset: bool,
    offset: FixedOffset,
    last_minute: u64,
}

impl SimHost {
    pub fn new() -> Self {
        let mut host = Self {
            next_tick: None,
            redraw: true,
            time_zone_listener: false,
            report_offset: false,
            offset: Local::now().offset().fix(),
            last_minute: 0,
        };
        host.last_minute = host.now_millis() / 60_000;
        host
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Move the simulated time zone east by `hours`, wrapping within the
    /// range real zones use.
    pub fn shift_offset(&mut self, hours: i32) {
        let mut secs = self.offset.local_minus_utc() + hours * 3600;
        if secs > 14 * 3600 {
            secs -= 26 * 3600;
        }
        if let Some(offset) = FixedOffset::east_opt(secs) {
            self.offset = offset;
            self.report_offset = self.time_zone_listener;
        }
    }

    /// Whether a time-zone change should be delivered to the face.
    pub fn take_offset_report(&mut self) -> bool {
        std::mem::take(&mut self.report_offset)
    }

    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// True once per wall-clock minute.
    pub fn minute_rolled_over(&mut self) -> bool {
        let minute = self.now_millis() / 60_000;
        if minute != self.last_minute {
            self.last_minute = minute;
            true
        } else {
            false
        }
    }

    /// Consume the pending tick if it is due.
    pub fn tick_due(&mut self) -> bool {
        match self.next_tick {
            Some(at) if at <= Instant::now() => {
                self.next_tick = None;
                true
            }
            _ => false,
        }
    }

    /// How long the event loop may sleep.
    pub fn idle_time(&self) -> Duration {
        match self.next_tick {
            Some(at) => at.saturating_duration_since(Instant::now()).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }
}

impl FaceHost for SimHost {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn invalidate(&mut self) {
        self.redraw = true;
    }

    fn schedule_tick(&mut self, delay: MillisDurationU64) {
        self.next_tick = Some(Instant::now() + Duration::from_millis(delay.ticks()));
    }

    fn cancel_tick(&mut self) {
        self.next_tick = None;
    }

    fn set_time_zone_listener(&mut self, enabled: bool) {
        debug!("time zone listener {}", if enabled { "on" } else { "off" });
        self.time_zone_listener = enabled;
        // Catch up on changes made while nobody listened.
        self.report_offset = enabled;
    }
}

/// Simulator display that remembers when a frame was completed.
pub struct SimCanvas {
    display: SimulatorDisplay<Rgb565>,
    frame_ready: bool,
}

impl SimCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            display: SimulatorDisplay::new(size),
            frame_ready: false,
        }
    }

    pub fn display(&self) -> &SimulatorDisplay<Rgb565> {
        &self.display
    }

    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }
}

impl OriginDimensions for SimCanvas {
    fn size(&self) -> Size {
        self.display.size()
    }
}

impl DrawTarget for SimCanvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.display.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.display.fill_contiguous(area, colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.display.fill_solid(area, color)
    }
}

impl HintRefresh for SimCanvas {
    fn hint_refresh(&mut self) {
        self.frame_ready = true;
    }
}
