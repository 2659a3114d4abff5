//! The watch face and its host callback interface
//!
//! The host owns the display, the wall clock, the tick timer and the input
//! events. It forwards each event to the matching `on_*` method of
//! [`WatchFace`], and the face asks for redraws and ticks through
//! [`FaceHost`]. All calls are expected on one thread.

use chrono::{FixedOffset, Offset, Utc};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use fugit::MillisDurationU64;
use log::{debug, info, trace, warn};

use crate::assets::{AssetSource, AssetTable};
use crate::clock::{ClockState, ClockTime};
use crate::screens::{DrawFrameContext, Screen, Screens};
use crate::timer::FrameTimer;
use crate::{FaceConfig, FaceDrawTarget, FaceError};

/// Services the face needs from its host.
pub trait FaceHost {
    /// Wall clock, milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;

    /// Request an `on_draw` call as soon as convenient.
    fn invalidate(&mut self);

    /// Call `on_tick` after `delay`. Replaces any pending tick.
    fn schedule_tick(&mut self, delay: MillisDurationU64);

    /// Drop the pending tick, if any.
    fn cancel_tick(&mut self);

    /// Start or stop forwarding time-zone changes to `on_time_zone_changed`.
    ///
    /// When enabling, the host should also report the current offset since
    /// it may have changed while nobody was listening.
    fn set_time_zone_listener(&mut self, enabled: bool);
}

/// Stage of a touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKind {
    /// Finger went down
    Touch,
    /// Gesture turned into something else
    TouchCancel,
    /// Tap completed
    Tap,
}

/// Display capabilities reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceProperties {
    /// Ambient mode supports only a few bits per colour channel
    pub low_bit_ambient: bool,
}

pub struct WatchFace<'a> {
    config: FaceConfig,
    assets: AssetTable<'a>,
    clock: ClockState,
    timer: FrameTimer,
    offset: FixedOffset,
    visible: bool,
    properties: FaceProperties,
    time_zone_listener: bool,
    background: Rgb565,
}

impl<'a> WatchFace<'a> {
    /// Validate `config` and decode every asset. Fails on the first problem.
    pub fn new<S: AssetSource + ?Sized>(
        config: FaceConfig,
        assets: &'a S,
    ) -> Result<Self, FaceError> {
        config.validate()?;
        let assets = AssetTable::load(assets)?;
        let timer = FrameTimer::new(config.update_period_ms);
        let background = config.background_for_taps(0);

        info!(
            "watch face ready, interactive period {} ms",
            config.update_period_ms
        );

        Ok(Self {
            config,
            assets,
            clock: ClockState::new(),
            timer,
            offset: Utc.fix(),
            visible: false,
            properties: FaceProperties::default(),
            time_zone_listener: false,
            background,
        })
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_ambient(&self) -> bool {
        self.clock.is_ambient()
    }

    pub fn background_color(&self) -> Rgb565 {
        self.background
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Render one frame into `bounds` using the wall-clock time `now_ms`.
    pub fn on_draw<D: FaceDrawTarget<E>, E>(
        &mut self,
        display: &mut D,
        bounds: Rectangle,
        now_ms: u64,
    ) -> Result<(), E> {
        let time = i64::try_from(now_ms)
            .ok()
            .and_then(|ms| ClockTime::from_epoch_millis(ms, self.offset))
            .unwrap_or_else(|| {
                warn!("timestamp {} out of range, keeping last time", now_ms);
                self.clock.time()
            });

        let plan = self.clock.plan_frame(time, &self.config);
        let ctx = DrawFrameContext {
            plan: &plan,
            assets: &self.assets,
            config: &self.config,
            background: self.background,
            bounds,
            low_bit: self.properties.low_bit_ambient,
        };

        let mut screen = Screens::<D, E>::for_mode(self.clock.is_ambient());
        screen.draw_frame(display, &ctx)?;
        display.hint_refresh();
        Ok(())
    }

    /// Timer callback: redraw and, while the timer should run, re-arm it on
    /// the next period boundary.
    pub fn on_tick<H: FaceHost + ?Sized>(&mut self, host: &mut H) {
        host.invalidate();
        if self.timer_should_run() {
            let delay = self.timer.delay_until_next(host.now_millis());
            trace!("next tick in {} ms", delay.ticks());
            host.schedule_tick(delay);
        }
    }

    /// Once-a-minute system tick, delivered in every mode.
    pub fn on_time_tick<H: FaceHost + ?Sized>(&mut self, host: &mut H) {
        host.invalidate();
    }

    pub fn on_visibility_changed<H: FaceHost + ?Sized>(&mut self, visible: bool, host: &mut H) {
        self.visible = visible;
        self.set_time_zone_listener(visible, host);
        self.update_timer(host);
    }

    pub fn on_ambient_mode_changed<H: FaceHost + ?Sized>(&mut self, ambient: bool, host: &mut H) {
        if self.clock.set_ambient(ambient) {
            debug!("ambient mode {}", if ambient { "on" } else { "off" });
            host.invalidate();
        }
        self.update_timer(host);
    }

    /// A completed tap flips the background colour; every stage of the
    /// gesture requests a redraw.
    pub fn on_tap<H: FaceHost + ?Sized>(
        &mut self,
        kind: TapKind,
        x: i32,
        y: i32,
        host: &mut H,
    ) {
        if kind == TapKind::Tap {
            let count = self.clock.register_tap();
            self.background = self.config.background_for_taps(count);
            debug!("tap #{} at ({}, {})", count, x, y);
        }
        host.invalidate();
    }

    pub fn on_time_zone_changed<H: FaceHost + ?Sized>(
        &mut self,
        offset: FixedOffset,
        host: &mut H,
    ) {
        if self.offset != offset {
            debug!("utc offset now {} s", offset.local_minus_utc());
        }
        self.offset = offset;
        host.invalidate();
    }

    pub fn on_properties_changed(&mut self, properties: FaceProperties) {
        self.properties = properties;
    }

    /// Teardown: nothing may fire after this.
    pub fn on_destroy<H: FaceHost + ?Sized>(&mut self, host: &mut H) {
        host.cancel_tick();
        self.set_time_zone_listener(false, host);
    }

    fn timer_should_run(&self) -> bool {
        FrameTimer::should_run(self.visible, self.clock.is_ambient())
    }

    fn update_timer<H: FaceHost + ?Sized>(&mut self, host: &mut H) {
        host.cancel_tick();
        if self.timer_should_run() {
            trace!("timer armed");
            host.schedule_tick(MillisDurationU64::from_ticks(0));
        } else {
            trace!("timer stopped");
        }
    }

    fn set_time_zone_listener<H: FaceHost + ?Sized>(&mut self, enabled: bool, host: &mut H) {
        if self.time_zone_listener != enabled {
            self.time_zone_listener = enabled;
            host.set_time_zone_listener(enabled);
        }
    }
}
