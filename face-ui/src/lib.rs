//! Zodiac Light: an analog watch face for `embedded-graphics` displays
//!
//! Two arcs show the seconds and minutes, and an animated flame burns on
//! every hour still to come. The face is a plain state object: the host
//! forwards draw, timer, visibility, ambient, tap and time-zone events to
//! [`WatchFace`] and provides the services in [`FaceHost`].

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;

pub mod assets;
pub mod clock;
pub mod config;
mod error;
mod face;
mod fatal;
mod fonts;
pub mod frame;
mod lowbit;
#[cfg(any(test, feature = "std"))]
pub mod placeholder;
mod primitives;
mod screens;
#[cfg(test)]
mod testing;
pub mod timer;

pub trait HintRefresh {
    fn hint_refresh(&mut self);
}

pub trait FaceDrawTarget<E>: DrawTarget<Color = Rgb565, Error = E> + HintRefresh {}
impl<E, D: DrawTarget<Color = Rgb565, Error = E> + HintRefresh> FaceDrawTarget<E> for D {}

pub use fugit;

pub use assets::{AssetId, AssetSource};
pub use clock::{ClockState, ClockTime};
pub use config::{FaceConfig, HexColor};
pub use error::FaceError;
pub use face::{FaceHost, FaceProperties, TapKind, WatchFace};
pub use fatal::draw_fatal_screen;
pub use lowbit::LowBit;
pub use screens::{AmbientScreen, DrawFrameContext, InteractiveScreen, Screen, Screens};
