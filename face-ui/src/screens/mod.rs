mod ambient;
mod interactive;

pub use ambient::AmbientScreen;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::image::Image;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Drawable;
use enum_dispatch::enum_dispatch;
pub use interactive::InteractiveScreen;

use crate::assets::AssetTable;
use crate::frame::{ArcSpec, FramePlan};
use crate::primitives::{HandArc, KeyedImage};
use crate::{FaceConfig, FaceDrawTarget};

/// Everything a screen needs to render one planned frame.
pub struct DrawFrameContext<'a, 'b> {
    pub plan: &'b FramePlan,
    pub assets: &'b AssetTable<'a>,
    pub config: &'b FaceConfig,
    /// Fill colour behind the background bitmap
    pub background: Rgb565,
    pub bounds: Rectangle,
    /// Render ambient frames for a display with few bits per channel
    pub low_bit: bool,
}

impl DrawFrameContext<'_, '_> {
    fn center(&self) -> Point {
        let size = self.bounds.size;
        self.bounds.top_left + Size::new(size.width / 2, size.height / 2)
    }
}

#[enum_dispatch(Screens<DT, E>)]
pub trait Screen<DT: FaceDrawTarget<E>, E> {
    fn draw_frame(&mut self, display: &mut DT, ctx: &DrawFrameContext<'_, '_>) -> Result<(), E>;
}

#[enum_dispatch]
pub enum Screens<DT: FaceDrawTarget<E>, E> {
    Interactive(InteractiveScreen<DT, E>),
    Ambient(AmbientScreen<DT, E>),
}

impl<DT: FaceDrawTarget<E>, E> Screens<DT, E> {
    pub fn for_mode(ambient: bool) -> Self {
        if ambient {
            AmbientScreen::default().into()
        } else {
            InteractiveScreen::default().into()
        }
    }
}

fn draw_background<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    ctx: &DrawFrameContext<'_, '_>,
) -> Result<(), D::Error> {
    display.fill_solid(&ctx.bounds, ctx.background)?;
    let bmp = ctx.assets.background(ctx.plan.background);
    Image::new(bmp, ctx.bounds.top_left).draw(display)
}

fn draw_arc<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    ctx: &DrawFrameContext<'_, '_>,
    spec: &ArcSpec,
) -> Result<(), D::Error> {
    HandArc::new(
        ctx.center(),
        spec,
        ctx.config.hand_stroke,
        ctx.config.hand_color.into(),
    )
    .draw(display)
}

fn draw_overlays<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    ctx: &DrawFrameContext<'_, '_>,
) -> Result<(), D::Error> {
    let key = ctx.config.overlay_key.map(Rgb565::from);
    for overlay in &ctx.plan.overlays {
        if let Some(bmp) = ctx.assets.overlay(overlay.frame) {
            KeyedImage::new(bmp, ctx.bounds.top_left + overlay.position, key).draw(display)?;
        }
    }
    Ok(())
}
