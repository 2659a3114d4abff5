use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;

use super::{draw_arc, draw_background, draw_overlays, DrawFrameContext, Screen};
use crate::lowbit::LowBit;
use crate::FaceDrawTarget;

/// Low-power face: background, minute arc and a single static marker.
pub struct AmbientScreen<DT, E> {
    _phantom: core::marker::PhantomData<(DT, E)>,
}

impl<DT: FaceDrawTarget<E>, E> Screen<DT, E> for AmbientScreen<DT, E> {
    fn draw_frame(&mut self, display: &mut DT, ctx: &DrawFrameContext<'_, '_>) -> Result<(), E> {
        if ctx.low_bit {
            draw(&mut LowBit::new(display), ctx)
        } else {
            draw(display, ctx)
        }
    }
}

fn draw<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    ctx: &DrawFrameContext<'_, '_>,
) -> Result<(), D::Error> {
    draw_background(display, ctx)?;
    draw_arc(display, ctx, &ctx.plan.minute_arc)?;
    draw_overlays(display, ctx)
}

impl<DT: FaceDrawTarget<E>, E> Default for AmbientScreen<DT, E> {
    fn default() -> Self {
        Self {
            _phantom: core::marker::PhantomData,
        }
    }
}
