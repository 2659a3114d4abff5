use super::{draw_arc, draw_background, draw_overlays, DrawFrameContext, Screen};
use crate::FaceDrawTarget;

/// Full-detail face: both arcs and the animated overlays.
pub struct InteractiveScreen<DT, E> {
    _phantom: core::marker::PhantomData<(DT, E)>,
}

impl<DT: FaceDrawTarget<E>, E> Screen<DT, E> for InteractiveScreen<DT, E> {
    fn draw_frame(&mut self, display: &mut DT, ctx: &DrawFrameContext<'_, '_>) -> Result<(), E> {
        draw_background(display, ctx)?;
        if let Some(second) = &ctx.plan.second_arc {
            draw_arc(display, ctx, second)?;
        }
        draw_arc(display, ctx, &ctx.plan.minute_arc)?;
        draw_overlays(display, ctx)
    }
}

impl<DT: FaceDrawTarget<E>, E> Default for InteractiveScreen<DT, E> {
    fn default() -> Self {
        Self {
            _phantom: core::marker::PhantomData,
        }
    }
}
