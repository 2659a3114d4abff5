use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{AngleUnit, Point};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{Arc, Primitive, PrimitiveStyle, Styled};
use embedded_graphics::Drawable;

use crate::frame::ArcSpec;

/// Stroked arc around the face centre.
pub struct HandArc {
    arc: Option<Styled<Arc, PrimitiveStyle<Rgb565>>>,
}

impl HandArc {
    pub fn new(center: Point, spec: &ArcSpec, stroke_width: u32, color: Rgb565) -> Self {
        let style = PrimitiveStyle::with_stroke(color, stroke_width);
        let arc = normalize(spec.start_deg, spec.sweep_deg).map(|(start, sweep)| {
            Arc::with_center(center, spec.radius * 2, start.deg(), sweep.deg()).into_styled(style)
        });

        Self { arc }
    }
}

/// Express a sweep of either sign as a clockwise one of at most a full
/// turn. An empty sweep draws nothing.
fn normalize(start: f32, sweep: f32) -> Option<(f32, f32)> {
    if sweep == 0.0 || !sweep.is_finite() || !start.is_finite() {
        return None;
    }
    let (start, sweep) = if sweep < 0.0 {
        (start + sweep, -sweep)
    } else {
        (start, sweep)
    };
    Some((start, sweep.min(360.0)))
}

impl Drawable for HandArc {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        if let Some(arc) = &self.arc {
            arc.draw(target)?;
        }
        Ok(())
    }
}
