use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Dimensions;
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::primitives::{PointsIter, Rectangle};
use embedded_graphics::Pixel;

/// Draw target filter for low-bit ambient displays.
///
/// Every channel is snapped to fully on or fully off, so hands and
/// backgrounds keep their shape without relying on intermediate shades.
pub struct LowBit<'a, DT> {
    target: &'a mut DT,
}

impl<'a, DT: DrawTarget<Color = Rgb565>> LowBit<'a, DT> {
    pub fn new(target: &'a mut DT) -> Self {
        Self { target }
    }

    pub fn map_color(c: Rgb565) -> Rgb565 {
        let snap = |v: u8, max: u8| if v > max / 2 { max } else { 0 };
        Rgb565::new(
            snap(c.r(), Rgb565::MAX_R),
            snap(c.g(), Rgb565::MAX_G),
            snap(c.b(), Rgb565::MAX_B),
        )
    }
}

impl<DT: DrawTarget<Color = Rgb565>> DrawTarget for LowBit<'_, DT> {
    type Color = Rgb565;
    type Error = DT::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.target.draw_iter(
            pixels
                .into_iter()
                .map(|Pixel(p, c)| Pixel(p, Self::map_color(c))),
        )
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.target.draw_iter(
            area.points()
                .zip(colors)
                .map(|(pos, color)| Pixel(pos, Self::map_color(color))),
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.target.fill_solid(area, Self::map_color(color))
    }
}

impl<DT: DrawTarget<Color = Rgb565>> Dimensions for LowBit<'_, DT> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}
