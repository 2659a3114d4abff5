use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::Drawable;
use embedded_graphics::Pixel;
use tinybmp::Bmp;

/// Bitmap drawn with one colour treated as transparent.
///
/// BMP files carry no alpha channel, so overlays mark their empty area with
/// a key colour instead.
pub struct KeyedImage<'a, 'b> {
    bmp: &'b Bmp<'a, Rgb565>,
    position: Point,
    key: Option<Rgb565>,
}

impl<'a, 'b> KeyedImage<'a, 'b> {
    pub fn new(bmp: &'b Bmp<'a, Rgb565>, position: Point, key: Option<Rgb565>) -> Self {
        Self { bmp, position, key }
    }
}

impl Drawable for KeyedImage<'_, '_> {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let key = self.key;
        let offset = self.position;
        target.draw_iter(
            self.bmp
                .pixels()
                .filter(|Pixel(_, color)| Some(*color) != key)
                .map(|Pixel(point, color)| Pixel(point + offset, color)),
        )
    }
}
