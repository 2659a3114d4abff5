//! In-memory draw target for tests

use core::convert::Infallible;
use std::vec;
use std::vec::Vec;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::primitives::{PointsIter, Rectangle};
use embedded_graphics::Pixel;

use crate::HintRefresh;

pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
    pub refreshes: usize,
    /// Calls to `fill_contiguous`, i.e. block image transfers
    pub contiguous_fills: usize,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
            refreshes: 0,
            contiguous_fills: 0,
        }
    }

    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    pub fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.pixels[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|c| **c == color).count()
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
                self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.contiguous_fills += 1;
        self.draw_iter(
            area.points()
                .zip(colors)
                .map(|(point, color)| Pixel(point, color)),
        )
    }
}

impl HintRefresh for Canvas {
    fn hint_refresh(&mut self) {
        self.refreshes += 1;
    }
}
