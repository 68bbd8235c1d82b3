//! In-memory draw target for rendering tests.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Records the last color written to each pixel. Out-of-bounds pixels are dropped.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrameRecorder {
    size: Size,
    pixels: Vec<Option<Rgb565>>,
}

impl FrameRecorder {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![None; (size.width * size.height) as usize],
        }
    }

    fn index(
        &self,
        point: Point,
    ) -> Option<usize> {
        let inside =
            point.x >= 0 && point.y >= 0 && (point.x as u32) < self.size.width && (point.y as u32) < self.size.height;
        inside.then(|| point.y as usize * self.size.width as usize + point.x as usize)
    }

    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb565> {
        self.index(point).and_then(|idx| self.pixels[idx])
    }

    pub fn count(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels.iter().filter(|p| **p == Some(color)).count()
    }

    pub fn is_blank(&self) -> bool { self.pixels.iter().all(Option::is_none) }

    /// Whether any pixel within `radius` (square neighbourhood) of `point` has `color`.
    pub fn any_near(
        &self,
        point: Point,
        radius: i32,
        color: Rgb565,
    ) -> bool {
        (-radius..=radius)
            .flat_map(|dy| (-radius..=radius).map(move |dx| Point::new(point.x + dx, point.y + dy)))
            .any(|p| self.pixel(p) == Some(color))
    }

    /// Whether any pixel inside the horizontal band `[top, top + height)` has `color`.
    /// Every pixel drawn in `other` is drawn here too.
    pub fn covers(
        &self,
        other: &Self,
    ) -> bool {
        self.size == other.size
            && self
                .pixels
                .iter()
                .zip(&other.pixels)
                .all(|(mine, theirs)| theirs.is_none() || mine.is_some())
    }

    pub fn color_in_rows(
        &self,
        top: i32,
        height: u32,
        color: Rgb565,
    ) -> bool {
        (top..top + height as i32)
            .any(|y| (0..self.size.width as i32).any(|x| self.pixel(Point::new(x, y)) == Some(color)))
    }
}

impl OriginDimensions for FrameRecorder {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for FrameRecorder {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index(point) {
                self.pixels[idx] = Some(color);
            }
        }
        Ok(())
    }
}
