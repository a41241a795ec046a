//! The small input image patterns are extracted from.

use crate::color::Color;
use crate::grid::FixedGrid2D;

/// A rectangular RGB pixel grid supplied by the caller.
///
/// The core never decodes an image file itself; behind the `image-io`
/// feature a [`TryFrom`]/[`From`] conversion bridges to `image::RgbImage`
/// for the benefit of a CLI-style collaborator.
#[derive(Clone, Debug)]
pub struct Exemplar {
    grid: FixedGrid2D<Color>,
}

impl Exemplar {
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Self {
        Self { grid: FixedGrid2D::from_vec(width, height, pixels) }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        *self.grid.get(x, y)
    }

    pub fn pixels(&self) -> &[Color] {
        self.grid.as_slice()
    }
}

#[cfg(feature = "image-io")]
impl From<&image::RgbImage> for Exemplar {
    fn from(img: &image::RgbImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        let pixels: Vec<Color> = img.pixels().map(|p| Color(p.0)).collect();
        Exemplar::new(width, height, pixels)
    }
}

#[cfg(feature = "image-io")]
impl From<image::RgbImage> for Exemplar {
    fn from(img: image::RgbImage) -> Self {
        Exemplar::from(&img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_reads_row_major() {
        let pixels = vec![Color([1, 0, 0]), Color([2, 0, 0]), Color([3, 0, 0]), Color([4, 0, 0])];
        let exemplar = Exemplar::new(2, 2, pixels);
        assert_eq!(exemplar.get(1, 0), Color([2, 0, 0]));
        assert_eq!(exemplar.get(0, 1), Color([3, 0, 0]));
    }
}
