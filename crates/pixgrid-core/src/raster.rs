use crate::pixel::Pixel;

/// Read-only access to a rectangular field of pixels.
pub trait RasterView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn pixel(&self, col: usize, row: usize) -> Option<&Pixel>;
}

/// Renders a raster as `height` newline-joined lines.
///
/// Each line is the concatenation of that row's tokens in column order. No
/// trailing newline is added.
pub fn render<R: RasterView + ?Sized>(raster: &R) -> String {
    let mut out = String::with_capacity(raster.height() * (raster.width() + 1));
    for row in 0..raster.height() {
        if row > 0 {
            out.push('\n');
        }
        for col in 0..raster.width() {
            if let Some(pixel) = raster.pixel(col, row) {
                out.push_str(pixel.as_str());
            }
        }
    }
    out
}
