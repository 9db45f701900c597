// The render side of the pencil: something that can clear itself and fill a cell-sized square.
// The pencil only ever writes; it never reads pixels back from the surface.

use crate::types::{Color, FrameBuffer};

pub trait RenderSurface {
    /// Surface width in screen pixels.
    fn width(&self) -> u32;

    /// Surface height in screen pixels.
    fn height(&self) -> u32;

    /// Top-left corner of the surface in the coordinate space pointer events arrive in.
    fn origin(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    /// Wipe the `width` x `height` region starting at the surface's top-left corner.
    fn clear_region(&mut self, width: u32, height: u32);

    /// Paint the square of cell `(x, y)`; the square is `cell_size` screen pixels wide.
    fn fill_cell(&mut self, x: i32, y: i32, color: Color, cell_size: u32);
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn origin(&self) -> (f64, f64) {
        (**self).origin()
    }

    fn clear_region(&mut self, width: u32, height: u32) {
        (**self).clear_region(width, height)
    }

    fn fill_cell(&mut self, x: i32, y: i32, color: Color, cell_size: u32) {
        (**self).fill_cell(x, y, color, cell_size)
    }
}

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i64, y: i64, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

impl RenderSurface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width as u32
    }

    fn height(&self) -> u32 {
        self.height as u32
    }

    fn clear_region(&mut self, width: u32, height: u32) {
        if self.width == 0 {
            return;
        }
        let rows = (height as usize).min(self.height);
        let cols = (width as usize).min(self.width);
        for row in self.pixels.chunks_mut(self.width).take(rows) {
            row[..cols].fill(self.background);
        }
    }

    fn fill_cell(&mut self, x: i32, y: i32, color: Color, cell_size: u32) {
        let size = cell_size as i64;
        let (left, top) = (x as i64 * size, y as i64 * size);
        let color = color.to_u32();
        for py in top..top + size {
            for px in left..left + size {
                put_pixel(self, px, py, color);
            }
        }
    }
}
