//! Frame rendering: translates observed cells into pixel blocks.
//!
//! [`FrameRenderer`] is the shell's [`CellObserver`]: every cell the driver
//! reports is painted as a `cell_size x cell_size` RGBA block into an owned
//! frame buffer, which is blitted onto the `pixels` surface on redraw. The
//! same path paints the seeded first generation and every step after it.

use petri_core::config::DisplayConfig;
use petri_core::driver::CellObserver;
use petri_core::grid::CellState;

/// Bytes per RGBA pixel.
const BYTES_PER_PIXEL: usize = 4;

/// A [`CellObserver`] that paints reported cells into an RGBA frame buffer.
pub struct FrameRenderer {
    /// Frame width in pixels.
    frame_width: usize,
    /// Edge length of one cell block in pixels.
    cell_size: usize,
    /// RGBA color for live cells.
    live_color: [u8; 4],
    /// RGBA color for dead cells.
    dead_color: [u8; 4],
    /// Owned RGBA frame, row-major, `frame_width * frame_height` pixels.
    frame: Vec<u8>,
}

impl FrameRenderer {
    /// Create a renderer for a grid of the given dimensions.
    ///
    /// The frame covers `width * cell_size` by `height * cell_size` pixels
    /// and starts fully transparent-black; the first
    /// [`emit_current`](petri_core::driver::Driver::emit_current) paints
    /// every cell.
    pub fn new(grid_width: usize, grid_height: usize, display: &DisplayConfig) -> Self {
        let cell_size = usize::try_from(display.cell_size).unwrap_or(1).max(1);
        let frame_width = grid_width.saturating_mul(cell_size);
        let frame_height = grid_height.saturating_mul(cell_size);
        let len = frame_width
            .saturating_mul(frame_height)
            .saturating_mul(BYTES_PER_PIXEL);
        Self {
            frame_width,
            cell_size,
            live_color: display.live_color,
            dead_color: display.dead_color,
            frame: vec![0; len],
        }
    }

    /// The rendered frame, one RGBA byte quad per pixel.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Copy the rendered frame onto a surface frame of the same layout.
    pub fn blit(&self, target: &mut [u8]) {
        let len = self.frame.len().min(target.len());
        if let (Some(dst), Some(src)) = (target.get_mut(..len), self.frame.get(..len)) {
            dst.copy_from_slice(src);
        }
    }
}

impl CellObserver for FrameRenderer {
    fn on_cell(&mut self, x: usize, y: usize, state: CellState) {
        let color = if state.is_alive() {
            self.live_color
        } else {
            self.dead_color
        };

        // Top-left pixel of the cell's block.
        let px = x.saturating_mul(self.cell_size);
        let py = y.saturating_mul(self.cell_size);

        for row in 0..self.cell_size {
            let row_start = py
                .saturating_add(row)
                .saturating_mul(self.frame_width)
                .saturating_add(px)
                .saturating_mul(BYTES_PER_PIXEL);
            for col in 0..self.cell_size {
                let offset = row_start.saturating_add(col.saturating_mul(BYTES_PER_PIXEL));
                if let Some(pixel) = self
                    .frame
                    .get_mut(offset..offset.saturating_add(BYTES_PER_PIXEL))
                {
                    pixel.copy_from_slice(&color);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_display(cell_size: u32) -> DisplayConfig {
        DisplayConfig {
            cell_size,
            live_color: [255, 255, 255, 255],
            dead_color: [0, 0, 0, 255],
        }
    }

    fn pixel_at(renderer: &FrameRenderer, px: usize, py: usize) -> [u8; 4] {
        let offset = (py * renderer.frame_width + px) * BYTES_PER_PIXEL;
        let bytes = renderer.frame().get(offset..offset + BYTES_PER_PIXEL).unwrap();
        [bytes[0], bytes[1], bytes[2], bytes[3]]
    }

    #[test]
    fn frame_covers_the_scaled_grid() {
        let renderer = FrameRenderer::new(10, 6, &make_display(4));
        assert_eq!(renderer.frame().len(), 40 * 24 * BYTES_PER_PIXEL);
    }

    #[test]
    fn live_cell_paints_a_full_block() {
        let mut renderer = FrameRenderer::new(3, 3, &make_display(2));
        renderer.on_cell(1, 0, CellState::Alive);

        // The block covers pixels (2..4, 0..2).
        for py in 0..2 {
            for px in 2..4 {
                assert_eq!(pixel_at(&renderer, px, py), [255, 255, 255, 255]);
            }
        }
        // A neighboring pixel outside the block is untouched.
        assert_eq!(pixel_at(&renderer, 1, 0), [0, 0, 0, 0]);
        assert_eq!(pixel_at(&renderer, 2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn dead_cell_paints_the_dead_color() {
        let mut renderer = FrameRenderer::new(2, 2, &make_display(1));
        renderer.on_cell(0, 1, CellState::Dead);
        assert_eq!(pixel_at(&renderer, 0, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn blit_copies_the_frame() {
        let mut renderer = FrameRenderer::new(2, 1, &make_display(1));
        renderer.on_cell(0, 0, CellState::Alive);
        renderer.on_cell(1, 0, CellState::Dead);

        let mut target = vec![0xAA; renderer.frame().len()];
        renderer.blit(&mut target);
        assert_eq!(target, renderer.frame());
    }

    #[test]
    fn zero_cell_size_is_clamped_to_one() {
        let renderer = FrameRenderer::new(4, 4, &make_display(0));
        assert_eq!(renderer.frame().len(), 4 * 4 * BYTES_PER_PIXEL);
    }
}
