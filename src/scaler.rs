use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::canvas::{Canvas, FrameBuffer};

/// Precomputed source column/row for every destination pixel
#[derive(Debug, Clone, Default)]
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this table maps onto a `dst_w` x `dst_h` target.
    pub fn fits(&self, dst_w: usize, dst_h: usize) -> bool {
        self.src_x.len() == dst_w && self.src_y.len() == dst_h
    }
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let axis = |dst: usize, src: usize| -> Vec<usize> {
        let step = src as f32 / dst as f32;
        (0..dst)
            .map(|d| ((d as f32 * step) as usize).min(src.saturating_sub(1)))
            .collect()
    };

    ScaleLut {
        src_x: axis(dst_w, src_w),
        src_y: axis(dst_h, src_h),
    }
}

/// Nearest-neighbour stretch of `src` into `dst`, one packed row of `dw`
/// pixels per parallel task.
pub fn blit_nearest(dst: &mut [u32], dw: usize, src: &FrameBuffer, lut: &ScaleLut) {
    if dw == 0 || src.width() == 0 || src.height() == 0 {
        return;
    }
    let sw = src.width();
    let pixels = src.pixels();

    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&sy) = lut.src_y.get(y) else {
            return;
        };
        let row = &pixels[sy * sw..(sy + 1) * sw];
        for (out, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
            *out = row[sx].pack();
        }
    });
}
