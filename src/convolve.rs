//! The separable convolution pass: "horizontal scale + transpose".
//!
//! One routine resamples along a single axis while writing its output
//! transposed. Calling it twice — source → transposed intermediate →
//! destination — yields a full 2D resize without maintaining two
//! near-duplicate loops: the second call's "horizontal" axis is the first
//! call's vertical one. Based on the resize kernel design in
//! ImageMagick's `magick/resize.c`.
//!
//! For each destination row `y`, the contributing source window and its
//! normalized weights depend only on `y`, so they are computed once and
//! reused across every pixel of the row. Each pixel then accumulates the
//! weighted sum of its contributing source samples per channel in f64,
//! rounds half-up, and clamps to a byte. One scalar loop handles all four
//! channels; there is deliberately no second, vectorized code path.

use crate::buffer::PixelBuffer;
use crate::filters::FilterKernel;
use crate::monitor::TaskMonitor;

/// Per-operation state shared by the two passes of one scale call.
pub(crate) struct ResizeContext<'a> {
    pub(crate) kernel: FilterKernel,
    pub(crate) monitor: Option<&'a dyn TaskMonitor>,
    /// Destination rows across both passes; the denominator of the progress
    /// fraction.
    pub(crate) total_lines: u64,
    pub(crate) processed_lines: u64,
    pub(crate) cancelled: bool,
}

impl<'a> ResizeContext<'a> {
    pub(crate) fn new(kernel: FilterKernel, monitor: Option<&'a dyn TaskMonitor>) -> Self {
        ResizeContext {
            kernel,
            monitor,
            total_lines: 0,
            processed_lines: 0,
            cancelled: false,
        }
    }
}

/// Contributing source window of one destination row.
struct RowWindow {
    start: usize,
    count: usize,
}

/// Filter geometry for a pass: `(scale, support_eff)`.
///
/// Downscaling widens the filter footprint by the inverse scale factor so the
/// wider source neighborhood is averaged instead of aliased. `scale` is
/// returned as the reciprocal, ready to multiply distances with. When the
/// widened support still collapses below half a pixel (degenerate upscale,
/// e.g. the Point pseudo-filter) it is clamped to 0.5 with unit scale.
fn pass_geometry(filter_support: f64, scale_factor: f64) -> (f64, f64) {
    let mut scale = (1.0 / scale_factor).max(1.0);
    let mut support = scale * filter_support;
    if support < 0.5 {
        support = 0.5;
        scale = 1.0;
    }
    (1.0 / scale, support)
}

/// Fill `weights` for destination row `y` and return the source window.
///
/// Weights are normalized to unit density unless the density is zero (a
/// degenerate window that must not divide) or already one.
fn row_weights(
    kernel: &FilterKernel,
    y: u32,
    scale_factor: f64,
    support: f64,
    scale: f64,
    src_width: usize,
    weights: &mut [f64],
) -> RowWindow {
    let bisect = (f64::from(y) + 0.5) / scale_factor;
    let start = (bisect - support + 0.5).max(0.0) as usize;
    let stop = ((bisect + support + 0.5).min(src_width as f64)) as usize;
    let count = stop.saturating_sub(start);

    let mut density = 0.0;
    for (i, weight) in weights[..count].iter_mut().enumerate() {
        *weight = kernel.weight(scale * ((start + i) as f64 - bisect + 0.5));
        density += *weight;
    }

    if density != 0.0 && density != 1.0 {
        let inv = 1.0 / density;
        for weight in &mut weights[..count] {
            *weight *= inv;
        }
    }

    RowWindow { start, count }
}

fn clamp_pixel(v: f64) -> u8 {
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

/// Resample `src` along its row axis into `dest`, transposed.
///
/// `dest` must have the transposed shape: `dest.width == src.height`, with
/// `dest.height` carrying the new size of the resampled axis. Cancellation is
/// polled once per destination row; on cancellation the remaining rows are
/// left unwritten and `ctx.cancelled` is set for the caller to observe.
pub(crate) fn horizontal_scale_transpose(
    src: &PixelBuffer,
    dest: &mut PixelBuffer,
    scale_factor: f64,
    ctx: &mut ResizeContext<'_>,
) {
    debug_assert_eq!(dest.width(), src.height(), "dest must be transposed");

    if ctx.cancelled {
        return;
    }

    let (scale, support) = pass_geometry(ctx.kernel.support, scale_factor);
    let mut weights = vec![0.0f64; (2.0 * support + 3.0) as usize];
    let src_width = src.width() as usize;

    for y in 0..dest.height() {
        if let Some(monitor) = ctx.monitor {
            if monitor.is_cancelled() {
                ctx.cancelled = true;
                break;
            }
            let progress = ctx.processed_lines as f64 / ctx.total_lines as f64;
            ctx.processed_lines += 1;
            monitor.set_progress(progress);
        }

        let window = row_weights(
            &ctx.kernel,
            y,
            scale_factor,
            support,
            scale,
            src_width,
            &mut weights,
        );

        let dest_row = dest.row_mut(y);
        for x in 0..src.height() {
            let src_row = src.row(x);
            let mut acc = [0.0f64; 4];
            let mut offset = window.start * 4;
            for &w in &weights[..window.count] {
                acc[0] += w * f64::from(src_row[offset]);
                acc[1] += w * f64::from(src_row[offset + 1]);
                acc[2] += w * f64::from(src_row[offset + 2]);
                acc[3] += w * f64::from(src_row[offset + 3]);
                offset += 4;
            }

            let out = &mut dest_row[x as usize * 4..x as usize * 4 + 4];
            out[0] = clamp_pixel(acc[0] + 0.5);
            out[1] = clamp_pixel(acc[1] + 0.5);
            out[2] = clamp_pixel(acc[2] + 0.5);
            out[3] = clamp_pixel(acc[3] + 0.5);
        }
    }
}
