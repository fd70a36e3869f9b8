//! Fast-path scalers for previews and drag feedback.
//!
//! Neither path goes through the convolution engine: [`scale_nearest`] steps
//! through the source with 16.16 fixed-point coordinates and copies whole
//! pixels, and [`scale_bilinear`] chains bounded bilinear reduction steps so
//! large downscales don't under-blur the way a single huge-ratio bilinear
//! pass would.

use log::debug;

use crate::buffer::{Format, PixelBuffer};
use crate::error::ScaleError;
use crate::fixed::Fixed;

/// Largest shrink ratio a single bilinear step is allowed to cover. A 2x2
/// bilinear tap only sees adjacent samples, so each step may shrink by at
/// most a third before source pixels start falling between the taps.
const MAX_STEP_FACTOR: f64 = 4.0 / 3.0;

/// Nearest-neighbor resample: direct pixel copies, no blending.
///
/// Source coordinates accumulate in 16.16 fixed point, starting half a step
/// in so each destination pixel samples the center of its source window
/// rather than the edge (which would bias the image toward the top-left).
pub fn scale_nearest(
    image: &PixelBuffer,
    new_width: u32,
    new_height: u32,
) -> Result<PixelBuffer, ScaleError> {
    if image.format() != Format::Argb32 {
        return Err(ScaleError::PreconditionViolation);
    }

    let mut scaled = PixelBuffer::new(new_width, new_height)?;

    let src_width = image.width();
    let src_height = image.height();
    let step_x = Fixed::from_f64(f64::from(src_width) / f64::from(new_width));
    let step_y = Fixed::from_f64(f64::from(src_height) / f64::from(new_height));
    let max_col = i64::from(src_width - 1);
    let max_row = i64::from(src_height - 1);

    let mut y_src = step_y.half();
    for y in 0..new_height {
        let src_row = image.row(y_src.to_int().min(max_row) as u32);
        let dest_row = scaled.row_mut(y);

        let mut x_src = step_x.half();
        for x in 0..new_width {
            let col = x_src.to_int().min(max_col) as usize * 4;
            let out = x as usize * 4;
            dest_row[out..out + 4].copy_from_slice(&src_row[col..col + 4]);
            x_src += step_x;
        }
        y_src += step_y;
    }

    Ok(scaled)
}

/// One bilinear reduction/enlargement step: each destination pixel blends the
/// 2x2 source neighborhood under its (floored) source coordinate, with
/// edge-clamped neighbor fetches.
fn bilinear_step(
    image: &PixelBuffer,
    new_width: u32,
    new_height: u32,
) -> Result<PixelBuffer, ScaleError> {
    let mut scaled = PixelBuffer::new(new_width, new_height)?;

    let src_width = image.width() as usize;
    let src_height = image.height();
    let step_x = f64::from(image.width()) / f64::from(new_width);
    let step_y = f64::from(image.height()) / f64::from(new_height);

    let mut y_src = 0.0f64;
    for y in 0..new_height {
        let row = y_src.floor() as u32;
        let y_fract = y_src - f64::from(row);
        let row0 = image.row(row);
        let row1 = image.row((row + 1).min(src_height - 1));
        let dest_row = scaled.row_mut(y);

        let mut x_src = 0.0f64;
        for x in 0..new_width {
            let col = x_src.floor() as usize;
            let x_fract = x_src - col as f64;
            let o00 = col * 4;
            let o01 = (col + 1).min(src_width - 1) * 4;

            for c in 0..4 {
                let top = (1.0 - x_fract) * f64::from(row0[o00 + c])
                    + x_fract * f64::from(row0[o01 + c]);
                let bottom = (1.0 - x_fract) * f64::from(row1[o00 + c])
                    + x_fract * f64::from(row1[o01 + c]);
                let v = (1.0 - y_fract) * top + y_fract * bottom;
                dest_row[x as usize * 4 + c] = v.clamp(0.0, 255.0) as u8;
            }
            x_src += step_x;
        }
        y_src += step_y;
    }

    Ok(scaled)
}

/// Bilinear resample via iterative halving.
///
/// The cumulative ratio is split into steps that each shrink by at most a
/// third, followed by one final step covering the residual fraction directly
/// to the requested dimensions. The step count derives from the width ratio;
/// the height follows the same schedule.
pub fn scale_bilinear(
    image: &PixelBuffer,
    new_width: u32,
    new_height: u32,
) -> Result<PixelBuffer, ScaleError> {
    if image.format() != Format::Argb32 {
        return Err(ScaleError::PreconditionViolation);
    }
    if new_width == 0 || new_height == 0 {
        return Err(ScaleError::InvalidDimensions);
    }

    let ratio = f64::from(new_width) / f64::from(image.width());
    let mut s = ratio;
    let mut iterations = 0u32;
    while s < 1.0 / MAX_STEP_FACTOR {
        s *= MAX_STEP_FACTOR;
        iterations += 1;
    }

    debug!(
        "bilinear {}x{} -> {new_width}x{new_height} in {} steps",
        image.width(),
        image.height(),
        iterations + 1
    );

    let mut width = f64::from(image.width());
    let mut height = f64::from(image.height());
    let mut current: Option<PixelBuffer> = None;
    for _ in 0..iterations {
        width /= MAX_STEP_FACTOR;
        height /= MAX_STEP_FACTOR;
        let source = current.as_ref().unwrap_or(image);
        current = Some(bilinear_step(
            source,
            (width.round() as u32).max(1),
            (height.round() as u32).max(1),
        )?);
    }

    let source = current.as_ref().unwrap_or(image);
    bilinear_step(source, new_width, new_height)
}
