//! High-level scaling operations.
//!
//! [`scale`] drives the two-pass separable convolution; [`scale_squared`]
//! builds fixed-size square thumbnails on top of it; [`scale_fast`] is the
//! box-filtered convenience the browser uses for quick previews.

use log::debug;

use crate::buffer::{Format, PixelBuffer};
use crate::convolve::{ResizeContext, horizontal_scale_transpose};
use crate::error::ScaleError;
use crate::filters::ScaleFilter;
use crate::monitor::TaskMonitor;

/// Resample `image` to `new_width × new_height` with the given filter.
///
/// Equal dimensions return a byte-for-byte copy without touching a filter.
/// The destination inherits the source's original-size hint, defaulting to
/// the source's own dimensions the first time an image is scaled.
///
/// The 2D resize runs as two transposed 1D passes (see
/// [`convolve`](crate::convolve)): source → `(src_height, new_width)`
/// intermediate → destination. `monitor`, when present, receives one progress
/// report per destination row out of `new_width + new_height` total and is
/// polled for cancellation at the same cadence; on cancellation the partial
/// destination is discarded and [`ScaleError::Cancelled`] returned.
pub fn scale(
    image: &PixelBuffer,
    new_width: u32,
    new_height: u32,
    filter: ScaleFilter,
    monitor: Option<&dyn TaskMonitor>,
) -> Result<PixelBuffer, ScaleError> {
    if image.format() != Format::Argb32 {
        return Err(ScaleError::PreconditionViolation);
    }

    let src_width = image.width();
    let src_height = image.height();

    if src_width == new_width && src_height == new_height {
        return Ok(image.clone());
    }
    if new_width == 0 || new_height == 0 {
        return Err(ScaleError::InvalidDimensions);
    }

    debug!("scale {src_width}x{src_height} -> {new_width}x{new_height}, filter {filter:?}");

    let mut scaled = PixelBuffer::new(new_width, new_height)?;
    scaled.set_original_size(image.original_size().or(Some((src_width, src_height))));

    let mut ctx = ResizeContext::new(filter.kernel(), monitor);
    ctx.total_lines = u64::from(new_width) + u64::from(new_height);

    let x_factor = f64::from(new_width) / f64::from(src_width);
    let y_factor = f64::from(new_height) / f64::from(src_height);

    let mut intermediate = PixelBuffer::new(src_height, new_width)?;
    horizontal_scale_transpose(image, &mut intermediate, x_factor, &mut ctx);
    horizontal_scale_transpose(&intermediate, &mut scaled, y_factor, &mut ctx);

    if ctx.cancelled {
        // The partially written destination never escapes.
        return Err(ScaleError::Cancelled);
    }
    Ok(scaled)
}

/// Box-filtered scale without progress reporting, for cheap previews.
pub fn scale_fast(
    image: &PixelBuffer,
    new_width: u32,
    new_height: u32,
) -> Result<PixelBuffer, ScaleError> {
    scale(image, new_width, new_height, ScaleFilter::Box, None)
}

/// Resize-to-fit plus center-crop to a `size × size` square thumbnail.
///
/// A source smaller than `size` on both axes is returned unscaled — this
/// helper never upscales past the source. Otherwise the shorter dimension is
/// scaled to `size` (the longer one proportionally, truncating) and the
/// result center-cropped, with truncating-integer crop offsets.
pub fn scale_squared(
    image: &PixelBuffer,
    size: u32,
    filter: ScaleFilter,
    monitor: Option<&dyn TaskMonitor>,
) -> Result<PixelBuffer, ScaleError> {
    if image.format() != Format::Argb32 {
        return Err(ScaleError::PreconditionViolation);
    }
    if size == 0 {
        return Err(ScaleError::InvalidDimensions);
    }

    let width = image.width();
    let height = image.height();

    if width < size && height < size {
        return Ok(image.clone());
    }

    let (scaled_width, scaled_height) = if width > height {
        let scaled_width = (f64::from(width) / f64::from(height) * f64::from(size)) as u32;
        (scaled_width, size)
    } else {
        let scaled_height = (f64::from(height) / f64::from(width) * f64::from(size)) as u32;
        (size, scaled_height)
    };

    debug!("squared thumbnail {width}x{height} -> {size}, via {scaled_width}x{scaled_height}");

    let scaled = if scaled_width != width || scaled_height != height {
        scale(image, scaled_width, scaled_height, filter, monitor)?
    } else {
        image.clone()
    };

    if scaled_width == size && scaled_height == size {
        return Ok(scaled);
    }

    scaled.sub_image(
        (scaled_width - size) / 2,
        (scaled_height - size) / 2,
        size,
        size,
    )
}
