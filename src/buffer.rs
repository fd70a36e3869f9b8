//! Premultiplied ARGB32 pixel buffers.
//!
//! # Memory layout
//!
//! Pixels are 32-bit native-endian words stored row-major:
//!
//! ```text
//! data[y * stride + x * 4 .. y * stride + x * 4 + 4]
//! ```
//!
//! A packed pixel reads `0xAARRGGBB`, which on little-endian hosts puts the
//! bytes in B, G, R, A order — the graphics stack's native surface format.
//! Color channels are premultiplied by the alpha fraction. Rows are padded to
//! an 8-byte boundary, so `stride` may exceed `width * 4`; code that walks
//! pixels must step rows by `stride`, never by `width * 4`.

use crate::error::ScaleError;

/// Largest width or height a buffer accepts, matching the coordinate range
/// of the rendering surfaces the browser hands us.
pub const MAX_DIMENSION: u32 = 32_767;

/// Pixel format of a [`PixelBuffer`].
///
/// Both formats occupy 4 bytes per pixel; `Rgb24` carries an unused alpha
/// byte. The resampling engine operates on `Argb32` only and rejects `Rgb24`
/// sources up front rather than blending garbage alpha into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// 32-bit premultiplied ARGB.
    Argb32,
    /// 32-bit RGB with an ignored fourth byte.
    Rgb24,
}

/// An owned rectangular bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    format: Format,
    data: Vec<u8>,
    original_size: Option<(u32, u32)>,
}

/// Bytes per row for a given width: `width * 4` rounded up to an 8-byte
/// boundary.
pub fn stride_for_width(width: u32) -> usize {
    (width as usize * 4 + 7) & !7
}

impl PixelBuffer {
    /// Allocate a zero-filled premultiplied-ARGB32 buffer.
    pub fn new(width: u32, height: u32) -> Result<PixelBuffer, ScaleError> {
        PixelBuffer::with_format(width, height, Format::Argb32)
    }

    /// Allocate a zero-filled buffer in the given format.
    ///
    /// Fails with [`ScaleError::InvalidDimensions`] for zero or over-limit
    /// extents and [`ScaleError::AllocationFailure`] when the reservation
    /// itself fails — allocation is fallible here so an oversized request
    /// surfaces as an error instead of an abort.
    pub fn with_format(width: u32, height: u32, format: Format) -> Result<PixelBuffer, ScaleError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ScaleError::InvalidDimensions);
        }

        let stride = stride_for_width(width);
        let len = stride * height as usize;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ScaleError::AllocationFailure)?;
        data.resize(len, 0);

        Ok(PixelBuffer {
            width,
            height,
            stride,
            format,
            data,
            original_size: None,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel. `f` returns a
    /// packed `0xAARRGGBB` value.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> u32,
    ) -> Result<PixelBuffer, ScaleError> {
        let mut buffer = PixelBuffer::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                buffer.put_pixel(x, y, f(x, y));
            }
        }
        Ok(buffer)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// The "original size" hint carried alongside scaled images, so consumers
    /// (e.g. the browser's zoom indicator) can tell a thumbnail's provenance.
    pub fn original_size(&self) -> Option<(u32, u32)> {
        self.original_size
    }

    pub fn set_original_size(&mut self, size: Option<(u32, u32)>) {
        self.original_size = size;
    }

    /// The pixels of row `y`, without the trailing padding bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let offset = y as usize * self.stride;
        &self.data[offset..offset + self.width as usize * 4]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let offset = y as usize * self.stride;
        &mut self.data[offset..offset + self.width as usize * 4]
    }

    /// Packed `0xAARRGGBB` value at `(x, y)`.
    pub fn get_pixel(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height);
        let offset = y as usize * self.stride + x as usize * 4;
        u32::from_ne_bytes(self.data[offset..offset + 4].try_into().unwrap())
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: u32) {
        assert!(x < self.width && y < self.height);
        let offset = y as usize * self.stride + x as usize * 4;
        self.data[offset..offset + 4].copy_from_slice(&pixel.to_ne_bytes());
    }

    /// Copy the `width × height` rectangle at `(x, y)` into a fresh buffer.
    pub fn sub_image(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, ScaleError> {
        if x.checked_add(width).is_none_or(|right| right > self.width)
            || y.checked_add(height).is_none_or(|bottom| bottom > self.height)
        {
            return Err(ScaleError::InvalidDimensions);
        }

        let mut out = PixelBuffer::with_format(width, height, self.format)?;
        out.original_size = self.original_size;
        for row in 0..height {
            let src_offset = (y + row) as usize * self.stride + x as usize * 4;
            let src = &self.data[src_offset..src_offset + width as usize * 4];
            out.row_mut(row).copy_from_slice(src);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_padded_to_eight_bytes() {
        assert_eq!(stride_for_width(2), 8);
        assert_eq!(stride_for_width(3), 16); // 12 rounded up
        assert_eq!(stride_for_width(4), 16);
        assert_eq!(stride_for_width(5), 24); // 20 rounded up
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(PixelBuffer::new(0, 10), Err(ScaleError::InvalidDimensions));
        assert_eq!(PixelBuffer::new(10, 0), Err(ScaleError::InvalidDimensions));
    }

    #[test]
    fn over_limit_dimensions_rejected() {
        assert_eq!(
            PixelBuffer::new(MAX_DIMENSION + 1, 1),
            Err(ScaleError::InvalidDimensions)
        );
    }

    #[test]
    fn pixel_roundtrip() {
        let mut buffer = PixelBuffer::new(4, 3).unwrap();
        buffer.put_pixel(2, 1, 0xFF80_4020);
        assert_eq!(buffer.get_pixel(2, 1), 0xFF80_4020);
        assert_eq!(buffer.get_pixel(0, 0), 0);
    }

    #[test]
    fn rows_respect_padding() {
        // Width 3 pads each row by 4 bytes; row slices must skip the padding.
        let mut buffer = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(buffer.stride(), 16);
        assert_eq!(buffer.row(0).len(), 12);
        buffer.put_pixel(0, 1, 0xFFFF_FFFF);
        assert_eq!(&buffer.row(1)[..4], &[0xFF; 4]);
        assert_eq!(&buffer.row(0)[..4], &[0x00; 4]);
    }

    #[test]
    fn from_fn_fills_every_pixel() {
        let buffer = PixelBuffer::from_fn(3, 2, |x, y| 0xFF00_0000 | (y * 3 + x)).unwrap();
        assert_eq!(buffer.get_pixel(0, 0), 0xFF00_0000);
        assert_eq!(buffer.get_pixel(2, 1), 0xFF00_0005);
    }

    #[test]
    fn sub_image_copies_the_rectangle() {
        let buffer = PixelBuffer::from_fn(4, 4, |x, y| 0xFF00_0000 | (y * 4 + x)).unwrap();
        let sub = buffer.sub_image(1, 2, 2, 2).unwrap();
        assert_eq!(sub.width(), 2);
        assert_eq!(sub.height(), 2);
        assert_eq!(sub.get_pixel(0, 0), 0xFF00_0009);
        assert_eq!(sub.get_pixel(1, 1), 0xFF00_000E);
    }

    #[test]
    fn sub_image_out_of_bounds_rejected() {
        let buffer = PixelBuffer::new(4, 4).unwrap();
        assert_eq!(
            buffer.sub_image(3, 0, 2, 2),
            Err(ScaleError::InvalidDimensions)
        );
    }

    #[test]
    fn sub_image_keeps_original_size_hint() {
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        buffer.set_original_size(Some((800, 600)));
        let sub = buffer.sub_image(0, 0, 2, 2).unwrap();
        assert_eq!(sub.original_size(), Some((800, 600)));
    }
}
