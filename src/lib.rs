//! # Lumen Scale
//!
//! The image resampling engine of the Lumen photo browser: convert a
//! premultiplied-ARGB32 bitmap from one resolution to another under a
//! selectable reconstruction filter, with cooperative cancellation and
//! per-row progress reporting.
//!
//! Everything else the browser does — windows, metadata, file stores,
//! thumbnail caches, color management — lives elsewhere and talks to this
//! crate through two narrow seams: [`PixelBuffer`] for pixels and
//! [`TaskMonitor`] for progress/cancellation.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`buffer`] | Premultiplied-ARGB32 [`PixelBuffer`]: layout, stride rule, pixel access, sub-rectangle copies |
//! | [`filters`] | Filter kernel registry: weight functions and support radii for the seven [`ScaleFilter`]s |
//! | [`convolve`] | The separable convolution pass, applied twice via the transpose trick |
//! | [`scale`] | Orchestrator: [`scale()`], [`scale_squared`] thumbnails, [`scale_fast`] previews |
//! | [`fast`] | Fast paths: fixed-point nearest-neighbor and iterative-halving bilinear |
//! | [`task`] | [`ScaleTask`]: one scale call on a worker thread with a `Pending → Running → terminal` lifecycle |
//! | [`monitor`] | [`TaskMonitor`] trait and the shared [`ScaleMonitor`] handle |
//! | [`error`] | [`ScaleError`] taxonomy |
//!
//! # Design Decisions
//!
//! ## One Pass, Called Twice
//!
//! There is a single 1D resampling routine that writes its output
//! transposed. The orchestrator calls it twice — source into a transposed
//! intermediate, intermediate into the destination — and gets a full 2D
//! resize without a second, near-duplicate "vertical" loop to keep in sync.
//! Per-row filter windows are computed once and reused across the row, since
//! the window position depends only on the destination row index.
//!
//! ## One Accumulation Loop
//!
//! The per-pixel accumulation is a single scalar f64 loop over all four
//! channels. There is no vectorized or fixed-point sibling with subtly
//! different rounding; any future SIMD work must be behavior-identical and
//! internal, never a second public code path.
//!
//! ## Cooperative Cancellation
//!
//! The passes poll [`TaskMonitor::is_cancelled`] once per destination row,
//! bounding cancellation latency by one row's work. A cancelled scale
//! discards its partial destination and surfaces [`ScaleError::Cancelled`] —
//! a "no result" status callers are expected to swallow, distinct from
//! failure.
//!
//! ## Fixed Point Where It Pays
//!
//! The nearest-neighbor fast path steps through source coordinates in
//! explicit 16.16 fixed point; the convolution engine stays in f64, where
//! kernel accuracy matters more than the multiply cost.
//!
//! # Example
//!
//! ```
//! use lumen_scale::{PixelBuffer, ScaleFilter, scale};
//!
//! let photo = PixelBuffer::from_fn(64, 48, |x, y| {
//!     0xFF00_0000 | ((x * 4) << 16) | (y * 5)
//! })
//! .unwrap();
//!
//! let thumb = scale(&photo, 16, 12, ScaleFilter::BEST, None).unwrap();
//! assert_eq!((thumb.width(), thumb.height()), (16, 12));
//! assert_eq!(thumb.original_size(), Some((64, 48)));
//! ```
//!
//! [`scale()`]: scale::scale

pub mod buffer;
pub mod convolve;
pub mod error;
pub mod fast;
pub mod filters;
mod fixed;
pub mod monitor;
pub mod scale;
pub mod task;

pub use buffer::{Format, PixelBuffer};
pub use error::ScaleError;
pub use fast::{scale_bilinear, scale_nearest};
pub use filters::ScaleFilter;
pub use monitor::{ScaleMonitor, TaskMonitor};
pub use scale::{scale, scale_fast, scale_squared};
pub use task::{ScaleRequest, ScaleTask, TaskState};
