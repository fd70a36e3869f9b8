//! Reconstruction filter kernels.
//!
//! Each filter pairs a weight function with a support radius: the distance
//! beyond which contributions are zero. Supports are enforced by the
//! convolution window (see [`convolve`](crate::convolve)), not by the weight
//! functions themselves — `box_weight` in particular returns 1.0 for any
//! distance. The weight definitions follow the classic ImageMagick resize
//! kernels.
//!
//! | Filter | support | weight(x) |
//! |---|---|---|
//! | `Point` | 0.0 | 1.0 (bookkeeping only; nearest-neighbor bypasses convolution) |
//! | `Box` | 0.5 | 1.0 |
//! | `Triangle` | 1.0 | `1 − x` for x < 1 |
//! | `Cubic` | 2.0 | Keys cubic spline, B=1, C=0 |
//! | `Lanczos2` | 2.0 | `sinc(x) · sinc(x/2)` |
//! | `Lanczos3` | 3.0 | `sinc(x) · sinc(x/3)` |
//! | `Mitchell` | 2.0 | Mitchell-Netravali cubic, B=C=1/3 |

use std::sync::LazyLock;

/// Reconstruction filter used by [`scale`](crate::scale::scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleFilter {
    Point,
    Box,
    Triangle,
    Cubic,
    Lanczos2,
    Lanczos3,
    Mitchell,
}

impl ScaleFilter {
    /// Cheapest filter, for drafts and drag previews.
    pub const FAST: ScaleFilter = ScaleFilter::Point;
    /// Balanced quality, the browser's interactive default.
    pub const GOOD: ScaleFilter = ScaleFilter::Triangle;
    /// Highest quality, used for final thumbnails and exports.
    pub const BEST: ScaleFilter = ScaleFilter::Lanczos3;

    pub(crate) fn kernel(self) -> FilterKernel {
        match self {
            ScaleFilter::Point => FilterKernel::plain(box_weight, 0.0),
            ScaleFilter::Box => FilterKernel::plain(box_weight, 0.5),
            ScaleFilter::Triangle => FilterKernel::plain(triangle, 1.0),
            ScaleFilter::Cubic => FilterKernel::plain(cubic, 2.0),
            ScaleFilter::Lanczos2 => FilterKernel::windowed_sinc(2.0),
            ScaleFilter::Lanczos3 => FilterKernel::windowed_sinc(3.0),
            ScaleFilter::Mitchell => FilterKernel::plain(mitchell_netravali, 2.0),
        }
    }
}

/// A weight function plus its support radius.
#[derive(Clone, Copy)]
pub(crate) struct FilterKernel {
    weight_fn: fn(f64) -> f64,
    pub(crate) support: f64,
    /// Lanczos kernels multiply the sinc by a sinc window scaled to the
    /// support; the window is folded in here rather than into `weight_fn`.
    windowed: bool,
}

impl FilterKernel {
    fn plain(weight_fn: fn(f64) -> f64, support: f64) -> FilterKernel {
        FilterKernel {
            weight_fn,
            support,
            windowed: false,
        }
    }

    fn windowed_sinc(support: f64) -> FilterKernel {
        FilterKernel {
            weight_fn: sinc_fast,
            support,
            windowed: true,
        }
    }

    /// Weight of a source sample at the given distance (in source pixels)
    /// from the destination sample's center.
    pub(crate) fn weight(&self, distance: f64) -> f64 {
        let x = distance.abs();
        if !self.windowed {
            return (self.weight_fn)(x);
        }

        let window = if x == 0.0 {
            1.0
        } else if x < self.support {
            sinc_fast(x / self.support)
        } else {
            0.0
        };
        window * (self.weight_fn)(x)
    }
}

fn box_weight(_x: f64) -> f64 {
    1.0
}

fn triangle(x: f64) -> f64 {
    if x < 1.0 { 1.0 - x } else { 0.0 }
}

/// Keys cubic spline coefficients, derived once per process from (B, C).
struct CubicCoefficients {
    p0: f64,
    p2: f64,
    p3: f64,
    q0: f64,
    q1: f64,
    q2: f64,
    q3: f64,
}

impl CubicCoefficients {
    fn keys_spline(b: f64, c: f64) -> CubicCoefficients {
        CubicCoefficients {
            p0: (6.0 - 2.0 * b) / 6.0,
            p2: (-18.0 + 12.0 * b + 6.0 * c) / 6.0,
            p3: (12.0 - 9.0 * b - 6.0 * c) / 6.0,
            q0: (8.0 * b + 24.0 * c) / 6.0,
            q1: (-12.0 * b - 48.0 * c) / 6.0,
            q2: (6.0 * b + 30.0 * c) / 6.0,
            q3: (-1.0 * b - 6.0 * c) / 6.0,
        }
    }
}

// Write-once, read by every thread afterwards.
static CUBIC: LazyLock<CubicCoefficients> =
    LazyLock::new(|| CubicCoefficients::keys_spline(1.0, 0.0));

fn cubic(x: f64) -> f64 {
    let k = &*CUBIC;
    if x < 1.0 {
        k.p0 + x * (x * (k.p2 + x * k.p3))
    } else if x < 2.0 {
        k.q0 + x * (k.q1 + x * (k.q2 + x * k.q3))
    } else {
        0.0
    }
}

/// `sin(πx)/(πx)`, evaluated for `x ≤ 4` via a minimax rational approximation
/// in x² (sinc is even; max relative error 1.2e-12) and via the direct
/// trigonometric formula beyond that.
fn sinc_fast(x: f64) -> f64 {
    if x > 4.0 {
        let alpha = std::f64::consts::PI * x;
        return alpha.sin() / alpha;
    }

    let xx = x * x;

    let c0 = 0.173611111110910715186413700076827593074e-2;
    let c1 = -0.289105544717893415815859968653611245425e-3;
    let c2 = 0.206952161241815727624413291940849294025e-4;
    let c3 = -0.834446180169727178193268528095341741698e-6;
    let c4 = 0.207010104171026718629622453275917944941e-7;
    let c5 = -0.319724784938507108101517564300855542655e-9;
    let c6 = 0.288101675249103266147006509214934493930e-11;
    let c7 = -0.118218971804934245819960233886876537953e-13;
    let p = c0 + xx * (c1 + xx * (c2 + xx * (c3 + xx * (c4 + xx * (c5 + xx * (c6 + xx * c7))))));

    let d0 = 1.0;
    let d1 = 0.547981619622284827495856984100563583948e-1;
    let d2 = 0.134226268835357312626304688047086921806e-2;
    let d3 = 0.178994697503371051002463656833597608689e-4;
    let d4 = 0.114633394140438168641246022557689759090e-6;
    let q = d0 + xx * (d1 + xx * (d2 + xx * (d3 + xx * d4)));

    (xx - 1.0) * (xx - 4.0) * (xx - 9.0) * (xx - 16.0) / q * p
}

fn mitchell_netravali(x: f64) -> f64 {
    if x >= 2.0 {
        return 0.0;
    }

    let xx = x * x;
    let v = if x < 1.0 {
        (21.0 * xx * x) - (36.0 * xx) + 16.0
    } else {
        (-7.0 * xx * x) + (36.0 * xx) - (60.0 * x) + 32.0
    };
    v / 18.0
}
