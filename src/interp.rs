// src/interp.rs
//
// Closed-form 2D interpolation on fixed stencils.

/// Biquadratic Lagrange interpolation on a 3x3 stencil.
///
/// `(x, y)` is the local coordinate in [-1, 1]^2, measured in cell widths from
/// the centre sample `c`. The other samples sit at the unit offsets:
///
/// ```text
///   ul  u  ur        (-1, 1) (0, 1) (1, 1)
///   l   c  r         (-1, 0) (0, 0) (1, 0)
///   dl  d  dr        (-1,-1) (0,-1) (1,-1)
/// ```
///
/// Each basis function is the product of 1D quadratic Lagrange polynomials,
/// e.g. ul = x(x-1)y(y+1)/4, expanded into monomials below.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn lagrange_interp_2d(
    x: f64,
    y: f64,
    ul: f64,
    u: f64,
    ur: f64,
    l: f64,
    c: f64,
    r: f64,
    dl: f64,
    d: f64,
    dr: f64,
) -> f64 {
    let x2 = x * x;
    let y2 = y * y;
    let xy = x * y;
    let x2y2 = x2 * y2;
    let xy2 = x * y2;
    let x2y = x2 * y;

    ul * (x2y2 + x2y - xy2 - xy) * 0.25 - u * (x2y2 + x2y - y2 - y) * 0.5
        + ur * (x2y2 + x2y + xy2 + xy) * 0.25
        - l * (x2y2 - x2 - xy2 + x) * 0.5
        + c * (x2y2 - x2 - y2 + 1.0)
        - r * (x2y2 - x2 + xy2 - x) * 0.5
        + dl * (x2y2 - x2y - xy2 + xy) * 0.25
        - d * (x2y2 - x2y - y2 + y) * 0.5
        + dr * (x2y2 - x2y + xy2 - xy) * 0.25
}

/// Bilinear interpolation on the unit square.
///
/// `(x, y)` in [0, 1]^2; `dl` at (0,0), `dr` at (1,0), `ul` at (0,1), `ur` at (1,1).
#[inline]
pub fn linear_interp_2d(x: f64, y: f64, ul: f64, ur: f64, dl: f64, dr: f64) -> f64 {
    -ul * (x - 1.0) * y + ur * x * y + dl * (x - 1.0) * (y - 1.0) - dr * x * (y - 1.0)
}
