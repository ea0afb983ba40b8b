//! Math backend selection and small numeric helpers.
//!
//! Design goals:
//! - `no_std` ready (guarded by the crate feature `no-std`)
//! - One place that decides whether `log10`/`powf`/`round` come from `std` or `libm`
//! - Side-effect free helpers that are easy to test
//!
//! The model works in `f64` throughout: the curve is rounded to four decimals,
//! which is below what `f32` resolves reliably near the supply rail.

use cfg_if::cfg_if;

// ----------------------------- Math backend selection -----------------------------

cfg_if! {
    // libm (C math) in no_std
    if #[cfg(feature = "no-std")] {
        #[inline] fn m_log10(x: f64) -> f64 { libm::log10(x) }
        #[inline] fn m_pow(x: f64, y: f64) -> f64 { libm::pow(x, y) }
        #[inline] fn m_round(x: f64) -> f64 { libm::round(x) }
    // std backend
    } else {
        #[inline] fn m_log10(x: f64) -> f64 { x.log10() }
        #[inline] fn m_pow(x: f64, y: f64) -> f64 { x.powf(y) }
        #[inline] fn m_round(x: f64) -> f64 { x.round() }
    }
}

// --------------------------------- Utilities -------------------------------------

/// Base-10 logarithm. Domain: `x > 0`.
#[inline]
pub fn log10(x: f64) -> f64 {
    m_log10(x)
}

/// `10^x`, the inverse of [`log10`].
#[inline]
pub fn exp10(x: f64) -> f64 {
    m_pow(10.0, x)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Round half away from zero to `decimals` places (the display precision of
/// the curve). `decimals` is small; larger values overflow the scale.
#[inline]
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = m_pow(10.0, f64::from(decimals));
    m_round(x * scale) / scale
}

/// `|a - b| <= tol * max(1, |a|, |b|)`; mixed absolute/relative closeness.
#[inline]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    let scale = 1.0_f64.max(a.abs()).max(b.abs());
    (a - b).abs() <= tol * scale
}

// --------------------------------- Tests (std only) ------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_exp_roundtrip_on_decades() {
        for p in [0.0, 1.0, 3.0, 6.0] {
            let x = exp10(p);
            assert!(approx_eq(log10(x), p, 1e-12), "p={p} x={x}");
        }
    }

    #[test]
    fn round_to_four_places() {
        assert_eq!(round_to(4.838_709_677, 4), 4.8387);
        assert_eq!(round_to(0.145_631_067, 4), 0.1456);
        assert_eq!(round_to(5.0, 4), 5.0);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(3.0, 6.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 6.0, 1.0), 6.0);
    }
}
