//! Standard normal primitives and the truncated-normal moment corrections
//! from the Weng-Lin paper, section 2.3.

/// The standard normal cumulative distribution function Φ.
///
/// Backed by libm's erfc, which is correct to within an ulp;
/// statrs's erfc only reaches ~1e-10 relative accuracy.
pub fn phi_major(x: f64) -> f64 {
    0.5 * libm::erfc(-x / std::f64::consts::SQRT_2)
    // Less numerically stable: 0.5 + 0.5 * libm::erf(x / std::f64::consts::SQRT_2)
}

/// The inverse of Φ, defined on the open interval (0, 1).
///
/// Panics outside that interval: there is no value to extrapolate towards,
/// and returning one silently would poison every downstream margin.
pub fn phi_major_inverse(p: f64) -> f64 {
    assert!(
        0. < p && p < 1.,
        "phi_major_inverse is undefined at {}",
        p
    );
    // erfc_inv carries ~1e-10 relative error; one Newton step against the
    // accurate CDF recovers full double precision. The density underflows
    // only in the far tails, where the seed is as good as it gets.
    let seed = -std::f64::consts::SQRT_2 * statrs::function::erf::erfc_inv(2. * p);
    let density = phi_minor(seed);
    if density > 0. {
        seed - (phi_major(seed) - p) / density
    } else {
        seed
    }
}

/// The standard normal probability density function φ.
pub fn phi_minor(x: f64) -> f64 {
    const NORMALIZE: f64 = 0.5 * std::f64::consts::FRAC_2_SQRT_PI / std::f64::consts::SQRT_2;
    NORMALIZE * (-0.5 * x * x).exp()
}

/// The function V: mean correction for a normal truncated from below at `t`.
/// Falls back to the asymptote `t - x` once Φ underflows.
pub fn v(x: f64, t: f64) -> f64 {
    let xt = x - t;
    let denom = phi_major(xt);
    if denom > 0. { phi_minor(xt) / denom } else { -xt }
}

/// The function W: variance correction for a normal truncated from below at `t`.
pub fn w(x: f64, t: f64) -> f64 {
    let xt = x - t;
    let denom = phi_major(xt);
    if denom > 0. {
        v(x, t) * (v(x, t) + xt)
    } else if x < 0. {
        1.
    } else {
        0.
    }
}

/// The function Ṽ: mean correction for a doubly-truncated normal, used when
/// two teams tie.
pub fn vt(x: f64, t: f64) -> f64 {
    let xx = x.abs();
    let denom = phi_major(t - xx) - phi_major(-t - xx);
    if denom > 0. {
        let a = phi_minor(-t - xx) - phi_minor(t - xx);
        if x < 0. { -a / denom } else { a / denom }
    } else if x < 0. {
        -x - t
    } else {
        -x + t
    }
}

/// The function W̃: variance correction for a doubly-truncated normal.
pub fn wt(x: f64, t: f64) -> f64 {
    let xx = x.abs();
    let denom = phi_major(t - xx) - phi_major(-t - xx);
    if denom > 0. {
        ((t - xx) * phi_minor(t - xx) + (t + xx) * phi_minor(-t - xx)) / denom + vt(x, t) * vt(x, t)
    } else {
        1.
    }
}
