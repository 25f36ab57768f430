//! Coherent value noise (Hugo Elias construction).
//!
//! An integer lattice hash gives a pseudo-random value in `[-1, 1]` per
//! lattice point; a 3x3 smoothing kernel and cosine interpolation turn it
//! into a continuous field, and octaves add finer detail. The result is a
//! pure function of `(x, y, seed)`: no RNG state is involved.

use std::f64::consts::PI;

/// Lattice hash in `[-1, 1]`.
fn lattice(x: i32, y: i32, seed: i32) -> f64 {
    let n = x.wrapping_add(y.wrapping_mul(57)).wrapping_add(seed);
    let n = (n << 13) ^ n;
    let m = n
        .wrapping_mul(
            n.wrapping_mul(n)
                .wrapping_mul(15731)
                .wrapping_add(789_221),
        )
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    1.0 - f64::from(m) / 1_073_741_824.0
}

/// Lattice value blended with its 8 neighbours (corners 1/16, sides 1/8, centre 1/4).
fn smoothed(x: i32, y: i32, seed: i32) -> f64 {
    let corners = (lattice(x - 1, y - 1, seed)
        + lattice(x + 1, y - 1, seed)
        + lattice(x - 1, y + 1, seed)
        + lattice(x + 1, y + 1, seed))
        / 16.0;
    let sides = (lattice(x - 1, y, seed)
        + lattice(x + 1, y, seed)
        + lattice(x, y - 1, seed)
        + lattice(x, y + 1, seed))
        / 8.0;
    corners + sides + lattice(x, y, seed) / 4.0
}

#[inline]
fn cosine_interpolate(a: f64, b: f64, t: f64) -> f64 {
    let f = (1.0 - (t * PI).cos()) * 0.5;
    a * (1.0 - f) + b * f
}

fn interpolated(x: f64, y: f64, seed: i32) -> f64 {
    let (fx, fy) = (x.floor(), y.floor());
    let (ix, iy) = (fx as i32, fy as i32);
    let (tx, ty) = (x - fx, y - fy);
    let top = cosine_interpolate(smoothed(ix, iy, seed), smoothed(ix + 1, iy, seed), tx);
    let bottom = cosine_interpolate(
        smoothed(ix, iy + 1, seed),
        smoothed(ix + 1, iy + 1, seed),
        tx,
    );
    cosine_interpolate(top, bottom, ty)
}

/// Sum of `octaves` layers; layer `i` has frequency `2^i` and amplitude
/// `persistence^i`.
///
/// The first layer is bounded by `[-1, 1]`; further layers can push the
/// sum beyond that, so callers clamp after mapping.
pub fn value_noise(x: f64, y: f64, persistence: f64, octaves: u32, seed: i32) -> f64 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    for _ in 0..octaves {
        total += interpolated(x * frequency, y * frequency, seed) * amplitude;
        frequency *= 2.0;
        amplitude *= persistence;
    }
    total
}
