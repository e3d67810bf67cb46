//! Derived energy-performance metrics.

/// Rounds `value` to `decimals` decimal places, halves away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

/// Energy-Delay-Product, rounded to the nearest integer.
pub fn edp(energy: f64, runtime: f64) -> f64 {
    (energy * runtime).round()
}

/// Energy-Delay-Product-Squared, rounded to two decimal places.
pub fn ed2p(energy: f64, runtime: f64) -> f64 {
    round_to(energy * runtime * runtime, 2)
}

/// Mega-Lattice-Updates-Per-Second of `iterations` sweeps over a `size`^3 lattice.
///
/// Callers guarantee a non-zero `runtime_ms`.
pub fn mlups(runtime_ms: f64, size: u32, iterations: u32) -> f64 {
    let size = f64::from(size);
    (f64::from(iterations) * size.powi(3) * 1e-6) / runtime_ms
}

/// Percentage change from `a` to `b`, rounded to two decimal places.
pub fn pct_change(a: f64, b: f64) -> f64 {
    round_to((b - a) / a * 100.0, 2)
}
