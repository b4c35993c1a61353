//! Crate-internal uniform sampling helpers.
//!
//! Every draw goes through the [`Rng`] trait so the concrete generator stays
//! a caller decision: the simulation owns a single seeded `ChaChaRng`, tests
//! substitute scripted sources.

use rand_core::Rng;

/// Uniform draw over the unit interval, built from the next 64 bits.
pub(crate) fn unit_f64<R: Rng>(rng: &mut R) -> f64 {
    let bits = rng.next_u64();
    (bits as f64) * (1.0 / (u64::MAX as f64 + 1.0))
}

/// Uniform draw in `[lo, hi)`.
pub(crate) fn range_f64<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + unit_f64(rng) * (hi - lo)
}

/// Uniform integer draw in `[lo, hi]`, inclusive on both ends.
///
/// A modulo draw: the spans used in this crate are at most 1 437 values
/// against a 64-bit word, so the bias is unobservable.
pub(crate) fn uniform_inclusive<R: Rng>(rng: &mut R, lo: u64, hi: u64) -> u64 {
    debug_assert!(lo <= hi);
    lo + rng.next_u64() % (hi - lo + 1)
}

/// Uniform pick from a non-empty slice.
pub(crate) fn pick<R: Rng, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[(rng.next_u64() % items.len() as u64) as usize]
}
