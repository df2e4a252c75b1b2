use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Draws `size` values independently and uniformly from `[1, max_value]`.
///
/// `max_value` must be positive; a zero is treated as 1 so the result is
/// still a valid sequence of positive values.
pub fn generate<R: Rng + ?Sized>(size: usize, max_value: u32, rng: &mut R) -> Vec<u32> {
    let range = Uniform::new_inclusive(1, max_value.max(1));
    (0..size).map(|_| range.sample(rng)).collect()
}
