use rand::seq::SliceRandom;
use rand::Rng;

/// Fisher-Yates shuffle of the whole vector, every permutation equally likely
pub fn shuffled<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items
}

/// Uniform sample without replacement of up to `k` items, in random order
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], k: usize, rng: &mut R) -> Vec<T> {
    items.choose_multiple(rng, k).cloned().collect()
}
