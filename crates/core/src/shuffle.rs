use rand::Rng;

/// Returns a uniformly shuffled copy of `items` using the thread-local RNG.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

/// Fisher–Yates shuffle into a new vector; `items` is left untouched.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly
/// chosen index in `0..=i`.
#[must_use]
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn result_is_a_permutation() {
        let input: Vec<u32> = (0..50).collect();
        let mut out = shuffle(&input);
        assert_eq!(out.len(), input.len());
        out.sort_unstable();
        assert_eq!(out, input);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec!["a", "b", "c", "d"];
        let snapshot = input.clone();
        let mut rng = StdRng::seed_from_u64(7);
        let _ = shuffle_with(&input, &mut rng);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn short_sequences_are_unchanged() {
        let empty: Vec<u8> = Vec::new();
        assert!(shuffle(&empty).is_empty());
        assert_eq!(shuffle(&[42]), vec![42]);
    }

    #[test]
    fn same_seed_same_order() {
        let input: Vec<u32> = (0..20).collect();
        let a = shuffle_with(&input, &mut StdRng::seed_from_u64(99));
        let b = shuffle_with(&input, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn every_position_is_reachable() {
        let input = [0_u8, 1, 2];
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen_first = [false; 3];
        for _ in 0..200 {
            let out = shuffle_with(&input, &mut rng);
            seen_first[usize::from(out[0])] = true;
        }
        assert!(seen_first.iter().all(|seen| *seen));
    }
}
