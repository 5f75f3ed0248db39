//! Uniform random selection of the next track.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick one element of `items` uniformly at random, or `None` when empty.
pub fn pick<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn pick_from_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: [u32; 0] = [];
        assert_eq!(pick(&empty, &mut rng), None);
    }

    #[test]
    fn pick_from_single_returns_it() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick(&["only"], &mut rng), Some(&"only"));
    }

    #[test]
    fn pick_always_returns_a_member() {
        for seed in 0..64u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let items: Vec<u64> = (0..=seed).map(|i| i * 3 + 1).collect();
            for _ in 0..16 {
                let picked = pick(&items, &mut rng).copied();
                assert!(picked.is_some_and(|p| items.contains(&p)));
            }
        }
    }

    #[test]
    fn pick_reaches_every_element() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = [0usize, 1, 2, 3];
        let mut seen = [false; 4];
        for _ in 0..400 {
            if let Some(&i) = pick(&items, &mut rng) {
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
