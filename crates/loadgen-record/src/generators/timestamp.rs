//! Epoch value generators.
//!
//! All epochs are Unix seconds relative to a caller-supplied `now`.

use super::numeric::generate_int_range;
use rand::Rng;

/// Pick an epoch between `max_ago` and `min_ago` seconds before `now`.
pub fn generate_epoch_ago<R: Rng>(rng: &mut R, now: i64, min_ago: i64, max_ago: i64) -> i64 {
    now - generate_int_range(rng, min_ago, max_ago)
}

/// Pick an epoch at most `max_delay` seconds after `from`.
pub fn generate_epoch_after<R: Rng>(rng: &mut R, from: i64, max_delay: i64) -> i64 {
    from + generate_int_range(rng, 0, max_delay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_epoch_ago_in_window() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let epoch = generate_epoch_ago(&mut rng, NOW, 60, 3600);
            assert!((NOW - 3600..=NOW - 60).contains(&epoch));
        }
    }

    #[test]
    fn test_epoch_after_never_precedes_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let epoch = generate_epoch_after(&mut rng, NOW, 500);
            assert!((NOW..=NOW + 500).contains(&epoch));
        }
        assert_eq!(generate_epoch_after(&mut rng, NOW, 0), NOW);
    }
}
