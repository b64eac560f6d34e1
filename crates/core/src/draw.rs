//! Prize draw selection.
//!
//! Winners are the prefix of a Fisher–Yates shuffle of the eligible pool, so
//! every permutation (and therefore every winner set) is equally likely.

use rand::Rng;

use crate::error::CoreError;

/// Upper bound on winners per draw request.
pub const MAX_WINNERS_PER_DRAW: i64 = 1000;

/// Validate a requested winner count.
pub fn validate_winner_count(winner_count: i64) -> Result<usize, CoreError> {
    if winner_count < 1 {
        return Err(CoreError::Validation(format!(
            "draw_count must be at least 1, got {winner_count}"
        )));
    }
    if winner_count > MAX_WINNERS_PER_DRAW {
        return Err(CoreError::Validation(format!(
            "draw_count must be at most {MAX_WINNERS_PER_DRAW}, got {winner_count}"
        )));
    }
    Ok(winner_count as usize)
}

/// Shuffle `items` in place with the textbook Fisher–Yates algorithm.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Pick `min(winner_count, pool.len())` winners uniformly at random.
///
/// Fails with [`CoreError::InsufficientPool`] when the pool is empty; a pool
/// smaller than `winner_count` simply caps the result.
pub fn select_winners<T, R: Rng + ?Sized>(
    mut pool: Vec<T>,
    winner_count: usize,
    rng: &mut R,
) -> Result<Vec<T>, CoreError> {
    if pool.is_empty() {
        return Err(CoreError::InsufficientPool(
            "No eligible lucky numbers in the pool".to_string(),
        ));
    }
    let count = winner_count.min(pool.len());
    fisher_yates(&mut pool, rng);
    pool.truncate(count);
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn chi_square(observed: &[u64], expected: f64) -> f64 {
        observed
            .iter()
            .map(|&o| {
                let diff = o as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    #[test]
    fn winner_count_must_be_positive() {
        assert_matches!(validate_winner_count(0), Err(CoreError::Validation(_)));
        assert_matches!(validate_winner_count(-3), Err(CoreError::Validation(_)));
        assert_eq!(validate_winner_count(3).unwrap(), 3);
    }

    #[test]
    fn winner_count_is_bounded() {
        assert_matches!(
            validate_winner_count(MAX_WINNERS_PER_DRAW + 1),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn empty_pool_is_insufficient() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = select_winners(Vec::<i32>::new(), 3, &mut rng);
        assert_matches!(result, Err(CoreError::InsufficientPool(_)));
    }

    #[test]
    fn selects_distinct_members_of_the_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = vec![1, 2, 3, 4, 5];
        let winners = select_winners(pool.clone(), 3, &mut rng).unwrap();
        assert_eq!(winners.len(), 3);
        let unique: HashSet<_> = winners.iter().collect();
        assert_eq!(unique.len(), 3);
        assert!(winners.iter().all(|w| pool.contains(w)));
    }

    #[test]
    fn small_pool_caps_the_result() {
        let mut rng = StdRng::seed_from_u64(7);
        let winners = select_winners(vec![4, 5], 5, &mut rng).unwrap();
        let mut sorted = winners.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![4, 5]);
    }

    #[test]
    fn shuffle_preserves_elements() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut items: Vec<u32> = (0..50).collect();
        fisher_yates(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn each_ticket_wins_with_uniform_frequency() {
        const POOL: usize = 10;
        const WINNERS: usize = 3;
        const TRIALS: u64 = 30_000;

        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut wins = [0u64; POOL];
        for _ in 0..TRIALS {
            let pool: Vec<usize> = (0..POOL).collect();
            for w in select_winners(pool, WINNERS, &mut rng).unwrap() {
                wins[w] += 1;
            }
        }

        let expected = (TRIALS * WINNERS as u64) as f64 / POOL as f64;
        // 9 degrees of freedom; 27.88 is the p = 0.001 critical value.
        let stat = chi_square(&wins, expected);
        assert!(stat < 27.88, "chi-square {stat} too large: {wins:?}");
    }

    #[test]
    fn every_permutation_is_equally_likely() {
        const TRIALS: u64 = 60_000;

        let mut rng = StdRng::seed_from_u64(0xf15e);
        let mut counts: HashMap<[u8; 3], u64> = HashMap::new();
        for _ in 0..TRIALS {
            let mut items = [0u8, 1, 2];
            fisher_yates(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }

        assert_eq!(counts.len(), 6, "all 3! permutations must occur");
        let observed: Vec<u64> = counts.values().copied().collect();
        // 5 degrees of freedom; 20.52 is the p = 0.001 critical value.
        let stat = chi_square(&observed, TRIALS as f64 / 6.0);
        assert!(stat < 20.52, "chi-square {stat} too large: {counts:?}");
    }
}
