//! Uniform random game selection across systems.

use crate::library::GameLibrary;
use rand::Rng;

/// Map a draw in `[0, sum(counts))` to `(bucket, index within bucket)`.
#[must_use]
pub fn locate(counts: &[usize], draw: usize) -> Option<(usize, usize)> {
    let mut residual = draw;
    for (bucket, &count) in counts.iter().enumerate() {
        if residual < count {
            return Some((bucket, residual));
        }
        residual -= count;
    }
    None
}

/// Displayed-game counts of every enabled system not in `excluded`, in
/// library order.
#[must_use]
pub fn eligible_counts(library: &dyn GameLibrary, excluded: &[String]) -> Vec<(String, usize)> {
    library
        .systems()
        .iter()
        .filter(|s| s.enabled && !excluded.contains(&s.name))
        .map(|s| (s.name.clone(), s.displayed_game_count()))
        .collect()
}

/// Pick a system and a game index within its displayed games. `None` when
/// no eligible system has a game.
pub fn pick(
    library: &dyn GameLibrary,
    excluded: &[String],
    rng: &mut impl Rng,
) -> Option<(String, usize)> {
    let eligible = eligible_counts(library, excluded);
    let counts: Vec<usize> = eligible.iter().map(|(_, c)| *c).collect();
    let total: usize = counts.iter().sum();
    if total == 0 {
        return None;
    }
    let draw = rng.gen_range(0..total);
    let (bucket, index) = locate(&counts, draw)?;
    Some((eligible[bucket].0.clone(), index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{FileData, SystemCatalog, SystemData};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn games(prefix: &str, n: usize) -> Vec<FileData> {
        (0..n)
            .map(|i| FileData::game(format!("{prefix}{i}"), format!("/{prefix}/{i}")))
            .collect()
    }

    #[test]
    fn test_locate_two_systems() {
        let counts = [3, 2];
        assert_eq!(locate(&counts, 0), Some((0, 0)));
        assert_eq!(locate(&counts, 1), Some((0, 1)));
        assert_eq!(locate(&counts, 2), Some((0, 2)));
        assert_eq!(locate(&counts, 3), Some((1, 0)));
        assert_eq!(locate(&counts, 4), Some((1, 1)));
        assert_eq!(locate(&counts, 5), None);
    }

    #[test]
    fn test_locate_skips_empty_buckets() {
        assert_eq!(locate(&[0, 0, 2], 1), Some((2, 1)));
    }

    #[test]
    fn test_excluded_systems_never_picked() {
        let library = SystemCatalog::new(vec![
            SystemData::new("retropie").with_games(games("r", 50)),
            SystemData::new("nes").with_games(games("n", 1)),
        ]);
        let excluded = vec!["retropie".to_string()];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(pick(&library, &excluded, &mut rng), Some(("nes".to_string(), 0)));
        }
    }

    #[test]
    fn test_disabled_systems_not_counted() {
        let library = SystemCatalog::new(vec![
            SystemData::new("off").with_games(games("o", 4)).disabled(),
            SystemData::new("nes").with_games(games("n", 2)),
        ]);
        assert_eq!(eligible_counts(&library, &[]), vec![("nes".to_string(), 2)]);
    }

    #[test]
    fn test_no_games_no_pick() {
        let library = SystemCatalog::new(vec![SystemData::new("empty")]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(pick(&library, &[], &mut rng), None);
    }

    proptest! {
        #[test]
        fn prop_locate_covers_every_draw(counts in prop::collection::vec(0usize..6, 1..6)) {
            let total: usize = counts.iter().sum();
            for draw in 0..total {
                let (bucket, index) = locate(&counts, draw).unwrap();
                prop_assert!(index < counts[bucket]);
                let before: usize = counts[..bucket].iter().sum();
                prop_assert_eq!(before + index, draw);
            }
            prop_assert_eq!(locate(&counts, total), None);
        }
    }
}
