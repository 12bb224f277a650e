//! Weighted choice between candidate headings.

use rand::Rng;

use super::geometry::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub direction: Direction,
    pub weight: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Probability proportional to weight. Used while searching.
    Roulette,
    /// Highest weight wins. Used while carrying food.
    Greedy,
}

pub fn total_weight(candidates: &[Candidate]) -> f32 {
    candidates.iter().map(|c| c.weight).sum()
}

/// First index whose running sum reaches `draw`. Falls back to the heaviest
/// candidate when float rounding leaves the draw past the final sum.
pub fn roulette_index(candidates: &[Candidate], draw: f32) -> Option<usize> {
    let mut running = 0.0;
    for (idx, candidate) in candidates.iter().enumerate() {
        running += candidate.weight;
        if draw <= running {
            return Some(idx);
        }
    }
    greedy_index(candidates)
}

/// First index holding the maximum weight.
pub fn greedy_index(candidates: &[Candidate]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        match best {
            Some((_, weight)) if candidate.weight <= weight => {}
            _ => best = Some((idx, candidate.weight)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Chooses a candidate index. Only `Roulette` consumes a random draw.
pub fn pick<R: Rng + ?Sized>(
    candidates: &[Candidate],
    mode: SelectionMode,
    rng: &mut R,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    match mode {
        SelectionMode::Greedy => greedy_index(candidates),
        SelectionMode::Roulette => {
            let draw = rng.random_range(0.0..=total_weight(candidates));
            roulette_index(candidates, draw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidates(weights: &[f32]) -> Vec<Candidate> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| Candidate {
                direction: Direction::from_index(i as i32),
                weight,
            })
            .collect()
    }

    #[test]
    fn test_roulette_walks_cumulative_sum() {
        let c = candidates(&[1.0, 2.0, 3.0]);
        assert_eq!(roulette_index(&c, 0.0), Some(0));
        assert_eq!(roulette_index(&c, 1.0), Some(0));
        assert_eq!(roulette_index(&c, 1.5), Some(1));
        assert_eq!(roulette_index(&c, 3.0), Some(1));
        assert_eq!(roulette_index(&c, 5.9), Some(2));
        assert_eq!(roulette_index(&c, 6.0), Some(2));
    }

    #[test]
    fn test_roulette_overshoot_falls_back_to_heaviest() {
        let c = candidates(&[1.0, 4.0, 2.0]);
        assert_eq!(roulette_index(&c, 100.0), Some(1));
    }

    #[test]
    fn test_greedy_takes_first_maximum() {
        let c = candidates(&[2.0, 5.0, 5.0, 1.0]);
        assert_eq!(greedy_index(&c), Some(1));
        assert_eq!(greedy_index(&[]), None);
    }

    #[test]
    fn test_pick_on_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&[], SelectionMode::Roulette, &mut rng), None);
        assert_eq!(pick(&[], SelectionMode::Greedy, &mut rng), None);
    }

    #[test]
    fn test_roulette_frequencies_track_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let c = candidates(&[1.0, 9.0]);
        let mut heavy = 0;
        for _ in 0..10_000 {
            if pick(&c, SelectionMode::Roulette, &mut rng) == Some(1) {
                heavy += 1;
            }
        }
        assert!((8_500..9_500).contains(&heavy), "heavy picked {} times", heavy);
    }
}
