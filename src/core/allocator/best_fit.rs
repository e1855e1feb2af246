//! Best-fit placement
//!
//! Picks the block whose leftover after placement would be smallest. The
//! scan only replaces its candidate on a strictly smaller leftover, so equal
//! leftovers resolve to the lowest index.

use super::PlacementPolicy;

/// Block minimizing `capacity - size`
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFit;

impl PlacementPolicy for BestFit {
    fn select(&self, capacities: &[u64], size: u64) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;

        for (index, &capacity) in capacities.iter().enumerate() {
            if capacity < size {
                continue;
            }
            let leftover = capacity - size;
            match best {
                Some((_, best_leftover)) if leftover >= best_leftover => {}
                _ => best = Some((index, leftover)),
            }
        }

        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_leftover() {
        assert_eq!(BestFit.select(&[100, 50, 80], 60), Some(2));
        assert_eq!(BestFit.select(&[500, 200, 300], 150), Some(1));
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        assert_eq!(BestFit.select(&[90, 70, 70, 90], 60), Some(1));
    }

    #[test]
    fn test_exact_fit_wins() {
        assert_eq!(BestFit.select(&[100, 60, 61], 60), Some(1));
    }

    #[test]
    fn test_no_fit() {
        assert_eq!(BestFit.select(&[10, 20], 60), None);
    }
}
