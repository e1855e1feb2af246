//! Worst-fit placement
//!
//! Picks the block whose leftover after placement would be largest, keeping
//! the first candidate on ties.

use super::PlacementPolicy;

/// Block maximizing `capacity - size`
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFit;

impl PlacementPolicy for WorstFit {
    fn select(&self, capacities: &[u64], size: u64) -> Option<usize> {
        let mut worst: Option<(usize, u64)> = None;

        for (index, &capacity) in capacities.iter().enumerate() {
            if capacity < size {
                continue;
            }
            let leftover = capacity - size;
            match worst {
                Some((_, worst_leftover)) if leftover <= worst_leftover => {}
                _ => worst = Some((index, leftover)),
            }
        }

        worst.map(|(index, _)| index)
    }
}
