//! Fragmentation totals for one engine run
//!
//! Internal fragmentation is the leftover recorded at each placement. External
//! fragmentation only counts blocks that no process ever touched, at their
//! original capacity; a block that received at least one process contributes
//! nothing, whatever it has left.

use crate::core::model::{Block, EngineRunResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Run totals, all in KB
///
/// Totals are `u128`: every single size fits in `u64`, but their sum may not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentationTotals {
    /// Sum of per-process internal fragmentation
    pub internal: u128,

    /// Original capacity of every block never selected during the run
    pub external: u128,

    /// Sum of final capacities across all blocks, touched or not
    pub leftover: u128,
}

/// Compute fragmentation totals for `result`
///
/// `initial_blocks` must be the block sequence the run started from.
pub fn fragmentation(initial_blocks: &[Block], result: &EngineRunResult) -> FragmentationTotals {
    let internal = result
        .records
        .iter()
        .map(|r| u128::from(r.internal_fragmentation))
        .sum();

    let touched: HashSet<usize> = result.records.iter().filter_map(|r| r.block).collect();
    let external = initial_blocks
        .iter()
        .enumerate()
        .filter(|(index, _)| !touched.contains(index))
        .map(|(_, block)| u128::from(block.capacity()))
        .sum();

    FragmentationTotals {
        internal,
        external,
        leftover: result
            .final_capacities
            .iter()
            .map(|&capacity| u128::from(capacity))
            .sum(),
    }
}
