//! Placement strategies for fixed partitions
//!
//! Each strategy answers one question: given the current capacity of every
//! block and the size of the next process, which block (if any) receives it?
//!
//! - [`first_fit`] - lowest-index block that fits
//! - [`best_fit`] - block leaving the smallest leftover
//! - [`worst_fit`] - block leaving the largest leftover
//!
//! Ties in best-fit and worst-fit go to the lowest index. The
//! [`AllocationEngine`] applies a strategy to processes in input order and
//! shrinks the chosen block in place, so a block can receive several
//! processes while its remaining capacity still suffices.

pub mod best_fit;
pub mod first_fit;
pub mod worst_fit;

use crate::core::error::MemfitError;
use crate::core::model::{AllocationRecord, Block, EngineRunResult, Process};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use best_fit::BestFit;
use first_fit::FirstFit;
use worst_fit::WorstFit;

/// Block selection policy
///
/// Defines how a single process picks a block from the current capacities.
pub trait PlacementPolicy {
    /// Select a block for a process of `size` KB
    ///
    /// Only blocks with `capacities[i] >= size` may be returned. Returns
    /// `None` when no block is large enough.
    fn select(&self, capacities: &[u64], size: u64) -> Option<usize>;
}

/// The three placement policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    FirstFit,
    BestFit,
    WorstFit,
}

impl Strategy {
    /// All strategies in reporting order
    pub const ALL: [Strategy; 3] = [Strategy::FirstFit, Strategy::BestFit, Strategy::WorstFit];

    /// The policy implementing this strategy
    pub fn policy(self) -> &'static dyn PlacementPolicy {
        match self {
            Strategy::FirstFit => &FirstFit,
            Strategy::BestFit => &BestFit,
            Strategy::WorstFit => &WorstFit,
        }
    }
}

impl FromStr for Strategy {
    type Err = MemfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first-fit" | "first_fit" | "firstfit" | "first" => Ok(Strategy::FirstFit),
            "best-fit" | "best_fit" | "bestfit" | "best" => Ok(Strategy::BestFit),
            "worst-fit" | "worst_fit" | "worstfit" | "worst" => Ok(Strategy::WorstFit),
            _ => Err(MemfitError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::FirstFit => write!(f, "First Fit"),
            Strategy::BestFit => write!(f, "Best Fit"),
            Strategy::WorstFit => write!(f, "Worst Fit"),
        }
    }
}

/// Stepwise allocator over a private copy of block capacities
///
/// The caller's blocks are never touched. Each call to [`place`](Self::place)
/// handles the next process in order.
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    strategy: Strategy,
    capacities: Vec<u64>,
    records: Vec<AllocationRecord>,
}

impl AllocationEngine {
    /// Start a run over a fresh copy of `blocks`
    pub fn new(strategy: Strategy, blocks: &[Block]) -> Self {
        AllocationEngine {
            strategy,
            capacities: blocks.iter().map(Block::capacity).collect(),
            records: Vec::new(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Current capacity of every block
    pub fn capacities(&self) -> &[u64] {
        &self.capacities
    }

    /// Place the next process and return its record
    pub fn place(&mut self, process: &Process) -> AllocationRecord {
        let process_index = self.records.len();
        let size = process.size();

        let record = match self.strategy.policy().select(&self.capacities, size) {
            Some(block) => {
                let capacity = &mut self.capacities[block];
                let leftover = *capacity - size;
                *capacity = leftover;

                debug!(
                    strategy = %self.strategy,
                    process = process_index,
                    size,
                    block,
                    leftover,
                    "placed process"
                );
                AllocationRecord::assigned(process_index, size, block, leftover)
            }
            None => {
                warn!(
                    strategy = %self.strategy,
                    process = process_index,
                    size,
                    "no block large enough"
                );
                AllocationRecord::unallocated(process_index, size)
            }
        };

        self.records.push(record);
        record
    }

    /// Finish the run and hand back records and final capacities
    pub fn finish(self) -> EngineRunResult {
        EngineRunResult {
            strategy: self.strategy,
            records: self.records,
            final_capacities: self.capacities,
        }
    }
}

/// Run `strategy` over `processes` in order, on a copy of `blocks`
///
/// # Examples
///
/// ```
/// use memfit::{allocate, Block, Process, Strategy};
///
/// let blocks = Block::from_capacities([100, 50, 80]);
/// let procs = Process::from_sizes([60]);
///
/// let result = allocate(Strategy::BestFit, &blocks, &procs);
/// assert_eq!(result.records[0].block, Some(2));
/// assert_eq!(result.final_capacities, vec![100, 50, 20]);
/// ```
pub fn allocate(strategy: Strategy, blocks: &[Block], processes: &[Process]) -> EngineRunResult {
    let mut engine = AllocationEngine::new(strategy, blocks);
    for process in processes {
        engine.place(process);
    }
    engine.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(caps: &[u64]) -> Vec<Block> {
        Block::from_capacities(caps.iter().copied())
    }

    fn procs(sizes: &[u64]) -> Vec<Process> {
        Process::from_sizes(sizes.iter().copied())
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("first-fit".parse::<Strategy>().unwrap(), Strategy::FirstFit);
        assert_eq!("Best_Fit".parse::<Strategy>().unwrap(), Strategy::BestFit);
        assert_eq!("WORST".parse::<Strategy>().unwrap(), Strategy::WorstFit);
        assert!(matches!(
            "next-fit".parse::<Strategy>(),
            Err(MemfitError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::FirstFit.to_string(), "First Fit");
        assert_eq!(Strategy::BestFit.to_string(), "Best Fit");
        assert_eq!(Strategy::WorstFit.to_string(), "Worst Fit");
    }

    #[test]
    fn test_first_fit_picks_lowest_index() {
        let result = allocate(Strategy::FirstFit, &blocks(&[100, 50]), &procs(&[60]));
        assert_eq!(result.records[0].block, Some(0));
        assert_eq!(result.records[0].internal_fragmentation, 40);
        assert_eq!(result.final_capacities, vec![40, 50]);
    }

    #[test]
    fn test_best_fit_minimal_leftover() {
        let result = allocate(Strategy::BestFit, &blocks(&[100, 50, 80]), &procs(&[60]));
        assert_eq!(result.records[0].block, Some(2));
        assert_eq!(result.records[0].internal_fragmentation, 20);
    }

    #[test]
    fn test_worst_fit_maximal_leftover() {
        let result = allocate(Strategy::WorstFit, &blocks(&[100, 50, 80]), &procs(&[60]));
        assert_eq!(result.records[0].block, Some(0));
        assert_eq!(result.records[0].internal_fragmentation, 40);
    }

    #[test]
    fn test_unallocated_leaves_blocks_untouched() {
        for strategy in Strategy::ALL {
            let result = allocate(strategy, &blocks(&[50]), &procs(&[100]));
            assert_eq!(result.records[0], AllocationRecord::unallocated(0, 100));
            assert_eq!(result.final_capacities, vec![50]);
            assert_eq!(result.unallocated_count(), 1);
        }
    }

    #[test]
    fn test_shrunk_block_is_reused() {
        let result = allocate(Strategy::FirstFit, &blocks(&[100]), &procs(&[60, 30]));
        assert_eq!(result.records[0].block, Some(0));
        assert_eq!(result.records[0].internal_fragmentation, 40);
        assert_eq!(result.records[1].block, Some(0));
        assert_eq!(result.records[1].internal_fragmentation, 10);
        assert_eq!(result.final_capacities, vec![10]);
    }

    #[test]
    fn test_decisions_use_current_capacity() {
        // After the first process, block 0 has 40 left, so best-fit
        // prefers it over block 1 (50) for a 35 KB request
        let result = allocate(Strategy::BestFit, &blocks(&[100, 50]), &procs(&[60, 35]));
        assert_eq!(result.records[1].block, Some(0));
        assert_eq!(result.records[1].internal_fragmentation, 5);
    }

    #[test]
    fn test_caller_blocks_not_mutated() {
        let original = blocks(&[100, 200]);
        let snapshot = original.clone();
        let _ = allocate(Strategy::WorstFit, &original, &procs(&[150, 50]));
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_engine_steps_match_allocate() {
        let b = blocks(&[120, 40, 300]);
        let p = procs(&[30, 200, 90, 500]);

        let mut engine = AllocationEngine::new(Strategy::WorstFit, &b);
        let mut stepped = Vec::new();
        for process in &p {
            stepped.push(engine.place(process));
        }
        assert_eq!(engine.capacities().len(), 3);

        let result = engine.finish();
        assert_eq!(result.records, stepped);
        assert_eq!(result, allocate(Strategy::WorstFit, &b, &p));
    }

    #[test]
    fn test_zero_sized_process_fits_empty_block() {
        let result = allocate(Strategy::FirstFit, &blocks(&[0, 10]), &procs(&[0]));
        assert_eq!(result.records[0].block, Some(0));
        assert_eq!(result.records[0].internal_fragmentation, 0);
    }

    #[test]
    fn test_empty_inputs() {
        let result = allocate(Strategy::BestFit, &[], &procs(&[10]));
        assert_eq!(result.records[0].block, None);
        assert!(result.final_capacities.is_empty());

        let result = allocate(Strategy::BestFit, &blocks(&[10]), &[]);
        assert!(result.records.is_empty());
        assert_eq!(result.final_capacities, vec![10]);
    }
}
