//! Value types shared by the allocation engine and its consumers
//!
//! Blocks and processes are identified by their position in the input
//! sequence. Sizes are whole kilobytes.

use crate::core::allocator::Strategy;
use crate::core::error::{MemfitError, Result};
use serde::{Deserialize, Serialize};

/// A fixed memory partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    capacity: u64,
}

impl Block {
    /// Create a block, rejecting negative capacities
    pub fn new(capacity: i64) -> Result<Self> {
        let capacity = u64::try_from(capacity).map_err(|_| MemfitError::InvalidSize(capacity))?;
        Ok(Block { capacity })
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Block { capacity }
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Build a block sequence from capacities in input order
    pub fn from_capacities<I>(capacities: I) -> Vec<Block>
    where
        I: IntoIterator<Item = u64>,
    {
        capacities.into_iter().map(Block::with_capacity).collect()
    }
}

impl TryFrom<i64> for Block {
    type Error = MemfitError;

    fn try_from(capacity: i64) -> Result<Self> {
        Block::new(capacity)
    }
}

/// A single memory request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    size: u64,
}

impl Process {
    /// Create a process, rejecting negative sizes
    pub fn new(size: i64) -> Result<Self> {
        let size = u64::try_from(size).map_err(|_| MemfitError::InvalidSize(size))?;
        Ok(Process { size })
    }

    pub fn with_size(size: u64) -> Self {
        Process { size }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Build a process sequence from sizes in input order
    pub fn from_sizes<I>(sizes: I) -> Vec<Process>
    where
        I: IntoIterator<Item = u64>,
    {
        sizes.into_iter().map(Process::with_size).collect()
    }
}

impl TryFrom<i64> for Process {
    type Error = MemfitError;

    fn try_from(size: i64) -> Result<Self> {
        Process::new(size)
    }
}

/// Outcome of placing one process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// Position of the process in the input sequence
    pub process_index: usize,

    /// Size of the process (KB)
    pub process_size: u64,

    /// Block that received the process, `None` if no block fit
    pub block: Option<usize>,

    /// Capacity left in the block right after placement (0 if unallocated)
    pub internal_fragmentation: u64,
}

impl AllocationRecord {
    pub fn assigned(process_index: usize, process_size: u64, block: usize, leftover: u64) -> Self {
        AllocationRecord {
            process_index,
            process_size,
            block: Some(block),
            internal_fragmentation: leftover,
        }
    }

    pub fn unallocated(process_index: usize, process_size: u64) -> Self {
        AllocationRecord {
            process_index,
            process_size,
            block: None,
            internal_fragmentation: 0,
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.block.is_some()
    }
}

/// Everything one strategy produced over one fresh copy of the blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineRunResult {
    pub strategy: Strategy,

    /// One record per process, in process order
    pub records: Vec<AllocationRecord>,

    /// Capacity of every block after all processes were considered
    pub final_capacities: Vec<u64>,
}

impl EngineRunResult {
    /// Sum of process sizes assigned to `block`
    pub fn assigned_to(&self, block: usize) -> u64 {
        self.records
            .iter()
            .filter(|r| r.block == Some(block))
            .map(|r| r.process_size)
            .sum()
    }

    /// Number of processes that found no block
    pub fn unallocated_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_allocated()).count()
    }
}
