//! Per-strategy reports
//!
//! Reports are plain data built from an engine run. They render either as
//! the classic text listing (1-based process and block numbers) or as JSON.

use crate::core::allocator::Strategy;
use crate::core::config::OutputFormat;
use crate::core::error::Result;
use crate::core::fragmentation::{fragmentation, FragmentationTotals};
use crate::core::frames::Frame;
use crate::core::model::{Block, EngineRunResult};
use crate::core::units::format_size;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of the allocation listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementLine {
    pub process_index: usize,
    pub process_size: u64,

    /// Assigned block, `None` if not allocated
    pub block: Option<usize>,

    /// Original capacity of the assigned block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_capacity: Option<u64>,

    pub internal_fragmentation: u64,
}

/// Everything reported for one strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy: Strategy,
    pub placements: Vec<PlacementLine>,

    /// Final capacity of each block
    pub leftover: Vec<u64>,

    pub totals: FragmentationTotals,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
}

impl StrategyReport {
    /// Build a report from a finished run
    pub fn from_run(initial_blocks: &[Block], result: &EngineRunResult) -> Self {
        let placements = result
            .records
            .iter()
            .map(|record| PlacementLine {
                process_index: record.process_index,
                process_size: record.process_size,
                block: record.block,
                block_capacity: record
                    .block
                    .and_then(|b| initial_blocks.get(b))
                    .map(Block::capacity),
                internal_fragmentation: record.internal_fragmentation,
            })
            .collect();

        StrategyReport {
            strategy: result.strategy,
            placements,
            leftover: result.final_capacities.clone(),
            totals: fragmentation(initial_blocks, result),
            frames: Vec::new(),
        }
    }

    /// Attach step-by-step frames
    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = frames;
        self
    }
}

impl fmt::Display for StrategyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.strategy)?;

        if !self.frames.is_empty() {
            for frame in &self.frames {
                write!(f, "{}", frame)?;
            }
        }

        writeln!(f, "Allocation Results:")?;
        for line in &self.placements {
            write!(
                f,
                "Process {} ({}) -> ",
                line.process_index + 1,
                format_size(line.process_size)
            )?;
            match (line.block, line.block_capacity) {
                (Some(block), Some(capacity)) => writeln!(
                    f,
                    "Block {} ({}), Internal Fragmentation: {} KB",
                    block + 1,
                    format_size(capacity),
                    line.internal_fragmentation
                )?,
                _ => writeln!(f, "Not Allocated")?,
            }
        }

        let leftover: Vec<String> = self.leftover.iter().map(|&kb| format_size(kb)).collect();
        writeln!(f, "Leftover Memory in Blocks: {}", leftover.join(", "))?;
        writeln!(f, "Total Internal Fragmentation: {} KB", self.totals.internal)?;
        writeln!(f, "Total External Fragmentation: {} KB", self.totals.external)
    }
}

/// Reports for every strategy of a simulation, in run order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub runs: Vec<StrategyReport>,
}

impl SimulationReport {
    pub fn get(&self, strategy: Strategy) -> Option<&StrategyReport> {
        self.runs.iter().find(|r| r.strategy == strategy)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render in the requested format; JSON output carries a trailing newline
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(format!("{}\n", self.to_json()?)),
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, run) in self.runs.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", run)?;
        }
        Ok(())
    }
}
