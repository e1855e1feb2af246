//! Step-by-step occupancy snapshots
//!
//! A run is replayed into one immutable [`Frame`] per process. Frame `k`
//! shows every block with the processes placed into it among the first
//! `k + 1` records, in placement order, and the capacity still free at that
//! point.

use crate::core::model::{Block, EngineRunResult};
use crate::core::units::format_size;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A process occupying part of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub process_index: usize,
    pub size: u64,
}

/// One block as seen in a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockFrame {
    pub index: usize,
    pub capacity: u64,
    pub segments: Vec<Segment>,
    pub free: u64,
}

/// Occupancy after one process was handled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Index of the process handled in this step (0-based)
    pub step: usize,

    /// Block that received the process, `None` if it was rejected
    pub placed_in: Option<usize>,

    pub blocks: Vec<BlockFrame>,
}

/// Replay `result` over `blocks` into one frame per record
pub fn render_frames(blocks: &[Block], result: &EngineRunResult) -> Vec<Frame> {
    let mut current: Vec<BlockFrame> = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| BlockFrame {
            index,
            capacity: block.capacity(),
            segments: Vec::new(),
            free: block.capacity(),
        })
        .collect();

    let mut frames = Vec::with_capacity(result.records.len());
    for record in &result.records {
        if let Some(block) = record.block.and_then(|b| current.get_mut(b)) {
            block.segments.push(Segment {
                process_index: record.process_index,
                size: record.process_size,
            });
            block.free = record.internal_fragmentation;
        }

        frames.push(Frame {
            step: record.process_index,
            placed_in: record.block,
            blocks: current.clone(),
        });
    }

    frames
}

impl fmt::Display for BlockFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block {} [", self.index + 1)?;
        for segment in &self.segments {
            write!(
                f,
                "P{} {} | ",
                segment.process_index + 1,
                format_size(segment.size)
            )?;
        }
        write!(f, "free {}]", format_size(self.free))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.placed_in {
            Some(block) => writeln!(
                f,
                "Step {}: Process {} -> Block {}",
                self.step + 1,
                self.step + 1,
                block + 1
            )?,
            None => writeln!(
                f,
                "Step {}: Process {} -> Not Allocated",
                self.step + 1,
                self.step + 1
            )?,
        }
        for block in &self.blocks {
            writeln!(f, "  {}", block)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::allocator::{allocate, Strategy};
    use crate::core::model::Process;

    #[test]
    fn test_one_frame_per_process() {
        let blocks = Block::from_capacities([100, 50]);
        let result = allocate(
            Strategy::FirstFit,
            &blocks,
            &Process::from_sizes([60, 30, 500]),
        );

        let frames = render_frames(&blocks, &result);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].step, 0);
        assert_eq!(frames[2].step, 2);
    }

    #[test]
    fn test_frames_are_cumulative() {
        let blocks = Block::from_capacities([100]);
        let result = allocate(Strategy::FirstFit, &blocks, &Process::from_sizes([60, 30]));
        let frames = render_frames(&blocks, &result);

        assert_eq!(frames[0].blocks[0].segments.len(), 1);
        assert_eq!(frames[0].blocks[0].free, 40);

        assert_eq!(
            frames[1].blocks[0].segments,
            vec![
                Segment { process_index: 0, size: 60 },
                Segment { process_index: 1, size: 30 },
            ]
        );
        assert_eq!(frames[1].blocks[0].free, 10);
    }

    #[test]
    fn test_rejected_process_keeps_occupancy() {
        let blocks = Block::from_capacities([100]);
        let result = allocate(Strategy::BestFit, &blocks, &Process::from_sizes([60, 90]));
        let frames = render_frames(&blocks, &result);

        assert_eq!(frames[1].placed_in, None);
        assert_eq!(frames[1].blocks, frames[0].blocks);
    }

    #[test]
    fn test_frame_text() {
        let blocks = Block::from_capacities([100, 2048]);
        let result = allocate(Strategy::FirstFit, &blocks, &Process::from_sizes([60, 30]));
        let frames = render_frames(&blocks, &result);

        let text = frames[1].to_string();
        assert!(text.starts_with("Step 2: Process 2 -> Block 1\n"));
        assert!(text.contains("Block 1 [P1 60 KB | P2 30 KB | free 10 KB]"));
        assert!(text.contains("Block 2 [free 2 MB]"));
    }
}
