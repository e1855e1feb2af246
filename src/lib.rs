//! # memfit - Fixed-Partition Allocation Simulator
//!
//! `memfit` places a sequence of process requests into a fixed list of memory
//! blocks using the classic placement policies and reports the resulting
//! fragmentation:
//!
//! - **First fit**: lowest-index block that is large enough
//! - **Best fit**: block that leaves the smallest leftover
//! - **Worst fit**: block that leaves the largest leftover
//!
//! A block keeps accepting processes while its remaining capacity suffices.
//! Every strategy runs on its own copy of the blocks, so runs never observe
//! each other.
//!
//! ## Quick Start
//!
//! ```rust
//! use memfit::{Simulation, Strategy, Result};
//!
//! # fn main() -> Result<()> {
//! let sim = Simulation::builder()
//!     .blocks("100 KB, 500 KB, 200 KB, 300 KB, 600 KB")
//!     .processes("212 KB, 417 KB, 112 KB, 426 KB")
//!     .build()?;
//!
//! let report = sim.run();
//! let best = report.get(Strategy::BestFit).unwrap();
//! assert_eq!(best.placements[0].block, Some(3));
//!
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! ## Engine API
//!
//! ```rust
//! use memfit::{allocate, fragmentation, Block, Process, Strategy};
//!
//! let blocks = Block::from_capacities([100, 30]);
//! let procs = Process::from_sizes([10]);
//!
//! let result = allocate(Strategy::FirstFit, &blocks, &procs);
//! let totals = fragmentation(&blocks, &result);
//! assert_eq!(totals.internal, 90);
//! assert_eq!(totals.external, 30);
//! ```

pub mod core;

pub use crate::core::{allocator, config, error, fragmentation, frames, model, report, units};

// Re-export the types most callers need
pub use crate::core::{
    allocator::{allocate, AllocationEngine, PlacementPolicy, Strategy},
    config::{OutputFormat, SimulationConfig},
    error::{MemfitError, Result},
    fragmentation::{fragmentation, FragmentationTotals},
    frames::{render_frames, Frame},
    model::{AllocationRecord, Block, EngineRunResult, Process},
    report::{PlacementLine, SimulationReport, StrategyReport},
    units::{format_size, parse_size, parse_size_list},
};

use tracing::{debug, info};

/// A set of blocks and processes to run through one or more strategies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    blocks: Vec<Block>,
    processes: Vec<Process>,
    strategies: Vec<Strategy>,
    parallel: bool,
    frames: bool,
    format: OutputFormat,
}

impl Simulation {
    /// Create a simulation running all three strategies sequentially
    pub fn new(blocks: Vec<Block>, processes: Vec<Process>) -> Self {
        Simulation {
            blocks,
            processes,
            strategies: Strategy::ALL.to_vec(),
            parallel: false,
            frames: false,
            format: OutputFormat::Text,
        }
    }

    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    /// Build a simulation from a validated configuration file
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        SimulationBuilder::new().config(config.clone()).build()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Output format the report should be rendered in
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Run a single strategy on a fresh copy of the blocks
    pub fn run_strategy(&self, strategy: Strategy) -> StrategyReport {
        let result = allocate(strategy, &self.blocks, &self.processes);

        info!(
            strategy = %strategy,
            processes = result.records.len(),
            unallocated = result.unallocated_count(),
            "strategy run complete"
        );

        let report = StrategyReport::from_run(&self.blocks, &result);
        if self.frames {
            report.with_frames(render_frames(&self.blocks, &result))
        } else {
            report
        }
    }

    /// Run every configured strategy, reports in strategy order
    pub fn run(&self) -> SimulationReport {
        debug!(
            blocks = self.blocks.len(),
            processes = self.processes.len(),
            parallel = self.parallel,
            "starting simulation"
        );

        let runs = if self.parallel && self.strategies.len() > 1 {
            self.run_parallel()
        } else {
            self.strategies
                .iter()
                .map(|&strategy| self.run_strategy(strategy))
                .collect()
        };

        SimulationReport { runs }
    }

    /// One scoped thread per strategy; runs share nothing mutable
    fn run_parallel(&self) -> Vec<StrategyReport> {
        let joined = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = self
                .strategies
                .iter()
                .map(|&strategy| scope.spawn(move |_| self.run_strategy(strategy)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<std::thread::Result<Vec<_>>>()
        });

        match joined {
            Ok(Ok(reports)) => reports,
            Ok(Err(panic)) | Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Builder for a [`Simulation`]
///
/// Explicit settings take precedence over an attached [`SimulationConfig`].
///
/// # Examples
///
/// ```rust
/// use memfit::{SimulationBuilder, Strategy};
///
/// # fn main() -> memfit::Result<()> {
/// let sim = SimulationBuilder::new()
///     .blocks("100 KB, 1 MB")
///     .processes("600 KB")
///     .strategy(Strategy::WorstFit)
///     .with_frames()
///     .build()?;
///
/// assert_eq!(sim.strategies(), &[Strategy::WorstFit]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    blocks: Option<String>,
    processes: Option<String>,
    strategies: Vec<Strategy>,
    parallel: bool,
    frames: bool,
    format: Option<OutputFormat>,
    config: Option<SimulationConfig>,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma-separated block sizes, e.g. `"100 KB, 1 MB"`
    pub fn blocks<S: Into<String>>(mut self, list: S) -> Self {
        self.blocks = Some(list.into());
        self
    }

    /// Comma-separated process sizes in arrival order
    pub fn processes<S: Into<String>>(mut self, list: S) -> Self {
        self.processes = Some(list.into());
        self
    }

    /// Add a strategy to run; without any, all three run
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        if !self.strategies.contains(&strategy) {
            self.strategies.push(strategy);
        }
        self
    }

    pub fn strategies<I: IntoIterator<Item = Strategy>>(self, strategies: I) -> Self {
        strategies.into_iter().fold(self, Self::strategy)
    }

    /// Run strategies on separate threads
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Include step-by-step frames in reports
    pub fn with_frames(mut self) -> Self {
        self.frames = true;
        self
    }

    /// Report output format; overrides the configuration file
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Use a configuration file as the base settings
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<Simulation> {
        let config = self.config.as_ref();

        let block_sizes = match (&self.blocks, config) {
            (Some(list), _) => parse_size_list(list)?,
            (None, Some(config)) => config.block_sizes()?,
            (None, None) => return Err(MemfitError::Config("no blocks given".to_string())),
        };

        let process_sizes = match (&self.processes, config) {
            (Some(list), _) => parse_size_list(list)?,
            (None, Some(config)) => config.process_sizes()?,
            (None, None) => return Err(MemfitError::Config("no processes given".to_string())),
        };

        let strategies = if !self.strategies.is_empty() {
            self.strategies
        } else if let Some(config) = config {
            config.strategy_list()?
        } else {
            Strategy::ALL.to_vec()
        };

        Ok(Simulation {
            blocks: Block::from_capacities(block_sizes),
            processes: Process::from_sizes(process_sizes),
            strategies,
            parallel: self.parallel || config.map_or(false, |c| c.parallel),
            frames: self.frames || config.map_or(false, |c| c.frames),
            format: self
                .format
                .or(config.map(|c| c.format))
                .unwrap_or_default(),
        })
    }
}
