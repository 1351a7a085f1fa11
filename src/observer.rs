//! Progress events and the sinks that receive them.
//!
//! Runners report progress as [`SearchEvent`] values handed to an
//! [`Observer`]. Observers only watch: nothing they do feeds back into the
//! search, so swapping one for another never changes a seeded run.
//!
//! # Sinks
//!
//! - [`NoopObserver`]: discards everything (used by the plain `run` entry points)
//! - [`LogObserver`]: forwards events to the `log` facade
//! - [`EventLog`]: records events in memory, handy for assertions
//! - any `FnMut(&SearchEvent)` closure

use log::Level;

/// A periodic snapshot of a simulated annealing run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealSnapshot {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Temperature after this iteration's cooling step.
    pub temperature: f64,
    /// Cost of the working solution.
    pub current_cost: f64,
    /// Lowest cost seen so far.
    pub best_cost: f64,
}

/// A periodic snapshot of a genetic algorithm run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationSnapshot {
    /// One-based generation number.
    pub generation: usize,
    /// Fittest chromosome of this generation.
    pub generation_best: f64,
    /// Mean fitness of this generation.
    pub mean_fitness: f64,
    /// Fittest chromosome seen in the whole run.
    pub best_fitness: f64,
}

/// Structured progress reported by the runners.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// One depth-limited pass of iterative deepening finished.
    DepthCompleted {
        depth: usize,
        expansions: usize,
        found: bool,
    },
    /// One beam stage was expanded and pruned.
    BeamStage {
        stage: usize,
        expanded: usize,
        retained: usize,
        best_score: f64,
    },
    /// Simulated annealing status.
    Annealing(AnnealSnapshot),
    /// Genetic algorithm status.
    Generation(GenerationSnapshot),
}

/// Receives progress events from a runner.
pub trait Observer {
    fn observe(&mut self, event: &SearchEvent);
}

impl<F: FnMut(&SearchEvent)> Observer for F {
    fn observe(&mut self, event: &SearchEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&mut self, _event: &SearchEvent) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    level: Level,
}

impl LogObserver {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Observer for LogObserver {
    fn observe(&mut self, event: &SearchEvent) {
        match event {
            SearchEvent::DepthCompleted {
                depth,
                expansions,
                found,
            } => log::log!(
                self.level,
                "depth {depth}: {expansions} expansions, found={found}"
            ),
            SearchEvent::BeamStage {
                stage,
                expanded,
                retained,
                best_score,
            } => log::log!(
                self.level,
                "stage {stage}: kept {retained}/{expanded}, best score {best_score:.4}"
            ),
            SearchEvent::Annealing(s) => log::log!(
                self.level,
                "iteration {}: temp={:.2}, current={:.4}, best={:.4}",
                s.iteration,
                s.temperature,
                s.current_cost,
                s.best_cost
            ),
            SearchEvent::Generation(s) => log::log!(
                self.level,
                "generation {}: best={:.2}, mean={:.2}, overall={:.2}",
                s.generation,
                s.generation_best,
                s.mean_fitness,
                s.best_fitness
            ),
        }
    }
}

/// Records every event in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<SearchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annealing snapshots in emission order.
    pub fn anneal_snapshots(&self) -> Vec<AnnealSnapshot> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Annealing(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    /// Generation snapshots in emission order.
    pub fn generation_snapshots(&self) -> Vec<GenerationSnapshot> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Generation(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl Observer for EventLog {
    fn observe(&mut self, event: &SearchEvent) {
        self.events.push(event.clone());
    }
}
