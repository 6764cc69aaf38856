//! Step records and the traces built from them
//!
//! This module provides the data every other layer reads:
//! - [`Step`]: an immutable, self-contained snapshot at one primitive-operation boundary
//! - [`Trace`]: the finite, indexable sequence of steps for one run
//! - [`recorder`]: the [`Recorder`] generators append steps to
//!
//! # Snapshot Model
//!
//! A step holds a full copy of the array buffer (or a shared handle to the
//! static graph plus per-step distances), never a diff against the previous
//! step. Any index of a trace can be displayed without replaying history.
//!
//! Counters are cumulative: within one trace they never decrease.

pub mod recorder;

pub use recorder::Recorder;

use crate::input::graph::Graph;
use serde::Serialize;
use std::ops::Index;
use std::sync::Arc;

/// Cumulative primitive-operation counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub comparisons: u64,
    pub swaps: u64,
    pub array_accesses: u64,
}

impl Counters {
    /// True when no counter in `self` exceeds its counterpart in `later`
    pub fn precedes(&self, later: &Counters) -> bool {
        self.comparisons <= later.comparisons
            && self.swaps <= later.swaps
            && self.array_accesses <= later.array_accesses
    }
}

/// Index/id subsets tagged by role
///
/// Indices refer to array positions for array steps and to node ids for graph steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlights {
    pub comparing: Vec<usize>,
    pub swapping: Vec<usize>,
    pub sorted: Vec<usize>,
    pub visited: Vec<usize>,
    pub path: Vec<usize>,
    pub pivot: Option<usize>,
    pub current: Option<usize>,
    /// Set on the single step that reports a search match
    pub found: Option<usize>,
}

impl Highlights {
    pub fn comparing(indices: &[usize]) -> Self {
        Highlights {
            comparing: indices.to_vec(),
            ..Highlights::default()
        }
    }

    pub fn swapping(indices: &[usize]) -> Self {
        Highlights {
            swapping: indices.to_vec(),
            ..Highlights::default()
        }
    }

    pub fn with_sorted(mut self, sorted: &[usize]) -> Self {
        self.sorted = sorted.to_vec();
        self
    }

    pub fn with_pivot(mut self, pivot: usize) -> Self {
        self.pivot = Some(pivot);
        self
    }

    pub fn with_current(mut self, current: usize) -> Self {
        self.current = Some(current);
        self
    }
}

/// Shared graph handle plus the per-step state that is not a highlight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphFrame {
    pub graph: Arc<Graph>,
    /// Tentative distances by node id (`None` = not yet reached); shortest-path only
    pub distances: Option<Vec<Option<u64>>>,
}

/// The primary data buffer captured by a step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepData {
    Array(Vec<i64>),
    Graph(GraphFrame),
}

impl StepData {
    pub fn as_array(&self) -> Option<&[i64]> {
        match self {
            StepData::Array(values) => Some(values),
            StepData::Graph(_) => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphFrame> {
        match self {
            StepData::Graph(frame) => Some(frame),
            StepData::Array(_) => None,
        }
    }
}

/// Snapshot of algorithm state at one primitive-operation boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub data: StepData,
    pub highlights: Highlights,
    pub counters: Counters,
    pub description: Option<String>,
    /// 1-based line in the algorithm's code listing
    pub line: Option<usize>,
}

/// Finite ordered sequence of steps for one (algorithm, input) run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trace {
    algorithm: Option<&'static str>,
    steps: Vec<Step>,
}

impl Trace {
    pub fn new(algorithm: &'static str, steps: Vec<Step>) -> Self {
        Trace {
            algorithm: Some(algorithm),
            steps,
        }
    }

    /// A trace with no steps, produced for unknown algorithms
    pub fn empty() -> Self {
        Trace::default()
    }

    /// Id of the algorithm that produced this trace, if any
    pub fn algorithm(&self) -> Option<&'static str> {
        self.algorithm
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the last step (0 for an empty trace)
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl Index<usize> for Trace {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
