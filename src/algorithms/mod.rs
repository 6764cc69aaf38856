//! Instrumented algorithms and the registry that names them
//!
//! This module provides the step trace generators:
//! - [`sorting`]: bubble, selection, insertion, heap, quick and merge sort
//! - [`searching`]: linear, binary and jump search over a sorted copy
//! - [`graph`]: breadth-first, depth-first and shortest-path traversals
//!
//! # Registry
//!
//! [`Registry`] is an immutable lookup table from algorithm id to
//! [`AlgorithmInfo`]. [`Registry::builtin`] builds it once per process.
//! A missing id is an ordinary `None`, not a failure.
//!
//! # Generators
//!
//! A generator is a plain function of (input, parameters) that appends steps
//! to a [`Recorder`]. It never touches the caller's buffer and never draws
//! randomness, so the same input always yields the same trace.

pub mod graph;
pub mod searching;
pub mod sorting;

use crate::input::graph::Graph;
use crate::trace::Recorder;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sorting,
    Searching,
    Graph,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Sorting => "sorting",
            Category::Searching => "searching",
            Category::Graph => "graph",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// The shape of input a generator consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Any numeric sequence
    Array,
    /// A sorted working copy plus a target value
    Search,
    /// The graph fixture plus a start node
    Graph,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::Array => "an array",
            InputKind::Search => "a sorted array and a target",
            InputKind::Graph => "a graph and a start node",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

impl Complexity {
    pub const fn new(
        best: &'static str,
        average: &'static str,
        worst: &'static str,
        space: &'static str,
    ) -> Self {
        Complexity {
            best,
            average,
            worst,
            space,
        }
    }
}

/// Entry point of an instrumented algorithm, typed by the input it consumes
#[derive(Clone, Copy)]
pub enum Generator {
    Array(fn(&[i64], &mut Recorder)),
    Search(fn(&[i64], i64, &mut Recorder)),
    Graph(fn(&Arc<Graph>, usize, &mut Recorder)),
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generator::{:?}", self.input_kind())
    }
}

impl Generator {
    pub fn input_kind(&self) -> InputKind {
        match self {
            Generator::Array(_) => InputKind::Array,
            Generator::Search(_) => InputKind::Search,
            Generator::Graph(_) => InputKind::Graph,
        }
    }
}

/// Metadata and generator for one registered algorithm
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub complexity: Complexity,
    pub description: &'static str,
    /// Code listing that `Step::line` points into
    pub code: &'static str,
    #[serde(skip)]
    pub generator: Generator,
}

impl AlgorithmInfo {
    pub fn input_kind(&self) -> InputKind {
        self.generator.input_kind()
    }

    /// Line `line` (1-based) of the code listing
    pub fn code_line(&self, line: usize) -> Option<&'static str> {
        line.checked_sub(1)
            .and_then(|index| self.code.lines().nth(index))
    }
}

/// Immutable table of algorithms, iterated in declaration order
#[derive(Debug)]
pub struct Registry {
    entries: Vec<AlgorithmInfo>,
    by_id: FxHashMap<&'static str, usize>,
}

impl Registry {
    pub fn new(entries: Vec<AlgorithmInfo>) -> Self {
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(index, info)| (info.id, index))
            .collect();
        Registry { entries, by_id }
    }

    /// The process-wide registry of every built-in algorithm
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut entries = sorting::entries();
            entries.extend(searching::entries());
            entries.extend(graph::entries());
            Registry::new(entries)
        })
    }

    pub fn get(&self, id: &str) -> Option<&AlgorithmInfo> {
        self.by_id.get(id).map(|&index| &self.entries[index])
    }

    /// Position of `id` in declaration order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn entry(&self, index: usize) -> Option<&AlgorithmInfo> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlgorithmInfo> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|info| info.id)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &AlgorithmInfo> + '_ {
        self.entries
            .iter()
            .filter(move |info| info.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
