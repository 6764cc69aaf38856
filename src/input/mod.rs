//! Input preparation
//!
//! Supplies raw data to the trace generators:
//! - [`InputGenerator`]: seeded arrays in one of four [`ArrayShape`]s
//! - [`SearchInput`]: the sorted working copy and target a search consumes
//! - [`graph`]: the fixed weighted graph fixture for traversals
//! - [`TraceInput`]: the prepared input handed to the materializer
//!
//! All randomness in the system lives here. Generators and the materializer
//! are deterministic functions of the prepared input.
//!
//! Deriving a search's sorted copy and target is an explicit step
//! ([`TraceInput::prepare`]), never a side effect of what is on screen.

pub mod graph;

use crate::algorithms::InputKind;
use crate::config::InputLimits;
use crate::error::InputError;
use graph::Graph;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Ordering of a generated array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayShape {
    /// Uniform-random permutation of `1..=n`
    Random,
    /// Ascending `1..=n`
    Sorted,
    /// Descending `n..=1`
    Reversed,
    /// Ascending with `floor(n / 10)` random transpositions
    NearlySorted,
}

impl ArrayShape {
    pub const ALL: [ArrayShape; 4] = [
        ArrayShape::Random,
        ArrayShape::Sorted,
        ArrayShape::Reversed,
        ArrayShape::NearlySorted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ArrayShape::Random => "random",
            ArrayShape::Sorted => "sorted",
            ArrayShape::Reversed => "reversed",
            ArrayShape::NearlySorted => "nearly-sorted",
        }
    }
}

impl fmt::Display for ArrayShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ArrayShape {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArrayShape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| InputError::UnknownShape(s.to_string()))
    }
}

/// Build an array of `1..=size` in the requested shape
pub fn shaped_array<R: Rng + ?Sized>(size: usize, shape: ArrayShape, rng: &mut R) -> Vec<i64> {
    let mut values: Vec<i64> = (1..=size as i64).collect();

    match shape {
        ArrayShape::Random => values.shuffle(rng),
        ArrayShape::Sorted => {}
        ArrayShape::Reversed => values.reverse(),
        ArrayShape::NearlySorted => {
            for _ in 0..size / 10 {
                let a = rng.gen_range(0..size);
                let b = rng.gen_range(0..size);
                values.swap(a, b);
            }
        }
    }

    values
}

/// Seeded source of fresh input arrays
#[derive(Debug)]
pub struct InputGenerator {
    rng: StdRng,
    limits: InputLimits,
}

impl InputGenerator {
    pub fn new(limits: InputLimits) -> Self {
        InputGenerator {
            rng: StdRng::from_entropy(),
            limits,
        }
    }

    pub fn seeded(seed: u64, limits: InputLimits) -> Self {
        InputGenerator {
            rng: StdRng::seed_from_u64(seed),
            limits,
        }
    }

    pub fn limits(&self) -> InputLimits {
        self.limits
    }

    /// Generate a fresh array, rejecting sizes outside the configured bounds
    pub fn array(&mut self, size: usize, shape: ArrayShape) -> Result<Vec<i64>, InputError> {
        if size < self.limits.min_size || size > self.limits.max_size {
            return Err(InputError::SizeOutOfRange {
                size,
                min: self.limits.min_size,
                max: self.limits.max_size,
            });
        }

        let values = shaped_array(size, shape, &mut self.rng);
        debug!(size, %shape, "generated input array");
        Ok(values)
    }
}

/// Sorted working copy plus the value a search looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    pub sorted: Vec<i64>,
    pub target: i64,
}

impl SearchInput {
    /// Sort a copy of `values` and target its middle element
    ///
    /// An empty input targets `0`, which can never be found.
    pub fn prepare(values: &[i64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let target = sorted.get(sorted.len() / 2).copied().unwrap_or(0);
        SearchInput { sorted, target }
    }

    /// Sort a copy of `values` and search for an explicit target
    pub fn with_target(values: &[i64], target: i64) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        SearchInput { sorted, target }
    }
}

/// Prepared input for one generator run
#[derive(Debug, Clone, PartialEq)]
pub enum TraceInput {
    Array(Vec<i64>),
    Search(SearchInput),
    Graph { graph: Arc<Graph>, start: usize },
}

impl TraceInput {
    /// Turn raw data into the input an algorithm of `kind` consumes
    ///
    /// Arrays pass through unchanged, searches get a sorted copy and a target
    /// (`target` or the middle element), traversals get the sample graph.
    pub fn prepare(
        kind: InputKind,
        values: &[i64],
        target: Option<i64>,
        start: usize,
    ) -> Result<Self, InputError> {
        match kind {
            InputKind::Array => Ok(TraceInput::Array(values.to_vec())),
            InputKind::Search => Ok(TraceInput::Search(match target {
                Some(target) => SearchInput::with_target(values, target),
                None => SearchInput::prepare(values),
            })),
            InputKind::Graph => TraceInput::graph(Arc::new(Graph::sample()), start),
        }
    }

    /// A traversal input, rejecting start nodes outside the graph
    pub fn graph(graph: Arc<Graph>, start: usize) -> Result<Self, InputError> {
        if !graph.contains(start) {
            return Err(InputError::StartNodeOutOfRange {
                start,
                nodes: graph.node_count(),
            });
        }
        Ok(TraceInput::Graph { graph, start })
    }

    pub fn kind(&self) -> InputKind {
        match self {
            TraceInput::Array(_) => InputKind::Array,
            TraceInput::Search(_) => InputKind::Search,
            TraceInput::Graph { .. } => InputKind::Graph,
        }
    }

    /// Number of elements or nodes the generator will walk
    pub fn len(&self) -> usize {
        match self {
            TraceInput::Array(values) => values.len(),
            TraceInput::Search(search) => search.sorted.len(),
            TraceInput::Graph { graph, .. } => graph.node_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_copy(values: &[i64]) -> Vec<i64> {
        let mut copy = values.to_vec();
        copy.sort_unstable();
        copy
    }

    #[test]
    fn test_every_shape_is_a_permutation() {
        let mut generator = InputGenerator::seeded(42, InputLimits::default());
        for shape in ArrayShape::ALL {
            let values = generator.array(20, shape).unwrap();
            assert_eq!(sorted_copy(&values), (1..=20).collect::<Vec<i64>>());
        }
    }

    #[test]
    fn test_ordered_shapes() {
        let mut generator = InputGenerator::seeded(1, InputLimits::default());
        assert_eq!(generator.array(5, ArrayShape::Sorted).unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(generator.array(5, ArrayShape::Reversed).unwrap(), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_nearly_sorted_has_few_displacements() {
        let mut generator = InputGenerator::seeded(9, InputLimits::default());
        let values = generator.array(50, ArrayShape::NearlySorted).unwrap();
        let displaced = values
            .iter()
            .enumerate()
            .filter(|(i, v)| **v != *i as i64 + 1)
            .count();
        // five transpositions move at most ten elements
        assert!(displaced <= 10, "displaced {}", displaced);
    }

    #[test]
    fn test_same_seed_same_array() {
        let mut a = InputGenerator::seeded(7, InputLimits::default());
        let mut b = InputGenerator::seeded(7, InputLimits::default());
        assert_eq!(
            a.array(30, ArrayShape::Random).unwrap(),
            b.array(30, ArrayShape::Random).unwrap()
        );
    }

    #[test]
    fn test_size_bounds() {
        let mut generator = InputGenerator::seeded(0, InputLimits::default());
        assert_eq!(
            generator.array(4, ArrayShape::Random),
            Err(InputError::SizeOutOfRange {
                size: 4,
                min: 5,
                max: 50
            })
        );
        assert!(generator.array(51, ArrayShape::Random).is_err());
        assert!(generator.array(50, ArrayShape::Random).is_ok());
    }

    #[test]
    fn test_shape_names_round_trip() {
        for shape in ArrayShape::ALL {
            assert_eq!(shape.name().parse::<ArrayShape>(), Ok(shape));
        }
        assert!("zigzag".parse::<ArrayShape>().is_err());
    }

    #[test]
    fn test_search_preparation_sorts_a_copy() {
        let values = vec![9, 1, 7, 3, 5];
        let search = SearchInput::prepare(&values);
        assert_eq!(search.sorted, vec![1, 3, 5, 7, 9]);
        assert_eq!(search.target, 5);
        assert_eq!(values, vec![9, 1, 7, 3, 5]);

        let explicit = SearchInput::with_target(&values, 42);
        assert_eq!(explicit.target, 42);
    }

    #[test]
    fn test_prepare_by_kind() {
        let values = [3, 1, 2];
        assert_eq!(
            TraceInput::prepare(InputKind::Array, &values, None, 0).unwrap(),
            TraceInput::Array(vec![3, 1, 2])
        );
        assert_eq!(
            TraceInput::prepare(InputKind::Search, &values, Some(3), 0)
                .unwrap()
                .kind(),
            InputKind::Search
        );
        assert_eq!(
            TraceInput::prepare(InputKind::Graph, &values, None, 6),
            Err(InputError::StartNodeOutOfRange { start: 6, nodes: 6 })
        );
    }
}
