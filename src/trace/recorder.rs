// Step recording for instrumented algorithms

use super::{Counters, GraphFrame, Highlights, Step, StepData, Trace};
use crate::input::graph::Graph;
use std::sync::Arc;

/// Appends immutable steps while an instrumented algorithm runs
///
/// Generators bump counters as they touch the buffer and call one of the
/// `record_*` methods wherever an observer should be able to pause. Every
/// recorded step copies the counters as they stand at that moment.
#[derive(Debug, Default)]
pub struct Recorder {
    counters: Counters,
    steps: Vec<Step>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    /// Count one element comparison
    pub fn compare(&mut self) {
        self.counters.comparisons += 1;
    }

    /// Count one swap, shift or write into the buffer
    pub fn swap(&mut self) {
        self.counters.swaps += 1;
    }

    /// Count `reads_and_writes` buffer accesses
    pub fn access(&mut self, reads_and_writes: u64) {
        self.counters.array_accesses += reads_and_writes;
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Number of steps recorded so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Record a step over an array buffer
    pub fn record_array(
        &mut self,
        values: &[i64],
        highlights: Highlights,
        description: impl Into<String>,
        line: Option<usize>,
    ) {
        self.push(StepData::Array(values.to_vec()), highlights, description, line);
    }

    /// Record a step over the shared graph
    pub fn record_graph(
        &mut self,
        graph: &Arc<Graph>,
        distances: Option<&[Option<u64>]>,
        highlights: Highlights,
        description: impl Into<String>,
        line: Option<usize>,
    ) {
        let frame = GraphFrame {
            graph: Arc::clone(graph),
            distances: distances.map(|d| d.to_vec()),
        };
        self.push(StepData::Graph(frame), highlights, description, line);
    }

    fn push(
        &mut self,
        data: StepData,
        highlights: Highlights,
        description: impl Into<String>,
        line: Option<usize>,
    ) {
        self.steps.push(Step {
            data,
            highlights,
            counters: self.counters,
            description: Some(description.into()),
            line,
        });
    }

    /// Seal the recorded steps into a trace
    pub fn finish(self, algorithm: &'static str) -> Trace {
        Trace::new(algorithm, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_capture_counters_at_record_time() {
        let mut recorder = Recorder::new();
        recorder.record_array(&[2, 1], Highlights::default(), "start", None);

        recorder.compare();
        recorder.access(2);
        recorder.record_array(&[2, 1], Highlights::comparing(&[0, 1]), "compare", Some(3));

        recorder.swap();
        recorder.access(4);
        recorder.record_array(&[1, 2], Highlights::swapping(&[0, 1]), "swap", Some(4));

        let trace = recorder.finish("test");
        assert_eq!(trace.len(), 3);
        assert_eq!(trace[0].counters, Counters::default());
        assert_eq!(
            trace[1].counters,
            Counters {
                comparisons: 1,
                swaps: 0,
                array_accesses: 2
            }
        );
        assert_eq!(trace[2].counters.swaps, 1);
        assert_eq!(trace[2].counters.array_accesses, 6);
        assert_eq!(trace[2].data.as_array(), Some(&[1, 2][..]));
        assert_eq!(trace[1].line, Some(3));
        assert_eq!(trace.algorithm(), Some("test"));
    }

    #[test]
    fn test_recorded_buffer_is_a_copy() {
        let mut values = vec![3, 2, 1];
        let mut recorder = Recorder::new();
        recorder.record_array(&values, Highlights::default(), "before", None);
        values.swap(0, 2);
        recorder.record_array(&values, Highlights::default(), "after", None);

        let trace = recorder.finish("test");
        assert_eq!(trace[0].data.as_array(), Some(&[3, 2, 1][..]));
        assert_eq!(trace[1].data.as_array(), Some(&[1, 2, 3][..]));
    }
}
