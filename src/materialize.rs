//! Step materializer
//!
//! Drains a generator into a finite, randomly indexable [`Trace`] before
//! playback starts. Materialization is synchronous and pure with respect to
//! its input: the same (algorithm, input) pair always produces a field-for-field
//! identical trace.

use crate::algorithms::{Generator, Registry};
use crate::config::Config;
use crate::error::TraceError;
use crate::input::TraceInput;
use crate::trace::{Recorder, Trace};
use tracing::{info, warn};

pub struct Materializer<'r> {
    registry: &'r Registry,
    max_input: usize,
}

impl Materializer<'static> {
    /// Materializer over the built-in registry with default limits
    pub fn builtin() -> Self {
        Materializer::new(Registry::builtin(), &Config::default())
    }
}

impl<'r> Materializer<'r> {
    pub fn new(registry: &'r Registry, config: &Config) -> Self {
        Materializer {
            registry,
            max_input: config.max_trace_input,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Run `algorithm` over `input` to completion
    ///
    /// Unknown ids yield an empty trace. Oversized inputs and inputs of the
    /// wrong kind are rejected before any step is generated.
    pub fn materialize(&self, algorithm: &str, input: &TraceInput) -> Result<Trace, TraceError> {
        let Some(info) = self.registry.get(algorithm) else {
            warn!(algorithm, "unknown algorithm, producing an empty trace");
            return Ok(Trace::empty());
        };

        if input.len() > self.max_input {
            return Err(TraceError::InvalidInput {
                len: input.len(),
                max: self.max_input,
            });
        }

        let mut recorder = Recorder::new();
        match (info.generator, input) {
            (Generator::Array(generate), TraceInput::Array(values)) => {
                generate(values, &mut recorder)
            }
            (Generator::Search(generate), TraceInput::Search(search)) => {
                generate(&search.sorted, search.target, &mut recorder)
            }
            (Generator::Graph(generate), TraceInput::Graph { graph, start }) => {
                generate(graph, *start, &mut recorder)
            }
            _ => {
                return Err(TraceError::InputMismatch {
                    algorithm: info.id,
                    expected: info.input_kind(),
                })
            }
        }

        let trace = recorder.finish(info.id);
        info!(
            algorithm = info.id,
            input_len = input.len(),
            steps = trace.len(),
            "materialized trace"
        );
        Ok(trace)
    }
}
