// Integration tests for the instrumented search generators

use algostep::algorithms::searching::jump_block_size;
use algostep::algorithms::InputKind;
use algostep::error::TraceError;
use algostep::input::{SearchInput, TraceInput};
use algostep::materialize::Materializer;
use algostep::trace::{Counters, Trace};

const SEARCHES: [&str; 3] = ["linear-search", "binary-search", "jump-search"];

fn search_trace(algorithm: &str, values: &[i64], target: i64) -> Trace {
    let input = TraceInput::Search(SearchInput::with_target(values, target));
    Materializer::builtin()
        .materialize(algorithm, &input)
        .expect("materialization failed")
}

fn found_indices(trace: &Trace) -> Vec<usize> {
    trace.iter().filter_map(|step| step.highlights.found).collect()
}

#[test]
fn test_binary_search_scenario() {
    let trace = search_trace("binary-search", &[1, 3, 5, 7, 9], 7);
    let last = trace.last().expect("empty trace");

    assert_eq!(last.highlights.found, Some(3));
    assert!(last.counters.comparisons <= 3);
    assert_eq!(last.counters.comparisons, 2);

    // Probes at mid 2, then mid 3
    let probes: Vec<Option<usize>> = trace
        .iter()
        .filter(|step| step.line == Some(5))
        .map(|step| step.highlights.current)
        .collect();
    assert_eq!(probes, vec![Some(2), Some(3)]);
}

#[test]
fn test_every_search_finds_present_target() {
    let values = [2, 4, 6, 8, 10, 12, 14, 16, 18];
    for (index, &target) in values.iter().enumerate() {
        for algorithm in SEARCHES {
            let trace = search_trace(algorithm, &values, target);
            assert_eq!(
                found_indices(&trace),
                vec![index],
                "{} looking for {}",
                algorithm,
                target
            );
            assert_eq!(trace.last().and_then(|s| s.highlights.found), Some(index));
        }
    }
}

#[test]
fn test_missing_target_has_no_match() {
    let values = [1, 3, 5, 7, 9];
    for target in [0, 4, 100] {
        for algorithm in SEARCHES {
            let trace = search_trace(algorithm, &values, target);
            assert!(
                found_indices(&trace).is_empty(),
                "{} reported a match for {}",
                algorithm,
                target
            );
            let last = trace.last().expect("empty trace");
            assert!(last.description.as_deref().unwrap_or("").contains("not found"));
        }
    }
}

#[test]
fn test_one_comparison_per_probe() {
    let trace = search_trace("linear-search", &[1, 3, 5, 7, 9], 7);
    let last = trace.last().expect("empty trace");
    assert_eq!(last.counters.comparisons, 4);
    assert_eq!(last.counters.array_accesses, 4);
    assert_eq!(last.counters.swaps, 0);
    // Four probes and the match
    assert_eq!(trace.len(), 5);
}

#[test]
fn test_jump_search_blocks() {
    assert_eq!(jump_block_size(0), 0);
    assert_eq!(jump_block_size(5), 2);
    assert_eq!(jump_block_size(16), 4);
    assert_eq!(jump_block_size(24), 4);

    // Blocks [1,3] and [5,7], then a scan of 5 and 7
    let trace = search_trace("jump-search", &[1, 3, 5, 7, 9], 7);
    assert_eq!(trace.last().and_then(|s| s.highlights.found), Some(3));
    assert_eq!(trace.last().map(|s| s.counters.comparisons), Some(4));
}

#[test]
fn test_jump_search_past_the_end() {
    let trace = search_trace("jump-search", &[1, 3, 5, 7, 9], 100);
    let last = trace.last().expect("empty trace");
    assert_eq!(last.line, None);
    assert_eq!(last.counters.comparisons, 3);
    // The deciding probe is the last block check
    assert_eq!(trace[trace.len() - 2].line, Some(5));
}

#[test]
fn test_terminal_step_carries_no_line() {
    for target in [7, 4] {
        for algorithm in SEARCHES {
            let trace = search_trace(algorithm, &[1, 3, 5, 7, 9], target);
            let last = trace.last().expect("empty trace");
            assert_eq!(last.line, None, "{} looking for {}", algorithm, target);
            for step in trace.iter().take(trace.len() - 1) {
                assert!(step.line.is_some(), "{} probe without a line", algorithm);
            }
        }
    }
}

#[test]
fn test_empty_input_yields_single_zero_step() {
    for algorithm in SEARCHES {
        let trace = search_trace(algorithm, &[], 5);
        assert_eq!(trace.len(), 1, "{}", algorithm);
        assert_eq!(trace[0].counters, Counters::default());
        assert_eq!(trace[0].highlights.found, None);
    }
}

#[test]
fn test_prepare_sorts_a_copy_and_targets_middle() {
    let raw = vec![9, 1, 7, 3, 5];
    let input = TraceInput::prepare(InputKind::Search, &raw, None, 0).expect("prepare failed");
    let TraceInput::Search(search) = &input else {
        panic!("expected a search input, got {:?}", input);
    };
    assert_eq!(search.sorted, vec![1, 3, 5, 7, 9]);
    assert_eq!(search.target, 5);
    assert_eq!(raw, vec![9, 1, 7, 3, 5]);

    let trace = Materializer::builtin()
        .materialize("binary-search", &input)
        .expect("materialization failed");
    assert_eq!(found_indices(&trace), vec![2]);
}

#[test]
fn test_search_rejects_plain_array() {
    let err = Materializer::builtin()
        .materialize("binary-search", &TraceInput::Array(vec![1, 2, 3]))
        .unwrap_err();
    assert_eq!(
        err,
        TraceError::InputMismatch {
            algorithm: "binary-search",
            expected: InputKind::Search,
        }
    );
}
