//! Instrumented searches over a sorted working copy
//!
//! One step per probe (one comparison, one access), then a terminal step:
//! either the single step whose `found` highlight marks the match, or a
//! not-found step with no match. Terminal steps carry no line; the probe
//! before them points at the deciding comparison.

use super::{AlgorithmInfo, Category, Complexity, Generator};
use crate::trace::{Highlights, Recorder};

pub(super) fn entries() -> Vec<AlgorithmInfo> {
    vec![
        AlgorithmInfo {
            id: "linear-search",
            name: "Linear Search",
            category: Category::Searching,
            complexity: Complexity::new("O(1)", "O(n)", "O(n)", "O(1)"),
            description: "Checks every element in order until the target turns up.",
            code: LINEAR_CODE,
            generator: Generator::Search(linear_search),
        },
        AlgorithmInfo {
            id: "binary-search",
            name: "Binary Search",
            category: Category::Searching,
            complexity: Complexity::new("O(1)", "O(log n)", "O(log n)", "O(1)"),
            description: "Halves the search interval on every probe of its midpoint.",
            code: BINARY_CODE,
            generator: Generator::Search(binary_search),
        },
        AlgorithmInfo {
            id: "jump-search",
            name: "Jump Search",
            category: Category::Searching,
            complexity: Complexity::new("O(1)", "O(√n)", "O(√n)", "O(1)"),
            description: "Jumps ahead in blocks of √n until a block may hold the target, \
                          then scans that block.",
            code: JUMP_CODE,
            generator: Generator::Search(jump_search),
        },
    ]
}

fn probe(rec: &mut Recorder) {
    rec.compare();
    rec.access(1);
}

fn found(rec: &mut Recorder, a: &[i64], index: usize, target: i64) {
    let highlights = Highlights {
        found: Some(index),
        ..Highlights::default().with_current(index)
    };
    rec.record_array(
        a,
        highlights,
        format!("Found target {} at index {}", target, index),
        None,
    );
}

fn not_found(rec: &mut Recorder, a: &[i64], reason: String) {
    rec.record_array(a, Highlights::default(), reason, None);
}

const LINEAR_CODE: &str = "\
fn linear_search(a: &[i64], target: i64) -> Option<usize> {
    for (i, &value) in a.iter().enumerate() {
        if value == target {
            return Some(i);
        }
    }
    None
}";

pub fn linear_search(a: &[i64], target: i64, rec: &mut Recorder) {
    for (i, &value) in a.iter().enumerate() {
        probe(rec);
        rec.record_array(
            a,
            Highlights::default().with_current(i),
            format!("Checking index {}: {} == {}?", i, value, target),
            Some(3),
        );

        if value == target {
            found(rec, a, i, target);
            return;
        }
    }

    not_found(rec, a, format!("Target {} not found", target));
}

const BINARY_CODE: &str = "\
fn binary_search(a: &[i64], target: i64) -> Option<usize> {
    let (mut low, mut high) = (0, a.len().checked_sub(1)?);
    while low <= high {
        let mid = (low + high) / 2;
        if a[mid] == target {
            return Some(mid);
        } else if a[mid] < target {
            low = mid + 1;
        } else {
            high = mid.checked_sub(1)?;
        }
    }
    None
}";

pub fn binary_search(a: &[i64], target: i64, rec: &mut Recorder) {
    let Some(mut high) = a.len().checked_sub(1) else {
        not_found(rec, a, format!("Array is empty, target {} not found", target));
        return;
    };
    let mut low = 0;

    while low <= high {
        let mid = (low + high) / 2;
        probe(rec);

        let verdict = if a[mid] == target {
            "match"
        } else if a[mid] < target {
            "searching right half"
        } else {
            "searching left half"
        };
        rec.record_array(
            a,
            Highlights::comparing(&[low, high]).with_current(mid),
            format!(
                "Checking middle index {} of {}..={}: {} vs {}, {}",
                mid, low, high, a[mid], target, verdict
            ),
            Some(5),
        );

        if a[mid] == target {
            found(rec, a, mid, target);
            return;
        } else if a[mid] < target {
            low = mid + 1;
        } else {
            match mid.checked_sub(1) {
                Some(next) => high = next,
                None => break,
            }
        }
    }

    not_found(rec, a, format!("Target {} not found", target));
}

const JUMP_CODE: &str = "\
fn jump_search(a: &[i64], target: i64) -> Option<usize> {
    let n = a.len();
    let step = (n as f64).sqrt() as usize;
    let (mut prev, mut next) = (0, step.min(n));
    while a[next - 1] < target {
        prev = next;
        if prev >= n {
            return None;
        }
        next = (next + step).min(n);
    }
    for i in prev..next {
        if a[i] == target {
            return Some(i);
        }
        if a[i] > target {
            return None;
        }
    }
    None
}";

/// Block size used by jump search: `floor(sqrt(n))`
pub fn jump_block_size(n: usize) -> usize {
    (n as f64).sqrt() as usize
}

pub fn jump_search(a: &[i64], target: i64, rec: &mut Recorder) {
    let n = a.len();
    if n == 0 {
        not_found(rec, a, format!("Array is empty, target {} not found", target));
        return;
    }

    let step = jump_block_size(n);
    let mut prev = 0;
    let mut next = step.min(n);

    loop {
        probe(rec);
        let block_end = next - 1;
        let below = a[block_end] < target;
        rec.record_array(
            a,
            Highlights::comparing(&[prev, block_end]).with_current(block_end),
            format!(
                "Block {}..={}: last value {} {} {}",
                prev,
                block_end,
                a[block_end],
                if below { "<" } else { ">=" },
                target
            ),
            Some(5),
        );

        if !below {
            break;
        }

        prev = next;
        if prev >= n {
            not_found(rec, a, format!("Jumped past the end, target {} not found", target));
            return;
        }
        next = (next + step).min(n);
    }

    for i in prev..next {
        probe(rec);
        rec.record_array(
            a,
            Highlights::comparing(&[prev, next - 1]).with_current(i),
            format!("Scanning block: index {} holds {}", i, a[i]),
            Some(13),
        );

        if a[i] == target {
            found(rec, a, i, target);
            return;
        }
        if a[i] > target {
            not_found(rec, a, format!("Passed {} without a match, target not found", target));
            return;
        }
    }

    not_found(rec, a, format!("Reached the end of the block, target {} not found", target));
}
