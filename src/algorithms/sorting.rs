//! Instrumented sorting algorithms
//!
//! Every generator copies its input into a working buffer and records one
//! step per comparison and one per swap, shift or write. The last step of
//! every sort marks the whole index range as sorted.
//!
//! Quicksort and mergesort keep their recursion as an explicit stack of
//! pending ranges, so the emission order is plain data:
//! - quicksort partitions a range, then finishes its left part before its right
//! - mergesort finishes the left half, then the right half, then merges them
//!
//! Counter conventions: a comparison reads two elements (2 accesses), a swap
//! reads and writes both slots (4 accesses), a single write is 1 access.

use super::{AlgorithmInfo, Category, Complexity, Generator};
use crate::trace::{Highlights, Recorder};

pub(super) fn entries() -> Vec<AlgorithmInfo> {
    vec![
        AlgorithmInfo {
            id: "bubble",
            name: "Bubble Sort",
            category: Category::Sorting,
            complexity: Complexity::new("O(n)", "O(n²)", "O(n²)", "O(1)"),
            description: "Repeatedly swaps adjacent elements that are out of order. \
                          Stops early once a full pass makes no swap.",
            code: BUBBLE_CODE,
            generator: Generator::Array(bubble_sort),
        },
        AlgorithmInfo {
            id: "selection",
            name: "Selection Sort",
            category: Category::Sorting,
            complexity: Complexity::new("O(n²)", "O(n²)", "O(n²)", "O(1)"),
            description: "Scans the unsorted suffix for its minimum and swaps it into place, \
                          growing the sorted prefix by one element per pass.",
            code: SELECTION_CODE,
            generator: Generator::Array(selection_sort),
        },
        AlgorithmInfo {
            id: "insertion",
            name: "Insertion Sort",
            category: Category::Sorting,
            complexity: Complexity::new("O(n)", "O(n²)", "O(n²)", "O(1)"),
            description: "Builds the sorted prefix one element at a time, shifting larger \
                          elements right. Fast on small or nearly sorted inputs.",
            code: INSERTION_CODE,
            generator: Generator::Array(insertion_sort),
        },
        AlgorithmInfo {
            id: "heap",
            name: "Heap Sort",
            category: Category::Sorting,
            complexity: Complexity::new("O(n log n)", "O(n log n)", "O(n log n)", "O(1)"),
            description: "Builds a max heap, then repeatedly moves the maximum to the end \
                          of the array and restores the heap on the remainder.",
            code: HEAP_CODE,
            generator: Generator::Array(heap_sort),
        },
        AlgorithmInfo {
            id: "quick",
            name: "Quick Sort",
            category: Category::Sorting,
            complexity: Complexity::new("O(n log n)", "O(n log n)", "O(n²)", "O(log n)"),
            description: "Partitions around the last element of the range, then sorts the \
                          left and right parts.",
            code: QUICK_CODE,
            generator: Generator::Array(quick_sort),
        },
        AlgorithmInfo {
            id: "merge",
            name: "Merge Sort",
            category: Category::Sorting,
            complexity: Complexity::new("O(n log n)", "O(n log n)", "O(n log n)", "O(n)"),
            description: "Stable divide-and-conquer sort: sorts both halves, then merges \
                          them, taking from the left half on ties.",
            code: MERGE_CODE,
            generator: Generator::Array(merge_sort),
        },
    ]
}

const BUBBLE_CODE: &str = "\
fn bubble_sort(a: &mut [i64]) {
    let n = a.len();
    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            if a[j] > a[j + 1] {
                a.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}";

/// Record the terminal step of a sort: everything is in place
fn finish_sorted(rec: &mut Recorder, a: &[i64], name: &str) {
    let all: Vec<usize> = (0..a.len()).collect();
    rec.record_array(
        a,
        Highlights::default().with_sorted(&all),
        format!("{} complete", name),
        None,
    );
}

pub fn bubble_sort(input: &[i64], rec: &mut Recorder) {
    let mut a = input.to_vec();
    let n = a.len();
    let mut sorted = Vec::with_capacity(n);

    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;

        for j in 0..n - i - 1 {
            rec.compare();
            rec.access(2);
            rec.record_array(
                &a,
                Highlights::comparing(&[j, j + 1]).with_sorted(&sorted),
                format!("Comparing {} and {}", a[j], a[j + 1]),
                Some(6),
            );

            if a[j] > a[j + 1] {
                a.swap(j, j + 1);
                rec.swap();
                rec.access(4);
                rec.record_array(
                    &a,
                    Highlights::swapping(&[j, j + 1]).with_sorted(&sorted),
                    format!("Swapping {} and {}", a[j + 1], a[j]),
                    Some(7),
                );
                swapped = true;
            }
        }

        sorted.push(n - i - 1);

        if !swapped {
            rec.record_array(
                &a,
                Highlights::default().with_sorted(&sorted),
                "No swaps in this pass, the array is sorted",
                Some(12),
            );
            break;
        }
    }

    finish_sorted(rec, &a, "Bubble sort");
}

const SELECTION_CODE: &str = "\
fn selection_sort(a: &mut [i64]) {
    let n = a.len();
    for i in 0..n {
        let mut min = i;
        for j in i + 1..n {
            if a[j] < a[min] {
                min = j;
            }
        }
        if min != i {
            a.swap(i, min);
        }
    }
}";

pub fn selection_sort(input: &[i64], rec: &mut Recorder) {
    let mut a = input.to_vec();
    let n = a.len();
    let mut sorted = Vec::with_capacity(n);

    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        rec.record_array(
            &a,
            Highlights::default().with_current(i).with_sorted(&sorted),
            format!("Finding the minimum of indices {}..{}", i, n),
            Some(4),
        );

        for j in i + 1..n {
            rec.compare();
            rec.access(2);
            rec.record_array(
                &a,
                Highlights::comparing(&[j, min])
                    .with_current(i)
                    .with_sorted(&sorted),
                format!("Comparing {} with current minimum {}", a[j], a[min]),
                Some(6),
            );
            if a[j] < a[min] {
                min = j;
            }
        }

        if min != i {
            a.swap(i, min);
            rec.swap();
            rec.access(4);
            rec.record_array(
                &a,
                Highlights::swapping(&[i, min]).with_sorted(&sorted),
                format!("Moving minimum {} to index {}", a[i], i),
                Some(11),
            );
        }

        sorted.push(i);
    }

    finish_sorted(rec, &a, "Selection sort");
}

const INSERTION_CODE: &str = "\
fn insertion_sort(a: &mut [i64]) {
    for i in 1..a.len() {
        let key = a[i];
        let mut j = i;
        while j > 0 && a[j - 1] > key {
            a[j] = a[j - 1];
            j -= 1;
        }
        a[j] = key;
    }
}";

pub fn insertion_sort(input: &[i64], rec: &mut Recorder) {
    let mut a = input.to_vec();
    let n = a.len();

    if n == 0 {
        finish_sorted(rec, &a, "Insertion sort");
        return;
    }

    let mut sorted = vec![0];
    rec.record_array(
        &a,
        Highlights::default().with_sorted(&sorted),
        "Starting with the first element as sorted",
        Some(2),
    );

    for i in 1..n {
        let key = a[i];
        rec.access(1);
        rec.record_array(
            &a,
            Highlights::default().with_current(i).with_sorted(&sorted),
            format!("Inserting {} into the sorted prefix", key),
            Some(3),
        );

        let mut j = i;
        while j > 0 {
            rec.compare();
            rec.access(1);
            rec.record_array(
                &a,
                Highlights::comparing(&[j - 1, j]).with_sorted(&sorted),
                format!("Comparing {} with {}", a[j - 1], key),
                Some(5),
            );

            if a[j - 1] <= key {
                break;
            }

            a[j] = a[j - 1];
            rec.swap();
            rec.access(2);
            rec.record_array(
                &a,
                Highlights::swapping(&[j - 1, j]).with_sorted(&sorted),
                format!("Shifting {} to the right", a[j]),
                Some(6),
            );
            j -= 1;
        }

        a[j] = key;
        rec.access(1);
        sorted.push(i);
        rec.record_array(
            &a,
            Highlights::default().with_current(j).with_sorted(&sorted),
            format!("Placed {} at index {}", key, j),
            Some(9),
        );
    }

    finish_sorted(rec, &a, "Insertion sort");
}

const HEAP_CODE: &str = "\
fn heap_sort(a: &mut [i64]) {
    let n = a.len();
    for i in (0..n / 2).rev() {
        sift_down(a, n, i);
    }
    for end in (1..n).rev() {
        a.swap(0, end);
        sift_down(a, end, 0);
    }
}

fn sift_down(a: &mut [i64], n: usize, mut root: usize) {
    loop {
        let mut largest = root;
        let (left, right) = (2 * root + 1, 2 * root + 2);
        if left < n && a[left] > a[largest] {
            largest = left;
        }
        if right < n && a[right] > a[largest] {
            largest = right;
        }
        if largest == root {
            return;
        }
        a.swap(root, largest);
        root = largest;
    }
}";

pub fn heap_sort(input: &[i64], rec: &mut Recorder) {
    let mut a = input.to_vec();
    let n = a.len();
    let mut sorted = Vec::with_capacity(n);

    for i in (0..n / 2).rev() {
        rec.record_array(
            &a,
            Highlights::default().with_current(i),
            format!("Building max heap: sift down from index {}", i),
            Some(4),
        );
        sift_down(&mut a, n, i, &sorted, rec);
    }

    for end in (1..n).rev() {
        a.swap(0, end);
        rec.swap();
        rec.access(4);
        rec.record_array(
            &a,
            Highlights::swapping(&[0, end]).with_sorted(&sorted),
            format!("Moving max element {} to index {}", a[end], end),
            Some(7),
        );
        sorted.push(end);
        sift_down(&mut a, end, 0, &sorted, rec);
    }

    finish_sorted(rec, &a, "Heap sort");
}

fn sift_down(a: &mut [i64], n: usize, mut root: usize, sorted: &[usize], rec: &mut Recorder) {
    loop {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;
        rec.access(3);

        if left < n {
            rec.compare();
            rec.record_array(
                a,
                Highlights::comparing(&[largest, left]).with_sorted(sorted),
                format!("Comparing parent {} with left child {}", a[largest], a[left]),
                Some(16),
            );
            if a[left] > a[largest] {
                largest = left;
            }
        }

        if right < n {
            rec.compare();
            rec.record_array(
                a,
                Highlights::comparing(&[largest, right]).with_sorted(sorted),
                format!("Comparing largest {} with right child {}", a[largest], a[right]),
                Some(19),
            );
            if a[right] > a[largest] {
                largest = right;
            }
        }

        if largest == root {
            return;
        }

        a.swap(root, largest);
        rec.swap();
        rec.access(4);
        rec.record_array(
            a,
            Highlights::swapping(&[root, largest]).with_sorted(sorted),
            format!("Swapping {} and {} to restore the heap", a[root], a[largest]),
            Some(25),
        );
        root = largest;
    }
}

const QUICK_CODE: &str = "\
fn quick_sort(a: &mut [i64], low: usize, high: usize) {
    if low < high {
        let p = partition(a, low, high);
        if p > low { quick_sort(a, low, p - 1); }
        quick_sort(a, p + 1, high);
    }
}

fn partition(a: &mut [i64], low: usize, high: usize) -> usize {
    let pivot = a[high];
    let mut i = low;
    for j in low..high {
        if a[j] < pivot {
            a.swap(i, j);
            i += 1;
        }
    }
    a.swap(i, high);
    i
}";

pub fn quick_sort(input: &[i64], rec: &mut Recorder) {
    let mut a = input.to_vec();
    let mut sorted = Vec::with_capacity(a.len());

    // Half-open ranges; the top of the stack is always the leftmost pending range.
    let mut pending = vec![(0, a.len())];

    while let Some((low, end)) = pending.pop() {
        match end.saturating_sub(low) {
            0 => {}
            1 => sorted.push(low),
            _ => {
                let p = partition(&mut a, low, end - 1, &mut sorted, rec);
                pending.push((p + 1, end));
                pending.push((low, p));
            }
        }
    }

    finish_sorted(rec, &a, "Quick sort");
}

/// Lomuto partition of `a[low..=high]` around `a[high]`; returns the pivot's final index
fn partition(
    a: &mut [i64],
    low: usize,
    high: usize,
    sorted: &mut Vec<usize>,
    rec: &mut Recorder,
) -> usize {
    let pivot = a[high];
    rec.access(1);
    rec.record_array(
        a,
        Highlights::default().with_pivot(high).with_sorted(sorted),
        format!("Partitioning indices {}..={} around pivot {}", low, high, pivot),
        Some(10),
    );

    let mut i = low;
    for j in low..high {
        rec.compare();
        rec.access(1);
        rec.record_array(
            a,
            Highlights::comparing(&[j, high])
                .with_pivot(high)
                .with_sorted(sorted),
            format!("Comparing {} with pivot {}", a[j], pivot),
            Some(13),
        );

        if a[j] < pivot {
            if i != j {
                a.swap(i, j);
                rec.swap();
                rec.access(4);
                rec.record_array(
                    a,
                    Highlights::swapping(&[i, j])
                        .with_pivot(high)
                        .with_sorted(sorted),
                    format!("Swapping {} and {}", a[j], a[i]),
                    Some(14),
                );
            }
            i += 1;
        }
    }

    let highlights = if i != high {
        a.swap(i, high);
        rec.swap();
        rec.access(4);
        Highlights::swapping(&[i, high])
    } else {
        Highlights::default().with_pivot(i).with_current(i)
    };
    sorted.push(i);
    rec.record_array(
        a,
        highlights.with_sorted(sorted),
        format!("Pivot {} settles at index {}", pivot, i),
        Some(18),
    );

    i
}

const MERGE_CODE: &str = "\
fn merge_sort(a: &mut [i64], left: usize, right: usize) {
    if left < right {
        let mid = (left + right) / 2;
        merge_sort(a, left, mid);
        merge_sort(a, mid + 1, right);
        merge(a, left, mid, right);
    }
}

fn merge(a: &mut [i64], left: usize, mid: usize, right: usize) {
    let (lhs, rhs) = (a[left..=mid].to_vec(), a[mid + 1..=right].to_vec());
    let (mut i, mut j, mut k) = (0, 0, left);
    while i < lhs.len() && j < rhs.len() {
        if lhs[i] <= rhs[j] {
            a[k] = lhs[i];
            i += 1;
        } else {
            a[k] = rhs[j];
            j += 1;
        }
        k += 1;
    }
    for &v in lhs[i..].iter().chain(&rhs[j..]) {
        a[k] = v;
        k += 1;
    }
}";

/// Pending mergesort work, replayed in post-order
enum MergeTask {
    Sort { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

pub fn merge_sort(input: &[i64], rec: &mut Recorder) {
    let mut a = input.to_vec();

    let mut pending = Vec::new();
    if !a.is_empty() {
        pending.push(MergeTask::Sort {
            left: 0,
            right: a.len() - 1,
        });
    }

    while let Some(task) = pending.pop() {
        match task {
            MergeTask::Sort { left, right } if left < right => {
                let mid = (left + right) / 2;
                pending.push(MergeTask::Merge { left, mid, right });
                pending.push(MergeTask::Sort {
                    left: mid + 1,
                    right,
                });
                pending.push(MergeTask::Sort { left, right: mid });
            }
            MergeTask::Sort { .. } => {}
            MergeTask::Merge { left, mid, right } => merge(&mut a, left, mid, right, rec),
        }
    }

    finish_sorted(rec, &a, "Merge sort");
}

fn merge(a: &mut [i64], left: usize, mid: usize, right: usize, rec: &mut Recorder) {
    let lhs = a[left..=mid].to_vec();
    let rhs = a[mid + 1..=right].to_vec();
    rec.access((lhs.len() + rhs.len()) as u64);

    let (mut i, mut j, mut k) = (0, 0, left);

    while i < lhs.len() && j < rhs.len() {
        rec.compare();
        rec.access(2);
        rec.record_array(
            a,
            Highlights::comparing(&[left + i, mid + 1 + j]),
            format!("Comparing {} and {}", lhs[i], rhs[j]),
            Some(14),
        );

        let line = if lhs[i] <= rhs[j] {
            a[k] = lhs[i];
            i += 1;
            15
        } else {
            a[k] = rhs[j];
            j += 1;
            18
        };
        rec.swap();
        rec.access(1);
        rec.record_array(
            a,
            Highlights::swapping(&[k]),
            format!("Writing {} to index {}", a[k], k),
            Some(line),
        );
        k += 1;
    }

    for &v in lhs[i..].iter().chain(&rhs[j..]) {
        a[k] = v;
        rec.swap();
        rec.access(2);
        rec.record_array(
            a,
            Highlights::swapping(&[k]),
            format!("Copying remaining {} to index {}", v, k),
            Some(24),
        );
        k += 1;
    }
}
