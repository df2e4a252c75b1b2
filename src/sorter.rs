use std::fmt;
use std::str::FromStr;

use crate::bubble::BubbleSort;
use crate::error::ConfigError;
use crate::heap::HeapSort;
use crate::insertion::InsertionSort;
use crate::merge::MergeSort;
use crate::quick::QuickSort;
use crate::selection::SelectionSort;

/// One visually significant action. The sorter has already applied it to the
/// sequence by the time the step is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Two indices were compared.
    Compare(usize, usize),
    /// Two elements were exchanged.
    Swap(usize, usize),
    /// A merge wrote a value into `index`. `compared` is set when the value
    /// was chosen by comparing the heads of both halves.
    Place { index: usize, compared: bool },
    /// `index` holds the pivot of the current partition.
    Pivot(usize),
    /// `index` reached its final position.
    Sorted(usize),
    /// Cosmetic highlight of a freshly merged range, one index at a time.
    Sweep(usize),
}

impl Step {
    pub fn is_comparison(&self) -> bool {
        matches!(self, Step::Compare(..) | Step::Place { compared: true, .. })
    }
}

/// A sorting procedure broken into discrete steps.
///
/// Each call performs at most one step on `seq` and reports it; `None` means
/// the procedure finished. The same `seq` must be passed on every call and
/// nothing else may modify it in between.
pub trait Sorter {
    fn next_step(&mut self, seq: &mut [u32]) -> Option<Step>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

impl Complexity {
    pub fn time(&self) -> String {
        format!("Best: {}, Average: {}, Worst: {}", self.best, self.average, self.worst)
    }
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
        }
    }

    pub fn complexity(&self) -> Complexity {
        let (best, average, worst, space) = match self {
            Algorithm::Bubble => ("O(n)", "O(n²)", "O(n²)", "O(1)"),
            Algorithm::Selection => ("O(n²)", "O(n²)", "O(n²)", "O(1)"),
            Algorithm::Insertion => ("O(n)", "O(n²)", "O(n²)", "O(1)"),
            Algorithm::Merge => ("O(n log n)", "O(n log n)", "O(n log n)", "O(n)"),
            Algorithm::Quick => ("O(n log n)", "O(n log n)", "O(n²)", "O(log n)"),
            Algorithm::Heap => ("O(n log n)", "O(n log n)", "O(n log n)", "O(1)"),
        };
        Complexity { best, average, worst, space }
    }

    /// A fresh step machine for a sequence of length `len`.
    pub fn sorter(&self, len: usize) -> Box<dyn Sorter> {
        match self {
            Algorithm::Bubble => Box::new(BubbleSort::new(len)),
            Algorithm::Selection => Box::new(SelectionSort::new(len)),
            Algorithm::Insertion => Box::new(InsertionSort::new(len)),
            Algorithm::Merge => Box::new(MergeSort::new(len)),
            Algorithm::Quick => Box::new(QuickSort::new(len)),
            Algorithm::Heap => Box::new(HeapSort::new(len)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.key() == key)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(s.to_string()))
    }
}

/// Iterator over the steps of `algorithm` on `seq`, without any pacing.
pub struct Steps<'a> {
    sorter: Box<dyn Sorter>,
    seq: &'a mut [u32],
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.sorter.next_step(self.seq)
    }
}

pub fn steps(algorithm: Algorithm, seq: &mut [u32]) -> Steps<'_> {
    Steps {
        sorter: algorithm.sorter(seq.len()),
        seq,
    }
}

/// Sorts `seq` in place by running every step of `algorithm`.
pub fn sort(algorithm: Algorithm, seq: &mut [u32]) {
    steps(algorithm, seq).for_each(|_| ());
}
