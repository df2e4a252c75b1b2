use log::trace;

use crate::sorter::{Sorter, Step};

#[derive(Clone, Copy)]
enum Frame {
    Split { lo: usize, hi: usize },
    Merge { lo: usize, mid: usize, hi: usize },
}

/// One merge of `seq[lo..=mid]` and `seq[mid+1..=hi]` in progress.
struct Merging {
    lo: usize,
    hi: usize,
    left: Vec<u32>,
    right: Vec<u32>,
    a: usize,
    b: usize,
    k: usize,
    sweep: Option<usize>,
}

impl Merging {
    fn new(seq: &[u32], lo: usize, mid: usize, hi: usize) -> Merging {
        Merging {
            lo,
            hi,
            left: seq[lo..=mid].to_vec(),
            right: seq[mid + 1..=hi].to_vec(),
            a: 0,
            b: 0,
            k: lo,
            sweep: None,
        }
    }

    fn next_step(&mut self, seq: &mut [u32]) -> Option<Step> {
        if let Some(idx) = self.sweep {
            if idx > self.hi {
                return None;
            }
            self.sweep = Some(idx + 1);
            return Some(Step::Sweep(idx));
        }

        let k = self.k;
        let compared = self.a < self.left.len() && self.b < self.right.len();
        if compared {
            if self.left[self.a] <= self.right[self.b] {
                seq[k] = self.left[self.a];
                self.a += 1;
            } else {
                seq[k] = self.right[self.b];
                self.b += 1;
            }
        } else if self.a < self.left.len() {
            seq[k] = self.left[self.a];
            self.a += 1;
        } else if self.b < self.right.len() {
            seq[k] = self.right[self.b];
            self.b += 1;
        } else {
            self.sweep = Some(self.lo);
            return self.next_step(seq);
        }
        self.k += 1;
        Some(Step::Place { index: k, compared })
    }
}

/// Top-down merge sort with the recursion kept on an explicit frame stack.
/// Merged values are written straight into place, never swapped.
pub struct MergeSort {
    frames: Vec<Frame>,
    active: Option<Merging>,
}

impl MergeSort {
    pub fn new(len: usize) -> MergeSort {
        let mut frames = Vec::new();
        if len > 1 {
            frames.push(Frame::Split { lo: 0, hi: len - 1 });
        }
        MergeSort {
            frames,
            active: None,
        }
    }
}

impl Sorter for MergeSort {
    fn next_step(&mut self, seq: &mut [u32]) -> Option<Step> {
        loop {
            if let Some(merging) = self.active.as_mut() {
                match merging.next_step(seq) {
                    Some(step) => return Some(step),
                    None => self.active = None,
                }
            }
            match self.frames.pop()? {
                Frame::Split { lo, hi } => {
                    if lo >= hi {
                        continue;
                    }
                    let mid = lo + (hi - lo) / 2;
                    // left half runs first, so it is pushed last
                    self.frames.push(Frame::Merge { lo, mid, hi });
                    self.frames.push(Frame::Split { lo: mid + 1, hi });
                    self.frames.push(Frame::Split { lo, hi: mid });
                }
                Frame::Merge { lo, mid, hi } => {
                    trace!("Merging [{}..={}] with [{}..={}]", lo, mid, mid + 1, hi);
                    self.active = Some(Merging::new(seq, lo, mid, hi));
                }
            }
        }
    }
}
