use log::trace;

use crate::sorter::{Sorter, Step};

enum SiftStage {
    Left,
    Right,
    Exchange,
}

/// Sift-down of `root` within `seq[..len]`.
struct Sift {
    root: usize,
    len: usize,
    largest: usize,
    stage: SiftStage,
}

impl Sift {
    fn new(root: usize, len: usize) -> Sift {
        Sift {
            root,
            len,
            largest: root,
            stage: SiftStage::Left,
        }
    }

    fn next_step(&mut self, seq: &mut [u32]) -> Option<Step> {
        loop {
            match self.stage {
                SiftStage::Left => {
                    self.stage = SiftStage::Right;
                    let left = 2 * self.root + 1;
                    if left < self.len {
                        return Some(self.compare(seq, left));
                    }
                }
                SiftStage::Right => {
                    self.stage = SiftStage::Exchange;
                    let right = 2 * self.root + 2;
                    if right < self.len {
                        return Some(self.compare(seq, right));
                    }
                }
                SiftStage::Exchange => {
                    if self.largest == self.root {
                        return None;
                    }
                    let (root, child) = (self.root, self.largest);
                    seq.swap(root, child);
                    self.root = child;
                    self.stage = SiftStage::Left;
                    return Some(Step::Swap(root, child));
                }
            }
        }
    }

    fn compare(&mut self, seq: &[u32], child: usize) -> Step {
        let step = Step::Compare(self.largest, child);
        if seq[child] > seq[self.largest] {
            self.largest = child;
        }
        step
    }
}

enum Phase {
    Build(Option<usize>),
    Exchange(usize),
    Settle(usize),
    Mark(usize),
    Finish,
    Done,
}

pub struct HeapSort {
    len: usize,
    phase: Phase,
    sift: Option<Sift>,
}

impl HeapSort {
    pub fn new(len: usize) -> HeapSort {
        let phase = if len == 0 {
            Phase::Done
        } else {
            Phase::Build((len / 2).checked_sub(1))
        };
        HeapSort {
            len,
            phase,
            sift: None,
        }
    }
}

impl Sorter for HeapSort {
    fn next_step(&mut self, seq: &mut [u32]) -> Option<Step> {
        loop {
            if let Some(sift) = self.sift.as_mut() {
                match sift.next_step(seq) {
                    Some(step) => return Some(step),
                    None => self.sift = None,
                }
            }
            match self.phase {
                Phase::Build(Some(parent)) => {
                    self.sift = Some(Sift::new(parent, self.len));
                    self.phase = Phase::Build(parent.checked_sub(1));
                }
                Phase::Build(None) => {
                    trace!("Max-heap built over {} elements", self.len);
                    self.phase = Phase::Exchange(self.len - 1);
                }
                Phase::Exchange(end) => {
                    if end == 0 {
                        self.phase = Phase::Finish;
                        continue;
                    }
                    seq.swap(0, end);
                    self.phase = Phase::Settle(end);
                    return Some(Step::Swap(0, end));
                }
                Phase::Settle(end) => {
                    self.sift = Some(Sift::new(0, end));
                    self.phase = Phase::Mark(end);
                }
                Phase::Mark(end) => {
                    self.phase = Phase::Exchange(end - 1);
                    return Some(Step::Sorted(end));
                }
                Phase::Finish => {
                    self.phase = Phase::Done;
                    return Some(Step::Sorted(0));
                }
                Phase::Done => return None,
            }
        }
    }
}
