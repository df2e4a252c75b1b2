use log::trace;

use crate::sorter::{Sorter, Step};

enum Phase {
    Compare,
    Exchange,
}

/// Adjacent-pair passes; pass `i` leaves its largest element at `n - i - 1`.
pub struct BubbleSort {
    len: usize,
    pass: usize,
    j: usize,
    phase: Phase,
}

impl BubbleSort {
    pub fn new(len: usize) -> BubbleSort {
        BubbleSort {
            len,
            pass: 0,
            j: 0,
            phase: Phase::Compare,
        }
    }
}

impl Sorter for BubbleSort {
    fn next_step(&mut self, seq: &mut [u32]) -> Option<Step> {
        loop {
            if self.pass >= self.len {
                return None;
            }
            let bound = self.len - self.pass - 1;
            match self.phase {
                Phase::Compare => {
                    if self.j < bound {
                        self.phase = Phase::Exchange;
                        return Some(Step::Compare(self.j, self.j + 1));
                    }
                    trace!("Bubble pass {} done", self.pass);
                    self.pass += 1;
                    self.j = 0;
                    return Some(Step::Sorted(bound));
                }
                Phase::Exchange => {
                    let j = self.j;
                    self.j += 1;
                    self.phase = Phase::Compare;
                    if seq[j] > seq[j + 1] {
                        seq.swap(j, j + 1);
                        return Some(Step::Swap(j, j + 1));
                    }
                }
            }
        }
    }
}
