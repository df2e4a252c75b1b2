use crate::sorter::{Sorter, Step};

enum Phase {
    Begin,
    Compare,
    Shift,
    Mark,
    Done,
}

/// Swap-based insertion: the element at `i` walks left one exchange at a time.
pub struct InsertionSort {
    len: usize,
    i: usize,
    j: usize,
    phase: Phase,
}

impl InsertionSort {
    pub fn new(len: usize) -> InsertionSort {
        InsertionSort {
            len,
            i: 1,
            j: 1,
            phase: Phase::Begin,
        }
    }
}

impl Sorter for InsertionSort {
    fn next_step(&mut self, seq: &mut [u32]) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Begin => {
                    if self.len == 0 {
                        self.phase = Phase::Done;
                        continue;
                    }
                    self.phase = Phase::Compare;
                    return Some(Step::Sorted(0));
                }
                Phase::Compare => {
                    if self.i >= self.len {
                        self.phase = Phase::Done;
                    } else if self.j > 0 {
                        self.phase = Phase::Shift;
                        return Some(Step::Compare(self.j - 1, self.j));
                    } else {
                        self.phase = Phase::Mark;
                    }
                }
                Phase::Shift => {
                    let j = self.j;
                    if seq[j] < seq[j - 1] {
                        seq.swap(j - 1, j);
                        self.j -= 1;
                        self.phase = Phase::Compare;
                        return Some(Step::Swap(j - 1, j));
                    }
                    self.phase = Phase::Mark;
                }
                Phase::Mark => {
                    let i = self.i;
                    self.i += 1;
                    self.j = self.i;
                    self.phase = Phase::Compare;
                    return Some(Step::Sorted(i));
                }
                Phase::Done => return None,
            }
        }
    }
}
