use crate::sorter::{Sorter, Step};

enum Phase {
    Scan,
    Exchange,
    Mark,
}

pub struct SelectionSort {
    len: usize,
    i: usize,
    j: usize,
    min: usize,
    phase: Phase,
}

impl SelectionSort {
    pub fn new(len: usize) -> SelectionSort {
        SelectionSort {
            len,
            i: 0,
            j: 1,
            min: 0,
            phase: Phase::Scan,
        }
    }
}

impl Sorter for SelectionSort {
    fn next_step(&mut self, seq: &mut [u32]) -> Option<Step> {
        loop {
            if self.i >= self.len {
                return None;
            }
            match self.phase {
                Phase::Scan => {
                    if self.j < self.len {
                        let step = Step::Compare(self.min, self.j);
                        if seq[self.j] < seq[self.min] {
                            self.min = self.j;
                        }
                        self.j += 1;
                        return Some(step);
                    }
                    self.phase = Phase::Exchange;
                }
                Phase::Exchange => {
                    self.phase = Phase::Mark;
                    if self.min != self.i {
                        seq.swap(self.i, self.min);
                        return Some(Step::Swap(self.i, self.min));
                    }
                }
                Phase::Mark => {
                    let i = self.i;
                    self.i += 1;
                    self.j = self.i + 1;
                    self.min = self.i;
                    self.phase = Phase::Scan;
                    return Some(Step::Sorted(i));
                }
            }
        }
    }
}
