use log::trace;

use crate::sorter::{Sorter, Step};

enum Stage {
    Scan,
    Decide,
    Settle,
    Mark,
}

/// Lomuto partition of `seq[lo..=hi]` with the pivot at `hi`.
struct Partition {
    lo: usize,
    hi: usize,
    i: usize,
    j: usize,
    stage: Stage,
}

pub struct QuickSort {
    pending: Vec<(usize, usize)>,
    active: Option<Partition>,
}

impl QuickSort {
    pub fn new(len: usize) -> QuickSort {
        let mut pending = Vec::new();
        if len > 0 {
            pending.push((0, len - 1));
        }
        QuickSort {
            pending,
            active: None,
        }
    }
}

impl Sorter for QuickSort {
    fn next_step(&mut self, seq: &mut [u32]) -> Option<Step> {
        loop {
            let Some(p) = self.active.as_mut() else {
                let (lo, hi) = self.pending.pop()?;
                if lo == hi {
                    return Some(Step::Sorted(lo));
                }
                trace!("Partitioning [{}..={}]", lo, hi);
                self.active = Some(Partition { lo, hi, i: lo, j: lo, stage: Stage::Scan });
                return Some(Step::Pivot(hi));
            };

            match p.stage {
                Stage::Scan => {
                    if p.j < p.hi {
                        p.stage = Stage::Decide;
                        return Some(Step::Compare(p.j, p.hi));
                    }
                    p.stage = Stage::Settle;
                }
                Stage::Decide => {
                    let j = p.j;
                    p.j += 1;
                    p.stage = Stage::Scan;
                    if seq[j] < seq[p.hi] {
                        let i = p.i;
                        p.i += 1;
                        if i != j {
                            seq.swap(i, j);
                            return Some(Step::Swap(i, j));
                        }
                    }
                }
                Stage::Settle => {
                    p.stage = Stage::Mark;
                    if p.i != p.hi {
                        seq.swap(p.i, p.hi);
                        return Some(Step::Swap(p.i, p.hi));
                    }
                }
                Stage::Mark => {
                    let (lo, hi, i) = (p.lo, p.hi, p.i);
                    self.active = None;
                    // left partition runs first, so it is pushed last
                    if i < hi {
                        self.pending.push((i + 1, hi));
                    }
                    if i > lo {
                        self.pending.push((lo, i - 1));
                    }
                    return Some(Step::Sorted(i));
                }
            }
        }
    }
}
