/// Visual classification of a single index. Has no effect on sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tag {
    #[default]
    Default,
    Compare,
    Swap,
    Pivot,
    Sorted,
}

/// Per-index tags of the current frame.
///
/// Persistent tags (pivot, sorted) are set directly. Transient tags are laid
/// over them for one step and restored by `clear_transient`.
#[derive(Debug, Clone, Default)]
pub struct TagMap {
    tags: Vec<Tag>,
    saved: Vec<(usize, Tag)>,
}

impl TagMap {
    pub fn new(len: usize) -> TagMap {
        TagMap {
            tags: vec![Tag::Default; len],
            saved: Vec::new(),
        }
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    pub fn get(&self, i: usize) -> Tag {
        self.tags[i]
    }

    /// Sets a persistent tag. Sorted is terminal and is never replaced.
    pub fn set(&mut self, i: usize, tag: Tag) {
        if self.tags[i] != Tag::Sorted {
            self.tags[i] = tag;
        }
    }

    pub fn mark_sorted(&mut self, i: usize) {
        self.tags[i] = Tag::Sorted;
    }

    pub fn mark_transient(&mut self, i: usize, tag: Tag) {
        self.saved.push((i, self.tags[i]));
        self.tags[i] = tag;
    }

    pub fn clear_transient(&mut self) {
        while let Some((i, tag)) = self.saved.pop() {
            self.tags[i] = tag;
        }
    }

    /// A pivot tag travels with the pivot element when it is exchanged.
    pub fn follow_swap(&mut self, i: usize, j: usize) {
        if self.tags[i] == Tag::Pivot || self.tags[j] == Tag::Pivot {
            self.tags.swap(i, j);
        }
    }
}
