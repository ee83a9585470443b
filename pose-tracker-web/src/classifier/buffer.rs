//! Rolling label buffer for top-1 smoothing
//!
//! Stores the last N raw top-1 labels in a circular buffer and votes over them.

/// One buffered top-1 observation. `pose == None` marks a frame whose top label
/// was coerced to the undefined sentinel.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferedLabel {
    pub pose: Option<String>,
    pub score: f64,
}

/// Circular buffer of the most recent top-1 labels, oldest first
#[derive(Clone, Debug)]
pub struct LabelBuffer {
    /// Circular slots, `capacity` long
    slots: Vec<Option<BufferedLabel>>,

    /// Current write position (points to next slot to write)
    write_index: usize,

    /// Whether buffer has wrapped at least once
    filled: bool,
}

impl LabelBuffer {
    /// `capacity` is clamped to at least 1
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            write_index: 0,
            filled: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Push a new observation, evicting the oldest when full
    pub fn push(&mut self, entry: BufferedLabel) {
        self.slots[self.write_index] = Some(entry);
        self.write_index = (self.write_index + 1) % self.slots.len();

        if self.write_index == 0 {
            self.filled = true;
        }
    }

    pub fn len(&self) -> usize {
        if self.filled {
            self.slots.len()
        } else {
            self.write_index
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in chronological order (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &BufferedLabel> + '_ {
        let capacity = self.slots.len();
        let start = if self.filled { self.write_index } else { 0 };
        (0..self.len()).filter_map(move |i| self.slots[(start + i) % capacity].as_ref())
    }

    /// Most frequent label in the window. Ties go to the label seen most
    /// recently; the returned entry is that label's newest occurrence.
    pub fn majority(&self) -> Option<&BufferedLabel> {
        let entries: Vec<&BufferedLabel> = self.iter().collect();
        let mut best: Option<(usize, usize)> = None;

        for (position, entry) in entries.iter().enumerate() {
            let count = entries.iter().filter(|e| e.pose == entry.pose).count();
            let candidate = (count, position);
            if best.map_or(true, |current| candidate > current) {
                best = Some(candidate);
            }
        }

        best.map(|(_, position)| entries[position])
    }

    /// Change the window width, keeping the newest entries
    pub fn resize(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if capacity == self.slots.len() {
            return;
        }

        let kept: Vec<BufferedLabel> = {
            let entries: Vec<&BufferedLabel> = self.iter().collect();
            let skip = entries.len().saturating_sub(capacity);
            entries.into_iter().skip(skip).cloned().collect()
        };

        *self = Self::new(capacity);
        for entry in kept {
            self.push(entry);
        }
    }

    /// Clear the buffer (session reset)
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.write_index = 0;
        self.filled = false;
    }
}

impl Default for LabelBuffer {
    fn default() -> Self {
        Self::new(1)
    }
}
