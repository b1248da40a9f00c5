use std::{collections::HashMap, hash::Hash};

/// Occurrence counts per distinct item, kept in first-seen order.
///
/// The first-seen order is the tie breaker for [`FreqDist::most_common`] and
/// [`FreqDist::max`].
#[derive(Debug, Clone)]
pub struct FreqDist<T> {
    items: Vec<T>,
    counts: Vec<usize>,
    index: HashMap<T, usize>,
    total: usize,
}

impl<T> Default for FreqDist<T> {
    fn default() -> Self {
        Self { items: Vec::new(), counts: Vec::new(), index: HashMap::new(), total: 0 }
    }
}

impl<T: Eq + Hash + Clone> FreqDist<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        self.add_n(item, 1);
    }

    pub fn add_n(&mut self, item: T, n: usize) {
        let idx = match self.index.get(&item) {
            Some(&idx) => idx,
            None => {
                let idx = self.items.len();
                self.index.insert(item.clone(), idx);
                self.items.push(item);
                self.counts.push(0);
                idx
            }
        };
        self.counts[idx] += n;
        self.total += n;
    }

    pub fn count(&self, item: &T) -> usize {
        self.index.get(item).map(|&idx| self.counts[idx]).unwrap_or_default()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of observations.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The `n` most frequent items, descending by count, ties in first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(&T, usize)> {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        // stable: equal counts keep insertion order
        order.sort_by(|&a, &b| self.counts[b].cmp(&self.counts[a]));
        order.into_iter().take(n).map(|idx| (&self.items[idx], self.counts[idx])).collect()
    }

    /// The most frequent item; the earliest seen one wins a tie.
    pub fn max(&self) -> Option<&T> {
        let mut best: Option<usize> = None;
        for (idx, &count) in self.counts.iter().enumerate() {
            match best {
                Some(b) if self.counts[b] >= count => {}
                _ => best = Some(idx),
            }
        }
        best.map(|idx| &self.items[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.items.iter().zip(self.counts.iter().copied())
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for FreqDist<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut fd = Self::new();
        for item in iter {
            fd.add(item);
        }
        fd
    }
}

/// One [`FreqDist`] of outcomes per condition.
#[derive(Debug, Clone)]
pub struct ConditionalFreqDist<C, T> {
    conditions: Vec<C>,
    dists: HashMap<C, FreqDist<T>>,
}

impl<C, T> Default for ConditionalFreqDist<C, T> {
    fn default() -> Self {
        Self { conditions: Vec::new(), dists: HashMap::new() }
    }
}

impl<C: Eq + Hash + Clone, T: Eq + Hash + Clone> ConditionalFreqDist<C, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, condition: C, outcome: T) {
        if let Some(fd) = self.dists.get_mut(&condition) {
            fd.add(outcome);
            return;
        }
        let mut fd = FreqDist::new();
        fd.add(outcome);
        self.conditions.push(condition.clone());
        self.dists.insert(condition, fd);
    }

    pub fn get(&self, condition: &C) -> Option<&FreqDist<T>> {
        self.dists.get(condition)
    }

    /// Conditions in first-seen order.
    pub fn conditions(&self) -> &[C] {
        &self.conditions
    }

    /// Most frequent outcome under `condition`, `None` if it was never observed.
    pub fn most_frequent_outcome(&self, condition: &C) -> Option<&T> {
        self.dists.get(condition).and_then(FreqDist::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&C, &FreqDist<T>)> {
        self.conditions.iter().map(|c| (c, &self.dists[c]))
    }
}

impl<C: Eq + Hash + Clone, T: Eq + Hash + Clone> FromIterator<(C, T)> for ConditionalFreqDist<C, T> {
    fn from_iter<I: IntoIterator<Item = (C, T)>>(iter: I) -> Self {
        let mut cfd = Self::new();
        for (condition, outcome) in iter {
            cfd.add(condition, outcome);
        }
        cfd
    }
}

pub fn build_frequency<T, I>(items: I) -> FreqDist<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    items.into_iter().collect()
}

pub fn build_conditional_frequency<C, T, I>(pairs: I) -> ConditionalFreqDist<C, T>
where
    C: Eq + Hash + Clone,
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = (C, T)>,
{
    pairs.into_iter().collect()
}
