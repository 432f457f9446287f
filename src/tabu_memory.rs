//! Bounded FIFO of recently generated chromosomes.
//!
//! Entries are stored alongside a hash of their gene bits so that the common
//! "not tabu" answer needs no full comparison. Membership is still decided by
//! exact value equality.

use crate::chromosome::Chromosome;
use rustc_hash::{FxHashMap, FxHasher};
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct TabuMemory {
    capacity: usize,
    entries: VecDeque<(u64, Chromosome)>, // FIFO, oldest at the front
    signatures: FxHashMap<u64, usize>,    // signature -> number of entries
}

impl TabuMemory {
    /// Creates an empty memory holding at most `capacity` chromosomes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "called `TabuMemory::new()` with zero capacity");
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity + 1),
            signatures: FxHashMap::with_capacity_and_hasher(capacity + 1, Default::default()),
        }
    }

    /// Hash of the raw gene bits.
    #[inline]
    fn signature(chromosome: &Chromosome) -> u64 {
        let mut hasher = FxHasher::default(); // fast, unseeded
        for g in chromosome.genes() {
            g.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, chromosome: &Chromosome) -> bool {
        let sig = Self::signature(chromosome);
        if !self.signatures.contains_key(&sig) {
            return false;
        }
        self.entries
            .iter()
            .any(|(s, c)| *s == sig && c == chromosome)
    }

    /// Appends `chromosome`, evicting the oldest entry once over capacity.
    pub fn push(&mut self, chromosome: Chromosome) {
        let sig = Self::signature(&chromosome);
        *self.signatures.entry(sig).or_insert(0) += 1;
        self.entries.push_back((sig, chromosome));

        if self.entries.len() > self.capacity
            && let Some((oldest, _)) = self.entries.pop_front()
            && let Some(count) = self.signatures.get_mut(&oldest)
        {
            *count -= 1;
            if *count == 0 {
                self.signatures.remove(&oldest);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.signatures.clear();
    }

    /// Oldest entry first.
    pub fn iter(&self) -> impl Iterator<Item = &Chromosome> {
        self.entries.iter().map(|(_, c)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrom(v: f64) -> Chromosome {
        Chromosome::new(vec![v, 1.0 - v, 0.5])
    }

    #[test]
    fn test_initialization() {
        let memory = TabuMemory::new(5);
        assert_eq!(memory.capacity(), 5);
        assert!(memory.is_empty());
        assert!(!memory.contains(&chrom(0.1)));
    }

    #[test]
    #[should_panic(expected = "called `TabuMemory::new()` with zero capacity")]
    fn test_zero_capacity_panics() {
        let _ = TabuMemory::new(0);
    }

    #[test]
    fn test_membership_is_exact() {
        let mut memory = TabuMemory::new(3);
        memory.push(chrom(0.25));
        assert!(memory.contains(&chrom(0.25)));
        assert!(!memory.contains(&chrom(0.25 + 1e-12)));
    }

    #[test]
    fn test_signature_is_deterministic() {
        assert_eq!(
            TabuMemory::signature(&chrom(0.25)),
            TabuMemory::signature(&chrom(0.25))
        );
        assert_ne!(
            TabuMemory::signature(&chrom(0.25)),
            TabuMemory::signature(&chrom(0.75))
        );

        // separately built memories agree on membership
        let mut a = TabuMemory::new(2);
        let mut b = TabuMemory::new(2);
        a.push(chrom(0.4));
        b.push(chrom(0.4));
        assert!(a.contains(&chrom(0.4)) && b.contains(&chrom(0.4)));
    }

    #[test]
    fn test_fifo_eviction() {
        let capacity = 4;
        let mut memory = TabuMemory::new(capacity);
        for i in 0..=capacity {
            memory.push(chrom(i as f64 / 10.0));
            assert!(memory.len() <= capacity);
        }
        assert_eq!(memory.len(), capacity);
        assert!(!memory.contains(&chrom(0.0)), "oldest entry must be evicted");
        assert!(memory.contains(&chrom(0.1)));
        assert!(memory.contains(&chrom(capacity as f64 / 10.0)));
        assert_eq!(memory.iter().next(), Some(&chrom(0.1)));
    }

    #[test]
    fn test_duplicates_expire_one_at_a_time() {
        let mut memory = TabuMemory::new(2);
        memory.push(chrom(0.3));
        memory.push(chrom(0.3));
        memory.push(chrom(0.7));
        // one copy of 0.3 evicted, the other still present
        assert!(memory.contains(&chrom(0.3)));
        memory.push(chrom(0.8));
        assert!(!memory.contains(&chrom(0.3)));
    }

    #[test]
    fn test_clear() {
        let mut memory = TabuMemory::new(2);
        memory.push(chrom(0.3));
        memory.clear();
        assert!(memory.is_empty());
        assert!(!memory.contains(&chrom(0.3)));
    }
}
