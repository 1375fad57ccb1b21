//! Global candidate queue
//!
//! Boundary sites wait here until they are the most similar pending site
//! in the whole grid. Entries are ordered by a composite key, so the pop
//! order never depends on insertion order or on how the heap breaks ties:
//!
//! 1. smaller similarity (distance to the region mean) first
//! 2. then smaller x
//! 3. then smaller y
//! 4. then smaller z

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A pending boundary site
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    /// Distance from the site's value to its best region's mean
    pub similarity: f64,
    /// X coordinate
    pub x: u32,
    /// Y coordinate
    pub y: u32,
    /// Plane index
    pub z: u32,
    /// Linear site index
    pub site: usize,
    /// Label of the region the site will join
    pub region: u32,
}

impl Candidate {
    fn key(&self) -> (u32, u32, u32) {
        (self.x, self.y, self.z)
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.similarity
            .total_cmp(&other.similarity)
            .then_with(|| self.key().cmp(&other.key()))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Min-ordered queue of candidates
#[derive(Debug, Default)]
pub struct CandidateQueue {
    heap: BinaryHeap<Reverse<Candidate>>,
}

impl CandidateQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate
    pub fn push(&mut self, candidate: Candidate) {
        self.heap.push(Reverse(candidate));
    }

    /// Remove the candidate with the smallest key
    pub fn pop(&mut self) -> Option<Candidate> {
        self.heap.pop().map(|Reverse(c)| c)
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(similarity: f64, x: u32, y: u32) -> Candidate {
        Candidate {
            similarity,
            x,
            y,
            z: 0,
            site: (y * 10 + x) as usize,
            region: 1,
        }
    }

    #[test]
    fn test_pops_smallest_similarity() {
        let mut q = CandidateQueue::new();
        q.push(cand(5.0, 0, 0));
        q.push(cand(1.0, 3, 3));
        q.push(cand(3.0, 1, 1));
        let order: Vec<f64> = std::iter::from_fn(|| q.pop()).map(|c| c.similarity).collect();
        assert_eq!(order, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_ties_break_by_x_then_y() {
        let mut q = CandidateQueue::new();
        q.push(cand(2.0, 1, 0));
        q.push(cand(2.0, 0, 5));
        q.push(cand(2.0, 0, 2));
        q.push(cand(2.0, 1, 1));
        let order: Vec<(u32, u32)> = std::iter::from_fn(|| q.pop()).map(|c| (c.x, c.y)).collect();
        assert_eq!(order, vec![(0, 2), (0, 5), (1, 0), (1, 1)]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_nan_sorts_last() {
        let mut q = CandidateQueue::new();
        q.push(cand(f64::NAN, 0, 0));
        q.push(cand(100.0, 1, 0));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop().unwrap().similarity, 100.0);
        assert!(q.pop().unwrap().similarity.is_nan());
    }
}
