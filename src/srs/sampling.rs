//! Uniform sampling without replacement.
//!
//! Both helpers work on an owned copy of the items, so nothing the caller
//! still holds is ever mutated.

use rand::Rng;

/// Pick up to `k` distinct items uniformly at random. Output order is random.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], k: usize, rng: &mut R) -> Vec<T> {
    let mut pool = DrawPool::new(items.to_vec());
    pool.draw_up_to(k, rng)
}

/// A depleting pool: drawn items are gone for the rest of its lifetime
#[derive(Debug, Clone)]
pub struct DrawPool<T> {
    items: Vec<T>,
}

impl<T> DrawPool<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn draw_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.items.len());
        Some(self.items.swap_remove(idx))
    }

    /// Draw `k` items, or fewer if the pool runs dry
    pub fn draw_up_to<R: Rng + ?Sized>(&mut self, k: usize, rng: &mut R) -> Vec<T> {
        let mut drawn = Vec::with_capacity(k.min(self.items.len()));
        while drawn.len() < k {
            match self.draw_one(rng) {
                Some(item) => drawn.push(item),
                None => break,
            }
        }
        drawn
    }

    /// Draw exactly `k` items; leaves the pool untouched and returns None if it holds fewer
    pub fn draw_exact<R: Rng + ?Sized>(&mut self, k: usize, rng: &mut R) -> Option<Vec<T>> {
        if self.items.len() < k {
            return None;
        }
        Some(self.draw_up_to(k, rng))
    }
}
