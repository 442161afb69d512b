use rand::{rngs::StdRng, seq::SliceRandom, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Uniform index over `0..len`. The range is inclusive of the final
    /// element: every entry of a pool can be picked, the last one included.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.next_u64() % len as u64) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_index_covers_full_range() {
        let mut rng = RngState::from_seed(7);
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            let idx = rng.pick_index(4).unwrap();
            assert!(idx < 4);
            seen[idx] = true;
        }
        assert!(seen.iter().all(|hit| *hit), "every index incl. the last");
    }

    #[test]
    fn pick_index_empty_is_none() {
        let mut rng = RngState::from_seed(7);
        assert_eq!(rng.pick_index(0), None);
    }

    #[test]
    fn seeded_streams_repeat() {
        let mut a = RngState::from_seed(42);
        let mut b = RngState::from_seed(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
