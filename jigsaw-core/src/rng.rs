/// Seeded pseudo-random generator (mulberry32).
///
/// The output stream is a pure function of the seed, which is what keeps a
/// level's piece shapes stable across reloads: the same seed always yields
/// the same sequence of draws, on every platform.
#[derive(Clone, Copy, Debug)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next draw scaled to `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Uniform integer-valued draw in `[min, max]`, returned as `f64`.
    pub fn next_between(&mut self, min: f64, max: f64) -> f64 {
        (self.next_unit() * (max - min + 1.0)).floor() + min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Mulberry32::new(42);
        let mut b = Mulberry32::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Mulberry32::new(1);
        let mut b = Mulberry32::new(2);
        let same = (0..16).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 16);
    }

    #[test]
    fn unit_draws_stay_in_range() {
        let mut rng = Mulberry32::new(0xDEAD_BEEF);
        for _ in 0..256 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
