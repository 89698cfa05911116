use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Zero-mean normal distribution whose samples are rejected while they
/// fall beyond a fixed maximum deviation.
#[derive(Clone, Copy, Debug)]
pub struct ClippedNormal {
    normal: Normal<f64>,
    max_deviation: f64,
}

impl ClippedNormal {
    pub fn new(std_dev: f64, max_deviation: f64) -> Self {
        assert!(
            std_dev > 0.0 && std_dev.is_finite(),
            "invalid std_dev: {}",
            std_dev
        );
        assert!(
            max_deviation >= std_dev,
            "invalid max_deviation: {} < std_dev = {}",
            max_deviation,
            std_dev
        );
        Self {
            normal: Normal::new(0.0, std_dev).expect("std_dev checked finite and positive"),
            max_deviation,
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.normal.std_dev()
    }

    pub fn max_deviation(&self) -> f64 {
        self.max_deviation
    }
}

impl Distribution<f64> for ClippedNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        loop {
            let x: f64 = self.normal.sample(rng);
            if x.abs() <= self.max_deviation {
                return x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;

    #[test]
    fn test_clipped_normal_bound() {
        let dist: ClippedNormal = ClippedNormal::new(4.0, 512.0);
        let mut source: Source = Source::new([0u8; 32]);
        for _ in 0..4096 {
            let x: f64 = dist.sample(&mut source);
            assert!(x.abs() <= 512.0, "sample {} beyond the maximum deviation", x);
        }
    }
}
