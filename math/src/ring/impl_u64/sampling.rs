use crate::modulus::WordOps;
use crate::poly::{Poly, PolyRNS};
use crate::ring::{Ring, RingRNS};
use rand_distr::Distribution;
use sampling::distributions::ClippedNormal;
use sampling::source::Source;

impl Ring<u64> {
    pub fn fill_uniform(&self, source: &mut Source, a: &mut Poly<u64>) {
        let max: u64 = self.modulus.q;
        let mask: u64 = max.mask();
        a.0.iter_mut().for_each(|a| *a = source.next_u64n(max, mask));
    }
}

impl RingRNS<u64> {
    pub fn fill_uniform(&self, source: &mut Source, a: &mut PolyRNS<u64>) {
        self.0
            .iter()
            .enumerate()
            .for_each(|(i, ring)| ring.fill_uniform(source, a.at_mut(i)));
    }

    /// Fills a with one clipped-normal noise polynomial in coefficient
    /// representation, embedding the same signed value in every residue.
    pub fn fill_normal(&self, source: &mut Source, dist: &ClippedNormal, a: &mut PolyRNS<u64>) {
        debug_assert!(
            a.level() >= self.level(),
            "a.level() = {} < self.level() = {}",
            a.level(),
            self.level()
        );
        for i in 0..self.n() {
            let e: i64 = dist.sample(source) as i64;
            self.0.iter().enumerate().for_each(|(j, ring)| {
                a.at_mut(j).0[i] = if e < 0 {
                    ring.modulus.q.wrapping_add(e as u64)
                } else {
                    e as u64
                }
            });
        }
    }
}
