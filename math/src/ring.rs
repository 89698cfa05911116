pub mod impl_u64;

use crate::dft::DFT;
use crate::modulus::WordOps;
use crate::modulus::prime::Prime;
use crate::poly::{Poly, PolyRNS};

/// Polynomial ring Z_q[X]/(X^n + 1) for a single prime modulus.
pub struct Ring<O> {
    pub n: usize,
    pub modulus: Prime<O>,
    pub dft: Box<dyn DFT<O>>,
}

impl<O> Ring<O> {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn log_n(&self) -> usize {
        self.n.log2()
    }
}

impl<O: Default + Clone + Copy> Ring<O> {
    pub fn new_poly(&self) -> Poly<O> {
        Poly::new(self.n())
    }
}

/// RNS ring over a chain of primes sharing the degree n.
pub struct RingRNS<O>(pub Vec<Ring<O>>);

impl<O> RingRNS<O> {
    pub fn n(&self) -> usize {
        self.0[0].n()
    }

    pub fn log_n(&self) -> usize {
        self.0[0].log_n()
    }

    pub fn level(&self) -> usize {
        self.0.len() - 1
    }
}

impl<O: Default + Clone + Copy> RingRNS<O> {
    pub fn new_polyrns(&self) -> PolyRNS<O> {
        PolyRNS::new(self.n(), self.level())
    }
}
