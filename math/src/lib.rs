pub mod dft;
pub mod modulus;
pub mod poly;
pub mod ring;
