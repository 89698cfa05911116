//! Oblivious batched selection between two secret label vectors.
//!
//! Two-message protocol computing, per slot, `out[i] = l1[i]*y[i] + l2[i]
//! mod p` under a secret bit vector `y`, without revealing the labels or
//! the bits to the counterpart. A width-`w` linear homomorphic scheme
//! ([lhe::LinearHe]) is keyed through a binary-tree digest
//! ([tree::TreeDigest]) that compresses the selection vector into
//! O(log w) ring elements; noise flooding on the second label path masks
//! the correlated noise the combination leaks.

pub mod batch;
pub mod gadget;
pub mod lhe;
mod ops;
pub mod parameters;
pub mod plaintext;
pub mod serialize;
pub mod tree;

pub use batch::BatchSelect;
pub use parameters::{BATCH_SELECT_N4096_W512, Parameters, ParametersLiteral};
pub use plaintext::{Labels, SelectionVector};
pub use serialize::Error;
