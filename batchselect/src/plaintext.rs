use crate::parameters::Parameters;
use crate::serialize::Error;

/// Label vector, one value per slot, validated below the plaintext
/// modulus at the boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels(Vec<u64>);

impl Labels {
    pub fn from_words(params: &Parameters, words: Vec<u64>) -> Result<Self, Error> {
        let expected: usize = params.w() * params.n();
        if words.len() != expected {
            return Err(Error::WordCount {
                expected,
                got: words.len(),
            });
        }
        let p: u64 = params.plaintext_modulus();
        if let Some(&value) = words.iter().find(|&&value| value >= p) {
            return Err(Error::LabelOutOfRange { value, modulus: p });
        }
        Ok(Self(words))
    }

    pub fn words(&self) -> &[u64] {
        &self.0
    }
}

/// Secret per-slot selection bits, validated 0/1 at the boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionVector(Vec<bool>);

impl SelectionVector {
    pub fn from_words(params: &Parameters, words: &[u64]) -> Result<Self, Error> {
        let expected: usize = params.w() * params.n();
        if words.len() != expected {
            return Err(Error::WordCount {
                expected,
                got: words.len(),
            });
        }
        let mut bits: Vec<bool> = Vec::with_capacity(words.len());
        for &value in words {
            match value {
                0 => bits.push(false),
                1 => bits.push(true),
                _ => return Err(Error::InvalidSelectionBit { value }),
            }
        }
        Ok(Self(bits))
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn to_words(&self) -> Vec<u64> {
        self.0.iter().map(|&bit| bit as u64).collect()
    }
}
