use crate::batch::BatchSelect;
use crate::parameters::Parameters;
use math::poly::PolyRNS;
use std::io::{Read, Write};

/// Errors surfaced at the system boundary: malformed persisted artifacts
/// and out-of-range protocol inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("truncated artifact: expected {expected} 8-byte words")]
    Truncated { expected: usize },
    #[error("expected {expected} words, got {got}")]
    WordCount { expected: usize, got: usize },
    #[error("label {value} is not reduced modulo {modulus}")]
    LabelOutOfRange { value: u64, modulus: u64 },
    #[error("selection word {value} is not a bit")]
    InvalidSelectionBit { value: u64 },
}

/// Writes ring elements as raw little-endian 8-byte words, all residues
/// of an element in chain order; no header, no length prefix.
pub(crate) fn write_polys<W: Write>(w: &mut W, polys: &[PolyRNS<u64>]) -> Result<(), Error> {
    for element in polys {
        for residue in &element.0 {
            for &value in &residue.0 {
                w.write_all(&value.to_le_bytes())?;
            }
        }
    }
    Ok(())
}

/// Reads exactly count ring elements in the fixed layout; a short stream
/// is a fatal deserialization error.
pub(crate) fn read_polys<R: Read>(
    params: &Parameters,
    r: &mut R,
    count: usize,
) -> Result<Vec<PolyRNS<u64>>, Error> {
    let ring = params.ring();
    let n: usize = ring.n();
    let levels: usize = ring.level() + 1;
    let expected: usize = count * levels * n;

    let mut buf: Vec<u8> = vec![0u8; expected * 8];
    r.read_exact(&mut buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::Truncated { expected }
        } else {
            Error::Io(e)
        }
    })?;

    let mut words = buf
        .chunks_exact(8)
        .map(|chunk| u64::from_le_bytes(chunk.try_into().expect("chunk is 8 bytes")));

    let mut polys: Vec<PolyRNS<u64>> = vec![ring.new_polyrns(); count];
    for element in polys.iter_mut() {
        for residue in element.0.iter_mut() {
            for value in residue.0.iter_mut() {
                *value = words.next().expect("buffer sized to the layout");
            }
        }
    }
    Ok(polys)
}

impl BatchSelect {
    /// Public parameters: A (w elements) followed by B (2m elements).
    pub fn save_pp<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        write_polys(w, &self.lhe.a)?;
        write_polys(w, &self.tree.b)
    }

    pub fn read_pp<R: Read>(&mut self, r: &mut R) -> Result<(), Error> {
        self.lhe.a = read_polys(self.params(), r, self.params().w())?;
        self.tree.b = read_polys(self.params(), r, 2 * self.params().m())?;
        Ok(())
    }

    /// First-stage secret: s1 (m elements).
    pub fn save_st1<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        write_polys(w, &self.lhe.s1)
    }

    pub fn read_st1<R: Read>(&mut self, r: &mut R) -> Result<(), Error> {
        self.lhe.s1 = read_polys(self.params(), r, self.params().m())?;
        Ok(())
    }

    /// First-stage ciphertext: the linear scheme's w*m block followed by
    /// the ciphertext tree's l*w*2m block.
    pub fn save_ct1<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        write_polys(w, &self.lhe.ct1)?;
        write_polys(w, &self.tree.ct)
    }

    pub fn read_ct1<R: Read>(&mut self, r: &mut R) -> Result<(), Error> {
        let params = self.params();
        let (w, l, m) = (params.w(), params.l(), params.m());
        self.lhe.ct1 = read_polys(self.params(), r, w * m)?;
        self.tree.ct = read_polys(self.params(), r, l * w * 2 * m)?;
        Ok(())
    }

    /// Second-stage secret: s2 (1 element).
    pub fn save_st2<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        write_polys(w, &self.lhe.s2)
    }

    pub fn read_st2<R: Read>(&mut self, r: &mut R) -> Result<(), Error> {
        self.lhe.s2 = read_polys(self.params(), r, 1)?;
        Ok(())
    }

    /// Second-stage ciphertext: ct2 (w elements).
    pub fn save_ct2<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        write_polys(w, &self.lhe.ct2)
    }

    pub fn read_ct2<R: Read>(&mut self, r: &mut R) -> Result<(), Error> {
        self.lhe.ct2 = read_polys(self.params(), r, self.params().w())?;
        Ok(())
    }

    /// Selection key: sk (1 element).
    pub fn save_sk<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        write_polys(w, &self.lhe.sk)
    }

    pub fn read_sk<R: Read>(&mut self, r: &mut R) -> Result<(), Error> {
        self.lhe.sk = read_polys(self.params(), r, 1)?;
        Ok(())
    }
}
