//! Detached signature value type
//!
//! A signature is the flat byte concatenation `R || SIG_FORS || SIG_HT`;
//! nothing inside it needs parsing until verification walks it, so the type
//! stores the raw bytes together with the parameter set they belong to.

use alloc::boxed::Box;
use alloc::vec::Vec;

use signature::Error;

use crate::params::SlhParams;

/// A detached SLH-DSA signature, bound to its parameter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub(crate) prm: &'static SlhParams,
    pub(crate) bytes: Box<[u8]>,
}

impl Signature {
    /// The parameter set this signature was produced under.
    #[must_use]
    pub fn parameters(&self) -> &'static SlhParams {
        self.prm
    }

    /// The raw `R || SIG_FORS || SIG_HT` bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copy the signature into a fresh vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Deserialize a signature of the given parameter set.
    ///
    /// # Errors
    /// Fails unless `bytes` is exactly `prm.sig_size()` long.
    pub fn from_bytes(prm: &'static SlhParams, bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != prm.sig_size() {
            return Err(Error::new());
        }
        Ok(Signature {
            prm,
            bytes: bytes.into(),
        })
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{SLH_DSA_SHAKE_128F, SLH_DSA_SHAKE_128S};

    #[test]
    fn length_is_checked() {
        let bytes = alloc::vec![0u8; SLH_DSA_SHAKE_128S.sig_size()];
        assert!(Signature::from_bytes(&SLH_DSA_SHAKE_128S, &bytes).is_ok());
        assert!(Signature::from_bytes(&SLH_DSA_SHAKE_128F, &bytes).is_err());
        assert!(Signature::from_bytes(&SLH_DSA_SHAKE_128S, &bytes[1..]).is_err());
    }
}
