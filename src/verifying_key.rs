//! Public (verification) keys

use alloc::vec::Vec;

use signature::{Error, Verifier};
use subtle::ConstantTimeEq;

use crate::params::{SlhParams, N_MAX};
use crate::signature_encoding::Signature;
use crate::slh::slh_verify;

/// An SLH-DSA public key: `PK.seed || PK.root`, bound to a parameter set.
#[derive(Clone, Debug)]
pub struct VerifyingKey {
    pub(crate) prm: &'static SlhParams,
    pub(crate) pk_seed: [u8; N_MAX],
    pub(crate) pk_root: [u8; N_MAX],
}

impl VerifyingKey {
    /// The parameter set this key belongs to.
    #[must_use]
    pub fn parameters(&self) -> &'static SlhParams {
        self.prm
    }

    /// Serialize as `PK.seed || PK.root` (2n bytes).
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let n = self.prm.n;
        let mut out = Vec::with_capacity(2 * n);
        out.extend_from_slice(&self.pk_seed[..n]);
        out.extend_from_slice(&self.pk_root[..n]);
        out
    }

    /// Deserialize a public key of the given parameter set.
    ///
    /// # Errors
    /// Fails unless `bytes` is exactly `prm.pk_size()` long.
    pub fn from_bytes(prm: &'static SlhParams, bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != prm.pk_size() {
            return Err(Error::new());
        }
        let n = prm.n;
        let mut pk_seed = [0u8; N_MAX];
        let mut pk_root = [0u8; N_MAX];
        pk_seed[..n].copy_from_slice(&bytes[..n]);
        pk_root[..n].copy_from_slice(&bytes[n..2 * n]);
        Ok(VerifyingKey {
            prm,
            pk_seed,
            pk_root,
        })
    }
}

impl PartialEq for VerifyingKey {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.prm, other.prm)
            && bool::from(
                self.pk_seed.ct_eq(&other.pk_seed) & self.pk_root.ct_eq(&other.pk_root),
            )
    }
}

impl Eq for VerifyingKey {}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> Result<(), Error> {
        if !core::ptr::eq(self.prm, signature.prm) {
            return Err(Error::new());
        }
        let n = self.prm.n;
        let mut pk = [0u8; 2 * N_MAX];
        pk[..n].copy_from_slice(&self.pk_seed[..n]);
        pk[n..2 * n].copy_from_slice(&self.pk_root[..n]);
        if slh_verify(msg, &signature.bytes, &pk[..2 * n], self.prm) {
            Ok(())
        } else {
            Err(Error::new())
        }
    }
}
