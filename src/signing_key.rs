//! Secret (signing) keys

use alloc::vec;
use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use signature::{Error, KeypairRef, RandomizedSigner, Signer};

use crate::params::{SlhParams, N_MAX};
use crate::signature_encoding::Signature;
use crate::slh::{pk_root_from_sk, slh_sign_internal};
use crate::verifying_key::VerifyingKey;

#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An SLH-DSA signing key with its cached verifying key.
///
/// [`Signer`] produces deterministic signatures (`opt_rand = PK.seed`);
/// [`RandomizedSigner`] produces hedged ones. Both go through
/// [`SigningKey::sign_internal`], which takes the randomizer explicitly.
#[derive(Clone)]
pub struct SigningKey {
    pub(crate) prm: &'static SlhParams,
    pub(crate) sk_seed: [u8; N_MAX],
    pub(crate) sk_prf: [u8; N_MAX],
    pub(crate) verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Generate a fresh key, drawing the 3n seed bytes from `rng` in a
    /// single call.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, prm: &'static SlhParams) -> Self {
        let n = prm.n;
        let mut seeds = [0u8; 3 * N_MAX];
        rng.fill_bytes(&mut seeds[..3 * n]);
        Self::from_seeds(prm, &seeds[..n], &seeds[n..2 * n], &seeds[2 * n..3 * n])
    }

    /// Construct a key from pre-chosen seeds, recomputing `PK.root`.
    ///
    /// Each seed slice must be n bytes. This is the seed-level keygen of
    /// FIPS-205; it exists mostly for known-answer validation.
    ///
    /// # Panics
    /// Panics if a seed slice has the wrong length.
    #[must_use]
    pub fn from_seeds(
        prm: &'static SlhParams,
        sk_seed: &[u8],
        sk_prf: &[u8],
        pk_seed: &[u8],
    ) -> Self {
        let n = prm.n;
        assert!(sk_seed.len() == n && sk_prf.len() == n && pk_seed.len() == n);

        let mut sk = [0u8; 4 * N_MAX];
        sk[..n].copy_from_slice(sk_seed);
        sk[n..2 * n].copy_from_slice(sk_prf);
        sk[2 * n..3 * n].copy_from_slice(pk_seed);
        let root = pk_root_from_sk(&sk[..4 * n], prm);
        sk[3 * n..4 * n].copy_from_slice(&root[..n]);

        Self::from_parts(prm, &sk)
    }

    fn from_parts(prm: &'static SlhParams, sk: &[u8]) -> Self {
        let n = prm.n;
        let mut sk_seed = [0u8; N_MAX];
        let mut sk_prf = [0u8; N_MAX];
        sk_seed[..n].copy_from_slice(&sk[..n]);
        sk_prf[..n].copy_from_slice(&sk[n..2 * n]);
        let verifying_key =
            VerifyingKey::from_bytes(prm, &sk[2 * n..4 * n]).expect("key halves are sized");
        SigningKey {
            prm,
            sk_seed,
            sk_prf,
            verifying_key,
        }
    }

    /// The parameter set this key belongs to.
    #[must_use]
    pub fn parameters(&self) -> &'static SlhParams {
        self.prm
    }

    /// The cached public half.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key.clone()
    }

    /// Serialize as `SK.seed || SK.prf || PK.seed || PK.root` (4n bytes).
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_sk_bytes()[..self.prm.sk_size()].to_vec()
    }

    /// Deserialize a signing key of the given parameter set. The embedded
    /// `PK.root` is trusted, not recomputed.
    ///
    /// # Errors
    /// Fails unless `bytes` is exactly `prm.sk_size()` long.
    pub fn from_bytes(prm: &'static SlhParams, bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != prm.sk_size() {
            return Err(Error::new());
        }
        Ok(Self::from_parts(prm, bytes))
    }

    /// Sign with an explicit randomizer; `None` selects the deterministic
    /// variant (`opt_rand = PK.seed`).
    ///
    /// # Errors
    /// Fails if `opt_rand` is given and is not n bytes.
    pub fn sign_internal(&self, msg: &[u8], opt_rand: Option<&[u8]>) -> Result<Signature, Error> {
        let mut sig = vec![0u8; self.prm.sig_size()];
        let sk = self.to_sk_bytes();
        slh_sign_internal(&mut sig, msg, &sk[..self.prm.sk_size()], opt_rand, self.prm)?;
        Ok(Signature {
            prm: self.prm,
            bytes: sig.into(),
        })
    }

    fn to_sk_bytes(&self) -> [u8; 4 * N_MAX] {
        let n = self.prm.n;
        let mut sk = [0u8; 4 * N_MAX];
        sk[..n].copy_from_slice(&self.sk_seed[..n]);
        sk[n..2 * n].copy_from_slice(&self.sk_prf[..n]);
        sk[2 * n..3 * n].copy_from_slice(&self.verifying_key.pk_seed[..n]);
        sk[3 * n..4 * n].copy_from_slice(&self.verifying_key.pk_root[..n]);
        sk
    }
}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        self.sk_seed == other.sk_seed
            && self.sk_prf == other.sk_prf
            && self.verifying_key == other.verifying_key
    }
}

impl Eq for SigningKey {}

impl core::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("prm", &self.prm.alg_id)
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> Result<Signature, Error> {
        self.sign_internal(msg, None)
    }
}

impl RandomizedSigner<Signature> for SigningKey {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> Result<Signature, Error> {
        let mut opt_rand = [0u8; N_MAX];
        rng.try_fill_bytes(&mut opt_rand[..self.prm.n])
            .map_err(|_| Error::new())?;
        self.sign_internal(msg, Some(&opt_rand[..self.prm.n]))
    }
}

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}

#[cfg(feature = "zeroize")]
impl Drop for SigningKey {
    fn drop(&mut self) {
        self.sk_seed.zeroize();
        self.sk_prf.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for SigningKey {}
