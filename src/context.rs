//! Per-operation signing/verification context
//!
//! A context is created at the start of each keygen/sign/verify call and
//! dropped at its end; it is never shared between operations. It carries
//! copies of the key fields, the current (mutable) hash address, and the
//! bound hash suite with its precomputed midstates.

use crate::address::Adrs;
use crate::hashes::HashSuite;
use crate::params::{N_MAX, SlhParams};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

pub(crate) struct SlhContext<H: HashSuite> {
    pub(crate) prm: &'static SlhParams,
    pub(crate) sk_seed: [u8; N_MAX],
    pub(crate) sk_prf: [u8; N_MAX],
    pub(crate) pk_seed: [u8; N_MAX],
    pub(crate) pk_root: [u8; N_MAX],
    pub(crate) adrs: Adrs,
    pub(crate) hash: H,
}

impl<H: HashSuite> SlhContext<H> {
    /// Build a signing context from a 4n-byte secret key
    /// (`SK.seed || SK.prf || PK.seed || PK.root`).
    ///
    /// The secret bytes are copied out before the hash suite absorbs
    /// `PK.seed`, so the cached midstate always refers to this context's own
    /// copy of the seed.
    pub fn from_sk(prm: &'static SlhParams, sk: &[u8]) -> Self {
        prm.check();
        debug_assert_eq!(sk.len(), prm.sk_size());
        let n = prm.n;

        let mut sk_seed = [0u8; N_MAX];
        let mut sk_prf = [0u8; N_MAX];
        let mut pk_seed = [0u8; N_MAX];
        let mut pk_root = [0u8; N_MAX];
        sk_seed[..n].copy_from_slice(&sk[..n]);
        sk_prf[..n].copy_from_slice(&sk[n..2 * n]);
        pk_seed[..n].copy_from_slice(&sk[2 * n..3 * n]);
        pk_root[..n].copy_from_slice(&sk[3 * n..4 * n]);

        let hash = H::bind(prm, &pk_seed[..n]);
        SlhContext {
            prm,
            sk_seed,
            sk_prf,
            pk_seed,
            pk_root,
            adrs: Adrs::default(),
            hash,
        }
    }

    /// Build a verification context from a 2n-byte public key
    /// (`PK.seed || PK.root`). The secret fields stay zero and no code path
    /// reachable from verification reads them.
    pub fn from_pk(prm: &'static SlhParams, pk: &[u8]) -> Self {
        prm.check();
        debug_assert_eq!(pk.len(), prm.pk_size());
        let n = prm.n;

        let mut pk_seed = [0u8; N_MAX];
        let mut pk_root = [0u8; N_MAX];
        pk_seed[..n].copy_from_slice(&pk[..n]);
        pk_root[..n].copy_from_slice(&pk[n..2 * n]);

        let hash = H::bind(prm, &pk_seed[..n]);
        SlhContext {
            prm,
            sk_seed: [0u8; N_MAX],
            sk_prf: [0u8; N_MAX],
            pk_seed,
            pk_root,
            adrs: Adrs::default(),
            hash,
        }
    }

    pub fn prf_msg(&self, opt_rand: &[u8], msg: &[u8], out: &mut [u8]) {
        let n = self.prm.n;
        self.hash.prf_msg(&self.sk_prf[..n], opt_rand, msg, out);
    }

    pub fn h_msg(&self, r: &[u8], msg: &[u8], out: &mut [u8]) {
        let n = self.prm.n;
        self.hash.h_msg(r, &self.pk_root[..n], msg, out);
    }

    pub fn f(&self, m1: &[u8], out: &mut [u8]) {
        self.hash.f(&self.adrs, m1, out);
    }

    pub fn h(&self, m1: &[u8], m2: &[u8], out: &mut [u8]) {
        self.hash.h(&self.adrs, m1, m2, out);
    }

    pub fn t_l(&self, m: &[u8], out: &mut [u8]) {
        self.hash.t_l(&self.adrs, m, out);
    }

    pub fn chain(&mut self, x: &mut [u8], i: u32, s: u32) {
        let SlhContext { hash, adrs, .. } = self;
        hash.chain(adrs, x, i, s);
    }

    pub fn wots_chain(&mut self, out: &mut [u8], s: u32) {
        let SlhContext {
            hash,
            adrs,
            sk_seed,
            prm,
            ..
        } = self;
        hash.wots_chain(adrs, &sk_seed[..prm.n], out, s);
    }

    pub fn fors_hash(&mut self, out: &mut [u8], s: u32) {
        let SlhContext {
            hash,
            adrs,
            sk_seed,
            prm,
            ..
        } = self;
        hash.fors_hash(adrs, &sk_seed[..prm.n], out, s);
    }
}

#[cfg(test)]
impl<H: HashSuite> SlhContext<H> {
    /// Context from bare seeds with a zero `PK.root`, for unit tests.
    pub fn from_test_seeds(prm: &'static SlhParams, sk_seed: &[u8], pk_seed: &[u8]) -> Self {
        let mut sk = [0u8; 4 * N_MAX];
        sk[..prm.n].copy_from_slice(sk_seed);
        sk[2 * prm.n..3 * prm.n].copy_from_slice(pk_seed);
        Self::from_sk(prm, &sk[..prm.sk_size()])
    }
}

#[cfg(feature = "zeroize")]
impl<H: HashSuite> Drop for SlhContext<H> {
    fn drop(&mut self) {
        self.sk_seed.zeroize();
        self.sk_prf.zeroize();
    }
}
