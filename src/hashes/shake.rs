//! SHAKE256 instantiation of the hash suite (FIPS-205 section 11.1)

use digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

use super::HashSuite;
use crate::address::Adrs;
use crate::params::{N_MAX, SlhParams};

/// SHAKE256 suite. `seeded` holds the XOF state after absorbing `PK.seed`;
/// every tweakable call clones it instead of re-absorbing the seed.
#[derive(Clone)]
pub(crate) struct ShakeHash {
    prm: &'static SlhParams,
    pk_seed: [u8; N_MAX],
    seeded: Shake256,
}

impl HashSuite for ShakeHash {
    fn bind(prm: &'static SlhParams, pk_seed: &[u8]) -> Self {
        let mut seeded = Shake256::default();
        seeded.update(pk_seed);
        let mut seed = [0u8; N_MAX];
        seed[..prm.n].copy_from_slice(pk_seed);
        ShakeHash {
            prm,
            pk_seed: seed,
            seeded,
        }
    }

    // PRF(PK.seed, SK.seed, ADRS) = SHAKE256(PK.seed || ADRS || SK.seed, 8n)
    fn prf(&self, adrs: &Adrs, sk_seed: &[u8], out: &mut [u8]) {
        let mut h = self.seeded.clone();
        h.update(adrs.as_ref());
        h.update(sk_seed);
        h.finalize_xof().read(out);
    }

    // PRFmsg(SK.prf, opt_rand, M) = SHAKE256(SK.prf || opt_rand || M, 8n)
    fn prf_msg(&self, sk_prf: &[u8], opt_rand: &[u8], msg: &[u8], out: &mut [u8]) {
        let mut h = Shake256::default();
        h.update(sk_prf);
        h.update(opt_rand);
        h.update(msg);
        h.finalize_xof().read(out);
    }

    // Hmsg(R, PK.seed, PK.root, M) = SHAKE256(R || PK.seed || PK.root || M, 8m)
    fn h_msg(&self, r: &[u8], pk_root: &[u8], msg: &[u8], out: &mut [u8]) {
        let mut h = Shake256::default();
        h.update(r);
        h.update(&self.pk_seed[..self.prm.n]);
        h.update(pk_root);
        h.update(msg);
        h.finalize_xof().read(out);
    }

    // F(PK.seed, ADRS, M1) = SHAKE256(PK.seed || ADRS || M1, 8n)
    fn f(&self, adrs: &Adrs, m1: &[u8], out: &mut [u8]) {
        let mut h = self.seeded.clone();
        h.update(adrs.as_ref());
        h.update(m1);
        h.finalize_xof().read(out);
    }

    // H(PK.seed, ADRS, M1 || M2) = SHAKE256(PK.seed || ADRS || M1 || M2, 8n)
    fn h(&self, adrs: &Adrs, m1: &[u8], m2: &[u8], out: &mut [u8]) {
        let mut h = self.seeded.clone();
        h.update(adrs.as_ref());
        h.update(m1);
        h.update(m2);
        h.finalize_xof().read(out);
    }

    // T_l(PK.seed, ADRS, M) = SHAKE256(PK.seed || ADRS || M, 8n)
    fn t_l(&self, adrs: &Adrs, m: &[u8], out: &mut [u8]) {
        let mut h = self.seeded.clone();
        h.update(adrs.as_ref());
        h.update(m);
        h.finalize_xof().read(out);
    }
}
