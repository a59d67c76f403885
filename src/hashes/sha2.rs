//! SHA2 instantiation of the hash suite (FIPS-205 sections 11.2.1 and 11.2.2)
//!
//! Category 1 sets (n = 16) use SHA-256 throughout. Categories 3 and 5 use
//! SHA-512 for Hmsg, PRFmsg, H and T_l, while PRF and F stay on SHA-256.
//! Tweakable calls hash `PK.seed || toByte(0, B - n)` first, padding the
//! seed to the compression-function block size; that prefix is absorbed once
//! at bind time and the resulting midstate cloned per call.

use digest::Digest;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

use super::HashSuite;
use crate::address::Adrs;
use crate::params::{N_MAX, SlhParams};

/// MGF1 XOF over a fixed-output digest (RFC 8017 appendix B.2.1).
fn mgf1<D: Digest>(seed: &[u8], out: &mut [u8]) {
    for (counter, chunk) in out.chunks_mut(<D as Digest>::output_size()).enumerate() {
        let counter = u32::try_from(counter).expect("MGF1 output is short");
        let digest = D::new()
            .chain_update(seed)
            .chain_update(counter.to_be_bytes())
            .finalize();
        chunk.copy_from_slice(&digest[..chunk.len()]);
    }
}

/// SHA2 suite with the padded-seed midstates precomputed. The SHA-512
/// midstate exists only for n > 16, where the category 3/5 mappings apply.
#[derive(Clone)]
pub(crate) struct Sha2Hash {
    prm: &'static SlhParams,
    pk_seed: [u8; N_MAX],
    seeded_256: Sha256,
    seeded_512: Option<Sha512>,
}

impl Sha2Hash {
    fn trunc(out: &mut [u8], digest: &[u8]) {
        out.copy_from_slice(&digest[..out.len()]);
    }
}

impl HashSuite for Sha2Hash {
    fn bind(prm: &'static SlhParams, pk_seed: &[u8]) -> Self {
        let pad = [0u8; 128];
        let seeded_256 = Sha256::new_with_prefix(pk_seed).chain_update(&pad[..64 - prm.n]);
        let seeded_512 = (prm.n > 16)
            .then(|| Sha512::new_with_prefix(pk_seed).chain_update(&pad[..128 - prm.n]));
        let mut seed = [0u8; N_MAX];
        seed[..prm.n].copy_from_slice(pk_seed);
        Sha2Hash {
            prm,
            pk_seed: seed,
            seeded_256,
            seeded_512,
        }
    }

    // PRF = Trunc_n(SHA-256(PK.seed || toByte(0, 64 - n) || ADRSc || SK.seed))
    // for every category.
    fn prf(&self, adrs: &Adrs, sk_seed: &[u8], out: &mut [u8]) {
        let digest = self
            .seeded_256
            .clone()
            .chain_update(adrs.compressed())
            .chain_update(sk_seed)
            .finalize();
        Self::trunc(out, &digest);
    }

    // PRFmsg = Trunc_n(HMAC-SHA-X(SK.prf, opt_rand || M)), X = 256 or 512.
    fn prf_msg(&self, sk_prf: &[u8], opt_rand: &[u8], msg: &[u8], out: &mut [u8]) {
        if self.prm.n > 16 {
            let mut mac =
                <Hmac<Sha512> as Mac>::new_from_slice(sk_prf).expect("HMAC takes any key size");
            mac.update(opt_rand);
            mac.update(msg);
            Self::trunc(out, &mac.finalize().into_bytes());
        } else {
            let mut mac =
                <Hmac<Sha256> as Mac>::new_from_slice(sk_prf).expect("HMAC takes any key size");
            mac.update(opt_rand);
            mac.update(msg);
            Self::trunc(out, &mac.finalize().into_bytes());
        }
    }

    // Hmsg = MGF1-SHA-X(R || PK.seed || SHA-X(R || PK.seed || PK.root || M), m)
    fn h_msg(&self, r: &[u8], pk_root: &[u8], msg: &[u8], out: &mut [u8]) {
        let n = self.prm.n;
        let mut seed = [0u8; 2 * N_MAX + 64];
        seed[..n].copy_from_slice(r);
        seed[n..2 * n].copy_from_slice(&self.pk_seed[..n]);
        if n > 16 {
            let digest = Sha512::new()
                .chain_update(r)
                .chain_update(&self.pk_seed[..n])
                .chain_update(pk_root)
                .chain_update(msg)
                .finalize();
            seed[2 * n..2 * n + 64].copy_from_slice(&digest);
            mgf1::<Sha512>(&seed[..2 * n + 64], out);
        } else {
            let digest = Sha256::new()
                .chain_update(r)
                .chain_update(&self.pk_seed[..n])
                .chain_update(pk_root)
                .chain_update(msg)
                .finalize();
            seed[2 * n..2 * n + 32].copy_from_slice(&digest);
            mgf1::<Sha256>(&seed[..2 * n + 32], out);
        }
    }

    // F uses SHA-256 for every category.
    fn f(&self, adrs: &Adrs, m1: &[u8], out: &mut [u8]) {
        let digest = self
            .seeded_256
            .clone()
            .chain_update(adrs.compressed())
            .chain_update(m1)
            .finalize();
        Self::trunc(out, &digest);
    }

    fn h(&self, adrs: &Adrs, m1: &[u8], m2: &[u8], out: &mut [u8]) {
        match &self.seeded_512 {
            Some(seeded) => {
                let digest = seeded
                    .clone()
                    .chain_update(adrs.compressed())
                    .chain_update(m1)
                    .chain_update(m2)
                    .finalize();
                Self::trunc(out, &digest);
            }
            None => {
                let digest = self
                    .seeded_256
                    .clone()
                    .chain_update(adrs.compressed())
                    .chain_update(m1)
                    .chain_update(m2)
                    .finalize();
                Self::trunc(out, &digest);
            }
        }
    }

    fn t_l(&self, adrs: &Adrs, m: &[u8], out: &mut [u8]) {
        match &self.seeded_512 {
            Some(seeded) => {
                let digest = seeded
                    .clone()
                    .chain_update(adrs.compressed())
                    .chain_update(m)
                    .finalize();
                Self::trunc(out, &digest);
            }
            None => {
                let digest = self
                    .seeded_256
                    .clone()
                    .chain_update(adrs.compressed())
                    .chain_update(m)
                    .finalize();
                Self::trunc(out, &digest);
            }
        }
    }
}
