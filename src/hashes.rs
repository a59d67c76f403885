//! Hash suites for the SLH-DSA signature scheme
//!
//! Each parameter set binds a suite of functions derived from its core hash
//! (FIPS-205 section 10): the keyed PRFs, the message digest, and the
//! tweakable hashes F, H and T_l. A suite value is created once per
//! operation and owns any precomputed state, most notably the hash midstate
//! left after absorbing `PK.seed`, which every tweakable call starts from.
//!
//! The chain, PRF+chain and PRF+F combinations are provided methods so both
//! families share one definition; the tree walks are generic over
//! [`HashSuite`], so the inner loops monomorphize per family and the only
//! dispatch on the family happens once per public call.

mod sha2;
mod shake;

pub(crate) use self::sha2::Sha2Hash;
pub(crate) use self::shake::ShakeHash;

use crate::address::{Adrs, AdrsKind};
use crate::params::{N_MAX, SlhParams};

/// The FIPS-205 section 10 function bundle, bound to one parameter set and
/// one `PK.seed`.
pub(crate) trait HashSuite: Sized {
    /// Bind a suite to `pk_seed`, precomputing the absorbed-seed midstate.
    fn bind(prm: &'static SlhParams, pk_seed: &[u8]) -> Self;

    /// PRF(PK.seed, SK.seed, ADRS): secret value generation for WOTS+ and
    /// FORS private keys.
    fn prf(&self, adrs: &Adrs, sk_seed: &[u8], out: &mut [u8]);

    /// PRFmsg(SK.prf, opt_rand, M): the per-signature randomizer R.
    fn prf_msg(&self, sk_prf: &[u8], opt_rand: &[u8], msg: &[u8], out: &mut [u8]);

    /// Hmsg(R, PK.seed, PK.root, M): the m-byte message digest.
    fn h_msg(&self, r: &[u8], pk_root: &[u8], msg: &[u8], out: &mut [u8]);

    /// F: n bytes to n bytes; the WOTS+ chain step and FORS leaf hash.
    fn f(&self, adrs: &Adrs, m1: &[u8], out: &mut [u8]);

    /// H: 2n bytes to n bytes; Merkle node combination.
    fn h(&self, adrs: &Adrs, m1: &[u8], m2: &[u8], out: &mut [u8]);

    /// T_l: l*n bytes to n bytes; WOTS+ and FORS key compression.
    fn t_l(&self, adrs: &Adrs, m: &[u8], out: &mut [u8]);

    /// Algorithm 4: iterate F over `x` in place, `s` times starting at hash
    /// address `i`. `s = 0` is the identity and leaves `adrs` untouched;
    /// callers must not rely on the hash address field after such a call.
    fn chain(&self, adrs: &mut Adrs, x: &mut [u8], i: u32, s: u32) {
        let n = x.len();
        let mut tmp = [0u8; N_MAX];
        for j in i..i + s {
            adrs.set_hash(j);
            tmp[..n].copy_from_slice(x);
            self.f(adrs, &tmp[..n], x);
        }
    }

    /// Fused PRF + chain: derive the WOTS+ secret value for the current
    /// chain address, then advance it `s` steps. Mutates the address type
    /// WOTS_PRF -> WOTS_HASH between the two stages.
    fn wots_chain(&self, adrs: &mut Adrs, sk_seed: &[u8], out: &mut [u8], s: u32) {
        adrs.set_kind(AdrsKind::WotsPrf);
        adrs.set_hash(0);
        self.prf(adrs, sk_seed, out);

        adrs.set_kind(AdrsKind::WotsHash);
        self.chain(adrs, out, 0, s);
    }

    /// Fused PRF + F: derive the FORS secret value for the current tree
    /// index; with `s = 1` also hash it into the corresponding leaf,
    /// mutating the address type FORS_PRF -> FORS_TREE.
    fn fors_hash(&self, adrs: &mut Adrs, sk_seed: &[u8], out: &mut [u8], s: u32) {
        adrs.set_kind(AdrsKind::ForsPrf);
        adrs.set_tree_height(0);
        self.prf(adrs, sk_seed, out);

        if s == 1 {
            let n = out.len();
            let mut tmp = [0u8; N_MAX];
            tmp[..n].copy_from_slice(out);
            adrs.set_kind(AdrsKind::ForsTree);
            self.f(adrs, &tmp[..n], out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{SLH_DSA_SHA2_128F, SLH_DSA_SHA2_256F, SLH_DSA_SHAKE_128F};
    use hex_literal::hex;

    fn prf_msg<H: HashSuite>(prm: &'static SlhParams, expected: &[u8]) {
        let sk_prf = [0u8; N_MAX];
        let opt_rand = [1u8; N_MAX];
        let msg = [2u8; 32];
        let mut out = [0u8; N_MAX];

        let suite = H::bind(prm, &[1u8; N_MAX][..prm.n]);
        suite.prf_msg(&sk_prf[..prm.n], &opt_rand[..prm.n], &msg, &mut out[..prm.n]);

        assert_eq!(&out[..prm.n], expected);
    }

    fn h_msg<H: HashSuite>(prm: &'static SlhParams, expected: &[u8]) {
        let r = [0u8; N_MAX];
        let pk_seed = [1u8; N_MAX];
        let pk_root = [2u8; N_MAX];
        let msg = [3u8; 32];
        let mut out = [0u8; crate::params::M_MAX];

        let suite = H::bind(prm, &pk_seed[..prm.n]);
        suite.h_msg(&r[..prm.n], &pk_root[..prm.n], &msg, &mut out[..prm.m]);

        assert_eq!(&out[..prm.m], expected);
    }

    #[test]
    fn prf_msg_shake_128f() {
        prf_msg::<ShakeHash>(&SLH_DSA_SHAKE_128F, &hex!("bc5c062307df0a41aeeae19ad655f7b2"));
    }

    #[test]
    fn prf_msg_sha2_128f() {
        prf_msg::<Sha2Hash>(&SLH_DSA_SHA2_128F, &hex!("6a4b5cf23911d4f3a6591d7003445316"));
    }

    // Exercises the MGF1-SHA-256 path
    #[test]
    fn h_msg_sha2_128f() {
        h_msg::<Sha2Hash>(
            &SLH_DSA_SHA2_128F,
            &hex!("56658221f675d907a309255e8faef639d11e6a1118fa05d3bbd26179a7e0a54a7f5b"),
        );
    }

    // Exercises the MGF1-SHA-512 path
    #[test]
    fn h_msg_sha2_256f() {
        h_msg::<Sha2Hash>(
            &SLH_DSA_SHA2_256F,
            &hex!(
                "8c86dfb66392d1b647df0deab90be68fb6f988513e84d3ef75fa68591122bb5d"
                "74f6413672db5164e56492b7ca2c2e0335"
            ),
        );
    }

    // Hash-address accumulation is linear: chaining s1 + s2 steps equals
    // chaining s1 steps and then s2 more from position i + s1.
    #[quickcheck_macros::quickcheck]
    fn chain_composes(x: Vec<u8>, i: u8, s1: u8, s2: u8) -> bool {
        let prm = &SLH_DSA_SHAKE_128F;
        let (i, s1, s2) = (u32::from(i) % 8, u32::from(s1) % 4, u32::from(s2) % 4);
        if i + s1 + s2 > 15 {
            return true;
        }
        let mut start = [0u8; N_MAX];
        for (dst, src) in start.iter_mut().zip(x.iter()) {
            *dst = *src;
        }
        let suite = ShakeHash::bind(prm, &[7u8; 16]);
        let mut adrs = Adrs::default();

        let mut once = start;
        suite.chain(&mut adrs, &mut once[..prm.n], i, s1 + s2);

        let mut twice = start;
        suite.chain(&mut adrs, &mut twice[..prm.n], i, s1);
        suite.chain(&mut adrs, &mut twice[..prm.n], i + s1, s2);

        once == twice
    }
}
