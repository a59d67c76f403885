//! SLH-DSA parameter sets
//!
//! FIPS-205 section 11 defines twelve approved parameter sets, six per hash
//! family. Each is available here as a `'static` record, so callers can pick
//! one at runtime (e.g. by name from a test driver or a protocol field) and
//! all twelve fit in a single binary.

/// Hash family a parameter set is instantiated over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashFamily {
    /// SHA-256 / SHA-512 instantiation (FIPS-205 sections 11.2.1 and 11.2.2)
    Sha2,
    /// SHAKE256 instantiation (FIPS-205 section 11.1)
    Shake,
}

/// An SLH-DSA parameter set.
///
/// Immutable after construction; the twelve standard instances
/// ([`SLH_DSA_SHAKE_128S`] and friends) may be freely shared among threads.
#[derive(Debug, PartialEq, Eq)]
pub struct SlhParams {
    pub(crate) alg_id: &'static str,
    pub(crate) family: HashFamily,
    /// Security parameter: hash output width in bytes.
    pub(crate) n: usize,
    /// Total hypertree height in bits.
    pub(crate) h: usize,
    /// Number of XMSS layers.
    pub(crate) d: usize,
    /// Height h' of each XMSS tree; h = hp * d.
    pub(crate) hp: usize,
    /// FORS tree height.
    pub(crate) a: usize,
    /// Number of FORS trees.
    pub(crate) k: usize,
    /// Winternitz chain index bits; 4 for every approved set.
    pub(crate) lg_w: usize,
    /// Message digest length in bytes.
    pub(crate) m: usize,
}

// Scratch buffers are sized for the largest approved set so that the working
// set of an operation is statically bounded.
pub(crate) const N_MAX: usize = 32;
pub(crate) const LEN_MAX: usize = 2 * N_MAX + 3;
pub(crate) const K_MAX: usize = 35;
pub(crate) const M_MAX: usize = 49;
pub(crate) const HP_MAX: usize = 9;
pub(crate) const A_MAX: usize = 14;

impl SlhParams {
    /// Standard identifier of this parameter set, e.g. `"SLH-DSA-SHAKE-128f"`.
    #[must_use]
    pub const fn algorithm_id(&self) -> &'static str {
        self.alg_id
    }

    /// Hash family this parameter set is instantiated over.
    #[must_use]
    pub const fn hash_family(&self) -> HashFamily {
        self.family
    }

    /// Public (verification) key size in bytes: `PK.seed || PK.root`.
    #[must_use]
    pub const fn pk_size(&self) -> usize {
        2 * self.n
    }

    /// Private (signing) key size in bytes:
    /// `SK.seed || SK.prf || PK.seed || PK.root`.
    #[must_use]
    pub const fn sk_size(&self) -> usize {
        4 * self.n
    }

    /// Signature size in bytes.
    #[must_use]
    pub const fn sig_size(&self) -> usize {
        (1 + self.k * (1 + self.a) + self.h + self.d * self.wots_len()) * self.n
    }

    /// Look up a parameter set by its standard identifier.
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static SlhParams> {
        ALL.iter().copied().find(|prm| prm.alg_id == name)
    }

    pub(crate) const fn len1(&self) -> usize {
        (8 * self.n + self.lg_w - 1) / self.lg_w
    }

    // FIPS-205 appendix B: len2 = 3 whenever lg_w = 4 and 9 <= n <= 136,
    // which covers every approved set; `check` enforces the precondition.
    pub(crate) const fn len2(&self) -> usize {
        3
    }

    pub(crate) const fn wots_len(&self) -> usize {
        self.len1() + self.len2()
    }

    pub(crate) const fn xmss_sig_size(&self) -> usize {
        (self.wots_len() + self.hp) * self.n
    }

    pub(crate) const fn fors_sig_size(&self) -> usize {
        self.k * (1 + self.a) * self.n
    }

    // Parameter misuse is a programmer error; fail fast.
    pub(crate) fn check(&self) {
        assert!(
            self.lg_w == 4 && matches!(self.n, 16 | 24 | 32),
            "unsupported SLH-DSA parameter set"
        );
        debug_assert_eq!(self.h, self.hp * self.d);
        debug_assert!(self.m >= (self.k * self.a + 7) / 8 + (self.h - self.hp + 7) / 8 + (self.hp + 7) / 8);
    }
}

/// SLH-DSA-SHAKE-128s: category 1, small signatures.
pub static SLH_DSA_SHAKE_128S: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHAKE-128s",
    family: HashFamily::Shake,
    n: 16, h: 63, d: 7, hp: 9, a: 12, k: 14, lg_w: 4, m: 30,
};

/// SLH-DSA-SHAKE-128f: category 1, fast signing.
pub static SLH_DSA_SHAKE_128F: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHAKE-128f",
    family: HashFamily::Shake,
    n: 16, h: 66, d: 22, hp: 3, a: 6, k: 33, lg_w: 4, m: 34,
};

/// SLH-DSA-SHAKE-192s: category 3, small signatures.
pub static SLH_DSA_SHAKE_192S: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHAKE-192s",
    family: HashFamily::Shake,
    n: 24, h: 63, d: 7, hp: 9, a: 14, k: 17, lg_w: 4, m: 39,
};

/// SLH-DSA-SHAKE-192f: category 3, fast signing.
pub static SLH_DSA_SHAKE_192F: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHAKE-192f",
    family: HashFamily::Shake,
    n: 24, h: 66, d: 22, hp: 3, a: 8, k: 33, lg_w: 4, m: 42,
};

/// SLH-DSA-SHAKE-256s: category 5, small signatures.
pub static SLH_DSA_SHAKE_256S: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHAKE-256s",
    family: HashFamily::Shake,
    n: 32, h: 64, d: 8, hp: 8, a: 14, k: 22, lg_w: 4, m: 47,
};

/// SLH-DSA-SHAKE-256f: category 5, fast signing.
pub static SLH_DSA_SHAKE_256F: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHAKE-256f",
    family: HashFamily::Shake,
    n: 32, h: 68, d: 17, hp: 4, a: 9, k: 35, lg_w: 4, m: 49,
};

/// SLH-DSA-SHA2-128s: category 1, small signatures.
pub static SLH_DSA_SHA2_128S: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHA2-128s",
    family: HashFamily::Sha2,
    n: 16, h: 63, d: 7, hp: 9, a: 12, k: 14, lg_w: 4, m: 30,
};

/// SLH-DSA-SHA2-128f: category 1, fast signing.
pub static SLH_DSA_SHA2_128F: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHA2-128f",
    family: HashFamily::Sha2,
    n: 16, h: 66, d: 22, hp: 3, a: 6, k: 33, lg_w: 4, m: 34,
};

/// SLH-DSA-SHA2-192s: category 3, small signatures.
pub static SLH_DSA_SHA2_192S: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHA2-192s",
    family: HashFamily::Sha2,
    n: 24, h: 63, d: 7, hp: 9, a: 14, k: 17, lg_w: 4, m: 39,
};

/// SLH-DSA-SHA2-192f: category 3, fast signing.
pub static SLH_DSA_SHA2_192F: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHA2-192f",
    family: HashFamily::Sha2,
    n: 24, h: 66, d: 22, hp: 3, a: 8, k: 33, lg_w: 4, m: 42,
};

/// SLH-DSA-SHA2-256s: category 5, small signatures.
pub static SLH_DSA_SHA2_256S: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHA2-256s",
    family: HashFamily::Sha2,
    n: 32, h: 64, d: 8, hp: 8, a: 14, k: 22, lg_w: 4, m: 47,
};

/// SLH-DSA-SHA2-256f: category 5, fast signing.
pub static SLH_DSA_SHA2_256F: SlhParams = SlhParams {
    alg_id: "SLH-DSA-SHA2-256f",
    family: HashFamily::Sha2,
    n: 32, h: 68, d: 17, hp: 4, a: 9, k: 35, lg_w: 4, m: 49,
};

/// All twelve approved parameter sets.
pub static ALL: [&SlhParams; 12] = [
    &SLH_DSA_SHAKE_128S,
    &SLH_DSA_SHAKE_128F,
    &SLH_DSA_SHAKE_192S,
    &SLH_DSA_SHAKE_192F,
    &SLH_DSA_SHAKE_256S,
    &SLH_DSA_SHAKE_256F,
    &SLH_DSA_SHA2_128S,
    &SLH_DSA_SHA2_128F,
    &SLH_DSA_SHA2_192S,
    &SLH_DSA_SHA2_192F,
    &SLH_DSA_SHA2_256S,
    &SLH_DSA_SHA2_256F,
];
