//! SLH-DSA key generation, signing and verification (FIPS-205 section 9)
//!
//! This is the byte-oriented core API over caller-provided buffers; the
//! `SigningKey`/`VerifyingKey` types wrap it. The hash family is resolved
//! here, once per call, and everything below runs monomorphized.

use rand_core::CryptoRngCore;
use signature::Error;

use crate::address::{Adrs, AdrsKind};
use crate::context::SlhContext;
use crate::fors::{fors_pk_from_sig, fors_sign};
use crate::hashes::{HashSuite, Sha2Hash, ShakeHash};
use crate::hypertree::{ht_sign, ht_verify};
use crate::params::{HashFamily, SlhParams, M_MAX, N_MAX};
use crate::util::split_digest;
use crate::xmss::xmss_node;

/// Generate a key pair into caller-provided buffers (algorithm 18).
///
/// `pk_out` receives `PK.seed || PK.root` (2n bytes) and `sk_out` receives
/// `SK.seed || SK.prf || PK.seed || PK.root` (4n bytes). The 3n seed bytes
/// are drawn from `rng` in a single call.
///
/// # Errors
/// Fails if the random source fails or the buffers have the wrong size;
/// nothing is written in either case.
pub fn slh_keygen<R: CryptoRngCore + ?Sized>(
    pk_out: &mut [u8],
    sk_out: &mut [u8],
    rng: &mut R,
    prm: &'static SlhParams,
) -> Result<(), Error> {
    if pk_out.len() != prm.pk_size() || sk_out.len() != prm.sk_size() {
        return Err(Error::new());
    }
    match prm.family {
        HashFamily::Shake => keygen_impl::<ShakeHash, R>(pk_out, sk_out, rng, prm),
        HashFamily::Sha2 => keygen_impl::<Sha2Hash, R>(pk_out, sk_out, rng, prm),
    }
}

/// Sign `msg`, drawing the n-byte `opt_rand` from `rng` (hedged variant of
/// algorithm 19). Returns the number of signature bytes written, which is
/// always `prm.sig_size()`.
///
/// # Errors
/// Fails if the random source fails or a buffer has the wrong size.
pub fn slh_sign<R: CryptoRngCore + ?Sized>(
    sig_out: &mut [u8],
    msg: &[u8],
    sk: &[u8],
    rng: &mut R,
    prm: &'static SlhParams,
) -> Result<usize, Error> {
    let mut opt_rand = [0u8; N_MAX];
    rng.try_fill_bytes(&mut opt_rand[..prm.n])
        .map_err(|_| Error::new())?;
    slh_sign_internal(sig_out, msg, sk, Some(&opt_rand[..prm.n]), prm)
}

/// Sign `msg` with an explicit randomizer (algorithm 19).
///
/// `opt_rand = None` selects the deterministic variant, where `PK.seed`
/// stands in for the randomizer: signatures become a pure function of
/// `(sk, msg)` while staying unique per key.
///
/// # Errors
/// Fails if a buffer has the wrong size or `opt_rand` is not n bytes.
pub fn slh_sign_internal(
    sig_out: &mut [u8],
    msg: &[u8],
    sk: &[u8],
    opt_rand: Option<&[u8]>,
    prm: &'static SlhParams,
) -> Result<usize, Error> {
    if sig_out.len() < prm.sig_size() || sk.len() != prm.sk_size() {
        return Err(Error::new());
    }
    if opt_rand.is_some_and(|r| r.len() != prm.n) {
        return Err(Error::new());
    }
    match prm.family {
        HashFamily::Shake => sign_impl::<ShakeHash>(sig_out, msg, sk, opt_rand, prm),
        HashFamily::Sha2 => sign_impl::<Sha2Hash>(sig_out, msg, sk, opt_rand, prm),
    }
}

/// Verify `sig` over `msg` under `pk` (algorithm 20).
///
/// All failure modes answer `false`: malformed lengths, a diverging
/// reconstruction at any level, and the final root comparison alike.
#[must_use]
pub fn slh_verify(msg: &[u8], sig: &[u8], pk: &[u8], prm: &'static SlhParams) -> bool {
    if sig.len() != prm.sig_size() || pk.len() != prm.pk_size() {
        return false;
    }
    match prm.family {
        HashFamily::Shake => verify_impl::<ShakeHash>(msg, sig, pk, prm),
        HashFamily::Sha2 => verify_impl::<Sha2Hash>(msg, sig, pk, prm),
    }
}

/// Compute `PK.root` for a secret key whose root slot is not filled in yet.
pub(crate) fn pk_root_from_sk(sk: &[u8], prm: &'static SlhParams) -> [u8; N_MAX] {
    match prm.family {
        HashFamily::Shake => pk_root_impl::<ShakeHash>(sk, prm),
        HashFamily::Sha2 => pk_root_impl::<Sha2Hash>(sk, prm),
    }
}

fn pk_root_impl<H: HashSuite>(sk: &[u8], prm: &'static SlhParams) -> [u8; N_MAX] {
    let mut ctx = SlhContext::<H>::from_sk(prm, sk);
    ctx.adrs.set_layer(prm.d as u32 - 1);
    let mut root = [0u8; N_MAX];
    xmss_node(&mut ctx, &mut root[..prm.n], 0, prm.hp as u32);
    root
}

fn keygen_impl<H: HashSuite, R: CryptoRngCore + ?Sized>(
    pk_out: &mut [u8],
    sk_out: &mut [u8],
    rng: &mut R,
    prm: &'static SlhParams,
) -> Result<(), Error> {
    let n = prm.n;
    // SK.seed || SK.prf || PK.seed in one draw
    rng.try_fill_bytes(&mut sk_out[..3 * n])
        .map_err(|_| Error::new())?;
    pk_out[..n].copy_from_slice(&sk_out[2 * n..3 * n]);
    sk_out[3 * n..4 * n].fill(0);

    let root = pk_root_impl::<H>(sk_out, prm);
    sk_out[3 * n..4 * n].copy_from_slice(&root[..n]);
    pk_out[n..2 * n].copy_from_slice(&root[..n]);
    Ok(())
}

fn sign_impl<H: HashSuite>(
    sig: &mut [u8],
    msg: &[u8],
    sk: &[u8],
    opt_rand: Option<&[u8]>,
    prm: &'static SlhParams,
) -> Result<usize, Error> {
    let n = prm.n;
    let ctx = SlhContext::<H>::from_sk(prm, sk);

    let mut rand = [0u8; N_MAX];
    match opt_rand {
        Some(r) => rand[..n].copy_from_slice(r),
        None => rand[..n].copy_from_slice(&ctx.pk_seed[..n]),
    }

    // R, then the randomized digest over it
    ctx.prf_msg(&rand[..n], msg, &mut sig[..n]);
    let mut digest = [0u8; M_MAX];
    ctx.h_msg(&sig[..n], msg, &mut digest[..prm.m]);

    let mut ctx = ctx;
    let written = n + slh_do_sign(&mut ctx, &mut sig[n..], &digest[..prm.m]);
    debug_assert_eq!(written, prm.sig_size());
    Ok(written)
}

/// Core signing of an already-randomized digest under an initialized secret
/// context; `sig` points past the randomizer. Returns |SIG_FORS| + |SIG_HT|.
pub(crate) fn slh_do_sign<H: HashSuite>(
    ctx: &mut SlhContext<H>,
    sig: &mut [u8],
    digest: &[u8],
) -> usize {
    let prm = ctx.prm;
    let n = prm.n;
    let (md, i_tree, i_leaf) = split_digest(prm, digest);

    ctx.adrs = Adrs::default();
    ctx.adrs.set_tree(i_tree);
    ctx.adrs.set_kind_and_clear_keep_keypair(AdrsKind::ForsTree);
    ctx.adrs.set_key_pair(i_leaf);

    let fors_sz = prm.fors_sig_size();
    fors_sign(ctx, &mut sig[..fors_sz], md);

    let mut pk_fors = [0u8; N_MAX];
    fors_pk_from_sig(ctx, &mut pk_fors[..n], &sig[..fors_sz], md);

    let ht_sz = prm.d * prm.xmss_sig_size();
    ht_sign(
        ctx,
        &mut sig[fors_sz..fors_sz + ht_sz],
        &pk_fors[..n],
        i_tree,
        i_leaf,
    );
    fors_sz + ht_sz
}

fn verify_impl<H: HashSuite>(msg: &[u8], sig: &[u8], pk: &[u8], prm: &'static SlhParams) -> bool {
    let n = prm.n;
    let mut ctx = SlhContext::<H>::from_pk(prm, pk);

    let mut digest = [0u8; M_MAX];
    ctx.h_msg(&sig[..n], msg, &mut digest[..prm.m]);
    let (md, i_tree, i_leaf) = split_digest(prm, &digest[..prm.m]);

    ctx.adrs = Adrs::default();
    ctx.adrs.set_tree(i_tree);
    ctx.adrs.set_kind_and_clear_keep_keypair(AdrsKind::ForsTree);
    ctx.adrs.set_key_pair(i_leaf);

    let fors_sz = prm.fors_sig_size();
    let sig_fors = &sig[n..n + fors_sz];
    let sig_ht = &sig[n + fors_sz..];

    let mut pk_fors = [0u8; N_MAX];
    fors_pk_from_sig(&mut ctx, &mut pk_fors[..n], sig_fors, md);

    ht_verify(&mut ctx, &pk_fors[..n], sig_ht, i_tree, i_leaf)
}
