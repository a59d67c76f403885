//! WOTS+ one-time signatures (FIPS-205 section 5)

use crate::address::AdrsKind;
use crate::context::SlhContext;
use crate::hashes::HashSuite;
use crate::params::{LEN_MAX, N_MAX, SlhParams};
use crate::util::base_2b;

pub(crate) const LOG_W: usize = 4;
pub(crate) const W: u32 = 16;

/// Shared helper for algorithms 6 and 7: the base-w digits of `m` followed
/// by the base-w digits of the checksum.
pub(crate) fn wots_msg_digits(prm: &SlhParams, m: &[u8], vm: &mut [u32; LEN_MAX]) {
    let len1 = prm.len1();
    let len2 = prm.len2();
    base_2b(&mut vm[..len1], m, prm.lg_w);

    let csum: u32 = vm[..len1].iter().map(|&v| (W - 1) - v).sum();
    // left-align the checksum inside its byte encoding
    let csum = csum << ((8 - ((len2 * LOG_W) & 7)) & 7);
    let csum_bytes = (len2 * LOG_W + 7) / 8;
    let buf = csum.to_be_bytes();
    base_2b(&mut vm[len1..len1 + len2], &buf[4 - csum_bytes..], prm.lg_w);
}

/// Algorithm 6: sign an n-byte message under the key pair currently in the
/// address. The caller has set the type to WOTS_HASH and the key-pair field.
pub(crate) fn wots_sign<H: HashSuite>(ctx: &mut SlhContext<H>, sig: &mut [u8], m: &[u8]) {
    let n = ctx.prm.n;
    let len = ctx.prm.wots_len();
    let mut vm = [0u32; LEN_MAX];
    wots_msg_digits(ctx.prm, m, &mut vm);

    for (i, chunk) in sig[..len * n].chunks_exact_mut(n).enumerate() {
        ctx.adrs.set_chain(i as u32);
        ctx.wots_chain(chunk, vm[i]);
    }
}

/// Algorithm 7: recover the WOTS+ public key implied by a signature by
/// running each chain to its end and compressing with T_l.
pub(crate) fn wots_pk_from_sig<H: HashSuite>(
    ctx: &mut SlhContext<H>,
    pk: &mut [u8],
    sig: &[u8],
    m: &[u8],
) {
    let n = ctx.prm.n;
    let len = ctx.prm.wots_len();
    let mut vm = [0u32; LEN_MAX];
    wots_msg_digits(ctx.prm, m, &mut vm);

    let mut tmp = [0u8; LEN_MAX * N_MAX];
    for i in 0..len {
        ctx.adrs.set_chain(i as u32);
        let chunk = &mut tmp[i * n..(i + 1) * n];
        chunk.copy_from_slice(&sig[i * n..(i + 1) * n]);
        ctx.chain(chunk, vm[i], W - 1 - vm[i]);
    }

    ctx.adrs.set_kind_and_clear_keep_keypair(AdrsKind::WotsPk);
    ctx.t_l(&tmp[..len * n], pk);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashes::ShakeHash;
    use crate::params::{ALL, SLH_DSA_SHAKE_128F};
    use hex_literal::hex;
    use rand::RngCore;

    fn test_ctx<H: HashSuite>(
        prm: &'static SlhParams,
        sk_seed: &[u8],
        pk_seed: &[u8],
    ) -> SlhContext<H> {
        SlhContext::from_test_seeds(prm, sk_seed, pk_seed)
    }

    // Algorithm 6 from a WOTS_HASH address with all fields zero; the
    // expected bytes come from the reference slh-dsa-py implementation.
    #[test]
    fn sign_shake_128f_kat() {
        let prm = &SLH_DSA_SHAKE_128F;
        let mut ctx = test_ctx::<ShakeHash>(prm, &[1; 16], &[2; 16]);
        let msg = [3u8; 16];
        let mut sig = [0u8; LEN_MAX * N_MAX];
        wots_sign(&mut ctx, &mut sig[..35 * 16], &msg);

        let expected = hex!(
            "f7bcb9575590faae2e6a8ae33149082d2ec777cff4051f43177ef44bcbd2c18d
            a94146c50037c914461dd6ed720192b059bd2be6ed8d8cf26e4e9d68fbf9ded1
            6c334bed21677c6a3679f17a8425de40431b4317326c5d825d931b4a54a1b81f
            e7ad259086ea665109a7eca79f03e3619d99af5d0419fece8300973f29467f28
            d2b18639eeaa826488f6c785d492703463e80f8b088e64de9ca3b373cead611f
            d356bf6c22f70f98f229174a9ac815342f0439eb289a78f49f47aa8c3f272a15
            f5f0f5020b5d71981254daa9e1f01a90248935c1c67ad1cf71d9224184820cf9
            ece9b737ec986c86ba0a9431ff8485c274140bebc9d856316d49128eb075f81a
            c00d32b9f949940f2dd684a2e615e16b47093eb49e3bc9d77e69c7944d7063c6
            f8b4b5aa46fe759999fa2892ce4c7881b80f38d684427a0b77f3ad43377833d2
            d94c600b340ea408a0ad7c32c409bdb4ebaade3b1dda4ac8584acba979c845a9
            b0ddfc69ea22ffb415745b779b45d7af00ca9fde87e5d59385d7b5cedec6e30f
            3346f573f59a00af993a2ec314ed951e3a8c00f69364a82fa34d14933fe3cdb7
            bd5e5d511297695bad5cda22daea8d39f61d4ed34412acd1f5399a54953ae04b
            09828f90877ad7f01605631ace0a4e7c773cc887e2d0fa0bd3d6db811794df3a
            a8721c308482ccb511c9133311653ce8f9c2336e2980c2ab554c41bad436c0c7
            1c394d3f7eafcea2806c153113d6291a912c0e73e44197763b9ead341c298585
            bc6e16d8458fc1917ff4ac57de461ee1"
        );
        assert_eq!(&sig[..35 * 16], &expected[..]);
    }

    /// Generate a WOTS+ public key the way an XMSS leaf does: every chain
    /// advanced to the top (s = w - 1), then T_l.
    fn wots_pk_gen<H: HashSuite>(ctx: &mut SlhContext<H>, pk: &mut [u8]) {
        let n = ctx.prm.n;
        let len = ctx.prm.wots_len();
        let mut tmp = [0u8; LEN_MAX * N_MAX];
        for i in 0..len {
            ctx.adrs.set_chain(i as u32);
            ctx.wots_chain(&mut tmp[i * n..(i + 1) * n], W - 1);
        }
        ctx.adrs.set_kind_and_clear_keep_keypair(AdrsKind::WotsPk);
        ctx.t_l(&tmp[..len * n], pk);
    }

    // Q3: wots_pk_from_sig(wots_sign(M), M) equals the generated public key.
    fn sign_then_recover<H: HashSuite>(prm: &'static SlhParams) {
        let mut rng = rand::thread_rng();
        let n = prm.n;
        let len = prm.wots_len();
        let mut sk_seed = [0u8; N_MAX];
        let mut pk_seed = [0u8; N_MAX];
        let mut msg = [0u8; N_MAX];
        rng.fill_bytes(&mut sk_seed[..n]);
        rng.fill_bytes(&mut pk_seed[..n]);
        rng.fill_bytes(&mut msg[..n]);

        let mut ctx = test_ctx::<H>(prm, &sk_seed[..n], &pk_seed[..n]);
        let mut sig = [0u8; LEN_MAX * N_MAX];
        wots_sign(&mut ctx, &mut sig[..len * n], &msg[..n]);
        let mut pk_sig = [0u8; N_MAX];
        wots_pk_from_sig(&mut ctx, &mut pk_sig[..n], &sig[..len * n], &msg[..n]);

        let mut ctx = test_ctx::<H>(prm, &sk_seed[..n], &pk_seed[..n]);
        let mut pk_gen = [0u8; N_MAX];
        wots_pk_gen(&mut ctx, &mut pk_gen[..n]);

        assert_eq!(pk_sig, pk_gen);
    }

    #[test]
    fn sign_then_recover_all_sets() {
        for prm in ALL {
            match prm.family {
                crate::params::HashFamily::Shake => sign_then_recover::<ShakeHash>(prm),
                crate::params::HashFamily::Sha2 => {
                    sign_then_recover::<crate::hashes::Sha2Hash>(prm);
                }
            }
        }
    }

    // The key generated by the leaf construction, pinned to the reference
    // implementation.
    #[test]
    fn pk_gen_shake_128f_kat() {
        let prm = &SLH_DSA_SHAKE_128F;
        let mut ctx = test_ctx::<ShakeHash>(prm, &[1; 16], &[2; 16]);
        let mut pk = [0u8; 16];
        wots_pk_gen(&mut ctx, &mut pk);
        assert_eq!(pk, hex!("98b63dd1574484876b1f8a1120421eac"));
    }

    #[test]
    fn recover_fails_on_modified_message() {
        let prm = &SLH_DSA_SHAKE_128F;
        let mut ctx = test_ctx::<ShakeHash>(prm, &[1; 16], &[2; 16]);
        let msg = [3u8; 16];
        let mut sig = [0u8; LEN_MAX * N_MAX];
        wots_sign(&mut ctx, &mut sig[..35 * 16], &msg);

        let mut wrong = msg;
        wrong[0] ^= 0xff;
        let mut pk_a = [0u8; 16];
        let mut pk_b = [0u8; 16];
        let mut ctx = test_ctx::<ShakeHash>(prm, &[1; 16], &[2; 16]);
        wots_pk_from_sig(&mut ctx, &mut pk_a, &sig[..35 * 16], &msg);
        let mut ctx = test_ctx::<ShakeHash>(prm, &[1; 16], &[2; 16]);
        wots_pk_from_sig(&mut ctx, &mut pk_b, &sig[..35 * 16], &wrong);
        assert_ne!(pk_a, pk_b);
    }

    #[test]
    fn checksum_digits() {
        let prm = &SLH_DSA_SHAKE_128F;
        // all-zero message: every digit 0, csum = 32 * 15 = 480, shifted
        // left by 4 = 7680 = 0x1E00 -> digits 1, 14, 0
        let mut vm = [0u32; LEN_MAX];
        wots_msg_digits(prm, &[0u8; 16], &mut vm);
        assert!(vm[..32].iter().all(|&v| v == 0));
        assert_eq!(&vm[32..35], &[1, 14, 0]);

        // all-ones message: every digit 15, csum = 0
        wots_msg_digits(prm, &[0xFFu8; 16], &mut vm);
        assert!(vm[..32].iter().all(|&v| v == 15));
        assert_eq!(&vm[32..35], &[0, 0, 0]);
    }
}
