//! XMSS Merkle trees over WOTS+ leaves (FIPS-205 section 6)

use crate::address::AdrsKind;
use crate::context::SlhContext;
use crate::hashes::HashSuite;
use crate::params::{HP_MAX, LEN_MAX, N_MAX};
use crate::wots::{wots_pk_from_sig, wots_sign, W};

/// Algorithm 8: root of the height-`z` subtree whose leftmost leaf has index
/// `i * 2^z`.
///
/// FIPS-205 defines this recursively; here leaves are produced left to right
/// and merged eagerly, so the stack holds at most one pending node per level
/// and depth never exceeds `z + 1`.
pub(crate) fn xmss_node<H: HashSuite>(ctx: &mut SlhContext<H>, node: &mut [u8], i: u32, z: u32) {
    let n = ctx.prm.n;
    let len = ctx.prm.wots_len();
    debug_assert!(z as usize <= ctx.prm.hp);

    let mut stack = [[0u8; N_MAX]; HP_MAX + 1];
    let mut depth = 0usize;
    let mut tmp = [0u8; LEN_MAX * N_MAX];

    let mut idx = i << z;
    for j in 0..(1u32 << z) {
        // WOTS+ public key of leaf `idx` (algorithm 5)
        ctx.adrs.set_key_pair(idx);
        for c in 0..len {
            ctx.adrs.set_chain(c as u32);
            ctx.wots_chain(&mut tmp[c * n..(c + 1) * n], W - 1);
        }
        ctx.adrs.set_kind_and_clear_keep_keypair(AdrsKind::WotsPk);
        ctx.t_l(&tmp[..len * n], &mut stack[depth][..n]);
        depth += 1;

        // merge while the new node completes a sibling pair
        let mut k = 0u32;
        while (j >> k) & 1 == 1 {
            ctx.adrs.set_kind_and_clear(AdrsKind::Tree);
            ctx.adrs.set_tree_height(k + 1);
            ctx.adrs.set_tree_index(idx >> (k + 1));
            let mut parent = [0u8; N_MAX];
            ctx.h(
                &stack[depth - 2][..n],
                &stack[depth - 1][..n],
                &mut parent[..n],
            );
            stack[depth - 2] = parent;
            depth -= 1;
            k += 1;
        }
        idx += 1;
    }

    debug_assert_eq!(depth, 1);
    node.copy_from_slice(&stack[0][..n]);
}

/// Algorithm 9: WOTS+ signature over `m` under leaf `idx`, followed by the
/// hp-node authentication path.
pub(crate) fn xmss_sign<H: HashSuite>(ctx: &mut SlhContext<H>, sig: &mut [u8], m: &[u8], idx: u32) {
    let n = ctx.prm.n;
    let hp = ctx.prm.hp;
    let (wots_sig, auth) = sig.split_at_mut(ctx.prm.wots_len() * n);

    for j in 0..hp {
        let sibling = (idx >> j) ^ 1;
        xmss_node(ctx, &mut auth[j * n..(j + 1) * n], sibling, j as u32);
    }

    ctx.adrs.set_kind_and_clear_keep_keypair(AdrsKind::WotsHash);
    ctx.adrs.set_key_pair(idx);
    wots_sign(ctx, wots_sig, m);
}

/// Algorithm 10: recompute the tree root implied by an XMSS signature.
/// At each level the operand order follows bit `k` of `idx`.
pub(crate) fn xmss_pk_from_sig<H: HashSuite>(
    ctx: &mut SlhContext<H>,
    root: &mut [u8],
    idx: u32,
    sig: &[u8],
    m: &[u8],
) {
    let n = ctx.prm.n;
    let hp = ctx.prm.hp;
    let wots_sz = ctx.prm.wots_len() * n;

    ctx.adrs.set_kind_and_clear_keep_keypair(AdrsKind::WotsHash);
    ctx.adrs.set_key_pair(idx);
    wots_pk_from_sig(ctx, root, &sig[..wots_sz], m);

    ctx.adrs.set_kind_and_clear(AdrsKind::Tree);
    let auth = &sig[wots_sz..];
    let mut buf = [0u8; N_MAX];
    for k in 0..hp {
        ctx.adrs.set_tree_height(k as u32 + 1);
        ctx.adrs.set_tree_index(idx >> (k + 1));
        buf[..n].copy_from_slice(root);
        let sibling = &auth[k * n..(k + 1) * n];
        if (idx >> k) & 1 == 0 {
            ctx.h(&buf[..n], sibling, root);
        } else {
            ctx.h(sibling, &buf[..n], root);
        }
    }
}
