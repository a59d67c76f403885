//! FORS few-time signatures (FIPS-205 section 8)
//!
//! A FORS key is a forest of k Merkle trees of height a; the randomized
//! message digest selects one leaf per tree. The caller has placed the
//! hypertree address (tree, key pair) in the context and set the type to
//! FORS_TREE before any of these functions run.

use crate::address::AdrsKind;
use crate::context::SlhContext;
use crate::hashes::HashSuite;
use crate::params::{A_MAX, K_MAX, N_MAX};
use crate::util::base_2b;

/// Algorithm 14: root of the height-`z` subtree of the forest whose leftmost
/// leaf has index `i * 2^z`. Same iterative walk as `xmss_node`, with the
/// fused PRF+F producing the leaves.
pub(crate) fn fors_node<H: HashSuite>(ctx: &mut SlhContext<H>, node: &mut [u8], i: u32, z: u32) {
    let n = ctx.prm.n;
    debug_assert!(z as usize <= ctx.prm.a);

    let mut stack = [[0u8; N_MAX]; A_MAX + 1];
    let mut depth = 0usize;

    let mut idx = i << z;
    for j in 0..(1u32 << z) {
        ctx.adrs.set_tree_index(idx);
        ctx.fors_hash(&mut stack[depth][..n], 1);
        depth += 1;

        let mut k = 0u32;
        while (j >> k) & 1 == 1 {
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

/// Algorithm 15: for each of the k trees, the selected secret value followed
/// by its a-node authentication path.
pub(crate) fn fors_sign<H: HashSuite>(ctx: &mut SlhContext<H>, sig: &mut [u8], md: &[u8]) {
    let prm = ctx.prm;
    let n = prm.n;
    let a = prm.a;
    let mut indices = [0u32; K_MAX];
    base_2b(&mut indices[..prm.k], md, a);

    let mut off = 0usize;
    for i in 0..prm.k {
        let tree_base = (i as u32) << a;
        ctx.adrs.set_tree_index(tree_base + indices[i]);
        ctx.fors_hash(&mut sig[off..off + n], 0);
        off += n;

        for j in 0..a {
            let sibling = (indices[i] >> j) ^ 1;
            let node_i = ((i as u32) << (a - j)) + sibling;
            fors_node(ctx, &mut sig[off..off + n], node_i, j as u32);
            off += n;
        }
    }
}

/// Algorithm 16: rebuild each tree root from the signature, then compress
/// the k roots with T_l under a FORS_ROOTS address.
pub(crate) fn fors_pk_from_sig<H: HashSuite>(
    ctx: &mut SlhContext<H>,
    pk: &mut [u8],
    sig: &[u8],
    md: &[u8],
) {
    let prm = ctx.prm;
    let n = prm.n;
    let a = prm.a;
    let mut indices = [0u32; K_MAX];
    base_2b(&mut indices[..prm.k], md, a);

    let mut roots = [0u8; K_MAX * N_MAX];
    let mut off = 0usize;
    for i in 0..prm.k {
        let mut idx = ((i as u32) << a) + indices[i];
        ctx.adrs.set_tree_height(0);
        ctx.adrs.set_tree_index(idx);

        let node = &mut roots[i * n..(i + 1) * n];
        ctx.f(&sig[off..off + n], node);
        off += n;

        let mut buf = [0u8; N_MAX];
        for j in 0..a {
            idx >>= 1;
            ctx.adrs.set_tree_height(j as u32 + 1);
            ctx.adrs.set_tree_index(idx);
            buf[..n].copy_from_slice(node);
            let sibling = &sig[off..off + n];
            if (indices[i] >> j) & 1 == 0 {
                ctx.h(&buf[..n], sibling, node);
            } else {
                ctx.h(sibling, &buf[..n], node);
            }
            off += n;
        }
    }

    ctx.adrs.set_kind_and_clear_keep_keypair(AdrsKind::ForsRoots);
    ctx.t_l(&roots[..prm.k * n], pk);
}
