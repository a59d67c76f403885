//! Hash address (ADRS) handling
//!
//! From FIPS-205 section 4.2:
//! > An ADRS consists of public values that indicate the position of the
//! > value being computed by the function. A different ADRS value is used
//! > for each call to each function.
//!
//! A single mutable 32-byte record is threaded through every operation; the
//! typed transitions below change the address type while clearing exactly the
//! fields FIPS-205 requires. All multi-byte fields are big-endian, which the
//! `zerocopy` byte-order types serialize transparently.

use zerocopy::byteorder::big_endian::{U32, U64};
use zerocopy::AsBytes;

/// ADRS type codes from FIPS-205 section 4.2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub(crate) enum AdrsKind {
    WotsHash = 0,
    WotsPk = 1,
    Tree = 2,
    ForsTree = 3,
    ForsRoots = 4,
    WotsPrf = 5,
    ForsPrf = 6,
}

/// The 32-byte hash address.
///
/// Layout: layer (4) | tree (12, only the low 8 bytes are ever set) |
/// type (4) | three type-dependent 4-byte words. The first of the three
/// words holds the key-pair address (or padding for `Tree`), the second the
/// chain address or tree height, the third the hash address or tree index.
#[derive(Clone, AsBytes)]
#[repr(C)]
pub(crate) struct Adrs {
    layer: U32,
    tree_high: U32,
    tree_low: U64,
    kind: U32,
    word_kp: U32,
    word_a: U32,
    word_b: U32,
}

impl Default for Adrs {
    fn default() -> Self {
        Adrs {
            layer: 0.into(),
            tree_high: 0.into(),
            tree_low: 0.into(),
            kind: 0.into(),
            word_kp: 0.into(),
            word_a: 0.into(),
            word_b: 0.into(),
        }
    }
}

impl AsRef<[u8]> for Adrs {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Adrs {
    pub fn set_layer(&mut self, layer: u32) {
        self.layer.set(layer);
    }

    pub fn set_tree(&mut self, tree: u64) {
        self.tree_low.set(tree);
    }

    /// Change the type without touching any other field. Only the fused
    /// PRF+chain and PRF+F operations use this; everything else goes through
    /// the clearing transitions.
    pub fn set_kind(&mut self, kind: AdrsKind) {
        self.kind.set(kind as u32);
    }

    /// Switch type and zero all three trailing words.
    pub fn set_kind_and_clear(&mut self, kind: AdrsKind) {
        self.kind.set(kind as u32);
        self.word_kp.set(0);
        self.word_a.set(0);
        self.word_b.set(0);
    }

    /// Switch type, zero the last two words but keep the key-pair address.
    /// Required when moving WOTS_HASH -> WOTS_PK and FORS_TREE -> FORS_ROOTS.
    pub fn set_kind_and_clear_keep_keypair(&mut self, kind: AdrsKind) {
        self.kind.set(kind as u32);
        self.word_a.set(0);
        self.word_b.set(0);
    }

    pub fn set_key_pair(&mut self, idx: u32) {
        self.word_kp.set(idx);
    }

    pub fn set_chain(&mut self, chain: u32) {
        self.word_a.set(chain);
    }

    pub fn set_hash(&mut self, hash: u32) {
        self.word_b.set(hash);
    }

    pub fn set_tree_height(&mut self, height: u32) {
        self.word_a.set(height);
    }

    pub fn set_tree_index(&mut self, index: u32) {
        self.word_b.set(index);
    }

    /// Compressed 22-byte form used by the SHA2 instantiations:
    /// ADRSc = ADRS[3] || ADRS[8..16] || ADRS[19] || ADRS[20..32].
    pub fn compressed(&self) -> [u8; 22] {
        let bytes = self.as_bytes();
        let mut c = [0u8; 22];
        c[0] = bytes[3];
        c[1..9].copy_from_slice(&bytes[8..16]);
        c[9] = bytes[19];
        c[10..22].copy_from_slice(&bytes[20..32]);
        c
    }
}

#[cfg(test)]
impl Adrs {
    pub fn layer(&self) -> u32 {
        self.layer.get()
    }

    pub fn tree(&self) -> u64 {
        self.tree_low.get()
    }

    pub fn kind_raw(&self) -> u32 {
        self.kind.get()
    }

    pub fn key_pair(&self) -> u32 {
        self.word_kp.get()
    }

    pub fn word_a(&self) -> u32 {
        self.word_a.get()
    }

    pub fn word_b(&self) -> u32 {
        self.word_b.get()
    }
}
