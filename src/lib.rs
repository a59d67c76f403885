#![cfg_attr(not(feature = "alloc"), no_std)]
#![doc = include_str!("../README.md")]
#![warn(clippy::pedantic)]
#![allow(clippy::similar_names)] // sk/pk, i_tree/i_leaf and friends are the domain vocabulary
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)] // loop counters are bounded far below u32::MAX
#![deny(missing_docs)]

//! # Crate layout
//!
//! The scheme is built bottom-up: a 32-byte hash address threads through
//! every call, the hash suites implement the FIPS-205 section 10 function
//! bundles per family, and the WOTS+/XMSS/hypertree/FORS layers are generic
//! over the suite. The byte-oriented entry points ([`slh_keygen`],
//! [`slh_sign`], [`slh_sign_internal`], [`slh_verify`]) dispatch on the
//! parameter set's hash family exactly once per call.

#[cfg(feature = "alloc")]
extern crate alloc;

pub use signature;

mod address;
mod context;
mod fors;
mod hashes;
mod hypertree;
mod params;
#[cfg(feature = "alloc")]
mod signature_encoding;
#[cfg(feature = "alloc")]
mod signing_key;
mod slh;
mod util;
#[cfg(feature = "alloc")]
mod verifying_key;
mod wots;
mod xmss;

pub use params::{
    HashFamily, SlhParams, ALL, SLH_DSA_SHA2_128F, SLH_DSA_SHA2_128S, SLH_DSA_SHA2_192F,
    SLH_DSA_SHA2_192S, SLH_DSA_SHA2_256F, SLH_DSA_SHA2_256S, SLH_DSA_SHAKE_128F,
    SLH_DSA_SHAKE_128S, SLH_DSA_SHAKE_192F, SLH_DSA_SHAKE_192S, SLH_DSA_SHAKE_256F,
    SLH_DSA_SHAKE_256S,
};
#[cfg(feature = "alloc")]
pub use signature_encoding::Signature;
#[cfg(feature = "alloc")]
pub use signing_key::SigningKey;
pub use slh::{slh_keygen, slh_sign, slh_sign_internal, slh_verify};
#[cfg(feature = "alloc")]
pub use verifying_key::VerifyingKey;


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_macros::test_parameter_sets;
    use rand::Rng;
    use signature::{Signer, Verifier};

    fn sign_verify(prm: &'static SlhParams) {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, prm);
        let vk = sk.verifying_key();
        let msg = b"Hello, world!";
        let sig = sk.try_sign(msg).unwrap();
        vk.verify(msg, &sig).unwrap();
    }
    test_parameter_sets!(sign_verify);

    fn key_and_sig_lengths(prm: &'static SlhParams) {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, prm);
        let sk_bytes = sk.to_vec();
        let pk_bytes = sk.verifying_key().to_vec();
        assert_eq!(sk_bytes.len(), prm.sk_size());
        assert_eq!(pk_bytes.len(), prm.pk_size());
        let sig = sk.try_sign(b"x").unwrap();
        assert_eq!(sig.as_bytes().len(), prm.sig_size());

        // PK.seed and PK.root appear where the concatenation order says
        let n = prm.pk_size() / 2;
        assert_eq!(&sk_bytes[2 * n..3 * n], &pk_bytes[..n]);
        assert_eq!(&sk_bytes[3 * n..4 * n], &pk_bytes[n..2 * n]);
    }
    test_parameter_sets!(key_and_sig_lengths);

    #[test]
    fn deterministic_signatures_repeat() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, &SLH_DSA_SHAKE_128F);
        let msg = b"same every time";
        assert_eq!(sk.try_sign(msg).unwrap(), sk.try_sign(msg).unwrap());
    }

    #[test]
    fn randomized_signatures_differ() {
        use signature::RandomizedSigner;
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, &SLH_DSA_SHAKE_128F);
        let msg = b"hedged";
        let a = sk.try_sign_with_rng(&mut rng, msg).unwrap();
        let b = sk.try_sign_with_rng(&mut rng, msg).unwrap();
        assert_ne!(a, b);
        // both verify
        let vk = sk.verifying_key();
        vk.verify(msg, &a).unwrap();
        vk.verify(msg, &b).unwrap();
    }

    #[test]
    fn verify_fails_on_modified_message() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, &SLH_DSA_SHAKE_128F);
        let sig = sk.try_sign(b"Hello, world!").unwrap();
        let vk = sk.verifying_key();
        assert!(vk.verify(b"Hello, world!", &sig).is_ok());
        assert!(vk.verify(b"Goodbye, world!", &sig).is_err());
    }

    #[test]
    fn verify_fails_on_modified_signature() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, &SLH_DSA_SHAKE_128F);
        let msg = b"Hello, world!";
        let mut sig_bytes = sk.try_sign(msg).unwrap().to_vec();

        let byte = rng.gen_range(0..sig_bytes.len());
        sig_bytes[byte] ^= 0xff;
        let sig = Signature::from_bytes(&SLH_DSA_SHAKE_128F, &sig_bytes).unwrap();
        assert!(sk.verifying_key().verify(msg, &sig).is_err());
    }

    #[test]
    fn verify_fails_with_wrong_key() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, &SLH_DSA_SHAKE_128F);
        let other = SigningKey::new(&mut rng, &SLH_DSA_SHAKE_128F);
        let msg = b"Hello, world!";
        let sig = sk.try_sign(msg).unwrap();
        assert!(sk.verifying_key().verify(msg, &sig).is_ok());
        assert!(other.verifying_key().verify(msg, &sig).is_err());
    }

    #[test]
    fn verify_rejects_foreign_parameter_set() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, &SLH_DSA_SHAKE_128S);
        let sig = sk.try_sign(b"m").unwrap();
        // same geometry, different family
        let vk_bytes = sk.verifying_key().to_vec();
        let foreign = VerifyingKey::from_bytes(&SLH_DSA_SHA2_128S, &vk_bytes).unwrap();
        assert!(foreign.verify(b"m", &sig).is_err());
    }

    fn serde_roundtrip(prm: &'static SlhParams) {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, prm);
        let sk2 = SigningKey::from_bytes(prm, &sk.to_vec()).unwrap();
        assert_eq!(sk, sk2);
        let vk = sk.verifying_key();
        let vk2 = VerifyingKey::from_bytes(prm, &vk.to_vec()).unwrap();
        assert_eq!(vk, vk2);
    }
    test_parameter_sets!(serde_roundtrip);

    #[test]
    fn deserialize_rejects_wrong_length() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::new(&mut rng, &SLH_DSA_SHAKE_128F);
        let bytes = sk.to_vec();
        assert!(SigningKey::from_bytes(&SLH_DSA_SHAKE_128F, &bytes[..bytes.len() - 1]).is_err());
        assert!(SigningKey::from_bytes(&SLH_DSA_SHAKE_192F, &bytes).is_err());
    }
}
