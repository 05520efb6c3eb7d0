#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![allow(clippy::needless_range_loop)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Usage
//!
//! A SIKE key pair lives on the B side of the exchange; encapsulation
//! derives an ephemeral A-side key internally:
//!
//! ```
//! use rand_core::OsRng;
//! use sike503::{kem, KeyVariant, PrivateKey};
//!
//! let sk = PrivateKey::generate(KeyVariant::Sike, &mut OsRng)?;
//! let pk = sk.public_key();
//!
//! let (ciphertext, secret) = kem::encapsulate(&mut OsRng, &pk)?;
//! let recovered = kem::decapsulate(&sk, &pk, &ciphertext)?;
//! assert_eq!(secret, recovered);
//! # Ok::<(), sike503::Error>(())
//! ```
//!
//! The raw SIDH exchange is exposed through [`derive_secret`]; both sides
//! of an honest exchange compute the same j-invariant:
//!
//! ```
//! use rand_core::OsRng;
//! use sike503::{derive_secret, KeyVariant, PrivateKey};
//!
//! let alice = PrivateKey::generate(KeyVariant::SidhA, &mut OsRng)?;
//! let bob = PrivateKey::generate(KeyVariant::SidhB, &mut OsRng)?;
//! assert_eq!(
//!     derive_secret(&alice, &bob.public_key())?,
//!     derive_secret(&bob, &alice.public_key())?,
//! );
//! # Ok::<(), sike503::Error>(())
//! ```

#[cfg(test)]
extern crate std;

mod arithmetic;
mod curve;
mod error;
mod isogeny;
pub mod kem;
mod params;
mod sidh;

pub use error::Error;
pub use params::{
    CIPHERTEXT_SIZE, FP_BYTES, KEM_SHARED_SIZE, MSG_SIZE, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE,
    SHARED_SECRET_SIZE, SIKE_SECRET_KEY_SIZE,
};
pub use sidh::{derive_secret, KeyVariant, PrivateKey, PublicKey};
