//! Multiprecision field arithmetic: GF(p) and its quadratic extension.

mod fp;
mod fp2;
mod util;

pub(crate) use fp::Fp;
pub(crate) use fp2::{batch3_inv, Fp2};
