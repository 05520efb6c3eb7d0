//! Arithmetic modulo `p = 2^250·3^159 - 1`.
//!
//! Elements are eight little-endian 64-bit limbs in Montgomery form
//! (`x·R mod p` with `R = 2^512`) and are kept lazily reduced in `[0, 2p)`;
//! only the serialization boundary reduces all the way into `[0, p)`.
//! Every operation runs in constant time.

use core::fmt::{self, Debug};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::arithmetic::util::{addc, mul64, subc};
use crate::params::{FP_BYTES, MONT_R2, MUL_STRATEGY, P503, P503P1, P503X2, POW_STRATEGY};

/// Number of 64-bit limbs in a field element.
pub(crate) const NUM_WORDS: usize = 8;

/// Number of zero least-significant limbs in `p + 1`; the Montgomery
/// reduction skips the corresponding partial products.
const ZERO_WORDS: usize = 3;

/// A GF(p) element in Montgomery form, lazily reduced in `[0, 2p)`.
#[derive(Clone, Copy, Default)]
pub(crate) struct Fp(pub(crate) [u64; NUM_WORDS]);

/// An unreduced double-width product, consumed by the Montgomery reduction.
#[derive(Clone, Copy)]
pub(crate) struct FpX2(pub(crate) [u64; 2 * NUM_WORDS]);

impl Fp {
    pub const ZERO: Fp = Fp([0; NUM_WORDS]);

    /// `self + rhs mod 2p`.
    pub fn add(&self, rhs: &Fp) -> Fp {
        let mut z = [0u64; NUM_WORDS];
        let mut carry = 0;
        for i in 0..NUM_WORDS {
            let (s, c) = addc(self.0[i], rhs.0[i], carry);
            z[i] = s;
            carry = c;
        }
        // Subtract 2p, then add it back under the borrow mask.
        let mut borrow = 0;
        for i in 0..NUM_WORDS {
            let (d, b) = subc(z[i], P503X2.0[i], borrow);
            z[i] = d;
            borrow = b;
        }
        let mask = borrow.wrapping_neg();
        let mut carry = 0;
        for i in 0..NUM_WORDS {
            let (s, c) = addc(z[i], P503X2.0[i] & mask, carry);
            z[i] = s;
            carry = c;
        }
        Fp(z)
    }

    /// `self - rhs mod 2p`.
    pub fn sub(&self, rhs: &Fp) -> Fp {
        let mut z = [0u64; NUM_WORDS];
        let mut borrow = 0;
        for i in 0..NUM_WORDS {
            let (d, b) = subc(self.0[i], rhs.0[i], borrow);
            z[i] = d;
            borrow = b;
        }
        let mask = borrow.wrapping_neg();
        let mut carry = 0;
        for i in 0..NUM_WORDS {
            let (s, c) = addc(z[i], P503X2.0[i] & mask, carry);
            z[i] = s;
            carry = c;
        }
        Fp(z)
    }

    /// Reduces from `[0, 2p)` into `[0, p)` by a conditional subtraction.
    pub fn strong_reduce(&self) -> Fp {
        let mut z = self.0;
        let mut borrow = 0;
        for i in 0..NUM_WORDS {
            let (d, b) = subc(z[i], P503.0[i], borrow);
            z[i] = d;
            borrow = b;
        }
        let mask = borrow.wrapping_neg();
        let mut carry = 0;
        for i in 0..NUM_WORDS {
            let (s, c) = addc(z[i], P503.0[i] & mask, carry);
            z[i] = s;
            carry = c;
        }
        Fp(z)
    }

    /// Schoolbook product-scanning multiply, no reduction. The running
    /// column sum is carried in the three words `(t, u, v)`.
    pub fn mul_wide(&self, rhs: &Fp) -> FpX2 {
        let x = &self.0;
        let y = &rhs.0;
        let mut z = [0u64; 2 * NUM_WORDS];
        let (mut t, mut u, mut v) = (0u64, 0u64, 0u64);

        for i in 0..NUM_WORDS {
            for j in 0..=i {
                let (hi, lo) = mul64(x[j], y[i - j]);
                let (s, carry) = addc(lo, v, 0);
                v = s;
                let (s, carry) = addc(hi, u, carry);
                u = s;
                t += carry;
            }
            z[i] = v;
            v = u;
            u = t;
            t = 0;
        }
        for i in NUM_WORDS..(2 * NUM_WORDS - 1) {
            for j in (i - NUM_WORDS + 1)..NUM_WORDS {
                let (hi, lo) = mul64(x[j], y[i - j]);
                let (s, carry) = addc(lo, v, 0);
                v = s;
                let (s, carry) = addc(hi, u, carry);
                u = s;
                t += carry;
            }
            z[i] = v;
            v = u;
            u = t;
            t = 0;
        }
        z[2 * NUM_WORDS - 1] = v;
        FpX2(z)
    }

    /// Montgomery product `self·rhs·R⁻¹ mod p`, in `[0, 2p)`.
    pub fn mul(&self, rhs: &Fp) -> Fp {
        self.mul_wide(rhs).reduce()
    }

    /// `self^((p-3)/4)` by the fixed 5-bit-window addition chain.
    ///
    /// For a quadratic residue `x` this is `1/√x`: the chain is a constant
    /// schedule of `Σ POW_STRATEGY` squarings and 91 window multiplications
    /// over the odd powers `x^1, x^3, …, x^31`.
    pub fn p34(&self) -> Fp {
        let x2 = self.mul(self);
        let mut tab = [*self; 16];
        for i in 1..16 {
            tab[i] = tab[i - 1].mul(&x2);
        }
        let mut r = tab[0];
        for (pow, idx) in POW_STRATEGY.iter().zip(MUL_STRATEGY.iter()) {
            for _ in 0..*pow {
                r = r.mul(&r);
            }
            r = r.mul(&tab[*idx as usize]);
        }
        r
    }

    /// Parses a little-endian standard-form element and converts it to
    /// Montgomery form.
    pub fn from_bytes(bytes: &[u8; FP_BYTES]) -> Fp {
        let mut limbs = [0u64; NUM_WORDS];
        for (i, b) in bytes.iter().enumerate() {
            limbs[i / 8] |= u64::from(*b) << (8 * (i % 8));
        }
        Fp(limbs).mul(&MONT_R2)
    }

    /// Leaves Montgomery form and serializes little-endian.
    pub fn to_bytes(self) -> [u8; FP_BYTES] {
        let mut wide = FpX2([0u64; 2 * NUM_WORDS]);
        wide.0[..NUM_WORDS].copy_from_slice(&self.0);
        let norm = wide.reduce().strong_reduce();
        let mut bytes = [0u8; FP_BYTES];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (norm.0[i / 8] >> (8 * (i % 8))) as u8;
        }
        bytes
    }
}

impl FpX2 {
    /// Plain multiprecision addition; the caller keeps the sum below `p·R`.
    pub fn add(&self, rhs: &FpX2) -> FpX2 {
        let mut z = [0u64; 2 * NUM_WORDS];
        let mut carry = 0;
        for i in 0..(2 * NUM_WORDS) {
            let (s, c) = addc(self.0[i], rhs.0[i], carry);
            z[i] = s;
            carry = c;
        }
        FpX2(z)
    }

    /// `self - rhs`, adding `p·R` back under the borrow mask so the result
    /// stays a valid reduction input.
    pub fn sub(&self, rhs: &FpX2) -> FpX2 {
        let mut z = [0u64; 2 * NUM_WORDS];
        let mut borrow = 0;
        for i in 0..(2 * NUM_WORDS) {
            let (d, b) = subc(self.0[i], rhs.0[i], borrow);
            z[i] = d;
            borrow = b;
        }
        let mask = borrow.wrapping_neg();
        let mut carry = 0;
        for i in NUM_WORDS..(2 * NUM_WORDS) {
            let (s, c) = addc(z[i], P503.0[i - NUM_WORDS] & mask, carry);
            z[i] = s;
            carry = c;
        }
        FpX2(z)
    }

    /// Montgomery reduction into `[0, 2p)`.
    ///
    /// `p ≡ -1 (mod 2^64)`, so the per-limb quotient is the limb itself and
    /// the update adds `q·(p+1)` shifted into place; the three zero limbs of
    /// `p + 1` never contribute a partial product.
    pub fn reduce(&self) -> Fp {
        let x = &self.0;
        let mut z = [0u64; NUM_WORDS];
        let (mut t, mut u, mut v) = (0u64, 0u64, 0u64);
        let mut count = ZERO_WORDS;

        for i in 0..NUM_WORDS {
            for j in 0..i {
                if j < (i + 1).saturating_sub(ZERO_WORDS) {
                    let (hi, lo) = mul64(z[j], P503P1.0[i - j]);
                    let (s, carry) = addc(lo, v, 0);
                    v = s;
                    let (s, carry) = addc(hi, u, carry);
                    u = s;
                    t += carry;
                }
            }
            let (s, carry) = addc(v, x[i], 0);
            v = s;
            let (s, carry) = addc(u, 0, carry);
            u = s;
            t += carry;

            z[i] = v;
            v = u;
            u = t;
            t = 0;
        }
        for i in NUM_WORDS..(2 * NUM_WORDS - 1) {
            if count > 0 {
                count -= 1;
            }
            for j in (i - NUM_WORDS + 1)..NUM_WORDS {
                if j < NUM_WORDS - count {
                    let (hi, lo) = mul64(z[j], P503P1.0[i - j]);
                    let (s, carry) = addc(lo, v, 0);
                    v = s;
                    let (s, carry) = addc(hi, u, carry);
                    u = s;
                    t += carry;
                }
            }
            let (s, carry) = addc(v, x[i], 0);
            v = s;
            let (s, carry) = addc(u, 0, carry);
            u = s;
            t += carry;

            z[i - NUM_WORDS] = v;
            v = u;
            u = t;
            t = 0;
        }
        let (s, _) = addc(v, x[2 * NUM_WORDS - 1], 0);
        z[NUM_WORDS - 1] = s;
        Fp(z)
    }
}

impl ConditionallySelectable for Fp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [0u64; NUM_WORDS];
        for i in 0..NUM_WORDS {
            limbs[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Fp(limbs)
    }
}

impl ConstantTimeEq for Fp {
    /// Equality as field elements: both sides are strongly reduced before
    /// the limbwise comparison.
    fn ct_eq(&self, other: &Self) -> Choice {
        self.strong_reduce().0[..].ct_eq(&other.strong_reduce().0[..])
    }
}

impl Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({:016x?})", &self.0[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MONT_ONE;
    use num_bigint::BigUint;
    use proptest::prelude::*;
    use std::vec::Vec;

    fn p_big() -> BigUint {
        BigUint::from_bytes_le(&P503.to_bytes_raw())
    }

    impl Fp {
        /// Limbs as little-endian bytes, without any Montgomery conversion.
        fn to_bytes_raw(self) -> Vec<u8> {
            self.0.iter().flat_map(|l| l.to_le_bytes()).collect()
        }
    }

    fn big_to_wire(x: &BigUint) -> [u8; FP_BYTES] {
        let mut bytes = [0u8; FP_BYTES];
        let le = x.to_bytes_le();
        bytes[..le.len()].copy_from_slice(&le);
        bytes
    }

    fn wire_to_big(bytes: &[u8; FP_BYTES]) -> BigUint {
        BigUint::from_bytes_le(bytes)
    }

    prop_compose! {
        /// A field element in `[0, p)`, as wire bytes.
        fn field_element()(bytes in any::<[u8; FP_BYTES]>()) -> [u8; FP_BYTES] {
            big_to_wire(&(wire_to_big(&bytes) % p_big()))
        }
    }

    proptest! {
        #[test]
        fn add_then_sub_roundtrips(x in field_element(), y in field_element()) {
            let a = Fp::from_bytes(&x);
            let b = Fp::from_bytes(&y);
            let back = a.add(&b).sub(&b);
            prop_assert!(bool::from(back.ct_eq(&a)));
            prop_assert_eq!(back.to_bytes(), x);
        }

        #[test]
        fn mul_matches_bigint(x in field_element(), y in field_element()) {
            let got = Fp::from_bytes(&x).mul(&Fp::from_bytes(&y)).to_bytes();
            let want = big_to_wire(&(wire_to_big(&x) * wire_to_big(&y) % p_big()));
            prop_assert_eq!(got, want);
        }

        #[test]
        fn one_is_neutral(x in field_element()) {
            let a = Fp::from_bytes(&x);
            prop_assert_eq!(a.mul(&MONT_ONE).to_bytes(), x);
        }

        #[test]
        fn montgomery_roundtrip(x in field_element()) {
            prop_assert_eq!(Fp::from_bytes(&x).to_bytes(), x);
        }

        #[test]
        fn p34_inverts_square_roots(x in field_element()) {
            // x² is always a quadratic residue; p34(x²)²·x² = 1.
            let sq = {
                let a = Fp::from_bytes(&x);
                a.mul(&a)
            };
            prop_assume!(!bool::from(sq.ct_eq(&Fp::ZERO)));
            let r = sq.p34();
            let check = r.mul(&r).mul(&sq);
            prop_assert!(bool::from(check.ct_eq(&MONT_ONE)));
        }
    }

    #[test]
    fn strong_reduce_is_canonical() {
        // 2p - 1 is the largest lazy-domain value; it must reduce to p - 1.
        let mut top = P503X2;
        top.0[0] -= 1;
        let want = {
            let mut w = P503;
            w.0[0] -= 1;
            w
        };
        assert_eq!(top.strong_reduce().to_bytes_raw(), want.to_bytes_raw());
    }
}
