//! Small-degree isogeny computation and evaluation.
//!
//! Both families expose the same shape: `generate_curve` consumes a kernel
//! point of order 3 or 4 and produces the codomain in the family's
//! equivalent coefficient form, stashing the per-kernel constants that
//! `evaluate_point` then uses to push arbitrary points through the map.
//! `generate_curve` must run before any `evaluate_point`.

use crate::arithmetic::Fp2;
use crate::curve::{CurveCoefficientsEquiv, ProjectivePoint};

/// A 4-isogeny, `evaluate_point` mapping through the kernel set by the last
/// `generate_curve`.
pub(crate) struct Isogeny4 {
    k1: Fp2,
    k2: Fp2,
    k3: Fp2,
}

impl Isogeny4 {
    pub fn new() -> Self {
        Isogeny4 {
            k1: Fp2::ZERO,
            k2: Fp2::ZERO,
            k3: Fp2::ZERO,
        }
    }

    /// Codomain of the 4-isogeny with kernel `<k>`, `k` of order 4, as
    /// `(A+2C : 4C)`.
    pub fn generate_curve(&mut self, k: &ProjectivePoint) -> CurveCoefficientsEquiv {
        self.k2 = k.x.sub(&k.z);
        self.k3 = k.x.add(&k.z);
        self.k1 = k.z.square();
        self.k1 = self.k1.add(&self.k1);
        let c = self.k1.square();
        self.k1 = self.k1.add(&self.k1);
        let mut a = k.x.square();
        a = a.add(&a);
        a = a.square();
        CurveCoefficientsEquiv { a, c }
    }

    pub fn evaluate_point(&self, p: &ProjectivePoint) -> ProjectivePoint {
        let mut t0 = &p.x + &p.z;
        let t1 = &p.x - &p.z;
        let mut x = &t0 * &self.k2;
        let mut z = &t1 * &self.k3;
        t0 = t0.mul(&t1);
        t0 = t0.mul(&self.k1);
        let mut t1 = &x + &z;
        z = x.sub(&z);
        t1 = t1.square();
        z = z.square();
        x = t0.add(&t1);
        t0 = z.sub(&t0);
        ProjectivePoint {
            x: x.mul(&t1),
            z: z.mul(&t0),
        }
    }
}

/// A 3-isogeny, same calling convention as [`Isogeny4`].
pub(crate) struct Isogeny3 {
    k1: Fp2,
    k2: Fp2,
}

impl Isogeny3 {
    pub fn new() -> Self {
        Isogeny3 {
            k1: Fp2::ZERO,
            k2: Fp2::ZERO,
        }
    }

    /// Codomain of the 3-isogeny with kernel `<k>`, `k` of order 3, as
    /// `(A+2C : A-2C)`.
    pub fn generate_curve(&mut self, k: &ProjectivePoint) -> CurveCoefficientsEquiv {
        self.k1 = k.x.sub(&k.z);
        let t0 = self.k1.square();
        self.k2 = k.x.add(&k.z);
        let t1 = self.k2.square();
        let mut t2 = t0.add(&t1);
        let mut t3 = &self.k1 + &self.k2;
        t3 = t3.square();
        t3 = t3.sub(&t2);
        t2 = t1.add(&t3);
        t3 = t3.add(&t0);
        let mut t4 = t3.add(&t0);
        t4 = t4.add(&t4);
        t4 = t1.add(&t4);
        let c = t2.mul(&t4);
        let mut t4 = t1.add(&t2);
        t4 = t4.add(&t4);
        t4 = t0.add(&t4);
        let a = t3.mul(&t4);
        CurveCoefficientsEquiv { a, c }
    }

    pub fn evaluate_point(&self, p: &ProjectivePoint) -> ProjectivePoint {
        let mut t0 = &p.x + &p.z;
        let mut t1 = &p.x - &p.z;
        t0 = self.k1.mul(&t0);
        t1 = self.k2.mul(&t1);
        let mut t2 = &t0 + &t1;
        t0 = t1.sub(&t0);
        t2 = t2.square();
        t0 = t0.square();
        ProjectivePoint {
            x: p.x.mul(&t2),
            z: p.z.mul(&t0),
        }
    }
}
