//! x-only Montgomery curve arithmetic.
//!
//! Points carry only `(X : Z)` with `x = X/Z`; the y-coordinate is never
//! materialized. Curves are `(A : C)` for `C·y² = x³ + A·x² + x`, rewritten
//! once per isogeny batch into the form each family consumes:
//! `(A+2C : 4C)` for doubling/4-isogenies, `(A+2C : A-2C)` for
//! tripling/3-isogenies.

use subtle::{Choice, ConditionallySelectable};

use crate::arithmetic::{Fp, Fp2};
use crate::params::MONT_SIX;

/// The x-coordinate of a point as `(X : Z)`; `Z = 0` is the point at
/// infinity.
#[derive(Clone, Copy)]
pub(crate) struct ProjectivePoint {
    pub x: Fp2,
    pub z: Fp2,
}

/// A Montgomery curve as `(A : C)`.
#[derive(Clone, Copy)]
pub(crate) struct ProjectiveCurveParameters {
    pub a: Fp2,
    pub c: Fp2,
}

/// A curve rewritten into the equivalent form one isogeny family consumes.
#[derive(Clone, Copy)]
pub(crate) struct CurveCoefficientsEquiv {
    pub a: Fp2,
    pub c: Fp2,
}

impl ProjectivePoint {
    pub fn from_affine(x: &Fp2) -> Self {
        ProjectivePoint {
            x: *x,
            z: Fp2::ONE,
        }
    }

    /// `k` successive x-only doublings; `params` must be `(A+2C : 4C)`.
    pub fn pow2k(&mut self, params: &CurveCoefficientsEquiv, k: u32) {
        for _ in 0..k {
            *self = xdbl(self, params);
        }
    }

    /// `k` successive x-only triplings; `params` must be `(A+2C : A-2C)`.
    pub fn pow3k(&mut self, params: &CurveCoefficientsEquiv, k: u32) {
        for _ in 0..k {
            *self = xtpl(self, params);
        }
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            z: Fp2::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ProjectiveCurveParameters {
    /// The starting curve `E0: y² = x³ + 6x² + x`.
    pub fn base() -> Self {
        ProjectiveCurveParameters {
            a: Fp2 {
                a: MONT_SIX,
                b: Fp::ZERO,
            },
            c: Fp2::ONE,
        }
    }

    /// Rewrites `(A : C)` as `(A+2C : 4C)`.
    pub fn equiv4(&self) -> CurveCoefficientsEquiv {
        let c2 = self.c.add(&self.c);
        CurveCoefficientsEquiv {
            a: self.a.add(&c2),
            c: c2.add(&c2),
        }
    }

    /// Rewrites `(A : C)` as `(A+2C : A-2C)`.
    pub fn equiv3(&self) -> CurveCoefficientsEquiv {
        let c2 = self.c.add(&self.c);
        CurveCoefficientsEquiv {
            a: self.a.add(&c2),
            c: self.a.sub(&c2),
        }
    }

    /// Inverts `(A+2C : 4C)` back to canonical `(A : C)`, up to scaling.
    pub fn from_equiv4(eq: &CurveCoefficientsEquiv) -> Self {
        let mut a = eq.a.add(&eq.a);
        a = a.sub(&eq.c);
        ProjectiveCurveParameters {
            a: a.add(&a),
            c: eq.c,
        }
    }

    /// Inverts `(A+2C : A-2C)` back to canonical `(A : C)`, up to scaling.
    pub fn from_equiv3(eq: &CurveCoefficientsEquiv) -> Self {
        let a = eq.a.add(&eq.c);
        ProjectiveCurveParameters {
            a: a.add(&a),
            c: eq.a.sub(&eq.c),
        }
    }
}

/// Recovers the curve coefficient `A` from the affine x-coordinates of a
/// basis `(x(P), x(Q), x(Q-P))`; the responder rebuilds the peer's image
/// curve from its public key this way.
pub(crate) fn recover_coordinate_a(xp: &Fp2, xq: &Fp2, xqp: &Fp2) -> ProjectiveCurveParameters {
    let t1 = xp.add(xq);
    let mut t0 = xp.mul(xq);
    let mut a = xqp.mul(&t1);
    a = a.add(&t0);
    t0 = t0.mul(xqp);
    a = a.sub(&Fp2::ONE);
    t0 = t0.add(&t0);
    let t1 = t1.add(xqp);
    t0 = t0.add(&t0);
    a = a.square();
    t0 = t0.invert();
    a = a.mul(&t0);
    a = a.sub(&t1);
    ProjectiveCurveParameters { a, c: Fp2::ONE }
}

/// `j(E) = 256·(A² - 3C²)³ / (C⁴·(A² - 4C²))`.
pub(crate) fn j_invariant(curve: &ProjectiveCurveParameters) -> Fp2 {
    let mut jinv = curve.a.square();
    let mut t1 = curve.c.square();
    let mut t0 = t1.add(&t1);
    t0 = jinv.sub(&t0);
    t0 = t0.sub(&t1);
    jinv = t0.sub(&t1);
    t1 = t1.square();
    jinv = jinv.mul(&t1);
    t0 = t0.add(&t0);
    t0 = t0.add(&t0);
    t1 = t0.square();
    t0 = t0.mul(&t1);
    t0 = t0.add(&t0);
    t0 = t0.add(&t0);
    jinv = jinv.invert();
    t0.mul(&jinv)
}

/// One x-only doubling on `(A+2C : 4C)`.
fn xdbl(p: &ProjectivePoint, params: &CurveCoefficientsEquiv) -> ProjectivePoint {
    let mut t0 = &p.x - &p.z;
    let mut t1 = &p.x + &p.z;
    t0 = t0.square();
    t1 = t1.square();
    let mut z2 = &params.c * &t0;
    let x2 = &z2 * &t1;
    t1 = t1.sub(&t0);
    t0 = &params.a * &t1;
    z2 = z2.add(&t0);
    z2 = z2.mul(&t1);
    ProjectivePoint { x: x2, z: z2 }
}

/// One x-only tripling on `(A+2C : A-2C)`.
fn xtpl(p: &ProjectivePoint, params: &CurveCoefficientsEquiv) -> ProjectivePoint {
    let mut t0 = &p.x - &p.z;
    let mut t2 = t0.square();
    let mut t1 = &p.x + &p.z;
    let t3 = t1.square();
    let t4 = &t1 + &t0;
    t0 = t1.sub(&t0);
    t1 = t4.square();
    t1 = t1.sub(&t3);
    t1 = t1.sub(&t2);
    let t5 = &t3 * &params.a;
    let t3 = &t5 * &t3;
    let t6 = &t2 * &params.c;
    t2 = t2.mul(&t6);
    let t3 = t2.sub(&t3);
    t2 = t5.sub(&t6);
    t1 = t2.mul(&t1);
    t2 = t3.add(&t1);
    t2 = t2.square();
    let x3 = &t2 * &t4;
    t1 = t3.sub(&t1);
    t1 = t1.square();
    let z3 = &t1 * &t0;
    ProjectivePoint { x: x3, z: z3 }
}

/// Simultaneous doubling and differential addition: returns
/// `(2P, P+Q)` given the projective difference `P - Q` and
/// `a24 = (A+2)/4`.
fn xdbl_add(
    p: &ProjectivePoint,
    q: &ProjectivePoint,
    diff: &ProjectivePoint,
    a24: &Fp2,
) -> (ProjectivePoint, ProjectivePoint) {
    let mut t0 = &p.x + &p.z;
    let t1 = &p.x - &p.z;
    let mut x2p = t0.square();
    let t2 = &q.x - &q.z;
    let mut xpq = &q.x + &q.z;
    t0 = t0.mul(&t2);
    let mut z2p = t1.square();
    let t1 = &t1 * &xpq;
    let t2 = x2p.sub(&z2p);
    x2p = x2p.mul(&z2p);
    xpq = a24.mul(&t2);
    let mut zpq = t0.sub(&t1);
    z2p = xpq.add(&z2p);
    xpq = t0.add(&t1);
    z2p = z2p.mul(&t2);
    zpq = zpq.square();
    xpq = xpq.square();
    // fold in the projective difference
    zpq = zpq.mul(&diff.x);
    xpq = xpq.mul(&diff.z);
    (
        ProjectivePoint { x: x2p, z: z2p },
        ProjectivePoint { x: xpq, z: zpq },
    )
}

/// `(A + 2C) / 4C`, the ladder's curve constant.
fn a_plus_2_over_4(curve: &ProjectiveCurveParameters) -> Fp2 {
    let c2 = curve.c.add(&curve.c);
    let num = curve.a.add(&c2);
    let den = c2.add(&c2);
    num.mul(&den.invert())
}

/// Three-point Montgomery ladder: computes `x(P + m·Q)` from the affine
/// x-coordinates of `P`, `Q` and `Q - P`.
///
/// The scalar is consumed little-endian, bit by bit, for exactly `nbits`
/// iterations; the ladder state is permuted with masked swaps only.
pub(crate) fn scalar_mul_3pt(
    curve: &ProjectiveCurveParameters,
    xp: &Fp2,
    xq: &Fp2,
    xqmp: &Fp2,
    nbits: u32,
    scalar: &[u8],
) -> ProjectivePoint {
    let a24 = a_plus_2_over_4(curve);
    let mut r0 = ProjectivePoint::from_affine(xq);
    let mut r2 = ProjectivePoint::from_affine(xqmp);
    let mut r = ProjectivePoint::from_affine(xp);

    let mut prevbit = 0u8;
    for i in 0..nbits {
        let bit = (scalar[(i >> 3) as usize] >> (i & 7)) & 1;
        ProjectivePoint::conditional_swap(&mut r, &mut r2, Choice::from(bit ^ prevbit));
        prevbit = bit;
        let (d, s) = xdbl_add(&r0, &r2, &r, &a24);
        r0 = d;
        r2 = s;
    }
    ProjectivePoint::conditional_swap(&mut r, &mut r2, Choice::from(prevbit));
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{
        AFFINE_X_PA, AFFINE_X_PB, AFFINE_X_QA, AFFINE_X_QB, AFFINE_X_RA, AFFINE_X_RB,
    };
    use subtle::ConstantTimeEq;

    #[test]
    fn recovers_base_curve_from_either_basis() {
        let base = ProjectiveCurveParameters::base();
        for (xp, xq, xr) in [
            (&AFFINE_X_PA, &AFFINE_X_QA, &AFFINE_X_RA),
            (&AFFINE_X_PB, &AFFINE_X_QB, &AFFINE_X_RB),
        ] {
            let curve = recover_coordinate_a(xp, xq, xr);
            assert!(bool::from(curve.a.ct_eq(&base.a)));
            assert!(bool::from(curve.c.ct_eq(&base.c)));
        }
    }

    #[test]
    fn two_torsion_basis_has_exact_order() {
        let params = ProjectiveCurveParameters::base().equiv4();
        for x in [&AFFINE_X_PA, &AFFINE_X_QA, &AFFINE_X_RA] {
            let mut pt = ProjectivePoint::from_affine(x);
            pt.pow2k(&params, 249);
            assert!(!bool::from(pt.z.is_zero()));
            pt.pow2k(&params, 1);
            assert!(bool::from(pt.z.is_zero()));
        }
    }

    #[test]
    fn three_torsion_basis_has_exact_order() {
        let params = ProjectiveCurveParameters::base().equiv3();
        for x in [&AFFINE_X_PB, &AFFINE_X_QB, &AFFINE_X_RB] {
            let mut pt = ProjectivePoint::from_affine(x);
            pt.pow3k(&params, 158);
            assert!(!bool::from(pt.z.is_zero()));
            pt.pow3k(&params, 1);
            assert!(bool::from(pt.z.is_zero()));
        }
    }
}
