//! SIDH keys, public-key derivation and shared-secret computation.
//!
//! The secret isogeny walk is driven by a precomputed strategy: a flat
//! sequence of multiply-by-ℓ step counts that orders the `e` small
//! ℓ-isogenies in `O(e log e)` curve operations. Snapshots of the kernel
//! point are parked on a bounded stack and pushed through each small
//! isogeny as it is computed.

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::arithmetic::{batch3_inv, Fp2};
use crate::curve::{
    j_invariant, recover_coordinate_a, scalar_mul_3pt, CurveCoefficientsEquiv,
    ProjectiveCurveParameters, ProjectivePoint,
};
use crate::isogeny::{Isogeny3, Isogeny4};
use crate::params::{
    DomainParams, FP_BYTES, MSG_SIZE, PARAMS_A, PARAMS_B, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE,
    SHARED_SECRET_SIZE, SIKE_SECRET_KEY_SIZE,
};
use crate::Error;

/// Deepest traversal stack reached by the A-side strategy.
const MAX_INT_POINTS_A: usize = 8;
/// Deepest traversal stack reached by the B-side strategy.
const MAX_INT_POINTS_B: usize = 10;

/// Which half of the exchange a key belongs to.
///
/// A-side keys walk 4-isogenies over the 2-torsion, B-side keys walk
/// 3-isogenies over the 3-torsion. `Sike` is a B-side key that additionally
/// carries the implicit-rejection secret `s` used by decapsulation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyVariant {
    /// 2-torsion side of the SIDH exchange.
    SidhA,
    /// 3-torsion side of the SIDH exchange.
    SidhB,
    /// B-side key usable with the KEM.
    Sike,
}

impl KeyVariant {
    pub(crate) fn is_side_a(self) -> bool {
        matches!(self, KeyVariant::SidhA)
    }

    pub(crate) fn domain_params(self) -> &'static DomainParams {
        if self.is_side_a() {
            &PARAMS_A
        } else {
            &PARAMS_B
        }
    }
}

/// An SIDH/SIKE private key.
///
/// Holds the secret scalar and, for the [`KeyVariant::Sike`] variant, the
/// random value `s` substituted for the plaintext when decapsulation
/// detects a forged ciphertext. Key material is zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey {
    pub(crate) variant: KeyVariant,
    pub(crate) scalar: [u8; SECRET_KEY_SIZE],
    pub(crate) s: [u8; MSG_SIZE],
}

/// An SIDH/SIKE public key: the affine x-coordinates of the opposite side's
/// basis pushed through the owner's secret isogeny.
#[derive(Clone, Copy)]
pub struct PublicKey {
    pub(crate) variant: KeyVariant,
    pub(crate) xp: Fp2,
    pub(crate) xq: Fp2,
    pub(crate) xqmp: Fp2,
}

impl PrivateKey {
    /// Generates a fresh key of the given variant.
    ///
    /// The scalar is clamped into `[2^(n-1), 2^n)` for the side's secret
    /// bit length `n`; a SIKE key also draws its `s` field.
    pub fn generate(variant: KeyVariant, rng: &mut impl CryptoRngCore) -> Result<Self, Error> {
        let mut key = PrivateKey {
            variant,
            scalar: [0u8; SECRET_KEY_SIZE],
            s: [0u8; MSG_SIZE],
        };
        rng.try_fill_bytes(&mut key.scalar)
            .map_err(|_| Error::RngFailure)?;
        clamp_scalar(&mut key.scalar, variant.domain_params().secret_bit_len);
        if variant == KeyVariant::Sike {
            rng.try_fill_bytes(&mut key.s).map_err(|_| Error::RngFailure)?;
        }
        Ok(key)
    }

    /// Imports a key previously produced by [`PrivateKey::export`]:
    /// the raw scalar for SIDH variants, `s || scalar` for SIKE.
    pub fn import(variant: KeyVariant, bytes: &[u8]) -> Result<Self, Error> {
        let mut key = PrivateKey {
            variant,
            scalar: [0u8; SECRET_KEY_SIZE],
            s: [0u8; MSG_SIZE],
        };
        match variant {
            KeyVariant::Sike if bytes.len() == SIKE_SECRET_KEY_SIZE => {
                key.s.copy_from_slice(&bytes[..MSG_SIZE]);
                key.scalar.copy_from_slice(&bytes[MSG_SIZE..]);
            }
            KeyVariant::SidhA | KeyVariant::SidhB if bytes.len() == SECRET_KEY_SIZE => {
                key.scalar.copy_from_slice(bytes);
            }
            _ => return Err(Error::InvalidInputLength),
        }
        Ok(key)
    }

    /// Writes the wire form into `out`, which must be exactly
    /// [`PrivateKey::size`] bytes.
    pub fn export(&self, out: &mut [u8]) -> Result<(), Error> {
        if out.len() != self.size() {
            return Err(Error::InvalidInputLength);
        }
        match self.variant {
            KeyVariant::Sike => {
                out[..MSG_SIZE].copy_from_slice(&self.s);
                out[MSG_SIZE..].copy_from_slice(&self.scalar);
            }
            _ => out.copy_from_slice(&self.scalar),
        }
        Ok(())
    }

    /// Wire size in bytes.
    pub fn size(&self) -> usize {
        match self.variant {
            KeyVariant::Sike => SIKE_SECRET_KEY_SIZE,
            _ => SECRET_KEY_SIZE,
        }
    }

    /// The key's variant.
    pub fn variant(&self) -> KeyVariant {
        self.variant
    }

    /// Derives the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        let (xp, xq, xqmp) = if self.variant.is_side_a() {
            public_key_gen_a(&self.scalar)
        } else {
            public_key_gen_b(&self.scalar)
        };
        PublicKey {
            variant: self.variant,
            xp,
            xq,
            xqmp,
        }
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.scalar.zeroize();
        self.s.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

impl PublicKey {
    /// Parses a 378-byte wire-form public key.
    pub fn import(variant: KeyVariant, bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(Error::InvalidInputLength);
        }
        let mut coords = [Fp2::ZERO; 3];
        for (coord, chunk) in coords.iter_mut().zip(bytes.chunks_exact(2 * FP_BYTES)) {
            let mut part = [0u8; 2 * FP_BYTES];
            part.copy_from_slice(chunk);
            *coord = Fp2::from_bytes(&part);
        }
        Ok(PublicKey {
            variant,
            xp: coords[0],
            xq: coords[1],
            xqmp: coords[2],
        })
    }

    /// Serializes as `x(P) || x(Q) || x(Q-P)`.
    pub fn export(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut out = [0u8; PUBLIC_KEY_SIZE];
        out[..2 * FP_BYTES].copy_from_slice(&self.xp.to_bytes());
        out[2 * FP_BYTES..4 * FP_BYTES].copy_from_slice(&self.xq.to_bytes());
        out[4 * FP_BYTES..].copy_from_slice(&self.xqmp.to_bytes());
        out
    }

    /// Wire size in bytes.
    pub fn size(&self) -> usize {
        PUBLIC_KEY_SIZE
    }

    /// The key's variant.
    pub fn variant(&self) -> KeyVariant {
        self.variant
    }
}

impl core::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

/// Computes the 126-byte SIDH shared secret, the serialized j-invariant of
/// the common image curve.
///
/// The keys must come from opposite sides of the exchange; a SIKE key
/// counts as B-side. Beyond that precondition nothing is validated — the
/// KEM's re-encryption check is the only defense against malformed public
/// keys, as the FO transform prescribes.
pub fn derive_secret(sk: &PrivateKey, pk: &PublicKey) -> Result<[u8; SHARED_SECRET_SIZE], Error> {
    if sk.variant.is_side_a() == pk.variant.is_side_a() {
        return Err(Error::IncompatibleKeys);
    }
    let j = if sk.variant.is_side_a() {
        derive_secret_a(&sk.scalar, pk)
    } else {
        derive_secret_b(&sk.scalar, pk)
    };
    Ok(j.to_bytes())
}

/// Clamps a freshly drawn scalar into `[2^(n-1), 2^n)`: bits above `n` are
/// cleared and bit `n-1` is forced on.
pub(crate) fn clamp_scalar(scalar: &mut [u8; SECRET_KEY_SIZE], secret_bit_len: u32) {
    let top = secret_bit_len % 8;
    scalar[SECRET_KEY_SIZE - 1] &= (1 << top) - 1;
    scalar[SECRET_KEY_SIZE - 1] |= 1 << (top - 1);
}

/// Strategy-driven chain of 4-isogenies. Leaves `kernel` holding the
/// order-4 kernel of the final step, which the caller consumes; companion
/// basis points, when present, are pushed through every step.
fn traverse_tree_a(
    cparams: &mut CurveCoefficientsEquiv,
    kernel: &mut ProjectivePoint,
    mut companions: Option<&mut [ProjectivePoint; 3]>,
) {
    let strat = PARAMS_A.strategy;
    let n = strat.len();
    let mut points = [*kernel; MAX_INT_POINTS_A];
    let mut indices = [0usize; MAX_INT_POINTS_A];
    let mut sp = 0;
    let mut i = 0usize;
    let mut sidx = 0;
    let mut phi = Isogeny4::new();

    for j in 1..=n {
        while i <= n - j {
            points[sp] = *kernel;
            indices[sp] = i;
            sp += 1;
            let k = strat[sidx];
            sidx += 1;
            kernel.pow2k(cparams, 2 * k);
            i += k as usize;
        }
        *cparams = phi.generate_curve(kernel);
        for pt in points[..sp].iter_mut() {
            *pt = phi.evaluate_point(pt);
        }
        if let Some(pts) = companions.as_mut() {
            for pt in pts.iter_mut() {
                *pt = phi.evaluate_point(pt);
            }
        }
        sp -= 1;
        *kernel = points[sp];
        i = indices[sp];
    }
}

/// Strategy-driven chain of 3-isogenies; see [`traverse_tree_a`].
fn traverse_tree_b(
    cparams: &mut CurveCoefficientsEquiv,
    kernel: &mut ProjectivePoint,
    mut companions: Option<&mut [ProjectivePoint; 3]>,
) {
    let strat = PARAMS_B.strategy;
    let n = strat.len();
    let mut points = [*kernel; MAX_INT_POINTS_B];
    let mut indices = [0usize; MAX_INT_POINTS_B];
    let mut sp = 0;
    let mut i = 0usize;
    let mut sidx = 0;
    let mut phi = Isogeny3::new();

    for j in 1..=n {
        while i <= n - j {
            points[sp] = *kernel;
            indices[sp] = i;
            sp += 1;
            let k = strat[sidx];
            sidx += 1;
            kernel.pow3k(cparams, k);
            i += k as usize;
        }
        *cparams = phi.generate_curve(kernel);
        for pt in points[..sp].iter_mut() {
            *pt = phi.evaluate_point(pt);
        }
        if let Some(pts) = companions.as_mut() {
            for pt in pts.iter_mut() {
                *pt = phi.evaluate_point(pt);
            }
        }
        sp -= 1;
        *kernel = points[sp];
        i = indices[sp];
    }
}

/// A-side public key: the B basis pushed through the secret 2-power
/// isogeny, normalized to affine with one batched inversion.
fn public_key_gen_a(scalar: &[u8]) -> (Fp2, Fp2, Fp2) {
    let base = ProjectiveCurveParameters::base();
    let mut kernel = scalar_mul_3pt(
        &base,
        &PARAMS_A.affine_p,
        &PARAMS_A.affine_q,
        &PARAMS_A.affine_r,
        PARAMS_A.secret_bit_len,
        scalar,
    );
    let mut companions = [
        ProjectivePoint::from_affine(&PARAMS_B.affine_p),
        ProjectivePoint::from_affine(&PARAMS_B.affine_q),
        ProjectivePoint::from_affine(&PARAMS_B.affine_r),
    ];
    let mut cparams = base.equiv4();
    traverse_tree_a(&mut cparams, &mut kernel, Some(&mut companions));

    let mut phi = Isogeny4::new();
    let _ = phi.generate_curve(&kernel);
    for pt in companions.iter_mut() {
        *pt = phi.evaluate_point(pt);
    }
    normalize3(&companions)
}

/// B-side public key: the A basis pushed through the secret 3-power
/// isogeny.
fn public_key_gen_b(scalar: &[u8]) -> (Fp2, Fp2, Fp2) {
    let base = ProjectiveCurveParameters::base();
    let mut kernel = scalar_mul_3pt(
        &base,
        &PARAMS_B.affine_p,
        &PARAMS_B.affine_q,
        &PARAMS_B.affine_r,
        PARAMS_B.secret_bit_len,
        scalar,
    );
    let mut companions = [
        ProjectivePoint::from_affine(&PARAMS_A.affine_p),
        ProjectivePoint::from_affine(&PARAMS_A.affine_q),
        ProjectivePoint::from_affine(&PARAMS_A.affine_r),
    ];
    let mut cparams = base.equiv3();
    traverse_tree_b(&mut cparams, &mut kernel, Some(&mut companions));

    let mut phi = Isogeny3::new();
    let _ = phi.generate_curve(&kernel);
    for pt in companions.iter_mut() {
        *pt = phi.evaluate_point(pt);
    }
    normalize3(&companions)
}

fn normalize3(pts: &[ProjectivePoint; 3]) -> (Fp2, Fp2, Fp2) {
    let (i1, i2, i3) = batch3_inv(&pts[0].z, &pts[1].z, &pts[2].z);
    (pts[0].x.mul(&i1), pts[1].x.mul(&i2), pts[2].x.mul(&i3))
}

/// Shared j-invariant from an A-side secret and a B-side public key.
fn derive_secret_a(scalar: &[u8], pk: &PublicKey) -> Fp2 {
    let curve = recover_coordinate_a(&pk.xp, &pk.xq, &pk.xqmp);
    let mut kernel = scalar_mul_3pt(
        &curve,
        &pk.xp,
        &pk.xq,
        &pk.xqmp,
        PARAMS_A.secret_bit_len,
        scalar,
    );
    let mut cparams = curve.equiv4();
    traverse_tree_a(&mut cparams, &mut kernel, None);

    let mut phi = Isogeny4::new();
    let last = phi.generate_curve(&kernel);
    j_invariant(&ProjectiveCurveParameters::from_equiv4(&last))
}

/// Shared j-invariant from a B-side secret and an A-side public key.
fn derive_secret_b(scalar: &[u8], pk: &PublicKey) -> Fp2 {
    let curve = recover_coordinate_a(&pk.xp, &pk.xq, &pk.xqmp);
    let mut kernel = scalar_mul_3pt(
        &curve,
        &pk.xp,
        &pk.xq,
        &pk.xqmp,
        PARAMS_B.secret_bit_len,
        scalar,
    );
    let mut cparams = curve.equiv3();
    traverse_tree_b(&mut cparams, &mut kernel, None);

    let mut phi = Isogeny3::new();
    let last = phi.generate_curve(&kernel);
    j_invariant(&ProjectiveCurveParameters::from_equiv3(&last))
}
