//! SIKE key encapsulation.
//!
//! A Fujisaki–Okamoto-style transform over the SIDH primitive. The random
//! oracles G, H and F are HMAC-SHA-256 keyed with the secret material and
//! applied to a 16-bit domain separator, per RFC 2104 usage. Decapsulation
//! re-encrypts and compares in constant time; on mismatch it silently keys
//! the output with the private `s` value instead of the recovered
//! plaintext, so a forged ciphertext yields *a* key rather than an error.

use hmac::{Hmac, Mac};
use rand_core::CryptoRngCore;
use sha2::Sha256;
use subtle::{ConditionallySelectable, ConstantTimeEq};

use crate::params::{
    CIPHERTEXT_SIZE, KEM_SHARED_SIZE, MSG_SIZE, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE,
};
use crate::sidh::{clamp_scalar, derive_secret, KeyVariant, PrivateKey, PublicKey};
use crate::Error;

/// Domain separator of the oracle deriving the ephemeral A-side scalar.
const G: [u8; 2] = [0x00, 0x00];
/// Domain separator of the oracle deriving the KEM shared secret.
const H: [u8; 2] = [0x01, 0x00];
/// Domain separator of the oracle masking the plaintext.
const F: [u8; 2] = [0x02, 0x00];

/// HMAC-SHA-256 with `key`, applied to the domain separator `sep` and
/// truncated to `out`.
fn hash_mac(out: &mut [u8], key: &[u8], sep: &[u8; 2]) {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(sep);
    let digest = mac.finalize().into_bytes();
    out.copy_from_slice(&digest[..out.len()]);
}

/// CPA encryption of a [`MSG_SIZE`]-byte plaintext under a SIKE public key,
/// using a fresh ephemeral A-side key pair.
pub fn encrypt(
    rng: &mut impl CryptoRngCore,
    pk: &PublicKey,
    ptext: &[u8],
) -> Result<[u8; CIPHERTEXT_SIZE], Error> {
    if pk.variant() != KeyVariant::Sike {
        return Err(Error::WrongKeyType);
    }
    if ptext.len() != MSG_SIZE {
        return Err(Error::InvalidInputLength);
    }
    let sk = PrivateKey::generate(KeyVariant::SidhA, rng)?;
    let eph_pk = sk.public_key();
    encrypt_deterministic(&sk, &eph_pk, pk, ptext)
}

/// Encryption with a caller-supplied A-side key pair; shared by the public
/// [`encrypt`] and the deterministic re-encryption inside the KEM.
fn encrypt_deterministic(
    sk: &PrivateKey,
    eph_pk: &PublicKey,
    pk: &PublicKey,
    ptext: &[u8],
) -> Result<[u8; CIPHERTEXT_SIZE], Error> {
    let j = derive_secret(sk, pk)?;
    let mut ctext = [0u8; CIPHERTEXT_SIZE];
    ctext[..PUBLIC_KEY_SIZE].copy_from_slice(&eph_pk.export());
    let c1 = &mut ctext[PUBLIC_KEY_SIZE..];
    hash_mac(c1, &j, &F);
    for (c, p) in c1.iter_mut().zip(ptext) {
        *c ^= p;
    }
    Ok(ctext)
}

/// CPA decryption; the inverse of [`encrypt`].
pub fn decrypt(sk: &PrivateKey, ctext: &[u8]) -> Result<[u8; MSG_SIZE], Error> {
    if sk.variant() != KeyVariant::Sike {
        return Err(Error::WrongKeyType);
    }
    if ctext.len() != CIPHERTEXT_SIZE {
        return Err(Error::InvalidInputLength);
    }
    let c0 = PublicKey::import(KeyVariant::SidhA, &ctext[..PUBLIC_KEY_SIZE])?;
    let j = derive_secret(sk, &c0)?;
    let mut ptext = [0u8; MSG_SIZE];
    hash_mac(&mut ptext, &j, &F);
    for (p, c) in ptext.iter_mut().zip(&ctext[PUBLIC_KEY_SIZE..]) {
        *p ^= c;
    }
    Ok(ptext)
}

/// Encapsulates a fresh shared secret to a SIKE public key, returning the
/// ciphertext and the secret.
pub fn encapsulate(
    rng: &mut impl CryptoRngCore,
    pk: &PublicKey,
) -> Result<([u8; CIPHERTEXT_SIZE], [u8; KEM_SHARED_SIZE]), Error> {
    if pk.variant() != KeyVariant::Sike {
        return Err(Error::WrongKeyType);
    }
    let mut m = [0u8; MSG_SIZE];
    rng.try_fill_bytes(&mut m).map_err(|_| Error::RngFailure)?;

    let sk = ephemeral_key(&m, pk);
    let eph_pk = sk.public_key();
    let ctext = encrypt_deterministic(&sk, &eph_pk, pk, &m)?;

    let mut secret = [0u8; KEM_SHARED_SIZE];
    let mut key = [0u8; MSG_SIZE + CIPHERTEXT_SIZE];
    key[..MSG_SIZE].copy_from_slice(&m);
    key[MSG_SIZE..].copy_from_slice(&ctext);
    hash_mac(&mut secret, &key, &H);
    Ok((ctext, secret))
}

/// Recovers the shared secret from a ciphertext.
///
/// `pk` is the public key matching `sk`. Any length-correct ciphertext
/// yields a secret: when re-encryption does not reproduce the ciphertext,
/// the output is keyed with `sk`'s `s` value, and the selection leaks
/// nothing through timing.
pub fn decapsulate(
    sk: &PrivateKey,
    pk: &PublicKey,
    ctext: &[u8],
) -> Result<[u8; KEM_SHARED_SIZE], Error> {
    if sk.variant() != KeyVariant::Sike || pk.variant() != KeyVariant::Sike {
        return Err(Error::WrongKeyType);
    }
    if ctext.len() != CIPHERTEXT_SIZE {
        return Err(Error::InvalidInputLength);
    }
    let m = decrypt(sk, ctext)?;

    // re-encrypt under the oracle-derived ephemeral key
    let eph_sk = ephemeral_key(&m, pk);
    let c0 = eph_sk.public_key().export();

    let matches = c0[..].ct_eq(&ctext[..PUBLIC_KEY_SIZE]);
    let mut key = [0u8; MSG_SIZE + CIPHERTEXT_SIZE];
    for i in 0..MSG_SIZE {
        key[i] = u8::conditional_select(&sk.s[i], &m[i], matches);
    }
    key[MSG_SIZE..].copy_from_slice(ctext);

    let mut secret = [0u8; KEM_SHARED_SIZE];
    hash_mac(&mut secret, &key, &H);
    Ok(secret)
}

/// The deterministic A-side key `G(m || pk)`, clamped like a generated
/// scalar.
fn ephemeral_key(m: &[u8; MSG_SIZE], pk: &PublicKey) -> PrivateKey {
    let mut key = [0u8; MSG_SIZE + PUBLIC_KEY_SIZE];
    key[..MSG_SIZE].copy_from_slice(m);
    key[MSG_SIZE..].copy_from_slice(&pk.export());

    let mut scalar = [0u8; SECRET_KEY_SIZE];
    hash_mac(&mut scalar, &key, &G);
    clamp_scalar(&mut scalar, KeyVariant::SidhA.domain_params().secret_bit_len);
    PrivateKey {
        variant: KeyVariant::SidhA,
        scalar,
        s: [0u8; MSG_SIZE],
    }
}
