//! SIDH key agreement tests.

use hex_literal::hex;
use rand_core::OsRng;
use sike503::{
    derive_secret, Error, KeyVariant, PrivateKey, PublicKey, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE,
    SHARED_SECRET_SIZE,
};

/// A-side secret scalar, clamped; drives the `PKA` vector below.
const SK_A: [u8; 32] = hex!("0d141b222930373e454c535a61686f767d848b9299a0a7aeb5bcc3cad1d8df02");
/// B-side secret scalar, clamped; drives the `PKB` vector below.
const SK_B: [u8; 32] = hex!("05101b26313c47525d68737e89949faab5c0cbd6e1ecf7020d18232e39444f0a");

const PK_A: [u8; 378] = hex!(
    "71ec38e15db269f0b42d36ab379e86b2244b63bc82bef7e3f5c0845f0a8e94c7
     cf3e59823f7e498cda859797e4f5ad3167eff4aea64af8ad75738bc8708d3b56
     b0051a18b4f822a2d379360e4dcdddd17209e93255a0a4638efde598d7ee4a42
     7e14287703f3974b4f0e8bd010b2f032085dde6eba8f9836d14b5a2b8e3f9c38
     c49d421ec78f8e930d6764d4bceea24a601cf57876091855aea60096bc799781
     008a382fee0d29ca19f8749aafb3d26643de9a90021c9a6749569df9369b56b7
     55c894f546ad37d1a86293e51c171ba948ddceca5fc11bb1d2c236a324ec8fe2
     ed645c47fbb6210c4c27a2751ad37bd78b55db4552b9bb11e7535f094fba1c23
     cc8dc3bb42d77d7d2da9106fb5b13948e46797aaac331662fa0b565cfbc6f397
     68a68df15d01ee54399568724982651e8fb6ab59a80f7708b7b2200d7f4fe814
     a877be7fdf5ba99c1b4fdec6ec43b339b576244ca5f21591651499172aaf7165
     15d007cbcfcfc77e5ea02fcc08f34a0143b2b632df51925d4702"
);

const PK_B: [u8; 378] = hex!(
    "f39fd3857297b225bb1ffc5f64e4e727288b94a1c078863ec6c73afd5aaeac1f
     dc449818c8977d924ebe78093ca6207c4e864869f4d0b0eedf27358bcff33b52
     b5f8d54ae97119200a9e69132eb31b2a97b3e68e1b12e8881f0f3b9508b3d787
     23687eb24b06645cbaf9c974177f3d4320201a9e74ee13085bd8d06c021cd29d
     315c243540f87e01c2811c1d0007e2f1ccd9cacf7d4c75600f0232dcb7d15178
     07ab64d7842cf44263f3485d78152f70e33bcf79310669a25dcd1f1a114378de
     49e6951ab8a72f7273cf6e06daeaf2363c765219a8f752f32d3769f03a66cb27
     462b2ce31a5a8d59967ed7668d0d75a425b9a35d29b9cfe20eb7cb20a9ba913c
     29f6d5437a56f406247a5f53f64c1b098fa41ce9f989c6bea1f2ff4b50ee227e
     081a4c060618d1e79369828009500129de929b017e16a010f0a52d1721d10145
     9c23ed6c21d252242479762d9ba72700f4374eaddb43d9badcc0b4cf32b4ad50
     c00540f1f12996df9457d202b7cdcf96134c9b8d5a745a7e563f"
);

const SHARED_J: [u8; 126] = hex!(
    "b094560525ac37f7dd0a5286667915db2a403a9dfbefc6d0c7e32137eda5cdfd
     cb39f38e475fe1ad1c119865c3e9ce653619cb3142acfe96eaa76044d80b1f61
     8f8313bdcba6ee0eedfa035e9fe060450b0c6dfc0999b12378bab2ede278852a
     1737f64c26f6c1ec89ca206d54e7fb36fb1d4f221324863ca2a0bfeb7d18"
);

#[test]
fn public_keys_match_vectors() {
    let sk_a = PrivateKey::import(KeyVariant::SidhA, &SK_A).unwrap();
    let sk_b = PrivateKey::import(KeyVariant::SidhB, &SK_B).unwrap();
    assert_eq!(sk_a.public_key().export(), PK_A);
    assert_eq!(sk_b.public_key().export(), PK_B);
}

#[test]
fn shared_secret_matches_vector() {
    let sk_a = PrivateKey::import(KeyVariant::SidhA, &SK_A).unwrap();
    let sk_b = PrivateKey::import(KeyVariant::SidhB, &SK_B).unwrap();
    let pk_a = PublicKey::import(KeyVariant::SidhA, &PK_A).unwrap();
    let pk_b = PublicKey::import(KeyVariant::SidhB, &PK_B).unwrap();

    let j_a = derive_secret(&sk_a, &pk_b).unwrap();
    let j_b = derive_secret(&sk_b, &pk_a).unwrap();
    assert_eq!(j_a, SHARED_J);
    assert_eq!(j_b, SHARED_J);
}

#[test]
fn cross_side_agreement() {
    let alice = PrivateKey::generate(KeyVariant::SidhA, &mut OsRng).unwrap();
    let bob = PrivateKey::generate(KeyVariant::SidhB, &mut OsRng).unwrap();

    let s1 = derive_secret(&alice, &bob.public_key()).unwrap();
    let s2 = derive_secret(&bob, &alice.public_key()).unwrap();
    assert_eq!(s1, s2);
    assert_eq!(s1.len(), SHARED_SECRET_SIZE);
}

#[test]
fn same_side_keys_are_rejected() {
    let alice = PrivateKey::generate(KeyVariant::SidhA, &mut OsRng).unwrap();
    let pk_a = alice.public_key();
    assert_eq!(derive_secret(&alice, &pk_a), Err(Error::IncompatibleKeys));

    let bob = PrivateKey::generate(KeyVariant::SidhB, &mut OsRng).unwrap();
    let sike = PrivateKey::generate(KeyVariant::Sike, &mut OsRng).unwrap();
    // SIKE keys live on the B side
    assert_eq!(
        derive_secret(&sike, &bob.public_key()),
        Err(Error::IncompatibleKeys)
    );
}

#[test]
fn generated_scalars_are_clamped() {
    // A side: 250-bit scalars, so the top byte keeps its low two bits with
    // bit 1 forced; B side: 252 bits, low four bits with bit 3 forced.
    for _ in 0..8 {
        let a = PrivateKey::generate(KeyVariant::SidhA, &mut OsRng).unwrap();
        let mut out = [0u8; SECRET_KEY_SIZE];
        a.export(&mut out).unwrap();
        assert_eq!(out[31] >> 2, 0);
        assert_eq!((out[31] >> 1) & 1, 1);

        let b = PrivateKey::generate(KeyVariant::SidhB, &mut OsRng).unwrap();
        b.export(&mut out).unwrap();
        assert_eq!(out[31] >> 4, 0);
        assert_eq!((out[31] >> 3) & 1, 1);
    }
}

#[test]
fn public_key_wire_roundtrip() {
    let sk = PrivateKey::generate(KeyVariant::SidhB, &mut OsRng).unwrap();
    let pk = sk.public_key();
    let wire = pk.export();
    assert_eq!(wire.len(), PUBLIC_KEY_SIZE);
    assert_eq!(pk.size(), PUBLIC_KEY_SIZE);

    let back = PublicKey::import(KeyVariant::SidhB, &wire).unwrap();
    assert_eq!(back.export(), wire);
    assert_eq!(back.variant(), KeyVariant::SidhB);

    assert_eq!(
        PublicKey::import(KeyVariant::SidhB, &wire[1..]).unwrap_err(),
        Error::InvalidInputLength
    );
}

#[test]
fn private_key_wire_roundtrip() {
    for variant in [KeyVariant::SidhA, KeyVariant::SidhB, KeyVariant::Sike] {
        let sk = PrivateKey::generate(variant, &mut OsRng).unwrap();
        let mut wire = vec![0u8; sk.size()];
        sk.export(&mut wire).unwrap();

        let back = PrivateKey::import(variant, &wire).unwrap();
        let mut wire2 = vec![0u8; back.size()];
        back.export(&mut wire2).unwrap();
        assert_eq!(wire, wire2);
        // same key, same public key
        assert_eq!(sk.public_key().export(), back.public_key().export());

        assert_eq!(
            PrivateKey::import(variant, &wire[1..]).unwrap_err(),
            Error::InvalidInputLength
        );
    }
}
