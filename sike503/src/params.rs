//! Domain parameters for the SIKE p503 instance.
//!
//! `p = 2^250·3^159 - 1`. Field elements are stored in Montgomery form with
//! `R = 2^512`; the torsion bases below are the affine x-coordinates of the
//! fixed generator points on the starting curve `E0: y² = x³ + 6x² + x`,
//! already converted to Montgomery form.

use crate::arithmetic::{Fp, Fp2};

/// Byte length of a GF(p) element on the wire.
pub const FP_BYTES: usize = 63;

/// Byte length of an exported public key (`x(P) || x(Q) || x(Q-P)`).
pub const PUBLIC_KEY_SIZE: usize = 6 * FP_BYTES;

/// Byte length of the SIDH shared secret (a GF(p²) j-invariant).
pub const SHARED_SECRET_SIZE: usize = 2 * FP_BYTES;

/// Byte length of the KEM plaintext.
pub const MSG_SIZE: usize = 24;

/// Byte length of the KEM shared secret.
pub const KEM_SHARED_SIZE: usize = 16;

/// Byte length of a KEM ciphertext: an A-side public key followed by the
/// masked plaintext (`KEM_SHARED_SIZE + 8` bytes).
pub const CIPHERTEXT_SIZE: usize = PUBLIC_KEY_SIZE + KEM_SHARED_SIZE + 8;

/// Byte length of a secret scalar (either side).
pub const SECRET_KEY_SIZE: usize = 32;

/// Byte length of an exported SIKE private key (`s || scalar`).
pub const SIKE_SECRET_KEY_SIZE: usize = MSG_SIZE + SECRET_KEY_SIZE;

/// Per-side immutable domain parameters.
pub(crate) struct DomainParams {
    /// Bit length of a secret scalar; the byte above it is masked off and the
    /// bit below it is forced to 1 on generation.
    pub secret_bit_len: u32,
    /// x(P) of the side's torsion basis.
    pub affine_p: Fp2,
    /// x(Q) of the side's torsion basis.
    pub affine_q: Fp2,
    /// x(Q - P) of the side's torsion basis.
    pub affine_r: Fp2,
    /// Walk order for the isogeny-tree traversal.
    pub strategy: &'static [u32],
}

pub(crate) static PARAMS_A: DomainParams = DomainParams {
    secret_bit_len: 250,
    affine_p: AFFINE_X_PA,
    affine_q: AFFINE_X_QA,
    affine_r: AFFINE_X_RA,
    strategy: &STRATEGY_A,
};

pub(crate) static PARAMS_B: DomainParams = DomainParams {
    secret_bit_len: 252,
    affine_p: AFFINE_X_PB,
    affine_q: AFFINE_X_QB,
    affine_r: AFFINE_X_RB,
    strategy: &STRATEGY_B,
};

/// The prime `2^250·3^159 - 1`.
pub(crate) const P503: Fp = Fp([
    0xffff_ffff_ffff_ffff, 0xffff_ffff_ffff_ffff, 0xffff_ffff_ffff_ffff, 0xabff_ffff_ffff_ffff,
    0x1308_5bda_2211_e7a0, 0x1b9b_f6c8_7b7e_7daf, 0x6045_c6bd_da77_a4d0, 0x0040_66f5_4181_1e1e,
]);

/// `p + 1 = 2^250·3^159`; its three least-significant limbs are zero, which
/// the Montgomery reduction exploits.
pub(crate) const P503P1: Fp = Fp([
    0x0000_0000_0000_0000, 0x0000_0000_0000_0000, 0x0000_0000_0000_0000, 0xac00_0000_0000_0000,
    0x1308_5bda_2211_e7a0, 0x1b9b_f6c8_7b7e_7daf, 0x6045_c6bd_da77_a4d0, 0x0040_66f5_4181_1e1e,
]);

/// `2p`, the upper bound of the lazy reduction domain.
pub(crate) const P503X2: Fp = Fp([
    0xffff_ffff_ffff_fffe, 0xffff_ffff_ffff_ffff, 0xffff_ffff_ffff_ffff, 0x57ff_ffff_ffff_ffff,
    0x2610_b7b4_4423_cf41, 0x3737_ed90_f6fc_fb5e, 0xc08b_8d7b_b4ef_49a0, 0x0080_cdea_8302_3c3c,
]);

/// `R² mod p`, the to-Montgomery conversion factor.
pub(crate) const MONT_R2: Fp = Fp([
    0x5289_a0cf_641d_011f, 0x9b88_2571_89fe_d2b9, 0xa3b3_65d5_8dc8_f17a, 0x5bc5_7ab6_eff1_68ec,
    0x9e51_998b_d84d_4423, 0xbf89_99cb_ac3b_5695, 0x46e9_127b_ce14_cdb6, 0x003f_6cfc_e8b8_1771,
]);

/// `R mod p`: the multiplicative identity in Montgomery form.
pub(crate) const MONT_ONE: Fp = Fp([
    0x0000_0000_0000_03f9, 0x0000_0000_0000_0000, 0x0000_0000_0000_0000, 0xb400_0000_0000_0000,
    0x63cb_1a6e_a6de_d2b4, 0x5168_9d8d_667e_b37d, 0x8acd_77c7_1ab2_4142, 0x0026_fbae_c60f_5953,
]);

/// `6R mod p`: the coefficient A of the starting curve, in Montgomery form.
pub(crate) const MONT_SIX: Fp = Fp([
    0x0000_0000_0000_17d9, 0x0000_0000_0000_0000, 0x0000_0000_0000_0000, 0x3400_0000_0000_0000,
    0x1da9_8b09_8303_395a, 0x959f_ccf6_f47c_bbe3, 0x1fff_7a71_10c6_991d, 0x0028_b138_dfd8_bd9a,
]);

pub(crate) const AFFINE_X_PA: Fp2 = Fp2 {
    a: Fp([
        0x5d08_3011_589a_d893, 0xadfd_8d2c_b67d_0637, 0x330c_9ac3_4ffb_6361, 0xf0d4_7489_a2e8_05a2,
        0x27e2_7892_59c6_b8dc, 0x6386_6a2c_1219_31b9, 0x8d4c_65a7_137d_cf44, 0x003a_183a_e596_7b3f,
    ]),
    b: Fp([
        0x7e35_41b8_c96d_1519, 0xd3ad_aeec_0d61_a26c, 0xc0a2_219c_e770_3dd9, 0xff3e_4665_8fcd_bc52,
        0xd5b3_8dea_e6e1_96ff, 0x1aac_8263_6495_6d58, 0xec9f_4875_b9a5_f27a, 0x001b_0b47_5ab9_9843,
    ]),
};

pub(crate) const AFFINE_X_QA: Fp2 = Fp2 {
    a: Fp([
        0x4d83_6951_07d0_3bad, 0x221f_3299_005e_2fcf, 0x78e6_ae22_f30d_ecf2, 0x6d98_2db5_1112_53e4,
        0x504c_80a8_ab45_26a8, 0xefd0_c3aa_210b_b024, 0xcb77_4835_01dc_6fcf, 0x0010_5254_4a96_bdf3,
    ]),
    b: Fp([
        0x0d74_fe34_02bc_ae47, 0xdf5b_8cda_832d_8aed, 0xb86b_cf06_e4bd_837e, 0x892a_2933_a0fa_1f63,
        0x9f88_fc67_b6cc_b461, 0x8229_26ea_9dda_3ac8, 0xeac8_dde5_8554_25ed, 0x0006_18fe_6da3_7a80,
    ]),
};

pub(crate) const AFFINE_X_RA: Fp2 = Fp2 {
    a: Fp([
        0x6b6f_4a4f_786c_f310, 0xb019_d444_bdcf_dbe3, 0xa14c_b066_8060_7834, 0xcb0d_5582_e7e6_e60a,
        0xba4e_e877_1667_e241, 0xe42a_114f_cb12_e5ff, 0x9a0c_074e_275b_cd98, 0x0018_7132_9b28_689e,
    ]),
    b: Fp([
        0x685f_a837_8513_fe76, 0x84e8_fc17_85e8_bdf0, 0x8a38_0f17_7cb7_c1b7, 0x2227_464f_4f81_2c94,
        0x117c_94a8_1a90_c279, 0x193d_7313_2fb9_fa28, 0x9933_5336_f192_c9eb, 0x0006_c2fe_778a_34fd,
    ]),
};

pub(crate) const AFFINE_X_PB: Fp2 = Fp2 {
    a: Fp([
        0x6dec_1605_74ae_592c, 0xd9ec_6e99_5cd9_5826, 0xb7f5_e06b_ed6b_1016, 0x7a3a_620c_e697_d731,
        0xcdfa_c6af_dfb6_c547, 0xfd48_2a99_ccfd_d4b7, 0xef79_6e25_a967_95c0, 0x0027_e972_4f25_8388,
    ]),
    b: Fp([
        0x25cc_64e0_2e09_1fea, 0x8712_6e72_1ed1_709b, 0x7224_f5ad_022c_8502, 0xa995_4e81_a52d_5dde,
        0xe1f5_b2f5_77cf_8927, 0xbf7e_52d5_f2f6_56ba, 0xc94d_8693_aa5a_f67b, 0x003a_f231_f3a2_3b8d,
    ]),
};

pub(crate) const AFFINE_X_QB: Fp2 = Fp2 {
    a: Fp([
        0x5ff7_32dc_5c9f_8074, 0x8341_e438_ed48_c045, 0xf7c1_7e9c_8890_4ead, 0xec2f_afdf_8851_a017,
        0x808a_bdbc_a11a_418f, 0x1cc9_777c_0d55_47b0, 0xedd6_ac16_56f7_c759, 0x002d_bb04_8db6_5c02,
    ]),
    b: Fp([
        0x0000_0000_0000_0000, 0x0000_0000_0000_0000, 0x0000_0000_0000_0000, 0x0000_0000_0000_0000,
        0x0000_0000_0000_0000, 0x0000_0000_0000_0000, 0x0000_0000_0000_0000, 0x0000_0000_0000_0000,
    ]),
};

pub(crate) const AFFINE_X_RB: Fp2 = Fp2 {
    a: Fp([
        0x2972_f6f0_9a7d_9370, 0x7437_109d_bc32_e81e, 0xb795_a268_5192_b79a, 0x2056_d2de_ae6b_d5d9,
        0xe98b_f29b_e9ff_fc43, 0xb6c6_0c06_73e5_8085, 0x8fcb_1330_40aa_a115, 0x0032_c909_7128_5227,
    ]),
    b: Fp([
        0xfe9a_4ab8_9bb6_7528, 0x4c0c_61c4_996e_52e0, 0x69d8_09a3_2e55_6e43, 0x3642_2604_0dc2_b0f6,
        0x9032_dede_1948_225c, 0xf022_c9ae_4108_d87b, 0x0a55_4802_770e_eedf, 0x0034_7907_a1aa_f16e,
    ]),
};

/// Traversal order for the 125 four-isogeny steps of the A side.
pub(crate) const STRATEGY_A: [u32; 124] = [
    55, 32, 17, 9, 5, 3, 2, 1, 1, 1, 1, 2, 1, 1, 1, 4,
    2, 1, 1, 1, 2, 1, 1, 8, 4, 2, 1, 1, 1, 2, 1, 1,
    4, 2, 1, 1, 2, 1, 1, 15, 8, 4, 2, 1, 1, 1, 2, 1,
    1, 4, 2, 1, 1, 2, 1, 1, 7, 4, 2, 1, 1, 2, 1, 1,
    3, 2, 1, 1, 1, 1, 23, 15, 8, 4, 2, 1, 1, 1, 2, 1,
    1, 4, 2, 1, 1, 2, 1, 1, 7, 4, 2, 1, 1, 2, 1, 1,
    3, 2, 1, 1, 1, 1, 9, 6, 4, 2, 1, 1, 2, 1, 1, 2,
    2, 1, 1, 1, 4, 2, 1, 1, 1, 2, 1, 1,
];

/// Traversal order for the 159 three-isogeny steps of the B side.
pub(crate) const STRATEGY_B: [u32; 158] = [
    65, 38, 22, 13, 8, 5, 3, 2, 1, 1, 1, 1, 1, 2, 1, 1,
    1, 3, 2, 1, 1, 1, 1, 1, 5, 3, 2, 1, 1, 1, 1, 1,
    2, 1, 1, 1, 9, 5, 3, 2, 1, 1, 1, 1, 1, 2, 1, 1,
    1, 4, 2, 1, 1, 1, 2, 1, 1, 16, 9, 5, 3, 2, 1, 1,
    1, 1, 1, 2, 1, 1, 1, 4, 2, 1, 1, 1, 2, 1, 1, 7,
    4, 2, 1, 1, 1, 2, 1, 1, 3, 2, 1, 1, 1, 1, 27, 16,
    9, 5, 3, 2, 1, 1, 1, 1, 1, 2, 1, 1, 1, 4, 2, 1,
    1, 1, 2, 1, 1, 7, 4, 2, 1, 1, 1, 2, 1, 1, 3, 2,
    1, 1, 1, 1, 11, 7, 4, 2, 1, 1, 1, 2, 1, 1, 3, 2,
    1, 1, 1, 1, 4, 3, 2, 1, 1, 1, 1, 2, 1, 1,
];

/// Squaring runs of the fixed `(p-3)/4` addition chain, one entry per
/// window multiplication.
pub(crate) const POW_STRATEGY: [u8; 91] = [
    12, 5, 5, 2, 7, 11, 3, 8, 4, 11, 4, 7, 5, 6, 3, 7, 5, 7, 2, 12, 5, 6, 4, 6,
    8, 6, 4, 7, 5, 5, 8, 5, 8, 5, 5, 8, 9, 3, 6, 2, 10, 6, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 3,
];

/// Indices into the odd-power window used by the `(p-3)/4` chain.
pub(crate) const MUL_STRATEGY: [u8; 91] = [
    12, 11, 10, 0, 1, 8, 3, 7, 1, 8, 3, 6, 7, 14, 2, 14, 14, 9, 0, 13, 9, 15, 5, 12,
    7, 13, 7, 15, 6, 7, 9, 0, 5, 7, 6, 8, 8, 3, 7, 0, 10, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15,
    15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 15, 3,
];
