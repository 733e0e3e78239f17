//! Legacy VNC password obfuscation.
//!
//! VNC stores passwords as a single DES block encrypted with a fixed, public
//! key. This is obfuscation, not protection: anyone holding the bytes can
//! recover the plaintext with [`unscramble`].

use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use des::Des;

/// Length of a crypted password and of the plaintext block it is made from.
pub const PASSWORD_LEN: usize = 8;

/// Fixed VNC key as written for the classic `d3des` routines, which read key
/// bits least-significant first.
const VNC_KEY: [u8; PASSWORD_LEN] = [23, 82, 107, 6, 35, 78, 88, 7];

fn cipher() -> Des {
    // Standard DES reads key bits most-significant first.
    let key = VNC_KEY.map(u8::reverse_bits);
    Des::new(GenericArray::from_slice(&key))
}

/// Scrambles an 8-byte, zero-padded plaintext block.
pub fn scramble(plain: &[u8; PASSWORD_LEN]) -> [u8; PASSWORD_LEN] {
    let mut block = GenericArray::clone_from_slice(plain);
    cipher().encrypt_block(&mut block);
    let mut out = [0u8; PASSWORD_LEN];
    out.copy_from_slice(&block);
    out
}

/// Inverse of [`scramble`].
pub fn unscramble(crypted: &[u8; PASSWORD_LEN]) -> [u8; PASSWORD_LEN] {
    let mut block = GenericArray::clone_from_slice(crypted);
    cipher().decrypt_block(&mut block);
    let mut out = [0u8; PASSWORD_LEN];
    out.copy_from_slice(&block);
    out
}

/// Converts text to one byte per character and fits it into a single block.
///
/// Characters outside Latin-1 become `?`. Longer input is truncated, shorter
/// input is zero-padded on the right.
pub fn plaintext_block(plain_text: &str) -> [u8; PASSWORD_LEN] {
    let mut block = [0u8; PASSWORD_LEN];
    for (slot, ch) in block.iter_mut().zip(plain_text.chars()) {
        *slot = u8::try_from(u32::from(ch)).unwrap_or(b'?');
    }
    block
}
