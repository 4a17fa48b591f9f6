//! HMAC-SHA256 and AES-256-GCM, the two primitives the transport is built on.

use aes_gcm::aead::generic_array::typenum::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aes::Aes256;
use aes_gcm::{AeadInPlace, AesGcm, KeyInit};
use bytes::BytesMut;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::PskError;

pub const NONCE_LEN: usize = 16;
pub const AUTH_TAG_LEN: usize = 16;

/// AES-256-GCM parameterized for the protocol's 16 byte nonces.
type Aes256Gcm = AesGcm<Aes256, U16>;

pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key)
        .expect("hmac-sha256 accepts keys of any length");
    mac.update(message);
    let digest = mac.finalize().into_bytes();
    let mut output = [0; 32];
    output.copy_from_slice(&digest);
    output
}

/// Encrypts `plaintext`, returning the ciphertext and the detached
/// authentication tag. The tag travels in the `Encryption` header, never in
/// the data stream.
pub fn encrypt_aes_256_gcm(
    key: &[u8; 32],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> (BytesMut, [u8; AUTH_TAG_LEN]) {
    let cipher = Aes256Gcm::new(GenericArray::from_slice(&key[..]));
    let mut ciphertext = BytesMut::from(plaintext);
    let tag = cipher
        .encrypt_in_place_detached(
            GenericArray::from_slice(&nonce[..]),
            &[],
            ciphertext.as_mut(),
        )
        .expect("plaintext is within aes-gcm length limits");
    let mut auth_tag = [0; AUTH_TAG_LEN];
    auth_tag.copy_from_slice(&tag);
    (ciphertext, auth_tag)
}

/// Decrypts and authenticates `ciphertext`. No plaintext is returned unless
/// the tag verifies.
pub fn decrypt_aes_256_gcm(
    key: &[u8; 32],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    auth_tag: &[u8; AUTH_TAG_LEN],
) -> Result<BytesMut, PskError> {
    let cipher = Aes256Gcm::new(GenericArray::from_slice(&key[..]));
    let mut plaintext = BytesMut::from(ciphertext);
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(&nonce[..]),
            &[],
            plaintext.as_mut(),
            GenericArray::from_slice(&auth_tag[..]),
        )
        .map_err(|_| PskError::AuthenticationFailure)?;
    Ok(plaintext)
}
