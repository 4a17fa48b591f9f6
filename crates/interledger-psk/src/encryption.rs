//! The `Encryption` header: a scheme token, plus the detached authentication
//! tag when the private section is ciphertext.

use crate::crypto::AUTH_TAG_LEN;
use crate::message::{well_known, PskMessageHeader};
use crate::PskError;

static ENCRYPTION_NONE: &'static str = "none";
static ENCRYPTION_AES_256_GCM: &'static str = "aes-256-gcm";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PskEncryptionType {
    None,
    Aes256Gcm,
}

/// A parsed `Encryption` header value.
///
/// The value grammar is `none` or `aes-256-gcm <base64url(auth_tag)>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PskEncryptionHeader {
    None,
    Aes256Gcm { auth_tag: [u8; AUTH_TAG_LEN] },
}

impl PskEncryptionHeader {
    pub fn parse(value: &str) -> Result<Self, PskError> {
        let value = value.trim();
        if value == ENCRYPTION_NONE {
            return Ok(PskEncryptionHeader::None);
        }
        let mut parts = value.splitn(2, ' ');
        let scheme = parts.next().expect("splitn always yields a first part");
        if scheme != ENCRYPTION_AES_256_GCM {
            return Err(PskError::UnsupportedEncryption(value.to_owned()));
        }
        let auth_tag = parts
            .next()
            .ok_or(PskError::InvalidKeyMaterial("authentication tag is missing"))?;
        let auth_tag = base64::decode_config(auth_tag.trim(), base64::URL_SAFE_NO_PAD)
            .map_err(|_| {
                PskError::InvalidKeyMaterial("authentication tag is not base64url")
            })?;
        if auth_tag.len() != AUTH_TAG_LEN {
            return Err(PskError::InvalidKeyMaterial(
                "authentication tag must be 16 bytes",
            ));
        }
        let mut tag_bytes = [0; AUTH_TAG_LEN];
        tag_bytes.copy_from_slice(&auth_tag);
        Ok(PskEncryptionHeader::Aes256Gcm {
            auth_tag: tag_bytes,
        })
    }

    pub fn encryption_type(&self) -> PskEncryptionType {
        match self {
            PskEncryptionHeader::None => PskEncryptionType::None,
            PskEncryptionHeader::Aes256Gcm { .. } => PskEncryptionType::Aes256Gcm,
        }
    }

    pub fn to_header(&self) -> PskMessageHeader {
        let value = match self {
            PskEncryptionHeader::None => ENCRYPTION_NONE.to_owned(),
            PskEncryptionHeader::Aes256Gcm { auth_tag } => format!(
                "{} {}",
                ENCRYPTION_AES_256_GCM,
                base64::encode_config(&auth_tag[..], base64::URL_SAFE_NO_PAD),
            ),
        };
        PskMessageHeader::new(well_known::ENCRYPTION, &value)
            .expect("encryption header values are always valid")
    }
}
