//! The PSK message model: ordered public headers, ordered private headers,
//! and opaque application data.

use bytes::Bytes;
use rand::{CryptoRng, RngCore};

use crate::crypto;
use crate::PskError;

/// Header names with protocol-assigned meaning.
pub mod well_known {
    pub static NONCE: &'static str = "Nonce";
    pub static ENCRYPTION: &'static str = "Encryption";
    pub static EXPIRES_AT: &'static str = "Expires-At";
    pub static PAYMENT_ID: &'static str = "Payment-Id";
}

/// A single `name: value` pair.
///
/// Names and values are trimmed. Neither may be empty or contain a line
/// break, and names may not contain `:`, so every header reparses to itself.
#[derive(Clone, Debug, PartialEq)]
pub struct PskMessageHeader {
    name: String,
    value: String,
}

impl PskMessageHeader {
    pub fn new(name: &str, value: &str) -> Result<Self, PskError> {
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            return Err(PskError::Framing("header name is empty".to_owned()));
        }
        if value.is_empty() {
            return Err(PskError::Framing("header value is empty".to_owned()));
        }
        if name.contains(':') {
            return Err(PskError::Framing(format!(
                "header name contains a colon: {:?}",
                name,
            )));
        }
        if contains_line_break(name) || contains_line_break(value) {
            return Err(PskError::Framing(format!(
                "header contains a line break: {:?}",
                name,
            )));
        }
        Ok(PskMessageHeader {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

fn contains_line_break(text: &str) -> bool {
    text.contains('\n') || text.contains('\r')
}

/// Generates a fresh `Nonce` header from 16 CSPRNG bytes.
///
/// Every encrypted message must carry a nonce that is unique for its
/// encryption key.
pub fn nonce_header<R>(rng: &mut R) -> PskMessageHeader
where
    R: CryptoRng + RngCore,
{
    let mut nonce = [0; crypto::NONCE_LEN];
    rng.fill_bytes(&mut nonce);
    PskMessageHeader {
        name: well_known::NONCE.to_owned(),
        value: base64::encode_config(&nonce[..], base64::URL_SAFE_NO_PAD),
    }
}

pub(crate) fn count_headers(headers: &[PskMessageHeader], name: &str) -> usize {
    headers
        .iter()
        .filter(|header| header.name() == name)
        .count()
}

pub(crate) fn decode_nonce(
    header: &PskMessageHeader,
) -> Result<[u8; crypto::NONCE_LEN], PskError> {
    let nonce = base64::decode_config(header.value(), base64::URL_SAFE_NO_PAD)
        .map_err(|_| PskError::InvalidKeyMaterial("nonce is not base64url"))?;
    if nonce.len() != crypto::NONCE_LEN {
        return Err(PskError::InvalidKeyMaterial("nonce must be 16 bytes"));
    }
    let mut bytes = [0; crypto::NONCE_LEN];
    bytes.copy_from_slice(&nonce);
    Ok(bytes)
}

/// An immutable PSK envelope.
///
/// Duplicate header names are permitted and order is preserved, in both
/// sections.
#[derive(Clone, Debug, PartialEq)]
pub struct PskMessage {
    public_headers: Vec<PskMessageHeader>,
    private_headers: Vec<PskMessageHeader>,
    data: Bytes,
}

impl PskMessage {
    #[inline]
    pub fn public_headers(&self) -> &[PskMessageHeader] {
        &self.public_headers
    }

    #[inline]
    pub fn private_headers(&self) -> &[PskMessageHeader] {
        &self.private_headers
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The first public header named `name`, if any.
    pub fn public_header(&self, name: &str) -> Option<&PskMessageHeader> {
        self.public_headers
            .iter()
            .find(|header| header.name() == name)
    }

    /// The first private header named `name`, if any.
    pub fn private_header(&self, name: &str) -> Option<&PskMessageHeader> {
        self.private_headers
            .iter()
            .find(|header| header.name() == name)
    }

    pub(crate) fn into_parts(self) -> (Vec<PskMessageHeader>, Vec<PskMessageHeader>, Bytes) {
        (self.public_headers, self.private_headers, self.data)
    }
}

pub struct PskMessageBuilder {
    pub public_headers: Vec<PskMessageHeader>,
    pub private_headers: Vec<PskMessageHeader>,
    pub data: Bytes,
}

impl PskMessageBuilder {
    pub fn build(self) -> PskMessage {
        PskMessage {
            public_headers: self.public_headers,
            private_headers: self.private_headers,
            data: self.data,
        }
    }
}



#[cfg(test)]
mod test_psk_message {
    use super::*;

    fn message() -> PskMessage {
        PskMessageBuilder {
            public_headers: vec![
                PskMessageHeader::new("Nonce", "AAECAwQFBgcICQoLDA0ODw").unwrap(),
                PskMessageHeader::new("Tag", "first").unwrap(),
                PskMessageHeader::new("Tag", "second").unwrap(),
            ],
            private_headers: vec![
                PskMessageHeader::new("Secret-Stuff", "magic").unwrap(),
            ],
            data: Bytes::from_static(b"hello psk"),
        }.build()
    }

    #[test]
    fn test_accessors() {
        let message = message();
        assert_eq!(message.public_headers().len(), 3);
        assert_eq!(message.private_headers().len(), 1);
        assert_eq!(message.data(), b"hello psk");
    }

    #[test]
    fn test_header_lookup_returns_first_match() {
        let message = message();
        assert_eq!(message.public_header("Tag").unwrap().value(), "first");
        assert_eq!(
            message.private_header("Secret-Stuff").unwrap().value(),
            "magic",
        );
        assert!(message.public_header("Missing").is_none());
        assert!(message.private_header("Tag").is_none());
    }
}
