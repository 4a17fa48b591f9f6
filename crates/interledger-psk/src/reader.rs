//! Parses the PSK wire format.

use std::str;

use bytes::Bytes;
use log::warn;

use crate::crypto;
use crate::encryption::PskEncryptionHeader;
use crate::message::{self, well_known, PskMessage, PskMessageBuilder, PskMessageHeader};
use crate::{PskContext, PskError};

static STATUS_PREFIX: &'static [u8] = b"PSK/1.";

/// Parses a message without decrypting it.
///
/// A cleartext message comes back whole, with the writer's
/// `Encryption: none` header consumed. An encrypted message stays sealed:
/// its `Encryption` header (and the authentication tag within) is kept, the
/// ciphertext is carried as application data, and it has no private headers
/// until [`read_message_encrypted`] opens it.
pub fn read_message(buffer: &[u8]) -> Result<PskMessage, PskError> {
    let mut reader = buffer;
    let status_line = read_line(&mut reader)?;
    if !is_valid_status_line(status_line) {
        return Err(PskError::Framing(format!(
            "unexpected status line: {:?}",
            String::from_utf8_lossy(status_line),
        )));
    }

    let mut public_headers = read_headers(&mut reader)?;
    validate_cardinality(&public_headers)?;
    let encryption_value = public_headers
        .iter()
        .find(|header| header.name() == well_known::ENCRYPTION)
        .expect("cardinality was validated")
        .value();
    let encryption = PskEncryptionHeader::parse(encryption_value)?;

    match encryption {
        PskEncryptionHeader::None => {
            let private_headers = read_headers(&mut reader)?;
            public_headers.retain(|header| header.name() != well_known::ENCRYPTION);
            Ok(PskMessageBuilder {
                public_headers,
                private_headers,
                data: Bytes::copy_from_slice(reader),
            }.build())
        }
        PskEncryptionHeader::Aes256Gcm { .. } => Ok(PskMessageBuilder {
            public_headers,
            private_headers: Vec::new(),
            data: Bytes::copy_from_slice(reader),
        }.build()),
    }
}

/// Parses and decrypts a message, yielding the message originally passed to
/// the writer.
pub fn read_message_encrypted(
    buffer: &[u8],
    context: &PskContext,
) -> Result<PskMessage, PskError> {
    open_message(read_message(buffer)?, context)
}

fn open_message(message: PskMessage, context: &PskContext) -> Result<PskMessage, PskError> {
    let encryption = message
        .public_header(well_known::ENCRYPTION)
        .map(|header| PskEncryptionHeader::parse(header.value()))
        .transpose()?;
    let auth_tag = match encryption {
        Some(PskEncryptionHeader::Aes256Gcm { auth_tag }) => auth_tag,
        Some(PskEncryptionHeader::None) | None => {
            warn!("refusing to read cleartext message as encrypted");
            return Err(PskError::UnsupportedEncryption("none".to_owned()));
        }
    };
    let nonce_header = message
        .public_header(well_known::NONCE)
        .expect("read_message validates the Nonce header");
    let nonce = message::decode_nonce(nonce_header)?;

    let (mut public_headers, _, ciphertext) = message.into_parts();
    let plaintext = crypto::decrypt_aes_256_gcm(
        context.encryption_key(),
        &nonce,
        &ciphertext,
        &auth_tag,
    ).map_err(|error| {
        warn!("message failed authentication");
        error
    })?;

    let mut reader = &plaintext[..];
    let private_headers = read_headers(&mut reader)?;
    let data = Bytes::copy_from_slice(reader);
    public_headers.retain(|header| header.name() != well_known::ENCRYPTION);
    Ok(PskMessageBuilder {
        public_headers,
        private_headers,
        data,
    }.build())
}

fn is_valid_status_line(line: &[u8]) -> bool {
    line.len() > STATUS_PREFIX.len()
        && line.starts_with(STATUS_PREFIX)
        && line[STATUS_PREFIX.len()..]
            .iter()
            .all(|byte| byte.is_ascii_digit())
}

fn read_line<'a>(reader: &mut &'a [u8]) -> Result<&'a [u8], PskError> {
    match reader.iter().position(|&byte| byte == b'\n') {
        Some(index) => {
            let line = &reader[..index];
            *reader = &reader[index + 1..];
            Ok(line)
        }
        None => Err(PskError::Framing("unterminated line".to_owned())),
    }
}

fn read_headers(reader: &mut &[u8]) -> Result<Vec<PskMessageHeader>, PskError> {
    let mut headers = Vec::new();
    loop {
        let line = read_line(reader)?;
        if line.is_empty() {
            return Ok(headers);
        }
        headers.push(parse_header(line)?);
    }
}

fn parse_header(line: &[u8]) -> Result<PskMessageHeader, PskError> {
    let line = str::from_utf8(line)
        .map_err(|_| PskError::Framing("header is not utf-8".to_owned()))?;
    let mut parts = line.splitn(2, ':');
    let name = parts.next().expect("splitn always yields a first part");
    let value = parts.next().ok_or_else(|| {
        PskError::Framing(format!("header is missing a separator: {:?}", line))
    })?;
    PskMessageHeader::new(name, value)
}

fn validate_cardinality(headers: &[PskMessageHeader]) -> Result<(), PskError> {
    let nonces = message::count_headers(headers, well_known::NONCE);
    if nonces != 1 {
        return Err(PskError::Framing(format!(
            "messages must have exactly one public Nonce header, got {}",
            nonces,
        )));
    }
    let encryptions = message::count_headers(headers, well_known::ENCRYPTION);
    if encryptions != 1 {
        return Err(PskError::Framing(format!(
            "messages must have exactly one public Encryption header, got {}",
            encryptions,
        )));
    }
    Ok(())
}
