//! Serializes messages to the PSK wire format.
//!
//! The wire shape is a status line, public headers, a blank line, then the
//! private section (private headers, a blank line, application data). The
//! encrypted variant replaces the private section with its AES-256-GCM
//! ciphertext.

use bytes::{BufMut, BytesMut};

use crate::crypto;
use crate::encryption::PskEncryptionHeader;
use crate::message::{self, well_known, PskMessage, PskMessageHeader};
use crate::{PskContext, PskError};

pub(crate) static STATUS_LINE: &'static [u8] = b"PSK/1.0\n";

/// Serializes `message` with its private section in cleartext.
///
/// The message must carry exactly one public `Nonce` header and no public
/// `Encryption` header; the writer appends `Encryption: none` itself.
pub fn write_message(message: &PskMessage) -> Result<BytesMut, PskError> {
    validate_public_headers(message)?;
    let body = write_private_section(message);
    let encryption = PskEncryptionHeader::None.to_header();
    Ok(write_envelope(message, &encryption, &body))
}

/// Serializes `message`, encrypting the private headers and application data
/// under the context's encryption key.
///
/// The nonce comes from the message's public `Nonce` header and must never
/// repeat for the same key. The authentication tag is carried in the
/// appended `Encryption: aes-256-gcm <tag>` header.
pub fn write_message_encrypted(
    message: &PskMessage,
    context: &PskContext,
) -> Result<BytesMut, PskError> {
    validate_public_headers(message)?;
    let nonce_header = message
        .public_header(well_known::NONCE)
        .expect("public headers were validated");
    let nonce = message::decode_nonce(nonce_header)?;
    let plaintext = write_private_section(message);
    let (ciphertext, auth_tag) =
        crypto::encrypt_aes_256_gcm(context.encryption_key(), &nonce, &plaintext);
    let encryption = PskEncryptionHeader::Aes256Gcm { auth_tag }.to_header();
    Ok(write_envelope(message, &encryption, &ciphertext))
}

fn validate_public_headers(message: &PskMessage) -> Result<(), PskError> {
    let nonces = message::count_headers(message.public_headers(), well_known::NONCE);
    if nonces != 1 {
        return Err(PskError::Framing(format!(
            "messages must have exactly one public Nonce header, got {}",
            nonces,
        )));
    }
    let encryptions =
        message::count_headers(message.public_headers(), well_known::ENCRYPTION);
    if encryptions != 0 {
        return Err(PskError::Framing(
            "the Encryption header is set by the writer".to_owned(),
        ));
    }
    Ok(())
}

fn predict_header_len(header: &PskMessageHeader) -> usize {
    header.name().len() + header.value().len() + 3
}

fn put_header(buffer: &mut BytesMut, header: &PskMessageHeader) {
    buffer.put_slice(header.name().as_bytes());
    buffer.put_slice(b": ");
    buffer.put_slice(header.value().as_bytes());
    buffer.put_u8(b'\n');
}

fn write_private_section(message: &PskMessage) -> BytesMut {
    let headers_len = message
        .private_headers()
        .iter()
        .map(predict_header_len)
        .sum::<usize>();
    let mut buffer = BytesMut::with_capacity(headers_len + 1 + message.data().len());
    for header in message.private_headers() {
        put_header(&mut buffer, header);
    }
    buffer.put_u8(b'\n');
    buffer.put_slice(message.data());
    buffer
}

fn write_envelope(
    message: &PskMessage,
    encryption: &PskMessageHeader,
    body: &[u8],
) -> BytesMut {
    let headers_len = message
        .public_headers()
        .iter()
        .map(predict_header_len)
        .sum::<usize>();
    let mut buffer = BytesMut::with_capacity(
        STATUS_LINE.len()
            + headers_len
            + predict_header_len(encryption)
            + 1
            + body.len(),
    );
    buffer.put_slice(STATUS_LINE);
    for header in message.public_headers() {
        put_header(&mut buffer, header);
    }
    put_header(&mut buffer, encryption);
    buffer.put_u8(b'\n');
    buffer.put_slice(body);
    buffer
}
