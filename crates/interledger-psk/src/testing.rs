//! Test helpers and fixtures.

use bytes::Bytes;
use lazy_static::lazy_static;

use crate::message::well_known;
use crate::{PskContext, PskMessage, PskMessageBuilder, PskMessageHeader};

pub static SECRET: [u8; 32] =
    *b"secret\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
       \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";

pub static TOKEN: [u8; 16] = *b"token\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";

pub static NONCE_B64: &'static str = "AAECAwQFBgcICQoLDA0ODw";

/// A `Nonce` header with a fixed value, so fixtures stay deterministic.
pub fn nonce_header() -> PskMessageHeader {
    PskMessageHeader::new(well_known::NONCE, NONCE_B64).unwrap()
}

lazy_static! {
    pub static ref CONTEXT: PskContext =
        PskContext::from_token(&SECRET[..], &TOKEN[..]).unwrap();

    pub static ref MESSAGE: PskMessage = PskMessageBuilder {
        public_headers: vec![
            nonce_header(),
            PskMessageHeader::new(well_known::PAYMENT_ID, "1234").unwrap(),
        ],
        private_headers: vec![
            PskMessageHeader::new("Secret-Stuff", "magic").unwrap(),
        ],
        data: Bytes::from_static(b"hello psk"),
    }.build();

    pub static ref PAYMENT: ilp::Payment = ilp::PaymentBuilder {
        destination_amount: 100,
        destination_account: ilp::Addr::new(
            b"test.crypto.ebKWcAEB9_AdG9rZW4AAAAAAAAAAAAAAA",
        ),
        data: b"hello",
    }.build();
}

/// `MESSAGE`, written as cleartext.
pub static PLAIN_WIRE: &'static [u8] =
    b"PSK/1.0\n\
      Nonce: AAECAwQFBgcICQoLDA0ODw\n\
      Payment-Id: 1234\n\
      Encryption: none\n\
      \n\
      Secret-Stuff: magic\n\
      \n\
      hello psk";

/// `MESSAGE`, written under `CONTEXT`'s encryption key. The private section
/// is `CIPHERTEXT` and the authentication tag rides in the `Encryption`
/// header.
pub static ENCRYPTED_WIRE: &'static [u8] =
    b"PSK/1.0\n\
      Nonce: AAECAwQFBgcICQoLDA0ODw\n\
      Payment-Id: 1234\n\
      Encryption: aes-256-gcm jqjwl2fQw6Q4kE6YmNzvEg\n\
      \n\
      \x66\xf9\x53\x74\xc0\xc5\xe7\xf2\x8d\xa3\x2f\x01\xad\xc1\xe3\xe6\
      \x19\xfc\xf2\xfe\x6c\x4e\xda\x97\xd8\x91\xb6\xc6\x79\xd8";

pub static CIPHERTEXT: &'static [u8] = b"\
    \x66\xf9\x53\x74\xc0\xc5\xe7\xf2\x8d\xa3\x2f\x01\xad\xc1\xe3\xe6\
    \x19\xfc\xf2\xfe\x6c\x4e\xda\x97\xd8\x91\xb6\xc6\x79\xd8\
";
