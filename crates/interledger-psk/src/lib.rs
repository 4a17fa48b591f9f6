//! # interledger-psk
//!
//! The Pre-Shared Key transport: key derivation, message framing, and
//! payment condition generation for Interledger payments.
//!
//! # References
//!
//!   * <https://github.com/interledger/rfcs/blob/master/0016-pre-shared-key/0016-pre-shared-key.md>
//!

mod context;
mod crypto;
mod encryption;
mod errors;
mod message;
mod reader;
mod writer;

#[cfg(test)]
mod testing;

pub use self::context::{PskContext, ReceiverContext, SenderContext};
pub use self::context::{
    ENCRYPTION_KEY_LEN, FULFILLMENT_KEY_LEN, RECEIVER_ID_LEN, SECRET_LEN, SHARED_KEY_LEN,
    TOKEN_LEN,
};
pub use self::crypto::{AUTH_TAG_LEN, NONCE_LEN};
pub use self::encryption::{PskEncryptionHeader, PskEncryptionType};
pub use self::errors::PskError;
pub use self::message::{nonce_header, well_known, PskMessage, PskMessageBuilder, PskMessageHeader};
pub use self::reader::{read_message, read_message_encrypted};
pub use self::writer::{write_message, write_message_encrypted};
