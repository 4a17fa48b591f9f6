use std::fmt;

use sha2::{Digest, Sha256};

use super::ParseError;

pub const CONDITION_LEN: usize = 32;
pub const FULFILLMENT_LEN: usize = 32;

/// A SHA-256 crypto-condition: the digest of a [`Fulfillment`] preimage.
///
/// [`Fulfillment`]: struct.Fulfillment.html
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Condition([u8; CONDITION_LEN]);

impl Condition {
    pub fn try_from(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.len() != CONDITION_LEN {
            return Err(ParseError::InvalidPacket(format!(
                "condition must be {} bytes",
                CONDITION_LEN,
            )));
        }
        let mut condition = [0; CONDITION_LEN];
        condition.copy_from_slice(bytes);
        Ok(Condition(condition))
    }
}

impl From<[u8; CONDITION_LEN]> for Condition {
    fn from(condition: [u8; CONDITION_LEN]) -> Self {
        Condition(condition)
    }
}

impl AsRef<[u8]> for Condition {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Condition({})", hex::encode(&self.0[..]))
    }
}

/// The 32-byte preimage of a [`Condition`].
///
/// [`Condition`]: struct.Condition.html
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Fulfillment([u8; FULFILLMENT_LEN]);

impl Fulfillment {
    pub fn try_from(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.len() != FULFILLMENT_LEN {
            return Err(ParseError::InvalidPacket(format!(
                "fulfillment must be {} bytes",
                FULFILLMENT_LEN,
            )));
        }
        let mut fulfillment = [0; FULFILLMENT_LEN];
        fulfillment.copy_from_slice(bytes);
        Ok(Fulfillment(fulfillment))
    }

    /// Returns the condition that this fulfillment satisfies.
    pub fn condition(&self) -> Condition {
        let digest = Sha256::digest(&self.0[..]);
        let mut condition = [0; CONDITION_LEN];
        condition.copy_from_slice(&digest[..]);
        Condition(condition)
    }

    pub fn validate(&self, condition: &Condition) -> bool {
        self.condition() == *condition
    }
}

impl From<[u8; FULFILLMENT_LEN]> for Fulfillment {
    fn from(fulfillment: [u8; FULFILLMENT_LEN]) -> Self {
        Fulfillment(fulfillment)
    }
}

impl AsRef<[u8]> for Fulfillment {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for Fulfillment {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Fulfillment({})", hex::encode(&self.0[..]))
    }
}
