//! # interledger-packet
//!
//! Interledger packet serialization/deserialization.
//!
//! # References
//!
//!   * <https://github.com/interledger/rfcs/blob/master/0003-interledger-protocol/0003-interledger-protocol.md>
//!   * <https://github.com/interledger/rfcs/blob/master/0011-interledger-payment-request/0011-interledger-payment-request.md>
//!

mod address;
pub mod btp;
mod condition;
mod error;
mod errors;
pub mod ilqp;
mod ipr;
pub mod oer;
mod packet;

pub use self::address::{Addr, Address, AddressError, MAX_ADDRESS_LEN};
pub use self::condition::{Condition, Fulfillment, CONDITION_LEN, FULFILLMENT_LEN};
pub use self::error::{ErrorClass, ErrorCode};
pub use self::errors::ParseError;
pub use self::ipr::InterledgerPaymentRequest;

pub use self::packet::{IlpError, Packet, PacketType, Payment};
pub use self::packet::{IlpErrorBuilder, PaymentBuilder};
