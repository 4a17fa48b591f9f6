use std::fmt;

use super::ParseError;

/// The class of an ILP error, indicated by the first character of its code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    Final,
    Temporary,
    Relative,
    Unknown,
}

/// A three-character ILP error code, e.g. `"F06"`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode([u8; 3]);

impl ErrorCode {
    #[inline]
    pub fn new(bytes: [u8; 3]) -> Self {
        ErrorCode(bytes)
    }

    pub fn try_from(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.len() != 3 {
            return Err(ParseError::InvalidPacket(
                "error code must be 3 bytes".to_owned(),
            ));
        }
        let mut code = [0; 3];
        code.copy_from_slice(bytes);
        Ok(ErrorCode(code))
    }

    pub fn class(&self) -> ErrorClass {
        match self.0[0] {
            b'F' => ErrorClass::Final,
            b'T' => ErrorClass::Temporary,
            b'R' => ErrorClass::Relative,
            _ => ErrorClass::Unknown,
        }
    }
}

impl ErrorCode {
    pub const F00_BAD_REQUEST: ErrorCode = ErrorCode(*b"F00");
    pub const F01_INVALID_PACKET: ErrorCode = ErrorCode(*b"F01");
    pub const F02_UNREACHABLE: ErrorCode = ErrorCode(*b"F02");
    pub const F03_INVALID_AMOUNT: ErrorCode = ErrorCode(*b"F03");
    pub const F04_INSUFFICIENT_DESTINATION_AMOUNT: ErrorCode = ErrorCode(*b"F04");
    pub const F05_WRONG_CONDITION: ErrorCode = ErrorCode(*b"F05");
    pub const F06_UNEXPECTED_PAYMENT: ErrorCode = ErrorCode(*b"F06");
    pub const F07_CANNOT_RECEIVE: ErrorCode = ErrorCode(*b"F07");
    pub const F99_APPLICATION_ERROR: ErrorCode = ErrorCode(*b"F99");

    pub const T00_INTERNAL_ERROR: ErrorCode = ErrorCode(*b"T00");
    pub const T01_LEDGER_UNREACHABLE: ErrorCode = ErrorCode(*b"T01");
    pub const T02_LEDGER_BUSY: ErrorCode = ErrorCode(*b"T02");
    pub const T03_CONNECTOR_BUSY: ErrorCode = ErrorCode(*b"T03");
    pub const T04_INSUFFICIENT_LIQUIDITY: ErrorCode = ErrorCode(*b"T04");
    pub const T99_APPLICATION_ERROR: ErrorCode = ErrorCode(*b"T99");

    pub const R00_TRANSFER_TIMED_OUT: ErrorCode = ErrorCode(*b"R00");
    pub const R01_INSUFFICIENT_SOURCE_AMOUNT: ErrorCode = ErrorCode(*b"R01");
    pub const R02_INSUFFICIENT_TIMEOUT: ErrorCode = ErrorCode(*b"R02");
    pub const R99_APPLICATION_ERROR: ErrorCode = ErrorCode(*b"R99");
}

impl AsRef<[u8]> for ErrorCode {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "ErrorCode({})", self)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", String::from_utf8_lossy(&self.0[..]))
    }
}

#[cfg(test)]
mod test_error_code {
    use super::*;

    #[test]
    fn test_try_from() {
        assert_eq!(
            ErrorCode::try_from(b"F06").unwrap(),
            ErrorCode::F06_UNEXPECTED_PAYMENT,
        );
        assert!(ErrorCode::try_from(b"F0").is_err());
        assert!(ErrorCode::try_from(b"F066").is_err());
    }

    #[test]
    fn test_class() {
        assert_eq!(ErrorCode::F00_BAD_REQUEST.class(), ErrorClass::Final);
        assert_eq!(ErrorCode::T00_INTERNAL_ERROR.class(), ErrorClass::Temporary);
        assert_eq!(
            ErrorCode::R00_TRANSFER_TIMED_OUT.class(),
            ErrorClass::Relative,
        );
        assert_eq!(ErrorCode::new(*b"X00").class(), ErrorClass::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::F06_UNEXPECTED_PAYMENT.to_string(), "F06");
    }

    #[test]
    fn test_debug() {
        assert_eq!(
            format!("{:?}", ErrorCode::F06_UNEXPECTED_PAYMENT),
            "ErrorCode(F06)",
        );
    }
}
