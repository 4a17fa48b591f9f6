use std::cmp;
use std::mem;
use std::str;

use byteorder::{BigEndian, ReadBytesExt};
use bytes::BufMut;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use super::ParseError;

const HIGH_BIT: u8 = 0x80;
const LOWER_SEVEN_BITS: u8 = 0x7f;

/// Timestamps are ASN.1 GeneralizedTime with millisecond precision, e.g.
/// `"20170101000000.000Z"`.
pub const GENERALIZED_TIME_LEN: usize = 19;

static GENERALIZED_TIME_FORMAT: &'static str = "%Y%m%d%H%M%S%.3fZ";

/// Returns the size (in bytes) of the buffer that encodes a variable-length
/// octet string of `length` bytes.
#[inline]
pub fn predict_var_octet_string(length: usize) -> usize {
    if length < 128 {
        1 + length
    } else {
        1 + predict_uint(length as u64) + length
    }
}

/// Returns the size (in bytes) of the buffer that encodes a variable-length
/// unsigned integer.
#[inline]
pub fn predict_var_uint(value: u64) -> usize {
    1 + predict_uint(value)
}

/// The number of bytes in the minimal big-endian encoding of `value`.
#[inline]
fn predict_uint(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    cmp::max(1, (bits + 7) / 8)
}

pub trait BufOerExt<'a> {
    fn peek_var_octet_string(&self) -> Result<&'a [u8], ParseError>;
    fn read_var_octet_string(&mut self) -> Result<&'a [u8], ParseError>;
    fn skip(&mut self, discard_bytes: usize) -> Result<(), ParseError>;
    fn skip_var_octet_string(&mut self) -> Result<(), ParseError>;
    fn read_var_octet_string_length(&mut self) -> Result<usize, ParseError>;
    fn read_var_uint(&mut self) -> Result<u64, ParseError>;
    fn read_generalized_time(&mut self) -> Result<DateTime<Utc>, ParseError>;
}

impl<'a> BufOerExt<'a> for &'a [u8] {
    /// Decodes a variable-length octet string without consuming it.
    #[inline]
    fn peek_var_octet_string(&self) -> Result<&'a [u8], ParseError> {
        let mut peek = *self;
        peek.read_var_octet_string()
    }

    /// Decodes a variable-length octet string, advancing past it.
    #[inline]
    fn read_var_octet_string(&mut self) -> Result<&'a [u8], ParseError> {
        let actual_length = self.read_var_octet_string_length()?;
        if self.len() < actual_length {
            return Err(ParseError::InvalidPacket(format!(
                "variable octet string too short: expected {} bytes, got {}",
                actual_length,
                self.len(),
            )));
        }
        let (data, rest) = self.split_at(actual_length);
        *self = rest;
        Ok(data)
    }

    #[inline]
    fn skip(&mut self, discard_bytes: usize) -> Result<(), ParseError> {
        if self.len() < discard_bytes {
            return Err(ParseError::InvalidPacket(
                "cannot skip past end of buffer".to_owned(),
            ));
        }
        *self = &self[discard_bytes..];
        Ok(())
    }

    #[inline]
    fn skip_var_octet_string(&mut self) -> Result<(), ParseError> {
        let length = self.read_var_octet_string_length()?;
        self.skip(length)
    }

    /// Decodes the length prefix of a variable-length octet string,
    /// advancing past the prefix.
    fn read_var_octet_string_length(&mut self) -> Result<usize, ParseError> {
        let length = self.read_u8()?;
        if length & HIGH_BIT != 0 {
            let length_prefix_length = (length & LOWER_SEVEN_BITS) as usize;
            if length_prefix_length == 0 {
                return Err(ParseError::InvalidPacket(
                    "indefinite lengths are not allowed".to_owned(),
                ));
            }
            if length_prefix_length > mem::size_of::<usize>() {
                return Err(ParseError::InvalidPacket(
                    "length prefix too large".to_owned(),
                ));
            }
            Ok(self.read_uint::<BigEndian>(length_prefix_length)? as usize)
        } else {
            Ok(length as usize)
        }
    }

    /// Decodes a variable-length unsigned integer of at most 8 bytes.
    fn read_var_uint(&mut self) -> Result<u64, ParseError> {
        let size = self.read_var_octet_string_length()?;
        if size == 0 || size > mem::size_of::<u64>() {
            return Err(ParseError::InvalidPacket(
                "var uint must be 1..=8 bytes".to_owned(),
            ));
        }
        Ok(self.read_uint::<BigEndian>(size)?)
    }

    fn read_generalized_time(&mut self) -> Result<DateTime<Utc>, ParseError> {
        if self.len() < GENERALIZED_TIME_LEN {
            return Err(ParseError::InvalidPacket(
                "generalized time too short".to_owned(),
            ));
        }
        let (time_bytes, rest) = self.split_at(GENERALIZED_TIME_LEN);
        *self = rest;
        let naive =
            NaiveDateTime::parse_from_str(str::from_utf8(time_bytes)?, GENERALIZED_TIME_FORMAT)?;
        Ok(Utc.from_utc_datetime(&naive))
    }
}

pub trait MutBufOerExt: BufMut + Sized {
    /// Encodes bytes as a variable-length octet string.
    #[inline]
    fn put_var_octet_string(&mut self, string: &[u8]) {
        self.put_var_octet_string_length(string.len());
        self.put_slice(string);
    }

    #[inline]
    fn put_var_octet_string_length(&mut self, length: usize) {
        if length < 128 {
            self.put_u8(length as u8);
        } else {
            let length_of_length = predict_uint(length as u64);
            self.put_u8(HIGH_BIT | length_of_length as u8);
            self.put_uint(length as u64, length_of_length);
        }
    }

    /// Encodes a `u64` as a variable-length unsigned integer.
    #[inline]
    fn put_var_uint(&mut self, uint: u64) {
        let size = predict_uint(uint);
        self.put_u8(size as u8);
        self.put_uint(uint, size);
    }

    /// Encodes a timestamp as a 19-byte GeneralizedTime.
    #[inline]
    fn put_generalized_time(&mut self, time: &DateTime<Utc>) {
        let formatted = time.format(GENERALIZED_TIME_FORMAT).to_string();
        debug_assert_eq!(formatted.len(), GENERALIZED_TIME_LEN);
        self.put_slice(formatted.as_bytes());
    }
}

impl<B: BufMut + Sized> MutBufOerExt for B {}

#[cfg(test)]
mod test_buf_oer_ext {
    use super::*;

    #[test]
    fn test_peek_var_octet_string() {
        let buffer = b"\x02\x03\x04\x05";
        let mut reader = &buffer[..];
        assert_eq!(reader.peek_var_octet_string().unwrap(), b"\x03\x04");
        // A peek does not advance the reader.
        assert_eq!(reader, buffer);
    }

    #[test]
    fn test_read_var_octet_string() {
        let mut empty = &b"\x00"[..];
        assert_eq!(empty.read_var_octet_string().unwrap(), b"");
        assert!(empty.is_empty());

        let mut short = &b"\x02\x01\x02\xff"[..];
        assert_eq!(short.read_var_octet_string().unwrap(), b"\x01\x02");
        assert_eq!(short, b"\xff");

        // 256 bytes takes the long form with a 2-byte length.
        let mut long_buffer = vec![0x82, 0x01, 0x00];
        long_buffer.extend_from_slice(&[0x0a; 256]);
        let mut long = &long_buffer[..];
        assert_eq!(long.read_var_octet_string().unwrap(), &[0x0a; 256][..]);
        assert!(long.is_empty());

        let mut truncated = &b"\x05\x01\x02"[..];
        assert!(truncated.read_var_octet_string().is_err());
        let mut indefinite = &b"\x80\x01"[..];
        assert!(indefinite.read_var_octet_string().is_err());
    }

    #[test]
    fn test_skip() {
        let mut reader = &b"\x01\x02\x03"[..];
        reader.skip(2).unwrap();
        assert_eq!(reader, b"\x03");
        assert!(reader.skip(2).is_err());
    }

    #[test]
    fn test_skip_var_octet_string() {
        let mut reader = &b"\x02\x0a\x0b\xff"[..];
        reader.skip_var_octet_string().unwrap();
        assert_eq!(reader, b"\xff");
    }

    #[test]
    fn test_read_var_uint() {
        let mut reader = &b"\x01\x00"[..];
        assert_eq!(reader.read_var_uint().unwrap(), 0);
        let mut reader = &b"\x01\xff"[..];
        assert_eq!(reader.read_var_uint().unwrap(), 0xff);
        let mut reader = &b"\x02\x01\x00"[..];
        assert_eq!(reader.read_var_uint().unwrap(), 0x0100);
        let mut reader = &b"\x08\xff\xff\xff\xff\xff\xff\xff\xff"[..];
        assert_eq!(reader.read_var_uint().unwrap(), u64::max_value());

        let mut zero_length = &b"\x00"[..];
        assert!(zero_length.read_var_uint().is_err());
        let mut too_long = &b"\x09\x00\x00\x00\x00\x00\x00\x00\x00\x01"[..];
        assert!(too_long.read_var_uint().is_err());
    }

    #[test]
    fn test_read_generalized_time() {
        let mut reader = &b"20170101000000.000Z"[..];
        let time = reader.read_generalized_time().unwrap();
        assert!(reader.is_empty());
        assert_eq!(
            time,
            Utc.from_utc_datetime(
                &chrono::NaiveDate::from_ymd_opt(2017, 1, 1)
                    .unwrap()
                    .and_hms_milli_opt(0, 0, 0, 0)
                    .unwrap(),
            ),
        );

        let mut not_a_time = &b"2017010100000z.000Z"[..];
        assert!(not_a_time.read_generalized_time().is_err());
        let mut too_short = &b"20170101"[..];
        assert!(too_short.read_generalized_time().is_err());
    }
}
