use std::fmt;
use std::str;

use bytes::{BufMut, Bytes, BytesMut};
use quick_error::quick_error;

/// The maximum length (in bytes) of an ILP address.
pub const MAX_ADDRESS_LEN: usize = 1023;

quick_error! {
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum AddressError {
        InvalidLength(len: usize) {
            display("invalid address length {}", len)
        }
        InvalidScheme {
            display("invalid address allocation scheme")
        }
        InvalidSegment {
            display("invalid address segment")
        }
    }
}

/// A borrowed ILP address.
///
/// Addresses are a dot-separated allocation scheme followed by one or more
/// segments, at most [`MAX_ADDRESS_LEN`] bytes in total (see
/// interledger-rfcs/0015).
///
/// [`MAX_ADDRESS_LEN`]: constant.MAX_ADDRESS_LEN.html
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Addr<'a>(&'a [u8]);

impl<'a> Addr<'a> {
    /// # Panics
    ///
    /// Panics if the bytes are not a valid address. `try_from` is the
    /// fallible version.
    pub fn new(address: &'a [u8]) -> Self {
        match Addr::try_from(address) {
            Ok(addr) => addr,
            Err(error) => panic!("invalid address: {:?}: {}", address, error),
        }
    }

    pub fn try_from(address: &'a [u8]) -> Result<Self, AddressError> {
        validate_address(address)?;
        Ok(Addr(address))
    }

    /// # Safety
    ///
    /// The bytes must be a valid address.
    pub const unsafe fn new_unchecked(address: &'a [u8]) -> Self {
        Addr(address)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the allocation scheme and every segment, in order.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &'a [u8]> {
        self.0.split(|&byte| byte == b'.')
    }

    /// Returns a new `Address` with the given segment appended.
    pub fn with_suffix(&self, segment: &[u8]) -> Result<Address, AddressError> {
        let mut address = BytesMut::with_capacity(self.0.len() + 1 + segment.len());
        address.put_slice(self.0);
        address.put_u8(b'.');
        address.put_slice(segment);
        Address::try_from(address.freeze())
    }

    pub fn to_address(&self) -> Address {
        Address(Bytes::copy_from_slice(self.0))
    }
}

impl<'a> AsRef<[u8]> for Addr<'a> {
    fn as_ref(&self) -> &[u8] {
        self.0
    }
}

impl<'a> fmt::Debug for Addr<'a> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Addr({})", self)
    }
}

impl<'a> fmt::Display for Addr<'a> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        // Valid addresses are always ASCII.
        formatter.write_str(str::from_utf8(self.0).map_err(|_| fmt::Error)?)
    }
}

/// An owned ILP address.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address(Bytes);

impl Address {
    /// # Panics
    ///
    /// Panics if the bytes are not a valid address. `try_from` is the
    /// fallible version.
    pub fn new(address: &[u8]) -> Self {
        Addr::new(address).to_address()
    }

    pub fn try_from(address: Bytes) -> Result<Self, AddressError> {
        validate_address(address.as_ref())?;
        Ok(Address(address))
    }

    #[inline]
    pub fn as_addr(&self) -> Addr {
        Addr(self.0.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Addr<'_>> for Address {
    fn from(addr: Addr) -> Self {
        addr.to_address()
    }
}

impl From<Address> for Bytes {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Address({})", self.as_addr())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.as_addr(), formatter)
    }
}

fn validate_address(address: &[u8]) -> Result<(), AddressError> {
    if address.is_empty() || address.len() > MAX_ADDRESS_LEN {
        return Err(AddressError::InvalidLength(address.len()));
    }
    let mut segments = address.split(|&byte| byte == b'.');
    match segments.next() {
        Some(scheme) if validate_scheme(scheme) => {}
        _ => return Err(AddressError::InvalidScheme),
    }
    let mut segment_count = 0;
    for segment in segments {
        if !validate_segment(segment) {
            return Err(AddressError::InvalidSegment);
        }
        segment_count += 1;
    }
    // An allocation scheme alone is not an address.
    if segment_count == 0 {
        return Err(AddressError::InvalidSegment);
    }
    Ok(())
}

fn validate_scheme(segment: &[u8]) -> bool {
    match segment {
        b"g" | b"private" | b"example" | b"peer" | b"self" => true,
        b"test" | b"test1" | b"test2" | b"test3" | b"local" => true,
        _ => false,
    }
}

fn validate_segment(segment: &[u8]) -> bool {
    !segment.is_empty()
        && segment.iter().all(|&byte| {
            byte == b'-'
                || byte == b'_'
                || byte == b'~'
                || (b'A' <= byte && byte <= b'Z')
                || (b'a' <= byte && byte <= b'z')
                || (b'0' <= byte && byte <= b'9')
        })
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use bytes::Bytes;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::Address;

    impl Serialize for Address {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    struct AddressVisitor;

    impl<'de> de::Visitor<'de> for AddressVisitor {
        type Value = Address;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an ILP address")
        }

        fn visit_str<E>(self, string: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Address::try_from(Bytes::copy_from_slice(string.as_bytes()))
                .map_err(de::Error::custom)
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(AddressVisitor)
        }
    }
}
