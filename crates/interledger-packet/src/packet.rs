use std::fmt;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use bytes::{BufMut, BytesMut};
use chrono::{DateTime, Utc};

use super::ilqp::{
    QuoteByDestinationRequest, QuoteByDestinationResponse, QuoteBySourceRequest,
    QuoteBySourceResponse, QuoteLiquidityRequest, QuoteLiquidityResponse,
};
use super::oer::{self, BufOerExt, MutBufOerExt};
use super::{Addr, ErrorCode, ParseError};

const AMOUNT_LEN: usize = 8;
const EXTENSIBILITY_LEN: usize = 1;

/// The one-byte type code of an ILP packet envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketType {
    Payment = 1,
    QuoteLiquidityRequest = 2,
    QuoteLiquidityResponse = 3,
    QuoteBySourceRequest = 4,
    QuoteBySourceResponse = 5,
    QuoteByDestinationRequest = 6,
    QuoteByDestinationResponse = 7,
    Error = 8,
}

impl PacketType {
    pub fn try_from(byte: u8) -> Result<Self, ParseError> {
        match byte {
            1 => Ok(PacketType::Payment),
            2 => Ok(PacketType::QuoteLiquidityRequest),
            3 => Ok(PacketType::QuoteLiquidityResponse),
            4 => Ok(PacketType::QuoteBySourceRequest),
            5 => Ok(PacketType::QuoteBySourceResponse),
            6 => Ok(PacketType::QuoteByDestinationRequest),
            7 => Ok(PacketType::QuoteByDestinationResponse),
            8 => Ok(PacketType::Error),
            _ => Err(ParseError::InvalidPacket(format!(
                "unknown packet type: {}",
                byte,
            ))),
        }
    }
}

/// Verifies the envelope's type byte and returns `(contents_offset,
/// contents_len)`.
pub(crate) fn deserialize_envelope(
    packet_type: PacketType,
    buffer: &[u8],
) -> Result<(usize, usize), ParseError> {
    let mut reader = &buffer[..];
    let got_type = PacketType::try_from(reader.read_u8()?)?;
    if got_type != packet_type {
        return Err(ParseError::WrongType(format!(
            "expected packet type {:?}, got {:?}",
            packet_type, got_type,
        )));
    }
    let contents = reader.read_var_octet_string()?;
    let contents_offset = buffer.len() - reader.len() - contents.len();
    Ok((contents_offset, contents.len()))
}

/// Allocates a packet buffer and writes the envelope header (type byte and
/// contents length prefix). The caller writes exactly `contents_len` more
/// bytes.
pub(crate) fn serialize_envelope(packet_type: PacketType, contents_len: usize) -> BytesMut {
    let mut buffer = BytesMut::with_capacity(1 + oer::predict_var_octet_string(contents_len));
    buffer.put_u8(packet_type as u8);
    buffer.put_var_octet_string_length(contents_len);
    buffer
}

/// An ILP packet, dispatched on the envelope's type byte.
#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    Payment(Payment),
    QuoteLiquidityRequest(QuoteLiquidityRequest),
    QuoteLiquidityResponse(QuoteLiquidityResponse),
    QuoteBySourceRequest(QuoteBySourceRequest),
    QuoteBySourceResponse(QuoteBySourceResponse),
    QuoteByDestinationRequest(QuoteByDestinationRequest),
    QuoteByDestinationResponse(QuoteByDestinationResponse),
    Error(IlpError),
}

impl Packet {
    pub fn try_from(buffer: BytesMut) -> Result<Self, ParseError> {
        let packet_type = match buffer.first() {
            Some(&byte) => PacketType::try_from(byte)?,
            None => {
                return Err(ParseError::InvalidPacket("empty buffer".to_owned()));
            }
        };
        match packet_type {
            PacketType::Payment => Ok(Packet::Payment(Payment::try_from(buffer)?)),
            PacketType::QuoteLiquidityRequest => Ok(Packet::QuoteLiquidityRequest(
                QuoteLiquidityRequest::try_from(buffer)?,
            )),
            PacketType::QuoteLiquidityResponse => Ok(Packet::QuoteLiquidityResponse(
                QuoteLiquidityResponse::try_from(buffer)?,
            )),
            PacketType::QuoteBySourceRequest => Ok(Packet::QuoteBySourceRequest(
                QuoteBySourceRequest::try_from(buffer)?,
            )),
            PacketType::QuoteBySourceResponse => Ok(Packet::QuoteBySourceResponse(
                QuoteBySourceResponse::try_from(buffer)?,
            )),
            PacketType::QuoteByDestinationRequest => Ok(Packet::QuoteByDestinationRequest(
                QuoteByDestinationRequest::try_from(buffer)?,
            )),
            PacketType::QuoteByDestinationResponse => Ok(Packet::QuoteByDestinationResponse(
                QuoteByDestinationResponse::try_from(buffer)?,
            )),
            PacketType::Error => Ok(Packet::Error(IlpError::try_from(buffer)?)),
        }
    }
}

impl From<Packet> for BytesMut {
    fn from(packet: Packet) -> Self {
        match packet {
            Packet::Payment(packet) => packet.into(),
            Packet::QuoteLiquidityRequest(packet) => packet.into(),
            Packet::QuoteLiquidityResponse(packet) => packet.into(),
            Packet::QuoteBySourceRequest(packet) => packet.into(),
            Packet::QuoteBySourceResponse(packet) => packet.into(),
            Packet::QuoteByDestinationRequest(packet) => packet.into(),
            Packet::QuoteByDestinationResponse(packet) => packet.into(),
            Packet::Error(packet) => packet.into(),
        }
    }
}

/// A local-ledger payment packet, addressed to the receiver that should
/// fulfill it.
///
/// The packet is stored as its canonical serialization. `as_ref` exposes
/// those bytes verbatim, so reserializing a parsed payment is byte-exact.
/// Fulfillment generation depends on this.
#[derive(Clone, PartialEq)]
pub struct Payment {
    buffer: BytesMut,
    destination_amount: u64,
    destination_account_offset: usize,
    destination_account_len: usize,
    data_offset: usize,
    data_len: usize,
}

impl Payment {
    pub fn try_from(buffer: BytesMut) -> Result<Self, ParseError> {
        let (contents_offset, contents_len) =
            deserialize_envelope(PacketType::Payment, &buffer)?;
        let contents = &buffer[contents_offset..contents_offset + contents_len];
        let mut reader = contents;

        let destination_amount = reader.read_u64::<BigEndian>()?;

        let destination_account = reader.read_var_octet_string()?;
        Addr::try_from(destination_account)?;
        let destination_account_len = destination_account.len();
        let destination_account_offset =
            contents_offset + (contents.len() - reader.len()) - destination_account_len;

        let data = reader.read_var_octet_string()?;
        let data_len = data.len();
        let data_offset = contents_offset + (contents.len() - reader.len()) - data_len;

        // Trailing extensibility bytes are retained but not interpreted.
        Ok(Payment {
            buffer,
            destination_amount,
            destination_account_offset,
            destination_account_len,
            data_offset,
            data_len,
        })
    }

    #[inline]
    pub fn destination_amount(&self) -> u64 {
        self.destination_amount
    }

    #[inline]
    pub fn destination_account(&self) -> Addr {
        let begin = self.destination_account_offset;
        let end = begin + self.destination_account_len;
        Addr::try_from(&self.buffer[begin..end]).unwrap()
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buffer[self.data_offset..self.data_offset + self.data_len]
    }
}

impl AsRef<[u8]> for Payment {
    fn as_ref(&self) -> &[u8] {
        self.buffer.as_ref()
    }
}

impl From<Payment> for BytesMut {
    fn from(payment: Payment) -> Self {
        payment.buffer
    }
}

impl fmt::Debug for Payment {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("Payment")
            .field("destination_amount", &self.destination_amount())
            .field("destination_account", &self.destination_account())
            .field("data_length", &self.data_len)
            .finish()
    }
}

pub struct PaymentBuilder<'a> {
    pub destination_amount: u64,
    pub destination_account: Addr<'a>,
    pub data: &'a [u8],
}

impl<'a> PaymentBuilder<'a> {
    pub fn build(&self) -> Payment {
        let destination_account_len = self.destination_account.len();
        let contents_len = AMOUNT_LEN
            + oer::predict_var_octet_string(destination_account_len)
            + oer::predict_var_octet_string(self.data.len())
            + EXTENSIBILITY_LEN;

        let mut buffer = serialize_envelope(PacketType::Payment, contents_len);
        let envelope_len = buffer.len();
        buffer.put_u64(self.destination_amount);
        buffer.put_var_octet_string(self.destination_account.as_ref());
        buffer.put_var_octet_string(self.data);
        buffer.put_u8(0x00);

        let destination_account_offset = envelope_len
            + AMOUNT_LEN
            + oer::predict_var_octet_string(destination_account_len)
            - destination_account_len;
        let data_offset = destination_account_offset
            + destination_account_len
            + oer::predict_var_octet_string(self.data.len())
            - self.data.len();
        Payment {
            buffer,
            destination_amount: self.destination_amount,
            destination_account_offset,
            destination_account_len,
            data_offset,
            data_len: self.data.len(),
        }
    }
}

/// An ILP error packet (type 8), reporting why a payment was rejected.
#[derive(Clone, PartialEq)]
pub struct IlpError {
    buffer: BytesMut,
    code: ErrorCode,
    name_offset: usize,
    name_len: usize,
    triggered_by_offset: usize,
    triggered_by_len: usize,
    forwarded_by: Vec<(usize, usize)>,
    triggered_at: DateTime<Utc>,
    data_offset: usize,
    data_len: usize,
}

impl IlpError {
    pub fn try_from(buffer: BytesMut) -> Result<Self, ParseError> {
        let (contents_offset, contents_len) =
            deserialize_envelope(PacketType::Error, &buffer)?;
        let contents = &buffer[contents_offset..contents_offset + contents_len];
        let mut reader = contents;

        let mut code = [0; 3];
        reader.read_exact(&mut code[..])?;
        let code = ErrorCode::new(code);

        let name = reader.read_var_octet_string()?;
        let name_len = name.len();
        let name_offset = contents_offset + (contents.len() - reader.len()) - name_len;

        let triggered_by = reader.read_var_octet_string()?;
        Addr::try_from(triggered_by)?;
        let triggered_by_len = triggered_by.len();
        let triggered_by_offset =
            contents_offset + (contents.len() - reader.len()) - triggered_by_len;

        let forwarded_by_count = reader.read_var_uint()?;
        if forwarded_by_count > reader.len() as u64 {
            return Err(ParseError::InvalidPacket(
                "forwarded-by list longer than packet".to_owned(),
            ));
        }
        let mut forwarded_by = Vec::with_capacity(forwarded_by_count as usize);
        for _ in 0..forwarded_by_count {
            let address = reader.read_var_octet_string()?;
            Addr::try_from(address)?;
            let offset = contents_offset + (contents.len() - reader.len()) - address.len();
            forwarded_by.push((offset, address.len()));
        }

        let triggered_at = reader.read_generalized_time()?;

        let data = reader.read_var_octet_string()?;
        let data_len = data.len();
        let data_offset = contents_offset + (contents.len() - reader.len()) - data_len;

        Ok(IlpError {
            buffer,
            code,
            name_offset,
            name_len,
            triggered_by_offset,
            triggered_by_len,
            forwarded_by,
            triggered_at,
            data_offset,
            data_len,
        })
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    #[inline]
    pub fn name(&self) -> &[u8] {
        &self.buffer[self.name_offset..self.name_offset + self.name_len]
    }

    #[inline]
    pub fn triggered_by(&self) -> Addr {
        let begin = self.triggered_by_offset;
        let end = begin + self.triggered_by_len;
        Addr::try_from(&self.buffer[begin..end]).unwrap()
    }

    /// The connectors the error passed through on its way back to the
    /// sender, in order.
    pub fn forwarded_by(&self) -> impl Iterator<Item = Addr<'_>> + '_ {
        self.forwarded_by
            .iter()
            .map(move |&(offset, len)| Addr::try_from(&self.buffer[offset..offset + len]).unwrap())
    }

    #[inline]
    pub fn triggered_at(&self) -> DateTime<Utc> {
        self.triggered_at
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buffer[self.data_offset..self.data_offset + self.data_len]
    }
}

impl AsRef<[u8]> for IlpError {
    fn as_ref(&self) -> &[u8] {
        self.buffer.as_ref()
    }
}

impl From<IlpError> for BytesMut {
    fn from(error: IlpError) -> Self {
        error.buffer
    }
}

impl fmt::Debug for IlpError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("IlpError")
            .field("code", &self.code())
            .field("name", &String::from_utf8_lossy(self.name()))
            .field("triggered_by", &self.triggered_by())
            .field("triggered_at", &self.triggered_at())
            .field("data_length", &self.data_len)
            .finish()
    }
}

pub struct IlpErrorBuilder<'a> {
    pub code: ErrorCode,
    pub name: &'a [u8],
    pub triggered_by: Addr<'a>,
    pub forwarded_by: &'a [Addr<'a>],
    pub triggered_at: DateTime<Utc>,
    pub data: &'a [u8],
}

impl<'a> IlpErrorBuilder<'a> {
    pub fn build(&self) -> IlpError {
        let forwarded_by_len = self
            .forwarded_by
            .iter()
            .map(|address| oer::predict_var_octet_string(address.len()))
            .sum::<usize>();
        let contents_len = self.code.as_ref().len()
            + oer::predict_var_octet_string(self.name.len())
            + oer::predict_var_octet_string(self.triggered_by.len())
            + oer::predict_var_uint(self.forwarded_by.len() as u64)
            + forwarded_by_len
            + oer::GENERALIZED_TIME_LEN
            + oer::predict_var_octet_string(self.data.len())
            + EXTENSIBILITY_LEN;

        let mut buffer = serialize_envelope(PacketType::Error, contents_len);
        buffer.put_slice(self.code.as_ref());
        buffer.put_var_octet_string(self.name);
        buffer.put_var_octet_string(self.triggered_by.as_ref());
        buffer.put_var_uint(self.forwarded_by.len() as u64);
        for address in self.forwarded_by {
            buffer.put_var_octet_string(address.as_ref());
        }
        buffer.put_generalized_time(&self.triggered_at);
        buffer.put_var_octet_string(self.data);
        buffer.put_u8(0x00);

        IlpError::try_from(buffer).expect("serialized error packet is always valid")
    }
}



#[cfg(test)]
mod test_ilp_error {
    use chrono::TimeZone;

    use super::*;

    static ERROR_BYTES: &[u8] =
        b"\x08gF06\x12Unexpected Payment\x10example.receiver\x01\x02\x12example.connector1\
          \x12example.connector220180601160030.402Z\x03\x01\x02\x03\x00";

    fn triggered_at() -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &chrono::NaiveDate::from_ymd_opt(2018, 6, 1)
                .unwrap()
                .and_hms_milli_opt(16, 0, 30, 402)
                .unwrap(),
        )
    }

    fn ilp_error() -> IlpError {
        IlpError::try_from(BytesMut::from(ERROR_BYTES)).unwrap()
    }

    #[test]
    fn test_try_from() {
        let error = ilp_error();
        assert_eq!(error.code(), ErrorCode::F06_UNEXPECTED_PAYMENT);
        assert_eq!(error.name(), b"Unexpected Payment");
        assert_eq!(error.triggered_by(), Addr::new(b"example.receiver"));
        assert_eq!(
            error.forwarded_by().collect::<Vec<_>>(),
            vec![
                Addr::new(b"example.connector1"),
                Addr::new(b"example.connector2"),
            ],
        );
        assert_eq!(error.triggered_at(), triggered_at());
        assert_eq!(error.data(), b"\x01\x02\x03");
        assert_eq!(error.as_ref(), ERROR_BYTES);
    }

    #[test]
    fn test_try_from_oversized_forwarded_by() {
        // A forwarded-by count that cannot fit in the packet must not
        // preallocate.
        let error_bytes = &b"\x08\x19F00\x00\x0btest.sender\x08\xff\xff\xff\xff\xff\xff\xff\xff"[..];
        assert!(IlpError::try_from(BytesMut::from(error_bytes)).is_err());
    }

    #[test]
    fn test_build() {
        let error = IlpErrorBuilder {
            code: ErrorCode::F06_UNEXPECTED_PAYMENT,
            name: b"Unexpected Payment",
            triggered_by: Addr::new(b"example.receiver"),
            forwarded_by: &[
                Addr::new(b"example.connector1"),
                Addr::new(b"example.connector2"),
            ],
            triggered_at: triggered_at(),
            data: b"\x01\x02\x03",
        }
        .build();
        assert_eq!(error.as_ref(), ERROR_BYTES);
        assert_eq!(error, ilp_error());
    }

    #[test]
    fn test_build_empty_forwarded_by() {
        let error = IlpErrorBuilder {
            code: ErrorCode::T00_INTERNAL_ERROR,
            name: b"Internal Error",
            triggered_by: Addr::new(b"example.connector1"),
            forwarded_by: &[],
            triggered_at: triggered_at(),
            data: b"",
        }
        .build();
        assert_eq!(error.forwarded_by().count(), 0);
        assert_eq!(error, IlpError::try_from(BytesMut::from(error.as_ref())).unwrap());
    }
}
