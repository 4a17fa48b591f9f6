//! Bilateral Transfer Protocol packets.
//!
//! BTP frames carry ILP packets (and other named side channels) between two
//! directly connected peers. Session and authentication state live in the
//! peers, not here.

use std::fmt;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use bytes::{BufMut, BytesMut};
use chrono::{DateTime, Utc};

use super::oer::{self, BufOerExt, MutBufOerExt};
use super::ParseError;

const REQUEST_ID_LEN: usize = 4;
const AMOUNT_LEN: usize = 8;
const CONTENT_TYPE_LEN: usize = 1;
const ERROR_CODE_LEN: usize = 3;

/// The one-byte type code of a BTP packet envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BtpPacketType {
    Response = 1,
    Error = 2,
    Message = 6,
    Transfer = 7,
}

impl BtpPacketType {
    pub fn try_from(byte: u8) -> Result<Self, ParseError> {
        match byte {
            1 => Ok(BtpPacketType::Response),
            2 => Ok(BtpPacketType::Error),
            6 => Ok(BtpPacketType::Message),
            7 => Ok(BtpPacketType::Transfer),
            _ => Err(ParseError::InvalidPacket(format!(
                "unknown btp packet type: {}",
                byte,
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ContentType {
    ApplicationOctetStream = 0,
    TextPlainUtf8 = 1,
    ApplicationJson = 2,
}

impl ContentType {
    pub fn try_from(byte: u8) -> Result<Self, ParseError> {
        match byte {
            0 => Ok(ContentType::ApplicationOctetStream),
            1 => Ok(ContentType::TextPlainUtf8),
            2 => Ok(ContentType::ApplicationJson),
            _ => Err(ParseError::InvalidPacket(format!(
                "unknown content type: {}",
                byte,
            ))),
        }
    }
}

/// One entry of a packet's protocol data: a named payload for a
/// sub-protocol between the two peers (e.g. `"ilp"` carrying an ILP
/// packet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProtocolData<'a> {
    pub protocol_name: &'a [u8],
    pub content_type: ContentType,
    pub data: &'a [u8],
}

#[derive(Clone, PartialEq)]
struct ProtocolDataOffsets {
    name_offset: usize,
    name_len: usize,
    content_type: ContentType,
    data_offset: usize,
    data_len: usize,
}

/// Parses a protocol data sequence. `reader` must be positioned within the
/// packet body that starts at `body_offset` (relative to the full packet
/// buffer) and spans `body_len` bytes.
fn read_protocol_data(
    body_offset: usize,
    body_len: usize,
    reader: &mut &[u8],
) -> Result<Vec<ProtocolDataOffsets>, ParseError> {
    let count = reader.read_var_uint()?;
    if count > reader.len() as u64 {
        return Err(ParseError::InvalidPacket(
            "protocol data count longer than packet".to_owned(),
        ));
    }
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = reader.read_var_octet_string()?;
        let name_offset = body_offset + (body_len - reader.len()) - name.len();
        let content_type = ContentType::try_from(reader.read_u8()?)?;
        let data = reader.read_var_octet_string()?;
        let data_offset = body_offset + (body_len - reader.len()) - data.len();
        entries.push(ProtocolDataOffsets {
            name_offset,
            name_len: name.len(),
            content_type,
            data_offset,
            data_len: data.len(),
        });
    }
    Ok(entries)
}

fn predict_protocol_data(protocol_data: &[ProtocolData]) -> usize {
    oer::predict_var_uint(protocol_data.len() as u64)
        + protocol_data
            .iter()
            .map(|entry| {
                oer::predict_var_octet_string(entry.protocol_name.len())
                    + CONTENT_TYPE_LEN
                    + oer::predict_var_octet_string(entry.data.len())
            })
            .sum::<usize>()
}

fn put_protocol_data<B: MutBufOerExt>(buffer: &mut B, protocol_data: &[ProtocolData]) {
    buffer.put_var_uint(protocol_data.len() as u64);
    for entry in protocol_data {
        buffer.put_var_octet_string(entry.protocol_name);
        buffer.put_u8(entry.content_type as u8);
        buffer.put_var_octet_string(entry.data);
    }
}

fn protocol_data_iter<'a>(
    buffer: &'a [u8],
    offsets: &'a [ProtocolDataOffsets],
) -> impl Iterator<Item = ProtocolData<'a>> + 'a {
    offsets.iter().map(move |offsets| ProtocolData {
        protocol_name: &buffer[offsets.name_offset..offsets.name_offset + offsets.name_len],
        content_type: offsets.content_type,
        data: &buffer[offsets.data_offset..offsets.data_offset + offsets.data_len],
    })
}

/// Verifies the envelope's type byte and returns `(request_id, body_offset,
/// body_len)`.
fn deserialize_envelope(
    packet_type: BtpPacketType,
    buffer: &[u8],
) -> Result<(u32, usize, usize), ParseError> {
    let mut reader = &buffer[..];
    let got_type = BtpPacketType::try_from(reader.read_u8()?)?;
    if got_type != packet_type {
        return Err(ParseError::WrongType(format!(
            "expected btp packet type {:?}, got {:?}",
            packet_type, got_type,
        )));
    }
    let request_id = reader.read_u32::<BigEndian>()?;
    let body = reader.read_var_octet_string()?;
    let body_offset = buffer.len() - reader.len() - body.len();
    Ok((request_id, body_offset, body.len()))
}

/// Allocates a packet buffer and writes the envelope header. The caller
/// writes exactly `body_len` more bytes.
fn serialize_envelope(packet_type: BtpPacketType, request_id: u32, body_len: usize) -> BytesMut {
    let mut buffer = BytesMut::with_capacity(
        1 + REQUEST_ID_LEN + oer::predict_var_octet_string(body_len),
    );
    buffer.put_u8(packet_type as u8);
    buffer.put_u32(request_id);
    buffer.put_var_octet_string_length(body_len);
    buffer
}

/// A BTP packet, dispatched on the envelope's type byte.
#[derive(Clone, Debug, PartialEq)]
pub enum BtpPacket {
    Response(BtpResponse),
    Error(BtpError),
    Message(BtpMessage),
    Transfer(BtpTransfer),
}

impl BtpPacket {
    pub fn try_from(buffer: BytesMut) -> Result<Self, ParseError> {
        let packet_type = match buffer.first() {
            Some(&byte) => BtpPacketType::try_from(byte)?,
            None => {
                return Err(ParseError::InvalidPacket("empty buffer".to_owned()));
            }
        };
        match packet_type {
            BtpPacketType::Response => Ok(BtpPacket::Response(BtpResponse::try_from(buffer)?)),
            BtpPacketType::Error => Ok(BtpPacket::Error(BtpError::try_from(buffer)?)),
            BtpPacketType::Message => Ok(BtpPacket::Message(BtpMessage::try_from(buffer)?)),
            BtpPacketType::Transfer => Ok(BtpPacket::Transfer(BtpTransfer::try_from(buffer)?)),
        }
    }

    pub fn request_id(&self) -> u32 {
        match self {
            BtpPacket::Response(packet) => packet.request_id(),
            BtpPacket::Error(packet) => packet.request_id(),
            BtpPacket::Message(packet) => packet.request_id(),
            BtpPacket::Transfer(packet) => packet.request_id(),
        }
    }
}

impl From<BtpPacket> for BytesMut {
    fn from(packet: BtpPacket) -> Self {
        match packet {
            BtpPacket::Response(packet) => packet.into(),
            BtpPacket::Error(packet) => packet.into(),
            BtpPacket::Message(packet) => packet.into(),
            BtpPacket::Transfer(packet) => packet.into(),
        }
    }
}

/// A request that expects a `BtpResponse` (or `BtpError`) with the same
/// request id.
#[derive(Clone, PartialEq)]
pub struct BtpMessage {
    buffer: BytesMut,
    request_id: u32,
    protocol_data: Vec<ProtocolDataOffsets>,
}

impl BtpMessage {
    pub fn try_from(buffer: BytesMut) -> Result<Self, ParseError> {
        let (request_id, body_offset, body_len) =
            deserialize_envelope(BtpPacketType::Message, &buffer)?;
        let mut reader = &buffer[body_offset..body_offset + body_len];
        let protocol_data = read_protocol_data(body_offset, body_len, &mut reader)?;
        Ok(BtpMessage {
            buffer,
            request_id,
            protocol_data,
        })
    }

    #[inline]
    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    pub fn protocol_data(&self) -> impl Iterator<Item = ProtocolData<'_>> + '_ {
        protocol_data_iter(self.buffer.as_ref(), &self.protocol_data[..])
    }
}

impl AsRef<[u8]> for BtpMessage {
    fn as_ref(&self) -> &[u8] {
        self.buffer.as_ref()
    }
}

impl From<BtpMessage> for BytesMut {
    fn from(packet: BtpMessage) -> Self {
        packet.buffer
    }
}

impl fmt::Debug for BtpMessage {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("BtpMessage")
            .field("request_id", &self.request_id)
            .field("protocol_data", &self.protocol_data().collect::<Vec<_>>())
            .finish()
    }
}

pub struct BtpMessageBuilder<'a> {
    pub request_id: u32,
    pub protocol_data: &'a [ProtocolData<'a>],
}

impl<'a> BtpMessageBuilder<'a> {
    pub fn build(&self) -> BtpMessage {
        let body_len = predict_protocol_data(self.protocol_data);
        let mut buffer = serialize_envelope(BtpPacketType::Message, self.request_id, body_len);
        put_protocol_data(&mut buffer, self.protocol_data);
        BtpMessage::try_from(buffer).expect("serialized message packet is always valid")
    }
}

/// The positive acknowledgement of a `BtpMessage` or `BtpTransfer`.
#[derive(Clone, PartialEq)]
pub struct BtpResponse {
    buffer: BytesMut,
    request_id: u32,
    protocol_data: Vec<ProtocolDataOffsets>,
}

impl BtpResponse {
    pub fn try_from(buffer: BytesMut) -> Result<Self, ParseError> {
        let (request_id, body_offset, body_len) =
            deserialize_envelope(BtpPacketType::Response, &buffer)?;
        let mut reader = &buffer[body_offset..body_offset + body_len];
        let protocol_data = read_protocol_data(body_offset, body_len, &mut reader)?;
        Ok(BtpResponse {
            buffer,
            request_id,
            protocol_data,
        })
    }

    #[inline]
    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    pub fn protocol_data(&self) -> impl Iterator<Item = ProtocolData<'_>> + '_ {
        protocol_data_iter(self.buffer.as_ref(), &self.protocol_data[..])
    }
}

impl AsRef<[u8]> for BtpResponse {
    fn as_ref(&self) -> &[u8] {
        self.buffer.as_ref()
    }
}

impl From<BtpResponse> for BytesMut {
    fn from(packet: BtpResponse) -> Self {
        packet.buffer
    }
}

impl fmt::Debug for BtpResponse {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("BtpResponse")
            .field("request_id", &self.request_id)
            .field("protocol_data", &self.protocol_data().collect::<Vec<_>>())
            .finish()
    }
}

pub struct BtpResponseBuilder<'a> {
    pub request_id: u32,
    pub protocol_data: &'a [ProtocolData<'a>],
}

impl<'a> BtpResponseBuilder<'a> {
    pub fn build(&self) -> BtpResponse {
        let body_len = predict_protocol_data(self.protocol_data);
        let mut buffer = serialize_envelope(BtpPacketType::Response, self.request_id, body_len);
        put_protocol_data(&mut buffer, self.protocol_data);
        BtpResponse::try_from(buffer).expect("serialized response packet is always valid")
    }
}

/// A transfer of `amount` units between the two peers' settlement
/// accounts.
#[derive(Clone, PartialEq)]
pub struct BtpTransfer {
    buffer: BytesMut,
    request_id: u32,
    amount: u64,
    protocol_data: Vec<ProtocolDataOffsets>,
}

impl BtpTransfer {
    pub fn try_from(buffer: BytesMut) -> Result<Self, ParseError> {
        let (request_id, body_offset, body_len) =
            deserialize_envelope(BtpPacketType::Transfer, &buffer)?;
        let mut reader = &buffer[body_offset..body_offset + body_len];
        let amount = reader.read_u64::<BigEndian>()?;
        let protocol_data = read_protocol_data(body_offset, body_len, &mut reader)?;
        Ok(BtpTransfer {
            buffer,
            request_id,
            amount,
            protocol_data,
        })
    }

    #[inline]
    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    #[inline]
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn protocol_data(&self) -> impl Iterator<Item = ProtocolData<'_>> + '_ {
        protocol_data_iter(self.buffer.as_ref(), &self.protocol_data[..])
    }
}

impl AsRef<[u8]> for BtpTransfer {
    fn as_ref(&self) -> &[u8] {
        self.buffer.as_ref()
    }
}

impl From<BtpTransfer> for BytesMut {
    fn from(packet: BtpTransfer) -> Self {
        packet.buffer
    }
}

impl fmt::Debug for BtpTransfer {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("BtpTransfer")
            .field("request_id", &self.request_id)
            .field("amount", &self.amount)
            .field("protocol_data", &self.protocol_data().collect::<Vec<_>>())
            .finish()
    }
}

pub struct BtpTransferBuilder<'a> {
    pub request_id: u32,
    pub amount: u64,
    pub protocol_data: &'a [ProtocolData<'a>],
}

impl<'a> BtpTransferBuilder<'a> {
    pub fn build(&self) -> BtpTransfer {
        let body_len = AMOUNT_LEN + predict_protocol_data(self.protocol_data);
        let mut buffer = serialize_envelope(BtpPacketType::Transfer, self.request_id, body_len);
        buffer.put_u64(self.amount);
        put_protocol_data(&mut buffer, self.protocol_data);
        BtpTransfer::try_from(buffer).expect("serialized transfer packet is always valid")
    }
}

/// The negative acknowledgement of a `BtpMessage` or `BtpTransfer`.
///
/// BTP error codes are their own namespace (e.g. `F00 NotAcceptedError`),
/// distinct from ILP error codes.
#[derive(Clone, PartialEq)]
pub struct BtpError {
    buffer: BytesMut,
    request_id: u32,
    code: [u8; ERROR_CODE_LEN],
    name_offset: usize,
    name_len: usize,
    triggered_at: DateTime<Utc>,
    data_offset: usize,
    data_len: usize,
    protocol_data: Vec<ProtocolDataOffsets>,
}

impl BtpError {
    pub fn try_from(buffer: BytesMut) -> Result<Self, ParseError> {
        let (request_id, body_offset, body_len) =
            deserialize_envelope(BtpPacketType::Error, &buffer)?;
        let body = &buffer[body_offset..body_offset + body_len];
        let mut reader = body;

        let mut code = [0; ERROR_CODE_LEN];
        reader.read_exact(&mut code[..])?;

        let name = reader.read_var_octet_string()?;
        let name_len = name.len();
        let name_offset = body_offset + (body.len() - reader.len()) - name_len;

        let triggered_at = reader.read_generalized_time()?;

        let data = reader.read_var_octet_string()?;
        let data_len = data.len();
        let data_offset = body_offset + (body.len() - reader.len()) - data_len;

        let protocol_data = read_protocol_data(body_offset, body_len, &mut reader)?;

        Ok(BtpError {
            buffer,
            request_id,
            code,
            name_offset,
            name_len,
            triggered_at,
            data_offset,
            data_len,
            protocol_data,
        })
    }

    #[inline]
    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    #[inline]
    pub fn code(&self) -> [u8; ERROR_CODE_LEN] {
        self.code
    }

    #[inline]
    pub fn name(&self) -> &[u8] {
        &self.buffer[self.name_offset..self.name_offset + self.name_len]
    }

    #[inline]
    pub fn triggered_at(&self) -> DateTime<Utc> {
        self.triggered_at
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buffer[self.data_offset..self.data_offset + self.data_len]
    }

    pub fn protocol_data(&self) -> impl Iterator<Item = ProtocolData<'_>> + '_ {
        protocol_data_iter(self.buffer.as_ref(), &self.protocol_data[..])
    }
}

impl AsRef<[u8]> for BtpError {
    fn as_ref(&self) -> &[u8] {
        self.buffer.as_ref()
    }
}

impl From<BtpError> for BytesMut {
    fn from(packet: BtpError) -> Self {
        packet.buffer
    }
}

impl fmt::Debug for BtpError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("BtpError")
            .field("request_id", &self.request_id)
            .field("code", &String::from_utf8_lossy(&self.code[..]))
            .field("name", &String::from_utf8_lossy(self.name()))
            .field("triggered_at", &self.triggered_at)
            .field("data_length", &self.data_len)
            .field("protocol_data", &self.protocol_data().collect::<Vec<_>>())
            .finish()
    }
}

pub struct BtpErrorBuilder<'a> {
    pub request_id: u32,
    pub code: [u8; ERROR_CODE_LEN],
    pub name: &'a [u8],
    pub triggered_at: DateTime<Utc>,
    pub data: &'a [u8],
    pub protocol_data: &'a [ProtocolData<'a>],
}

impl<'a> BtpErrorBuilder<'a> {
    pub fn build(&self) -> BtpError {
        let body_len = ERROR_CODE_LEN
            + oer::predict_var_octet_string(self.name.len())
            + oer::GENERALIZED_TIME_LEN
            + oer::predict_var_octet_string(self.data.len())
            + predict_protocol_data(self.protocol_data);
        let mut buffer = serialize_envelope(BtpPacketType::Error, self.request_id, body_len);
        buffer.put_slice(&self.code[..]);
        buffer.put_var_octet_string(self.name);
        buffer.put_generalized_time(&self.triggered_at);
        buffer.put_var_octet_string(self.data);
        put_protocol_data(&mut buffer, self.protocol_data);
        BtpError::try_from(buffer).expect("serialized error packet is always valid")
    }
}

#[cfg(test)]
mod test_btp {
    use chrono::TimeZone;

    use super::*;

    static PAYMENT_BYTES: &[u8] =
        b"\x01\x1d\x00\x00\x00\x00\x00\x00\x00k\x0dexample.alice\x05hello\x00";

    static MESSAGE_BYTES: &[u8] =
        b"\x06\x00\x00\x00\x019\x01\x02\x03ilp\x00\x1f\x01\x1d\x00\x00\x00\x00\x00\x00\x00k\
          \x0dexample.alice\x05hello\x00\x02to\x01\x0dexample.alice";

    static RESPONSE_BYTES: &[u8] = b"\x01\x00\x00\x00\x01\x0c\x01\x01\x03ilp\x00\x04\x0d\x02\x04\x00";

    static TRANSFER_BYTES: &[u8] =
        b"\x07\x00\x00\x00\x07/\x00\x00\x00\x00\x00\x00\x03\xe8\x01\x01\x03ilp\x00\x1f\
          \x01\x1d\x00\x00\x00\x00\x00\x00\x00k\x0dexample.alice\x05hello\x00";

    static ERROR_BYTES: &[u8] =
        b"\x02\x00\x00\x00\x02,F00\x10NotAcceptedError20180601160030.402Z\x02\x09\x08\x01\x00";

    fn triggered_at() -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &chrono::NaiveDate::from_ymd_opt(2018, 6, 1)
                .unwrap()
                .and_hms_milli_opt(16, 0, 30, 402)
                .unwrap(),
        )
    }

    fn message_protocol_data() -> Vec<ProtocolData<'static>> {
        vec![
            ProtocolData {
                protocol_name: b"ilp",
                content_type: ContentType::ApplicationOctetStream,
                data: PAYMENT_BYTES,
            },
            ProtocolData {
                protocol_name: b"to",
                content_type: ContentType::TextPlainUtf8,
                data: b"example.alice",
            },
        ]
    }

    #[test]
    fn test_message_try_from() {
        let message = BtpMessage::try_from(BytesMut::from(MESSAGE_BYTES)).unwrap();
        assert_eq!(message.request_id(), 1);
        assert_eq!(
            message.protocol_data().collect::<Vec<_>>(),
            message_protocol_data(),
        );
        assert_eq!(message.as_ref(), MESSAGE_BYTES);
    }

    #[test]
    fn test_message_build() {
        let message = BtpMessageBuilder {
            request_id: 1,
            protocol_data: &message_protocol_data()[..],
        }
        .build();
        assert_eq!(message.as_ref(), MESSAGE_BYTES);
    }

    #[test]
    fn test_message_try_from_unknown_content_type() {
        let mut message_bytes = BytesMut::from(MESSAGE_BYTES);
        // The first entry's content type byte.
        message_bytes[12] = 0x03;
        assert!(BtpMessage::try_from(message_bytes).is_err());
    }

    #[test]
    fn test_message_try_from_truncated() {
        for len in 0..MESSAGE_BYTES.len() {
            assert!(BtpMessage::try_from(BytesMut::from(&MESSAGE_BYTES[..len])).is_err());
        }
    }

    #[test]
    fn test_response_try_from() {
        let response = BtpResponse::try_from(BytesMut::from(RESPONSE_BYTES)).unwrap();
        assert_eq!(response.request_id(), 1);
        assert_eq!(
            response.protocol_data().collect::<Vec<_>>(),
            vec![ProtocolData {
                protocol_name: b"ilp",
                content_type: ContentType::ApplicationOctetStream,
                data: b"\x0d\x02\x04\x00",
            }],
        );
        assert_eq!(response.as_ref(), RESPONSE_BYTES);
    }

    #[test]
    fn test_response_build() {
        let response = BtpResponseBuilder {
            request_id: 1,
            protocol_data: &[ProtocolData {
                protocol_name: b"ilp",
                content_type: ContentType::ApplicationOctetStream,
                data: b"\x0d\x02\x04\x00",
            }],
        }
        .build();
        assert_eq!(response.as_ref(), RESPONSE_BYTES);
    }

    #[test]
    fn test_transfer_try_from() {
        let transfer = BtpTransfer::try_from(BytesMut::from(TRANSFER_BYTES)).unwrap();
        assert_eq!(transfer.request_id(), 7);
        assert_eq!(transfer.amount(), 1000);
        assert_eq!(
            transfer.protocol_data().collect::<Vec<_>>(),
            vec![ProtocolData {
                protocol_name: b"ilp",
                content_type: ContentType::ApplicationOctetStream,
                data: PAYMENT_BYTES,
            }],
        );
        assert_eq!(transfer.as_ref(), TRANSFER_BYTES);
    }

    #[test]
    fn test_transfer_build() {
        let transfer = BtpTransferBuilder {
            request_id: 7,
            amount: 1000,
            protocol_data: &[ProtocolData {
                protocol_name: b"ilp",
                content_type: ContentType::ApplicationOctetStream,
                data: PAYMENT_BYTES,
            }],
        }
        .build();
        assert_eq!(transfer.as_ref(), TRANSFER_BYTES);
    }

    #[test]
    fn test_error_try_from() {
        let error = BtpError::try_from(BytesMut::from(ERROR_BYTES)).unwrap();
        assert_eq!(error.request_id(), 2);
        assert_eq!(error.code(), *b"F00");
        assert_eq!(error.name(), b"NotAcceptedError");
        assert_eq!(error.triggered_at(), triggered_at());
        assert_eq!(error.data(), b"\x09\x08");
        assert_eq!(error.protocol_data().count(), 0);
        assert_eq!(error.as_ref(), ERROR_BYTES);
    }

    #[test]
    fn test_error_build() {
        let error = BtpErrorBuilder {
            request_id: 2,
            code: *b"F00",
            name: b"NotAcceptedError",
            triggered_at: triggered_at(),
            data: b"\x09\x08",
            protocol_data: &[],
        }
        .build();
        assert_eq!(error.as_ref(), ERROR_BYTES);
    }

    #[test]
    fn test_packet_try_from() {
        let packet = BtpPacket::try_from(BytesMut::from(MESSAGE_BYTES)).unwrap();
        assert_eq!(packet.request_id(), 1);
        match &packet {
            BtpPacket::Message(message) => assert_eq!(message.request_id(), 1),
            packet => panic!("unexpected packet: {:?}", packet),
        }
        assert_eq!(BytesMut::from(packet).as_ref(), MESSAGE_BYTES);
    }

    #[test]
    fn test_packet_try_from_invalid() {
        assert!(BtpPacket::try_from(BytesMut::new()).is_err());
        // Type 3 is not a BTP packet type.
        assert!(BtpPacket::try_from(BytesMut::from(&b"\x03\x00\x00\x00\x01\x00"[..])).is_err());
    }

    #[test]
    fn test_wrong_type() {
        assert!(matches!(
            BtpResponse::try_from(BytesMut::from(MESSAGE_BYTES)),
            Err(ParseError::WrongType(_)),
        ));
    }
}
