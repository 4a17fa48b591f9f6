use byteorder::ReadBytesExt;
use bytes::{BufMut, BytesMut};

use super::oer::BufOerExt;
use super::{Condition, ParseError, Payment, CONDITION_LEN};

/// The version byte prefixing every encoded payment request.
const IPR_VERSION: u8 = 2;

/// An Interledger Payment Request: the payment a receiver expects, plus the
/// condition its fulfillment must hash to.
///
/// The receiver builds one of these during setup and hands it to the sender
/// out of band.
#[derive(Clone, Debug, PartialEq)]
pub struct InterledgerPaymentRequest {
    payment: Payment,
    condition: Condition,
}

impl InterledgerPaymentRequest {
    pub fn new(payment: Payment, condition: Condition) -> Self {
        InterledgerPaymentRequest { payment, condition }
    }

    pub fn try_from(buffer: BytesMut) -> Result<Self, ParseError> {
        let mut reader = &buffer[..];
        let version = reader.read_u8()?;
        if version != IPR_VERSION {
            return Err(ParseError::InvalidPacket(format!(
                "unsupported ipr version: {}",
                version,
            )));
        }

        // The payment envelope is self-delimiting.
        let payment_offset = buffer.len() - reader.len();
        let mut rest = reader;
        rest.skip(1)?;
        rest.skip_var_octet_string()?;
        let payment_len = reader.len() - rest.len();
        let payment_bytes = &buffer[payment_offset..payment_offset + payment_len];
        let payment = Payment::try_from(BytesMut::from(payment_bytes))?;

        let condition = Condition::try_from(rest)?;
        Ok(InterledgerPaymentRequest { payment, condition })
    }

    #[inline]
    pub fn payment(&self) -> &Payment {
        &self.payment
    }

    #[inline]
    pub fn into_payment(self) -> Payment {
        self.payment
    }

    #[inline]
    pub fn condition(&self) -> Condition {
        self.condition
    }
}

impl From<InterledgerPaymentRequest> for BytesMut {
    fn from(ipr: InterledgerPaymentRequest) -> Self {
        let payment = ipr.payment.as_ref();
        let mut buffer = BytesMut::with_capacity(1 + payment.len() + CONDITION_LEN);
        buffer.put_u8(IPR_VERSION);
        buffer.put_slice(payment);
        buffer.put_slice(ipr.condition.as_ref());
        buffer
    }
}
