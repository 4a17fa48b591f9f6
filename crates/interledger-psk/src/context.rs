//! Role-scoped key material for one payment flow.
//!
//! A receiver derives everything from its long-lived local secret and a per
//! flow token. A sender starts from the 32 byte shared key it was handed
//! out-of-band (usually inside a receiver address) and can encrypt, decrypt,
//! and generate fulfillments, but has no token or receiver id of its own.

use std::fmt;

use bytes::BytesMut;
use rand::{CryptoRng, RngCore};

use crate::crypto;
use crate::reader;
use crate::writer;
use crate::{PskError, PskMessage};

pub const SECRET_LEN: usize = 32;
pub const TOKEN_LEN: usize = 16;
pub const RECEIVER_ID_LEN: usize = 8;
pub const SHARED_KEY_LEN: usize = 32;
pub const ENCRYPTION_KEY_LEN: usize = 32;
pub const FULFILLMENT_KEY_LEN: usize = 32;

static PSK_RECEIVER_ID: &'static [u8] = b"ilp_psk_receiver_id";
static PSK_GENERATION: &'static [u8] = b"ilp_psk_generation";
static PSK_ENCRYPTION: &'static [u8] = b"ilp_key_encryption";
static PSK_CONDITION: &'static [u8] = b"ilp_psk_condition";

// Unpadded base64url lengths of the receiver address segment's two halves.
const RECEIVER_ID_B64_LEN: usize = 11;
const TOKEN_B64_LEN: usize = 22;

#[derive(Clone)]
struct SessionKeys {
    shared_key: [u8; SHARED_KEY_LEN],
    encryption_key: [u8; ENCRYPTION_KEY_LEN],
    fulfillment_key: [u8; FULFILLMENT_KEY_LEN],
}

impl SessionKeys {
    fn derive(shared_key: [u8; SHARED_KEY_LEN]) -> Self {
        SessionKeys {
            encryption_key: crypto::hmac_sha256(&shared_key, PSK_ENCRYPTION),
            fulfillment_key: crypto::hmac_sha256(&shared_key, PSK_CONDITION),
            shared_key,
        }
    }
}

#[derive(Clone)]
pub enum PskContext {
    Sender(SenderContext),
    Receiver(ReceiverContext),
}

#[derive(Clone)]
pub struct SenderContext {
    keys: SessionKeys,
}

#[derive(Clone)]
pub struct ReceiverContext {
    keys: SessionKeys,
    token: [u8; TOKEN_LEN],
    receiver_id: [u8; RECEIVER_ID_LEN],
}

impl PskContext {
    /// A receiver context with a fresh CSPRNG token.
    pub fn seed<R>(secret: &[u8], rng: &mut R) -> Result<Self, PskError>
    where
        R: CryptoRng + RngCore,
    {
        let mut token = [0; TOKEN_LEN];
        rng.fill_bytes(&mut token);
        PskContext::from_token(secret, &token)
    }

    /// A receiver context with a caller-supplied token.
    pub fn from_token(secret: &[u8], token: &[u8]) -> Result<Self, PskError> {
        if secret.len() != SECRET_LEN {
            return Err(PskError::InvalidKeyMaterial("secret must be 32 bytes"));
        }
        if token.len() != TOKEN_LEN {
            return Err(PskError::InvalidKeyMaterial("token must be 16 bytes"));
        }
        let generator = crypto::hmac_sha256(secret, PSK_GENERATION);
        let shared_key = crypto::hmac_sha256(&generator, token);
        let mut token_bytes = [0; TOKEN_LEN];
        token_bytes.copy_from_slice(token);
        Ok(PskContext::Receiver(ReceiverContext {
            keys: SessionKeys::derive(shared_key),
            token: token_bytes,
            receiver_id: derive_receiver_id(secret),
        }))
    }

    /// Recovers a receiver context from an address generated by
    /// [`PskContext::generate_receiver_address`].
    ///
    /// The address's final segment carries the receiver id and the token.
    /// The receiver id is recomputed from `secret` and must match the
    /// segment.
    pub fn from_receiver_address(secret: &[u8], address: ilp::Addr) -> Result<Self, PskError> {
        if secret.len() != SECRET_LEN {
            return Err(PskError::InvalidKeyMaterial("secret must be 32 bytes"));
        }
        let segment = address
            .segments()
            .next_back()
            .expect("addresses always have at least one segment");
        if segment.len() != RECEIVER_ID_B64_LEN + TOKEN_B64_LEN {
            return Err(PskError::AddressMismatch);
        }
        let (receiver_id, token) = segment.split_at(RECEIVER_ID_B64_LEN);
        let receiver_id = base64::decode_config(receiver_id, base64::URL_SAFE_NO_PAD)
            .map_err(|_| PskError::AddressMismatch)?;
        let token = base64::decode_config(token, base64::URL_SAFE_NO_PAD)
            .map_err(|_| PskError::AddressMismatch)?;
        if receiver_id[..] != derive_receiver_id(secret)[..] {
            return Err(PskError::AddressMismatch);
        }
        PskContext::from_token(secret, &token)
    }

    /// A sender context, directly from the 32 byte shared key.
    pub fn from_pre_shared_key(shared_key: &[u8]) -> Result<Self, PskError> {
        if shared_key.len() != SHARED_KEY_LEN {
            return Err(PskError::InvalidKeyMaterial("shared key must be 32 bytes"));
        }
        let mut key = [0; SHARED_KEY_LEN];
        key.copy_from_slice(shared_key);
        Ok(PskContext::Sender(SenderContext {
            keys: SessionKeys::derive(key),
        }))
    }

    fn keys(&self) -> &SessionKeys {
        match self {
            PskContext::Sender(sender) => &sender.keys,
            PskContext::Receiver(receiver) => &receiver.keys,
        }
    }

    #[inline]
    pub fn shared_key(&self) -> &[u8; SHARED_KEY_LEN] {
        &self.keys().shared_key
    }

    #[inline]
    pub(crate) fn encryption_key(&self) -> &[u8; ENCRYPTION_KEY_LEN] {
        &self.keys().encryption_key
    }

    pub fn token(&self) -> Result<&[u8; TOKEN_LEN], PskError> {
        match self {
            PskContext::Sender(_) => {
                Err(PskError::RoleMismatch("sender contexts have no token"))
            }
            PskContext::Receiver(receiver) => Ok(&receiver.token),
        }
    }

    pub fn receiver_id(&self) -> Result<&[u8; RECEIVER_ID_LEN], PskError> {
        match self {
            PskContext::Sender(_) => {
                Err(PskError::RoleMismatch("sender contexts have no receiver id"))
            }
            PskContext::Receiver(receiver) => Ok(&receiver.receiver_id),
        }
    }

    /// Appends `base64url(receiver_id) || base64url(token)` to `prefix` as a
    /// single segment, producing the address a sender pays to.
    pub fn generate_receiver_address(
        &self,
        prefix: ilp::Addr,
    ) -> Result<ilp::Address, PskError> {
        let receiver = match self {
            PskContext::Sender(_) => {
                return Err(PskError::RoleMismatch(
                    "sender contexts cannot generate receiver addresses",
                ));
            }
            PskContext::Receiver(receiver) => receiver,
        };
        let mut segment = String::with_capacity(RECEIVER_ID_B64_LEN + TOKEN_B64_LEN);
        segment.push_str(&base64::encode_config(
            &receiver.receiver_id[..],
            base64::URL_SAFE_NO_PAD,
        ));
        segment.push_str(&base64::encode_config(
            &receiver.token[..],
            base64::URL_SAFE_NO_PAD,
        ));
        let address = prefix
            .with_suffix(segment.as_bytes())
            .map_err(ilp::ParseError::from)?;
        Ok(address)
    }

    /// Serializes `message`, encrypting its private section under this
    /// context's encryption key.
    pub fn encrypt_message(&self, message: &PskMessage) -> Result<BytesMut, PskError> {
        writer::write_message_encrypted(message, self)
    }

    /// Parses an encrypted message and decrypts its private section.
    pub fn decrypt_message(&self, buffer: &[u8]) -> Result<PskMessage, PskError> {
        reader::read_message_encrypted(buffer, self)
    }

    /// The fulfillment for `payment` is the HMAC of its canonical bytes
    /// under the fulfillment key, so it commits to both the shared secret
    /// and the exact packet.
    pub fn generate_fulfillment(&self, payment: &ilp::Payment) -> ilp::Fulfillment {
        let preimage = crypto::hmac_sha256(&self.keys().fulfillment_key, payment.as_ref());
        ilp::Fulfillment::from(preimage)
    }

    /// Bundles `payment` with its condition for delivery to a sender.
    pub fn payment_request(&self, payment: ilp::Payment) -> ilp::InterledgerPaymentRequest {
        let condition = self.generate_fulfillment(&payment).condition();
        ilp::InterledgerPaymentRequest::new(payment, condition)
    }
}

impl fmt::Debug for PskContext {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PskContext::Sender(_) => formatter.write_str("PskContext::Sender"),
            PskContext::Receiver(_) => formatter.write_str("PskContext::Receiver"),
        }
    }
}

fn derive_receiver_id(secret: &[u8]) -> [u8; RECEIVER_ID_LEN] {
    let digest = crypto::hmac_sha256(secret, PSK_RECEIVER_ID);
    let mut receiver_id = [0; RECEIVER_ID_LEN];
    receiver_id.copy_from_slice(&digest[..RECEIVER_ID_LEN]);
    receiver_id
}

#[cfg(test)]
mod test_psk_context {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::testing;
    use super::*;

    #[test]
    fn test_from_token_derivation() {
        let context = PskContext::from_token(&testing::SECRET[..], &testing::TOKEN[..])
            .unwrap();
        assert_eq!(
            hex::encode(context.shared_key()),
            "2765243ce63440e27e5e1a26aeb14b443fbb2b5a008bc3c3be0661429067bd4b",
        );
        assert_eq!(
            hex::encode(context.keys().encryption_key),
            "9439ad664c2ec8239d8b31ef7b3905f363dac6e72eca70d37dfa0b2ed5458fff",
        );
        assert_eq!(
            hex::encode(context.keys().fulfillment_key),
            "cc5084255fa432d9c12b97c681d28d65fd895e196d49947a1381b5d4ab80bcb8",
        );
        assert_eq!(hex::encode(context.receiver_id().unwrap()), "79b296700101f7f0");
        assert_eq!(context.token().unwrap(), &testing::TOKEN);
    }

    #[test]
    fn test_from_token_rejects_bad_lengths() {
        assert!(matches!(
            PskContext::from_token(&testing::SECRET[..31], &testing::TOKEN[..]),
            Err(PskError::InvalidKeyMaterial(_)),
        ));
        assert!(matches!(
            PskContext::from_token(&testing::SECRET[..], &testing::TOKEN[..15]),
            Err(PskError::InvalidKeyMaterial(_)),
        ));
    }

    #[test]
    fn test_seed() {
        let mut rng = StdRng::seed_from_u64(42);
        let context = PskContext::seed(&testing::SECRET[..], &mut rng).unwrap();
        let token = *context.token().unwrap();
        let rebuilt = PskContext::from_token(&testing::SECRET[..], &token[..]).unwrap();
        assert_eq!(context.shared_key(), rebuilt.shared_key());

        let other = PskContext::seed(&testing::SECRET[..], &mut rng).unwrap();
        assert_ne!(&token, other.token().unwrap());
    }

    #[test]
    fn test_seed_rejects_bad_secret() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            PskContext::seed(&testing::SECRET[..5], &mut rng),
            Err(PskError::InvalidKeyMaterial(_)),
        ));
    }

    #[test]
    fn test_from_pre_shared_key() {
        let receiver = &*testing::CONTEXT;
        let sender = PskContext::from_pre_shared_key(&receiver.shared_key()[..]).unwrap();
        assert_eq!(sender.shared_key(), receiver.shared_key());
        assert_eq!(sender.keys().encryption_key, receiver.keys().encryption_key);
        assert_eq!(sender.keys().fulfillment_key, receiver.keys().fulfillment_key);

        assert!(matches!(
            PskContext::from_pre_shared_key(&[0x00; 31]),
            Err(PskError::InvalidKeyMaterial(_)),
        ));
    }

    #[test]
    fn test_sender_role_mismatch() {
        let sender = PskContext::from_pre_shared_key(&[0x99; 32]).unwrap();
        assert!(matches!(sender.token(), Err(PskError::RoleMismatch(_))));
        assert!(matches!(sender.receiver_id(), Err(PskError::RoleMismatch(_))));
        assert!(matches!(
            sender.generate_receiver_address(ilp::Addr::new(b"test.crypto")),
            Err(PskError::RoleMismatch(_)),
        ));
    }

    #[test]
    fn test_generate_receiver_address() {
        let address = testing::CONTEXT
            .generate_receiver_address(ilp::Addr::new(b"test.crypto"))
            .unwrap();
        assert_eq!(
            address.as_ref(),
            &b"test.crypto.ebKWcAEB9_AdG9rZW4AAAAAAAAAAAAAAA"[..],
        );
    }

    #[test]
    fn test_from_receiver_address_round_trip() {
        let address = testing::CONTEXT
            .generate_receiver_address(ilp::Addr::new(b"test.crypto"))
            .unwrap();
        let context =
            PskContext::from_receiver_address(&testing::SECRET[..], address.as_addr())
                .unwrap();
        assert_eq!(context.token().unwrap(), &testing::TOKEN);
        assert_eq!(
            context.receiver_id().unwrap(),
            testing::CONTEXT.receiver_id().unwrap(),
        );
        assert_eq!(context.shared_key(), testing::CONTEXT.shared_key());
    }

    #[test]
    fn test_from_receiver_address_rejects_wrong_secret() {
        let address = testing::CONTEXT
            .generate_receiver_address(ilp::Addr::new(b"test.crypto"))
            .unwrap();
        let mut secret = testing::SECRET;
        secret[0] ^= 0x01;
        assert!(matches!(
            PskContext::from_receiver_address(&secret[..], address.as_addr()),
            Err(PskError::AddressMismatch),
        ));
    }

    #[test]
    fn test_from_receiver_address_rejects_malformed_segments() {
        // Wrong length.
        assert!(matches!(
            PskContext::from_receiver_address(
                &testing::SECRET[..],
                ilp::Addr::new(b"test.crypto.abc"),
            ),
            Err(PskError::AddressMismatch),
        ));
        // Right length, but not base64url.
        assert!(matches!(
            PskContext::from_receiver_address(
                &testing::SECRET[..],
                ilp::Addr::new(b"test.crypto.~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~"),
            ),
            Err(PskError::AddressMismatch),
        ));
    }

    #[test]
    fn test_generate_fulfillment() {
        let fulfillment = testing::CONTEXT.generate_fulfillment(&testing::PAYMENT);
        assert_eq!(
            hex::encode(fulfillment.as_ref()),
            "639db3a9838fc8fecf69d22beff8bbcb4c4122c349ec81f1e956a1e279b894b6",
        );
        assert_eq!(
            hex::encode(fulfillment.condition().as_ref()),
            "6770691b6b265893ea36f73c6cc17db9f54752941ff37ac149e87200b8b7545a",
        );
        assert!(fulfillment.validate(&fulfillment.condition()));
    }

    #[test]
    fn test_generate_fulfillment_agrees_across_roles() {
        let receiver = &*testing::CONTEXT;
        let sender = PskContext::from_pre_shared_key(&receiver.shared_key()[..]).unwrap();
        assert_eq!(
            sender.generate_fulfillment(&testing::PAYMENT),
            receiver.generate_fulfillment(&testing::PAYMENT),
        );
    }

    #[test]
    fn test_payment_request() {
        let request = testing::CONTEXT.payment_request(testing::PAYMENT.clone());
        assert_eq!(request.payment(), &*testing::PAYMENT);
        assert_eq!(
            request.condition(),
            testing::CONTEXT
                .generate_fulfillment(&testing::PAYMENT)
                .condition(),
        );
    }

    #[test]
    fn test_encrypt_decrypt_message() {
        let wire = testing::CONTEXT.encrypt_message(&testing::MESSAGE).unwrap();
        assert_eq!(&wire[..], testing::ENCRYPTED_WIRE);
        let message = testing::CONTEXT.decrypt_message(&wire).unwrap();
        assert_eq!(message, *testing::MESSAGE);
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let sender = PskContext::from_pre_shared_key(&[0x99; 32]).unwrap();
        assert_eq!(format!("{:?}", sender), "PskContext::Sender");
        assert_eq!(format!("{:?}", &*testing::CONTEXT), "PskContext::Receiver");
    }
}
