use quick_error::quick_error;

quick_error! {
    #[derive(Debug)]
    pub enum PskError {
        InvalidKeyMaterial(descr: &'static str) {
            display("InvalidKeyMaterial {}", descr)
        }
        RoleMismatch(descr: &'static str) {
            display("RoleMismatch {}", descr)
        }
        Framing(descr: String) {
            display("Framing {}", descr)
        }
        UnsupportedEncryption(value: String) {
            display("UnsupportedEncryption {:?}", value)
        }
        AuthenticationFailure {
            display("AuthenticationFailure")
        }
        AddressMismatch {
            display("AddressMismatch")
        }
        Packet(err: ilp::ParseError) {
            from()
            display("Packet {}", err)
            cause(err)
        }
    }
}
