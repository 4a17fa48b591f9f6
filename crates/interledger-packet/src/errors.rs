use std::str::Utf8Error;

use quick_error::quick_error;

use super::AddressError;

quick_error! {
    #[derive(Debug)]
    pub enum ParseError {
        Io(err: std::io::Error) {
            from()
            display("Io {}", err)
            cause(err)
        }
        Utf8(err: Utf8Error) {
            from()
            display("Utf8 {}", err)
            cause(err)
        }
        Chrono(err: chrono::ParseError) {
            from()
            display("Chrono {}", err)
            cause(err)
        }
        WrongType(descr: String) {
            display("WrongType {}", descr)
        }
        InvalidAddress(err: AddressError) {
            from()
            display("InvalidAddress {}", err)
            cause(err)
        }
        InvalidPacket(descr: String) {
            display("InvalidPacket {}", descr)
        }
    }
}
