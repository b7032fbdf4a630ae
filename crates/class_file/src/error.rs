use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid magic identifier: 0x{0:X}")]
    InvalidSignature(u32),
    #[error("Unexpected end of class file")]
    Truncated,
    #[error("Unknown constant pool tag: {0}")]
    UnknownConstantTag(u8),
    #[error("Constant pool index out of range: {0}")]
    IndexOutOfRange(u16),
    #[error("Expected {expected} at constant pool index {index}")]
    MalformedReference { index: u16, expected: &'static str },
    #[error("Invalid modified UTF-8 in constant pool")]
    InvalidModifiedUtf8,
    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => DecodeError::Truncated,
            _ => DecodeError::Io(e),
        }
    }
}
