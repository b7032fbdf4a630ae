// https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-4.html

mod access_flags;
mod class_identity;
pub mod constant_pool;
mod error;
mod parser;

use std::io::Read;

pub use access_flags::AccessFlags;
pub use class_identity::{ClassFileHeader, ClassIdentity};
pub use constant_pool::{ConstantPool, ConstantPoolEntry};
pub use error::DecodeError;
pub use parser::Parser;

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

/// Decodes the header and constant pool of a class file read from `source`.
pub fn decode_class_identity(source: impl Read) -> Result<ClassIdentity> {
    ClassIdentity::parse(source)
}
