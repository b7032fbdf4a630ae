use std::io::Read;

use crate::{parser::Parser, AccessFlags, ConstantPool, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassFileHeader {
    pub minor_version: u16,
    pub major_version: u16,
    /// Raw `access_flags` word, see [`ClassIdentity::access_flags`].
    pub access_flags: u16,
    pub this_class: u16,
    pub super_class: u16,
}

/// Name and version of a decoded class file.
///
/// Only produced by a complete decode of the header and the constant pool.
#[derive(Debug)]
pub struct ClassIdentity {
    header: ClassFileHeader,
    constant_pool: ConstantPool,
}
impl ClassIdentity {
    /// Reads no further than the super_class item. Buffering is left to the
    /// caller.
    pub fn parse(bytes: impl Read) -> Result<ClassIdentity> {
        Parser::new(bytes).parse()
    }

    pub(crate) fn new(header: ClassFileHeader, constant_pool: ConstantPool) -> Self {
        Self {
            header,
            constant_pool,
        }
    }

    pub fn header(&self) -> &ClassFileHeader {
        &self.header
    }

    pub fn constant_pool(&self) -> &ConstantPool {
        &self.constant_pool
    }

    pub fn major_version(&self) -> u16 {
        self.header.major_version
    }

    pub fn minor_version(&self) -> u16 {
        self.header.minor_version
    }

    pub fn access_flags(&self) -> AccessFlags {
        AccessFlags::from_bits_truncate(self.header.access_flags)
    }

    pub fn canonical_name(&self) -> Result<&str> {
        // The value of the this_class item must be a valid index into the constant_pool table.
        // The constant_pool entry at that index must be a CONSTANT_Class_info structure (§4.4.1)
        // representing the class or interface defined by this class file.
        self.constant_pool.resolve_class_name(self.header.this_class)
    }

    /// Fails with `IndexOutOfRange(0)` for `java/lang/Object`, whose
    /// super_class item is zero.
    pub fn superclass_canonical_name(&self) -> Result<&str> {
        self.constant_pool.resolve_class_name(self.header.super_class)
    }
}
