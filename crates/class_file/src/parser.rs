use std::{borrow::Cow, io::Read};

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace, warn};

use crate::{
    class_identity::{ClassFileHeader, ClassIdentity},
    constant_pool::{ConstantPoolEntry, ConstantTag, NameAndTypeInfo, RefInfo},
    ConstantPool, DecodeError, Result,
};

type Endian = BigEndian;

const MAGIC_IDENTIFIER: u32 = 0xCAFEBABE;

/// Sequential reader over a class file. Only the header and the constant
/// pool are decoded; everything after the super class index is left unread.
pub struct Parser<R> {
    r: R,
}
impl<R: Read> Parser<R> {
    pub fn new(r: R) -> Self {
        Self { r }
    }

    pub fn into_inner(self) -> R {
        self.r
    }

    pub fn parse(&mut self) -> Result<ClassIdentity> {
        self.parse_magic_identifier()?;
        let (major_version, minor_version) = self.parse_version()?;
        debug!("class file version {}.{}", major_version, minor_version);

        let constant_pool_count = self.read_u16()?;
        let constant_pool = self.parse_constant_pool(constant_pool_count)?;

        let access_flags = self.read_u16()?;
        let this_class = self.read_u16()?;
        let super_class = self.read_u16()?;
        debug!(
            "access flags 0x{:04X}, this class #{}, super class #{}",
            access_flags, this_class, super_class
        );

        Ok(ClassIdentity::new(
            ClassFileHeader {
                minor_version,
                major_version,
                access_flags,
                this_class,
                super_class,
            },
            constant_pool,
        ))
    }

    fn parse_magic_identifier(&mut self) -> Result<()> {
        match self.read_u32()? {
            MAGIC_IDENTIFIER => Ok(()),
            magic_identifier => Err(DecodeError::InvalidSignature(magic_identifier)),
        }
    }

    fn parse_version(&mut self) -> Result<(u16, u16)> {
        let minor = self.read_u16()?;
        let major = self.read_u16()?;
        Ok((major, minor))
    }

    /// Decodes entries until the pool holds `constant_pool_count - 1` slots.
    pub fn parse_constant_pool(&mut self, constant_pool_count: u16) -> Result<ConstantPool> {
        let count = (constant_pool_count as usize).saturating_sub(1);
        debug!("constant pool holds {} slots", count);

        let mut slots = Vec::with_capacity(count);
        while slots.len() < count {
            let cp_info = self.parse_cp_info()?;
            trace!("[{}] {}", slots.len() + 1, cp_info);

            let slot_width = cp_info.tag().slot_width();
            slots.push(Some(cp_info));
            (1..slot_width).for_each(|_| slots.push(None));
        }
        // A wide entry in the last slot must not grow the pool past its declared size.
        slots.truncate(count);

        Ok(ConstantPool::new(slots))
    }

    fn parse_cp_info(&mut self) -> Result<ConstantPoolEntry> {
        let tag = self.read_u8()?;
        let tag = ConstantTag::try_from(tag).map_err(|tag| {
            warn!("unknown constant pool tag {}, aborting", tag);
            DecodeError::UnknownConstantTag(tag)
        })?;

        self.parse_cp_payload(tag)
    }

    /// Consumes exactly the payload laid out for `tag`.
    pub fn parse_cp_payload(&mut self, tag: ConstantTag) -> Result<ConstantPoolEntry> {
        let cp_info = match tag {
            ConstantTag::Utf8 => ConstantPoolEntry::Utf8(self.parse_utf8()?),
            ConstantTag::Integer => ConstantPoolEntry::Integer(self.r.read_i32::<Endian>()?),
            ConstantTag::Float => ConstantPoolEntry::Float(self.r.read_f32::<Endian>()?),
            ConstantTag::Long => ConstantPoolEntry::Long(self.r.read_i64::<Endian>()?),
            ConstantTag::Double => ConstantPoolEntry::Double(self.r.read_f64::<Endian>()?),
            ConstantTag::Class => ConstantPoolEntry::Class {
                name_index: self.read_u16()?,
            },
            ConstantTag::String => ConstantPoolEntry::String {
                string_index: self.read_u16()?,
            },
            ConstantTag::FieldRef => ConstantPoolEntry::FieldRef(self.parse_ref_info()?),
            ConstantTag::MethodRef => ConstantPoolEntry::MethodRef(self.parse_ref_info()?),
            ConstantTag::InterfaceMethodRef => {
                ConstantPoolEntry::InterfaceMethodRef(self.parse_ref_info()?)
            }
            ConstantTag::NameAndType => {
                ConstantPoolEntry::NameAndType(self.parse_name_and_type_info()?)
            }
        };

        Ok(cp_info)
    }

    // https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-4.html#jvms-4.4.7
    fn parse_utf8(&mut self) -> Result<String> {
        let length = self.read_u16()?;
        let mut bytes = vec![0u8; length as usize];
        self.r.read_exact(&mut bytes)?;

        cesu8::from_java_cesu8(&bytes)
            .map(Cow::into_owned)
            .map_err(|_| DecodeError::InvalidModifiedUtf8)
    }

    fn parse_ref_info(&mut self) -> Result<RefInfo> {
        let class_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    fn parse_name_and_type_info(&mut self) -> Result<NameAndTypeInfo> {
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;

        Ok(NameAndTypeInfo {
            name_index,
            descriptor_index,
        })
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(self.r.read_u32::<Endian>()?)
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(self.r.read_u16::<Endian>()?)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.r.read_u8()?)
    }
}

#[cfg(test)]
fn parser(bytes: &[u8]) -> Parser<&[u8]> {
    Parser::new(bytes)
}


#[cfg(test)]
mod parse_version_tests {
    use super::*;

    #[test]
    fn it_should_read_minor_before_major() {
        assert_eq!(
            parser(&[0x00, 0x03, 0x00, 0x2d]).parse_version().unwrap(),
            (45, 3)
        );
    }
}
