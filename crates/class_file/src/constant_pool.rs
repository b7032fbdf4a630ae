use std::fmt;

use crate::{DecodeError, Result};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum ConstantTag {
    Utf8 = 1,
    Integer = 3,
    Float = 4,
    Long = 5,
    Double = 6,
    Class = 7,
    String = 8,
    FieldRef = 9,
    MethodRef = 10,
    InterfaceMethodRef = 11,
    NameAndType = 12,
}
impl ConstantTag {
    /// Number of pool slots taken by an entry with this tag. 8-byte constants
    /// take two, and the second one is never referenced.
    pub fn slot_width(self) -> usize {
        match self {
            ConstantTag::Long | ConstantTag::Double => 2,
            _ => 1,
        }
    }
}

impl TryFrom<u8> for ConstantTag {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(ConstantTag::Utf8),
            3 => Ok(ConstantTag::Integer),
            4 => Ok(ConstantTag::Float),
            5 => Ok(ConstantTag::Long),
            6 => Ok(ConstantTag::Double),
            7 => Ok(ConstantTag::Class),
            8 => Ok(ConstantTag::String),
            9 => Ok(ConstantTag::FieldRef),
            10 => Ok(ConstantTag::MethodRef),
            11 => Ok(ConstantTag::InterfaceMethodRef),
            12 => Ok(ConstantTag::NameAndType),
            _ => Err(value),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum ConstantPoolEntry {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class { name_index: u16 },
    String { string_index: u16 },
    FieldRef(RefInfo),
    MethodRef(RefInfo),
    InterfaceMethodRef(RefInfo),
    NameAndType(NameAndTypeInfo),
}
impl ConstantPoolEntry {
    pub fn tag(&self) -> ConstantTag {
        match self {
            ConstantPoolEntry::Utf8(_) => ConstantTag::Utf8,
            ConstantPoolEntry::Integer(_) => ConstantTag::Integer,
            ConstantPoolEntry::Float(_) => ConstantTag::Float,
            ConstantPoolEntry::Long(_) => ConstantTag::Long,
            ConstantPoolEntry::Double(_) => ConstantTag::Double,
            ConstantPoolEntry::Class { .. } => ConstantTag::Class,
            ConstantPoolEntry::String { .. } => ConstantTag::String,
            ConstantPoolEntry::FieldRef(_) => ConstantTag::FieldRef,
            ConstantPoolEntry::MethodRef(_) => ConstantTag::MethodRef,
            ConstantPoolEntry::InterfaceMethodRef(_) => ConstantTag::InterfaceMethodRef,
            ConstantPoolEntry::NameAndType(_) => ConstantTag::NameAndType,
        }
    }
}

impl fmt::Display for ConstantPoolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantPoolEntry::Utf8(s) => write!(f, "Utf8               {}", s.escape_debug()),
            ConstantPoolEntry::Integer(i) => write!(f, "Integer            {}", i),
            ConstantPoolEntry::Float(v) => write!(f, "Float              {}f", v),
            ConstantPoolEntry::Long(l) => write!(f, "Long               {}l", l),
            ConstantPoolEntry::Double(d) => write!(f, "Double             {}d", d),
            ConstantPoolEntry::Class { name_index } => {
                write!(f, "Class              #{}", name_index)
            }
            ConstantPoolEntry::String { string_index } => {
                write!(f, "String             #{}", string_index)
            }
            ConstantPoolEntry::FieldRef(r) => write!(f, "Fieldref           {}", r),
            ConstantPoolEntry::MethodRef(r) => write!(f, "Methodref          {}", r),
            ConstantPoolEntry::InterfaceMethodRef(r) => write!(f, "InterfaceMethodref {}", r),
            ConstantPoolEntry::NameAndType(nt) => write!(
                f,
                "NameAndType        #{}:#{}",
                nt.name_index, nt.descriptor_index
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}
impl fmt::Display for RefInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.#{}", self.class_index, self.name_and_type_index)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}

/// The constant pool of one class file, addressed from 1.
///
/// A slot is `None` when it is the unusable second half of a `Long` or
/// `Double` entry.
#[derive(Debug, Default)]
pub struct ConstantPool {
    slots: Vec<Option<ConstantPoolEntry>>,
}
impl ConstantPool {
    pub fn new(slots: Vec<Option<ConstantPoolEntry>>) -> Self {
        Self { slots }
    }

    /// Number of addressable slots, placeholders included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the entry at `index`, or `None` for a placeholder slot.
    pub fn get(&self, index: u16) -> Result<Option<&ConstantPoolEntry>> {
        if index == 0 {
            return Err(DecodeError::IndexOutOfRange(index));
        }

        self.slots
            .get(index as usize - 1)
            .map(Option::as_ref)
            .ok_or(DecodeError::IndexOutOfRange(index))
    }

    pub fn resolve_utf8(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            Some(ConstantPoolEntry::Utf8(s)) => Ok(s),
            _ => Err(DecodeError::MalformedReference {
                index,
                expected: "Utf8",
            }),
        }
    }

    /// Follows `Class -> name_index -> Utf8` and returns the class name in
    /// internal form (`java/lang/Object`).
    pub fn resolve_class_name(&self, index: u16) -> Result<&str> {
        let name_index = match self.get(index)? {
            Some(ConstantPoolEntry::Class { name_index }) => *name_index,
            _ => {
                return Err(DecodeError::MalformedReference {
                    index,
                    expected: "Class",
                })
            }
        };

        // The name index came from the pool itself, so even a range error is a broken link.
        self.resolve_utf8(name_index)
            .map_err(|_| DecodeError::MalformedReference {
                index: name_index,
                expected: "Utf8",
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, Option<&ConstantPoolEntry>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (i as u16 + 1, slot.as_ref()))
    }
}

#[cfg(test)]
mod constant_tag_tests {
    use super::*;

    #[test]
    fn it_should_accept_every_known_tag() {
        for tag in [1u8, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12] {
            assert_eq!(ConstantTag::try_from(tag).map(|t| t as u8), Ok(tag));
        }
    }

    #[test]
    fn it_should_reject_unknown_tags() {
        for tag in [0u8, 2, 13, 15, 16, 18, 19, 20, 255] {
            assert_eq!(ConstantTag::try_from(tag), Err(tag));
        }
    }

    #[test]
    fn only_eight_byte_constants_are_wide() {
        assert_eq!(ConstantTag::Long.slot_width(), 2);
        assert_eq!(ConstantTag::Double.slot_width(), 2);
        assert_eq!(ConstantTag::Utf8.slot_width(), 1);
        assert_eq!(ConstantTag::Integer.slot_width(), 1);
    }
}
