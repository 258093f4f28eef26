//! The 16-byte ELF identification region.
//!
//! Everything that follows in the image is shaped by what this prefix
//! declares: the address class picks the layout variant of each structure,
//! and the data encoding picks the byte order of every multi-byte field.

use crate::{Result, parse_ident_error};
use alloc::format;
use elf::abi::{
    EI_ABIVERSION, EI_CLASS, EI_DATA, EI_NIDENT, EI_OSABI, EI_VERSION, ELFCLASS32, ELFCLASS64,
    ELFDATA2LSB, ELFDATA2MSB, ELFMAGIC, EV_CURRENT,
};

/// Address width declared by the identification region.
///
/// Selected once after identification decoding and threaded explicitly
/// into every later decode call; it fixes the width — and for symbol
/// entries the ordering — of most structure fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressClass {
    /// `ELFCLASS32`: 32-bit addresses.
    Class32,
    /// `ELFCLASS64`: 64-bit addresses.
    Class64,
}

/// Byte order declared by the identification region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `ELFDATA2LSB`: two's complement, little-endian.
    Little,
    /// `ELFDATA2MSB`: two's complement, big-endian.
    Big,
}

/// The decoded identification prefix of an ELF image.
#[derive(Debug, Clone, Copy)]
pub struct ElfIdent {
    /// Address class governing all later layout selection.
    pub class: AddressClass,
    /// Byte order governing all later multi-byte reads.
    pub encoding: Encoding,
    /// OS/ABI identification byte, carried through unvalidated.
    pub osabi: u8,
    /// ABI version byte, carried through unvalidated.
    pub abiversion: u8,
}

impl ElfIdent {
    /// Decodes and validates the identification region.
    ///
    /// # Errors
    ///
    /// Fails if the buffer holds fewer than [`EI_NIDENT`] bytes, the magic
    /// does not match, the class or data-encoding byte is outside its two
    /// valid values, or the version byte is not `EV_CURRENT`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let ident = data
            .get(..EI_NIDENT)
            .ok_or_else(|| parse_ident_error("buffer too short for e_ident"))?;

        if ident[0..4] != ELFMAGIC {
            return Err(parse_ident_error("invalid ELF magic"));
        }

        let class = match ident[EI_CLASS] {
            ELFCLASS32 => AddressClass::Class32,
            ELFCLASS64 => AddressClass::Class64,
            other => return Err(parse_ident_error(format!("unsupported file class {other}"))),
        };

        let encoding = match ident[EI_DATA] {
            ELFDATA2LSB => Encoding::Little,
            ELFDATA2MSB => Encoding::Big,
            other => {
                return Err(parse_ident_error(format!(
                    "unsupported data encoding {other}"
                )));
            }
        };

        if ident[EI_VERSION] != EV_CURRENT {
            return Err(parse_ident_error("invalid ELF version"));
        }

        Ok(ElfIdent {
            class,
            encoding,
            osabi: ident[EI_OSABI],
            abiversion: ident[EI_ABIVERSION],
        })
    }

    /// Returns `true` if the image uses 64-bit addressing.
    #[inline]
    pub fn is_64(&self) -> bool {
        self.class == AddressClass::Class64
    }
}
