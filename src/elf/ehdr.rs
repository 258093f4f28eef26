//! ELF file header parsing.
//!
//! The file header starts immediately after the identification region and
//! carries the table offsets and entry counts every later stage depends
//! on. ELF32 and ELF64 share the field order; only the widths of the
//! address-sized fields differ.

use crate::{Result, parse_ehdr_error};
use super::{Decoder, ident::ElfIdent};
use elf::abi::EI_NIDENT;

/// The decoded ELF file header.
///
/// Fields that scale with the address class are widened to `u64` so the
/// rest of the crate stays class-agnostic; the class itself travels in the
/// [`ElfIdent`] alongside.
#[derive(Debug, Clone)]
pub struct ElfHeader {
    /// Object file type (relocatable, executable, shared object, ...).
    pub e_type: u16,
    /// Target machine architecture.
    pub e_machine: u16,
    /// Object file version.
    pub e_version: u32,
    /// Entry point virtual address.
    pub e_entry: u64,
    /// Program header table file offset.
    pub e_phoff: u64,
    /// Section header table file offset.
    pub e_shoff: u64,
    /// Processor-specific flags.
    pub e_flags: u32,
    /// Size of this header.
    pub e_ehsize: u16,
    /// Size of one program header table entry.
    pub e_phentsize: u16,
    /// Number of program header table entries.
    pub e_phnum: u16,
    /// Size of one section header table entry.
    pub e_shentsize: u16,
    /// Number of section header table entries.
    pub e_shnum: u16,
    /// Index of the section holding section names.
    pub e_shstrndx: u16,
}

impl ElfHeader {
    /// Decodes the file header using the layout the identification region
    /// selected.
    ///
    /// No semantic validation happens here; out-of-range table offsets are
    /// caught by the bounds checks of the stages that consume them.
    ///
    /// # Errors
    ///
    /// Fails if the buffer ends before the class-selected layout does.
    pub(crate) fn parse(data: &[u8], ident: &ElfIdent) -> Result<Self> {
        Self::decode(data, ident).ok_or_else(|| parse_ehdr_error("ELF header truncated"))
    }

    fn decode(data: &[u8], ident: &ElfIdent) -> Option<Self> {
        let mut d = Decoder::new(data.get(EI_NIDENT..)?, ident);
        Some(ElfHeader {
            e_type: d.u16()?,
            e_machine: d.u16()?,
            e_version: d.u32()?,
            e_entry: d.addr()?,
            e_phoff: d.addr()?,
            e_shoff: d.addr()?,
            e_flags: d.u32()?,
            e_ehsize: d.u16()?,
            e_phentsize: d.u16()?,
            e_phnum: d.u16()?,
            e_shentsize: d.u16()?,
            e_shnum: d.u16()?,
            e_shstrndx: d.u16()?,
        })
    }

    /// Returns the number of section headers.
    #[inline]
    pub fn shnum(&self) -> usize {
        self.e_shnum as usize
    }

    /// Returns the size of each section header entry.
    #[inline]
    pub fn shentsize(&self) -> usize {
        self.e_shentsize as usize
    }

    /// Returns the index of the section-name string table.
    #[inline]
    pub fn shstrndx(&self) -> usize {
        self.e_shstrndx as usize
    }
}
