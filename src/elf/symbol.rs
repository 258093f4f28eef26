//! Symbol table parsing.
//!
//! Symbol entries are the one structure whose field ORDER differs between
//! the address classes, not just the field widths: ELF32 stores
//! name/value/size/info/other/shndx while ELF64 stores
//! name/info/other/shndx/value/size. Both decode into the same shape.

use crate::{Result, parse_sym_error};
use super::{Decoder, ident::{AddressClass, ElfIdent}, shdr::ElfShdr};
use alloc::format;
use alloc::vec::Vec;
use elf::abi::{SHN_UNDEF, STT_FILE};

/// A decoded symbol table entry.
#[derive(Debug, Clone)]
pub struct ElfSymbol {
    /// Offset of the symbol's name in the symbol string table; 0 means
    /// the null/empty name.
    pub st_name: u32,
    /// Symbol value (usually an address).
    pub st_value: u64,
    /// Size of the symbol's object, 0 if unknown.
    pub st_size: u64,
    /// Binding in the high nibble, type in the low nibble.
    pub st_info: u8,
    /// Visibility.
    pub st_other: u8,
    /// Index of the defining section; `SHN_UNDEF` for external references.
    pub st_shndx: u16,
}

impl ElfSymbol {
    fn decode(entry: &[u8], ident: &ElfIdent) -> Option<Self> {
        let mut d = Decoder::new(entry, ident);
        Some(match ident.class {
            AddressClass::Class32 => {
                let st_name = d.u32()?;
                let st_value = u64::from(d.u32()?);
                let st_size = u64::from(d.u32()?);
                let st_info = d.u8()?;
                let st_other = d.u8()?;
                let st_shndx = d.u16()?;
                ElfSymbol {
                    st_name,
                    st_value,
                    st_size,
                    st_info,
                    st_other,
                    st_shndx,
                }
            }
            AddressClass::Class64 => {
                let st_name = d.u32()?;
                let st_info = d.u8()?;
                let st_other = d.u8()?;
                let st_shndx = d.u16()?;
                let st_value = d.u64()?;
                let st_size = d.u64()?;
                ElfSymbol {
                    st_name,
                    st_value,
                    st_size,
                    st_info,
                    st_other,
                    st_shndx,
                }
            }
        })
    }

    /// Symbol type, from the low nibble of `st_info`.
    #[inline]
    pub fn symbol_type(&self) -> u8 {
        self.st_info & 0xf
    }

    /// Returns `true` for `STT_FILE` entries (source-file markers the
    /// listings exclude).
    #[inline]
    pub fn is_file(&self) -> bool {
        self.symbol_type() == STT_FILE
    }

    /// Returns `true` if the symbol resides in no section, i.e. it is an
    /// external reference to be resolved elsewhere.
    #[inline]
    pub fn is_undefined(&self) -> bool {
        self.st_shndx == SHN_UNDEF
    }
}

/// Decodes the symbol table held by `shdr`.
///
/// The entry count is `sh_size / sh_entsize`; a size that is not a whole
/// multiple of the entry size is rejected rather than silently truncated.
pub(crate) fn decode_symtab(
    data: &[u8],
    ident: &ElfIdent,
    shdr: &ElfShdr,
) -> Result<Vec<ElfSymbol>> {
    let offset = usize::try_from(shdr.sh_offset)
        .map_err(|_| parse_sym_error("symbol table offset overflows"))?;
    let size = usize::try_from(shdr.sh_size)
        .map_err(|_| parse_sym_error("symbol table size overflows"))?;
    let entsize = usize::try_from(shdr.sh_entsize)
        .map_err(|_| parse_sym_error("symbol table entry size overflows"))?;

    if entsize == 0 {
        return Err(parse_sym_error("symbol table entry size is zero"));
    }
    if size % entsize != 0 {
        return Err(parse_sym_error(format!(
            "symbol table size {size:#x} is not a multiple of its entry size {entsize:#x}"
        )));
    }
    let table_end = offset
        .checked_add(size)
        .ok_or_else(|| parse_sym_error("symbol table range overflows"))?;
    if table_end > data.len() {
        return Err(parse_sym_error(
            "symbol table extends past the end of the image",
        ));
    }

    let count = size / entsize;
    #[cfg(feature = "log")]
    log::debug!("symbol table: {count} entries at {offset:#x}");

    let mut symtab = Vec::with_capacity(count);
    for i in 0..count {
        let entoff = offset + i * entsize;
        let entry = &data[entoff..entoff + entsize];
        let symbol = ElfSymbol::decode(entry, ident)
            .ok_or_else(|| parse_sym_error(format!("symbol {i} truncated")))?;
        symtab.push(symbol);
    }
    Ok(symtab)
}
