//! Section header table parsing.

use crate::{Result, parse_shdr_error};
use super::{Decoder, ehdr::ElfHeader, ident::ElfIdent};
use alloc::format;
use alloc::vec::Vec;

/// A decoded section header table entry.
///
/// The entry's position in the decoded table is its section index, the
/// number symbol entries and the file header use to refer to it.
#[derive(Debug, Clone)]
pub struct ElfShdr {
    /// Offset of this section's name in the section-name string table.
    pub sh_name: u32,
    /// Section type.
    pub sh_type: u32,
    /// Section flags.
    pub sh_flags: u64,
    /// Virtual address at execution.
    pub sh_addr: u64,
    /// File offset of the section's contents.
    pub sh_offset: u64,
    /// Size of the section's contents in bytes.
    pub sh_size: u64,
    /// Index of a related section.
    pub sh_link: u32,
    /// Extra type-dependent information.
    pub sh_info: u32,
    /// Required alignment.
    pub sh_addralign: u64,
    /// Entry size for sections holding fixed-size entries, else 0.
    pub sh_entsize: u64,
}

impl ElfShdr {
    fn decode(entry: &[u8], ident: &ElfIdent) -> Option<Self> {
        let mut d = Decoder::new(entry, ident);
        Some(ElfShdr {
            sh_name: d.u32()?,
            sh_type: d.u32()?,
            sh_flags: d.addr()?,
            sh_addr: d.addr()?,
            sh_offset: d.addr()?,
            sh_size: d.addr()?,
            sh_link: d.u32()?,
            sh_info: d.u32()?,
            sh_addralign: d.addr()?,
            sh_entsize: d.addr()?,
        })
    }

    /// Returns the byte range this section owns inside `data`, or `None`
    /// if the range does not lie within the buffer.
    pub fn content<'data>(&self, data: &'data [u8]) -> Option<&'data [u8]> {
        let start = usize::try_from(self.sh_offset).ok()?;
        let size = usize::try_from(self.sh_size).ok()?;
        let end = start.checked_add(size)?;
        data.get(start..end)
    }
}

/// Decodes the section header table described by `ehdr`.
///
/// The whole table's byte range is validated against the buffer before
/// any entry is decoded, so an out-of-range `e_shoff`/`e_shnum` pair from
/// the file header fails here instead of reading past the image.
pub(crate) fn decode_shdrs(
    data: &[u8],
    ident: &ElfIdent,
    ehdr: &ElfHeader,
) -> Result<Vec<ElfShdr>> {
    let shoff = usize::try_from(ehdr.e_shoff)
        .map_err(|_| parse_shdr_error("section header table offset overflows"))?;
    let shnum = ehdr.shnum();
    let entsize = ehdr.shentsize();

    let table_end = shnum
        .checked_mul(entsize)
        .and_then(|len| shoff.checked_add(len))
        .ok_or_else(|| parse_shdr_error("section header table range overflows"))?;
    if table_end > data.len() {
        return Err(parse_shdr_error(
            "section header table extends past the end of the image",
        ));
    }

    #[cfg(feature = "log")]
    log::debug!("section header table: {shnum} entries at {shoff:#x}");

    let mut shdrs = Vec::with_capacity(shnum);
    for i in 0..shnum {
        let entoff = shoff + i * entsize;
        let entry = &data[entoff..entoff + entsize];
        let shdr = ElfShdr::decode(entry, ident)
            .ok_or_else(|| parse_shdr_error(format!("section header {i} truncated")))?;
        shdrs.push(shdr);
    }
    Ok(shdrs)
}
