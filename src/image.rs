//! The assembled view of one ELF image's symbol metadata.

use crate::{
    Result,
    elf::{
        ElfHeader, ElfIdent, ElfShdr, ElfStringTable, ElfSymbol, decode_shdrs, decode_symtab,
    },
    find_section_error, parse_strtab_error,
};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Name of the section holding the symbol table.
const SYMTAB_SECTION: &str = ".symtab";
/// Name of the section holding the symbol names.
const STRTAB_SECTION: &str = ".strtab";

/// A fully decoded ELF image, ready for the reporting queries.
///
/// Construction is one strictly sequential pass — identification, file
/// header, section header table, section names, symbol table, symbol
/// names — and the first failure aborts the whole parse. The input buffer
/// is only borrowed for the duration of [`ElfImage::parse`]: every name
/// is resolved eagerly, so the image owns all of its data and is
/// immutable afterwards.
#[derive(Debug)]
pub struct ElfImage {
    ident: ElfIdent,
    ehdr: ElfHeader,
    shdrs: Vec<ElfShdr>,
    section_names: Vec<String>,
    section_by_name: HashMap<String, usize>,
    symbols: Vec<ElfSymbol>,
    symbol_names: Vec<String>,
}

impl ElfImage {
    /// Parses the metadata of a complete in-memory ELF image.
    ///
    /// # Errors
    ///
    /// Returns the stage-identifying [`Error`](crate::Error) of the first
    /// decoding step that fails; there is no partial result.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let ident = ElfIdent::parse(data)?;
        let ehdr = ElfHeader::parse(data, &ident)?;
        let shdrs = decode_shdrs(data, &ident, &ehdr)?;

        // Section names come from the section the file header points at,
        // which must itself be a valid table entry.
        let shstrndx = ehdr.shstrndx();
        let shstr_shdr = shdrs.get(shstrndx).ok_or_else(|| {
            find_section_error(format!("section name table index {shstrndx} out of range"))
        })?;
        let shstrtab = ElfStringTable::new(section_bytes(data, shstr_shdr, "section name table")?);

        let mut section_names = Vec::with_capacity(shdrs.len());
        let mut section_by_name = HashMap::with_capacity(shdrs.len());
        for (index, shdr) in shdrs.iter().enumerate() {
            let name = shstrtab.get(shdr.sh_name as usize)?;
            section_names.push(String::from(name));
            // Later sections sharing a name replace earlier ones.
            section_by_name.insert(String::from(name), index);
        }

        let symtab_shdr = find_named(&shdrs, &section_by_name, SYMTAB_SECTION)?;
        let symbols = decode_symtab(data, &ident, symtab_shdr)?;

        let strtab_shdr = find_named(&shdrs, &section_by_name, STRTAB_SECTION)?;
        let strtab = ElfStringTable::new(section_bytes(data, strtab_shdr, STRTAB_SECTION)?);
        let mut symbol_names = Vec::with_capacity(symbols.len());
        for symbol in &symbols {
            symbol_names.push(String::from(strtab.get(symbol.st_name as usize)?));
        }

        Ok(ElfImage {
            ident,
            ehdr,
            shdrs,
            section_names,
            section_by_name,
            symbols,
            symbol_names,
        })
    }

    /// The decoded identification region.
    #[inline]
    pub fn ident(&self) -> &ElfIdent {
        &self.ident
    }

    /// The decoded file header.
    #[inline]
    pub fn ehdr(&self) -> &ElfHeader {
        &self.ehdr
    }

    /// The decoded section header table, in file order.
    #[inline]
    pub fn shdrs(&self) -> &[ElfShdr] {
        &self.shdrs
    }

    /// The decoded symbol table, in file order.
    #[inline]
    pub fn symbols(&self) -> &[ElfSymbol] {
        &self.symbols
    }

    /// Resolves a section index by exact name.
    pub fn section_index(&self, name: &str) -> Option<usize> {
        self.section_by_name.get(name).copied()
    }

    /// Returns the section listing: one `"<index>: <name>"` line per
    /// section, index right-aligned, in table order (not sorted).
    pub fn sections(&self) -> String {
        let lines: Vec<String> = self
            .section_names
            .iter()
            .enumerate()
            .map(|(index, name)| format!("{index:2}: {name}"))
            .collect();
        lines.join("\n")
    }

    /// Returns the names of symbols that reside in a real section, one
    /// per line, in listing order.
    pub fn defined_only(&self) -> String {
        self.listing(|symbol| !symbol.is_undefined())
    }

    /// Returns the names of symbols left for some other object to define,
    /// one per line, in listing order.
    pub fn undefined_only(&self) -> String {
        self.listing(ElfSymbol::is_undefined)
    }

    /// Shared filter/sort for the two symbol listings: drop source-file
    /// markers and unnamed entries, keep what `keep` accepts, then
    /// stable-sort so equal keys preserve table order.
    fn listing(&self, keep: impl Fn(&ElfSymbol) -> bool) -> String {
        let mut names: Vec<&str> = Vec::new();
        for (symbol, name) in self.symbols.iter().zip(&self.symbol_names) {
            if symbol.st_name == 0 || symbol.is_file() || !keep(symbol) {
                continue;
            }
            names.push(name.as_str());
        }
        names.sort_by_cached_key(|name| listing_key(name));
        names.join("\n")
    }
}

/// Listing order: case-insensitive with underscores ignored.
fn listing_key(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn find_named<'shdrs>(
    shdrs: &'shdrs [ElfShdr],
    by_name: &HashMap<String, usize>,
    name: &str,
) -> Result<&'shdrs ElfShdr> {
    by_name
        .get(name)
        .map(|&index| &shdrs[index])
        .ok_or_else(|| find_section_error(format!("no {name} section in this image")))
}

fn section_bytes<'data>(data: &'data [u8], shdr: &ElfShdr, name: &str) -> Result<&'data [u8]> {
    shdr.content(data).ok_or_else(|| {
        parse_strtab_error(format!(
            "{name} contents ({:#x}..+{:#x}) lie outside the image",
            shdr.sh_offset, shdr.sh_size
        ))
    })
}
