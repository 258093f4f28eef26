//! ELF (Executable and Linkable Format) metadata decoding.
//!
//! This module holds the wire-format layer: the identification region, the
//! file header, the section header table, string tables, and the symbol
//! table, each decoded bottom-up from a borrowed byte buffer. Structure
//! layouts are selected at runtime from the address class the image
//! declares, and every multi-byte field is read in the declared byte
//! order.

mod decode;
mod ehdr;
mod ident;
mod shdr;
mod strtab;
mod symbol;

// Internal module re-exports for use within the crate
pub(crate) use decode::Decoder;
pub(crate) use shdr::decode_shdrs;
pub(crate) use symbol::decode_symtab;

// Public API exports
pub use ehdr::ElfHeader;
pub use ident::{AddressClass, ElfIdent, Encoding};
pub use shdr::ElfShdr;
pub use strtab::ElfStringTable;
pub use symbol::ElfSymbol;
