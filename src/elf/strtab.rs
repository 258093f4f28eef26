//! Null-terminated string tables.

use crate::{Result, parse_strtab_error};
use alloc::format;

/// A string table: a byte blob holding null-terminated strings addressed
/// by byte offset.
///
/// One decoder serves both instances in an image — the section-name table
/// and the symbol-name table; only the blob differs.
#[derive(Debug, Clone, Copy)]
pub struct ElfStringTable<'data> {
    blob: &'data [u8],
}

impl<'data> ElfStringTable<'data> {
    /// Wraps a section's raw contents as a string table.
    pub(crate) fn new(blob: &'data [u8]) -> Self {
        ElfStringTable { blob }
    }

    /// Resolves the null-terminated string starting at `offset`.
    ///
    /// # Errors
    ///
    /// Fails if the offset lies past the end of the blob, no terminator is
    /// found before the blob ends, or the bytes are not valid UTF-8.
    pub fn get(&self, offset: usize) -> Result<&'data str> {
        let tail = self.blob.get(offset..).ok_or_else(|| {
            parse_strtab_error(format!("string offset {offset:#x} past the end of the table"))
        })?;
        let len = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| parse_strtab_error(format!("unterminated string at {offset:#x}")))?;
        core::str::from_utf8(&tail[..len])
            .map_err(|_| parse_strtab_error(format!("string at {offset:#x} is not valid UTF-8")))
    }
}
