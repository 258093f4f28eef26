//! ELF input sources.
//!
//! The core never performs I/O: a caller reads a file fully into memory
//! and hands the bytes over. This module only attaches a display name to
//! such a buffer so diagnostics can say which image failed.

use crate::{ElfImage, Result};
use alloc::string::{String, ToString};

/// An ELF image source backed by an in-memory byte slice.
///
/// The name is carried for diagnostics only; parsing touches nothing but
/// the bytes.
#[derive(Debug)]
pub struct ElfBinary<'bytes> {
    /// The name assigned to this image.
    name: String,
    /// The raw ELF data.
    bytes: &'bytes [u8],
}

impl<'bytes> ElfBinary<'bytes> {
    /// Creates a named in-memory ELF source.
    ///
    /// # Examples
    /// ```rust
    /// use symscan::ElfBinary;
    ///
    /// let data = &[]; // in practice, the bytes of an ELF file
    /// let binary = ElfBinary::new("a.out", data);
    /// ```
    pub fn new(name: &str, bytes: &'bytes [u8]) -> Self {
        Self {
            name: name.to_string(),
            bytes,
        }
    }

    /// Returns the name assigned to this source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the underlying bytes.
    pub fn bytes(&self) -> &'bytes [u8] {
        self.bytes
    }

    /// Parses the image, reporting failures under this source's name.
    pub fn parse(&self) -> Result<ElfImage> {
        #[cfg(feature = "log")]
        log::debug!("parsing ELF image: {}", self.name);

        ElfImage::parse(self.bytes).map_err(|e| {
            #[cfg(feature = "log")]
            log::error!("failed to parse {}: {}", self.name, e);
            e
        })
    }
}
