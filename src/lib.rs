//! # symscan
//!
//! **symscan** decodes the metadata of an ELF (Executable and Linkable
//! Format) binary — file header, section header table, symbol table, and
//! their string tables — and classifies the symbols it finds into defined
//! and undefined sets, producing sorted, human-readable listings.
//!
//! The crate is a pure decoder: it accepts one immutable byte buffer
//! holding a complete file image and returns plain text. Opening files,
//! parsing command-line arguments, and printing belong to the caller (the
//! `symdump` tool in this repository is one such caller).
//!
//! ## Core properties
//!
//! * **Both address classes**: ELF32 and ELF64 layouts are selected at
//!   runtime from the identification region, including the differing
//!   symbol-entry field orders.
//! * **Both byte orders**: every multi-byte field is decoded in the
//!   encoding the image declares.
//! * **Fail fast**: malformed input aborts the whole parse with an error
//!   naming the stage that failed; there are no partial results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use symscan::ElfBinary;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("a.out")?;
//!     let image = ElfBinary::new("a.out", &bytes).parse()?;
//!
//!     println!("{}", image.sections());
//!     println!("{}", image.defined_only());
//!     println!("{}", image.undefined_only());
//!     Ok(())
//! }
//! ```
#![no_std]
#![warn(
    clippy::unnecessary_wraps,
    clippy::unnecessary_lazy_evaluations,
    clippy::collapsible_if,
    clippy::cast_lossless,
    clippy::explicit_iter_loop,
    clippy::manual_assert,
    clippy::needless_question_mark,
    clippy::needless_return,
    clippy::redundant_clone,
    clippy::redundant_else,
    clippy::redundant_static_lifetimes
)]
extern crate alloc;

pub mod elf;
mod error;
pub mod image;
pub mod input;

pub(crate) use error::*;

pub use error::Error;
pub use image::ElfImage;
pub use input::ElfBinary;

/// A type alias for `Result`s returned by `symscan` functions.
///
/// This is a convenience alias that eliminates the need to repeatedly
/// specify the `Error` type in function signatures.
pub type Result<T> = core::result::Result<T, Error>;
