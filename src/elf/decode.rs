use super::ident::{AddressClass, ElfIdent, Encoding};

/// A bounds-checked cursor over a byte slice.
///
/// Decodes fixed-width fields in the byte order the image declares;
/// address-width fields dispatch on the declared class and widen to
/// `u64`. Every read returns `None` once the slice is exhausted, so a
/// truncated structure surfaces as a single failed decode rather than an
/// out-of-bounds access.
pub(crate) struct Decoder<'data> {
    data: &'data [u8],
    pos: usize,
    class: AddressClass,
    encoding: Encoding,
}

impl<'data> Decoder<'data> {
    pub(crate) fn new(data: &'data [u8], ident: &ElfIdent) -> Self {
        Decoder {
            data,
            pos: 0,
            class: ident.class,
            encoding: ident.encoding,
        }
    }

    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        bytes.try_into().ok()
    }

    pub(crate) fn u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|b| b[0])
    }

    pub(crate) fn u16(&mut self) -> Option<u16> {
        let bytes = self.take::<2>()?;
        Some(match self.encoding {
            Encoding::Little => u16::from_le_bytes(bytes),
            Encoding::Big => u16::from_be_bytes(bytes),
        })
    }

    pub(crate) fn u32(&mut self) -> Option<u32> {
        let bytes = self.take::<4>()?;
        Some(match self.encoding {
            Encoding::Little => u32::from_le_bytes(bytes),
            Encoding::Big => u32::from_be_bytes(bytes),
        })
    }

    pub(crate) fn u64(&mut self) -> Option<u64> {
        let bytes = self.take::<8>()?;
        Some(match self.encoding {
            Encoding::Little => u64::from_le_bytes(bytes),
            Encoding::Big => u64::from_be_bytes(bytes),
        })
    }

    /// Reads one address-width field: 4 bytes under `Class32`, 8 under
    /// `Class64`, widened to `u64` either way.
    pub(crate) fn addr(&mut self) -> Option<u64> {
        match self.class {
            AddressClass::Class32 => self.u32().map(u64::from),
            AddressClass::Class64 => self.u64(),
        }
    }
}
