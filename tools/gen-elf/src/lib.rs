//! Generates minimal synthetic ELF images for tests.
//!
//! The writer emits only what a symbol scanner consumes: the file header,
//! a `.text` placeholder, `.symtab`, `.strtab`, `.shstrtab`, and the
//! section header table. Both address classes and both byte orders are
//! supported, plus a few knobs that deliberately malform the output so
//! error paths can be exercised. No parsing happens here.

/// Address class of the generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Elf32,
    Elf64,
}

/// Byte order of the generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Shape of the generated image.
#[derive(Debug, Clone, Copy)]
pub struct ImageConfig {
    pub class: Class,
    pub endian: Endian,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            class: Class::Elf64,
            endian: Endian::Little,
        }
    }
}

/// One symbol to place in the generated `.symtab`.
#[derive(Debug, Clone)]
pub struct SymbolDesc {
    pub name: String,
    pub shndx: u16,
    pub sym_type: u8,
}

impl SymbolDesc {
    /// A symbol residing in the `.text` section (index 1).
    pub fn defined(name: &str) -> Self {
        SymbolDesc {
            name: name.to_string(),
            shndx: 1,
            sym_type: STT_NOTYPE,
        }
    }

    /// An external reference (section index `SHN_UNDEF`).
    pub fn undefined(name: &str) -> Self {
        SymbolDesc {
            name: name.to_string(),
            shndx: 0,
            sym_type: STT_NOTYPE,
        }
    }

    /// A source-file marker (`STT_FILE`).
    pub fn file(name: &str) -> Self {
        SymbolDesc {
            name: name.to_string(),
            shndx: 0,
            sym_type: STT_FILE,
        }
    }
}

const STT_NOTYPE: u8 = 0;
const STT_FILE: u8 = 4;

const SHT_NULL: u32 = 0;
const SHT_PROGBITS: u32 = 1;
const SHT_SYMTAB: u32 = 2;
const SHT_STRTAB: u32 = 3;

/// Builds one synthetic image.
///
/// Section layout is fixed: `[NULL, .text, <extras>, .symtab, .strtab,
/// .shstrtab]`, with the section header table at the end of the file.
#[derive(Debug)]
pub struct ImageWriter {
    config: ImageConfig,
    symbols: Vec<SymbolDesc>,
    extra_sections: Vec<String>,
    symtab_name: Option<String>,
    strtab_name: Option<String>,
    symtab_entsize: Option<u64>,
    chop_strtab_terminator: bool,
}

impl ImageWriter {
    pub fn new(config: ImageConfig) -> Self {
        ImageWriter {
            config,
            symbols: Vec::new(),
            extra_sections: Vec::new(),
            symtab_name: None,
            strtab_name: None,
            symtab_entsize: None,
            chop_strtab_terminator: false,
        }
    }

    /// Appends a symbol; table order is the call order.
    pub fn symbol(mut self, desc: SymbolDesc) -> Self {
        self.symbols.push(desc);
        self
    }

    /// Appends an extra empty `PROGBITS` section between `.text` and
    /// `.symtab`.
    pub fn section(mut self, name: &str) -> Self {
        self.extra_sections.push(name.to_string());
        self
    }

    /// Renames the symbol-table section (to generate images a scanner
    /// should reject for lacking `.symtab`).
    pub fn symtab_name(mut self, name: &str) -> Self {
        self.symtab_name = Some(name.to_string());
        self
    }

    /// Renames the symbol string-table section.
    pub fn strtab_name(mut self, name: &str) -> Self {
        self.strtab_name = Some(name.to_string());
        self
    }

    /// Overrides the `sh_entsize` recorded for `.symtab` without changing
    /// its contents, so size and entry size disagree.
    pub fn symtab_entsize(mut self, entsize: u64) -> Self {
        self.symtab_entsize = Some(entsize);
        self
    }

    /// Drops the final NUL of `.strtab` (shrinking `sh_size` to match),
    /// leaving the last symbol name unterminated.
    pub fn chop_strtab_terminator(mut self) -> Self {
        self.chop_strtab_terminator = true;
        self
    }

    /// Emits the image.
    pub fn build(&self) -> Vec<u8> {
        let emit = Emit {
            class: self.config.class,
            endian: self.config.endian,
        };

        let symtab_name = self.symtab_name.as_deref().unwrap_or(".symtab");
        let strtab_name = self.strtab_name.as_deref().unwrap_or(".strtab");

        // Section names, in table order.
        let mut section_names: Vec<String> = vec![String::new(), ".text".to_string()];
        section_names.extend(self.extra_sections.iter().cloned());
        let symtab_index = section_names.len();
        section_names.push(symtab_name.to_string());
        section_names.push(strtab_name.to_string());
        section_names.push(".shstrtab".to_string());
        let shnum = section_names.len();
        let shstrndx = shnum - 1;

        let (shstrtab, name_offsets) = build_strtab(&section_names);

        // Symbol name blob: entry 0 is the null symbol with the empty name.
        let mut symbol_names: Vec<String> = vec![String::new()];
        symbol_names.extend(self.symbols.iter().map(|s| s.name.clone()));
        let (mut strtab, symbol_name_offsets) = build_strtab(&symbol_names);
        if self.chop_strtab_terminator {
            strtab.pop();
        }

        // Symbol entries, null symbol first.
        let mut symtab = Vec::new();
        emit.symbol(&mut symtab, 0, 0, 0);
        for (desc, &name_off) in self.symbols.iter().zip(&symbol_name_offsets[1..]) {
            emit.symbol(&mut symtab, name_off, desc.sym_type, desc.shndx);
        }

        // File layout: ehdr, section contents, then the header table.
        let ehsize = emit.ehsize();
        let symtab_off = ehsize;
        let strtab_off = symtab_off + symtab.len();
        let shstrtab_off = strtab_off + strtab.len();
        let shoff = shstrtab_off + shstrtab.len();

        let mut image = Vec::new();
        emit.ehdr(&mut image, shoff as u64, shnum as u16, shstrndx as u16);
        image.extend_from_slice(&symtab);
        image.extend_from_slice(&strtab);
        image.extend_from_slice(&shstrtab);

        for (index, name) in section_names.iter().enumerate() {
            let name_off = name_offsets[index];
            let shdr = if index == 0 {
                Shdr::zero(name_off, SHT_NULL)
            } else if index == symtab_index {
                Shdr {
                    name: name_off,
                    sh_type: SHT_SYMTAB,
                    offset: symtab_off as u64,
                    size: symtab.len() as u64,
                    link: (symtab_index + 1) as u32,
                    entsize: self.symtab_entsize.unwrap_or(emit.sym_entsize() as u64),
                }
            } else if index == symtab_index + 1 {
                Shdr {
                    name: name_off,
                    sh_type: SHT_STRTAB,
                    offset: strtab_off as u64,
                    size: strtab.len() as u64,
                    link: 0,
                    entsize: 0,
                }
            } else if index == shstrndx {
                Shdr {
                    name: name_off,
                    sh_type: SHT_STRTAB,
                    offset: shstrtab_off as u64,
                    size: shstrtab.len() as u64,
                    link: 0,
                    entsize: 0,
                }
            } else {
                // .text and the extras: empty PROGBITS placeholders.
                Shdr::zero(name_off, SHT_PROGBITS)
            };
            emit.shdr(&mut image, &shdr);
        }

        image
    }
}

/// Concatenates names into one NUL-terminated blob, returning each name's
/// offset.
fn build_strtab(names: &[String]) -> (Vec<u8>, Vec<u32>) {
    let mut blob = vec![0u8];
    let mut offsets = Vec::with_capacity(names.len());
    for name in names {
        if name.is_empty() {
            offsets.push(0);
            continue;
        }
        offsets.push(blob.len() as u32);
        blob.extend_from_slice(name.as_bytes());
        blob.push(0);
    }
    (blob, offsets)
}

struct Shdr {
    name: u32,
    sh_type: u32,
    offset: u64,
    size: u64,
    link: u32,
    entsize: u64,
}

impl Shdr {
    fn zero(name: u32, sh_type: u32) -> Self {
        Shdr {
            name,
            sh_type,
            offset: 0,
            size: 0,
            link: 0,
            entsize: 0,
        }
    }
}

/// Field emitter for one class/endian combination.
#[derive(Clone, Copy)]
struct Emit {
    class: Class,
    endian: Endian,
}

impl Emit {
    fn u16(&self, out: &mut Vec<u8>, v: u16) {
        match self.endian {
            Endian::Little => out.extend_from_slice(&v.to_le_bytes()),
            Endian::Big => out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn u32(&self, out: &mut Vec<u8>, v: u32) {
        match self.endian {
            Endian::Little => out.extend_from_slice(&v.to_le_bytes()),
            Endian::Big => out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn u64(&self, out: &mut Vec<u8>, v: u64) {
        match self.endian {
            Endian::Little => out.extend_from_slice(&v.to_le_bytes()),
            Endian::Big => out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn addr(&self, out: &mut Vec<u8>, v: u64) {
        match self.class {
            Class::Elf32 => self.u32(out, v as u32),
            Class::Elf64 => self.u64(out, v),
        }
    }

    fn ehsize(&self) -> usize {
        match self.class {
            Class::Elf32 => 52,
            Class::Elf64 => 64,
        }
    }

    fn shentsize(&self) -> usize {
        match self.class {
            Class::Elf32 => 40,
            Class::Elf64 => 64,
        }
    }

    fn sym_entsize(&self) -> usize {
        match self.class {
            Class::Elf32 => 16,
            Class::Elf64 => 24,
        }
    }

    fn ehdr(&self, out: &mut Vec<u8>, shoff: u64, shnum: u16, shstrndx: u16) {
        out.extend_from_slice(&[0x7f, b'E', b'L', b'F']);
        out.push(match self.class {
            Class::Elf32 => 1,
            Class::Elf64 => 2,
        });
        out.push(match self.endian {
            Endian::Little => 1,
            Endian::Big => 2,
        });
        out.push(1); // EI_VERSION
        out.push(0); // EI_OSABI: System V
        out.push(0); // EI_ABIVERSION
        out.extend_from_slice(&[0; 7]);

        self.u16(out, 1); // e_type: ET_REL
        self.u16(
            out,
            match self.class {
                Class::Elf32 => 3,   // EM_386
                Class::Elf64 => 62,  // EM_X86_64
            },
        );
        self.u32(out, 1); // e_version
        self.addr(out, 0); // e_entry
        self.addr(out, 0); // e_phoff
        self.addr(out, shoff);
        self.u32(out, 0); // e_flags
        self.u16(out, self.ehsize() as u16);
        self.u16(out, 0); // e_phentsize
        self.u16(out, 0); // e_phnum
        self.u16(out, self.shentsize() as u16);
        self.u16(out, shnum);
        self.u16(out, shstrndx);
    }

    fn shdr(&self, out: &mut Vec<u8>, shdr: &Shdr) {
        self.u32(out, shdr.name);
        self.u32(out, shdr.sh_type);
        self.addr(out, 0); // sh_flags
        self.addr(out, 0); // sh_addr
        self.addr(out, shdr.offset);
        self.addr(out, shdr.size);
        self.u32(out, shdr.link);
        self.u32(out, 0); // sh_info
        self.addr(out, 1); // sh_addralign
        self.addr(out, shdr.entsize);
    }

    fn symbol(&self, out: &mut Vec<u8>, name: u32, sym_type: u8, shndx: u16) {
        match self.class {
            Class::Elf32 => {
                self.u32(out, name);
                self.u32(out, 0); // st_value
                self.u32(out, 0); // st_size
                out.push(sym_type); // st_info: LOCAL binding, given type
                out.push(0); // st_other
                self.u16(out, shndx);
            }
            Class::Elf64 => {
                self.u32(out, name);
                out.push(sym_type);
                out.push(0);
                self.u16(out, shndx);
                self.u64(out, 0); // st_value
                self.u64(out, 0); // st_size
            }
        }
    }
}
