use gen_elf::{Class, Endian, ImageConfig, ImageWriter, SymbolDesc};
use symscan::{ElfBinary, ElfImage, Error};

const ALL_CONFIGS: [ImageConfig; 4] = [
    ImageConfig {
        class: Class::Elf64,
        endian: Endian::Little,
    },
    ImageConfig {
        class: Class::Elf64,
        endian: Endian::Big,
    },
    ImageConfig {
        class: Class::Elf32,
        endian: Endian::Little,
    },
    ImageConfig {
        class: Class::Elf32,
        endian: Endian::Big,
    },
];

fn basic_writer(config: ImageConfig) -> ImageWriter {
    ImageWriter::new(config)
        .symbol(SymbolDesc::file("main.c"))
        .symbol(SymbolDesc::defined("alpha"))
        .symbol(SymbolDesc::undefined("beta"))
        .symbol(SymbolDesc::defined("Gamma"))
        .symbol(SymbolDesc::undefined("_delta"))
}

fn lines(listing: &str) -> Vec<&str> {
    if listing.is_empty() {
        Vec::new()
    } else {
        listing.split('\n').collect()
    }
}

#[test]
fn rejects_buffers_shorter_than_ident() {
    let image = basic_writer(ImageConfig::default()).build();
    for len in 0..16 {
        let err = ElfImage::parse(&image[..len]).unwrap_err();
        assert!(matches!(err, Error::ParseIdent { .. }), "len {len}: {err}");
    }
}

#[test]
fn rejects_bad_magic() {
    let mut image = basic_writer(ImageConfig::default()).build();
    image[0] = 0x7e;
    assert!(matches!(
        ElfImage::parse(&image).unwrap_err(),
        Error::ParseIdent { .. }
    ));
}

#[test]
fn rejects_bad_class_encoding_and_version() {
    let good = basic_writer(ImageConfig::default()).build();

    let mut bad_class = good.clone();
    bad_class[4] = 3;
    assert!(matches!(
        ElfImage::parse(&bad_class).unwrap_err(),
        Error::ParseIdent { .. }
    ));

    let mut bad_encoding = good.clone();
    bad_encoding[5] = 0;
    assert!(matches!(
        ElfImage::parse(&bad_encoding).unwrap_err(),
        Error::ParseIdent { .. }
    ));

    let mut bad_version = good;
    bad_version[6] = 2;
    assert!(matches!(
        ElfImage::parse(&bad_version).unwrap_err(),
        Error::ParseIdent { .. }
    ));
}

#[test]
fn section_listing_is_indexed_and_in_table_order() {
    let image = basic_writer(ImageConfig::default())
        .section(".data")
        .section(".bss")
        .build();
    let parsed = ElfImage::parse(&image).unwrap();

    assert_eq!(
        parsed.sections(),
        " 0: \n 1: .text\n 2: .data\n 3: .bss\n 4: .symtab\n 5: .strtab\n 6: .shstrtab"
    );
    assert_eq!(lines(&parsed.sections()).len(), parsed.shdrs().len());
    assert_eq!(parsed.section_index(".symtab"), Some(4));
}

#[test]
fn listings_partition_the_named_symbols() {
    let image = basic_writer(ImageConfig::default()).build();
    let parsed = ElfImage::parse(&image).unwrap();

    let defined_listing = parsed.defined_only();
    let undefined_listing = parsed.undefined_only();
    let defined = lines(&defined_listing);
    let undefined = lines(&undefined_listing);

    // Sorted by the lowercase, underscore-stripped key.
    assert_eq!(defined, ["alpha", "Gamma"]);
    assert_eq!(undefined, ["beta", "_delta"]);

    // Disjoint, and together exactly the named non-FILE symbols.
    for name in &defined {
        assert!(!undefined.contains(name));
    }
    let mut union: Vec<&str> = defined.iter().chain(undefined.iter()).copied().collect();
    union.sort_unstable();
    assert_eq!(union, ["Gamma", "_delta", "alpha", "beta"]);
}

#[test]
fn empty_listing_is_an_empty_string() {
    let image = ImageWriter::new(ImageConfig::default())
        .symbol(SymbolDesc::undefined("only_external"))
        .build();
    let parsed = ElfImage::parse(&image).unwrap();

    assert_eq!(parsed.defined_only(), "");
    assert_eq!(lines(&parsed.undefined_only()), ["only_external"]);
}

#[test]
fn round_trip_minimal_image() {
    let image = ImageWriter::new(ImageConfig::default())
        .symbol(SymbolDesc::undefined("_foo_bar"))
        .symbol(SymbolDesc::defined("Baz"))
        .build();
    let parsed = ElfImage::parse(&image).unwrap();

    assert_eq!(parsed.undefined_only(), "_foo_bar");
    assert_eq!(parsed.defined_only(), "Baz");
}

#[test]
fn equal_sort_keys_keep_table_order() {
    // "A_b" and "Ab" both collapse to the key "ab".
    let image = ImageWriter::new(ImageConfig::default())
        .symbol(SymbolDesc::defined("A_b"))
        .symbol(SymbolDesc::defined("Ab"))
        .build();
    let parsed = ElfImage::parse(&image).unwrap();
    assert_eq!(parsed.defined_only(), "A_b\nAb");

    let flipped = ImageWriter::new(ImageConfig::default())
        .symbol(SymbolDesc::defined("Ab"))
        .symbol(SymbolDesc::defined("A_b"))
        .build();
    let parsed = ElfImage::parse(&flipped).unwrap();
    assert_eq!(parsed.defined_only(), "Ab\nA_b");
}

#[test]
fn sorting_is_idempotent() {
    let image = basic_writer(ImageConfig::default())
        .symbol(SymbolDesc::defined("__zz"))
        .symbol(SymbolDesc::defined("Zy"))
        .build();
    let parsed = ElfImage::parse(&image).unwrap();

    let listing = parsed.defined_only();
    let mut resorted = lines(&listing);
    resorted.sort_by_key(|name| name.to_lowercase().replace('_', ""));
    assert_eq!(resorted, lines(&listing));
}

#[test]
fn all_classes_and_encodings_agree() {
    let reference = {
        let image = basic_writer(ImageConfig::default()).build();
        let parsed = ElfImage::parse(&image).unwrap();
        (
            parsed.sections(),
            parsed.defined_only(),
            parsed.undefined_only(),
        )
    };

    for config in ALL_CONFIGS {
        let image = basic_writer(config).build();
        let parsed = ElfImage::parse(&image)
            .unwrap_or_else(|e| panic!("{:?}/{:?}: {e}", config.class, config.endian));
        assert_eq!(parsed.sections(), reference.0);
        assert_eq!(parsed.defined_only(), reference.1);
        assert_eq!(parsed.undefined_only(), reference.2);
    }
}

#[test]
fn rejects_symtab_size_not_multiple_of_entsize() {
    let image = basic_writer(ImageConfig::default())
        .symtab_entsize(17)
        .build();
    assert!(matches!(
        ElfImage::parse(&image).unwrap_err(),
        Error::ParseSym { .. }
    ));
}

#[test]
fn rejects_symtab_entsize_zero() {
    let image = basic_writer(ImageConfig::default()).symtab_entsize(0).build();
    assert!(matches!(
        ElfImage::parse(&image).unwrap_err(),
        Error::ParseSym { .. }
    ));
}

#[test]
fn rejects_missing_symtab_or_strtab() {
    let no_symtab = basic_writer(ImageConfig::default())
        .symtab_name(".mysyms")
        .build();
    assert!(matches!(
        ElfImage::parse(&no_symtab).unwrap_err(),
        Error::FindSection { .. }
    ));

    let no_strtab = basic_writer(ImageConfig::default())
        .strtab_name(".mystrings")
        .build();
    assert!(matches!(
        ElfImage::parse(&no_strtab).unwrap_err(),
        Error::FindSection { .. }
    ));
}

#[test]
fn rejects_unterminated_symbol_name() {
    let image = basic_writer(ImageConfig::default())
        .chop_strtab_terminator()
        .build();
    assert!(matches!(
        ElfImage::parse(&image).unwrap_err(),
        Error::ParseStrtab { .. }
    ));
}

#[test]
fn rejects_section_name_index_out_of_range() {
    // e_shstrndx sits at byte 62 of an ELF64 little-endian header.
    let mut image = basic_writer(ImageConfig::default()).build();
    image[62..64].copy_from_slice(&u16::MAX.to_le_bytes());
    assert!(matches!(
        ElfImage::parse(&image).unwrap_err(),
        Error::FindSection { .. }
    ));
}

#[test]
fn rejects_section_table_past_end_of_image() {
    // e_shoff sits at bytes 40..48 of an ELF64 little-endian header.
    let mut image = basic_writer(ImageConfig::default()).build();
    let len = image.len() as u64;
    image[40..48].copy_from_slice(&len.to_le_bytes());
    assert!(matches!(
        ElfImage::parse(&image).unwrap_err(),
        Error::ParseShdr { .. }
    ));
}

#[test]
fn named_source_reports_the_same_result() {
    let image = basic_writer(ImageConfig::default()).build();
    let binary = ElfBinary::new("fixture.o", &image);
    assert_eq!(binary.name(), "fixture.o");

    let parsed = binary.parse().unwrap();
    assert_eq!(
        lines(&parsed.undefined_only()),
        lines(&ElfImage::parse(&image).unwrap().undefined_only())
    );
}
