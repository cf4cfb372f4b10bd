// Copyright (c) 2025 knix
// All rights reserved.

//! Bit widths of the C integer kinds. LLVM integer types carry an exact
//! width, so a descriptor naming a C kind ("long") has to be resolved
//! against some data model; which one is the caller's decision, not ours.

/// A C integer kind whose width depends on the platform's data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CIntKind {
    Char,
    SChar,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
}

impl CIntKind {
    /// Width in bits under the given data model. Signedness never affects
    /// the LLVM type; it is carried so descriptors can state intent.
    pub fn bits(self, widths: &NativeWidths) -> u32 {
        match self {
            CIntKind::Char | CIntKind::SChar | CIntKind::UChar => widths.char_bits,
            CIntKind::Short | CIntKind::UShort => widths.short_bits,
            CIntKind::Int | CIntKind::UInt => widths.int_bits,
            CIntKind::Long | CIntKind::ULong => widths.long_bits,
            CIntKind::LongLong | CIntKind::ULongLong => widths.long_long_bits,
        }
    }
}

/// Storage widths, in bits, of the C integer kinds under one data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeWidths {
    pub char_bits: u32,
    pub short_bits: u32,
    pub int_bits: u32,
    pub long_bits: u32,
    pub long_long_bits: u32,
}

impl NativeWidths {
    /// Unix 64-bit (Linux, macOS).
    pub const LP64: NativeWidths = NativeWidths {
        char_bits: 8,
        short_bits: 16,
        int_bits: 32,
        long_bits: 64,
        long_long_bits: 64,
    };

    /// 32-bit targets.
    pub const ILP32: NativeWidths = NativeWidths { long_bits: 32, ..NativeWidths::LP64 };

    /// Windows 64-bit.
    pub const LLP64: NativeWidths = NativeWidths { long_bits: 32, ..NativeWidths::LP64 };

    /// Widths of the host toolchain's own C types, from `core::ffi`.
    pub fn host() -> NativeWidths {
        use core::ffi::{c_char, c_int, c_long, c_longlong, c_short};
        NativeWidths {
            char_bits: (size_of::<c_char>() * 8) as u32,
            short_bits: (size_of::<c_short>() * 8) as u32,
            int_bits: (size_of::<c_int>() * 8) as u32,
            long_bits: (size_of::<c_long>() * 8) as u32,
            long_long_bits: (size_of::<c_longlong>() * 8) as u32,
        }
    }
}
