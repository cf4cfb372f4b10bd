// Copyright (c) 2025 knix
// All rights reserved.

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::types::BasicTypeEnum;
use inkwell::values::{IntValue, PointerValue};
use log::trace;

/// One step of a structured address computation: a literal of a known width,
/// or a value that already exists in the IR. List order is the GEP traversal
/// order, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GepIndex<'ctx> {
    Bits32(i32),
    Bits64(i64),
    Value(IntValue<'ctx>),
}

impl From<i32> for GepIndex<'_> {
    fn from(value: i32) -> Self {
        GepIndex::Bits32(value)
    }
}

impl From<i64> for GepIndex<'_> {
    fn from(value: i64) -> Self {
        GepIndex::Bits64(value)
    }
}

impl<'ctx> From<IntValue<'ctx>> for GepIndex<'ctx> {
    fn from(value: IntValue<'ctx>) -> Self {
        GepIndex::Value(value)
    }
}

/// Resolves each index in place: literals become integer constants of their
/// stated width, values pass through untouched. `out[i]` always corresponds
/// to `indexes[i]`.
pub fn resolve_indexes<'ctx>(
    ctx: &'ctx Context,
    indexes: &[GepIndex<'ctx>],
) -> Vec<IntValue<'ctx>> {
    crate::resolve_all(indexes, |index| match *index {
        GepIndex::Bits32(v) => ctx.i32_type().const_int(v as i64 as u64, true),
        GepIndex::Bits64(v) => ctx.i64_type().const_int(v as u64, true),
        GepIndex::Value(v) => v,
    })
}

/// The all-constant form: `(bits, offset)` pairs known up front. Widths
/// other than 32 and 64 are a bug in the caller.
pub fn const_indexes<'ctx>(ctx: &'ctx Context, pairs: &[(u32, i64)]) -> Vec<IntValue<'ctx>> {
    crate::resolve_all(pairs, |&(bits, offset)| match bits {
        32 => ctx.i32_type().const_int(offset as u64, true),
        64 => ctx.i64_type().const_int(offset as u64, true),
        other => panic!("unsupported gep index width: {other} (expected 32 or 64)"),
    })
}

/// Resolves `indexes` and forwards them, in order, to a GEP instruction off
/// `base`. `pointee` is the source element type the GEP steps through
/// (required since pointers went opaque).
pub fn build_gep<'ctx>(
    ctx: &'ctx Context,
    builder: &Builder<'ctx>,
    pointee: BasicTypeEnum<'ctx>,
    base: PointerValue<'ctx>,
    indexes: &[GepIndex<'ctx>],
    name: &str,
) -> PointerValue<'ctx> {
    let ordered = resolve_indexes(ctx, indexes);
    trace!("build_gep {name}: {} indexes", ordered.len());
    unsafe { builder.build_gep(pointee, base, &ordered, name).unwrap() }
}

/// [`build_gep`] over the all-constant index form.
pub fn build_const_gep<'ctx>(
    ctx: &'ctx Context,
    builder: &Builder<'ctx>,
    pointee: BasicTypeEnum<'ctx>,
    base: PointerValue<'ctx>,
    pairs: &[(u32, i64)],
    name: &str,
) -> PointerValue<'ctx> {
    let ordered = const_indexes(ctx, pairs);
    unsafe { builder.build_gep(pointee, base, &ordered, name).unwrap() }
}
