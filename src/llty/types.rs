// Copyright (c) 2025 knix
// All rights reserved.

use inkwell::AddressSpace;
use inkwell::context::Context;
use inkwell::types::{
    AnyType, AnyTypeEnum, BasicMetadataTypeEnum, BasicType, BasicTypeEnum,
    FunctionType as LlvmFunctionType, PointerType, StructType,
};
use itertools::Itertools;
use log::trace;

use crate::SV8;
use crate::platform::{CIntKind, NativeWidths};

/// Fixed-width first-class primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

/// Static description of a source-side type. Every descriptor maps to
/// exactly one LLVM type within a given context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDesc {
    Scalar(ScalarKind),
    /// A C integer kind; its width comes from the resolver's
    /// [`NativeWidths`] table at resolution time.
    CInt(CIntKind),
    Void,
    Ptr(Box<TypeDesc>),
    /// `const`-qualified type. Qualification has no LLVM representation and
    /// is erased at resolution.
    Const(Box<TypeDesc>),
    Func(Box<FuncDesc>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDesc {
    pub ret: Box<TypeDesc>,
    pub params: SV8<TypeDesc>,
    pub variadic: bool,
}

impl FuncDesc {
    pub fn new(
        ret: TypeDesc,
        params: impl IntoIterator<Item = TypeDesc>,
        variadic: bool,
    ) -> FuncDesc {
        FuncDesc { ret: Box::new(ret), params: params.into_iter().collect(), variadic }
    }
}

impl TypeDesc {
    pub fn ptr(inner: TypeDesc) -> TypeDesc {
        TypeDesc::Ptr(Box::new(inner))
    }

    pub fn const_of(inner: TypeDesc) -> TypeDesc {
        TypeDesc::Const(Box::new(inner))
    }

    pub fn func(
        ret: TypeDesc,
        params: impl IntoIterator<Item = TypeDesc>,
        variadic: bool,
    ) -> TypeDesc {
        TypeDesc::Func(Box::new(FuncDesc::new(ret, params, variadic)))
    }

    /// Strips any `Const` wrappers.
    pub fn unqualified(&self) -> &TypeDesc {
        let mut t = self;
        while let TypeDesc::Const(inner) = t {
            t = inner;
        }
        t
    }
}

/// Maps [`TypeDesc`]s onto LLVM types for one context. Stateless apart from
/// the width table; resolution is deterministic and never caches (the
/// context interns types itself).
pub struct TypeResolver<'ctx> {
    ctx: &'ctx Context,
    widths: NativeWidths,
}

impl<'ctx> TypeResolver<'ctx> {
    pub fn new(ctx: &'ctx Context) -> TypeResolver<'ctx> {
        TypeResolver::with_widths(ctx, NativeWidths::host())
    }

    pub fn with_widths(ctx: &'ctx Context, widths: NativeWidths) -> TypeResolver<'ctx> {
        TypeResolver { ctx, widths }
    }

    pub fn context(&self) -> &'ctx Context {
        self.ctx
    }

    pub fn widths(&self) -> &NativeWidths {
        &self.widths
    }

    pub fn resolve(&self, t: &TypeDesc) -> AnyTypeEnum<'ctx> {
        match t {
            TypeDesc::Scalar(kind) => self.scalar_type(*kind).as_any_type_enum(),
            TypeDesc::CInt(kind) => {
                self.ctx.custom_width_int_type(kind.bits(&self.widths)).as_any_type_enum()
            }
            TypeDesc::Void => self.ctx.void_type().as_any_type_enum(),
            TypeDesc::Const(inner) => self.resolve(inner),
            TypeDesc::Ptr(pointee) => self.pointer_to(pointee).as_any_type_enum(),
            TypeDesc::Func(f) => self.resolve_fn(f).as_any_type_enum(),
        }
    }

    /// Resolution restricted to first-class value positions: struct fields
    /// and function parameters. `Void` and bare function types cannot appear
    /// there; asking is a bug in the caller, and we refuse before touching
    /// the context any further.
    pub fn resolve_basic(&self, t: &TypeDesc) -> BasicTypeEnum<'ctx> {
        match self.resolve(t) {
            AnyTypeEnum::IntType(int) => int.into(),
            AnyTypeEnum::FloatType(float) => float.into(),
            AnyTypeEnum::PointerType(ptr) => ptr.into(),
            other => panic!("{t:?} is not a first-class value type (resolved to {other:?})"),
        }
    }

    /// Ordered list resolution. `out[i]` is `resolve_basic(&ts[i])` for
    /// every i, and `out.len() == ts.len()`.
    pub fn resolve_list(&self, ts: &[TypeDesc]) -> Vec<BasicTypeEnum<'ctx>> {
        crate::resolve_all(ts, |t| self.resolve_basic(t))
    }

    pub fn resolve_fn(&self, f: &FuncDesc) -> LlvmFunctionType<'ctx> {
        let params: Vec<BasicMetadataTypeEnum<'ctx>> =
            crate::resolve_all(&f.params, |p| self.resolve_basic(p).into());
        trace!(
            "resolve_fn ({}) variadic={}",
            f.params.iter().map(|p| format!("{p:?}")).join(", "),
            f.variadic
        );
        match f.ret.unqualified() {
            TypeDesc::Void => self.ctx.void_type().fn_type(&params, f.variadic),
            ret => self.resolve_basic(ret).fn_type(&params, f.variadic),
        }
    }

    /// Anonymous struct type over the resolved field list, in field order.
    pub fn craft(&self, fields: &[TypeDesc], packed: bool) -> StructType<'ctx> {
        let field_types = self.resolve_list(fields);
        self.ctx.struct_type(&field_types, packed)
    }

    fn scalar_type(&self, kind: ScalarKind) -> BasicTypeEnum<'ctx> {
        match kind {
            ScalarKind::U8 | ScalarKind::I8 => self.ctx.i8_type().into(),
            ScalarKind::U16 | ScalarKind::I16 => self.ctx.i16_type().into(),
            ScalarKind::U32 | ScalarKind::I32 => self.ctx.i32_type().into(),
            ScalarKind::U64 | ScalarKind::I64 => self.ctx.i64_type().into(),
            ScalarKind::F32 => self.ctx.f32_type().into(),
            ScalarKind::F64 => self.ctx.f64_type().into(),
        }
    }

    #[allow(deprecated)]
    fn pointer_to(&self, pointee: &TypeDesc) -> PointerType<'ctx> {
        match pointee.unqualified() {
            // LLVM does not allow void*, hand out i8* instead
            TypeDesc::Void => self.ctx.i8_type().ptr_type(AddressSpace::default()),
            TypeDesc::Func(f) => self.resolve_fn(f).ptr_type(AddressSpace::default()),
            other => self.resolve_basic(other).ptr_type(AddressSpace::default()),
        }
    }
}
