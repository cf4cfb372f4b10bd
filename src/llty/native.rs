// Copyright (c) 2025 knix
// All rights reserved.

//! Descriptor deduction from Rust types. An unmapped type has no impl, so
//! misuse fails at compile time rather than at resolution time.

use inkwell::types::{AnyTypeEnum, StructType};

use crate::types::{FuncDesc, ScalarKind, TypeDesc, TypeResolver};

/// A Rust type with a known [`TypeDesc`].
pub trait NativeType {
    fn describe() -> TypeDesc;
}

macro_rules! native_scalar {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl NativeType for $t {
                fn describe() -> TypeDesc {
                    TypeDesc::Scalar(ScalarKind::$kind)
                }
            }
        )*
    };
}

native_scalar!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

impl NativeType for () {
    fn describe() -> TypeDesc {
        TypeDesc::Void
    }
}

// usize/isize widths are whatever the target says they are
impl NativeType for usize {
    fn describe() -> TypeDesc {
        match size_of::<usize>() * 8 {
            32 => TypeDesc::Scalar(ScalarKind::U32),
            64 => TypeDesc::Scalar(ScalarKind::U64),
            bits => panic!("unsupported usize width: {bits}"),
        }
    }
}

impl NativeType for isize {
    fn describe() -> TypeDesc {
        match size_of::<isize>() * 8 {
            32 => TypeDesc::Scalar(ScalarKind::I32),
            64 => TypeDesc::Scalar(ScalarKind::I64),
            bits => panic!("unsupported isize width: {bits}"),
        }
    }
}

impl<T: NativeType> NativeType for *const T {
    fn describe() -> TypeDesc {
        TypeDesc::ptr(T::describe())
    }
}

impl<T: NativeType> NativeType for *mut T {
    fn describe() -> TypeDesc {
        TypeDesc::ptr(T::describe())
    }
}

macro_rules! native_fn {
    ($($param:ident)*) => {
        impl<R: NativeType $(, $param: NativeType)*> NativeType
            for extern "C" fn($($param),*) -> R
        {
            fn describe() -> TypeDesc {
                TypeDesc::Func(Box::new(FuncDesc::new(R::describe(), [$($param::describe()),*], false)))
            }
        }

        impl<R: NativeType $(, $param: NativeType)*> NativeType
            for unsafe extern "C" fn($($param),*) -> R
        {
            fn describe() -> TypeDesc {
                TypeDesc::Func(Box::new(FuncDesc::new(R::describe(), [$($param::describe()),*], false)))
            }
        }
    };
}

native_fn!();
native_fn!(A);
native_fn!(A B);
native_fn!(A B C);
native_fn!(A B C D);
native_fn!(A B C D E);
native_fn!(A B C D E F);
native_fn!(A B C D E F G);
native_fn!(A B C D E F G H);

// C variadics require at least one named parameter
macro_rules! native_variadic_fn {
    ($first:ident $($rest:ident)*) => {
        impl<R: NativeType, $first: NativeType $(, $rest: NativeType)*> NativeType
            for unsafe extern "C" fn($first, $($rest,)* ...) -> R
        {
            fn describe() -> TypeDesc {
                TypeDesc::Func(Box::new(FuncDesc::new(
                    R::describe(),
                    [$first::describe() $(, $rest::describe())*],
                    true,
                )))
            }
        }
    };
}

native_variadic_fn!(A);
native_variadic_fn!(A B);
native_variadic_fn!(A B C);
native_variadic_fn!(A B C D);
native_variadic_fn!(A B C D E);
native_variadic_fn!(A B C D E F);
native_variadic_fn!(A B C D E F G);
native_variadic_fn!(A B C D E F G H);

/// An ordered list of native types, for field lists.
pub trait NativeList {
    fn describe_all() -> Vec<TypeDesc>;
}

macro_rules! native_list {
    ($($t:ident)*) => {
        impl<$($t: NativeType),*> NativeList for ($($t,)*) {
            fn describe_all() -> Vec<TypeDesc> {
                vec![$($t::describe()),*]
            }
        }
    };
}

native_list!();
native_list!(A);
native_list!(A B);
native_list!(A B C);
native_list!(A B C D);
native_list!(A B C D E);
native_list!(A B C D E F);
native_list!(A B C D E F G);
native_list!(A B C D E F G H);

impl<'ctx> TypeResolver<'ctx> {
    /// The LLVM type of `T`, through `T`'s descriptor.
    pub fn of<T: NativeType>(&self) -> AnyTypeEnum<'ctx> {
        self.resolve(&T::describe())
    }

    /// [`Self::of`], with `T` deduced from a value.
    pub fn deduce<T: NativeType>(&self, _value: &T) -> AnyTypeEnum<'ctx> {
        self.of::<T>()
    }

    /// Anonymous struct type over a tuple of native field types.
    pub fn craft_of<L: NativeList>(&self, packed: bool) -> StructType<'ctx> {
        self.craft(&L::describe_all(), packed)
    }
}

#[cfg(test)]
mod test {
    use inkwell::context::Context;
    use inkwell::types::BasicType;

    use super::NativeType;
    use crate::types::{ScalarKind, TypeDesc, TypeResolver};

    #[test]
    fn scalars() {
        let ctx = Context::create();
        let r = TypeResolver::new(&ctx);
        assert_eq!(r.of::<i32>().into_int_type().get_bit_width(), 32);
        assert_eq!(r.of::<u64>().into_int_type().get_bit_width(), 64);
        assert_eq!(r.of::<f64>().into_float_type(), ctx.f64_type());
        assert!(r.of::<()>().is_void_type());
    }

    #[test]
    fn word_sized_ints_follow_the_target() {
        let ctx = Context::create();
        let r = TypeResolver::new(&ctx);
        let expected = (size_of::<usize>() * 8) as u32;
        assert_eq!(r.of::<usize>().into_int_type().get_bit_width(), expected);
        assert_eq!(r.of::<isize>().into_int_type().get_bit_width(), expected);
    }

    #[test]
    fn pointers() {
        let ctx = Context::create();
        let r = TypeResolver::new(&ctx);
        assert!(r.of::<*mut u8>().is_pointer_type());
        assert!(r.of::<*const *const i64>().is_pointer_type());
        // void* deduction routes through the same i8* substitution
        assert_eq!(r.of::<*mut ()>(), r.of::<*mut i8>());
    }

    #[test]
    fn function_pointers() {
        let ctx = Context::create();
        let r = TypeResolver::new(&ctx);
        let fn_type = r.of::<extern "C" fn(i32, f64) -> i64>().into_function_type();
        assert_eq!(fn_type.get_return_type(), Some(ctx.i64_type().as_basic_type_enum()));
        assert_eq!(fn_type.count_param_types(), 2);
        assert!(!fn_type.is_var_arg());

        let no_args = r.of::<extern "C" fn() -> ()>().into_function_type();
        assert_eq!(no_args.get_return_type(), None);
        assert_eq!(no_args.count_param_types(), 0);
    }

    #[test]
    fn variadic_function_pointers() {
        let ctx = Context::create();
        let r = TypeResolver::new(&ctx);
        let printf = r.of::<unsafe extern "C" fn(*const i8, ...) -> i32>().into_function_type();
        assert!(printf.is_var_arg());
        assert_eq!(printf.count_param_types(), 1);
    }

    #[test]
    fn deduce_from_value() {
        let ctx = Context::create();
        let r = TypeResolver::new(&ctx);
        assert_eq!(r.deduce(&42i64), r.of::<i64>());
        assert_eq!(r.deduce(&3.5f32).into_float_type(), ctx.f32_type());
    }

    #[test]
    fn craft_of_tuple() {
        let ctx = Context::create();
        let r = TypeResolver::new(&ctx);
        let struct_type = r.craft_of::<(i32, *mut u8, f64)>(false);
        assert_eq!(struct_type.count_fields(), 3);
        assert_eq!(
            struct_type.get_field_type_at_index(0),
            Some(ctx.i32_type().as_basic_type_enum())
        );
        assert!(struct_type.get_field_type_at_index(1).unwrap().is_pointer_type());
        assert_eq!(
            struct_type.get_field_type_at_index(2),
            Some(ctx.f64_type().as_basic_type_enum())
        );
    }

    #[test]
    fn describe_matches_explicit_descriptors() {
        assert_eq!(<i32 as NativeType>::describe(), TypeDesc::Scalar(ScalarKind::I32));
        assert_eq!(
            <*mut f64 as NativeType>::describe(),
            TypeDesc::ptr(TypeDesc::Scalar(ScalarKind::F64))
        );
    }
}
