// Copyright (c) 2025 knix
// All rights reserved.

use smallvec::SmallVec;

pub mod indexes;
pub mod native;
pub mod platform;
pub mod types;

pub use indexes::{GepIndex, build_const_gep, build_gep, const_indexes, resolve_indexes};
pub use native::{NativeList, NativeType};
pub use platform::{CIntKind, NativeWidths};
pub use types::{FuncDesc, ScalarKind, TypeDesc, TypeResolver};

pub type SV8<T> = SmallVec<[T; 8]>;

/// Single-pass positional list resolution, shared by the type and index
/// resolvers. The output is built left-to-right into a pre-sized collection;
/// `out.len() == items.len()` and `out[i]` is `resolve_one(&items[i])` for
/// every i. An empty input yields an empty output.
pub(crate) fn resolve_all<T, U>(items: &[T], mut resolve_one: impl FnMut(&T) -> U) -> Vec<U> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(resolve_one(item));
    }
    out
}
