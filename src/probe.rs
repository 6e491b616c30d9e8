//! Compile-time layout measurement of `#[repr(C)]` structures.
//!
//! Offsets come from [`core::mem::offset_of!`]. Widths come from the size of the
//! field's declared type, named through a field projection closure that is
//! never called, so nothing is ever instantiated or dereferenced.

use std::any::type_name;
use std::mem::size_of;

/// Storage size of the field selected by `project`.
///
/// The closure only names the field type; it is not invoked.
pub fn width_of<T, F>(_project: impl Fn(&T) -> &F) -> u64 {
    size_of::<F>() as u64
}

/// Short type name of the field selected by `project`, with module paths
/// stripped (`*const AVClass` rather than `*const codec_layout::ffi::AVClass`).
pub fn type_name_of<T, F>(_project: impl Fn(&T) -> &F) -> String {
    short_type_name(type_name::<F>())
}

fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else if c == ':' {
            // Path separator: whatever was collected so far is a module prefix.
            segment.clear();
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}

/// Measures one field: `field_layout!(Type, field)` evaluates to a
/// [`FieldLayout`](crate::FieldLayout) named `Type::field`.
///
/// Fails to compile if `Type` has no field `field`.
#[macro_export]
macro_rules! field_layout {
    ($ty:ident, $field:ident) => {
        $crate::FieldLayout::new(
            stringify!($ty),
            stringify!($field),
            $crate::probe::type_name_of(|s: &$ty| &s.$field),
            ::core::mem::offset_of!($ty, $field) as u64,
            $crate::probe::width_of(|s: &$ty| &s.$field),
        )
    };
}

/// Measures a list of fields of one structure, in the order given.
///
/// ```
/// use codec_layout::struct_layout;
///
/// #[repr(C)]
/// struct Example {
///     a: i32,
///     b: i64,
/// }
///
/// let layout = struct_layout!(Example { a, b });
/// assert_eq!(layout.fields[0].to_string(), "[Example::a @ 0-4]");
/// assert_eq!(layout.fields[1].to_string(), "[Example::b @ 8-8]");
/// ```
#[macro_export]
macro_rules! struct_layout {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        $crate::StructLayout::new(
            stringify!($ty),
            ::core::mem::size_of::<$ty>() as u64,
            ::core::mem::align_of::<$ty>() as u64,
        )
        .with_fields(vec![$($crate::field_layout!($ty, $field)),+])
    };
}
