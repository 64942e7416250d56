//! Tagged argument values for the segmented formatter.
//!
//! The argument stream is a flat slice of [`Arg`]; format segments are
//! `Arg::Str` entries interpreted positionally, and `Arg::Null` is the
//! end-of-stream sentinel. [`ToArg`] converts the common scalar and
//! string types so call sites can pass plain literals.

/// One entry in the argument stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arg<'a> {
    /// End-of-stream sentinel when read in segment position.
    Null,
    /// Signed integer (`%d`, `%i`; reinterpreted for `%u`/`%x`/`%o`).
    Int(i64),
    /// Unsigned integer (`%u`, `%x`, `%X`, `%o`).
    Uint(u64),
    /// Floating point (`%f`).
    Float(f64),
    /// Single character (`%c`).
    Char(char),
    /// Borrowed string (`%s`, or a format segment in segment position).
    Str(&'a str),
}

impl<'a> Arg<'a> {
    /// Short kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Null => "null",
            Arg::Int(_) => "int",
            Arg::Uint(_) => "uint",
            Arg::Float(_) => "float",
            Arg::Char(_) => "char",
            Arg::Str(_) => "str",
        }
    }
}

/// Conversion into [`Arg`], implemented for the types the `segfmt!`
/// macro accepts in value (and segment) position.
pub trait ToArg<'a> {
    fn to_arg(self) -> Arg<'a>;
}

impl<'a> ToArg<'a> for Arg<'a> {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        self
    }
}

impl<'a> ToArg<'a> for &'a str {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Str(self)
    }
}

impl<'a> ToArg<'a> for char {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Char(self)
    }
}

macro_rules! to_arg_int {
    ($variant:ident: $($t:ty),*) => {
        $(
            impl<'a> ToArg<'a> for $t {
                #[inline]
                fn to_arg(self) -> Arg<'a> {
                    Arg::$variant(self as _)
                }
            }
        )*
    };
}

to_arg_int!(Int: i8, i16, i32, i64, isize);
to_arg_int!(Uint: u8, u16, u32, u64, usize);
to_arg_int!(Float: f32, f64);
