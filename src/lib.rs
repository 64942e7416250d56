// segfmt: segmented printf-style formatting into fixed NUL-terminated buffers.
// arg:    tagged argument values and the ToArg conversion trait
// cursor: forward-only cursor over the argument stream
// scan:   placeholder arity scanner (unescaped '%' counting)
// writer: bounded NUL-terminated buffer writer
// render: bounded printf directive renderer
// format: the segment walk

#![no_std]

pub mod arg;
pub mod cursor;
pub mod format;
pub mod render;
pub mod scan;
pub mod writer;

pub use arg::{Arg, ToArg};
pub use cursor::ArgCursor;
pub use format::write_segments;
pub use scan::arg_count;
pub use writer::NulBuf;

/// Format a sequence of `(segment, value..)` groups into a fixed
/// buffer, returning the number of bytes written (the buffer is always
/// left NUL-terminated at that length).
///
/// Each segment is an ordinary printf-style format string that consumes
/// as many following values as it has unescaped `%` markers, so long
/// messages can be grouped one chunk per logical field:
///
/// ```
/// let mut buf = [0u8; 64];
/// let len = segfmt::segfmt!(
///     &mut buf,
///     "ip:%d.%d.%d.%d", 10, 0, 0, 1,
///     " v%d.%d", 2, 3,
/// );
/// assert_eq!(&buf[..len], b"ip:10.0.0.1 v2.3");
/// ```
///
/// Two terminator sentinels are appended after the caller's entries so
/// the walk always finds the end of the stream. Runtime (`%*d`) width
/// and precision are not supported; see [`arg_count`] for how arity is
/// inferred.
#[macro_export]
macro_rules! segfmt {
    ($buf:expr $(, $piece:expr)* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::ToArg;
        $crate::write_segments(
            $buf,
            &[$($piece.to_arg(),)* $crate::Arg::Null, $crate::Arg::Null],
        )
    }};
}
