//! The segment walk.
//!
//! [`write_segments`] consumes a flat argument stream shaped
//! `segment, value.., segment, value.., .., Null` and concatenates the
//! rendered segments into one NUL-terminated string. Two cursors move
//! in lock-step: the bounded writer over the output buffer, and the
//! argument cursor over the stream. Each segment's arity is inferred by
//! counting its unescaped `%` markers; after rendering, exactly that
//! many values are discarded (the renderer itself only peeks).
//!
//! A render failure, or a non-text value in segment position, stops
//! the walk early: the buffer keeps what was already written (still
//! terminated) and the accumulated length is returned. Truncation does
//! not stop the walk; later segments keep consuming their values even
//! once the buffer is full, so the stream never desynchronizes.

use crate::arg::Arg;
use crate::cursor::ArgCursor;
use crate::render;
use crate::scan;
use crate::writer::NulBuf;

/// Format the segment stream into `buf`.
///
/// Returns the number of bytes written, excluding the terminator:
/// always ≤ `buf.len() - 1`, and 0 for an empty buffer. `buf[len]` is
/// NUL whenever `buf` is non-empty.
///
/// Prefer the [`segfmt!`](crate::segfmt) macro, which converts plain
/// values and appends the terminator sentinels.
pub fn write_segments(buf: &mut [u8], stream: &[Arg<'_>]) -> usize {
    let mut out = NulBuf::new(buf);
    let mut args = ArgCursor::new(stream);

    loop {
        match args.take() {
            None | Some(Arg::Null) => break,
            Some(Arg::Str(fmt)) => {
                let arity = scan::arg_count(fmt);
                if let Err(e) = render::segment(&mut out, fmt, &args) {
                    log::warn!("segfmt: stopping early: {}", e);
                    break;
                }
                // vsnprintf-style: the renderer reads values without
                // consuming them; discard them here by the counted
                // arity so the next read lands on the next segment.
                args.advance(arity);
            }
            Some(other) => {
                log::warn!("segfmt: {} value in segment position", other.kind());
                break;
            }
        }
    }

    out.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &[u8], len: usize) -> &str {
        assert_eq!(buf[len], 0, "missing terminator");
        core::str::from_utf8(&buf[..len]).unwrap()
    }

    #[test]
    fn empty_input() {
        let mut buf = [0xffu8; 16];
        let len = crate::segfmt!(&mut buf);
        assert_eq!(len, 0);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn pure_literal() {
        let mut buf = [0u8; 32];
        let len = crate::segfmt!(&mut buf, "testando");
        assert_eq!(text(&buf, len), "testando");
        assert_eq!(len, 8);
    }

    #[test]
    fn single_placeholder() {
        let mut buf = [0u8; 32];
        let len = crate::segfmt!(&mut buf, "teste %d", 1);
        assert_eq!(text(&buf, len), "teste 1");
    }

    #[test]
    fn multi_placeholder_segment() {
        let mut buf = [0u8; 32];
        let len = crate::segfmt!(&mut buf, "abcd%c %s", 'e', "2");
        assert_eq!(text(&buf, len), "abcde 2");
    }

    #[test]
    fn cursor_realigns_between_segments() {
        let mut buf = [0u8; 32];
        let len = crate::segfmt!(&mut buf, "fghij %d", 3, "/%d", 4);
        assert_eq!(text(&buf, len), "fghij 3/4");
    }

    #[test]
    fn mixed_arity_and_trailing_literal() {
        let mut buf = [0u8; 32];
        let len = crate::segfmt!(&mut buf, "doido %d.%d", 5, 6, " lá ele");
        assert_eq!(text(&buf, len), "doido 5.6 lá ele");
    }

    #[test]
    fn readable_call_site() {
        // the shape this crate exists for: one chunk per logical field
        let mut buf = [0u8; 64];
        let len = crate::segfmt!(
            &mut buf,
            "ip:%d.%d.%d.%d", 10, 0, 0, 1,
            " v%d.%d", 2, 3,
            " %s", "conectado",
            " %08x", 0xdead_beefu32,
        );
        assert_eq!(text(&buf, len), "ip:10.0.0.1 v2.3 conectado deadbeef");
    }

    #[test]
    fn escaped_percent() {
        let mut buf = [0u8; 32];
        let len = crate::segfmt!(&mut buf, "100%%");
        assert_eq!(text(&buf, len), "100%");
    }

    #[test]
    fn truncation_caps_length() {
        let mut buf = [0xffu8; 8];
        let len = crate::segfmt!(&mut buf, "fghij %d", 3, "/%d", 4);
        assert_eq!(len, 7);
        assert_eq!(text(&buf, len), "fghij 3");
    }

    #[test]
    fn minimum_capacity_yields_empty_string() {
        let mut buf = [0xffu8; 1];
        let len = crate::segfmt!(&mut buf, "teste %d", 1);
        assert_eq!(len, 0);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn zero_capacity_is_a_noop() {
        let mut buf = [0u8; 0];
        let len = write_segments(&mut buf, &[Arg::Str("x"), Arg::Null]);
        assert_eq!(len, 0);
    }

    #[test]
    fn full_buffer_still_consumes_arity() {
        // first segment fills the buffer; the ones after it must keep
        // discarding their values so the stream stays aligned
        let mut buf = [0u8; 8];
        let len = crate::segfmt!(&mut buf, "0123456789", "%d%d", 1, 2, "%s", "x");
        assert_eq!(len, 7);
        assert_eq!(text(&buf, len), "0123456");
    }

    #[test]
    fn render_failure_stops_early() {
        let mut buf = [0u8; 32];
        let len = crate::segfmt!(&mut buf, "ok ", "x%qy", 1, "tail");
        // prior output plus the failed segment's partial fragment
        assert_eq!(text(&buf, len), "ok x");
    }

    #[test]
    fn missing_argument_stops_early() {
        let mut buf = [0u8; 32];
        let len = crate::segfmt!(&mut buf, "n=%d");
        assert_eq!(text(&buf, len), "n=");
        assert_eq!(len, 2);
    }

    #[test]
    fn value_in_segment_position_stops_early() {
        let mut buf = [0u8; 32];
        let len = write_segments(&mut buf, &[Arg::Int(3), Arg::Null]);
        assert_eq!(len, 0);

        let len = write_segments(&mut buf, &[Arg::Str("a"), Arg::Int(3), Arg::Null]);
        assert_eq!(text(&buf, len), "a");
    }

    #[test]
    fn works_without_sentinel_guards() {
        // a hand-built stream that simply ends is equivalent to one
        // that is properly terminated
        let mut buf = [0u8; 32];
        let len = write_segments(&mut buf, &[Arg::Str("%d+%d"), Arg::Int(1), Arg::Int(2)]);
        assert_eq!(text(&buf, len), "1+2");
    }

    #[test]
    fn reentrant_across_calls() {
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        let la = crate::segfmt!(&mut a, "%d", 1);
        let lb = crate::segfmt!(&mut b, "%d", 2);
        assert_eq!(text(&a, la), "1");
        assert_eq!(text(&b, lb), "2");
    }
}
