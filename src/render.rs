//! Bounded printf-style directive renderer.
//!
//! [`segment`] writes one format segment through a [`NulBuf`], reading
//! its values by *peeking* at the argument cursor. The cursor is never
//! advanced here; the segment walk discards the values afterwards using
//! the statically counted arity.
//!
//! Supported: `%d`/`%i`, `%u`, `%x`/`%X`, `%o`, `%c`, `%s`, `%f`, `%%`,
//! with the `-`, `+`, space, `0` and `#` flags, static decimal width
//! and `.` precision. Length modifiers (`h`, `l`, `z`, `j`, `t`) are
//! parsed and ignored since arguments are already typed. Runtime
//! (`*`) width/precision is rejected outright rather than silently
//! desynchronizing the argument stream.
//!
//! Truncation is not an error: the bounded writer absorbs whatever does
//! not fit. Errors (`"render:"`-prefixed) cover malformed directives,
//! argument kind mismatches, and running out of arguments.

use core::fmt::Write;

use crate::arg::Arg;
use crate::cursor::ArgCursor;
use crate::writer::NulBuf;

const ERR_STAR: &str = "render: star width/precision unsupported";
const ERR_MISMATCH: &str = "render: argument type mismatch";
const ERR_MISSING: &str = "render: missing argument";

struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
    width: usize,
    precision: Option<usize>,
    conv: u8,
}

impl Spec {
    /// Parse the directive body following a `%`. Returns the spec and
    /// the number of bytes consumed.
    fn parse(b: &[u8]) -> Result<(Spec, usize), &'static str> {
        let mut s = Spec {
            minus: false,
            plus: false,
            space: false,
            zero: false,
            alt: false,
            width: 0,
            precision: None,
            conv: 0,
        };
        let mut i = 0;

        loop {
            match b.get(i) {
                Some(&b'-') => s.minus = true,
                Some(&b'+') => s.plus = true,
                Some(&b' ') => s.space = true,
                Some(&b'0') => s.zero = true,
                Some(&b'#') => s.alt = true,
                _ => break,
            }
            i += 1;
        }

        if b.get(i) == Some(&b'*') {
            return Err(ERR_STAR);
        }
        while let Some(&c) = b.get(i) {
            if !c.is_ascii_digit() {
                break;
            }
            s.width = s.width.saturating_mul(10).saturating_add((c - b'0') as usize);
            i += 1;
        }

        if b.get(i) == Some(&b'.') {
            i += 1;
            if b.get(i) == Some(&b'*') {
                return Err(ERR_STAR);
            }
            let mut p = 0usize;
            while let Some(&c) = b.get(i) {
                if !c.is_ascii_digit() {
                    break;
                }
                p = p.saturating_mul(10).saturating_add((c - b'0') as usize);
                i += 1;
            }
            s.precision = Some(p);
        }

        while matches!(b.get(i), Some(&(b'h' | b'l' | b'z' | b'j' | b't'))) {
            i += 1;
        }

        match b.get(i) {
            None => Err("render: truncated directive"),
            Some(&c) => match c {
                b'd' | b'i' | b'u' | b'x' | b'X' | b'o' | b'c' | b's' | b'f' => {
                    s.conv = c;
                    Ok((s, i + 1))
                }
                _ => Err("render: unknown conversion"),
            },
        }
    }
}

/// Render one format segment into `w`, peeking values off `args`.
pub fn segment(w: &mut NulBuf<'_>, fmt: &str, args: &ArgCursor<'_>) -> Result<(), &'static str> {
    let b = fmt.as_bytes();
    let mut i = 0;
    let mut next = 0; // values peeked so far

    while i < b.len() {
        if b[i] != b'%' {
            let run = b[i..].iter().position(|&c| c == b'%').unwrap_or(b.len() - i);
            w.push_bytes(&b[i..i + run]);
            i += run;
            continue;
        }
        if b.get(i + 1) == Some(&b'%') {
            w.push_bytes(b"%");
            i += 2;
            continue;
        }

        let (spec, used) = Spec::parse(&b[i + 1..])?;
        i += 1 + used;

        let arg = match args.peek(next) {
            None | Some(Arg::Null) => return Err(ERR_MISSING),
            Some(a) => a,
        };
        next += 1;

        emit(w, &spec, arg)?;
    }

    Ok(())
}

fn emit(w: &mut NulBuf<'_>, spec: &Spec, arg: Arg<'_>) -> Result<(), &'static str> {
    let mut digits = [0u8; 24];

    match spec.conv {
        b'd' | b'i' => {
            let v = as_int(arg)?;
            let sign = if v < 0 {
                "-"
            } else if spec.plus {
                "+"
            } else if spec.space {
                " "
            } else {
                ""
            };
            let ds = radix(v.unsigned_abs(), 10, false, &mut digits);
            emit_num(w, spec, sign, ds);
        }
        b'u' => {
            let v = as_uint(arg)?;
            let ds = radix(v, 10, false, &mut digits);
            emit_num(w, spec, "", ds);
        }
        b'x' | b'X' => {
            let v = as_uint(arg)?;
            let upper = spec.conv == b'X';
            let ds = radix(v, 16, upper, &mut digits);
            let prefix = match (spec.alt && v != 0, upper) {
                (true, false) => "0x",
                (true, true) => "0X",
                _ => "",
            };
            emit_num(w, spec, prefix, ds);
        }
        b'o' => {
            let v = as_uint(arg)?;
            let ds = radix(v, 8, false, &mut digits);
            let prefix = if spec.alt && !ds.starts_with('0') { "0" } else { "" };
            emit_num(w, spec, prefix, ds);
        }
        b'c' => {
            let c = match arg {
                Arg::Char(c) => c,
                Arg::Int(v) => {
                    char::from_u32(v as u32).ok_or("render: invalid character code")?
                }
                Arg::Uint(v) => {
                    char::from_u32(v as u32).ok_or("render: invalid character code")?
                }
                _ => return Err(ERR_MISMATCH),
            };
            let mut cb = [0u8; 4];
            emit_str(w, spec, c.encode_utf8(&mut cb));
        }
        b's' => {
            let s = match arg {
                Arg::Str(s) => s,
                _ => return Err(ERR_MISMATCH),
            };
            // precision caps the number of characters taken
            let s = match spec.precision {
                Some(p) => match s.char_indices().nth(p) {
                    Some((idx, _)) => &s[..idx],
                    None => s,
                },
                None => s,
            };
            emit_str(w, spec, s);
        }
        b'f' => {
            let v = match arg {
                Arg::Float(v) => v,
                _ => return Err(ERR_MISMATCH),
            };
            emit_float(w, spec, v);
        }
        _ => return Err("render: unknown conversion"),
    }

    Ok(())
}

fn as_int(arg: Arg<'_>) -> Result<i64, &'static str> {
    match arg {
        Arg::Int(v) => Ok(v),
        Arg::Uint(v) => Ok(v as i64),
        _ => Err(ERR_MISMATCH),
    }
}

fn as_uint(arg: Arg<'_>) -> Result<u64, &'static str> {
    match arg {
        Arg::Int(v) => Ok(v as u64),
        Arg::Uint(v) => Ok(v),
        _ => Err(ERR_MISMATCH),
    }
}

/// Digits of `v` in `base`, written at the tail of `buf`.
fn radix<'b>(mut v: u64, base: u64, upper: bool, buf: &'b mut [u8; 24]) -> &'b str {
    const LOWER: &[u8; 16] = b"0123456789abcdef";
    const UPPER: &[u8; 16] = b"0123456789ABCDEF";
    let table = if upper { UPPER } else { LOWER };

    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = table[(v % base) as usize];
        v /= base;
        if v == 0 {
            break;
        }
    }
    core::str::from_utf8(&buf[pos..]).unwrap_or("")
}

/// Pad and write an integer rendering: `prefix` (sign or base marker),
/// precision zeros, digits, justified to the field width.
fn emit_num(w: &mut NulBuf<'_>, spec: &Spec, prefix: &str, digits: &str) {
    // C semantics: an explicit zero precision renders zero as nothing
    let digits = if spec.precision == Some(0) && digits == "0" {
        ""
    } else {
        digits
    };
    let zeros = spec.precision.map_or(0, |p| p.saturating_sub(digits.len()));
    let body = prefix.len() + zeros + digits.len();
    let pad = spec.width.saturating_sub(body);

    if spec.minus {
        w.push_bytes(prefix.as_bytes());
        w.pad(b'0', zeros);
        w.push_bytes(digits.as_bytes());
        w.pad(b' ', pad);
    } else if spec.zero && spec.precision.is_none() {
        w.push_bytes(prefix.as_bytes());
        w.pad(b'0', pad + zeros);
        w.push_bytes(digits.as_bytes());
    } else {
        w.pad(b' ', pad);
        w.push_bytes(prefix.as_bytes());
        w.pad(b'0', zeros);
        w.push_bytes(digits.as_bytes());
    }
}

/// Width-pad a text value. The zero flag pads with spaces here, and
/// the width counts characters.
fn emit_str(w: &mut NulBuf<'_>, spec: &Spec, s: &str) {
    let pad = spec.width.saturating_sub(s.chars().count());
    if spec.minus {
        w.push_bytes(s.as_bytes());
        w.pad(b' ', pad);
    } else {
        w.pad(b' ', pad);
        w.push_bytes(s.as_bytes());
    }
}

struct LenCounter(usize);

impl Write for LenCounter {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// `%f`: fixed-point via `core::fmt`, default 6 decimals. The value is
/// rendered twice, first into a length counter to size the field
/// padding and then into the output, so no scratch buffer has to bound
/// the magnitude.
fn emit_float(w: &mut NulBuf<'_>, spec: &Spec, v: f64) {
    let prec = spec.precision.unwrap_or(6);
    let neg = v.is_sign_negative() && !v.is_nan();
    let mag = if neg { -v } else { v };
    let prefix = if neg {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    };

    let mut counter = LenCounter(0);
    let _ = write!(counter, "{:.*}", prec, mag);
    let pad = spec.width.saturating_sub(prefix.len() + counter.0);

    if spec.minus {
        w.push_bytes(prefix.as_bytes());
        let _ = write!(w, "{:.*}", prec, mag);
        w.pad(b' ', pad);
    } else if spec.zero {
        w.push_bytes(prefix.as_bytes());
        w.pad(b'0', pad);
        let _ = write!(w, "{:.*}", prec, mag);
    } else {
        w.pad(b' ', pad);
        w.push_bytes(prefix.as_bytes());
        let _ = write!(w, "{:.*}", prec, mag);
    }
}
