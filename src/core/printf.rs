//! printf-style substitution for message templates
//!
//! Directives have the shape `%[flags][width][.precision][length]conversion`
//! and consume [`FormatArg`]s strictly in order. The engine is generic over
//! the [`CodeUnit`] width, so the same rules apply to narrow and wide text;
//! the only difference between the two is how `%c` narrows a raw code (see
//! [`CodeUnit::push_code`]).
//!
//! Argument mismatches never fail. A directive without an argument renders
//! `0` (numeric conversions) or nothing (`%c`, `%s`); a mismatched argument
//! is coerced to what the directive reads.

use super::code_unit::{until_nul, CodeUnit};
use std::fmt;

/// One argument for a message template
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Int(i64),
    UInt(u64),
    Float(f64),
    /// A Unicode scalar. `%c` always encodes it whole, in either width.
    Char(char),
    Str(String),
    Bool(bool),
    Ptr(usize),
}

impl FormatArg {
    /// Wrap a pointer for `%p`
    pub fn ptr<T>(p: *const T) -> Self {
        FormatArg::Ptr(p as usize)
    }

    /// Decode a wide string argument
    pub fn wide_str(units: &[u16]) -> Self {
        FormatArg::Str(String::from_utf16_lossy(until_nul(units)))
    }

    pub fn as_i64(&self) -> i64 {
        match self {
            FormatArg::Int(v) => *v,
            FormatArg::UInt(v) => *v as i64,
            FormatArg::Float(v) => *v as i64,
            FormatArg::Char(c) => i64::from(u32::from(*c)),
            FormatArg::Bool(b) => i64::from(*b),
            FormatArg::Ptr(p) => *p as i64,
            FormatArg::Str(_) => 0,
        }
    }

    pub fn as_u64(&self) -> u64 {
        match self {
            FormatArg::UInt(v) => *v,
            other => other.as_i64() as u64,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            FormatArg::Float(v) => *v,
            FormatArg::Int(v) => *v as f64,
            FormatArg::UInt(v) => *v as f64,
            FormatArg::Str(_) => 0.0,
            other => other.as_i64() as f64,
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Int(v) => write!(f, "{}", v),
            FormatArg::UInt(v) => write!(f, "{}", v),
            FormatArg::Float(v) => write!(f, "{}", v),
            FormatArg::Char(c) => write!(f, "{}", c),
            FormatArg::Str(s) => write!(f, "{}", s),
            FormatArg::Bool(b) => write!(f, "{}", b),
            FormatArg::Ptr(p) => write!(f, "{:#x}", p),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(v: $ty) -> Self {
                    FormatArg::$variant(v as _)
                }
            }
        )+
    };
}

impl_from_int!(Int: i8, i16, i32, i64, isize);
impl_from_int!(UInt: u8, u16, u32, u64, usize);

impl From<f32> for FormatArg {
    fn from(v: f32) -> Self {
        FormatArg::Float(f64::from(v))
    }
}

impl From<f64> for FormatArg {
    fn from(v: f64) -> Self {
        FormatArg::Float(v)
    }
}

impl From<char> for FormatArg {
    fn from(c: char) -> Self {
        FormatArg::Char(c)
    }
}

impl From<bool> for FormatArg {
    fn from(b: bool) -> Self {
        FormatArg::Bool(b)
    }
}

impl From<&str> for FormatArg {
    fn from(s: &str) -> Self {
        FormatArg::Str(s.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(s: String) -> Self {
        FormatArg::Str(s)
    }
}

impl From<&String> for FormatArg {
    fn from(s: &String) -> Self {
        FormatArg::Str(s.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Length {
    /// No modifier: `int` / `unsigned int`
    #[default]
    Default,
    /// `hh`
    Char,
    /// `h`
    Short,
    /// `l`, `ll`, `j`, `z`, `t`, `L`, `q`
    Long,
}

#[derive(Debug, Default)]
struct Spec {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
    width: Option<usize>,
    precision: Option<usize>,
    length: Length,
}

impl Spec {
    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }
}

struct ArgCursor<'a> {
    args: &'a [FormatArg],
    next: usize,
}

impl<'a> ArgCursor<'a> {
    fn take(&mut self) -> Option<&'a FormatArg> {
        let arg = self.args.get(self.next);
        self.next += 1;
        arg
    }

    fn take_i64(&mut self) -> i64 {
        self.take().map_or(0, FormatArg::as_i64)
    }

    fn take_u64(&mut self) -> u64 {
        self.take().map_or(0, FormatArg::as_u64)
    }

    fn take_f64(&mut self) -> f64 {
        self.take().map_or(0.0, FormatArg::as_f64)
    }
}

fn ascii_at<C: CodeUnit>(template: &[C], i: usize) -> Option<u8> {
    template.get(i).and_then(|u| u.to_ascii())
}

/// Widths and precisions are clamped to this many units
const MAX_FIELD: usize = 4096;

fn parse_number<C: CodeUnit>(template: &[C], i: &mut usize) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit @ b'0'..=b'9') = ascii_at(template, *i) {
        let d = usize::from(digit - b'0');
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d));
        *i += 1;
    }
    value.map(|v| v.min(MAX_FIELD))
}

/// Render `template` against `args`, appending to `out`.
///
/// A NUL unit ends the template. An incomplete directive at the end emits
/// nothing; an unknown conversion is copied through literally.
pub fn format_into<C: CodeUnit>(out: &mut Vec<C>, template: &[C], args: &[FormatArg]) {
    let template = until_nul(template);
    let mut args = ArgCursor { args, next: 0 };
    let mut i = 0;

    while i < template.len() {
        let unit = template[i];
        if unit.to_ascii() != Some(b'%') {
            out.push(unit);
            i += 1;
            continue;
        }

        let start = i;
        i += 1;
        let mut spec = Spec::default();

        while let Some(flag) = ascii_at(template, i) {
            match flag {
                b'-' => spec.left = true,
                b'+' => spec.plus = true,
                b' ' => spec.space = true,
                b'0' => spec.zero = true,
                b'#' => spec.alt = true,
                _ => break,
            }
            i += 1;
        }

        if ascii_at(template, i) == Some(b'*') {
            i += 1;
            let width = args.take_i64();
            if width < 0 {
                spec.left = true;
            }
            spec.width = Some(usize::try_from(width.unsigned_abs()).unwrap_or(MAX_FIELD).min(MAX_FIELD));
        } else {
            spec.width = parse_number(template, &mut i);
        }

        if ascii_at(template, i) == Some(b'.') {
            i += 1;
            if ascii_at(template, i) == Some(b'*') {
                i += 1;
                // A negative precision counts as omitted
                let precision = args.take_i64();
                spec.precision = usize::try_from(precision).ok().map(|p| p.min(MAX_FIELD));
            } else {
                spec.precision = Some(parse_number(template, &mut i).unwrap_or(0));
            }
        }

        while let Some(modifier) = ascii_at(template, i) {
            spec.length = match (modifier, spec.length) {
                (b'h', Length::Short) => Length::Char,
                (b'h', _) => Length::Short,
                (b'l' | b'j' | b'z' | b't' | b'L' | b'q', _) => Length::Long,
                _ => break,
            };
            i += 1;
        }

        let Some(conversion) = template.get(i).copied() else {
            break;
        };
        i += 1;

        match conversion.to_ascii() {
            Some(b'%') => out.push(C::from_ascii(b'%')),
            Some(b'd' | b'i') => {
                let text = format_signed(args.take_i64(), &spec);
                C::push_str(out, &text);
            }
            Some(conv @ (b'u' | b'o' | b'x' | b'X')) => {
                let text = format_unsigned(args.take_u64(), conv, &spec);
                C::push_str(out, &text);
            }
            Some(conv @ (b'f' | b'F' | b'e' | b'E' | b'g' | b'G')) => {
                let text = format_float(args.take_f64(), conv, &spec);
                C::push_str(out, &text);
            }
            Some(conv @ (b'a' | b'A')) => {
                let text = format_hex_float(args.take_f64(), conv, &spec);
                C::push_str(out, &text);
            }
            Some(b'c') => {
                let mut body = Vec::new();
                match args.take() {
                    Some(FormatArg::Char(c)) => C::push_str(&mut body, c.encode_utf8(&mut [0; 4])),
                    Some(FormatArg::Str(s)) => {
                        if let Some(c) = s.chars().next() {
                            C::push_str(&mut body, c.encode_utf8(&mut [0; 4]));
                        }
                    }
                    Some(other) => C::push_code(&mut body, other.as_u64()),
                    None => {}
                }
                pad_units(out, &body, &spec);
            }
            Some(b's') => {
                let mut body = Vec::new();
                match args.take() {
                    Some(FormatArg::Str(s)) => {
                        C::push_str(&mut body, s.split('\0').next().unwrap_or_default())
                    }
                    Some(other) => C::push_str(&mut body, &other.to_string()),
                    None => {}
                }
                if let Some(precision) = spec.precision {
                    body.truncate(precision);
                }
                pad_units(out, &body, &spec);
            }
            Some(b'p') => {
                let text = format!("{:#x}", args.take_u64());
                C::push_str(out, &pad_numeric("", &text, &spec, false));
            }
            Some(b'n') => {
                args.take();
            }
            _ => out.extend_from_slice(&template[start..i]),
        }
    }
}

/// Render `template` into a fresh buffer
pub fn format_units<C: CodeUnit>(template: &[C], args: &[FormatArg]) -> Vec<C> {
    let mut out = Vec::with_capacity(template.len());
    format_into(&mut out, template, args);
    out
}

/// Narrow rendering of a `&str` template, decoded lossily
pub fn format_string(template: &str, args: &[FormatArg]) -> String {
    String::from_utf8_lossy(&format_units(template.as_bytes(), args)).into_owned()
}

fn pad_units<C: CodeUnit>(out: &mut Vec<C>, body: &[C], spec: &Spec) {
    let fill = spec.width.unwrap_or(0).saturating_sub(body.len());
    let space = C::from_ascii(b' ');
    if !spec.left {
        out.extend(std::iter::repeat(space).take(fill));
    }
    out.extend_from_slice(body);
    if spec.left {
        out.extend(std::iter::repeat(space).take(fill));
    }
}

/// Pad a numeric conversion to the field width.
///
/// Zero padding goes between the sign/prefix and the digits and only applies
/// when `zero_allowed` and the field is right-justified.
fn pad_numeric(prefix: &str, digits: &str, spec: &Spec, zero_allowed: bool) -> String {
    let len = prefix.len() + digits.len();
    let fill = spec.width.unwrap_or(0).saturating_sub(len);
    if fill == 0 {
        return format!("{}{}", prefix, digits);
    }
    if spec.left {
        format!("{}{}{}", prefix, digits, " ".repeat(fill))
    } else if spec.zero && zero_allowed {
        format!("{}{}{}", prefix, "0".repeat(fill), digits)
    } else {
        format!("{}{}{}", " ".repeat(fill), prefix, digits)
    }
}

fn apply_int_precision(digits: String, precision: Option<usize>, is_zero: bool) -> String {
    match precision {
        Some(0) if is_zero => String::new(),
        Some(p) if digits.len() < p => format!("{}{}", "0".repeat(p - digits.len()), digits),
        _ => digits,
    }
}

fn format_signed(value: i64, spec: &Spec) -> String {
    let value = match spec.length {
        Length::Char => i64::from(value as i8),
        Length::Short => i64::from(value as i16),
        Length::Default => i64::from(value as i32),
        Length::Long => value,
    };
    let digits = apply_int_precision(value.unsigned_abs().to_string(), spec.precision, value == 0);
    pad_numeric(spec.sign(value < 0), &digits, spec, spec.precision.is_none())
}

fn format_unsigned(value: u64, conversion: u8, spec: &Spec) -> String {
    let value = match spec.length {
        Length::Char => u64::from(value as u8),
        Length::Short => u64::from(value as u16),
        Length::Default => u64::from(value as u32),
        Length::Long => value,
    };
    let digits = match conversion {
        b'o' => format!("{:o}", value),
        b'x' => format!("{:x}", value),
        b'X' => format!("{:X}", value),
        _ => value.to_string(),
    };
    let mut digits = apply_int_precision(digits, spec.precision, value == 0);

    let mut prefix = "";
    if spec.alt {
        match conversion {
            b'o' if !digits.starts_with('0') => digits.insert(0, '0'),
            b'x' if value != 0 => prefix = "0x",
            b'X' if value != 0 => prefix = "0X",
            _ => {}
        }
    }
    pad_numeric(prefix, &digits, spec, spec.precision.is_none())
}

fn format_float(value: f64, conversion: u8, spec: &Spec) -> String {
    let negative = value.is_sign_negative() && !value.is_nan();
    let abs = value.abs();
    let precision = spec.precision.unwrap_or(6);

    let body = if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        "inf".to_string()
    } else {
        match conversion.to_ascii_lowercase() {
            b'f' => {
                let mut s = format!("{:.*}", precision, abs);
                if spec.alt && precision == 0 {
                    s.push('.');
                }
                s
            }
            b'g' => general_notation(abs, precision, spec.alt),
            _ => exp_notation(abs, precision, spec.alt),
        }
    };
    let body = if conversion.is_ascii_uppercase() {
        body.to_uppercase()
    } else {
        body
    };
    pad_numeric(spec.sign(negative), &body, spec, value.is_finite())
}

/// `%a`: hexadecimal mantissa with a binary exponent, `0x1.8p+1` for 3.
///
/// Without a precision the mantissa is printed exactly, trailing zero
/// digits dropped. A precision rounds it half to even without renormalizing.
fn format_hex_float(value: f64, conversion: u8, spec: &Spec) -> String {
    const FRACTION_BITS: u32 = 52;
    const FRACTION_DIGITS: usize = 13;

    let negative = value.is_sign_negative() && !value.is_nan();
    let upper = conversion == b'A';
    if !value.is_finite() {
        let body = if value.is_nan() { "nan" } else { "inf" };
        let body = if upper { body.to_uppercase() } else { body.to_string() };
        return pad_numeric(spec.sign(negative), &body, spec, false);
    }

    let bits = value.abs().to_bits();
    let biased = (bits >> FRACTION_BITS) & 0x7ff;
    let mut fraction = bits & ((1u64 << FRACTION_BITS) - 1);
    let (mut lead, exp) = match (biased, fraction) {
        (0, 0) => (0u64, 0i64),
        (0, _) => (0, -1022),
        _ => (1, biased as i64 - 1023),
    };

    let digits = match spec.precision {
        None => {
            let digits = format!("{:0width$x}", fraction, width = FRACTION_DIGITS);
            digits.trim_end_matches('0').to_string()
        }
        Some(p) if p < FRACTION_DIGITS => {
            let shift = (FRACTION_DIGITS - p) as u32 * 4;
            let full = (lead << FRACTION_BITS) | fraction;
            let rest = full & ((1u64 << shift) - 1);
            let half = 1u64 << (shift - 1);
            let mut kept = full >> shift;
            if rest > half || (rest == half && kept & 1 == 1) {
                kept += 1;
            }
            let digit_bits = p as u32 * 4;
            lead = kept >> digit_bits;
            // A carry out of the fraction shows up as a leading 2
            fraction = kept & ((1u64 << digit_bits) - 1);
            if p == 0 {
                String::new()
            } else {
                format!("{:0width$x}", fraction, width = p)
            }
        }
        Some(p) => format!("{:0<width$}", format!("{:013x}", fraction), width = p),
    };

    let point = if digits.is_empty() && !spec.alt { "" } else { "." };
    let exp_sign = if exp < 0 { '-' } else { '+' };
    let body = format!("{}{}{}p{}{}", lead, point, digits, exp_sign, exp.unsigned_abs());
    let body = if upper { body.to_uppercase() } else { body };

    let mut prefix = spec.sign(negative).to_string();
    prefix.push_str(if upper { "0X" } else { "0x" });
    pad_numeric(&prefix, &body, spec, true)
}

/// Split Rust's `{:e}` output into mantissa and decimal exponent
fn split_exp(abs: f64, precision: usize) -> (String, i32) {
    let s = format!("{:.*e}", precision, abs);
    match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

fn exp_notation(abs: f64, precision: usize, alt: bool) -> String {
    let (mut mantissa, exp) = split_exp(abs, precision);
    if alt && precision == 0 {
        mantissa.push('.');
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
}

fn general_notation(abs: f64, precision: usize, alt: bool) -> String {
    let p = precision.max(1);
    let exp = if abs == 0.0 { 0 } else { split_exp(abs, p - 1).1 };

    let s = if exp >= -4 && i64::from(exp) < p as i64 {
        let decimals = (p as i64 - 1 - i64::from(exp)) as usize;
        let mut s = format!("{:.*}", decimals, abs);
        if alt && decimals == 0 {
            s.push('.');
        }
        s
    } else {
        exp_notation(abs, p - 1, alt)
    };

    if alt {
        return s;
    }
    match s.split_once('e') {
        Some((mantissa, exp)) => format!("{}e{}", trim_fraction(mantissa), exp),
        None => trim_fraction(&s).to_string(),
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
