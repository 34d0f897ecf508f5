//! Character code constants used by the lexer and parser.
//!
//! Code values are `u32` rather than `char`: in legacy mode the lexer can
//! yield a lone surrogate half, which is a valid code unit but not a valid
//! `char`.

#![allow(dead_code)]

pub const BACKSPACE: u32 = 0x08;

pub const DOLLAR_SIGN: u32 = 0x24; // $
pub const OPEN_PAREN: u32 = 0x28; // (
pub const CLOSE_PAREN: u32 = 0x29; // )
pub const ASTERISK: u32 = 0x2A; // *
pub const PLUS: u32 = 0x2B; // +
pub const COMMA: u32 = 0x2C; // ,
pub const MINUS: u32 = 0x2D; // -
pub const DOT: u32 = 0x2E; // .

pub const _0: u32 = 0x30;
pub const _9: u32 = 0x39;

pub const QUESTION: u32 = 0x3F; // ?

pub const OPEN_BRACKET: u32 = 0x5B; // [
pub const BACKSLASH: u32 = 0x5C; // \
pub const CLOSE_BRACKET: u32 = 0x5D; // ]
pub const CARET: u32 = 0x5E; // ^

pub const B_LOWER: u32 = 0x62; // b

pub const OPEN_BRACE: u32 = 0x7B; // {
pub const BAR: u32 = 0x7C; // |
pub const CLOSE_BRACE: u32 = 0x7D; // }

/// Check if a code value is a decimal digit.
#[inline]
pub fn is_decimal_digit(code: u32) -> bool {
    (_0..=_9).contains(&code)
}

/// The numeric value of a decimal digit code.
#[inline]
pub fn digit_value(code: u32) -> u32 {
    debug_assert!(is_decimal_digit(code));
    code - _0
}

/// Check if a code value is one of the 14 regular expression syntax
/// characters: `^ $ \ . * + ? ( ) [ ] { } |`.
pub fn is_syntax_character(code: u32) -> bool {
    matches!(
        code,
        CARET
            | DOLLAR_SIGN
            | BACKSLASH
            | DOT
            | ASTERISK
            | PLUS
            | QUESTION
            | OPEN_PAREN
            | CLOSE_PAREN
            | OPEN_BRACKET
            | CLOSE_BRACKET
            | OPEN_BRACE
            | CLOSE_BRACE
            | BAR
    )
}

/// Check if a code unit is a UTF-16 high (leading) surrogate.
#[inline]
pub fn is_high_surrogate(unit: u32) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

/// Check if a code unit is a UTF-16 low (trailing) surrogate.
#[inline]
pub fn is_low_surrogate(unit: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Combine a surrogate pair into the scalar value it encodes.
#[inline]
pub fn combine_surrogates(high: u32, low: u32) -> u32 {
    debug_assert!(is_high_surrogate(high) && is_low_surrogate(low));
    (high - 0xD800) * 0x400 + (low - 0xDC00) + 0x10000
}
