//! Pixel length parsing
//!
//! Margins and `topMargin` values arrive as CSS text (`"20px"`, `"0px"`,
//! `" 12.5px"`) or bare numbers. Only the leading integer matters: the text
//! is read the way `parseInt` would, so `"12.7px"` is `12` and `"20em"` is
//! `20`. Anything without a leading integer is rejected.

use nom::{
    character::complete::{digit1, multispace0, one_of},
    combinator::{map_res, opt, recognize},
    sequence::{pair, preceded},
    IResult,
};

fn leading_integer(input: &str) -> IResult<&str, i32> {
    preceded(
        multispace0,
        map_res(recognize(pair(opt(one_of("+-")), digit1)), str::parse::<i32>),
    )(input)
}

/// Parse the leading integer of a CSS length, ignoring any unit or fraction
///
/// Returns `None` when the text does not start with an integer (after
/// optional whitespace and sign).
pub fn parse_px(input: &str) -> Option<i32> {
    leading_integer(input).ok().map(|(_, value)| value)
}

/// Truncate a numeric length toward zero
///
/// Non-finite values have no pixel meaning and are rejected.
pub fn number_to_px(value: f64) -> Option<i32> {
    if !value.is_finite() || value > i32::MAX as f64 || value < i32::MIN as f64 {
        return None;
    }
    Some(value.trunc() as i32)
}

/// Format a pixel value for an inline style property
pub fn px(value: i32) -> String {
    format!("{}px", value)
}
