//! Selector subset used by [`MemoryDocument`](crate::document::MemoryDocument)
//!
//! Supports what sticky menus are normally configured with:
//!
//! - Type selectors: `li`, `*`
//! - ID selectors: `#menu`
//! - Class selectors: `.menuItem`, compounds like `li.menuItem.primary`
//! - Descendant combinators: `#menu li`
//! - Selector lists: `.a, .b`
//!
//! Anything else (attribute selectors, pseudo-classes, child combinators)
//! fails to parse.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map},
    multi::{many1, separated_list1},
    sequence::{delimited, preceded},
    Finish, IResult,
};
use smallvec::SmallVec;

/// One simple selector inside a compound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
}

/// A run of simple selectors with no combinator between them (`li.item`)
pub type Compound = SmallVec<[SimpleSelector; 2]>;

/// Compounds joined by descendant combinators, outermost first
pub type Complex = Vec<Compound>;

/// A parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<Complex>,
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn simple(input: &str) -> IResult<&str, SimpleSelector> {
    alt((
        map(preceded(char('#'), ident), |s| SimpleSelector::Id(s.to_string())),
        map(preceded(char('.'), ident), |s| SimpleSelector::Class(s.to_string())),
        map(tag("*"), |_| SimpleSelector::Universal),
        map(ident, |s| SimpleSelector::Tag(s.to_ascii_lowercase())),
    ))(input)
}

fn compound(input: &str) -> IResult<&str, Compound> {
    map(many1(simple), SmallVec::from_vec)(input)
}

fn complex(input: &str) -> IResult<&str, Complex> {
    separated_list1(multispace1, compound)(input)
}

fn selector_list(input: &str) -> IResult<&str, Vec<Complex>> {
    delimited(
        multispace0,
        separated_list1(delimited(multispace0, char(','), multispace0), complex),
        multispace0,
    )(input)
}

impl SelectorList {
    /// Parse a selector list, returning `None` for unsupported syntax
    pub fn parse(input: &str) -> Option<Self> {
        match all_consuming(selector_list)(input).finish() {
            Ok((_, selectors)) => Some(Self { selectors }),
            Err(err) => {
                tracing::debug!("unsupported selector {:?}: {:?}", input, err.code);
                None
            }
        }
    }
}
