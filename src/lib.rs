//! Tokenizer for Luau type annotations.
//!
//! Turns a one-line annotation such as `(x: number, y: number) -> Vector3` into a flat
//! sequence of [`Token`]s. Tuples, indexers and tables become [`Token::Bracketed`] tokens
//! holding the tokenization of their interior.

use std::ops::{Bound, RangeBounds};

pub mod config;
pub mod error;
pub mod lexer;
pub mod render;
pub mod token;
pub mod tokenizer;

pub use config::TokenizerConfig;
pub use error::Error;
pub use render::render;
pub use token::{BracketKind, Token};
pub use tokenizer::{normalize_whitespace, tokenize, Tokenizer};

fn get_bounds(bounds: impl RangeBounds<usize>) -> (usize, Option<usize>) {
    let min = match bounds.start_bound() {
        Bound::Included(n) => *n,
        Bound::Excluded(n) => *n + 1,
        Bound::Unbounded => 0,
    };
    let max = match bounds.end_bound() {
        Bound::Included(n) => {
            if *n < usize::MAX {
                Some(*n + 1)
            } else {
                None
            }
        }
        Bound::Excluded(n) => Some(*n),
        Bound::Unbounded => None,
    };
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::get_bounds;

    #[test]
    fn bounds_are_half_open() {
        assert_eq!(get_bounds(..), (0, None));
        assert_eq!(get_bounds(1..), (1, None));
        assert_eq!(get_bounds(0..=1), (0, Some(2)));
        assert_eq!(get_bounds(2..4), (2, Some(4)));
        assert_eq!(get_bounds(0..=usize::MAX), (0, None));
    }
}
