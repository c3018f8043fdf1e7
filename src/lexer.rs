//! Character-level lexers.
//!
//! A [`Lexer`] looks at the start of its input and reports how many bytes it matches. The
//! tokenizer builds its character classes out of these and drives them with a cursor.

use std::ops::RangeBounds;
use std::sync::Arc;

use crate::Error;

pub trait Lexer {
    /// Length in bytes of the match at the start of `input`, if any.
    fn lex(&self, input: &str) -> Option<usize>;
    fn consumes(&self) -> bool;
    fn expected(&self) -> String;

    fn lex_result(&self, input: &str) -> Result<usize, Error> {
        self.lex(input)
            .ok_or_else(|| Error::Expected(self.expected()))
    }
}

pub type ArcLexer = Arc<dyn Lexer + Send + Sync>;

pub struct Pred<F>(F)
where
    F: Fn(char) -> bool;

impl<F> Lexer for Pred<F>
where
    F: Fn(char) -> bool,
{
    fn lex(&self, input: &str) -> Option<usize> {
        input.chars().next().and_then(|c| {
            if (self.0)(c) {
                Some(c.len_utf8())
            } else {
                None
            }
        })
    }

    fn consumes(&self) -> bool {
        true
    }

    fn expected(&self) -> String {
        "character matching predicate".to_string()
    }
}

pub fn pred(predicate: impl 'static + Send + Sync + Fn(char) -> bool) -> ArcLexer {
    Arc::new(Pred(predicate))
}

pub struct Is(char);

impl Lexer for Is {
    fn lex(&self, input: &str) -> Option<usize> {
        input.chars().next().and_then(|c| {
            if c == self.0 {
                Some(c.len_utf8())
            } else {
                None
            }
        })
    }

    fn consumes(&self) -> bool {
        true
    }

    fn expected(&self) -> String {
        format!("'{}'", self.0)
    }
}

pub fn is(c: char) -> ArcLexer {
    Arc::new(Is(c))
}

pub struct Exact(String);

impl Lexer for Exact {
    fn lex(&self, input: &str) -> Option<usize> {
        if input.starts_with(&self.0) {
            Some(self.0.len())
        } else {
            None
        }
    }

    fn consumes(&self) -> bool {
        !self.0.is_empty()
    }

    fn expected(&self) -> String {
        format!("the string \"{}\"", &self.0)
    }
}

pub fn exact(string: impl AsRef<str>) -> ArcLexer {
    Arc::new(Exact(string.as_ref().to_string()))
}

fn join_with_last<S: ToString>(items: impl AsRef<[S]>, sep: &str, last_sep: &str) -> String {
    let items = items.as_ref();

    let mut buf = String::new();

    let mut iter = items.iter();
    let mut first = true;
    let mut next = iter.next();
    while let Some(item) = next {
        let item = item.to_string();
        next = iter.next();

        let last = next.is_none();
        if !first {
            buf.push_str(if last { last_sep } else { sep });
        }
        buf.push_str(&item);
        first = false;
    }

    buf
}

pub struct OneOf(String);

impl OneOf {
    fn contains(&self, c: char) -> bool {
        self.0.contains(c)
    }
}

impl Lexer for OneOf {
    fn lex(&self, input: &str) -> Option<usize> {
        input.chars().next().and_then(|c| {
            if self.contains(c) {
                Some(c.len_utf8())
            } else {
                None
            }
        })
    }

    fn consumes(&self) -> bool {
        true
    }

    fn expected(&self) -> String {
        format!(
            "one of {}",
            join_with_last(
                self.0
                    .chars()
                    .map(|c| format!("'{}'", c))
                    .collect::<Vec<_>>(),
                ", ",
                ", or ",
            )
        )
    }
}

pub fn one_of(chars: impl AsRef<str>) -> ArcLexer {
    Arc::new(OneOf(chars.as_ref().to_string()))
}

pub struct Repeat {
    lexer: ArcLexer,
    min: usize,
    max: Option<usize>,
}

impl Lexer for Repeat {
    fn lex(&self, input: &str) -> Option<usize> {
        let mut count = 0;
        let mut len = 0;
        // `max` is exclusive.
        while self.max.map_or(true, |max| count + 1 < max) {
            match self.lexer.lex(&input[len..]) {
                // A zero-width match would repeat forever.
                Some(0) => break,
                Some(n) => {
                    count += 1;
                    len += n;
                }
                None => break,
            }
        }
        if count >= self.min { Some(len) } else { None }
    }

    fn consumes(&self) -> bool {
        self.min >= 1 && self.lexer.consumes()
    }

    fn expected(&self) -> String {
        let quantity = match self.max {
            Some(max) => format!("between {} and {}", self.min, max.saturating_sub(1)),
            None => format!("at least {}", self.min),
        };
        format!("{} {}", quantity, self.lexer.expected())
    }
}

pub fn repeat(lexer: ArcLexer, bounds: impl RangeBounds<usize>) -> ArcLexer {
    let (min, max) = crate::get_bounds(bounds);
    Arc::new(Repeat { lexer, min, max })
}

pub fn some(lexer: ArcLexer) -> ArcLexer {
    repeat(lexer, 1..)
}

pub fn many(lexer: ArcLexer) -> ArcLexer {
    repeat(lexer, ..)
}

pub struct Alt(Vec<ArcLexer>);

impl Lexer for Alt {
    fn lex(&self, input: &str) -> Option<usize> {
        self.0.iter().find_map(|lexer| lexer.lex(input))
    }

    fn consumes(&self) -> bool {
        self.0.iter().all(|l| l.consumes())
    }

    fn expected(&self) -> String {
        join_with_last(
            self.0.iter().map(|l| l.expected()).collect::<Vec<_>>(),
            ", ",
            ", or ",
        )
    }
}

pub fn alt(lexers: impl AsRef<[ArcLexer]>) -> ArcLexer {
    Arc::new(Alt(lexers.as_ref().into()))
}

pub struct Seq(Vec<ArcLexer>);

impl Lexer for Seq {
    fn lex(&self, input: &str) -> Option<usize> {
        let mut len = 0;
        for lexer in &self.0 {
            len += lexer.lex(&input[len..])?;
        }
        Some(len)
    }

    fn consumes(&self) -> bool {
        self.0.iter().any(|l| l.consumes())
    }

    fn expected(&self) -> String {
        // Only the first lexer that consumes decides whether the sequence can start.
        self.0
            .iter()
            .find(|l| l.consumes())
            .map(|l| l.expected())
            .unwrap_or_default()
    }
}

pub fn seq(lexers: impl AsRef<[ArcLexer]>) -> ArcLexer {
    Arc::new(Seq(lexers.as_ref().into()))
}

struct Reject(ArcLexer);

impl Lexer for Reject {
    fn lex(&self, input: &str) -> Option<usize> {
        if self.0.lex(input).is_none() {
            Some(0)
        } else {
            None
        }
    }

    fn consumes(&self) -> bool {
        false
    }

    fn expected(&self) -> String {
        format!("anything but {}", self.0.expected())
    }
}

pub fn reject(lexer: ArcLexer) -> ArcLexer {
    Arc::new(Reject(lexer))
}

/// One or more `lexer` matches, stopping before anything `stop_before` matches.
pub fn some_until(lexer: ArcLexer, stop_before: ArcLexer) -> ArcLexer {
    some(seq(&[reject(stop_before), lexer]))
}

/// Matches up to, but not including, the `close` that balances an already consumed `open`.
///
/// Nested `open`/`close` pairs are skipped over. Without a balancing `close` the match runs to
/// the end of the input. Never fails.
pub struct Balanced {
    open: char,
    close: char,
}

impl Lexer for Balanced {
    fn lex(&self, input: &str) -> Option<usize> {
        let mut depth = 0usize;
        for (i, c) in input.char_indices() {
            if c == self.open {
                depth += 1;
            } else if c == self.close {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
        }
        Some(input.len())
    }

    fn consumes(&self) -> bool {
        false
    }

    fn expected(&self) -> String {
        format!("text balanced between '{}' and '{}'", self.open, self.close)
    }
}

pub fn balanced(open: char, close: char) -> ArcLexer {
    Arc::new(Balanced { open, close })
}

pub mod prelude {
    pub use super::{
        alt,
        balanced,
        exact,
        is,
        many,
        one_of,
        pred,
        reject,
        repeat,
        seq,
        some,
        some_until,
        ArcLexer,
        Lexer,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::*;

    #[test]
    fn single_characters() {
        assert_eq!(is('a').lex("abc"), Some(1));
        assert_eq!(is('a').lex("bc"), None);
        assert_eq!(is('é').lex("é"), Some(2));
        assert_eq!(pred(char::is_whitespace).lex("\tx"), Some(1));
        assert_eq!(one_of("<>").lex(">"), Some(1));
        assert_eq!(one_of("<>").lex(""), None);
    }

    #[test]
    fn exact_needs_whole_string() {
        assert_eq!(exact("->").lex("->x"), Some(2));
        assert_eq!(exact("->").lex("-x"), None);
        assert!(!exact("").consumes());
    }

    #[test]
    fn repetition() {
        let digits = some(pred(|c| c.is_ascii_digit()));
        assert_eq!(digits.lex("123abc"), Some(3));
        assert_eq!(digits.lex("abc"), None);
        assert_eq!(many(is('x')).lex("abc"), Some(0));
        assert_eq!(repeat(is('x'), 0..=1).lex("xxx"), Some(1));
        assert_eq!(repeat(is('x'), 2..=3).lex("xxxx"), Some(3));
        assert_eq!(repeat(is('x'), 2..=3).lex("x"), None);
    }

    #[test]
    fn repetition_of_zero_width_terminates() {
        assert_eq!(many(reject(is('x'))).lex("abc"), Some(0));
    }

    #[test]
    fn until_stops_before_terminator() {
        let word = some_until(pred(|c| !c.is_whitespace()), is(','));
        assert_eq!(word.lex("a:b,c"), Some(3));
        assert_eq!(word.lex(",c"), None);
    }

    #[test]
    fn alternatives_take_first_match() {
        let arrow_or_dash = alt(&[exact("->"), is('-')]);
        assert_eq!(arrow_or_dash.lex("->"), Some(2));
        assert_eq!(arrow_or_dash.lex("-"), Some(1));
        assert_eq!(arrow_or_dash.lex("x"), None);
    }

    #[test]
    fn balanced_skips_nested_pairs() {
        let parens = balanced('(', ')');
        assert_eq!(parens.lex("(a),(b))rest"), Some(7));
        assert_eq!(parens.lex(")"), Some(0));
        assert_eq!(parens.lex("a(b"), Some(3));
        // Other bracket kinds do not count.
        assert_eq!(parens.lex("[)]"), Some(1));
    }

    #[test]
    fn expected_messages() {
        assert_eq!(
            one_of("|&").lex_result("x"),
            Err(Error::Expected("one of '|', or '&'".to_string()))
        );
        assert_eq!(
            some(is(',')).expected(),
            "at least 1 ','".to_string()
        );
        assert_eq!(
            repeat(is('a'), 1..=2).expected(),
            "between 1 and 2 'a'".to_string()
        );
        assert_eq!(
            alt(&[is('a'), exact("bc")]).expected(),
            "'a', or the string \"bc\"".to_string()
        );
        assert_eq!(
            seq(&[reject(is(',')), is('a')]).expected(),
            "'a'".to_string()
        );
    }
}
