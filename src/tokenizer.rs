use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::config::TokenizerConfig;
use crate::lexer::prelude::*;
use crate::token::{BracketKind, Token};
use crate::Error;

/// Characters that never belong to an atom. Brackets are in here too, but are checked for
/// before the rest.
const PUNCTUATION: &str = "{}<>-|&()[]";

struct BracketClasses {
    interior: ArcLexer,
    close: ArcLexer,
}

impl BracketClasses {
    fn new(kind: BracketKind) -> Self {
        Self {
            interior: balanced(kind.open(), kind.close()),
            close: is(kind.close()),
        }
    }
}

struct CharClasses {
    whitespace: ArcLexer,
    comma: ArcLexer,
    arrow: ArcLexer,
    punctuation: ArcLexer,
    atom: ArcLexer,
    group_atom: ArcLexer,
    tuple: BracketClasses,
    indexer: BracketClasses,
    table: BracketClasses,
}

impl CharClasses {
    fn new() -> Self {
        let whitespace = pred(char::is_whitespace);
        let punctuation = one_of(PUNCTUATION);
        let comma = is(',');
        let any = pred(|_| true);

        Self {
            whitespace: many(whitespace.clone()),
            arrow: exact("->"),
            atom: some_until(any.clone(), alt(&[whitespace.clone(), punctuation.clone()])),
            // Inside a group a comma ends the atom and becomes a separator.
            group_atom: some_until(any, alt(&[whitespace, punctuation.clone(), comma.clone()])),
            comma,
            punctuation,
            tuple: BracketClasses::new(BracketKind::Tuple),
            indexer: BracketClasses::new(BracketKind::Indexer),
            table: BracketClasses::new(BracketKind::Table),
        }
    }

    fn bracket(&self, kind: BracketKind) -> &BracketClasses {
        match kind {
            BracketKind::Tuple => &self.tuple,
            BracketKind::Indexer => &self.indexer,
            BracketKind::Table => &self.table,
        }
    }
}

static CLASSES: Lazy<CharClasses> = Lazy::new(CharClasses::new);

struct Cursor<'s> {
    text: &'s str,
    position: usize,
}

impl<'s> Cursor<'s> {
    fn new(text: &'s str) -> Self {
        Self { text, position: 0 }
    }

    fn rest(&self) -> &'s str {
        &self.text[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consumes whatever `lexer` matches at the cursor.
    fn eat(&mut self, lexer: &ArcLexer) -> Option<&'s str> {
        let rest = self.rest();
        let len = lexer.lex(rest)?;
        self.position += len;
        Some(&rest[..len])
    }
}

/// Splits type annotations into [`Token`]s.
///
/// Holds only configuration, so one tokenizer can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    /// Tokenizes `text`. Set `is_group` when `text` is the inside of a bracket pair, which
    /// turns commas into [`Token::Separator`]s.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub fn tokenize(&self, text: &str, is_group: bool) -> Result<Vec<Token>, Error> {
        self.scan(text, is_group, 0, 0)
    }

    /// `depth` counts the brackets enclosing `text`; `base` is its byte offset in the
    /// top-level input.
    fn scan(
        &self,
        text: &str,
        is_group: bool,
        depth: usize,
        base: usize,
    ) -> Result<Vec<Token>, Error> {
        let classes = &*CLASSES;
        let mut cursor = Cursor::new(text);
        let mut tokens = vec![];

        loop {
            cursor.eat(&classes.whitespace);

            let c = match cursor.peek() {
                Some(c) => c,
                None => break,
            };

            if let Some(kind) = BracketKind::from_open(c) {
                let offset = base + cursor.position;
                if depth >= self.config.max_depth {
                    debug!(%kind, offset, limit = self.config.max_depth, "nesting too deep");
                    return Err(Error::NestingTooDeep {
                        limit: self.config.max_depth,
                        offset,
                    });
                }
                cursor.bump();

                let bracket = classes.bracket(kind);
                let interior_offset = base + cursor.position;
                let interior = cursor.eat(&bracket.interior).unwrap_or_default();
                match bracket.close.lex_result(cursor.rest()) {
                    Ok(len) => cursor.position += len,
                    Err(err) if self.config.strict_brackets => {
                        debug!(%kind, offset, %err, "unterminated bracket");
                        return Err(Error::UnterminatedBracket { kind, offset });
                    }
                    // Unterminated: the interior already ran to the end of the input.
                    Err(_) => trace!(%kind, offset, "unterminated bracket read to end of input"),
                }

                let children = self.scan(interior, true, depth + 1, interior_offset)?;
                trace!(%kind, offset, children = children.len(), "bracketed");
                tokens.push(Token::Bracketed { kind, children });
                continue;
            }

            if is_group && cursor.eat(&classes.comma).is_some() {
                tokens.push(Token::Separator);
                continue;
            }

            if cursor.eat(&classes.arrow).is_some() {
                tokens.push(Token::Arrow);
                continue;
            }

            if let Some(punc) = cursor.eat(&classes.punctuation).and_then(|s| s.chars().next()) {
                tokens.push(match punc {
                    '|' => Token::Union,
                    '&' => Token::Intersection,
                    c => Token::Punctuation(c),
                });
                continue;
            }

            let atom_lexer = if is_group { &classes.group_atom } else { &classes.atom };
            match cursor.eat(atom_lexer) {
                Some(atom) => push_atom(&mut tokens, atom),
                None => {
                    let err = Error::UnclassifiedCharacter {
                        character: cursor.peek(),
                        buffer: String::new(),
                        is_group,
                    };
                    debug!(offset = base + cursor.position, expected = %atom_lexer.expected(), %err);
                    return Err(err);
                }
            }
        }

        Ok(tokens)
    }
}

fn push_atom(tokens: &mut Vec<Token>, atom: &str) {
    if let Some(identifier) = atom.strip_suffix(':') {
        tokens.push(Token::identifier(identifier));
    } else if let Some((identifier, rest)) = atom.split_once(':') {
        // Only the first colon splits. Anything after a second colon is dropped.
        let lua_type = rest.split(':').next().unwrap_or(rest);
        tokens.push(Token::identifier(identifier));
        tokens.push(Token::lua_type(lua_type));
    } else {
        tokens.push(Token::lua_type(atom));
    }
}

/// Tokenizes `text` with the default [`TokenizerConfig`].
pub fn tokenize(text: &str, is_group: bool) -> Result<Vec<Token>, Error> {
    Tokenizer::default().tokenize(text, is_group)
}

/// Removes every whitespace character, the way annotations are squeezed before they are
/// rendered into the docs.
pub fn normalize_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
