use std::fmt;

use serde::{Deserialize, Serialize};

use crate::render::render;

/// Which delimiter pair a [`Token::Bracketed`] came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketKind {
    /// `( ... )`
    Tuple,
    /// `[ ... ]`
    Indexer,
    /// `{ ... }`
    Table,
}

impl BracketKind {
    pub const ALL: [BracketKind; 3] = [BracketKind::Tuple, BracketKind::Indexer, BracketKind::Table];

    pub fn from_open(c: char) -> Option<BracketKind> {
        match c {
            '(' => Some(BracketKind::Tuple),
            '[' => Some(BracketKind::Indexer),
            '{' => Some(BracketKind::Table),
            _ => None,
        }
    }

    pub fn open(self) -> char {
        match self {
            BracketKind::Tuple => '(',
            BracketKind::Indexer => '[',
            BracketKind::Table => '{',
        }
    }

    pub fn close(self) -> char {
        match self {
            BracketKind::Tuple => ')',
            BracketKind::Indexer => ']',
            BracketKind::Table => '}',
        }
    }
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BracketKind::Tuple => "tuple",
            BracketKind::Indexer => "indexer",
            BracketKind::Table => "table",
        })
    }
}

/// One token of a type annotation.
///
/// Serializes to the `{"type": ...}` objects the doc generator consumes, e.g.
/// `{"type": "identifier", "identifier": "x"}` or
/// `{"type": "tuple", "unseparated_tokens": [...]}`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireToken", from = "WireToken")]
pub enum Token {
    /// Punctuation with no meaning of its own. In practice only `<` and `>`.
    Punctuation(char),
    /// `->`
    Arrow,
    /// `|`
    Union,
    /// `&`
    Intersection,
    /// `,` inside a bracketed group.
    Separator,
    /// A parameter or field name, written with a trailing `:`.
    Identifier(String),
    /// A type name.
    LuaType(String),
    Bracketed {
        kind: BracketKind,
        children: Vec<Token>,
    },
}

impl Token {
    pub fn identifier(name: impl Into<String>) -> Token {
        Token::Identifier(name.into())
    }

    pub fn lua_type(name: impl Into<String>) -> Token {
        Token::LuaType(name.into())
    }

    pub fn bracketed(kind: BracketKind, children: impl Into<Vec<Token>>) -> Token {
        Token::Bracketed {
            kind,
            children: children.into(),
        }
    }

    pub fn children(&self) -> Option<&[Token]> {
        match self {
            Token::Bracketed { children, .. } => Some(children),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Punctuation(c) => write!(f, "{}", c),
            Token::Arrow => f.write_str("->"),
            Token::Union => f.write_str("|"),
            Token::Intersection => f.write_str("&"),
            Token::Separator => f.write_str(","),
            Token::Identifier(name) => write!(f, "{}:", name),
            Token::LuaType(name) => f.write_str(name),
            Token::Bracketed { kind, children } => {
                write!(f, "{}{}{}", kind.open(), render(children), kind.close())
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireToken {
    Punc { token: char },
    Arrow,
    Union,
    Intersection,
    Separator,
    Identifier { identifier: String },
    LuaType { lua_type: String },
    Tuple { unseparated_tokens: Vec<Token> },
    Indexer { unseparated_tokens: Vec<Token> },
    Table { unseparated_tokens: Vec<Token> },
}

impl From<Token> for WireToken {
    fn from(token: Token) -> Self {
        match token {
            Token::Punctuation(token) => WireToken::Punc { token },
            Token::Arrow => WireToken::Arrow,
            Token::Union => WireToken::Union,
            Token::Intersection => WireToken::Intersection,
            Token::Separator => WireToken::Separator,
            Token::Identifier(identifier) => WireToken::Identifier { identifier },
            Token::LuaType(lua_type) => WireToken::LuaType { lua_type },
            Token::Bracketed { kind, children } => {
                let unseparated_tokens = children;
                match kind {
                    BracketKind::Tuple => WireToken::Tuple { unseparated_tokens },
                    BracketKind::Indexer => WireToken::Indexer { unseparated_tokens },
                    BracketKind::Table => WireToken::Table { unseparated_tokens },
                }
            }
        }
    }
}

impl From<WireToken> for Token {
    fn from(wire: WireToken) -> Self {
        match wire {
            WireToken::Punc { token } => Token::Punctuation(token),
            WireToken::Arrow => Token::Arrow,
            WireToken::Union => Token::Union,
            WireToken::Intersection => Token::Intersection,
            WireToken::Separator => Token::Separator,
            WireToken::Identifier { identifier } => Token::Identifier(identifier),
            WireToken::LuaType { lua_type } => Token::LuaType(lua_type),
            WireToken::Tuple { unseparated_tokens } => {
                Token::bracketed(BracketKind::Tuple, unseparated_tokens)
            }
            WireToken::Indexer { unseparated_tokens } => {
                Token::bracketed(BracketKind::Indexer, unseparated_tokens)
            }
            WireToken::Table { unseparated_tokens } => {
                Token::bracketed(BracketKind::Table, unseparated_tokens)
            }
        }
    }
}
