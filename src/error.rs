use crate::token::BracketKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected {0}")]
    Expected(String),

    /// The scanner found a character that starts no token. `character` is `None` at end of
    /// input.
    #[error(
        "reached bottom of tokenizer with no match: {} {buffer:?} (group: {is_group})",
        display_char(.character)
    )]
    UnclassifiedCharacter {
        character: Option<char>,
        buffer: String,
        is_group: bool,
    },

    #[error("brackets nested deeper than {limit} levels at byte {offset}")]
    NestingTooDeep { limit: usize, offset: usize },

    #[error("unterminated {kind} opened at byte {offset}")]
    UnterminatedBracket { kind: BracketKind, offset: usize },

    #[error("invalid tokenizer config: {0}")]
    Config(String),
}

fn display_char(character: &Option<char>) -> String {
    match character {
        Some(c) => format!("{:?}", c),
        None => "end of input".to_string(),
    }
}
