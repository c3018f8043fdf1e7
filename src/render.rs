//! Canonical text form of a token sequence.
//!
//! Tokens are joined by single spaces, with no space before a separator or just inside a
//! bracket: `(x: number, y: number) -> Vector3`. When every bracket in the source was closed,
//! tokenizing the rendered text gives back the same tokens. An unterminated bracket is
//! rendered with its closer, which can shift where an enclosing bracket of another kind ends.

use crate::token::Token;

pub fn render(tokens: &[Token]) -> String {
    let mut buf = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && *token != Token::Separator {
            buf.push(' ');
        }
        buf.push_str(&token.to_string());
    }
    buf
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::tokenize;

    #[rstest]
    #[case("x: number", "x: number")]
    #[case("x:number", "x: number")]
    #[case("(x:number,y:number)->Vector3", "(x: number, y: number) -> Vector3")]
    #[case("{[string]: number}", "{[string] : number}")]
    #[case("Array<number>", "Array < number >")]
    #[case("A&B|  C", "A & B | C")]
    #[case("a:b:c", "a: b")]
    #[case("()", "()")]
    #[case("", "")]
    fn canonical_form(#[case] input: &str, #[case] expected: &str) {
        let tokens = tokenize(input, false).unwrap();
        assert_eq!(render(&tokens), expected);
        assert_eq!(tokenize(expected, false).unwrap(), tokens);
    }

    #[test]
    fn separate_punctuation_stays_separate() {
        let tokens = vec![Token::Punctuation('-'), Token::Punctuation('>')];
        assert_eq!(render(&tokens), "- >");
        assert_eq!(tokenize("- >", false).unwrap(), tokens);
    }

    #[test]
    fn unterminated_bracket_inside_another_kind_does_not_round_trip() {
        use crate::token::BracketKind::*;

        let tokens = tokenize("{({)}}", false).unwrap();
        assert_eq!(
            tokens,
            vec![Token::bracketed(
                Table,
                [
                    Token::bracketed(Tuple, [Token::bracketed(Table, Vec::new())]),
                    Token::Punctuation('}'),
                ],
            )]
        );

        // The inner table gets a closer it never had, so the stray `}` ends the outer table.
        let rendered = render(&tokens);
        assert_eq!(rendered, "{({}) }}");
        assert_eq!(
            tokenize(&rendered, false).unwrap(),
            vec![
                Token::bracketed(Table, [Token::bracketed(Tuple, [Token::bracketed(Table, Vec::new())])]),
                Token::Punctuation('}'),
            ]
        );
    }

    #[rstest]
    #[case("[(])]")]
    #[case("({[")]
    #[case("x: (a:b:c, d::)")]
    #[case("(pos: Vector3, é: número) -> ()")]
    fn other_unterminated_inputs_round_trip(#[case] input: &str) {
        let tokens = tokenize(input, false).unwrap();
        assert_eq!(tokenize(&render(&tokens), false).unwrap(), tokens);
    }
}
