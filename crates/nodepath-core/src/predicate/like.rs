use serde::{Deserialize, Serialize};

///
/// Like operands
///
/// Patterns use the SQL convention: `%` matches any run of characters,
/// `_` matches exactly one, and `\` escapes the next character.
///

const ANY: char = '%';
const ONE: char = '_';
const ESCAPE: char = '\\';

///
/// LikeMode
///
/// How a raw search value is wrapped into a like operand.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum LikeMode {
    /// `%value%`
    #[default]
    Contains,
    /// `value%`
    StartsWith,
    /// `%value`
    EndsWith,
    /// `value`, wildcards in the input still escaped
    Exact,
}

/// Escape wildcard characters in `value` and wrap it according to `mode`.
#[must_use]
pub fn to_like_operand(value: &str, mode: LikeMode) -> String {
    let mut operand = String::with_capacity(value.len() + 2);

    if matches!(mode, LikeMode::Contains | LikeMode::EndsWith) {
        operand.push(ANY);
    }
    for ch in value.chars() {
        if matches!(ch, ANY | ONE | ESCAPE) {
            operand.push(ESCAPE);
        }
        operand.push(ch);
    }
    if matches!(mode, LikeMode::Contains | LikeMode::StartsWith) {
        operand.push(ANY);
    }

    operand
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    Any,
    One,
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        let token = match ch {
            ANY => Token::Any,
            ONE => Token::One,
            // a trailing escape matches itself
            ESCAPE => Token::Literal(chars.next().unwrap_or(ESCAPE)),
            other => Token::Literal(other),
        };
        tokens.push(token);
    }

    tokens
}

/// Match `text` against a like `pattern` (case-sensitive).
#[must_use]
pub fn like_match(text: &str, pattern: &str) -> bool {
    let tokens = tokenize(pattern);
    let text: Vec<char> = text.chars().collect();

    let (mut t, mut p) = (0, 0);
    // last `%` seen: (token index after it, text index it currently absorbs up to)
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match tokens.get(p) {
            Some(Token::Any) => {
                backtrack = Some((p + 1, t));
                p += 1;
            }
            Some(Token::One) => {
                t += 1;
                p += 1;
            }
            Some(Token::Literal(ch)) if *ch == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((resume, absorbed)) => {
                    backtrack = Some((resume, absorbed + 1));
                    p = resume;
                    t = absorbed + 1;
                }
                None => return false,
            },
        }
    }

    tokens[p..].iter().all(|token| *token == Token::Any)
}
