//! Markup tokens back to text, resolving repeater state and variables

use super::markup::ConvertState;
use crate::syntax::ast::ValueToken;
use crate::tokens::markup::{BracketContext, Token};
use crate::tokens::{Field, MarkupToken, RepeaterNumber};

/// Text of a single token under the current repeater state
pub fn stringify_token(token: &Token, state: &mut ConvertState) -> String {
    match token {
        Token::Literal(value) | Token::WhiteSpace(value) => value.clone(),
        Token::Quote { single } => (if *single { "'" } else { "\"" }).to_string(),
        Token::Bracket { open, context } => {
            let (o, c) = match context {
                BracketContext::Attribute => ('[', ']'),
                BracketContext::Expression => ('{', '}'),
                BracketContext::Group => ('(', ')'),
            };
            (if *open { o } else { c }).to_string()
        }
        Token::Operator(op) => op.as_char().to_string(),
        Token::Field(field) => match field.index {
            Some(_) => field.to_string(),
            None if field.name.is_empty() => String::new(),
            None => state.variable(&field.name),
        },
        Token::RepeaterPlaceholder => {
            let value = state
                .repeaters
                .iter()
                .rev()
                .find(|r| r.implicit)
                .map(|r| r.value);
            state.inserted = true;
            state.get_text(value)
        }
        Token::RepeaterNumber(number) => repeater_number(number, state),
        // Repeaters are consumed by the parser
        Token::Repeater(_) => String::new(),
    }
}

fn repeater_number(token: &RepeaterNumber, state: &ConvertState) -> String {
    let mut value = 1;

    if let Some(last_ix) = state.repeaters.len().checked_sub(1) {
        let repeater = &state.repeaters[last_ix];
        value = if token.reverse {
            token.base + repeater.count - repeater.value - 1
        } else {
            token.base + repeater.value
        };

        if token.parent > 0 {
            let parent_ix = last_ix.saturating_sub(token.parent);
            if parent_ix != last_ix {
                value += repeater.count * state.repeaters[parent_ix].value;
            }
        }
    }

    format!("{:0>width$}", value, width = token.size)
}

pub fn stringify_name(tokens: &[MarkupToken], state: &mut ConvertState) -> String {
    tokens
        .iter()
        .map(|token| stringify_token(&token.value, state))
        .collect()
}

/// Concatenates tokens into text, keeping tabstops as separate entries
pub fn stringify_value(tokens: &[MarkupToken], state: &mut ConvertState) -> Vec<ValueToken> {
    let mut result = Vec::new();
    let mut text = String::new();

    for token in tokens {
        match &token.value {
            Token::Field(Field {
                index: Some(index),
                name,
            }) => {
                if !text.is_empty() {
                    result.push(ValueToken::Text(std::mem::take(&mut text)));
                }
                result.push(ValueToken::field(*index, name.clone()));
            }
            other => text.push_str(&stringify_token(other, state)),
        }
    }

    if !text.is_empty() {
        result.push(ValueToken::Text(text));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::markup::ConvertOptions;
    use crate::tokens::Repeater;

    #[test]
    fn test_plain_tokens() {
        let mut state = ConvertState::new(&ConvertOptions::default());
        let close = Token::Bracket {
            open: false,
            context: BracketContext::Group,
        };
        assert_eq!(stringify_token(&close, &mut state), ")");
        assert_eq!(stringify_token(&Token::Quote { single: true }, &mut state), "'");
        assert_eq!(
            stringify_token(&Token::Field(Field::new(2, "x")), &mut state),
            "${2:x}"
        );
    }

    #[test]
    fn test_number_without_repeater_is_one() {
        let mut state = ConvertState::new(&ConvertOptions::default());
        let token = Token::RepeaterNumber(RepeaterNumber {
            size: 3,
            reverse: false,
            base: 1,
            parent: 0,
        });
        assert_eq!(stringify_token(&token, &mut state), "001");

        let mut repeat = Repeater::new(5);
        repeat.value = 4;
        state.repeaters.push(repeat);
        assert_eq!(stringify_token(&token, &mut state), "005");
    }

    #[test]
    fn test_value_splits_fields() {
        let mut state = ConvertState::new(&ConvertOptions::default());
        let tokens = vec![
            MarkupToken::synthetic(Token::Literal("a".into())),
            MarkupToken::synthetic(Token::Field(Field::new(1, "b"))),
            MarkupToken::synthetic(Token::Field(Field::variable("v"))),
        ];
        assert_eq!(
            stringify_value(&tokens, &mut state),
            vec![ValueToken::text("a"), ValueToken::field(1, "b"), ValueToken::text("v")]
        );
    }
}
