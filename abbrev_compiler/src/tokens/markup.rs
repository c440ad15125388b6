//! Tokens of markup abbreviations (`ul>li.item$*3`)

use super::Field;
use crate::utils::Spanned;
use std::fmt;

pub type MarkupToken = Spanned<Token>;

/// Which bracket pair a bracket token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketContext {
    /// `(` `)`
    Group,
    /// `[` `]`
    Attribute,
    /// `{` `}`
    Expression,
}

impl BracketContext {
    pub fn of(ch: char) -> Option<Self> {
        match ch {
            '(' | ')' => Some(BracketContext::Group),
            '[' | ']' => Some(BracketContext::Attribute),
            '{' | '}' => Some(BracketContext::Expression),
            _ => None,
        }
    }

    pub fn chars(&self) -> (char, char) {
        match self {
            BracketContext::Group => ('(', ')'),
            BracketContext::Attribute => ('[', ']'),
            BracketContext::Expression => ('{', '}'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// `>`
    Child,
    /// `+`
    Sibling,
    /// `^`
    Climb,
    /// `.`
    Class,
    /// `#`
    Id,
    /// `/`
    Close,
    /// `=`
    Equal,
}

impl OperatorKind {
    pub fn of(ch: char) -> Option<Self> {
        match ch {
            '>' => Some(OperatorKind::Child),
            '+' => Some(OperatorKind::Sibling),
            '^' => Some(OperatorKind::Climb),
            '.' => Some(OperatorKind::Class),
            '#' => Some(OperatorKind::Id),
            '/' => Some(OperatorKind::Close),
            '=' => Some(OperatorKind::Equal),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            OperatorKind::Child => '>',
            OperatorKind::Sibling => '+',
            OperatorKind::Climb => '^',
            OperatorKind::Class => '.',
            OperatorKind::Id => '#',
            OperatorKind::Close => '/',
            OperatorKind::Equal => '=',
        }
    }
}

/// `*N` suffix; `value` is the clone index while unrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeater {
    pub count: usize,
    pub value: usize,
    /// Bare `*`: count comes from wrapped text lines
    pub implicit: bool,
}

impl Repeater {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            value: 0,
            implicit: false,
        }
    }

    pub fn implicit() -> Self {
        Self {
            count: 1,
            value: 0,
            implicit: true,
        }
    }
}

/// `$$@^-3` numbering placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeaterNumber {
    /// Number of `$`, the zero-padded width
    pub size: usize,
    pub reverse: bool,
    pub base: usize,
    /// Number of `^` after `@`: how many repeaters up to count from
    pub parent: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(String),
    WhiteSpace(String),
    Quote { single: bool },
    Bracket { open: bool, context: BracketContext },
    Operator(OperatorKind),
    Repeater(Repeater),
    /// `$#`: text line of the current implicit repeater
    RepeaterPlaceholder,
    RepeaterNumber(RepeaterNumber),
    Field(Field),
}

impl Token {
    /// Variant name used in parser error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Literal(_) => "Literal",
            Token::WhiteSpace(_) => "WhiteSpace",
            Token::Quote { .. } => "Quote",
            Token::Bracket { .. } => "Bracket",
            Token::Operator(_) => "Operator",
            Token::Repeater(_) => "Repeater",
            Token::RepeaterPlaceholder => "RepeaterPlaceholder",
            Token::RepeaterNumber(_) => "RepeaterNumber",
            Token::Field(_) => "Field",
        }
    }

    pub fn is_operator(&self, kind: OperatorKind) -> bool {
        matches!(self, Token::Operator(op) if *op == kind)
    }

    pub fn is_bracket(&self, context: BracketContext, open: Option<bool>) -> bool {
        match self {
            Token::Bracket {
                open: is_open,
                context: ctx,
            } => *ctx == context && open.map_or(true, |o| o == *is_open),
            _ => false,
        }
    }

    pub fn is_quote(&self, single: Option<bool>) -> bool {
        match self {
            Token::Quote { single: s } => single.map_or(true, |expected| expected == *s),
            _ => false,
        }
    }

    pub fn is_white_space(&self) -> bool {
        matches!(self, Token::WhiteSpace(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_))
    }

    /// Literal starting with an uppercase letter (JSX component name)
    pub fn is_capitalized_literal(&self) -> bool {
        match self {
            Token::Literal(value) => value.chars().next().is_some_and(|c| c.is_ascii_uppercase()),
            _ => false,
        }
    }
}

/// Source form of the token, as it would appear in an abbreviation
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) | Token::WhiteSpace(value) => write!(f, "{}", value),
            Token::Quote { single } => write!(f, "{}", if *single { '\'' } else { '"' }),
            Token::Bracket { open, context } => {
                let (o, c) = context.chars();
                write!(f, "{}", if *open { o } else { c })
            }
            Token::Operator(op) => write!(f, "{}", op.as_char()),
            Token::Repeater(r) if r.implicit => write!(f, "*"),
            Token::Repeater(r) => write!(f, "*{}", r.count),
            Token::RepeaterPlaceholder => write!(f, "$#"),
            Token::RepeaterNumber(n) => {
                write!(f, "{}", "$".repeat(n.size))?;
                if n.reverse || n.base != 1 || n.parent > 0 {
                    write!(f, "@{}", "^".repeat(n.parent))?;
                    if n.reverse {
                        write!(f, "-")?;
                    }
                    write!(f, "{}", n.base)?;
                }
                Ok(())
            }
            Token::Field(field) => write!(f, "{}", field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let open = Token::Bracket {
            open: true,
            context: BracketContext::Attribute,
        };
        assert!(open.is_bracket(BracketContext::Attribute, None));
        assert!(open.is_bracket(BracketContext::Attribute, Some(true)));
        assert!(!open.is_bracket(BracketContext::Group, None));

        assert!(Token::Operator(OperatorKind::Climb).is_operator(OperatorKind::Climb));
        assert!(Token::Literal("Foo".into()).is_capitalized_literal());
        assert!(!Token::Literal("foo".into()).is_capitalized_literal());
    }

    #[test]
    fn test_display_source_form() {
        let number = Token::RepeaterNumber(RepeaterNumber {
            size: 2,
            reverse: true,
            base: 5,
            parent: 1,
        });
        assert_eq!(number.to_string(), "$$@^-5");
        assert_eq!(Token::Repeater(Repeater::new(3)).to_string(), "*3");
        assert_eq!(Token::Repeater(Repeater::implicit()).to_string(), "*");
    }
}
