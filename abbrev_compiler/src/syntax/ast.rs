//! Parse trees produced by the markup and stylesheet parsers

use crate::tokens::stylesheet::{ColorValue, NumberValue};
use crate::tokens::{Field, MarkupToken, Repeater};
use crate::snippets::CssSnippet;
use crate::utils::Spanned;

// ============================================================================
// MARKUP
// ============================================================================

/// `name=value` pair; either side may be missing
///
/// A missing name is a value for the element's default attribute
/// (`a["url"]`). `multiple` is set by repeated shorthand (`..foo`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenAttribute {
    pub name: Option<Vec<MarkupToken>>,
    pub value: Option<Vec<MarkupToken>>,
    pub multiple: bool,
    /// Value came from `{expr}` shorthand
    pub expression: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenElement {
    pub name: Option<Vec<MarkupToken>>,
    pub attributes: Option<Vec<TokenAttribute>>,
    pub value: Option<Vec<MarkupToken>>,
    pub repeat: Option<Repeater>,
    pub self_close: bool,
    pub elements: Vec<TokenStatement>,
}

impl TokenElement {
    /// No name, value or attributes; the parser drops such elements
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none() && self.attributes.is_none()
    }
}

/// `( ... )` with an optional repeater for its whole content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenGroup {
    pub elements: Vec<TokenStatement>,
    pub repeat: Option<Repeater>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenStatement {
    Element(TokenElement),
    Group(TokenGroup),
}

impl TokenStatement {
    pub fn elements(&self) -> &[TokenStatement] {
        match self {
            TokenStatement::Element(e) => &e.elements,
            TokenStatement::Group(g) => &g.elements,
        }
    }

    pub fn elements_mut(&mut self) -> &mut Vec<TokenStatement> {
        match self {
            TokenStatement::Element(e) => &mut e.elements,
            TokenStatement::Group(g) => &mut g.elements,
        }
    }

    pub fn repeat(&self) -> Option<&Repeater> {
        match self {
            TokenStatement::Element(e) => e.repeat.as_ref(),
            TokenStatement::Group(g) => g.repeat.as_ref(),
        }
    }
}

// ============================================================================
// STYLESHEET
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CssValueToken {
    Literal(String),
    Number(NumberValue),
    Color(ColorValue),
    String { value: String, single: bool },
    CustomProperty(String),
    Field(Field),
    FunctionCall {
        name: String,
        arguments: Vec<CssValue>,
    },
}

impl CssValueToken {
    pub fn literal(value: impl Into<String>) -> CssToken {
        Spanned::synthetic(CssValueToken::Literal(value.into()))
    }

    pub fn field(index: usize, name: impl Into<String>) -> CssToken {
        Spanned::synthetic(CssValueToken::Field(Field::new(index, name)))
    }
}

/// Value token with its span; synthesized tokens have a default span
pub type CssToken = Spanned<CssValueToken>;

/// One space-separated value of a property; commas start a new one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssValue {
    pub value: Vec<CssToken>,
}

impl CssValue {
    pub fn new(value: Vec<CssToken>) -> Self {
        Self { value }
    }
}

/// Parsed stylesheet abbreviation unit, later resolved against snippets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssProperty {
    pub name: Option<String>,
    pub value: Vec<CssValue>,
    pub important: bool,
    /// Snippet the property was resolved against
    pub snippet: Option<CssSnippet>,
}

// ============================================================================
// ABBREVIATION TREE
// ============================================================================

/// Piece of an unrolled value: plain text or a tabstop kept for the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueToken {
    Text(String),
    Field { index: usize, name: String },
}

impl ValueToken {
    pub fn text(value: impl Into<String>) -> Self {
        ValueToken::Text(value.into())
    }

    pub fn field(index: usize, name: impl Into<String>) -> Self {
        ValueToken::Field {
            index,
            name: name.into(),
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, ValueToken::Field { .. })
    }
}

/// Flattens a value for matching: fields contribute their placeholder
pub fn value_to_string(value: &[ValueToken]) -> String {
    value
        .iter()
        .map(|token| match token {
            ValueToken::Text(text) => text.as_str(),
            ValueToken::Field { name, .. } => name.as_str(),
        })
        .collect()
}

/// Appends `token`, merging adjacent text
pub fn push_value_token(value: &mut Vec<ValueToken>, token: ValueToken) {
    match (value.last_mut(), token) {
        (Some(ValueToken::Text(last)), ValueToken::Text(text)) => last.push_str(&text),
        (_, token) => value.push(token),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeValueType {
    #[default]
    Raw,
    SingleQuote,
    DoubleQuote,
    Expression,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attribute {
    pub name: Option<String>,
    pub value: Option<Vec<ValueToken>>,
    /// `name.`: output without a value
    pub boolean: bool,
    /// `!name`: output only when a value is given
    pub implied: bool,
    pub value_type: AttributeValueType,
    pub multiple: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Vec<ValueToken>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// Markup element after repeaters and groups are unrolled
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbbreviationNode {
    pub name: Option<String>,
    pub value: Option<Vec<ValueToken>>,
    pub attributes: Option<Vec<Attribute>>,
    pub children: Vec<AbbreviationNode>,
    /// Repeater state of the clone this node was produced by
    pub repeat: Option<Repeater>,
    pub self_closing: bool,
}

impl AbbreviationNode {
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Text-only node: no name and no attributes
    pub fn is_snippet(&self) -> bool {
        self.name.is_none() && self.attributes.is_none()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .as_ref()
            .and_then(|attrs| attrs.iter().find(|a| a.is_named(name)))
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes
            .as_mut()
            .and_then(|attrs| attrs.iter_mut().find(|a| a.is_named(name)))
    }

    /// Last descendant along the last-child chain, or the node itself
    pub fn deepest_mut(&mut self) -> &mut AbbreviationNode {
        let mut node = self;
        while !node.children.is_empty() {
            let last = node.children.len() - 1;
            node = &mut node.children[last];
        }
        node
    }

    /// Depth-first search over descendants, excluding the node itself
    pub fn find_mut(
        &mut self,
        predicate: &dyn Fn(&AbbreviationNode) -> bool,
    ) -> Option<&mut AbbreviationNode> {
        for child in self.children.iter_mut() {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_mut(predicate) {
                return Some(found);
            }
        }
        None
    }
}

/// Root of an unrolled markup abbreviation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Abbreviation {
    pub children: Vec<AbbreviationNode>,
}
