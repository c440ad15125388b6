//! Tokens of stylesheet abbreviations (`m10-20`, `bd1#f.5!`)

use super::Field;
use crate::utils::Spanned;
use std::fmt;

pub type StyleToken = Spanned<Token>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleOperator {
    /// `+`
    Sibling,
    /// `!`
    Important,
    /// `,`
    ArgumentDelimiter,
    /// `-`
    ValueDelimiter,
    /// `:`
    PropertyDelimiter,
}

impl StyleOperator {
    pub fn of(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(StyleOperator::Sibling),
            '!' => Some(StyleOperator::Important),
            ',' => Some(StyleOperator::ArgumentDelimiter),
            '-' => Some(StyleOperator::ValueDelimiter),
            ':' => Some(StyleOperator::PropertyDelimiter),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            StyleOperator::Sibling => '+',
            StyleOperator::Important => '!',
            StyleOperator::ArgumentDelimiter => ',',
            StyleOperator::ValueDelimiter => '-',
            StyleOperator::PropertyDelimiter => ':',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberValue {
    pub value: f64,
    pub unit: String,
    /// Number as typed, used to pick the int or float unit
    pub raw_value: String,
}

impl NumberValue {
    pub fn new(value: f64, unit: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            raw_value: raw_value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
    /// Source text after `#`
    pub raw: String,
}

impl ColorValue {
    /// Builds a color from abbreviated hex and an optional alpha suffix
    ///
    /// One digit repeats six times, two digits repeat three times, three
    /// digits double each; `t` is transparent black.
    pub fn parse(value: &str, alpha: Option<&str>) -> Self {
        let mut a = alpha
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(1.0);
        let (r, g, b);

        if value == "t" {
            a = 0.0;
            r = "0".to_string();
            g = r.clone();
            b = r.clone();
        } else {
            let chars: Vec<char> = value.chars().collect();
            match chars.len() {
                0 => {
                    r = "0".to_string();
                    g = r.clone();
                    b = r.clone();
                }
                1 => {
                    let c: String = std::iter::repeat(chars[0]).take(2).collect();
                    r = c.clone();
                    g = c.clone();
                    b = c;
                }
                2 => {
                    r = value.to_string();
                    g = r.clone();
                    b = r.clone();
                }
                3 => {
                    r = chars[0].to_string().repeat(2);
                    g = chars[1].to_string().repeat(2);
                    b = chars[2].to_string().repeat(2);
                }
                _ => {
                    let doubled: Vec<char> = chars.iter().chain(chars.iter()).copied().collect();
                    r = doubled[0..2].iter().collect();
                    g = doubled[2..4].iter().collect();
                    b = doubled[4..6].iter().collect();
                }
            }
        }

        let channel = |hex: &str| u8::from_str_radix(hex, 16).unwrap_or(0);
        Self {
            r: channel(&r),
            g: channel(&g),
            b: channel(&b),
            a,
            raw: value.to_string(),
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0 && self.a == 0.0
    }

    /// CSS notation: `transparent`, hex when opaque, `rgba()` otherwise
    pub fn to_css(&self, short_hex: bool) -> String {
        if self.is_transparent() {
            return "transparent".to_string();
        }
        if self.a == 1.0 {
            let channels = [self.r, self.g, self.b];
            if short_hex && channels.iter().all(|c| c % 17 == 0) {
                let digits: String = channels.iter().map(|c| format!("{:x}", c >> 4)).collect();
                return format!("#{}", digits);
            }
            let digits: String = channels.iter().map(|c| format!("{:02x}", c)).collect();
            return format!("#{}", digits);
        }
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, frac(self.a, 8))
    }
}

/// Fixed-point number with trailing zeros removed
pub fn frac(num: f64, digits: usize) -> String {
    let fixed = format!("{:.*}", digits, num);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(String),
    Number(NumberValue),
    Color(ColorValue),
    String { value: String, single: bool },
    /// `--name`
    CustomProperty(String),
    Bracket { open: bool },
    Operator(StyleOperator),
    WhiteSpace,
    Field(Field),
}

impl Token {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Literal(_) => "Literal",
            Token::Number(_) => "NumberValue",
            Token::Color(_) => "ColorValue",
            Token::String { .. } => "StringValue",
            Token::CustomProperty(_) => "CustomProperty",
            Token::Bracket { .. } => "Bracket",
            Token::Operator(_) => "Operator",
            Token::WhiteSpace => "WhiteSpace",
            Token::Field(_) => "Field",
        }
    }

    pub fn is_operator(&self, kind: StyleOperator) -> bool {
        matches!(self, Token::Operator(op) if *op == kind)
    }

    pub fn is_bracket(&self, open: Option<bool>) -> bool {
        match self {
            Token::Bracket { open: is_open } => open.map_or(true, |o| o == *is_open),
            _ => false,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_))
    }

    pub fn is_white_space(&self) -> bool {
        matches!(self, Token::WhiteSpace)
    }

    /// Tokens that can appear in a property value
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Token::String { .. }
                | Token::Color(_)
                | Token::Number(_)
                | Token::Literal(_)
                | Token::Field(_)
                | Token::CustomProperty(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) | Token::CustomProperty(value) => write!(f, "{}", value),
            Token::Number(n) => write!(f, "{}{}", n.raw_value, n.unit),
            Token::Color(c) => write!(f, "#{}", c.raw),
            Token::String { value, single } => {
                let q = if *single { '\'' } else { '"' };
                write!(f, "{}{}{}", q, value, q)
            }
            Token::Bracket { open } => write!(f, "{}", if *open { '(' } else { ')' }),
            Token::Operator(op) => write!(f, "{}", op.as_char()),
            Token::WhiteSpace => write!(f, " "),
            Token::Field(field) => write!(f, "{}", field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_expansion() {
        let c = ColorValue::parse("fff", Some(".5"));
        assert_eq!((c.r, c.g, c.b), (255, 255, 255));
        assert_eq!(c.a, 0.5);

        let c = ColorValue::parse("e", None);
        assert_eq!((c.r, c.g, c.b), (0xee, 0xee, 0xee));

        let c = ColorValue::parse("3c", None);
        assert_eq!((c.r, c.g, c.b), (0x3c, 0x3c, 0x3c));

        let c = ColorValue::parse("1234", None);
        assert_eq!((c.r, c.g, c.b), (0x12, 0x34, 0x12));
    }

    #[test]
    fn test_transparent_color() {
        let c = ColorValue::parse("t", None);
        assert!(c.is_transparent());
    }

    #[test]
    fn test_color_output() {
        assert_eq!(ColorValue::parse("f", None).to_css(true), "#fff");
        assert_eq!(ColorValue::parse("f", None).to_css(false), "#ffffff");
        assert_eq!(ColorValue::parse("1234", None).to_css(true), "#123412");
        assert_eq!(ColorValue::parse("t", None).to_css(true), "transparent");
        assert_eq!(
            ColorValue::parse("f00", Some(".5")).to_css(true),
            "rgba(255, 0, 0, 0.5)"
        );
    }

    #[test]
    fn test_frac() {
        assert_eq!(frac(10.0, 4), "10");
        assert_eq!(frac(1.25, 4), "1.25");
        assert_eq!(frac(0.0, 4), "0");
        assert_eq!(frac(1.0 / 3.0, 4), "0.3333");
    }

    #[test]
    fn test_value_tokens() {
        assert!(Token::Number(NumberValue::new(10.0, "", "10")).is_value());
        assert!(!Token::Operator(StyleOperator::Sibling).is_value());
        assert!(Token::Operator(StyleOperator::Important).is_operator(StyleOperator::Important));
    }
}
