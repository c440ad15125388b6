//! Placeholder text for `lorem`, `lorem10`, `loremru5-10` nodes

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::sync::OnceLock;

use super::implicit_tag::resolve_implicit_tag;
use super::vocabulary::Vocabulary;
use super::Ancestor;
use crate::config::constants::compile_time::lorem::{DEFAULT_WORD_COUNT, MAX_LOREM_WORDS};
use crate::config::Config;
use crate::syntax::ast::{AbbreviationNode, ValueToken};

static LOREM_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn lorem_pattern() -> Option<&'static Regex> {
    LOREM_PATTERN
        .get_or_init(|| Regex::new(r"(?i)^lorem([a-z]*)(\d*)(-\d*)?$").ok())
        .as_ref()
}

/// Random source for placeholder text; a fixed seed gives reproducible text
#[derive(Debug, Clone)]
pub struct LoremGenerator {
    rng: StdRng,
}

impl LoremGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Integer in `from..to`; `from` when the range is empty
    pub fn rand(&mut self, from: usize, to: usize) -> usize {
        if to <= from {
            return from;
        }
        self.rng.gen_range(from..to)
    }

    /// Up to `count` distinct words
    fn sample(&mut self, words: &[&'static str], count: usize) -> Vec<String> {
        words
            .choose_multiple(&mut self.rng, count)
            .map(|word| word.to_string())
            .collect()
    }

    fn insert_commas(&mut self, words: &mut [String]) {
        let len = words.len();
        if len < 2 {
            return;
        }

        let total = if len > 3 && len <= 6 {
            self.rand(0, 1)
        } else if len > 6 && len <= 12 {
            self.rand(0, 2)
        } else {
            self.rand(1, 4)
        };

        for _ in 0..total {
            let pos = self.rand(0, len - 2);
            if !words[pos].ends_with(',') {
                words[pos].push(',');
            }
        }
    }

    fn sentence(&mut self, mut words: Vec<String>, end: Option<&str>) -> String {
        self.insert_commas(&mut words);
        if let Some(first) = words.first_mut() {
            *first = capitalize(first);
        }
        let end = match end {
            Some(end) => end.to_string(),
            None => {
                let marks = ['?', '!', '.', '.', '.'];
                marks[self.rand(0, marks.len() - 1)].to_string()
            }
        };
        words.join(" ") + &end
    }

    /// Paragraph of `word_count` words, optionally opening with the common phrase
    pub fn paragraph(&mut self, vocabulary: &Vocabulary, word_count: usize, start_with_common: bool) -> String {
        let mut result = Vec::new();
        let mut total = 0;

        if start_with_common && !vocabulary.common.is_empty() {
            let words: Vec<String> = vocabulary
                .common
                .iter()
                .take(word_count)
                .map(|w| w.to_string())
                .collect();
            total += words.len();
            result.push(self.sentence(words, Some(".")));
        }

        while total < word_count {
            let count = self.rand(2, 30).min(word_count - total);
            let words = self.sample(vocabulary.words, count);
            if words.is_empty() {
                break;
            }
            total += words.len();
            result.push(self.sentence(words, None));
        }

        result.join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn parse_count(digits: &str) -> usize {
    digits.parse::<usize>().unwrap_or(MAX_LOREM_WORDS).min(MAX_LOREM_WORDS)
}

/// Replaces a `lorem` node with generated text
///
/// Only the first clone of a repeated lorem, or a lorem outside any
/// repeater, opens with the common phrase. A repeated lorem nested in an
/// element becomes an implicit element itself (`ul>lorem*3` gives `li`s).
pub fn lorem(
    node: &mut AbbreviationNode,
    ancestors: &[Ancestor],
    config: &Config,
    generator: &mut LoremGenerator,
) {
    let Some(captures) = node
        .name
        .as_deref()
        .and_then(|name| lorem_pattern().and_then(|re| re.captures(name)))
    else {
        return;
    };

    let vocabulary = Vocabulary::for_lang(&captures[1]);
    let min_words = match &captures[2] {
        "" => DEFAULT_WORD_COUNT,
        digits => parse_count(digits).max(1),
    };
    let max_words = captures
        .get(3)
        .map_or(min_words, |range| parse_count(&range.as_str()[1..]).max(min_words));
    drop(captures);

    let word_count = generator.rand(min_words, max_words);
    let repeat = node
        .repeat
        .or_else(|| ancestors.iter().rev().find_map(|a| a.repeat));

    node.name = None;
    node.attributes = None;
    node.value = Some(vec![ValueToken::Text(generator.paragraph(
        vocabulary,
        word_count,
        repeat.map_or(true, |r| r.value == 0),
    ))]);

    if node.repeat.is_some() && !ancestors.is_empty() {
        resolve_implicit_tag(node, ancestors, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve::resolve;
    use crate::config::PartialConfig;
    use crate::tokens::Repeater;

    fn text(node: &AbbreviationNode) -> &str {
        match node.value.as_deref() {
            Some([ValueToken::Text(text)]) => text,
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_word_count() {
        let config = resolve(PartialConfig::default()).unwrap();
        let mut generator = LoremGenerator::new(1);
        let mut node = AbbreviationNode::element("lorem5");
        lorem(&mut node, &[], &config, &mut generator);

        assert_eq!(node.name, None);
        let text = text(&node);
        assert_eq!(text.split(' ').count(), 5);
        assert!(text.starts_with("Lorem"));
    }

    #[test]
    fn test_default_length_and_seed() {
        let config = resolve(PartialConfig::default()).unwrap();
        let render = |seed| {
            let mut node = AbbreviationNode::element("lorem");
            lorem(&mut node, &[], &config, &mut LoremGenerator::new(seed));
            text(&node).to_string()
        };

        let first = render(42);
        assert_eq!(first.split(' ').count(), DEFAULT_WORD_COUNT);
        assert_eq!(first, render(42));
    }

    #[test]
    fn test_repeated_clone_skips_common_phrase() {
        let config = resolve(PartialConfig::default()).unwrap();
        let mut repeat = Repeater::new(3);
        repeat.value = 1;
        let mut node = AbbreviationNode {
            repeat: Some(repeat),
            ..AbbreviationNode::element("lorem4")
        };
        lorem(&mut node, &[Ancestor::named("ul")], &config, &mut LoremGenerator::new(3));

        assert_eq!(node.name.as_deref(), Some("li"));
        assert!(!text(&node).starts_with("Lorem ipsum"));
    }

    #[test]
    fn test_other_languages() {
        let config = resolve(PartialConfig::default()).unwrap();
        let mut node = AbbreviationNode::element("loremru3");
        lorem(&mut node, &[], &config, &mut LoremGenerator::new(9));
        assert!(text(&node).starts_with("Далеко-далеко"));
    }

    #[test]
    fn test_rand_range() {
        let mut generator = LoremGenerator::new(0);
        for _ in 0..100 {
            let value = generator.rand(2, 5);
            assert!((2..5).contains(&value));
        }
        assert_eq!(generator.rand(4, 4), 4);
    }

    #[test]
    fn test_sample_words_are_distinct() {
        let mut generator = LoremGenerator::random();
        let words = ["a", "b", "c", "d"];
        let mut picked = generator.sample(&words, 10);
        assert_eq!(picked.len(), 4);
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 4);
    }

    #[test]
    fn test_non_lorem_names_untouched() {
        let config = resolve(PartialConfig::default()).unwrap();
        let mut node = AbbreviationNode::element("loremipsum-x");
        lorem(&mut node, &[], &config, &mut LoremGenerator::new(1));
        assert_eq!(node.name.as_deref(), Some("loremipsum-x"));
    }
}
