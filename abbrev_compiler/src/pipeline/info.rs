use crate::config::constants::compile_time::{conversion, lexical};
use crate::snippets::data;

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub markup_syntaxes: Vec<String>,
    pub stylesheet_syntaxes: Vec<String>,
    pub markup_snippets: usize,
    pub stylesheet_snippets: usize,
    pub max_abbreviation_length: usize,
    pub editor_max_repeat: usize,
    pub global_logging_enabled: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Abbreviation Expansion Pipeline:\n\
             - Pipeline Stages: {}\n\
             - Markup Syntaxes: {}\n\
             - Stylesheet Syntaxes: {}\n\
             - Markup Snippets: {}\n\
             - Stylesheet Snippets: {}\n\
             - Max Abbreviation Length: {} chars\n\
             - Editor Repeat Limit: {}\n\
             - Global Logging: {}",
            self.pipeline_stages,
            self.markup_syntaxes.join(", "),
            self.stylesheet_syntaxes.join(", "),
            self.markup_snippets,
            self.stylesheet_snippets,
            self.max_abbreviation_length,
            self.editor_max_repeat,
            self.global_logging_enabled,
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage abbreviation expander for {} markup and {} stylesheet syntaxes",
            self.pipeline_stages,
            self.markup_syntaxes.len(),
            self.stylesheet_syntaxes.len()
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    PipelineInfo {
        // tokenize, parse, convert, resolve snippets, transform, stringify
        pipeline_stages: 6,
        markup_syntaxes: names(&[
            "html", "xhtml", "xml", "xsl", "jsx", "vue", "svelte", "haml", "slim", "pug",
        ]),
        stylesheet_syntaxes: names(&["css", "scss", "less", "sass", "stylus", "sss"]),
        markup_snippets: data::markup_snippets().len(),
        stylesheet_snippets: data::stylesheet_snippets().len(),
        max_abbreviation_length: lexical::MAX_ABBREVIATION_LENGTH,
        editor_max_repeat: conversion::EDITOR_MAX_REPEAT,
        global_logging_enabled: crate::logging::is_initialized(),
    }
}
