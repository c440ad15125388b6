use crate::config::SyntaxType;
use std::time::Duration;

/// One finished expansion
#[derive(Debug, Clone)]
pub struct ExpansionResult {
    pub output: String,
    pub syntax_type: SyntaxType,
    pub syntax: String,
    /// Markup nodes or stylesheet properties rendered
    pub node_count: usize,
    pub processing_duration: Duration,
}

impl ExpansionResult {
    pub fn new(
        output: String,
        syntax_type: SyntaxType,
        syntax: String,
        node_count: usize,
        processing_duration: Duration,
    ) -> Self {
        Self {
            output,
            syntax_type,
            syntax,
            node_count,
            processing_duration,
        }
    }

    pub fn log_success(&self, abbreviation: &str) {
        crate::log_success!(
            crate::logging::codes::success::EXPANSION_COMPLETE,
            "Abbreviation expanded",
            "abbreviation" => abbreviation,
            "type" => self.syntax_type.as_str(),
            "syntax" => &self.syntax,
            "nodes" => self.node_count,
            "output_length" => self.output.len(),
            "duration_ms" => format!("{:.3}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
