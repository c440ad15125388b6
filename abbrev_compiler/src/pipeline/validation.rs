/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating complete pipeline configuration");

    crate::lexical::init_lexical_logging()?;
    crate::lexical::validate_tokenization()?;
    crate::syntax::init_syntax_logging()?;
    crate::snippets::init_snippet_registry()?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Complete pipeline validation succeeded",
        "lexical_analysis" => true,
        "syntax_analysis" => true,
        "snippet_registry" => true
    );

    Ok(())
}
