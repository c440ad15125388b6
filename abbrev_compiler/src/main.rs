//! # Abbreviation expander CLI
//!

use abbrev_compiler::config::resolve::resolve_config;
use abbrev_compiler::config::runtime::LoggingPreferences;
use abbrev_compiler::config::{
    ExpansionPreferences, GlobalConfig, OutputHooks, PartialConfig, SyntaxType, TabstopFields,
};
use abbrev_compiler::extract::{extract_abbreviation, ExtractOptions};
use abbrev_compiler::logging::LogLevel;
use abbrev_compiler::{log_info, logging, pipeline};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "abbrev")]
#[command(version, about = "Expands markup and stylesheet abbreviations")]
struct Cli {
    /// Minimum level of diagnostics written to stderr (error, warn, info, debug)
    #[arg(long, global = true, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Write diagnostics as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand an abbreviation and print the result
    Expand {
        abbreviation: String,

        /// Output dialect (html, xhtml, jsx, pug, css, sass, ...)
        #[arg(long)]
        syntax: Option<String>,

        /// Abbreviation type, inferred from the syntax when omitted
        #[arg(long = "type", value_parser = parse_syntax_type)]
        syntax_type: Option<SyntaxType>,

        /// TOML file with global overrides keyed by type or syntax
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print fields as `${1:name}` tabstops
        #[arg(long)]
        tabstops: bool,

        /// Print stage statistics after the output
        #[arg(long)]
        verbose: bool,
    },

    /// Find the abbreviation ending at a position in a line of text
    Extract {
        line: String,

        /// Caret position in characters; end of line by default
        #[arg(long)]
        pos: Option<usize>,

        /// Marker the abbreviation must follow
        #[arg(long, default_value = "")]
        prefix: String,

        /// Scan with stylesheet bracket rules
        #[arg(long)]
        stylesheet: bool,

        /// Print the full match as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show pipeline capabilities
    Info,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.log_level.is_some() || cli.log_json {
        let defaults = LoggingPreferences::default();
        logging::config::init_runtime_preferences(LoggingPreferences {
            min_log_level: cli.log_level.unwrap_or(defaults.min_log_level),
            use_structured_logging: cli.log_json || defaults.use_structured_logging,
            ..defaults
        })?;
    }
    logging::init_global_logging()?;
    log_info!("Abbreviation expander starting");

    match cli.command {
        Command::Expand {
            abbreviation,
            syntax,
            syntax_type,
            config,
            tabstops,
            verbose,
        } => run_expand(&abbreviation, syntax, syntax_type, config, tabstops, verbose)?,
        Command::Extract {
            line,
            pos,
            prefix,
            stylesheet,
            json,
        } => run_extract(&line, pos, prefix, stylesheet, json)?,
        Command::Info => run_info(),
    }

    Ok(())
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

fn parse_syntax_type(value: &str) -> Result<SyntaxType, String> {
    SyntaxType::parse(value).ok_or_else(|| format!("expected 'markup' or 'stylesheet', got '{}'", value))
}

fn run_expand(
    abbreviation: &str,
    syntax: Option<String>,
    syntax_type: Option<SyntaxType>,
    config_path: Option<PathBuf>,
    tabstops: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let preferences = ExpansionPreferences::default();

    let mut user = PartialConfig {
        syntax_type: syntax_type.or_else(|| syntax.as_deref().and_then(SyntaxType::of_syntax)),
        syntax,
        ..PartialConfig::default()
    };
    if tabstops {
        user.hooks = OutputHooks {
            field: Some(Arc::new(TabstopFields)),
            text: None,
        };
    }
    let user = pipeline::apply_preferences(user, &preferences);

    let globals = match config_path {
        Some(path) => GlobalConfig::from_file(&path)?,
        None => pipeline::load_globals(&preferences)?,
    };
    let config = resolve_config(user, &globals)?;

    match pipeline::expand_with_details(abbreviation, &config) {
        Ok(result) => {
            println!("{}", result.output);
            if verbose {
                eprintln!(
                    "{} {} node(s), {} syntax, {:.3} ms",
                    result.syntax_type.as_str(),
                    result.node_count,
                    result.syntax,
                    result.processing_duration.as_secs_f64() * 1000.0
                );
            }
        }
        Err(error) => {
            eprintln!("error[{}]: {}", error.error_code(), error.diagnostic(abbreviation));
            std::process::exit(1);
        }
    }
    Ok(())
}

fn run_extract(
    line: &str,
    pos: Option<usize>,
    prefix: String,
    stylesheet: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractOptions {
        prefix,
        syntax_type: if stylesheet {
            SyntaxType::Stylesheet
        } else {
            SyntaxType::Markup
        },
        ..ExtractOptions::default()
    };

    let Some(found) = extract_abbreviation(line, pos, &options) else {
        eprintln!("No abbreviation found");
        std::process::exit(1);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        println!("{}", found.abbreviation);
    }
    Ok(())
}

fn run_info() {
    let pipeline_info = pipeline::get_pipeline_info();
    println!("Abbreviation Expander v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", pipeline_info.summary());
    println!();
    println!("PIPELINE CAPABILITIES:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
    println!("    {}", logging::config::get_config_summary());
    println!();

    match pipeline::validate_pipeline() {
        Ok(()) => println!("Pipeline validation: ok"),
        Err(message) => {
            eprintln!("Pipeline validation failed: {}", message);
            std::process::exit(1);
        }
    }
}
