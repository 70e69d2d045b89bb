//! method-transform - apply method transformers to method tokens
//!
//! Reads method tokens, binds them to an instrumented type, and prints the
//! transformed descriptions.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use method_transform::{
    MethodDescription, TypeDescription,
    cli::{Cli, Command},
    config::{Config, OutputFormat},
    description::load_tokens,
    setup_tracing,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup tracing
    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref()) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Apply {
            owner,
            input,
            format,
        } => run_apply(&config, &owner, &input, format),
        Command::Show => run_show(&config),
        Command::Check => run_check(&config),
    }
}

/// Transform every token in `input` for definition on `owner`
fn run_apply(config: &Config, owner: &str, input: &Path, format: Option<OutputFormat>) -> ExitCode {
    let transformer = match config.compile_transformer() {
        Ok(transformer) => transformer,
        Err(e) => {
            eprintln!("❌ Invalid transformer: {e}");
            return ExitCode::FAILURE;
        }
    };

    let tokens = match load_tokens(input) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {e}", input.display());
            return ExitCode::FAILURE;
        }
    };

    let owner = TypeDescription::new(owner);
    let methods: Vec<MethodDescription> = tokens
        .into_iter()
        .map(|token| MethodDescription::latent(owner.clone(), token))
        .collect();
    info!(
        methods = methods.len(),
        owner = %owner,
        "Transforming methods"
    );

    let transformed = transformer.transform_all(&owner, &methods);

    let format = format.unwrap_or(config.output.format);
    match format.render(&transformed, config.output.pretty) {
        Ok(rendered) => {
            println!("{}", rendered.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Failed to render output: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Print the compiled transformer
fn run_show(config: &Config) -> ExitCode {
    match config.compile_transformer() {
        Ok(transformer) => {
            println!("{transformer}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Invalid transformer: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Validate the configuration
fn run_check(config: &Config) -> ExitCode {
    match config.compile_transformer() {
        Ok(transformer) if transformer.is_noop() => {
            println!("✅ Configuration valid (transformer leaves methods unchanged)");
            ExitCode::SUCCESS
        }
        Ok(_) => {
            println!("✅ Configuration valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Validation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
