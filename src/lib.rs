//! Method transformers for dynamic bytecode generation
//!
//! Before a method is written to a generated class it can be substituted by
//! another description: same method with different modifiers, or anything a
//! custom token policy produces.
//!
//! # Features
//!
//! - **`NoOp`**: leaves methods untouched
//! - **Simple**: rewrites a method through its token with a pluggable policy
//! - **Modifier override**: clears and sets modifier bit ranges in order
//! - **Compound**: chains transformers, output feeding input
//! - **Configuration**: transformers declared in YAML and compiled at startup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod description;
pub mod error;
pub mod modifier;
pub mod transform;

pub use description::{MethodDescription, MethodToken, TypeDescription};
pub use error::{Error, Result};
pub use modifier::{ModifierContributor, ModifierName, ModifierRule, Modifiers};
pub use transform::{
    Compound, CustomTokenTransformer, MethodTransformer, ModifierTransformation, Simple,
    TokenTransformer, TransformerConfig,
};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
///
/// Logs go to stderr so that command output on stdout stays machine-readable.
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
