//! Method transformers applied before a method is defined on an instrumented type.
//!
//! A transformer substitutes a method description by another one. It is the
//! transformer's own responsibility that the substitute stays compatible with
//! the original; nothing here checks signatures.
//!
//! ```text
//! MethodDescription
//!       │
//!       ▼
//! ┌───────────────────┐
//! │ MethodTransformer │──▶ NoOp | Simple(token policy) | Compound([..])
//! └───────────────────┘
//!       │
//!       ▼
//! MethodDescription (bound to the instrumented type)
//! ```
//!
//! Transformers are plain immutable values: build them once, share them
//! across threads, call [`MethodTransformer::transform`] as often as needed.
//! Equality and hashing are structural, and the order of any wrapped list is
//! part of a transformer's identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::description::{MethodDescription, TypeDescription};
use crate::modifier::{ModifierContributor, ModifierName};
use crate::{Error, Result};

pub mod compound;
pub mod modifiers;
pub mod simple;

pub use compound::Compound;
pub use modifiers::ModifierTransformation;
pub use simple::{CustomTokenTransformer, Simple, TokenTransformer};

// ============================================================================
// Configuration types (deserialized from YAML)
// ============================================================================

/// Declarative form of a [`MethodTransformer`].
///
/// Variants are written as single-key maps, the way configuration files
/// declare them. Parsing them with `serde_yaml` directly needs
/// `serde_yaml::with::singleton_map_recursive`, since its own enum form
/// uses YAML tags (`!chain`).
///
/// ```yaml
/// transformer:
///   chain:
///     - override: [public, final]
///     - noop
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformerConfig {
    /// Leave methods unchanged.
    #[default]
    Noop,
    /// Override modifiers with the named contributors, in order.
    Override(Vec<ModifierName>),
    /// Apply nested transformers in order.
    Chain(Vec<TransformerConfig>),
}

// ============================================================================
// Transformer
// ============================================================================

/// A method transformer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum MethodTransformer {
    /// Returns every method unchanged.
    #[default]
    NoOp,
    /// Transforms the method's token with a policy and rebinds the result.
    Simple(Simple),
    /// Applies several transformers in a row.
    Compound(Compound),
}

impl MethodTransformer {
    /// Transform `method` for definition on `instrumented_type`.
    ///
    /// The input is never modified; a new description is returned.
    #[must_use]
    pub fn transform(
        &self,
        instrumented_type: &TypeDescription,
        method: &MethodDescription,
    ) -> MethodDescription {
        match self {
            Self::NoOp => method.clone(),
            Self::Simple(simple) => simple.transform(instrumented_type, method),
            Self::Compound(compound) => compound.transform(instrumented_type, method),
        }
    }

    /// Transform every method in `methods`, preserving order.
    #[must_use]
    pub fn transform_all(
        &self,
        instrumented_type: &TypeDescription,
        methods: &[MethodDescription],
    ) -> Vec<MethodDescription> {
        methods
            .iter()
            .map(|method| self.transform(instrumented_type, method))
            .collect()
    }

    /// Wrap a token policy.
    #[must_use]
    pub fn simple(transformer: impl Into<TokenTransformer>) -> Self {
        Self::Simple(Simple::new(transformer.into()))
    }

    /// Chain transformers in their application order.
    #[must_use]
    pub fn compound(transformers: impl IntoIterator<Item = MethodTransformer>) -> Self {
        Self::Compound(transformers.into_iter().collect())
    }

    /// A transformer enforcing the given modifier contributors.
    ///
    /// Each contributor's range is cleared and its mask applied, in the order
    /// supplied, so later contributors win on overlapping bits. Range and
    /// mask are captured as given, even where the mask reaches outside the
    /// range.
    #[must_use]
    pub fn override_with<I>(contributors: I) -> Self
    where
        I: IntoIterator,
        I::Item: ModifierContributor,
    {
        let transformation = ModifierTransformation::from_contributors(contributors);
        debug!(rules = transformation.rules().len(), "Built modifier override");
        Self::simple(transformation)
    }

    /// Like [`override_with`](Self::override_with), for sequences that may
    /// contain absent entries. Any absent entry rejects the whole sequence.
    pub fn override_with_optional<I, C>(contributors: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<C>>,
        C: ModifierContributor,
    {
        let contributors = contributors
            .into_iter()
            .enumerate()
            .map(|(index, contributor)| {
                contributor.ok_or_else(|| {
                    Error::invalid_argument(format!("modifier contributor #{index} is missing"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::override_with(contributors))
    }

    /// Chain `next` after this transformer.
    #[must_use]
    pub fn and_then(self, next: MethodTransformer) -> Self {
        Self::compound([self, next])
    }

    /// Returns `true` if this transformer is guaranteed to return its input.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        match self {
            Self::NoOp => true,
            Self::Simple(_) => false,
            Self::Compound(compound) => compound.transformers().iter().all(Self::is_noop),
        }
    }

    /// Build a transformer from its declarative form.
    pub fn compile(config: &TransformerConfig) -> Result<Self> {
        let transformer = match config {
            TransformerConfig::Noop => Self::NoOp,
            TransformerConfig::Override(names) => Self::override_with(names),
            TransformerConfig::Chain(children) => Self::Compound(
                children
                    .iter()
                    .map(Self::compile)
                    .collect::<Result<Compound>>()?,
            ),
        };
        debug!(transformer = %transformer, "Compiled method transformer");
        Ok(transformer)
    }
}

impl From<Simple> for MethodTransformer {
    fn from(simple: Simple) -> Self {
        Self::Simple(simple)
    }
}

impl From<Compound> for MethodTransformer {
    fn from(compound: Compound) -> Self {
        Self::Compound(compound)
    }
}

impl fmt::Display for MethodTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOp => f.write_str("MethodTransformer::NoOp"),
            Self::Simple(simple) => write!(f, "MethodTransformer::{simple}"),
            Self::Compound(compound) => write!(f, "MethodTransformer::{compound}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
