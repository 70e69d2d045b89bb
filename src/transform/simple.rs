//! Token-policy transformer.
//!
//! [`Simple`] detaches a method into its token, lets a [`TokenTransformer`]
//! produce a new token, and binds that token to the instrumented type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::description::{MethodDescription, MethodToken, TypeDescription};

use super::ModifierTransformation;

/// A transformer that rewrites a method through its token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Simple {
    transformer: TokenTransformer,
}

impl Simple {
    /// Wrap a token policy.
    #[must_use]
    pub fn new(transformer: TokenTransformer) -> Self {
        Self { transformer }
    }

    /// The wrapped token policy.
    #[must_use]
    pub fn transformer(&self) -> &TokenTransformer {
        &self.transformer
    }

    /// Snapshot `method`, apply the policy, bind the result to `instrumented_type`.
    #[must_use]
    pub fn transform(
        &self,
        instrumented_type: &TypeDescription,
        method: &MethodDescription,
    ) -> MethodDescription {
        let token = self.transformer.transform(method.as_token());
        MethodDescription::latent(instrumented_type.clone(), token)
    }
}

impl fmt::Display for Simple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Simple{{transformer={}}}", self.transformer)
    }
}

// ============================================================================
// Token policies
// ============================================================================

/// A policy turning one method token into another.
///
/// The returned token must be structurally valid on its own; policies are
/// free to change any field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenTransformer {
    /// Override modifier bits.
    ForModifierTransformation(ModifierTransformation),
    /// A named user-supplied function.
    Custom(CustomTokenTransformer),
}

impl TokenTransformer {
    /// Wrap a function as a named policy.
    #[must_use]
    pub fn custom<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(MethodToken) -> MethodToken + Send + Sync + 'static,
    {
        Self::Custom(CustomTokenTransformer::new(name, function))
    }

    /// Apply this policy.
    #[must_use]
    pub fn transform(&self, token: MethodToken) -> MethodToken {
        match self {
            Self::ForModifierTransformation(transformation) => transformation.transform(token),
            Self::Custom(custom) => custom.transform(token),
        }
    }
}

impl From<ModifierTransformation> for TokenTransformer {
    fn from(transformation: ModifierTransformation) -> Self {
        Self::ForModifierTransformation(transformation)
    }
}

impl From<CustomTokenTransformer> for TokenTransformer {
    fn from(custom: CustomTokenTransformer) -> Self {
        Self::Custom(custom)
    }
}

impl fmt::Display for TokenTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForModifierTransformation(transformation) => write!(f, "{transformation}"),
            Self::Custom(custom) => write!(f, "{custom}"),
        }
    }
}

type TokenFn = dyn Fn(MethodToken) -> MethodToken + Send + Sync;

/// A user-supplied token function.
///
/// Two instances are equal only when they share a name and the very same
/// function allocation; clones of one instance compare equal.
#[derive(Clone)]
pub struct CustomTokenTransformer {
    name: String,
    function: Arc<TokenFn>,
}

impl CustomTokenTransformer {
    /// Wrap `function` under `name`.
    #[must_use]
    pub fn new<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(MethodToken) -> MethodToken + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Arc::new(function),
        }
    }

    /// Name given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the function.
    #[must_use]
    pub fn transform(&self, token: MethodToken) -> MethodToken {
        (self.function)(token)
    }
}

impl fmt::Debug for CustomTokenTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomTokenTransformer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CustomTokenTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom{{name={}}}", self.name)
    }
}

impl PartialEq for CustomTokenTransformer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.function, &other.function)
    }
}

impl Eq for CustomTokenTransformer {}

impl Hash for CustomTokenTransformer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
