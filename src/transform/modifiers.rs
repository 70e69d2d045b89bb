//! Modifier override policy.

use std::fmt;

use crate::description::MethodToken;
use crate::modifier::{ModifierContributor, ModifierRule, Modifiers};

/// Token policy that overrides modifier bits and nothing else.
///
/// Rules apply in order: each clears its range and sets its mask, so a later
/// rule wins over an earlier one on any bit both govern. Two transformations
/// are equal only if their rules are equal in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModifierTransformation {
    rules: Vec<ModifierRule>,
}

impl ModifierTransformation {
    /// Create a transformation from already captured rules.
    #[must_use]
    pub fn new(rules: Vec<ModifierRule>) -> Self {
        Self { rules }
    }

    /// Capture the range and mask of each contributor, in order.
    #[must_use]
    pub fn from_contributors<I>(contributors: I) -> Self
    where
        I: IntoIterator,
        I::Item: ModifierContributor,
    {
        let rules = contributors
            .into_iter()
            .map(|contributor| ModifierRule::of(&contributor))
            .collect();
        Self { rules }
    }

    /// Rules in application order.
    #[must_use]
    pub fn rules(&self) -> &[ModifierRule] {
        &self.rules
    }

    /// Fold every rule over `modifiers`.
    #[must_use]
    pub fn resolve(&self, modifiers: Modifiers) -> Modifiers {
        self.rules
            .iter()
            .fold(modifiers, |modifiers, rule| rule.apply(modifiers))
    }

    /// Replace the token's modifiers with the resolved ones.
    #[must_use]
    pub fn transform(&self, token: MethodToken) -> MethodToken {
        let modifiers = self.resolve(token.modifiers());
        token.with_modifiers(modifiers)
    }
}

impl fmt::Display for ModifierTransformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ForModifierTransformation[")?;
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{rule}")?;
        }
        f.write_str("]")
    }
}
