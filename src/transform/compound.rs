//! Sequential composition of transformers.

use std::fmt;

use crate::description::{MethodDescription, TypeDescription};

use super::MethodTransformer;

/// Applies transformers in a row, feeding each one the previous output.
///
/// An empty compound returns its input. Order is part of identity: the same
/// transformers in a different order make an unequal compound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Compound {
    transformers: Vec<MethodTransformer>,
}

impl Compound {
    /// Create a compound from transformers in their application order.
    #[must_use]
    pub fn new(transformers: Vec<MethodTransformer>) -> Self {
        Self { transformers }
    }

    /// Transformers in application order.
    #[must_use]
    pub fn transformers(&self) -> &[MethodTransformer] {
        &self.transformers
    }

    /// Number of chained transformers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    /// Returns `true` if nothing is chained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Fold every transformer over `method`, left to right.
    #[must_use]
    pub fn transform(
        &self,
        instrumented_type: &TypeDescription,
        method: &MethodDescription,
    ) -> MethodDescription {
        self.transformers
            .iter()
            .fold(method.clone(), |current, transformer| {
                transformer.transform(instrumented_type, &current)
            })
    }
}

impl From<Vec<MethodTransformer>> for Compound {
    fn from(transformers: Vec<MethodTransformer>) -> Self {
        Self::new(transformers)
    }
}

impl FromIterator<MethodTransformer> for Compound {
    fn from_iter<I: IntoIterator<Item = MethodTransformer>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Compound[")?;
        for (i, transformer) in self.transformers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{transformer}")?;
        }
        f.write_str("]")
    }
}
