//! Method and type descriptions consumed by the transformers.
//!
//! A [`MethodDescription`] is a method bound to its declaring type. Its
//! [`MethodToken`] is the same method detached from any type. Binding a token
//! to an owner with [`MethodDescription::latent`] yields a description again,
//! which is the only round-trip the transformers rely on.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::modifier::Modifiers;

// ============================================================================
// Types
// ============================================================================

/// A type referenced by its binary name, e.g. `java.lang.String` or `int`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDescription(String);

impl TypeDescription {
    /// Create a type description from its binary name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `void` pseudo-type.
    #[must_use]
    pub fn void() -> Self {
        Self::new("void")
    }

    /// Binary name of this type.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the `void` pseudo-type.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.0 == "void"
    }
}

impl fmt::Display for TypeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeDescription {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeDescription {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// ============================================================================
// Token parts
// ============================================================================

/// A declared type variable with its upper bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeVariableToken {
    /// Variable name, e.g. `T`.
    pub symbol: String,
    /// Upper bounds; empty means `java.lang.Object`.
    #[serde(default)]
    pub bounds: Vec<TypeDescription>,
}

/// A constant annotation property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    /// `boolean`
    Bool(bool),
    /// Any integral primitive.
    Integer(i64),
    /// `String`, enum constant or class literal in source form.
    String(String),
    /// Array value.
    List(Vec<AnnotationValue>),
}

/// An annotation with its explicitly set properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationDescription {
    /// Annotation interface.
    #[serde(rename = "type")]
    pub annotation_type: TypeDescription,
    /// Property values by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl AnnotationDescription {
    /// An annotation without properties.
    #[must_use]
    pub fn marker(annotation_type: impl Into<TypeDescription>) -> Self {
        Self {
            annotation_type: annotation_type.into(),
            values: BTreeMap::new(),
        }
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterToken {
    /// Parameter type.
    #[serde(rename = "type")]
    pub ty: TypeDescription,
    /// Name, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Parameter modifiers (`final`, `synthetic`, ...).
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Annotations on this parameter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationDescription>,
}

impl ParameterToken {
    /// An unnamed, unannotated parameter.
    #[must_use]
    pub fn of(ty: impl Into<TypeDescription>) -> Self {
        Self {
            ty: ty.into(),
            name: None,
            modifiers: Modifiers::empty(),
            annotations: Vec::new(),
        }
    }

    /// Attach a parameter name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

// ============================================================================
// Method token
// ============================================================================

/// Structural snapshot of a method, detached from its declaring type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodToken {
    name: String,
    #[serde(default)]
    modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    type_variables: Vec<TypeVariableToken>,
    return_type: TypeDescription,
    #[serde(default)]
    parameters: Vec<ParameterToken>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    exception_types: Vec<TypeDescription>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<AnnotationDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<AnnotationValue>,
}

impl MethodToken {
    /// Create a token from its full field set.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        modifiers: Modifiers,
        type_variables: Vec<TypeVariableToken>,
        return_type: TypeDescription,
        parameters: Vec<ParameterToken>,
        exception_types: Vec<TypeDescription>,
        annotations: Vec<AnnotationDescription>,
        default_value: Option<AnnotationValue>,
    ) -> Self {
        Self {
            name: name.into(),
            modifiers,
            type_variables,
            return_type,
            parameters,
            exception_types,
            annotations,
            default_value,
        }
    }

    /// A method without modifiers, parameters, or annotations.
    #[must_use]
    pub fn named(name: impl Into<String>, return_type: impl Into<TypeDescription>) -> Self {
        Self::new(
            name,
            Modifiers::empty(),
            Vec::new(),
            return_type.into(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            None,
        )
    }

    /// Internal method name (`<init>` for constructors).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access flags.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Declared type variables.
    #[must_use]
    pub fn type_variables(&self) -> &[TypeVariableToken] {
        &self.type_variables
    }

    /// Return type.
    #[must_use]
    pub fn return_type(&self) -> &TypeDescription {
        &self.return_type
    }

    /// Parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterToken] {
        &self.parameters
    }

    /// Declared exception types.
    #[must_use]
    pub fn exception_types(&self) -> &[TypeDescription] {
        &self.exception_types
    }

    /// Method annotations.
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationDescription] {
        &self.annotations
    }

    /// Annotation default value, for annotation interface methods.
    #[must_use]
    pub fn default_value(&self) -> Option<&AnnotationValue> {
        self.default_value.as_ref()
    }

    /// The same token with different access flags.
    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    /// The same token with another parameter appended.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterToken) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// The same token with another declared exception appended.
    #[must_use]
    pub fn with_exception(mut self, exception: impl Into<TypeDescription>) -> Self {
        self.exception_types.push(exception.into());
        self
    }

    /// The same token with another annotation appended.
    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationDescription) -> Self {
        self.annotations.push(annotation);
        self
    }
}

// ============================================================================
// Method description
// ============================================================================

/// A method bound to its declaring type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescription {
    declaring_type: TypeDescription,
    #[serde(flatten)]
    token: MethodToken,
}

impl MethodDescription {
    /// Bind a token to `declaring_type`.
    #[must_use]
    pub fn latent(declaring_type: TypeDescription, token: MethodToken) -> Self {
        Self {
            declaring_type,
            token,
        }
    }

    /// Detach this method from its declaring type.
    #[must_use]
    pub fn as_token(&self) -> MethodToken {
        self.token.clone()
    }

    /// The type declaring this method.
    #[must_use]
    pub fn declaring_type(&self) -> &TypeDescription {
        &self.declaring_type
    }

    /// Internal method name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.token.name()
    }

    /// Access flags.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.token.modifiers()
    }

    /// Return type.
    #[must_use]
    pub fn return_type(&self) -> &TypeDescription {
        self.token.return_type()
    }

    /// Parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterToken] {
        self.token.parameters()
    }

    /// Returns `true` for instance initializers.
    ///
    /// An `<init>` method that does not return `void` is not a valid
    /// initializer and is treated as an ordinary method.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.token.name() == "<init>" && self.return_type().is_void()
    }
}

impl fmt::Display for MethodDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for keyword in self.modifiers().keywords() {
            write!(f, "{keyword} ")?;
        }
        if !self.is_constructor() {
            write!(f, "{} ", self.return_type())?;
        }
        write!(f, "{}.{}(", self.declaring_type, self.name())?;
        for (i, parameter) in self.parameters().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", parameter.ty)?;
        }
        f.write_str(")")?;
        let exceptions = self.token.exception_types();
        if !exceptions.is_empty() {
            f.write_str(" throws ")?;
            for (i, exception) in exceptions.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{exception}")?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Parse a YAML (or JSON) sequence of method tokens.
pub fn parse_tokens(source: &str) -> Result<Vec<MethodToken>> {
    Ok(serde_yaml::from_str(source)?)
}

/// Read a YAML (or JSON) sequence of method tokens from a file.
pub fn load_tokens(path: &Path) -> Result<Vec<MethodToken>> {
    let source = std::fs::read_to_string(path)?;
    parse_tokens(&source)
}

// ============================================================================
// Tests
// ============================================================================
