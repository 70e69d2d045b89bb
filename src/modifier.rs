//! Method modifier bits and the contributors that override them.
//!
//! A [`ModifierContributor`] governs one group of modifier bits: its
//! [`range`](ModifierContributor::range) names the bits of the group and its
//! [`mask`](ModifierContributor::mask) names the bits forced on within that
//! range. Applying a contributor clears the range, then sets the mask:
//!
//! ```text
//! modifiers = (modifiers & !range) | mask
//! ```
//!
//! Contributors of the same group share a range, so applying one replaces
//! whatever member of the group was set before.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

bitflags! {
    /// JVM method access flags.
    ///
    /// Bits without a named constant are retained as-is, so modifiers read
    /// from a class file survive a transformation that does not govern them.
    #[derive(
        Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct Modifiers: u16 {
        /// `ACC_PUBLIC`
        const PUBLIC       = 0x0001;
        /// `ACC_PRIVATE`
        const PRIVATE      = 0x0002;
        /// `ACC_PROTECTED`
        const PROTECTED    = 0x0004;
        /// `ACC_STATIC`
        const STATIC       = 0x0008;
        /// `ACC_FINAL`
        const FINAL        = 0x0010;
        /// `ACC_SYNCHRONIZED`
        const SYNCHRONIZED = 0x0020;
        /// `ACC_BRIDGE`
        const BRIDGE       = 0x0040;
        /// `ACC_VARARGS`
        const VARARGS      = 0x0080;
        /// `ACC_NATIVE`
        const NATIVE       = 0x0100;
        /// `ACC_ABSTRACT`
        const ABSTRACT     = 0x0400;
        /// `ACC_STRICT`
        const STRICT       = 0x0800;
        /// `ACC_SYNTHETIC`
        const SYNTHETIC    = 0x1000;
    }
}

impl Modifiers {
    /// Source-level keywords for the set bits, in declaration order.
    ///
    /// Flags that have no keyword (`bridge`, `varargs`, `synthetic`) are
    /// omitted.
    #[must_use]
    pub fn keywords(self) -> Vec<&'static str> {
        const KEYWORDS: [(Modifiers, &str); 9] = [
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::STATIC, "static"),
            (Modifiers::FINAL, "final"),
            (Modifiers::SYNCHRONIZED, "synchronized"),
            (Modifiers::NATIVE, "native"),
            (Modifiers::STRICT, "strictfp"),
        ];
        KEYWORDS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, keyword)| *keyword)
            .collect()
    }
}

// ============================================================================
// Contributor contract
// ============================================================================

/// A capability that governs a range of modifier bits.
pub trait ModifierContributor {
    /// All bits this contributor governs.
    fn range(&self) -> Modifiers;

    /// The bits this contributor forces on within its range.
    fn mask(&self) -> Modifiers;
}

impl<T: ModifierContributor + ?Sized> ModifierContributor for &T {
    fn range(&self) -> Modifiers {
        (**self).range()
    }

    fn mask(&self) -> Modifiers {
        (**self).mask()
    }
}

/// A captured range/mask pair.
///
/// This is the form in which a modifier override stores its contributors:
/// two rules are equal when their bits are equal, whatever type supplied them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifierRule {
    range: Modifiers,
    mask: Modifiers,
}

impl ModifierRule {
    /// Create a rule from raw bits.
    ///
    /// The pair is taken as given: a mask that reaches outside its range is
    /// still applied by [`apply`](Self::apply). Use
    /// [`is_confined`](Self::is_confined) to check for that case explicitly.
    #[must_use]
    pub const fn new(range: Modifiers, mask: Modifiers) -> Self {
        Self { range, mask }
    }

    /// Capture the current range and mask of a contributor.
    #[must_use]
    pub fn of<C: ModifierContributor + ?Sized>(contributor: &C) -> Self {
        Self::new(contributor.range(), contributor.mask())
    }

    /// Mask bits that lie outside the range.
    #[must_use]
    pub const fn stray_bits(self) -> Modifiers {
        self.mask.difference(self.range)
    }

    /// Whether the mask only sets bits the range also clears.
    #[must_use]
    pub const fn is_confined(self) -> bool {
        self.stray_bits().is_empty()
    }

    /// Clear this rule's range in `modifiers`, then set its mask.
    #[must_use]
    pub fn apply(self, modifiers: Modifiers) -> Modifiers {
        Modifiers::from_bits_retain((modifiers.bits() & !self.range.bits()) | self.mask.bits())
    }
}

impl ModifierContributor for ModifierRule {
    fn range(&self) -> Modifiers {
        self.range
    }

    fn mask(&self) -> Modifiers {
        self.mask
    }
}

impl fmt::Display for ModifierRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ModifierRule{{range={:#06x}, mask={:#06x}}}",
            self.range.bits(),
            self.mask.bits()
        )
    }
}

// ============================================================================
// Contributor groups
// ============================================================================

/// Method visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// No visibility keyword.
    PackagePrivate,
    /// `private`
    Private,
}

impl Visibility {
    const RANGE: Modifiers = Modifiers::PUBLIC
        .union(Modifiers::PROTECTED)
        .union(Modifiers::PRIVATE);
}

impl ModifierContributor for Visibility {
    fn range(&self) -> Modifiers {
        Self::RANGE
    }

    fn mask(&self) -> Modifiers {
        match self {
            Self::Public => Modifiers::PUBLIC,
            Self::Protected => Modifiers::PROTECTED,
            Self::PackagePrivate => Modifiers::empty(),
            Self::Private => Modifiers::PRIVATE,
        }
    }
}

/// Whether a method belongs to instances or to the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Instance method.
    Member,
    /// `static`
    Static,
}

impl ModifierContributor for Ownership {
    fn range(&self) -> Modifiers {
        Modifiers::STATIC
    }

    fn mask(&self) -> Modifiers {
        match self {
            Self::Member => Modifiers::empty(),
            Self::Static => Modifiers::STATIC,
        }
    }
}

/// How a method body is provided and whether it may be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodManifestation {
    /// Concrete, overridable method.
    Plain,
    /// `abstract`
    Abstract,
    /// `final`
    Final,
    /// `native`
    Native,
    /// `final native`
    FinalNative,
    /// Compiler-generated bridge.
    Bridge,
    /// Final compiler-generated bridge.
    FinalBridge,
}

impl MethodManifestation {
    const RANGE: Modifiers = Modifiers::ABSTRACT
        .union(Modifiers::FINAL)
        .union(Modifiers::NATIVE)
        .union(Modifiers::BRIDGE);
}

impl ModifierContributor for MethodManifestation {
    fn range(&self) -> Modifiers {
        Self::RANGE
    }

    fn mask(&self) -> Modifiers {
        match self {
            Self::Plain => Modifiers::empty(),
            Self::Abstract => Modifiers::ABSTRACT,
            Self::Final => Modifiers::FINAL,
            Self::Native => Modifiers::NATIVE,
            Self::FinalNative => Modifiers::FINAL.union(Modifiers::NATIVE),
            Self::Bridge => Modifiers::BRIDGE,
            Self::FinalBridge => Modifiers::FINAL.union(Modifiers::BRIDGE),
        }
    }
}

/// `synchronized` or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynchronizationState {
    /// Not synchronized.
    Plain,
    /// `synchronized`
    Synchronized,
}

impl ModifierContributor for SynchronizationState {
    fn range(&self) -> Modifiers {
        Modifiers::SYNCHRONIZED
    }

    fn mask(&self) -> Modifiers {
        match self {
            Self::Plain => Modifiers::empty(),
            Self::Synchronized => Modifiers::SYNCHRONIZED,
        }
    }
}

/// Whether a method is marked as compiler-generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntheticState {
    /// Present in source.
    Plain,
    /// `ACC_SYNTHETIC`
    Synthetic,
}

impl ModifierContributor for SyntheticState {
    fn range(&self) -> Modifiers {
        Modifiers::SYNTHETIC
    }

    fn mask(&self) -> Modifiers {
        match self {
            Self::Plain => Modifiers::empty(),
            Self::Synthetic => Modifiers::SYNTHETIC,
        }
    }
}

/// `strictfp` or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodStrictness {
    /// Default floating point semantics.
    Plain,
    /// `strictfp`
    Strict,
}

impl ModifierContributor for MethodStrictness {
    fn range(&self) -> Modifiers {
        Modifiers::STRICT
    }

    fn mask(&self) -> Modifiers {
        match self {
            Self::Plain => Modifiers::empty(),
            Self::Strict => Modifiers::STRICT,
        }
    }
}

/// Fixed arity or varargs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodArguments {
    /// Fixed number of arguments.
    Plain,
    /// Last parameter is a varargs array.
    Varargs,
}

impl ModifierContributor for MethodArguments {
    fn range(&self) -> Modifiers {
        Modifiers::VARARGS
    }

    fn mask(&self) -> Modifiers {
        match self {
            Self::Plain => Modifiers::empty(),
            Self::Varargs => Modifiers::VARARGS,
        }
    }
}

// ============================================================================
// Named contributors (configuration surface)
// ============================================================================

/// A contributor addressed by name, as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModifierName {
    /// [`Visibility::Public`]
    Public,
    /// [`Visibility::Protected`]
    Protected,
    /// [`Visibility::PackagePrivate`]
    PackagePrivate,
    /// [`Visibility::Private`]
    Private,
    /// [`Ownership::Member`]
    Member,
    /// [`Ownership::Static`]
    Static,
    /// [`MethodManifestation::Plain`]
    Concrete,
    /// [`MethodManifestation::Abstract`]
    Abstract,
    /// [`MethodManifestation::Final`]
    Final,
    /// [`MethodManifestation::Native`]
    Native,
    /// [`MethodManifestation::FinalNative`]
    FinalNative,
    /// [`MethodManifestation::Bridge`]
    Bridge,
    /// [`MethodManifestation::FinalBridge`]
    FinalBridge,
    /// [`SynchronizationState::Synchronized`]
    Synchronized,
    /// [`SynchronizationState::Plain`]
    NotSynchronized,
    /// [`SyntheticState::Synthetic`]
    Synthetic,
    /// [`SyntheticState::Plain`]
    NotSynthetic,
    /// [`MethodStrictness::Strict`]
    Strict,
    /// [`MethodStrictness::Plain`]
    NotStrict,
    /// [`MethodArguments::Varargs`]
    Varargs,
    /// [`MethodArguments::Plain`]
    FixedArity,
}

impl ModifierName {
    /// Every named contributor.
    pub const ALL: [Self; 21] = [
        Self::Public,
        Self::Protected,
        Self::PackagePrivate,
        Self::Private,
        Self::Member,
        Self::Static,
        Self::Concrete,
        Self::Abstract,
        Self::Final,
        Self::Native,
        Self::FinalNative,
        Self::Bridge,
        Self::FinalBridge,
        Self::Synchronized,
        Self::NotSynchronized,
        Self::Synthetic,
        Self::NotSynthetic,
        Self::Strict,
        Self::NotStrict,
        Self::Varargs,
        Self::FixedArity,
    ];

    /// The configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::PackagePrivate => "package-private",
            Self::Private => "private",
            Self::Member => "member",
            Self::Static => "static",
            Self::Concrete => "concrete",
            Self::Abstract => "abstract",
            Self::Final => "final",
            Self::Native => "native",
            Self::FinalNative => "final-native",
            Self::Bridge => "bridge",
            Self::FinalBridge => "final-bridge",
            Self::Synchronized => "synchronized",
            Self::NotSynchronized => "not-synchronized",
            Self::Synthetic => "synthetic",
            Self::NotSynthetic => "not-synthetic",
            Self::Strict => "strict",
            Self::NotStrict => "not-strict",
            Self::Varargs => "varargs",
            Self::FixedArity => "fixed-arity",
        }
    }

    fn rule(self) -> ModifierRule {
        match self {
            Self::Public => ModifierRule::of(&Visibility::Public),
            Self::Protected => ModifierRule::of(&Visibility::Protected),
            Self::PackagePrivate => ModifierRule::of(&Visibility::PackagePrivate),
            Self::Private => ModifierRule::of(&Visibility::Private),
            Self::Member => ModifierRule::of(&Ownership::Member),
            Self::Static => ModifierRule::of(&Ownership::Static),
            Self::Concrete => ModifierRule::of(&MethodManifestation::Plain),
            Self::Abstract => ModifierRule::of(&MethodManifestation::Abstract),
            Self::Final => ModifierRule::of(&MethodManifestation::Final),
            Self::Native => ModifierRule::of(&MethodManifestation::Native),
            Self::FinalNative => ModifierRule::of(&MethodManifestation::FinalNative),
            Self::Bridge => ModifierRule::of(&MethodManifestation::Bridge),
            Self::FinalBridge => ModifierRule::of(&MethodManifestation::FinalBridge),
            Self::Synchronized => ModifierRule::of(&SynchronizationState::Synchronized),
            Self::NotSynchronized => ModifierRule::of(&SynchronizationState::Plain),
            Self::Synthetic => ModifierRule::of(&SyntheticState::Synthetic),
            Self::NotSynthetic => ModifierRule::of(&SyntheticState::Plain),
            Self::Strict => ModifierRule::of(&MethodStrictness::Strict),
            Self::NotStrict => ModifierRule::of(&MethodStrictness::Plain),
            Self::Varargs => ModifierRule::of(&MethodArguments::Varargs),
            Self::FixedArity => ModifierRule::of(&MethodArguments::Plain),
        }
    }
}

impl ModifierContributor for ModifierName {
    fn range(&self) -> Modifiers {
        self.rule().range
    }

    fn mask(&self) -> Modifiers {
        self.rule().mask
    }
}

impl fmt::Display for ModifierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModifierName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::invalid_argument(format!("unknown modifier: {wanted}")))
    }
}

// ============================================================================
// Tests
// ============================================================================
