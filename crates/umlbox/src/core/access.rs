//! Member visibility

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DiagramError;

/// Raw access and property flags as stored in class files and
/// in [`ClassDescriptor`](crate::backends::structural::ClassDescriptor) modifiers.
pub mod access_flags {
    pub const PUBLIC: u16 = 0x0001;
    pub const PRIVATE: u16 = 0x0002;
    pub const PROTECTED: u16 = 0x0004;
    pub const STATIC: u16 = 0x0008;
    pub const FINAL: u16 = 0x0010;
    pub const INTERFACE: u16 = 0x0200;
    pub const ABSTRACT: u16 = 0x0400;
    pub const SYNTHETIC: u16 = 0x1000;
    pub const ENUM: u16 = 0x4000;
}

/// Visibility of a class member.
///
/// Declaration order is the rank used as the last tie-break when
/// ordering methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Public,
    Protected,
    PackagePrivate,
    Private,
}

impl Access {
    /// Every visibility, in rank order
    pub const ALL: [Access; 4] = [
        Access::Public,
        Access::Protected,
        Access::PackagePrivate,
        Access::Private,
    ];

    /// Derive visibility from raw modifier bits.
    ///
    /// Public is checked first, then protected, then private; anything
    /// else is package-private.
    pub fn from_modifiers(flags: u16) -> Self {
        if flags & access_flags::PUBLIC != 0 {
            Access::Public
        } else if flags & access_flags::PROTECTED != 0 {
            Access::Protected
        } else if flags & access_flags::PRIVATE != 0 {
            Access::Private
        } else {
            Access::PackagePrivate
        }
    }

    /// The UML glyph
    pub fn glyph(self) -> char {
        match self {
            Access::Public => '+',
            Access::Protected => '#',
            Access::PackagePrivate => '~',
            Access::Private => '-',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Protected => "protected",
            Access::PackagePrivate => "package",
            Access::Private => "private",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl FromStr for Access {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Access::Public),
            "protected" => Ok(Access::Protected),
            "package" | "package_private" | "package-private" => Ok(Access::PackagePrivate),
            "private" => Ok(Access::Private),
            other => Err(DiagramError::invalid_config(format!(
                "unknown access `{}`, expected one of: public, protected, package, private, all",
                other
            ))),
        }
    }
}

/// The set of visibilities that make it into a diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySet(BTreeSet<Access>);

impl VisibilitySet {
    pub fn new(levels: impl IntoIterator<Item = Access>) -> Self {
        Self(levels.into_iter().collect())
    }

    pub fn all() -> Self {
        Self::new(Access::ALL)
    }

    pub fn contains(&self, access: Access) -> bool {
        self.0.contains(&access)
    }

    pub fn insert(&mut self, access: Access) {
        self.0.insert(access);
    }

    pub fn union(&self, other: &VisibilitySet) -> Self {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = Access> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for VisibilitySet {
    fn default() -> Self {
        Self::new([Access::Public])
    }
}

/// `all`, or a comma separated list such as `protected,package`.
impl FromStr for VisibilitySet {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Access::from_str)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }
}
