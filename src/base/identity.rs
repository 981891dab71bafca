//! Assembly identity and its normalized comparison key.

use std::fmt;

use smol_str::SmolStr;

/// A four-part assembly version (`major.minor.build.revision`).
///
/// Compared exactly: `1.0.0.0` and `1.0.0.1` are different assemblies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub revision: u16,
}

impl Version {
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Identity of an assembly as reported by the type system.
///
/// `culture` is empty for culture-neutral assemblies and `public_key_token`
/// is empty for unsigned ones. The token is kept as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssemblyIdentity {
    pub name: SmolStr,
    pub version: Version,
    pub culture: SmolStr,
    pub public_key_token: SmolStr,
}

impl AssemblyIdentity {
    /// Create an identity for a culture-neutral, unsigned assembly.
    pub fn new(name: impl Into<SmolStr>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            culture: SmolStr::default(),
            public_key_token: SmolStr::default(),
        }
    }

    /// Set the culture (empty means neutral).
    pub fn with_culture(mut self, culture: impl Into<SmolStr>) -> Self {
        self.culture = culture.into();
        self
    }

    /// Set the public key token from raw bytes, encoded as lowercase hex.
    pub fn with_token_bytes(mut self, token: &[u8]) -> Self {
        self.public_key_token = SmolStr::new(hex::encode(token));
        self
    }

    /// Set the public key token from an already hex-encoded string.
    pub fn with_token(mut self, token: &str) -> Self {
        self.public_key_token = SmolStr::new(token.to_ascii_lowercase());
        self
    }

    /// The normalized key used for caching and identity comparison.
    pub fn key(&self) -> AssemblyKey {
        AssemblyKey::from(self)
    }

    /// Whether two identities denote the same assembly.
    pub fn same_assembly(&self, other: &AssemblyIdentity) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let culture = if self.culture.is_empty() {
            "neutral"
        } else {
            self.culture.as_str()
        };
        let token = if self.public_key_token.is_empty() {
            "null"
        } else {
            self.public_key_token.as_str()
        };
        write!(
            f,
            "{}, Version={}, Culture={}, PublicKeyToken={}",
            self.name, self.version, culture, token
        )
    }
}

/// Case-folded assembly identity.
///
/// Name, culture and token compare case-insensitively; the version exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyKey {
    name: SmolStr,
    version: Version,
    culture: SmolStr,
    public_key_token: SmolStr,
}

impl From<&AssemblyIdentity> for AssemblyKey {
    fn from(identity: &AssemblyIdentity) -> Self {
        Self {
            name: fold(&identity.name),
            version: identity.version,
            culture: fold(&identity.culture),
            public_key_token: fold(&identity.public_key_token),
        }
    }
}

fn fold(s: &str) -> SmolStr {
    SmolStr::new(s.to_lowercase())
}
