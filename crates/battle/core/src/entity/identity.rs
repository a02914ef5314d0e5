use core::fmt;
use core::hash::{Hash, Hasher};

/// Who an entity is.
///
/// Two identities are equal when `kind` and `variant` match; `name` is only a
/// display label, so "Goblin A" and "Goblin B" of the same variant compare
/// equal.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityIdentity {
    /// Broad family (e.g. "human", "goblin").
    pub kind: String,
    /// Specific type within the family (e.g. "knight", "shaman").
    pub variant: String,
    pub name: String,
}

impl EntityIdentity {
    pub fn new(
        kind: impl Into<String>,
        variant: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            variant: variant.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for EntityIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.variant == other.variant
    }
}

impl Eq for EntityIdentity {}

impl Hash for EntityIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.variant.hash(state);
    }
}

impl fmt::Display for EntityIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.kind, self.variant)
    }
}
