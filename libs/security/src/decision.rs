use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tri-state outcome of access resolution for one `(caller, entity type)`
/// pair.
///
/// Call sites must match exhaustively. There is deliberately no "empty set"
/// ambiguity: an empty id collection normalizes to
/// [`AccessDecision::Blocked`] at construction, so "requested but empty" can
/// never be mistaken for "no restriction requested".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ids", rename_all = "snake_case")]
pub enum AccessDecision {
    /// No filtering: the caller sees everything.
    Unrestricted,
    /// The caller sees nothing.
    Blocked,
    /// The caller sees exactly this id set (non-empty, sorted, deduplicated).
    RestrictedTo(Vec<Uuid>),
}

impl AccessDecision {
    /// Build a restriction from an arbitrary id collection.
    ///
    /// Ids are sorted and deduplicated; an empty collection yields
    /// [`AccessDecision::Blocked`].
    #[must_use]
    pub fn restricted_to<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = Uuid>,
    {
        let mut ids: Vec<Uuid> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            Self::Blocked
        } else {
            Self::RestrictedTo(ids)
        }
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Whether the decision lets `id` through.
    #[must_use]
    pub fn allows(&self, id: Uuid) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Blocked => false,
            Self::RestrictedTo(ids) => ids.binary_search(&id).is_ok(),
        }
    }

    /// Accessible ids, if the decision is a restriction.
    #[must_use]
    pub fn ids(&self) -> Option<&[Uuid]> {
        match self {
            Self::RestrictedTo(ids) => Some(ids),
            Self::Unrestricted | Self::Blocked => None,
        }
    }
}
