use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// How much a role may do with a feature.
///
/// Levels are not totally ordered: `Own` is incomparable with `Read` and
/// `CreateEdit` in general (an owner may edit *their* resources while a
/// `CreateEdit` holder may edit *any*), but both `CreateEdit` and `Full`
/// subsume an `Own` requirement. The [`AccessLevel::satisfies`] relation
/// encodes the comparisons the decision engine relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// No access at all. The default for every unlisted (role, feature) pair.
    None,
    /// Read-only access to the feature.
    Read,
    /// Access limited to resources the principal owns.
    Own,
    /// Create and edit any resource of the feature.
    CreateEdit,
    /// Unrestricted access, including administrative operations.
    Full,
}

impl AccessLevel {
    /// Whether a grant of `self` satisfies a route's `required` level.
    ///
    /// `Full` satisfies everything. `CreateEdit` satisfies `CreateEdit`,
    /// `Read`, and `Own` (broad grants subsume ownership without a resource
    /// check). `Read` satisfies only `Read`. An exact `Own` grant never
    /// satisfies a requirement through this relation alone: it additionally
    /// needs the resource-ownership proof performed by the decision engine.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        match required {
            Self::None => true,
            Self::Read => matches!(self, Self::Read | Self::CreateEdit | Self::Full),
            Self::Own | Self::CreateEdit => matches!(self, Self::CreateEdit | Self::Full),
            Self::Full => self == Self::Full,
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Read => "read",
            Self::Own => "own",
            Self::CreateEdit => "create_edit",
            Self::Full => "full",
        };
        write!(f, "{name}")
    }
}
