use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// The role a principal acts under.
///
/// Every principal has exactly one role. Synthesized guests always act as
/// [`Role::Guest`]; persisted accounts carry their role in the user record.
/// Extending the enumeration is a code change and a redeploy, like any other
/// policy-table mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative role.
    Admin,
    /// An authenticated, persisted account.
    User,
    /// A synthesized, ephemeral visitor.
    Guest,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Guest => "guest",
        };
        write!(f, "{name}")
    }
}
