//! User roles.
//!
//! Role names are stored verbatim in user documents and asserted by clients
//! through the `X-User-Role` header (or a verified token claim).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five platform roles, highest privilege first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    SuperAdmin,
    Admin,
    Product,
    Developer,
    Ops,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SuperAdmin",
            Self::Admin => "Admin",
            Self::Product => "Product",
            Self::Developer => "Developer",
            Self::Ops => "Ops",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SuperAdmin" => Ok(Self::SuperAdmin),
            "Admin" => Ok(Self::Admin),
            "Product" => Ok(Self::Product),
            "Developer" => Ok(Self::Developer),
            "Ops" => Ok(Self::Ops),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for role in [
            Role::SuperAdmin,
            Role::Admin,
            Role::Product,
            Role::Developer,
            Role::Ops,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_rejected() {
        assert!("Wizard".parse::<Role>().is_err());
    }
}
