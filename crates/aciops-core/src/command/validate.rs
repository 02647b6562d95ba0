// ── Typed mutation arguments ──
//
// Free-form user input is parsed into these types before a `Command`
// can be built, so a bad token fails before anything reaches the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::error::CoreError;

/// One flag of a subnet's advertisement scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ScopeFlag {
    Private,
    Public,
    Shared,
}

/// A validated, comma-separated subnet scope such as `public,shared`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutingScope(Vec<ScopeFlag>);

impl RoutingScope {
    pub fn flags(&self) -> &[ScopeFlag] {
        &self.0
    }
}

impl FromStr for RoutingScope {
    type Err = CoreError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        input
            .split(',')
            .map(|token| {
                token.parse::<ScopeFlag>().map_err(|_| CoreError::InvalidScope {
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for RoutingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(AsRef::as_ref).collect();
        f.write_str(&joined.join(","))
    }
}

/// A yes/no switch as the controller spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Yes,
    No,
}

impl Toggle {
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        input.parse().map_err(|_| CoreError::InvalidToggle {
            token: input.to_owned(),
        })
    }
}

impl From<bool> for Toggle {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Yes } else { Self::No }
    }
}
