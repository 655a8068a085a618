use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of a single infected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fate {
    /// The phage lyses the host.
    Lytic,
    /// The phage integrates and the cell becomes a lysogen.
    Lysogenic,
}

impl Fate {
    /// Numeric code used in serialized output (0 = lytic, 1 = lysogenic).
    pub const fn code(self) -> u8 {
        match self {
            Fate::Lytic => 0,
            Fate::Lysogenic => 1,
        }
    }

    /// Inverse of [`Fate::code`].
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Fate::Lytic),
            1 => Some(Fate::Lysogenic),
            _ => None,
        }
    }

    /// Maps a boolean lysogeny decision onto a fate.
    pub const fn from_lysogeny(lysogenic: bool) -> Self {
        if lysogenic {
            Fate::Lysogenic
        } else {
            Fate::Lytic
        }
    }

    /// Returns true for [`Fate::Lysogenic`].
    pub const fn is_lysogenic(self) -> bool {
        matches!(self, Fate::Lysogenic)
    }
}

impl fmt::Display for Fate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fate::Lytic => write!(f, "lytic"),
            Fate::Lysogenic => write!(f, "lysogenic"),
        }
    }
}

impl Serialize for Fate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Fate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Fate::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid fate code {code}")))
    }
}
