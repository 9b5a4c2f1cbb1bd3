//! Bit-flag codecs for packed Adabas settings.
//!
//! # Design
//! - Each domain owns a static `(bit index, name)` table and a scan width.
//!   Only bits below the scan width are ever reported, even when the table
//!   names higher bits.
//! - Decoding is total: text that does not parse as a signed 64-bit decimal
//!   counts as zero and yields an empty list.
//! - Set bits without a name are rendered as `XXXXX-<index>` so nothing the
//!   server reports is silently dropped.

use std::fmt::{self, Display, Formatter};

/// Prefix used for set bits that have no symbolic name.
pub const UNNAMED_BIT_PREFIX: &str = "XXXXX-";

const DATABASE_OPTIONS: &[(u32, &str)] = &[
    (0, "TRUNCATION"),
    (1, "UTILITIES_ONLY"),
    (2, "LOCAL_UTILITIES"),
    (3, "OPEN_REQUIRED"),
    (4, "FAULT_TOLERANT_AR"),
    (5, "AUTORESTART_ONLY"),
    (6, "READ_ONLY"),
    (7, "XA"),
    (8, "AUTO_EXPAND"),
    (9, "DEACTIVATE"),
];

const USER_EXITS: &[(u32, &str)] = &[(0, "1"), (1, "2"), (3, "4"), (10, "11"), (13, "14")];

const LOGGING: &[(u32, &str)] = &[
    (0, "CB"),
    (1, "FB"),
    (2, "IB"),
    (3, "IO"),
    (4, "RB"),
    (5, "SB"),
    (6, "VB"),
    (7, "OFF"),
    (8, "BD"),
    (9, "ENABLED"),
    (10, "AR"),
];

/// Packed integer settings that decode into symbolic flag lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagDomain {
    /// Database OPTIONS (`TRUNCATION`, `READ_ONLY`, ...).
    DatabaseOptions,
    /// Enabled user exits, reported by exit number.
    UserExits,
    /// Command logging buffers (`CB`, `FB`, ...).
    Logging,
}

impl FlagDomain {
    /// Every domain, in a stable order.
    pub const ALL: [Self; 3] = [Self::DatabaseOptions, Self::UserExits, Self::Logging];

    /// Number of low-order bits inspected when decoding.
    #[must_use]
    pub const fn scan_width(self) -> u32 {
        match self {
            Self::DatabaseOptions => 10,
            Self::UserExits => 14,
            Self::Logging => 9,
        }
    }

    /// Static `(bit index, name)` table for the domain.
    #[must_use]
    pub const fn table(self) -> &'static [(u32, &'static str)] {
        match self {
            Self::DatabaseOptions => DATABASE_OPTIONS,
            Self::UserExits => USER_EXITS,
            Self::Logging => LOGGING,
        }
    }

    /// Parameter acronym the server uses for this domain.
    #[must_use]
    pub const fn acronym(self) -> &'static str {
        match self {
            Self::DatabaseOptions => "OPTIONS",
            Self::UserExits => "USEREXITS",
            Self::Logging => "LOGGING",
        }
    }

    /// Resolve a parameter acronym to its domain.
    #[must_use]
    pub fn from_acronym(acronym: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.acronym().eq_ignore_ascii_case(acronym))
    }

    /// Symbolic name of a bit, if the table defines one.
    #[must_use]
    pub fn name_of(self, bit: u32) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(index, _)| *index == bit)
            .map(|(_, name)| *name)
    }

    /// Decode a packed value received as text.
    #[must_use]
    pub fn decode(self, raw: &str) -> String {
        self.decode_value(parse_packed(raw))
    }

    /// Decode a packed value into a comma-separated list in ascending bit order.
    #[must_use]
    pub fn decode_value(self, value: u64) -> String {
        (0..self.scan_width())
            .filter(|bit| value & (1_u64 << bit) != 0)
            .map(|bit| {
                self.name_of(bit)
                    .map_or_else(|| format!("{UNNAMED_BIT_PREFIX}{bit}"), str::to_string)
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Display for FlagDomain {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.acronym())
    }
}

/// Classify an AR (auto-restart conflict) setting.
#[must_use]
pub fn decode_auto_restart(raw: &str) -> &'static str {
    if raw == "1" { "CONTINUE" } else { "ABORT" }
}

// Negative values are scanned by their two's-complement bit pattern.
fn parse_packed(raw: &str) -> u64 {
    raw.parse::<i64>().map_or(0, i64::cast_unsigned)
}
