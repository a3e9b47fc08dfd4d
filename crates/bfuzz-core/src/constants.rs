//! Protocol constants and configuration profiles.

use std::fmt;
use std::str::FromStr;

/// Length of an Ed25519 public key in bytes.
pub const PUBKEY_BYTES: usize = 32;

/// Length of an Ed25519 signature in bytes.
pub const SIGNATURE_BYTES: usize = 64;

/// Upper bound on any encoded record accepted by the codec (4 MiB).
///
/// Keeps a hostile length prefix from forcing a large allocation.
pub const MAX_ENCODED_BYTES: usize = 4 * 1024 * 1024;

/// Epoch value meaning "never" for activation and exit epochs.
pub const FAR_FUTURE_EPOCH: u64 = u64::MAX;

/// Named rule profile a validator runs under.
///
/// # Examples
///
/// ```
/// use bfuzz_core::constants::SpecProfile;
/// let profile = SpecProfile::default();
/// assert_eq!(profile, SpecProfile::Mainnet);
/// assert_eq!(profile.chain_spec().slots_per_epoch, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpecProfile {
    /// Production-equivalent ruleset.
    #[default]
    Mainnet,
    /// Small epochs for local testing.
    Minimal,
}

impl SpecProfile {
    /// Resolve the profile into its constant set.
    pub fn chain_spec(&self) -> ChainSpec {
        match self {
            Self::Mainnet => ChainSpec {
                profile: *self,
                slots_per_epoch: 32,
                domain_beacon_proposer: [0x00, 0x00, 0x00, 0x00],
                max_effective_balance: 32_000_000_000,
            },
            Self::Minimal => ChainSpec {
                profile: *self,
                slots_per_epoch: 8,
                domain_beacon_proposer: [0x00, 0x00, 0x00, 0x00],
                max_effective_balance: 32_000_000_000,
            },
        }
    }

    /// Lowercase profile name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Minimal => "minimal",
        }
    }
}

impl fmt::Display for SpecProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!("unknown profile: {other}")),
        }
    }
}

/// Constants a state transition is evaluated under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpec {
    /// Profile these constants came from.
    pub profile: SpecProfile,
    /// Slots per epoch. Zero is a configuration bug.
    pub slots_per_epoch: u64,
    /// Domain type mixed into proposer signing roots.
    pub domain_beacon_proposer: [u8; 4],
    /// Effective balance assigned to fixture validators, in gwei.
    pub max_effective_balance: u64,
}

impl Default for ChainSpec {
    fn default() -> Self {
        SpecProfile::default().chain_spec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_differ_in_epoch_length() {
        assert_eq!(SpecProfile::Mainnet.chain_spec().slots_per_epoch, 32);
        assert_eq!(SpecProfile::Minimal.chain_spec().slots_per_epoch, 8);
    }

    #[test]
    fn chain_spec_records_its_profile() {
        assert_eq!(SpecProfile::Minimal.chain_spec().profile, SpecProfile::Minimal);
        assert_eq!(ChainSpec::default().profile, SpecProfile::Mainnet);
    }

    #[test]
    fn profile_parses_case_insensitively() {
        assert_eq!("MAINNET".parse::<SpecProfile>(), Ok(SpecProfile::Mainnet));
        assert_eq!("minimal".parse::<SpecProfile>(), Ok(SpecProfile::Minimal));
        assert!("devnet".parse::<SpecProfile>().is_err());
    }

    #[test]
    fn profile_display_round_trips() {
        for p in [SpecProfile::Mainnet, SpecProfile::Minimal] {
            assert_eq!(p.to_string().parse::<SpecProfile>(), Ok(p));
        }
    }
}
