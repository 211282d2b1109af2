//! Registration configuration.

use serde::{Deserialize, Serialize};

/// Tuning parameters for registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Minimum number of beacons two scanners must share before their
    /// frames can be related.
    /// Default: 12 (standard 3D configuration)
    #[serde(default = "defaults::min_shared_beacons")]
    pub min_shared_beacons: usize,

    /// Minimum number of corroborating votes the winning pose hypothesis
    /// must collect. Empirically chosen alongside the overlap requirement
    /// rather than derived from a formal bound.
    /// Default: 6
    #[serde(default = "defaults::min_corroborating_votes")]
    pub min_corroborating_votes: u32,
}

mod defaults {
    pub fn min_shared_beacons() -> usize {
        12
    }

    pub fn min_corroborating_votes() -> u32 {
        6
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            min_shared_beacons: defaults::min_shared_beacons(),
            min_corroborating_votes: defaults::min_corroborating_votes(),
        }
    }
}

impl RegistrationConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduced configuration for small 2D inputs: 3 shared beacons.
    pub fn reduced_2d() -> Self {
        Self::default().with_min_shared_beacons(3)
    }

    /// Builder-style setter for the shared-beacon requirement.
    pub fn with_min_shared_beacons(mut self, count: usize) -> Self {
        self.min_shared_beacons = count;
        self
    }

    /// Builder-style setter for the vote requirement.
    pub fn with_min_corroborating_votes(mut self, votes: u32) -> Self {
        self.min_corroborating_votes = votes;
        self
    }

    /// Coarse overlap gate: k shared beacons imply C(k, 2) shared
    /// beacon pairs, so a scanner pair whose profile intersection falls
    /// below this cannot meet the shared-beacon requirement.
    pub fn pair_overlap_threshold(&self) -> u32 {
        let k = self.min_shared_beacons as u32;
        k * k.saturating_sub(1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistrationConfig::default();
        assert_eq!(config.min_shared_beacons, 12);
        assert_eq!(config.min_corroborating_votes, 6);
        assert_eq!(config.pair_overlap_threshold(), 66);
    }

    #[test]
    fn test_reduced_2d_threshold() {
        assert_eq!(RegistrationConfig::reduced_2d().pair_overlap_threshold(), 3);
    }

    #[test]
    fn test_builders() {
        let config = RegistrationConfig::new()
            .with_min_shared_beacons(4)
            .with_min_corroborating_votes(2);
        assert_eq!(config.min_shared_beacons, 4);
        assert_eq!(config.min_corroborating_votes, 2);
        assert_eq!(config.pair_overlap_threshold(), 6);
    }

    #[test]
    fn test_degenerate_threshold() {
        let config = RegistrationConfig::new().with_min_shared_beacons(0);
        assert_eq!(config.pair_overlap_threshold(), 0);
    }
}
