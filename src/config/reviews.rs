//! Review lifecycle configuration

use serde::Deserialize;

use crate::application::handlers::review::ReviewPolicy;

/// How rating recomputes behave after review writes
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewsConfig {
    /// Run recomputes for the same song one at a time
    #[serde(default = "default_serialize_recompute")]
    pub serialize_recompute: bool,

    /// Undo the review write when its recompute fails
    #[serde(default)]
    pub rollback_on_recompute_failure: bool,
}

impl ReviewsConfig {
    pub fn policy(&self) -> ReviewPolicy {
        ReviewPolicy {
            rollback_on_recompute_failure: self.rollback_on_recompute_failure,
        }
    }
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            serialize_recompute: default_serialize_recompute(),
            rollback_on_recompute_failure: false,
        }
    }
}

fn default_serialize_recompute() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serialize_without_rollback() {
        let config = ReviewsConfig::default();
        assert!(config.serialize_recompute);
        assert!(!config.policy().rollback_on_recompute_failure);
    }
}
