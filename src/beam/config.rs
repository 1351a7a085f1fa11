//! Beam search configuration.

use crate::error::{Result, SearchError};

/// Configuration for beam search.
///
/// # Examples
///
/// ```
/// use u_heuristic::beam::BeamConfig;
///
/// let config = BeamConfig::default().with_beam_width(5);
/// assert_eq!(config.beam_width, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeamConfig {
    /// Maximum number of partial sequences kept between stages.
    pub beam_width: usize,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self { beam_width: 3 }
    }
}

impl BeamConfig {
    pub fn with_beam_width(mut self, width: usize) -> Self {
        self.beam_width = width;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.beam_width == 0 {
            return Err(SearchError::InvalidConfig(
                "beam_width must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
