//! Monte Carlo simulation configuration.
//!
//! Path count and step count are the only levers for bounding run time;
//! the batch count fixes how paths are partitioned into independent
//! random streams and therefore stays constant across thread pools.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Maximum number of independent batches.
pub const MAX_BATCHES: usize = 4_096;

/// Default number of batches.
pub const DEFAULT_BATCHES: usize = 16;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 252);
/// assert_eq!(config.n_batches(), 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    n_paths: usize,
    n_steps: usize,
    n_batches: usize,
    seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    /// 10,000 paths of 252 daily steps, 16 batches, entropy seed.
    fn default() -> Self {
        Self {
            n_paths: 10_000,
            n_steps: 252,
            n_batches: DEFAULT_BATCHES,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the number of independent random streams.
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.n_batches
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Copy of this configuration with a fixed seed.
    #[inline]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `n_steps` is 0 or greater than 10,000
    /// - `n_batches` is 0 or greater than 4,096
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        if self.n_batches == 0 || self.n_batches > MAX_BATCHES {
            return Err(ConfigError::InvalidBatchCount(self.n_batches));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Provides a fluent API for constructing Monte Carlo configurations
/// with validation at build time.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    n_batches: Option<usize>,
    seed: Option<u64>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path, in [1, 10_000].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the number of batches, in [1, 4_096].
    #[inline]
    pub fn n_batches(mut self, n_batches: usize) -> Self {
        self.n_batches = Some(n_batches);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` not set or invalid
    /// - `n_steps` not set or invalid
    /// - `n_batches` invalid
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let n_steps = self.n_steps.ok_or(ConfigError::InvalidParameter {
            name: "n_steps",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_paths,
            n_steps,
            n_batches: self.n_batches.unwrap_or(DEFAULT_BATCHES),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
