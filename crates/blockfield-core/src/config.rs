//! Scene configuration and `key=value` overrides.
//!
//! Both frontends start from [`SceneConfig::default`] and layer overrides on
//! top: the web build reads them from the page query string, the native build
//! from command-line arguments.

use crate::constants::{DEFAULT_BLOCK_COUNT, DEFAULT_CLUSTER_RADIUS, DEFAULT_PARTICLE_COUNT};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown config key `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("cluster radius must be finite and non-negative, got {0}")]
    ClusterRadius(f32),
    #[error("expected `key=value`, got `{0}`")]
    Malformed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub block_count: usize,
    pub particle_count: usize,
    pub cluster_radius: f32,
    /// Fixed seed for reproducible scenes; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            block_count: DEFAULT_BLOCK_COUNT,
            particle_count: DEFAULT_PARTICLE_COUNT,
            cluster_radius: DEFAULT_CLUSTER_RADIUS,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cluster_radius.is_finite() || self.cluster_radius < 0.0 {
            return Err(ConfigError::ClusterRadius(self.cluster_radius));
        }
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "blocks" => self.block_count = value.parse().map_err(|_| invalid())?,
            "particles" => self.particle_count = value.parse().map_err(|_| invalid())?,
            "radius" => self.cluster_radius = value.parse().map_err(|_| invalid())?,
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Apply a sequence of overrides, then validate. On error `self` is left
    /// untouched.
    pub fn apply_overrides<'a, I>(&mut self, pairs: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut next = self.clone();
        for (key, value) in pairs {
            next.set(key.trim(), value.trim())?;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Parse `blocks=150&seed=7` style text (a leading `?` is ignored).
    pub fn apply_query(&mut self, query: &str) -> Result<(), ConfigError> {
        let pairs = query
            .trim_start_matches('?')
            .split('&')
            .filter(|s| !s.is_empty())
            .map(split_pair)
            .collect::<Result<Vec<_>, _>>()?;
        self.apply_overrides(pairs)
    }

    /// Parse one `key=value` token per argument.
    pub fn apply_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<(), ConfigError> {
        let pairs = args
            .iter()
            .map(|a| split_pair(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.apply_overrides(pairs)
    }
}

fn split_pair(token: &str) -> Result<(&str, &str), ConfigError> {
    token
        .split_once('=')
        .ok_or_else(|| ConfigError::Malformed(token.to_string()))
}
