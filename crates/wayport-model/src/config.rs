// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Engine Configuration
//!
//! `EngineConfig` describes how a routing engine instance is brought up: which
//! search algorithm it uses, where its dataset lives, which optional datasets
//! to skip loading, and which per-operation limits to enforce.
//!
//! A configuration is assembled with `EngineConfigBuilder` and is immutable
//! afterwards. `EngineConfig::validate` checks the parts that can be checked
//! without the engine: a usable storage location and sane limits. Everything
//! else (dataset format, algorithm support) is left to the engine.
//!
//! ## Defaults
//!
//! | Field               | Default                         |
//! | :------------------ | :------------------------------ |
//! | `algorithm`         | `Algorithm::Ch`                 |
//! | `storage`           | shared memory, default dataset  |
//! | `disabled_features` | none                            |
//! | `limits`            | all `None` (engine defaults)    |

use crate::options::option_set;
use serde::{ser::SerializeSeq, Serialize, Serializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

option_set! {
    /// The search algorithm the dataset was prepared for.
    ///
    /// An absent selector keeps the engine default `Ch`; a selector that is
    /// not recognized selects `Mld`.
    pub enum Algorithm {
        /// Contraction hierarchies.
        Ch => "CH",
        /// Multi-level Dijkstra.
        Mld => "MLD",
    }
    default = Ch;
    fallback = Mld;
}

/// Where the engine reads its dataset from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StorageMode {
    /// Attach to a dataset previously loaded into shared memory.
    SharedMemory { dataset_name: Option<String> },
    /// Load the dataset from files next to `base_path`.
    Files {
        base_path: PathBuf,
        memory_mapped: bool,
    },
}

impl Default for StorageMode {
    fn default() -> Self {
        Self::SharedMemory { dataset_name: None }
    }
}

/// Optional datasets the engine may skip loading.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct FeatureDatasets(u32);

impl FeatureDatasets {
    pub const NONE: Self = Self(0);
    pub const ROUTE_STEPS: Self = Self(1);
    pub const ROUTE_GEOMETRY: Self = Self(2);

    const NAMED: [(&'static str, Self); 2] = [
        ("ROUTE_STEPS", Self::ROUTE_STEPS),
        ("ROUTE_GEOMETRY", Self::ROUTE_GEOMETRY),
    ];

    /// Creates a set from a raw bitfield. Unknown bits are dropped.
    #[inline]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & (Self::ROUTE_STEPS.0 | Self::ROUTE_GEOMETRY.0))
    }

    /// Creates a set from dataset names. Unknown names are ignored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| {
                Self::NAMED
                    .iter()
                    .find(|(n, _)| *n == name.as_ref())
                    .map(|(_, set)| *set)
            })
            .fold(Self::NONE, |acc, set| Self(acc.0 | set.0))
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        Self::NAMED
            .iter()
            .filter(|(_, set)| self.contains(*set))
            .map(|(name, _)| *name)
    }
}

impl Serialize for FeatureDatasets {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        for name in self.names() {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

/// Per-operation ceilings. `None` keeps the engine's built-in default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EngineLimits {
    pub max_locations_trip: Option<u32>,
    pub max_locations_viaroute: Option<u32>,
    pub max_locations_distance_table: Option<u32>,
    pub max_locations_map_matching: Option<u32>,
    pub max_radius_map_matching: Option<f64>,
    pub max_results_nearest: Option<u32>,
    pub max_alternatives: Option<u32>,
    pub default_radius: Option<f64>,
}

impl EngineLimits {
    fn entries(&self) -> [(&'static str, Option<f64>); 8] {
        let count = |v: Option<u32>| v.map(f64::from);
        [
            ("max_locations_trip", count(self.max_locations_trip)),
            ("max_locations_viaroute", count(self.max_locations_viaroute)),
            (
                "max_locations_distance_table",
                count(self.max_locations_distance_table),
            ),
            (
                "max_locations_map_matching",
                count(self.max_locations_map_matching),
            ),
            ("max_radius_map_matching", self.max_radius_map_matching),
            ("max_results_nearest", count(self.max_results_nearest)),
            ("max_alternatives", count(self.max_alternatives)),
            ("default_radius", self.default_radius),
        ]
    }
}

/// The error type for configuration validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("dataset base path is empty")]
    EmptyBasePath,
    #[error("dataset directory `{}` does not exist", .0.display())]
    MissingDirectory(PathBuf),
    #[error("shared memory dataset name is empty")]
    EmptyDatasetName,
    #[error("limit `{name}` must be finite and strictly positive, got {value}")]
    InvalidLimit { name: &'static str, value: f64 },
}

/// A complete, immutable engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EngineConfig {
    algorithm: Algorithm,
    storage: StorageMode,
    disabled_features: FeatureDatasets,
    limits: EngineLimits,
}

impl EngineConfig {
    /// Creates a file-backed configuration with a single table limit.
    ///
    /// Mirrors the three-argument constructor hosts used before the full
    /// configuration record existed: no memory mapping, no shared memory.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wayport_model::config::{Algorithm, EngineConfig};
    /// let config = EngineConfig::legacy("/data/berlin.osrm", Algorithm::Mld, Some(100));
    /// assert_eq!(config.algorithm(), Algorithm::Mld);
    /// assert_eq!(config.limits().max_locations_distance_table, Some(100));
    /// assert_eq!(config.limits().max_locations_trip, None);
    /// ```
    pub fn legacy<P>(base_path: P, algorithm: Algorithm, max_table_size: Option<u32>) -> Self
    where
        P: Into<PathBuf>,
    {
        let mut builder = EngineConfigBuilder::new();
        builder
            .set_algorithm(algorithm)
            .set_files(base_path, false)
            .set_limits(EngineLimits {
                max_locations_distance_table: max_table_size,
                ..EngineLimits::default()
            });
        builder.build()
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn storage(&self) -> &StorageMode {
        &self.storage
    }

    #[inline]
    pub fn disabled_features(&self) -> FeatureDatasets {
        self.disabled_features
    }

    #[inline]
    pub fn limits(&self) -> &EngineLimits {
        &self.limits
    }

    /// Returns the dataset base path, if the configuration is file-backed.
    pub fn base_path(&self) -> Option<&Path> {
        match &self.storage {
            StorageMode::Files { base_path, .. } => Some(base_path.as_path()),
            StorageMode::SharedMemory { .. } => None,
        }
    }

    /// Checks the configuration for problems detectable without an engine.
    ///
    /// # Errors
    ///
    /// * `EmptyBasePath` if file storage has no path.
    /// * `MissingDirectory` if the directory holding the dataset does not exist.
    /// * `EmptyDatasetName` if a shared-memory dataset name is given but empty.
    /// * `InvalidLimit` if a limit is present but zero, negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.storage {
            StorageMode::Files { base_path, .. } => {
                if base_path.as_os_str().is_empty() {
                    return Err(ConfigError::EmptyBasePath);
                }
                if let Some(dir) = base_path.parent() {
                    if !dir.as_os_str().is_empty() && !dir.is_dir() {
                        return Err(ConfigError::MissingDirectory(dir.to_path_buf()));
                    }
                }
            }
            StorageMode::SharedMemory { dataset_name } => {
                if dataset_name.as_deref() == Some("") {
                    return Err(ConfigError::EmptyDatasetName);
                }
            }
        }

        for (name, value) in self.limits.entries() {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::InvalidLimit { name, value });
                }
            }
        }

        Ok(())
    }
}

/// Mutable builder for `EngineConfig`.
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> &mut Self {
        self.config.algorithm = algorithm;
        self
    }

    /// Selects shared-memory storage.
    pub fn set_shared_memory(&mut self, dataset_name: Option<String>) -> &mut Self {
        self.config.storage = StorageMode::SharedMemory { dataset_name };
        self
    }

    /// Selects file storage rooted at `base_path`.
    pub fn set_files<P>(&mut self, base_path: P, memory_mapped: bool) -> &mut Self
    where
        P: Into<PathBuf>,
    {
        self.config.storage = StorageMode::Files {
            base_path: base_path.into(),
            memory_mapped,
        };
        self
    }

    pub fn set_disabled_features(&mut self, features: FeatureDatasets) -> &mut Self {
        self.config.disabled_features = features;
        self
    }

    pub fn set_limits(&mut self, limits: EngineLimits) -> &mut Self {
        self.config.limits = limits;
        self
    }

    /// Returns the limits for in-place editing.
    pub fn limits_mut(&mut self) -> &mut EngineLimits {
        &mut self.config.limits
    }

    /// Finalizes the configuration without validating it.
    pub fn build(self) -> EngineConfig {
        self.config
    }

    /// Finalizes and validates the configuration.
    pub fn try_build(self) -> Result<EngineConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionToken;

    #[test]
    fn test_algorithm_resolution() {
        assert_eq!(Algorithm::resolve(Some("CH")), Algorithm::Ch);
        assert_eq!(Algorithm::resolve(Some("MLD")), Algorithm::Mld);
        assert_eq!(Algorithm::resolve(Some("ch")), Algorithm::Mld);
        assert_eq!(Algorithm::resolve(Some("CoreCH")), Algorithm::Mld);
        assert_eq!(Algorithm::resolve(None), Algorithm::Ch);
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.algorithm(), Algorithm::Ch);
        assert_eq!(
            config.storage(),
            &StorageMode::SharedMemory { dataset_name: None }
        );
        assert!(config.disabled_features().is_empty());
        assert_eq!(config.limits(), &EngineLimits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_feature_datasets() {
        assert_eq!(
            FeatureDatasets::from_bits_truncate(0b111),
            FeatureDatasets::from_names(["ROUTE_STEPS", "ROUTE_GEOMETRY"])
        );
        assert_eq!(
            FeatureDatasets::from_names(["route_steps", "ROUTE_STEPS"]),
            FeatureDatasets::ROUTE_STEPS
        );
        let names: Vec<_> = FeatureDatasets::from_bits_truncate(2).names().collect();
        assert_eq!(names, vec!["ROUTE_GEOMETRY"]);
    }

    #[test]
    fn test_validate_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = EngineConfigBuilder::new();
        builder.set_files(dir.path().join("map.osrm"), true);
        let config = builder.try_build().unwrap();
        assert_eq!(config.base_path(), Some(dir.path().join("map.osrm").as_path()));
    }

    #[test]
    fn test_validate_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let config = EngineConfig::legacy(missing.join("map.osrm"), Algorithm::Ch, None);
        assert_eq!(config.validate(), Err(ConfigError::MissingDirectory(missing)));
    }

    #[test]
    fn test_validate_relative_file_name() {
        let config = EngineConfig::legacy("map.osrm", Algorithm::Ch, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_path_and_name() {
        let config = EngineConfig::legacy("", Algorithm::Ch, None);
        assert_eq!(config.validate(), Err(ConfigError::EmptyBasePath));

        let mut builder = EngineConfigBuilder::new();
        builder.set_shared_memory(Some(String::new()));
        assert_eq!(builder.try_build(), Err(ConfigError::EmptyDatasetName));
    }

    #[test]
    fn test_validate_limits() {
        let mut builder = EngineConfigBuilder::new();
        builder.limits_mut().max_alternatives = Some(0);
        assert!(matches!(
            builder.clone().try_build(),
            Err(ConfigError::InvalidLimit {
                name: "max_alternatives",
                ..
            })
        ));

        builder.limits_mut().max_alternatives = Some(3);
        builder.limits_mut().default_radius = Some(f64::INFINITY);
        assert!(matches!(
            builder.try_build(),
            Err(ConfigError::InvalidLimit {
                name: "default_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::MissingDirectory(PathBuf::from("/no/such"));
        assert_eq!(err.to_string(), "dataset directory `/no/such` does not exist");
    }
}
