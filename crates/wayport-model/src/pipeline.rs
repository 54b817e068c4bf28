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

//! # Preprocessing Pipeline Configurations
//!
//! A dataset passes through four offline stages before it can serve queries:
//! **extract** turns raw map data into a routing graph, **partition** and
//! **customize** prepare it for `MLD`, and **contract** prepares it for `CH`.
//! Each stage is configured by one struct in this module.
//!
//! Numeric inputs follow the same convention as query overrides: a value that
//! is not strictly positive selects the stage default. Thread counts resolve
//! to the host's available parallelism in that case.

use serde::Serialize;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// A resolved worker-thread count.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct Threads(NonZeroUsize);

impl Threads {
    /// Resolves a requested thread count.
    ///
    /// A positive request is kept; anything else becomes the host's
    /// available parallelism, or `1` if that cannot be determined.
    pub fn resolve(requested: i64) -> Self {
        match usize::try_from(requested).ok().and_then(NonZeroUsize::new) {
            Some(n) => Self(n),
            None => Self::available(),
        }
    }

    /// Returns the host's available parallelism.
    pub fn available() -> Self {
        let n = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
        Self(n)
    }

    #[inline]
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for Threads {
    fn default() -> Self {
        Self::available()
    }
}

impl std::fmt::Display for Threads {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

/// Configuration of the extraction stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtractConfig {
    pub input_path: PathBuf,
    pub profile_path: PathBuf,
    pub threads: Threads,
    pub parse_conditionals: bool,
    pub use_metadata: bool,
    pub use_locations_cache: bool,
    pub dump_nbg_graph: bool,
    pub small_component_size: u32,
}

impl ExtractConfig {
    pub const DEFAULT_SMALL_COMPONENT_SIZE: u32 = 1000;

    /// Creates an extraction config with default flags.
    pub fn new<P, Q>(input_path: P, profile_path: Q, threads: i64) -> Self
    where
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        Self {
            input_path: input_path.into(),
            profile_path: profile_path.into(),
            threads: Threads::resolve(threads),
            parse_conditionals: false,
            use_metadata: false,
            use_locations_cache: true,
            dump_nbg_graph: false,
            small_component_size: Self::DEFAULT_SMALL_COMPONENT_SIZE,
        }
    }

    /// Sets the small component size; a non-positive value keeps the default.
    pub fn with_small_component_size(mut self, size: i64) -> Self {
        self.small_component_size =
            positive_u32(size).unwrap_or(Self::DEFAULT_SMALL_COMPONENT_SIZE);
        self
    }
}

/// Configuration of the partitioning stage.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PartitionConfig {
    pub base_path: PathBuf,
    pub threads: Threads,
    pub balance: f64,
    pub boundary_factor: f64,
    pub num_optimizing_cuts: u32,
    pub small_component_size: u32,
    pub max_cell_sizes: Vec<u32>,
}

impl PartitionConfig {
    pub const DEFAULT_BALANCE: f64 = 1.2;
    pub const DEFAULT_BOUNDARY_FACTOR: f64 = 0.25;
    pub const DEFAULT_NUM_OPTIMIZING_CUTS: u32 = 10;
    pub const DEFAULT_SMALL_COMPONENT_SIZE: u32 = 1000;
    pub const DEFAULT_MAX_CELL_SIZES: [u32; 4] = [128, 4096, 65536, 2097152];

    /// Creates a partition config with every tuning knob at its default.
    pub fn new<P>(base_path: P, threads: i64) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            base_path: base_path.into(),
            threads: Threads::resolve(threads),
            balance: Self::DEFAULT_BALANCE,
            boundary_factor: Self::DEFAULT_BOUNDARY_FACTOR,
            num_optimizing_cuts: Self::DEFAULT_NUM_OPTIMIZING_CUTS,
            small_component_size: Self::DEFAULT_SMALL_COMPONENT_SIZE,
            max_cell_sizes: Self::DEFAULT_MAX_CELL_SIZES.to_vec(),
        }
    }

    /// Overrides the tuning knobs. Non-positive values keep their default.
    ///
    /// `max_cell_sizes` is taken as a whole: if it is empty or any entry is
    /// not strictly positive, the default level sizes are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wayport_model::pipeline::PartitionConfig;
    /// let config = PartitionConfig::new("map.osrm", 1).with_tuning(0.0, 0.5, -1, 0, &[64, 0]);
    /// assert_eq!(config.balance, 1.2);
    /// assert_eq!(config.boundary_factor, 0.5);
    /// assert_eq!(config.num_optimizing_cuts, 10);
    /// assert_eq!(config.max_cell_sizes, vec![128, 4096, 65536, 2097152]);
    /// ```
    pub fn with_tuning(
        mut self,
        balance: f64,
        boundary_factor: f64,
        num_optimizing_cuts: i64,
        small_component_size: i64,
        max_cell_sizes: &[i64],
    ) -> Self {
        self.balance = positive_or(balance, Self::DEFAULT_BALANCE);
        self.boundary_factor = positive_or(boundary_factor, Self::DEFAULT_BOUNDARY_FACTOR);
        self.num_optimizing_cuts = positive_u32(num_optimizing_cuts)
            .unwrap_or(Self::DEFAULT_NUM_OPTIMIZING_CUTS);
        self.small_component_size = positive_u32(small_component_size)
            .unwrap_or(Self::DEFAULT_SMALL_COMPONENT_SIZE);

        let sizes: Option<Vec<u32>> = max_cell_sizes.iter().map(|s| positive_u32(*s)).collect();
        self.max_cell_sizes = match sizes {
            Some(sizes) if !sizes.is_empty() => sizes,
            _ => Self::DEFAULT_MAX_CELL_SIZES.to_vec(),
        };
        self
    }
}

fn positive_u32(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}

/// Configuration of the customization stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomizeConfig {
    pub base_path: PathBuf,
    pub threads: Threads,
}

impl CustomizeConfig {
    pub fn new<P>(base_path: P, threads: i64) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            base_path: base_path.into(),
            threads: Threads::resolve(threads),
        }
    }
}

/// Configuration of the contraction stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContractConfig {
    pub base_path: PathBuf,
    pub threads: Threads,
}

impl ContractConfig {
    pub fn new<P>(base_path: P, threads: i64) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            base_path: base_path.into(),
            threads: Threads::resolve(threads),
        }
    }
}

/// A request to run one preprocessing stage.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageRequest {
    Extract(ExtractConfig),
    Partition(PartitionConfig),
    Customize(CustomizeConfig),
    Contract(ContractConfig),
}

impl StageRequest {
    /// Returns the stage name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Extract(_) => "extract",
            Self::Partition(_) => "partition",
            Self::Customize(_) => "customize",
            Self::Contract(_) => "contract",
        }
    }

    /// Returns the effective thread count of the stage.
    pub fn threads(&self) -> Threads {
        match self {
            Self::Extract(c) => c.threads,
            Self::Partition(c) => c.threads,
            Self::Customize(c) => c.threads,
            Self::Contract(c) => c.threads,
        }
    }
}
