//! Cluster configuration
//!
//! # Examples
//!
//! ```
//! use qdsp::cluster::ClusterConfig;
//!
//! // Eight compute elements, the usual cluster size
//! let default = ClusterConfig::default();
//! assert_eq!(default.num_cores, 8);
//!
//! // Custom configuration using builder pattern
//! let custom = ClusterConfig::new()
//!     .with_num_cores(4)
//!     .with_cluster_id(1)
//!     .with_thread_name_prefix("dsp");
//! assert_eq!(custom.num_cores, 4);
//! ```

/// Shape of a compute cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Number of compute elements (always at least 1)
    pub num_cores: usize,
    /// Identifier reported in [`ExecutionContext::Cluster`](super::ExecutionContext)
    pub cluster_id: u32,
    /// Prefix of host worker thread names, suffixed with the core index
    pub thread_name_prefix: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            num_cores: 8,
            cluster_id: 0,
            thread_name_prefix: "qdsp-pe".to_string(),
        }
    }
}

impl ClusterConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of compute elements
    ///
    /// Zero is raised to one.
    ///
    /// ```
    /// use qdsp::cluster::ClusterConfig;
    ///
    /// assert_eq!(ClusterConfig::new().with_num_cores(0).num_cores, 1);
    /// ```
    pub fn with_num_cores(mut self, num_cores: usize) -> Self {
        self.num_cores = num_cores.max(1);
        self
    }

    /// Set the cluster identifier
    pub fn with_cluster_id(mut self, cluster_id: u32) -> Self {
        self.cluster_id = cluster_id;
        self
    }

    /// Set the worker thread name prefix
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// A cluster with one compute element per available host CPU
    pub fn host() -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new().with_num_cores(cores)
    }

    /// A cluster with a single compute element
    pub fn single_core() -> Self {
        Self::new().with_num_cores(1)
    }
}
