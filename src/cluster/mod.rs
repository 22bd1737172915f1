//! Platform services the fork-join layer runs on
//!
//! A platform answers two questions: *where am I running?* ([`Placement`])
//! and *run this on N compute elements and wait* ([`TaskFork`]). Kernels only
//! see these traits, so the same dispatch code drives host threads, a
//! single-threaded simulation, or a real cluster runtime.
//!
//! # Implementations
//!
//! - [`SerialCluster`]: workers run one after another on the calling thread
//! - `HostCluster` (feature `parallel`): workers run on a fixed-size rayon
//!   thread pool

mod config;
#[cfg(feature = "parallel")]
mod host;
mod serial;

pub use config::ClusterConfig;
#[cfg(feature = "parallel")]
pub use host::HostCluster;
pub use serial::SerialCluster;

/// Which core the calling logical thread is executing on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionContext {
    /// The single orchestrating control core, outside any compute cluster
    Control,
    /// A compute element of a cluster
    Cluster {
        /// Cluster identifier
        cluster_id: u32,
        /// Index of the compute element within the cluster
        core_id: usize,
    },
}

impl ExecutionContext {
    /// Whether this is the orchestrating control core
    pub fn is_control(&self) -> bool {
        matches!(self, ExecutionContext::Control)
    }

    /// Compute element index, `None` on the control core
    pub fn core_id(&self) -> Option<usize> {
        match self {
            ExecutionContext::Control => None,
            ExecutionContext::Cluster { core_id, .. } => Some(*core_id),
        }
    }
}

/// Reports the execution context of the caller
pub trait Placement {
    /// Context of the calling logical thread
    fn execution_context(&self) -> ExecutionContext;
}

/// Bulk-synchronous task fork
///
/// `fork` runs `worker(pe)` exactly once for every `pe` in `0..n_pe` and
/// returns only after every invocation has completed. Invocations may run
/// concurrently and in any order.
pub trait TaskFork {
    /// Fork `n_pe` workers and join them
    fn fork(&self, n_pe: usize, worker: &(dyn Fn(usize) + Sync));
}

/// Everything the parallel kernels need from a platform
pub trait Platform: Placement + TaskFork {}

impl<T: Placement + TaskFork + ?Sized> Platform for T {}
