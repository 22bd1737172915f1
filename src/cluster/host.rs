//! Host platform backed by a fixed-size rayon thread pool
//!
//! The calling thread is the control core. [`HostCluster::offload`] moves a
//! closure onto the cluster, where it runs as compute element 0 and may fork
//! parallel kernels. Inside a forked worker the context reports that
//! worker's own element index.

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::{ThreadPool, ThreadPoolBuilder};

#[cfg(feature = "tracing")]
use tracing::debug;

use super::{ClusterConfig, ExecutionContext, Placement, TaskFork};
use crate::{DspError, Result};

/// Source of per-instance identities; never reused within a process
static NEXT_INSTANCE: AtomicUsize = AtomicUsize::new(0);

/// Compute element a thread is currently acting as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CoreMark {
    /// Identity of the `HostCluster` that placed the thread
    instance: usize,
    cluster_id: u32,
    core_id: usize,
}

thread_local! {
    /// Compute element of the job currently running on this thread
    static CURRENT_CORE: Cell<Option<CoreMark>> = const { Cell::new(None) };
}

/// Marks the current thread as a compute element until dropped
///
/// Restores the previous marking on drop, so a pool thread that steals a
/// job while waiting in a join gets its own context back afterwards.
struct CoreGuard {
    previous: Option<CoreMark>,
}

impl CoreGuard {
    fn enter(mark: CoreMark) -> Self {
        let previous = CURRENT_CORE.with(|c| c.replace(Some(mark)));
        CoreGuard { previous }
    }
}

impl Drop for CoreGuard {
    fn drop(&mut self) {
        CURRENT_CORE.with(|c| c.set(self.previous));
    }
}

/// Compute cluster emulated on host threads
///
/// Each instance only recognises its own compute elements: a thread placed
/// by one `HostCluster` is the control core as far as any other is concerned.
pub struct HostCluster {
    config: ClusterConfig,
    pool: ThreadPool,
    instance: usize,
}

impl HostCluster {
    /// Brings up a cluster with `config.num_cores` worker threads
    ///
    /// # Errors
    ///
    /// Returns `ClusterSetup` if the thread pool cannot be built.
    pub fn new(config: ClusterConfig) -> Result<Self> {
        let prefix = config.thread_name_prefix.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.num_cores)
            .thread_name(move |i| format!("{}-{}", prefix, i))
            .build()
            .map_err(|e| DspError::ClusterSetup(e.to_string()))?;

        #[cfg(feature = "tracing")]
        debug!(
            cluster_id = config.cluster_id,
            num_cores = config.num_cores,
            "host cluster ready"
        );

        Ok(HostCluster {
            config,
            pool,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Configuration the cluster was built with
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Number of compute elements
    pub fn num_cores(&self) -> usize {
        self.config.num_cores
    }

    fn mark(&self, core_id: usize) -> CoreMark {
        CoreMark {
            instance: self.instance,
            cluster_id: self.config.cluster_id,
            core_id,
        }
    }

    /// Runs `f` on the cluster as compute element 0 and waits for its result
    ///
    /// ```
    /// use qdsp::cluster::{ClusterConfig, HostCluster, Placement};
    ///
    /// let cluster = HostCluster::new(ClusterConfig::new().with_num_cores(2)).unwrap();
    /// assert!(cluster.execution_context().is_control());
    ///
    /// let inside = cluster.offload(|| cluster.execution_context());
    /// assert_eq!(inside.core_id(), Some(0));
    /// ```
    pub fn offload<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        let mark = self.mark(0);
        self.pool.install(|| {
            let _core = CoreGuard::enter(mark);
            f()
        })
    }
}

impl Placement for HostCluster {
    fn execution_context(&self) -> ExecutionContext {
        match CURRENT_CORE.with(|c| c.get()) {
            Some(mark) if mark.instance == self.instance => ExecutionContext::Cluster {
                cluster_id: mark.cluster_id,
                core_id: mark.core_id,
            },
            _ => ExecutionContext::Control,
        }
    }
}

impl TaskFork for HostCluster {
    fn fork(&self, n_pe: usize, worker: &(dyn Fn(usize) + Sync)) {
        // scope returns only once every spawned job has finished
        self.pool.scope(|s| {
            for pe in 0..n_pe {
                let mark = self.mark(pe);
                s.spawn(move |_| {
                    let _core = CoreGuard::enter(mark);
                    worker(pe);
                });
            }
        });
    }
}
