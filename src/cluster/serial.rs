//! Single-threaded platform
//!
//! Runs forked workers in index order on the calling thread. Useful on
//! targets with a single compute element and for reproducing a parallel run
//! step by step.

use super::{ExecutionContext, Placement, TaskFork};

/// Platform that executes every worker inline, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialCluster {
    context: ExecutionContext,
}

impl SerialCluster {
    /// A platform whose caller is compute element 0 of cluster `cluster_id`
    pub fn on_cluster(cluster_id: u32) -> Self {
        SerialCluster {
            context: ExecutionContext::Cluster {
                cluster_id,
                core_id: 0,
            },
        }
    }

    /// A platform whose caller is the orchestrating control core
    pub fn on_control() -> Self {
        SerialCluster {
            context: ExecutionContext::Control,
        }
    }
}

impl Default for SerialCluster {
    fn default() -> Self {
        Self::on_cluster(0)
    }
}

impl Placement for SerialCluster {
    fn execution_context(&self) -> ExecutionContext {
        self.context
    }
}

impl TaskFork for SerialCluster {
    fn fork(&self, n_pe: usize, worker: &(dyn Fn(usize) + Sync)) {
        for pe in 0..n_pe {
            worker(pe);
        }
    }
}
