// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Bounded worker pool for test units
//!
//! Every unit is spawned up front; a semaphore caps how many run at once.
//! Results are handed back in completion order.

use std::future::Future;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Pool statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Units submitted
    pub submitted: u64,
    /// Units that ran to completion
    pub completed: u64,
    /// Units whose task panicked
    pub panicked: u64,
    /// Current running units
    pub active: u64,
    /// Peak concurrent units
    pub peak_concurrent: u64,
}

/// Worker pool with at most `size` units in flight
pub struct WorkerPool<T> {
    size: usize,
    semaphore: Arc<Semaphore>,
    tasks: JoinSet<T>,
    stats: Arc<RwLock<PoolStats>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Create a pool. A size of zero is treated as one.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            semaphore: Arc::new(Semaphore::new(size)),
            tasks: JoinSet::new(),
            stats: Arc::new(RwLock::new(PoolStats::default())),
        }
    }

    /// Maximum concurrent units
    pub fn size(&self) -> usize {
        self.size
    }

    /// Queue a unit; it starts once a permit is free
    pub fn submit<F>(&mut self, unit: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let semaphore = Arc::clone(&self.semaphore);
        let stats = Arc::clone(&self.stats);
        self.stats.write().submitted += 1;

        self.tasks.spawn(async move {
            // The semaphore is never closed, so acquisition only waits
            let _permit = semaphore.acquire_owned().await.ok();

            {
                let mut stats = stats.write();
                stats.active += 1;
                if stats.active > stats.peak_concurrent {
                    stats.peak_concurrent = stats.active;
                }
            }

            let output = unit.await;

            {
                let mut stats = stats.write();
                stats.active = stats.active.saturating_sub(1);
                stats.completed += 1;
            }

            output
        });
    }

    /// Next finished unit, or `None` once every unit has resolved
    pub async fn next(&mut self) -> Option<T> {
        loop {
            match self.tasks.join_next().await? {
                Ok(output) => return Some(output),
                Err(e) => {
                    debug!("Worker task failed: {}", e);
                    self.stats.write().panicked += 1;
                }
            }
        }
    }

    /// Feed every result to `f` in completion order and return the final stats
    pub async fn drain<F>(mut self, mut f: F) -> PoolStats
    where
        F: FnMut(T),
    {
        while let Some(output) = self.next().await {
            f(output);
        }
        self.stats()
    }

    /// Current statistics
    pub fn stats(&self) -> PoolStats {
        *self.stats.read()
    }
}
