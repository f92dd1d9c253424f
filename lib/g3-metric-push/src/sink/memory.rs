/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use super::IngestSink;
use crate::series::TimeSeries;

#[derive(Clone, Debug)]
pub struct IngestRequest {
    pub destination: String,
    pub series: Vec<TimeSeries>,
}

/// Keeps every ingestion request in memory.
pub struct MemorySink {
    requests: Mutex<Vec<IngestRequest>>,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink {
            requests: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            delay: None,
        }
    }

    /// Hold each request for `delay` before accepting it.
    pub fn with_delay(delay: Duration) -> Self {
        MemorySink {
            delay: Some(delay),
            ..MemorySink::new()
        }
    }

    /// Reject every request from now on, without recording it.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub fn requests(&self) -> Vec<IngestRequest> {
        self.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().len()
    }

    pub fn take_requests(&self) -> Vec<IngestRequest> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<IngestRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        MemorySink::new()
    }
}

#[async_trait]
impl IngestSink for MemorySink {
    async fn ingest(&self, destination: &str, series: &[TimeSeries]) -> anyhow::Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::Relaxed) {
            return Err(anyhow!("memory sink set to fail"));
        }
        self.lock().push(IngestRequest {
            destination: destination.to_string(),
            series: series.to_vec(),
        });
        Ok(())
    }
}
