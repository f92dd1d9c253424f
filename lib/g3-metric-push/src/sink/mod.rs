/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use async_trait::async_trait;

use crate::series::TimeSeries;

mod console;
pub use console::ConsoleSink;

mod discard;
pub use discard::DiscardSink;

mod memory;
pub use memory::{IngestRequest, MemorySink};

/// The remote time series ingestion endpoint.
///
/// Each call carries at most `max_series_per_request` series. Any error is
/// logged by the scheduler and the series of that request are dropped.
#[async_trait]
pub trait IngestSink: Send + Sync {
    async fn ingest(&self, destination: &str, series: &[TimeSeries]) -> anyhow::Result<()>;
}
