/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use async_trait::async_trait;

use super::IngestSink;
use crate::series::TimeSeries;

pub struct ConsoleSink {}

impl ConsoleSink {
    pub fn new() -> Self {
        ConsoleSink {}
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        ConsoleSink::new()
    }
}

#[async_trait]
impl IngestSink for ConsoleSink {
    async fn ingest(&self, destination: &str, series: &[TimeSeries]) -> anyhow::Result<()> {
        for s in series {
            println!("{destination} {}", s.to_json());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;

    use crate::resource::MonitoredResource;
    use crate::series::{MetricKind, TimeInterval, TypedValue};

    #[tokio::test]
    async fn print() {
        let series = TimeSeries {
            metric_type: Arc::from("custom.googleapis.com/num_requests"),
            metric_labels: None,
            metric_kind: MetricKind::Gauge,
            resource: Arc::new(MonitoredResource::new("global")),
            interval: TimeInterval::at(Utc::now()),
            value: TypedValue::Int64(1),
        };
        let sink = ConsoleSink::new();
        sink.ingest("projects/p", &[series]).await.unwrap();
    }
}
