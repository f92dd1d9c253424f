/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use async_trait::async_trait;

use super::IngestSink;
use crate::series::TimeSeries;

#[derive(Default)]
pub struct DiscardSink {}

#[async_trait]
impl IngestSink for DiscardSink {
    async fn ingest(&self, _destination: &str, _series: &[TimeSeries]) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn discard() {
        let sink = DiscardSink::default();
        assert!(sink.ingest("projects/p", &[]).await.is_ok());
    }
}
