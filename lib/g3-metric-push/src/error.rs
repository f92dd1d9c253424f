/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use thiserror::Error;

/// Invalid construction parameters, reported synchronously at build or
/// registration time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("metric name is required")]
    EmptyMetricName,
    #[error("push interval must be at least 1s, got {0:?}")]
    IntervalTooShort(Duration),
    #[error("max series per request must be at least 1")]
    InvalidRequestSize,
    #[error("no resource provider set")]
    NoResourceProvider,
    #[error("no ingestion sink set")]
    NoIngestSink,
    #[error("no project id found")]
    NoProjectId,
    #[error("no tokio runtime found to spawn the push scheduler")]
    NoRuntime,
}

/// Malformed label specification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("empty label name")]
    EmptyLabelName,
    #[error("label name should be a string")]
    InvalidLabelName,
    #[error("no values set for label {0}")]
    EmptyLabelValues(String),
    #[error("duplicate label {0}")]
    DuplicateLabel(String),
    #[error("values of label {0} should be a list")]
    NotAList(String),
    #[error("invalid value for label {0}")]
    InvalidLabelValue(String),
    #[error("label specification should be a map")]
    NotAMap,
}

/// Failure while delivering one flush. Never returned to metric users, only
/// reported through the logger.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to fetch resource descriptor: {0:?}")]
    Resource(anyhow::Error),
    #[error("no destination set and resource has no project_id label")]
    NoDestination,
    #[error("ingestion request failed: {0:?}")]
    Ingest(anyhow::Error),
    #[error("ingestion request timed out after {0:?}")]
    Timeout(Duration),
}
