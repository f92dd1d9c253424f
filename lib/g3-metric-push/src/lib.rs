/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod error;
pub use error::{ConfigError, DataError, DispatchError};

mod labels;
pub use labels::{LabelKey, LabelSet, LabelSpec, combinations};

mod quantile;
pub use quantile::{Quantile, percentile};

mod resource;
pub use resource::{
    GlobalResourceProvider, MonitoredResource, RESOURCE_LABEL_PROJECT_ID, ResourceProvider,
    ResourceSet, StaticResourceProvider,
};

mod series;
pub use series::{MetricKind, TimeInterval, TimeSeries, TypedValue};

mod sink;
pub use sink::{ConsoleSink, DiscardSink, IngestRequest, IngestSink, MemorySink};

mod logger;
pub use logger::{PushLogger, StdLogger};

mod metric;
pub use metric::{
    Counter, DEFAULT_METRIC_TYPE_PREFIX, Gauge, Metric, MetricName, Point, Summary,
    SummaryOptions, SummaryTimer,
};

mod config;
pub use config::PushClientConfig;

mod client;
pub use client::{FlushReport, PushClient, PushClientBuilder, SchedulerState};
