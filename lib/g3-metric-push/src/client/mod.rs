/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use crate::ConfigError;
use crate::config::PushClientConfig;
use crate::labels::LabelSpec;
use crate::logger::{PushLogger, StdLogger};
use crate::metric::{Counter, Gauge, Metric, Summary, SummaryOptions};
use crate::resource::ResourceProvider;
use crate::sink::IngestSink;

mod registry;
use registry::MetricRegistry;

mod scheduler;
use scheduler::{Command, PushScheduler};

mod state;
pub use state::SchedulerState;
use state::StateCell;

/// Outcome of one flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Number of rendered time series.
    pub series: usize,
    /// Number of ingestion requests sent.
    pub requests: usize,
    pub failed_requests: usize,
}

pub struct PushClientBuilder {
    config: PushClientConfig,
    resource_provider: Option<Arc<dyn ResourceProvider>>,
    sink: Option<Arc<dyn IngestSink>>,
    logger: Arc<dyn PushLogger>,
}

impl PushClientBuilder {
    pub fn new(config: PushClientConfig) -> Self {
        PushClientBuilder {
            config,
            resource_provider: None,
            sink: None,
            logger: Arc::new(StdLogger::default()),
        }
    }

    pub fn resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.resource_provider = Some(provider);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn IngestSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn PushLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Validate the settings and spawn the push scheduler on the current
    /// tokio runtime. The first flush happens one interval later.
    pub fn build(self) -> Result<PushClient, ConfigError> {
        self.config.check()?;
        let provider = self
            .resource_provider
            .ok_or(ConfigError::NoResourceProvider)?;
        let sink = self.sink.ok_or(ConfigError::NoIngestSink)?;
        let handle = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;

        let config = Arc::new(self.config);
        let registry = Arc::new(MetricRegistry::default());
        let state = Arc::new(StateCell::new());
        let (cmd_sender, receiver) = mpsc::unbounded_channel();

        let scheduler = PushScheduler {
            config: config.clone(),
            registry: registry.clone(),
            state: state.clone(),
            provider,
            sink,
            logger: self.logger,
            receiver,
            resources: None,
        };
        handle.spawn(scheduler.into_running());

        Ok(PushClient {
            config,
            registry,
            state,
            cmd_sender,
        })
    }
}

/// Handle to a running push scheduler.
///
/// Metrics should be registered before the first tick. A metric registered
/// while a flush is in progress is only rendered from the next flush.
/// Dropping the last handle runs the exit flush, like [`PushClient::shutdown`].
#[derive(Clone)]
pub struct PushClient {
    config: Arc<PushClientConfig>,
    registry: Arc<MetricRegistry>,
    state: Arc<StateCell>,
    cmd_sender: mpsc::UnboundedSender<Command>,
}

impl PushClient {
    pub fn builder(config: PushClientConfig) -> PushClientBuilder {
        PushClientBuilder::new(config)
    }

    #[inline]
    pub fn config(&self) -> &PushClientConfig {
        &self.config
    }

    pub fn state(&self) -> SchedulerState {
        self.state.get()
    }

    pub fn metric_count(&self) -> usize {
        self.registry.len()
    }

    pub fn counter(
        &self,
        name: &str,
        labels: Option<&LabelSpec>,
    ) -> Result<Arc<Counter>, ConfigError> {
        let counter = Arc::new(Counter::with_type_prefix(
            name,
            labels,
            self.config.metric_type_prefix(),
        )?);
        self.registry.add(counter.clone());
        Ok(counter)
    }

    pub fn gauge(&self, name: &str, labels: Option<&LabelSpec>) -> Result<Arc<Gauge>, ConfigError> {
        let gauge = Arc::new(Gauge::with_type_prefix(
            name,
            labels,
            self.config.metric_type_prefix(),
        )?);
        self.registry.add(gauge.clone());
        Ok(gauge)
    }

    pub fn summary(
        &self,
        name: &str,
        options: SummaryOptions,
    ) -> Result<Arc<Summary>, ConfigError> {
        let summary = Arc::new(Summary::with_type_prefix(
            name,
            options,
            self.config.metric_type_prefix(),
        )?);
        self.registry.add(summary.clone());
        Ok(summary)
    }

    /// Register a custom metric implementation.
    pub fn register(&self, metric: Arc<dyn Metric>) {
        self.registry.add(metric);
    }

    /// Run one regular flush now, without moving the next tick.
    pub async fn flush_now(&self) -> FlushReport {
        let (sender, receiver) = oneshot::channel();
        if self.cmd_sender.send(Command::Flush(sender)).is_err() {
            return FlushReport::default();
        }
        receiver.await.unwrap_or_default()
    }

    /// Run the exit flush and stop the scheduler.
    ///
    /// Only the first call pushes anything, later calls return an empty report.
    pub async fn shutdown(&self) -> FlushReport {
        let (sender, receiver) = oneshot::channel();
        if self.cmd_sender.send(Command::Shutdown(sender)).is_err() {
            return FlushReport::default();
        }
        receiver.await.unwrap_or_default()
    }
}
