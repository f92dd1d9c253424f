/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use futures_util::future;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use super::{FlushReport, MetricRegistry, SchedulerState, StateCell};
use crate::DispatchError;
use crate::config::PushClientConfig;
use crate::logger::PushLogger;
use crate::resource::{ResourceProvider, ResourceSet};
use crate::sink::IngestSink;

pub(super) enum Command {
    Flush(oneshot::Sender<FlushReport>),
    Shutdown(oneshot::Sender<FlushReport>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FlushKind {
    Regular,
    Exit,
}

impl fmt::Display for FlushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlushKind::Regular => f.write_str("regular"),
            FlushKind::Exit => f.write_str("exit"),
        }
    }
}

pub(super) struct PushScheduler {
    pub(super) config: Arc<PushClientConfig>,
    pub(super) registry: Arc<MetricRegistry>,
    pub(super) state: Arc<StateCell>,
    pub(super) provider: Arc<dyn ResourceProvider>,
    pub(super) sink: Arc<dyn IngestSink>,
    pub(super) logger: Arc<dyn PushLogger>,
    pub(super) receiver: mpsc::UnboundedReceiver<Command>,
    pub(super) resources: Option<ResourceSet>,
}

impl PushScheduler {
    pub(super) async fn into_running(mut self) {
        let interval = self.config.interval();
        let sleep = tokio::time::sleep(interval);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                biased;

                cmd = self.receiver.recv() => {
                    match cmd {
                        Some(Command::Flush(sender)) => {
                            let report = self.flush(FlushKind::Regular).await;
                            let _ = sender.send(report);
                        }
                        Some(Command::Shutdown(sender)) => {
                            let report = self.flush(FlushKind::Exit).await;
                            let _ = sender.send(report);
                            break;
                        }
                        None => {
                            // all client handles are gone
                            self.flush(FlushKind::Exit).await;
                            break;
                        }
                    }
                }
                _ = &mut sleep => {
                    self.flush(FlushKind::Regular).await;
                    // the next tick is counted from the end of this one
                    sleep.as_mut().reset(Instant::now() + interval);
                }
            }
        }

        self.receiver.close();
    }

    async fn flush(&mut self, kind: FlushKind) -> FlushReport {
        self.state.set(match kind {
            FlushKind::Regular => SchedulerState::Flushing,
            FlushKind::Exit => SchedulerState::Draining,
        });

        let mut report = FlushReport::default();
        if let Err(e) = self.try_flush(kind, &mut report).await {
            self.logger
                .error(&format!("unable to push metrics in {kind} flush: {e}"));
        }
        self.logger.debug(&format!(
            "{kind} flush done: {} series in {} requests, {} failed",
            report.series, report.requests, report.failed_requests
        ));

        self.state.set(match kind {
            FlushKind::Regular => SchedulerState::Idle,
            FlushKind::Exit => SchedulerState::Stopped,
        });
        report
    }

    async fn try_flush(
        &mut self,
        kind: FlushKind,
        report: &mut FlushReport,
    ) -> Result<(), DispatchError> {
        let resources = match self.resources.take() {
            Some(set) => set,
            None => self
                .provider
                .fetch()
                .await
                .map_err(DispatchError::Resource)?,
        };
        let resource = match kind {
            FlushKind::Regular => resources.default_resource().clone(),
            FlushKind::Exit => resources.exit_resource().clone(),
        };
        self.resources = Some(resources);

        let flush_time = Utc::now();
        let series = self.registry.collect(flush_time, &resource);
        report.series = series.len();
        if series.is_empty() {
            return Ok(());
        }

        // collected series are dropped if there is nowhere to send them
        let destination = match self.config.destination() {
            Some(d) => d.to_string(),
            None => {
                let project_id = resource.project_id().ok_or(DispatchError::NoDestination)?;
                format!("projects/{project_id}")
            }
        };

        let timeout = self.config.request_timeout();
        let sink = self.sink.as_ref();
        let destination = destination.as_str();
        let tasks = series
            .chunks(self.config.max_series_per_request())
            .map(|chunk| async move {
                match tokio::time::timeout(timeout, sink.ingest(destination, chunk)).await {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(DispatchError::Ingest(e)),
                    Err(_) => Err(DispatchError::Timeout(timeout)),
                }
            });
        let results = future::join_all(tasks).await;
        report.requests = results.len();

        let mut first_error = None;
        for r in results {
            if let Err(e) = r {
                report.failed_requests += 1;
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    log::warn!("another request to {destination} failed: {e}");
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
