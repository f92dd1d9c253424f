/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::metric::Metric;
use crate::resource::MonitoredResource;
use crate::series::TimeSeries;

#[derive(Default)]
pub(super) struct MetricRegistry {
    metrics: Mutex<Vec<Arc<dyn Metric>>>,
}

impl MetricRegistry {
    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn Metric>>> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn add(&self, metric: Arc<dyn Metric>) {
        self.lock().push(metric);
    }

    pub(super) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Render and reset every registered metric, in registration order.
    ///
    /// A metric added while this runs is left for the next call.
    pub(super) fn collect(
        &self,
        flush_time: DateTime<Utc>,
        resource: &Arc<MonitoredResource>,
    ) -> Vec<TimeSeries> {
        let metrics = self.lock().clone();
        let mut series = Vec::new();
        for m in metrics {
            series.extend(m.collect(flush_time, resource));
        }
        series
    }
}
