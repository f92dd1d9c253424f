/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

use super::{DEFAULT_METRIC_TYPE_PREFIX, Metric, MetricName};
use crate::ConfigError;
use crate::labels::{LabelKey, LabelSet, LabelSpec};
use crate::quantile::{self, Quantile};
use crate::resource::MonitoredResource;
use crate::series::{MetricKind, TimeInterval, TimeSeries, TypedValue};

const PERCENTILE_LABEL: &str = "percentile";

#[derive(Clone, Debug, Default)]
pub struct SummaryOptions {
    labels: Option<LabelSpec>,
    percentiles: Option<Vec<f64>>,
}

impl SummaryOptions {
    pub fn new() -> Self {
        SummaryOptions::default()
    }

    pub fn with_labels(mut self, labels: LabelSpec) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Percentiles as fractions, e.g. `0.9` for the 90th percentile.
    pub fn with_percentiles<I: IntoIterator<Item = f64>>(mut self, percentiles: I) -> Self {
        self.percentiles = Some(percentiles.into_iter().collect());
        self
    }
}

struct SampleSeries {
    labels: Option<LabelSet>,
    samples: Vec<f64>,
}

/// Samples observed during the current interval, reported as one gauge
/// series per configured percentile, then dropped at each flush.
///
/// The `percentile` label is reserved: a user label with that name is left
/// out of the rendered series.
pub struct Summary {
    name: MetricName,
    metric_type: Arc<str>,
    label_spec: Option<LabelSpec>,
    quantiles: Vec<Quantile>,
    series: Mutex<AHashMap<LabelKey, SampleSeries>>,
}

impl Summary {
    pub fn new(name: &str, options: SummaryOptions) -> Result<Self, ConfigError> {
        Summary::with_type_prefix(name, options, DEFAULT_METRIC_TYPE_PREFIX)
    }

    pub(crate) fn with_type_prefix(
        name: &str,
        options: SummaryOptions,
        type_prefix: &str,
    ) -> Result<Self, ConfigError> {
        let name = MetricName::from_str(name)?;
        let metric_type = name.metric_type(type_prefix);
        let quantiles = match options.percentiles {
            Some(v) if !v.is_empty() => v.into_iter().map(Quantile::new).collect(),
            _ => Quantile::default_set(),
        };
        Ok(Summary {
            name,
            metric_type,
            label_spec: options.labels,
            quantiles,
            series: Mutex::new(AHashMap::default()),
        })
    }

    #[inline]
    pub fn quantiles(&self) -> &[Quantile] {
        &self.quantiles
    }

    /// The label specification given at creation. No series is seeded from it.
    #[inline]
    pub fn label_spec(&self) -> Option<&LabelSpec> {
        self.label_spec.as_ref()
    }

    fn lock(&self) -> MutexGuard<'_, AHashMap<LabelKey, SampleSeries>> {
        self.series.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, labels: Option<&LabelSet>, value: f64) {
        let key = LabelKey::new(labels);
        let mut series = self.lock();
        series
            .entry(key)
            .or_insert_with(|| SampleSeries {
                labels: labels.cloned(),
                samples: Vec::new(),
            })
            .samples
            .push(value);
    }

    pub fn observe(&self, value: f64) {
        self.record(None, value);
    }

    pub fn observe_labels(&self, value: f64, labels: &LabelSet) {
        self.record(Some(labels), value);
    }

    /// Number of samples held for `labels` in the current interval.
    pub fn sample_count(&self, labels: Option<&LabelSet>) -> usize {
        let key = LabelKey::new(labels);
        self.lock().get(&key).map(|s| s.samples.len()).unwrap_or(0)
    }

    pub fn start_timer(self: &Arc<Self>) -> SummaryTimer {
        SummaryTimer {
            summary: self.clone(),
            labels: None,
            start: Instant::now(),
        }
    }

    pub fn start_timer_labels(self: &Arc<Self>, labels: LabelSet) -> SummaryTimer {
        SummaryTimer {
            summary: self.clone(),
            labels: Some(labels),
            start: Instant::now(),
        }
    }

    fn render_locked(
        &self,
        series: &mut AHashMap<LabelKey, SampleSeries>,
        flush_time: DateTime<Utc>,
        resource: &Arc<MonitoredResource>,
    ) -> Vec<TimeSeries> {
        let mut output = Vec::new();
        for s in series.values_mut() {
            if s.samples.is_empty() {
                continue;
            }
            quantile::sort_samples(&mut s.samples);

            for q in &self.quantiles {
                let mut labels = LabelSet::new().with(PERCENTILE_LABEL, q.as_str());
                if let Some(user) = &s.labels {
                    for (k, v) in user.iter() {
                        if k != PERCENTILE_LABEL {
                            labels.insert(k, v);
                        }
                    }
                }

                let v = quantile::percentile(&s.samples, q.value());
                output.push(TimeSeries {
                    metric_type: self.metric_type.clone(),
                    metric_labels: Some(labels),
                    metric_kind: MetricKind::Gauge,
                    resource: resource.clone(),
                    interval: TimeInterval::at(flush_time),
                    value: TypedValue::Double(if v.is_nan() { 0.0 } else { v }),
                });
            }
        }
        output
    }
}

impl Metric for Summary {
    fn name(&self) -> &MetricName {
        &self.name
    }

    fn metric_type(&self) -> &str {
        &self.metric_type
    }

    fn render_snapshot(
        &self,
        flush_time: DateTime<Utc>,
        resource: &Arc<MonitoredResource>,
    ) -> Vec<TimeSeries> {
        let mut series = self.lock();
        self.render_locked(&mut series, flush_time, resource)
    }

    fn interval_reset(&self) {
        let mut series = self.lock();
        for s in series.values_mut() {
            s.samples.clear();
        }
    }

    fn collect(
        &self,
        flush_time: DateTime<Utc>,
        resource: &Arc<MonitoredResource>,
    ) -> Vec<TimeSeries> {
        let mut series = self.lock();
        let output = self.render_locked(&mut series, flush_time, resource);
        for s in series.values_mut() {
            s.samples.clear();
        }
        output
    }
}

/// Measures the time until [`SummaryTimer::stop`] and records it in seconds.
pub struct SummaryTimer {
    summary: Arc<Summary>,
    labels: Option<LabelSet>,
    start: Instant,
}

impl SummaryTimer {
    /// Record the elapsed time, with millisecond resolution, and return it.
    pub fn stop(self) -> f64 {
        let elapsed = self.start.elapsed();
        let secs = elapsed.as_millis() as f64 / 1000.0;
        self.summary.record(self.labels.as_ref(), secs);
        secs
    }
}
