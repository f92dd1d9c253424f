/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{DEFAULT_METRIC_TYPE_PREFIX, Metric, MetricCore, MetricName, Point};
use crate::ConfigError;
use crate::labels::{LabelSet, LabelSpec};
use crate::resource::MonitoredResource;
use crate::series::{MetricKind, TimeInterval, TimeSeries};

/// A value that may go up and down, reported as the value at flush time.
pub struct Gauge {
    core: MetricCore,
}

impl Gauge {
    pub fn new(name: &str, labels: Option<&LabelSpec>) -> Result<Self, ConfigError> {
        Gauge::with_type_prefix(name, labels, DEFAULT_METRIC_TYPE_PREFIX)
    }

    pub(crate) fn with_type_prefix(
        name: &str,
        labels: Option<&LabelSpec>,
        type_prefix: &str,
    ) -> Result<Self, ConfigError> {
        let core = MetricCore::new(name, labels, type_prefix)?;
        Ok(Gauge { core })
    }

    pub fn inc(&self) {
        self.core.mutate(None, 1);
    }

    pub fn inc_by(&self, amount: i64) {
        self.core.mutate(None, amount);
    }

    pub fn inc_labels(&self, labels: &LabelSet) {
        self.core.mutate(Some(labels), 1);
    }

    pub fn inc_labels_by(&self, labels: &LabelSet, amount: i64) {
        self.core.mutate(Some(labels), amount);
    }

    pub fn dec(&self) {
        self.core.mutate(None, -1);
    }

    pub fn dec_by(&self, amount: i64) {
        self.core.mutate(None, amount.saturating_neg());
    }

    pub fn dec_labels(&self, labels: &LabelSet) {
        self.core.mutate(Some(labels), -1);
    }

    pub fn dec_labels_by(&self, labels: &LabelSet, amount: i64) {
        self.core.mutate(Some(labels), amount.saturating_neg());
    }

    pub fn value(&self, labels: Option<&LabelSet>) -> Option<i64> {
        self.core.value(labels)
    }

    pub fn list_points(&self) -> Vec<Point> {
        self.core.list_points()
    }
}

impl Metric for Gauge {
    fn name(&self) -> &MetricName {
        self.core.name()
    }

    fn metric_type(&self) -> &str {
        self.core.metric_type()
    }

    fn render_snapshot(
        &self,
        flush_time: DateTime<Utc>,
        resource: &Arc<MonitoredResource>,
    ) -> Vec<TimeSeries> {
        self.core
            .render(MetricKind::Gauge, TimeInterval::at(flush_time), resource)
    }

    fn interval_reset(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::TypedValue;

    #[test]
    fn up_and_down() {
        let gauge = Gauge::new("connections", None).unwrap();
        gauge.inc();
        gauge.dec_by(2);
        gauge.inc_by(4);
        assert_eq!(gauge.value(None), Some(3));

        let resource = Arc::new(MonitoredResource::new("global"));
        let flush_time = Utc::now();
        let series = gauge.collect(flush_time, &resource);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].metric_kind, MetricKind::Gauge);
        assert_eq!(series[0].interval, TimeInterval::at(flush_time));
        assert_eq!(series[0].value, TypedValue::Int64(3));

        // the value survives the flush
        assert_eq!(gauge.value(None), Some(3));
    }

    #[test]
    fn negative() {
        let gauge = Gauge::new("balance", None).unwrap();
        gauge.dec();
        gauge.dec_by(-5);
        assert_eq!(gauge.value(None), Some(4));
        gauge.dec_by(10);
        assert_eq!(gauge.value(None), Some(-6));
    }

    #[test]
    fn labelled() {
        let gauge = Gauge::new("connections", None).unwrap();
        let tcp = LabelSet::new().with("proto", "tcp");
        gauge.inc_labels_by(&tcp, 10);
        gauge.dec_labels(&tcp);
        gauge.dec_labels_by(&tcp, 4);
        gauge.inc_labels(&tcp);
        assert_eq!(gauge.value(Some(&tcp)), Some(6));
        assert_eq!(gauge.value(None), Some(0));
        assert_eq!(gauge.list_points().len(), 2);
    }
}
