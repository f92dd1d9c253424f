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

/// A monotonically increasing count, reported as a cumulative series
/// starting at the creation time of the counter.
pub struct Counter {
    core: MetricCore,
    create_time: DateTime<Utc>,
}

impl Counter {
    pub fn new(name: &str, labels: Option<&LabelSpec>) -> Result<Self, ConfigError> {
        Counter::with_type_prefix(name, labels, DEFAULT_METRIC_TYPE_PREFIX)
    }

    pub(crate) fn with_type_prefix(
        name: &str,
        labels: Option<&LabelSpec>,
        type_prefix: &str,
    ) -> Result<Self, ConfigError> {
        let core = MetricCore::new(name, labels, type_prefix)?;
        Ok(Counter {
            core,
            create_time: Utc::now(),
        })
    }

    #[inline]
    pub fn create_time(&self) -> DateTime<Utc> {
        self.create_time
    }

    pub fn inc(&self) {
        self.core.mutate(None, 1);
    }

    pub fn inc_by(&self, amount: u64) {
        self.core.mutate(None, clamp_amount(amount));
    }

    pub fn inc_labels(&self, labels: &LabelSet) {
        self.core.mutate(Some(labels), 1);
    }

    pub fn inc_labels_by(&self, labels: &LabelSet, amount: u64) {
        self.core.mutate(Some(labels), clamp_amount(amount));
    }

    /// The current count of the point with `labels`, if it exists.
    pub fn value(&self, labels: Option<&LabelSet>) -> Option<i64> {
        self.core.value(labels)
    }

    pub fn list_points(&self) -> Vec<Point> {
        self.core.list_points()
    }
}

fn clamp_amount(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

impl Metric for Counter {
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
        self.core.render(
            MetricKind::Cumulative,
            TimeInterval::cumulative(self.create_time, flush_time),
            resource,
        )
    }

    fn interval_reset(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::TypedValue;

    fn resource() -> Arc<MonitoredResource> {
        Arc::new(MonitoredResource::new("global").with_label("project_id", "p"))
    }

    #[test]
    fn counts() {
        let counter = Counter::new("num_requests", None).unwrap();
        for _ in 0..5 {
            counter.inc();
        }
        counter.inc_by(10);
        let points = counter.list_points();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value(), 15);
        assert_eq!(counter.value(None), Some(15));
    }

    #[test]
    fn cumulative() {
        let counter = Counter::new("num_requests", None).unwrap();
        let flush_time = Utc::now();
        let series = counter.collect(flush_time, &resource());
        assert_eq!(series.len(), 1);
        let s = &series[0];
        assert_eq!(s.metric_type.as_ref(), "custom.googleapis.com/num_requests");
        assert_eq!(s.metric_kind, MetricKind::Cumulative);
        assert!(s.metric_labels.is_none());
        assert_eq!(s.interval.start_time, Some(counter.create_time()));
        assert_eq!(s.interval.end_time, flush_time);
        assert_eq!(s.value, TypedValue::Int64(0));

        // nothing is reset between flushes
        counter.inc();
        let series = counter.collect(Utc::now(), &resource());
        assert_eq!(series[0].value, TypedValue::Int64(1));
        let series = counter.collect(Utc::now(), &resource());
        assert_eq!(series[0].value, TypedValue::Int64(1));
    }

    #[test]
    fn pre_seeded() {
        let spec = LabelSpec::new().with_label("code", ["2xx", "3xx"]).unwrap();
        let counter = Counter::new("num_requests", Some(&spec)).unwrap();
        counter.inc();

        let series = counter.render_snapshot(Utc::now(), &resource());
        assert_eq!(series.len(), 3);
        let mut codes: Vec<Option<&str>> = series.iter().map(|s| s.label("code")).collect();
        codes.sort();
        assert_eq!(codes, vec![None, Some("2xx"), Some("3xx")]);
        for s in &series {
            let expected = if s.metric_labels.is_none() { 1 } else { 0 };
            assert_eq!(s.value, TypedValue::Int64(expected));
        }
    }

    #[test]
    fn labelled() {
        let spec = LabelSpec::new().with_label("code", ["2xx", "3xx"]).unwrap();
        let counter = Counter::new("num_requests", Some(&spec)).unwrap();
        let ok = LabelSet::new().with("code", "2xx");
        let err = LabelSet::new().with("code", "5xx");
        counter.inc_labels(&ok);
        counter.inc_labels_by(&ok, 2);
        counter.inc_labels(&err);
        assert_eq!(counter.value(Some(&ok)), Some(3));
        assert_eq!(counter.value(Some(&err)), Some(1));
        assert_eq!(counter.list_points().len(), 3);
    }

    #[test]
    fn custom_prefix() {
        let counter = Counter::with_type_prefix("hits", None, "example.com/").unwrap();
        assert_eq!(counter.metric_type(), "example.com/hits");
        assert_eq!(counter.name().as_str(), "hits");
    }

    #[test]
    fn huge_amount() {
        let counter = Counter::new("bytes", None).unwrap();
        counter.inc_by(u64::MAX);
        counter.inc();
        assert_eq!(counter.value(None), Some(i64::MAX));
    }
}
