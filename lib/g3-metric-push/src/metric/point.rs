/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ahash::AHashMap;

use super::MetricName;
use crate::ConfigError;
use crate::labels::{LabelKey, LabelSet, LabelSpec};
use crate::resource::MonitoredResource;
use crate::series::{MetricKind, TimeInterval, TimeSeries, TypedValue};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    labels: Option<LabelSet>,
    value: i64,
}

impl Point {
    fn new(labels: Option<LabelSet>) -> Self {
        Point { labels, value: 0 }
    }

    #[inline]
    pub fn labels(&self) -> Option<&LabelSet> {
        self.labels.as_ref()
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }
}

/// Integer point storage shared by counters and gauges.
pub(super) struct MetricCore {
    name: MetricName,
    metric_type: Arc<str>,
    points: Mutex<AHashMap<LabelKey, Point>>,
}

impl MetricCore {
    pub(super) fn new(
        name: &str,
        labels: Option<&LabelSpec>,
        type_prefix: &str,
    ) -> Result<Self, ConfigError> {
        let name = MetricName::from_str(name)?;
        let metric_type = name.metric_type(type_prefix);

        let mut points = AHashMap::default();
        match labels {
            Some(spec) => {
                for set in crate::labels::combinations(spec) {
                    points.insert(set.key(), Point::new(Some(set)));
                }
            }
            None => {
                points.insert(LabelKey::no_labels(), Point::new(None));
            }
        }

        Ok(MetricCore {
            name,
            metric_type,
            points: Mutex::new(points),
        })
    }

    #[inline]
    pub(super) fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub(super) fn metric_type(&self) -> &str {
        &self.metric_type
    }

    fn lock(&self) -> MutexGuard<'_, AHashMap<LabelKey, Point>> {
        self.points.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `delta` to the point of `labels`, creating it if it is not seen
    /// before, even if it is out of the label specification.
    pub(super) fn mutate(&self, labels: Option<&LabelSet>, delta: i64) {
        let key = LabelKey::new(labels);
        let mut points = self.lock();
        let point = points
            .entry(key)
            .or_insert_with(|| Point::new(labels.cloned()));
        point.value = point.value.saturating_add(delta);
    }

    pub(super) fn value(&self, labels: Option<&LabelSet>) -> Option<i64> {
        let key = LabelKey::new(labels);
        self.lock().get(&key).map(|p| p.value)
    }

    pub(super) fn list_points(&self) -> Vec<Point> {
        self.lock().values().cloned().collect()
    }

    pub(super) fn render(
        &self,
        kind: MetricKind,
        interval: TimeInterval,
        resource: &Arc<MonitoredResource>,
    ) -> Vec<TimeSeries> {
        let points = self.lock();
        points
            .values()
            .map(|p| TimeSeries {
                metric_type: self.metric_type.clone(),
                metric_labels: p.labels.clone(),
                metric_kind: kind,
                resource: resource.clone(),
                interval,
                value: TypedValue::Int64(p.value),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::DEFAULT_METRIC_TYPE_PREFIX;

    #[test]
    fn no_spec() {
        let core = MetricCore::new("m", None, DEFAULT_METRIC_TYPE_PREFIX).unwrap();
        let points = core.list_points();
        assert_eq!(points.len(), 1);
        assert!(points[0].labels().is_none());
        assert_eq!(points[0].value(), 0);
    }

    #[test]
    fn empty_spec() {
        let core =
            MetricCore::new("m", Some(&LabelSpec::new()), DEFAULT_METRIC_TYPE_PREFIX).unwrap();
        assert!(core.list_points().is_empty());
        assert_eq!(core.value(None), None);
    }

    #[test]
    fn pre_seeded() {
        let spec = LabelSpec::new()
            .with_label("code", ["2xx", "3xx"])
            .unwrap()
            .with_label("method", ["GET", "PUT"])
            .unwrap();
        let core = MetricCore::new("m", Some(&spec), DEFAULT_METRIC_TYPE_PREFIX).unwrap();
        assert_eq!(core.list_points().len(), 4);
        assert_eq!(core.value(None), None);

        let labels = LabelSet::new().with("method", "PUT").with("code", "3xx");
        assert_eq!(core.value(Some(&labels)), Some(0));
        core.mutate(Some(&labels), 3);
        assert_eq!(core.value(Some(&labels)), Some(3));
        assert_eq!(core.list_points().len(), 4);
    }

    #[test]
    fn lazy_point() {
        let core = MetricCore::new("m", None, DEFAULT_METRIC_TYPE_PREFIX).unwrap();
        let labels = LabelSet::new().with("code", "5xx");
        core.mutate(Some(&labels), 1);
        core.mutate(Some(&labels), 1);
        core.mutate(None, -2);
        assert_eq!(core.value(Some(&labels)), Some(2));
        assert_eq!(core.value(None), Some(-2));
        assert_eq!(core.list_points().len(), 2);
    }

    #[test]
    fn empty_name() {
        assert_eq!(
            MetricCore::new("", None, DEFAULT_METRIC_TYPE_PREFIX).err(),
            Some(ConfigError::EmptyMetricName)
        );
    }
}
