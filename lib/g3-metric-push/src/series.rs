/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};

use crate::labels::LabelSet;
use crate::resource::MonitoredResource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricKind {
    Cumulative,
    Gauge,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Cumulative => "CUMULATIVE",
            MetricKind::Gauge => "GAUGE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TypedValue {
    Int64(i64),
    Double(f64),
}

impl TypedValue {
    fn to_json(self) -> Value {
        let mut map = Map::with_capacity(1);
        match self {
            // int64 is carried as a decimal string in the JSON mapping
            TypedValue::Int64(i) => {
                map.insert("int64Value".to_string(), Value::String(i.to_string()));
            }
            TypedValue::Double(f) => {
                let n = Number::from_f64(f).unwrap_or_else(|| Number::from(0));
                map.insert("doubleValue".to_string(), Value::Number(n));
            }
        }
        Value::Object(map)
    }
}

/// The observation window of a point. Gauges only have an end time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeInterval {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
}

impl TimeInterval {
    pub fn cumulative(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        TimeInterval {
            start_time: Some(start_time),
            end_time,
        }
    }

    pub fn at(end_time: DateTime<Utc>) -> Self {
        TimeInterval {
            start_time: None,
            end_time,
        }
    }

    fn to_json(self) -> Value {
        let mut map = Map::with_capacity(2);
        if let Some(start_time) = self.start_time {
            map.insert(
                "startTime".to_string(),
                Value::String(start_time.to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        map.insert(
            "endTime".to_string(),
            Value::String(self.end_time.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(map)
    }
}

/// One wire ready point, as rendered from a metric at flush time.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    pub metric_type: Arc<str>,
    pub metric_labels: Option<LabelSet>,
    pub metric_kind: MetricKind,
    pub resource: Arc<MonitoredResource>,
    pub interval: TimeInterval,
    pub value: TypedValue,
}

impl TimeSeries {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.metric_labels.as_ref().and_then(|l| l.get(name))
    }

    pub fn to_json(&self) -> Value {
        let mut metric = Map::with_capacity(2);
        metric.insert(
            "type".to_string(),
            Value::String(self.metric_type.to_string()),
        );
        if let Some(labels) = &self.metric_labels {
            let labels: Map<String, Value> = labels
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect();
            metric.insert("labels".to_string(), Value::Object(labels));
        }

        let mut point = Map::with_capacity(2);
        point.insert("interval".to_string(), self.interval.to_json());
        point.insert("value".to_string(), self.value.to_json());

        let mut map = Map::with_capacity(4);
        map.insert("metric".to_string(), Value::Object(metric));
        map.insert(
            "metricKind".to_string(),
            Value::String(self.metric_kind.as_str().to_string()),
        );
        map.insert("resource".to_string(), self.resource.to_json());
        map.insert(
            "points".to_string(),
            Value::Array(vec![Value::Object(point)]),
        );
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn resource() -> Arc<MonitoredResource> {
        Arc::new(MonitoredResource::new("global").with_label("project_id", "myproject"))
    }

    #[test]
    fn cumulative_json() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 1, 0).unwrap();
        let series = TimeSeries {
            metric_type: Arc::from("custom.googleapis.com/num_requests"),
            metric_labels: Some(LabelSet::new().with("code", "2xx")),
            metric_kind: MetricKind::Cumulative,
            resource: resource(),
            interval: TimeInterval::cumulative(start, end),
            value: TypedValue::Int64(42),
        };
        let v = series.to_json();
        assert_eq!(v["metric"]["type"], "custom.googleapis.com/num_requests");
        assert_eq!(v["metric"]["labels"]["code"], "2xx");
        assert_eq!(v["metricKind"], "CUMULATIVE");
        assert_eq!(v["resource"]["labels"]["project_id"], "myproject");
        let point = &v["points"][0];
        assert_eq!(point["interval"]["startTime"], "2025-01-01T00:00:00.000Z");
        assert_eq!(point["interval"]["endTime"], "2025-01-01T00:01:00.000Z");
        assert_eq!(point["value"]["int64Value"], "42");
    }

    #[test]
    fn gauge_json() {
        let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 1, 0).unwrap();
        let series = TimeSeries {
            metric_type: Arc::from("custom.googleapis.com/response_time"),
            metric_labels: None,
            metric_kind: MetricKind::Gauge,
            resource: resource(),
            interval: TimeInterval::at(end),
            value: TypedValue::Double(0.25),
        };
        let v = series.to_json();
        assert!(v["metric"].get("labels").is_none());
        assert_eq!(v["metricKind"], "GAUGE");
        let point = &v["points"][0];
        assert!(point["interval"].get("startTime").is_none());
        assert_eq!(point["value"]["doubleValue"], 0.25);
    }
}
