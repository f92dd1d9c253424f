/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::ConfigError;
use crate::resource::MonitoredResource;
use crate::series::TimeSeries;

mod point;
pub use point::Point;
use point::MetricCore;

mod counter;
pub use counter::Counter;

mod gauge;
pub use gauge::Gauge;

mod summary;
pub use summary::{Summary, SummaryOptions, SummaryTimer};

pub const DEFAULT_METRIC_TYPE_PREFIX: &str = "custom.googleapis.com/";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetricName(Arc<str>);

impl MetricName {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn metric_type(&self, prefix: &str) -> Arc<str> {
        Arc::from(format!("{prefix}{}", self.0))
    }
}

impl FromStr for MetricName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::EmptyMetricName);
        }
        Ok(MetricName(Arc::from(s)))
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A metric the push scheduler can render and reset at each flush.
pub trait Metric: Send + Sync {
    fn name(&self) -> &MetricName;

    /// The full metric type, i.e. the type prefix followed by the name.
    fn metric_type(&self) -> &str;

    /// Render the current state as wire ready series.
    fn render_snapshot(
        &self,
        flush_time: DateTime<Utc>,
        resource: &Arc<MonitoredResource>,
    ) -> Vec<TimeSeries>;

    /// Drop interval scoped state. Must take effect before returning.
    fn interval_reset(&self);

    /// Render then reset, with no mutation able to land in between.
    ///
    /// Implementations keeping interval scoped state should override this to
    /// do both under the same lock.
    fn collect(
        &self,
        flush_time: DateTime<Utc>,
        resource: &Arc<MonitoredResource>,
    ) -> Vec<TimeSeries> {
        let series = self.render_snapshot(flush_time, resource);
        self.interval_reset();
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name() {
        assert_eq!(
            MetricName::from_str("").unwrap_err(),
            ConfigError::EmptyMetricName
        );
        let name = MetricName::from_str("num_requests").unwrap();
        assert_eq!(name.as_str(), "num_requests");
        assert_eq!(
            name.metric_type(DEFAULT_METRIC_TYPE_PREFIX).as_ref(),
            "custom.googleapis.com/num_requests"
        );
    }
}
