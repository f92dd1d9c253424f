/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, YamlLoader, yaml};

use crate::ConfigError;
use crate::metric::DEFAULT_METRIC_TYPE_PREFIX;

mod value;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);
const MINIMAL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_SERIES_PER_REQUEST: usize = 200;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(40);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushClientConfig {
    interval: Duration,
    destination: Option<String>,
    max_series_per_request: usize,
    metric_type_prefix: String,
    request_timeout: Duration,
}

impl Default for PushClientConfig {
    fn default() -> Self {
        PushClientConfig::new()
    }
}

impl PushClientConfig {
    pub fn new() -> Self {
        PushClientConfig {
            interval: DEFAULT_INTERVAL,
            destination: None,
            max_series_per_request: DEFAULT_MAX_SERIES_PER_REQUEST,
            metric_type_prefix: DEFAULT_METRIC_TYPE_PREFIX.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_destination(mut self, destination: &str) -> Self {
        self.destination = Some(destination.to_string());
        self
    }

    pub fn with_project_id(self, project_id: &str) -> Self {
        self.with_destination(&format!("projects/{project_id}"))
    }

    pub fn with_max_series_per_request(mut self, max: usize) -> Self {
        self.max_series_per_request = max;
        self
    }

    pub fn with_metric_type_prefix(mut self, prefix: &str) -> Self {
        self.metric_type_prefix = prefix.to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    #[inline]
    pub fn max_series_per_request(&self) -> usize {
        self.max_series_per_request
    }

    #[inline]
    pub fn metric_type_prefix(&self) -> &str {
        &self.metric_type_prefix
    }

    #[inline]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        if self.interval < MINIMAL_INTERVAL {
            return Err(ConfigError::IntervalTooShort(self.interval));
        }
        if self.max_series_per_request == 0 {
            return Err(ConfigError::InvalidRequestSize);
        }
        Ok(())
    }

    pub fn parse_yaml(map: &yaml::Hash) -> anyhow::Result<Self> {
        let mut config = PushClientConfig::new();
        value::foreach_kv(map, |k, v| config.set(k, v))?;
        config.check()?;
        Ok(config)
    }

    /// Load from a YAML document whose root is a map.
    pub fn load_str(s: &str) -> anyhow::Result<Self> {
        let docs = YamlLoader::load_from_str(s).context("invalid yaml document")?;
        match docs.first() {
            Some(Yaml::Hash(map)) => PushClientConfig::parse_yaml(map),
            Some(_) => Err(anyhow!("root value should be a map")),
            None => Ok(PushClientConfig::new()),
        }
    }

    fn set(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match value::normalize(k).as_str() {
            "interval" | "emit_interval" => {
                self.interval = value::as_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
                Ok(())
            }
            "destination" => {
                let destination =
                    value::as_string(v).context(format!("invalid string value for key {k}"))?;
                self.destination = Some(destination);
                Ok(())
            }
            "project_id" => {
                let project_id =
                    value::as_string(v).context(format!("invalid string value for key {k}"))?;
                if project_id.is_empty() {
                    return Err(anyhow!("empty project id"));
                }
                self.destination = Some(format!("projects/{project_id}"));
                Ok(())
            }
            "max_series_per_request" => {
                self.max_series_per_request =
                    value::as_usize(v).context(format!("invalid usize value for key {k}"))?;
                Ok(())
            }
            "metric_type_prefix" => {
                self.metric_type_prefix =
                    value::as_string(v).context(format!("invalid string value for key {k}"))?;
                Ok(())
            }
            "request_timeout" => {
                self.request_timeout = value::as_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        }
    }
}
