/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

mod fixed;
pub use fixed::StaticResourceProvider;

mod global;
pub use global::GlobalResourceProvider;

pub const RESOURCE_LABEL_PROJECT_ID: &str = "project_id";

/// The monitored resource all pushed series are attached to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitoredResource {
    r#type: String,
    labels: BTreeMap<String, String>,
}

impl MonitoredResource {
    pub fn new(r#type: &str) -> Self {
        MonitoredResource {
            r#type: r#type.to_string(),
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label<T: AsRef<str>>(mut self, name: &str, value: T) -> Self {
        self.labels
            .insert(name.to_string(), value.as_ref().to_string());
        self
    }

    #[inline]
    pub fn r#type(&self) -> &str {
        &self.r#type
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(|v| v.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn project_id(&self) -> Option<&str> {
        self.label(RESOURCE_LABEL_PROJECT_ID)
            .filter(|id| !id.is_empty())
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(2);
        map.insert("type".to_string(), Value::String(self.r#type.clone()));
        let labels: Map<String, Value> = self
            .labels
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        map.insert("labels".to_string(), Value::Object(labels));
        Value::Object(map)
    }
}

/// What a resource provider hands out: the descriptor for regular flushes,
/// and optionally a distinct one for the final flush at shutdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceSet {
    default: Arc<MonitoredResource>,
    exit: Option<Arc<MonitoredResource>>,
}

impl ResourceSet {
    pub fn single(resource: MonitoredResource) -> Self {
        ResourceSet {
            default: Arc::new(resource),
            exit: None,
        }
    }

    pub fn with_exit(default: MonitoredResource, exit: MonitoredResource) -> Self {
        ResourceSet {
            default: Arc::new(default),
            exit: Some(Arc::new(exit)),
        }
    }

    #[inline]
    pub fn default_resource(&self) -> &Arc<MonitoredResource> {
        &self.default
    }

    /// The exit variant, or the default one if the provider has none.
    pub fn exit_resource(&self) -> &Arc<MonitoredResource> {
        self.exit.as_ref().unwrap_or(&self.default)
    }
}

/// Supplies the deployment identity. Called once by the push scheduler, the
/// result is cached for its whole lifetime.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<ResourceSet>;
}
