/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use async_trait::async_trait;

use super::{MonitoredResource, RESOURCE_LABEL_PROJECT_ID, ResourceProvider, ResourceSet};
use crate::ConfigError;

const RESOURCE_TYPE: &str = "global";
const ENV_PROJECT_ID: &str = "PROJECT_ID";
const NODE_ID_LEN: usize = 11;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A `global` resource for a process that has no platform metadata.
///
/// Each provider gets a random node id, the exit variant appends `-exit` to
/// it so the final flush does not overwrite points of a successor process.
pub struct GlobalResourceProvider {
    project_id: String,
    node_id: String,
}

impl GlobalResourceProvider {
    pub fn new(project_id: &str) -> Result<Self, ConfigError> {
        if project_id.is_empty() {
            return Err(ConfigError::NoProjectId);
        }
        Ok(GlobalResourceProvider {
            project_id: project_id.to_string(),
            node_id: random_node_id(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = std::env::var(ENV_PROJECT_ID).map_err(|_| ConfigError::NoProjectId)?;
        GlobalResourceProvider::new(&project_id)
    }

    #[inline]
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    fn build(&self, node_id: &str) -> MonitoredResource {
        MonitoredResource::new(RESOURCE_TYPE)
            .with_label(RESOURCE_LABEL_PROJECT_ID, &self.project_id)
            .with_label("node_id", node_id)
            .with_label("location", "global")
            .with_label("namespace", "na")
    }
}

#[async_trait]
impl ResourceProvider for GlobalResourceProvider {
    async fn fetch(&self) -> anyhow::Result<ResourceSet> {
        let exit_node_id = format!("{}-exit", self.node_id);
        Ok(ResourceSet::with_exit(
            self.build(&self.node_id),
            self.build(&exit_node_id),
        ))
    }
}

fn random_node_id() -> String {
    (0..NODE_ID_LEN)
        .map(|_| BASE36[fastrand::usize(..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn labels() {
        let provider = GlobalResourceProvider::new("myproject").unwrap();
        let set = provider.fetch().await.unwrap();

        let r = set.default_resource();
        assert_eq!(r.r#type(), "global");
        assert_eq!(r.project_id(), Some("myproject"));
        assert_eq!(r.label("location"), Some("global"));
        assert_eq!(r.label("namespace"), Some("na"));
        let node_id = r.label("node_id").unwrap();
        assert_eq!(node_id.len(), NODE_ID_LEN);
        assert_eq!(node_id, provider.node_id());

        let exit = set.exit_resource();
        assert_eq!(exit.label("node_id"), Some(format!("{node_id}-exit").as_str()));
        assert_eq!(exit.project_id(), Some("myproject"));
    }

    #[test]
    fn no_project_id() {
        assert_eq!(
            GlobalResourceProvider::new("").err(),
            Some(ConfigError::NoProjectId)
        );
    }

    #[test]
    fn node_id() {
        let id = random_node_id();
        assert_eq!(id.len(), NODE_ID_LEN);
        assert!(id.bytes().all(|c| BASE36.contains(&c)));
    }
}
