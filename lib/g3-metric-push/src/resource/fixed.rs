/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use async_trait::async_trait;

use super::{MonitoredResource, ResourceProvider, ResourceSet};

pub struct StaticResourceProvider {
    resources: ResourceSet,
}

impl StaticResourceProvider {
    pub fn new(resources: ResourceSet) -> Self {
        StaticResourceProvider { resources }
    }

    pub fn single(resource: MonitoredResource) -> Self {
        StaticResourceProvider::new(ResourceSet::single(resource))
    }
}

#[async_trait]
impl ResourceProvider for StaticResourceProvider {
    async fn fetch(&self) -> anyhow::Result<ResourceSet> {
        Ok(self.resources.clone())
    }
}
