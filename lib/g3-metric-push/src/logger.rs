/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

/// Where the push scheduler reports its progress and delivery failures.
pub trait PushLogger: Send + Sync {
    fn debug(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Forwards to the `log` facade.
#[derive(Clone, Copy, Default)]
pub struct StdLogger {}

impl PushLogger for StdLogger {
    fn debug(&self, msg: &str) {
        log::debug!("{msg}");
    }

    fn error(&self, msg: &str) {
        log::error!("{msg}");
    }
}
