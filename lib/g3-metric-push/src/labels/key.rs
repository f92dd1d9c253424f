/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use super::LabelSet;

// a JSON object always starts with '{', so this can never collide
const NO_LABELS: &str = "no-labels";

/// Canonical identity of a label assignment.
///
/// Two label sets with the same name/value pairs map to the same key in
/// whatever order they were built.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelKey(String);

impl LabelKey {
    pub fn new(labels: Option<&LabelSet>) -> Self {
        let Some(labels) = labels else {
            return LabelKey::no_labels();
        };

        let sorted: BTreeMap<&str, &str> = labels.iter().collect();
        let map: Map<String, Value> = sorted
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        LabelKey(Value::Object(map).to_string())
    }

    pub fn no_labels() -> Self {
        LabelKey(NO_LABELS.to_string())
    }

    #[inline]
    pub fn is_no_labels(&self) -> bool {
        self.0 == NO_LABELS
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
