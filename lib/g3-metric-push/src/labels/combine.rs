/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use super::{LabelSet, LabelSpec};

/// Expand a label specification into the cartesian product of its values.
///
/// The first label varies slowest. An empty specification yields no label
/// set at all, which is different from the single no-labels point a metric
/// gets when it has no specification.
pub fn combinations(spec: &LabelSpec) -> Vec<LabelSet> {
    if spec.is_empty() {
        return Vec::new();
    }

    let mut result = vec![LabelSet::default()];
    for (name, values) in spec.iter() {
        let mut next = Vec::with_capacity(result.len() * values.len());
        for prefix in &result {
            for value in values {
                let mut set = prefix.clone();
                set.insert(name, value);
                next.push(set);
            }
        }
        result = next;
    }
    result
}
