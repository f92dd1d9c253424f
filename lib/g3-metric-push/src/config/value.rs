/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use humanize_rs::ParseError;
use yaml_rust::{Yaml, yaml};

/// Call `f` on every entry of a push client config map.
pub(super) fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    table.iter().try_for_each(|(k, v)| {
        let Yaml::String(key) = k else {
            return Err(anyhow!("config keys should be strings, got {k:?}"));
        };
        f(key, v).context(format!("bad push client config entry {key}"))
    })
}

/// Config keys are case insensitive, and `-` is the same as `_`.
pub(super) fn normalize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c == '-' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

/// Either a humanized duration like `1m30s`, or a plain number of seconds.
pub(super) fn as_duration(v: &Yaml) -> anyhow::Result<Duration> {
    let secs = match v {
        Yaml::String(s) => match humanize_rs::duration::parse(s) {
            Ok(d) => return Ok(d),
            Err(ParseError::MissingUnit) => {
                u64::from_str(s).map_err(|_| anyhow!("{s} is not a duration"))?
            }
            Err(e) => return Err(anyhow!("{s} is not a duration: {e}")),
        },
        Yaml::Integer(i) => {
            u64::try_from(*i).map_err(|_| anyhow!("duration {i} is negative"))?
        }
        _ => return Err(anyhow!("a duration should be a string or an integer")),
    };
    Ok(Duration::from_secs(secs))
}

pub(super) fn as_usize(v: &Yaml) -> anyhow::Result<usize> {
    match v {
        Yaml::Integer(i) => usize::try_from(*i).map_err(|_| anyhow!("{i} is out of range")),
        Yaml::String(s) => usize::from_str(s).map_err(|e| anyhow!("{s} is not a count: {e}")),
        _ => Err(anyhow!("a count should be an integer")),
    }
}

pub(super) fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Integer(i) => Ok(i.to_string()),
        _ => Err(anyhow!("a string value is required")),
    }
}
