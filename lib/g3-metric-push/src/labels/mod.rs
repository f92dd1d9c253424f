/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use indexmap::IndexMap;
use indexmap::map::Entry;
use yaml_rust::Yaml;

use crate::DataError;

mod combine;
pub use combine::combinations;

mod key;
pub use key::LabelKey;

/// A concrete label assignment, one value per label name.
///
/// Insertion order is kept for rendering, but equality and identity
/// ignore it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSet {
    inner: IndexMap<String, String>,
}

impl LabelSet {
    pub fn new() -> Self {
        LabelSet::default()
    }

    pub fn with<T: AsRef<str>>(mut self, name: &str, value: T) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<T: AsRef<str>>(&mut self, name: &str, value: T) {
        self.inner
            .insert(name.to_string(), value.as_ref().to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(|v| v.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn key(&self) -> LabelKey {
        LabelKey::new(Some(self))
    }
}

impl<K, V> FromIterator<(K, V)> for LabelSet
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = LabelSet::default();
        for (k, v) in iter {
            set.insert(k.as_ref(), v);
        }
        set
    }
}

/// Candidate values for each label, used to pre-seed metric points.
///
/// Every label must have at least one value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSpec {
    inner: IndexMap<String, Vec<String>>,
}

impl LabelSpec {
    pub fn new() -> Self {
        LabelSpec::default()
    }

    pub fn with_label<I, T>(mut self, name: &str, values: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.add_label(name, values)?;
        Ok(self)
    }

    pub fn add_label<I, T>(&mut self, name: &str, values: I) -> Result<(), DataError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if name.is_empty() {
            return Err(DataError::EmptyLabelName);
        }
        let values: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        if values.is_empty() {
            return Err(DataError::EmptyLabelValues(name.to_string()));
        }
        match self.inner.entry(name.to_string()) {
            Entry::Occupied(_) => Err(DataError::DuplicateLabel(name.to_string())),
            Entry::Vacant(v) => {
                v.insert(values);
                Ok(())
            }
        }
    }

    /// Parse a YAML map of label name to a list of scalar values.
    pub fn parse_yaml(v: &Yaml) -> Result<Self, DataError> {
        let Yaml::Hash(map) = v else {
            return Err(DataError::NotAMap);
        };

        let mut spec = LabelSpec::default();
        for (k, v) in map {
            let Yaml::String(name) = k else {
                return Err(DataError::InvalidLabelName);
            };
            let Yaml::Array(seq) = v else {
                return Err(DataError::NotAList(name.to_string()));
            };
            let mut values = Vec::with_capacity(seq.len());
            for v in seq {
                let value = match v {
                    Yaml::String(s) => s.to_string(),
                    Yaml::Integer(i) => i.to_string(),
                    Yaml::Real(s) => s.to_string(),
                    Yaml::Boolean(b) => b.to_string(),
                    _ => return Err(DataError::InvalidLabelValue(name.to_string())),
                };
                values.push(value);
            }
            spec.add_label(name, values)?;
        }
        Ok(spec)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The number of label sets the cartesian product will produce.
    pub fn combination_count(&self) -> usize {
        if self.inner.is_empty() {
            return 0;
        }
        self.inner.values().map(|v| v.len()).product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    #[test]
    fn label_set_eq() {
        let a = LabelSet::new().with("method", "GET").with("code", "200");
        let b = LabelSet::new().with("code", "200").with("method", "GET");
        assert_eq!(a, b);
        assert_eq!(a.get("code"), Some("200"));
        assert_eq!(a.iter().next(), Some(("method", "GET")));
    }

    #[test]
    fn spec_reject() {
        assert_eq!(
            LabelSpec::new().with_label("", ["a"]).unwrap_err(),
            DataError::EmptyLabelName
        );
        assert_eq!(
            LabelSpec::new()
                .with_label("code", Vec::<String>::new())
                .unwrap_err(),
            DataError::EmptyLabelValues("code".to_string())
        );
        assert_eq!(
            LabelSpec::new()
                .with_label("code", ["2xx"])
                .unwrap()
                .with_label("code", ["3xx"])
                .unwrap_err(),
            DataError::DuplicateLabel("code".to_string())
        );
    }

    #[test]
    fn spec_count() {
        let spec = LabelSpec::new()
            .with_label("code", ["2xx", "3xx", "4xx"])
            .unwrap()
            .with_label("method", ["GET", "POST"])
            .unwrap();
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.combination_count(), 6);
        assert_eq!(LabelSpec::new().combination_count(), 0);
    }

    #[test]
    fn spec_yaml() {
        let docs = YamlLoader::load_from_str("code: [2xx, 3xx]\nshard: [1, 2]").unwrap();
        let spec = LabelSpec::parse_yaml(&docs[0]).unwrap();
        let mut iter = spec.iter();
        let (name, values) = iter.next().unwrap();
        assert_eq!(name, "code");
        assert_eq!(values, ["2xx", "3xx"]);
        let (name, values) = iter.next().unwrap();
        assert_eq!(name, "shard");
        assert_eq!(values, ["1", "2"]);

        let docs = YamlLoader::load_from_str("code: 2xx").unwrap();
        assert_eq!(
            LabelSpec::parse_yaml(&docs[0]).unwrap_err(),
            DataError::NotAList("code".to_string())
        );

        let docs = YamlLoader::load_from_str("- a").unwrap();
        assert_eq!(
            LabelSpec::parse_yaml(&docs[0]).unwrap_err(),
            DataError::NotAMap
        );
    }
}
