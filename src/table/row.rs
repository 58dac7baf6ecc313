use indexmap::IndexMap;
use serde::Serialize;

use crate::table::Schema;

/// One record of a sheet: column name to text value, in insertion order.
///
/// A row does not have to carry every schema column. Rows read from an import keep
/// exactly the fields the source line had, so lookups of a trailing column may yield
/// `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    values: IndexMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row holding every column of `schema`, each mapped to `""`.
    pub fn materialize(schema: &Schema) -> Self {
        let mut values = IndexMap::with_capacity(schema.len());
        for column in schema.iter() {
            values.insert(column.to_string(), String::new());
        }
        Self { values }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values in `schema` order; a column the row lacks yields `""`.
    pub fn values_in<'a>(&'a self, schema: &'a Schema) -> impl Iterator<Item = &'a str> + 'a {
        schema.iter().map(move |column| self.get(column).unwrap_or(""))
    }

    // Existing keys keep their position, new keys go last.
    pub(crate) fn set(&mut self, column: &str, value: String) {
        match self.values.get_mut(column) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(column.to_string(), value);
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
