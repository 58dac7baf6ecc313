use serde::Serialize;

/// Ordered column names of a sheet. The order is the display and export order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.columns
    }

    // Callers check for duplicates; import headers bypass the check.
    pub(crate) fn push(&mut self, name: String) {
        self.columns.push(name);
    }
}

impl FromIterator<String> for Schema {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for Schema {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
