//! Row containers handed to plotting and reporting collaborators.

use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Display},
    ops::Deref,
};

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(u64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Numeric view of the cell; `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            Value::Text(_) => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => Display::fmt(v, f),
            Value::Real(v) => Display::fmt(v, f),
            Value::Text(v) => f.write_str(v),
        }
    }
}

/// A row whose cells are addressable by column name.
pub trait Record {
    /// Column names, in display order.
    const COLUMNS: &'static [&'static str];

    /// Value of the cell in `column`, or `None` if there is no such column.
    fn value(&self, column: &str) -> Option<Value>;

    /// All cells of the row keyed by column name.
    fn to_map(&self) -> BTreeMap<&'static str, Value> {
        Self::COLUMNS
            .iter()
            .filter_map(|c| self.value(c).map(|v| (*c, v)))
            .collect()
    }
}

/// Ordered rows; dereferences to a slice, so rows are addressable by index.
#[derive(Clone, PartialEq)]
pub struct Table<R>(Vec<R>);

impl<R> Table<R> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, row: R) {
        self.0.push(row);
    }

    /// Appends the rows of `other` after the rows of `self`.
    pub fn extend(&mut self, other: Table<R>) {
        self.0.extend(other.0);
    }

    /// Concatenates tables in the given order.
    pub fn concat(tables: impl IntoIterator<Item = Table<R>>) -> Self {
        let mut acc = Self::new();
        for t in tables {
            acc.extend(t);
        }
        acc
    }

    /// Returns a new table with the rows of `self` satisfying `pred`, in their original order.
    pub fn filter(&self, mut pred: impl FnMut(&R) -> bool) -> Self
    where
        R: Clone,
    {
        self.0.iter().filter(|r| pred(r)).cloned().collect()
    }

    pub fn into_rows(self) -> Vec<R> {
        self.0
    }
}

impl<R: Record> Table<R> {
    /// Values of `column` for all rows, or `None` if `R` has no such column.
    pub fn column(&self, column: &str) -> Option<Vec<Value>> {
        if !R::COLUMNS.contains(&column) {
            return None;
        }
        self.0.iter().map(|r| r.value(column)).collect()
    }
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Debug> Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl<R> From<Vec<R>> for Table<R> {
    fn from(value: Vec<R>) -> Self {
        Self(value)
    }
}

impl<R> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<R> Deref for Table<R> {
    type Target = [R];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<R> IntoIterator for Table<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
