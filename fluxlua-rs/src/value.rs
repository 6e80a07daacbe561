//! Host-side value records.
//!
//! Every value read out of a script is either a scalar, carried as both a
//! string and a number, or a table of `(key, Value)` entries.  Table-ness
//! is a property of the type: there is no sentinel to check before
//! dropping a value.
//!
//! The flat "header chain" form, where element 0 of a sequence carries the
//! `"_TABLE"` tag and the entry count, is still available through
//! [`Variable::to_records`] for hosts that want a single contiguous array.

use std::fmt;

use crate::error::{Error, Result};
use crate::number::parse_number;

/// Tag carried in the string slot of a table header record.
pub const TABLE_TAG: &str = "_TABLE";

// ── Value ─────────────────────────────────────────────────────────────────────

/// A materialized script value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A leaf value in its dual representation.
    Scalar { str: String, num: f64 },
    /// Table entries in the interpreter's iteration order.
    Table(Vec<(String, Value)>),
}

impl Value {
    /// Build a scalar from its string form; `num` is the best-effort parse.
    pub fn scalar(s: impl Into<String>) -> Self {
        let str: String = s.into();
        let num = parse_number(&str);
        Value::Scalar { str, num }
    }

    /// Canonical boolean encoding: `("1", 1.0)` or `("0", 0.0)`.
    pub fn boolean(b: bool) -> Self {
        Value::scalar(if b { "1" } else { "0" })
    }

    /// String form.  Tables report the [`TABLE_TAG`].
    pub fn str(&self) -> &str {
        match self {
            Value::Scalar { str, .. } => str,
            Value::Table(_) => TABLE_TAG,
        }
    }

    /// Numeric form.  Tables report their entry count.
    pub fn num(&self) -> f64 {
        match self {
            Value::Scalar { num, .. } => *num,
            Value::Table(entries) => entries.len() as f64,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// `"table"` or `"scalar"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar { .. } => "scalar",
            Value::Table(_) => "table",
        }
    }

    /// Entries of a table; empty for a scalar.
    pub fn entries(&self) -> &[(String, Value)] {
        match self {
            Value::Table(entries) => entries,
            Value::Scalar { .. } => &[],
        }
    }

    /// Number of direct entries (0 for a scalar).
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Look up a direct entry by its stringified key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Overwrite with a new scalar value.  Only this in-memory record
    /// changes; the script is never written back to.  A table is replaced
    /// by the scalar.
    pub fn set(&mut self, value: &str) {
        *self = Value::scalar(value);
    }

    /// Number of header-chain records this value occupies: 1 for a
    /// scalar, 1 + the span of every entry for a table.
    pub fn span(&self) -> usize {
        match self {
            Value::Scalar { .. } => 1,
            Value::Table(entries) => 1 + entries.iter().map(|(_, v)| v.span()).sum::<usize>(),
        }
    }

    fn push_records(&self, name: &str, out: &mut Vec<Record>) {
        out.push(Record {
            name: name.to_owned(),
            str: self.str().to_owned(),
            num: self.num(),
        });
        for (key, value) in self.entries() {
            value.push_records(key, out);
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar { str, .. } => f.write_str(str),
            Value::Table(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} = {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::scalar(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::scalar(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::boolean(b)
    }
}

// ── Variable ──────────────────────────────────────────────────────────────────

/// A resolved value together with the path it was resolved from.
///
/// Owns all of its data; it holds no reference back to the script or the
/// interpreter and can outlive both.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: Value,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self { name: name.into(), value }
    }

    pub fn str(&self) -> &str {
        self.value.str()
    }

    pub fn num(&self) -> f64 {
        self.value.num()
    }

    pub fn is_table(&self) -> bool {
        self.value.is_table()
    }

    /// SetValue: replace the in-memory string and number.
    pub fn set(&mut self, value: &str) {
        self.value.set(value);
    }

    /// Flatten into the header-chain encoding.
    ///
    /// A scalar yields one record.  A table yields its header
    /// `{name, "_TABLE", N}` followed by each entry's records; a nested
    /// table entry is itself a header followed by its own span.
    ///
    /// `N` counts direct entries only.  It equals the number of records
    /// after the header just for flat tables; when an entry is a nested
    /// table, a consumer walking the chain must skip that entry's whole
    /// span ([`Value::span`]) to reach the next sibling.
    pub fn to_records(&self) -> Vec<Record> {
        let mut out = Vec::with_capacity(self.value.span());
        self.value.push_records(&self.name, &mut out);
        out
    }

    /// Release a scalar.  Returns [`Error::TagMismatch`] if the variable is
    /// a table.
    pub fn release_scalar(self) -> Result<()> {
        match self.value {
            Value::Scalar { .. } => Ok(()),
            Value::Table(_) => Err(Error::TagMismatch { expected: "scalar", found: "table" }),
        }
    }

    /// Release a table.  Returns [`Error::TagMismatch`] for a scalar.
    pub fn release_table(self) -> Result<()> {
        match self.value {
            Value::Table(_) => Ok(()),
            Value::Scalar { .. } => Err(Error::TagMismatch { expected: "table", found: "scalar" }),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

// ── Record ────────────────────────────────────────────────────────────────────

/// One element of the flat header-chain encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub str: String,
    pub num: f64,
}

impl Record {
    pub fn is_table_header(&self) -> bool {
        self.str == TABLE_TAG
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.name, self.str, self.num)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, Value)]) -> Value {
        Value::Table(entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    #[test]
    fn scalar_dual_representation() {
        let v = Value::scalar("36.7");
        assert_eq!(v.str(), "36.7");
        assert_eq!(v.num(), 36.7);

        let v = Value::scalar("apple");
        assert_eq!(v.str(), "apple");
        assert_eq!(v.num(), 0.0);
    }

    #[test]
    fn booleans_are_canonical() {
        assert_eq!(Value::boolean(true), Value::Scalar { str: "1".into(), num: 1.0 });
        assert_eq!(Value::boolean(false), Value::Scalar { str: "0".into(), num: 0.0 });
        assert_eq!(Value::from(true).str(), "1");
    }

    #[test]
    fn table_reports_tag_and_count() {
        let t = table(&[("1", "10".into()), ("2", "20".into())]);
        assert_eq!(t.str(), TABLE_TAG);
        assert_eq!(t.num(), 2.0);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get("2").map(Value::num), Some(20.0));
        assert!(t.get("3").is_none());
    }

    #[test]
    fn set_updates_both_forms() {
        let mut var = Variable::new("x", Value::scalar("1"));
        var.set("2.5");
        assert_eq!(var.str(), "2.5");
        assert_eq!(var.num(), 2.5);

        var.set("hello");
        assert_eq!(var.num(), 0.0);
    }

    #[test]
    fn set_replaces_table() {
        let mut var = Variable::new("t", table(&[("a", "1".into())]));
        var.set("7");
        assert!(!var.is_table());
        assert_eq!(var.num(), 7.0);
    }

    #[test]
    fn records_of_scalar() {
        let var = Variable::new("global_number", Value::scalar("10"));
        let recs = var.to_records();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "global_number");
        assert!(!recs[0].is_table_header());
    }

    #[test]
    fn records_of_nested_table() {
        let inner = table(&[("1", "A".into()), ("2", "B".into())]);
        let outer = table(&[("x", "1".into()), ("inner", inner), ("y", true.into())]);
        let var = Variable::new("outer", outer);
        let recs = var.to_records();

        assert_eq!(recs.len(), var.value.span());
        assert_eq!(recs.len(), 6);
        assert!(recs[0].is_table_header());
        assert_eq!(recs[0].num, 3.0);
        assert_eq!(recs[1].name, "x");
        assert!(recs[2].is_table_header());
        assert_eq!(recs[2].name, "inner");
        assert_eq!(recs[2].num, 2.0);
        assert_eq!(recs[3].str, "A");
        assert_eq!(recs[4].str, "B");
        assert_eq!(recs[5].name, "y");
        assert_eq!(recs[5].num, 1.0);

        // header count is direct entries; the chain holds the nested spans too
        let spans: usize = var.value.entries().iter().map(|(_, v)| v.span()).sum();
        assert_eq!(recs[0].num as usize, var.value.len());
        assert_eq!(recs.len() - 1, spans);
        assert_ne!(recs[0].num as usize, recs.len() - 1);
    }

    #[test]
    fn release_checks_tag() {
        let scalar = Variable::new("s", Value::scalar("1"));
        let tbl = Variable::new("t", table(&[]));
        assert!(scalar.clone().release_scalar().is_ok());
        assert!(tbl.clone().release_table().is_ok());
        assert!(matches!(
            scalar.release_table(),
            Err(Error::TagMismatch { expected: "table", found: "scalar" })
        ));
        assert!(matches!(
            tbl.release_scalar(),
            Err(Error::TagMismatch { expected: "scalar", found: "table" })
        ));
    }

    #[test]
    fn display() {
        let t = table(&[("1", "10".into()), ("name", "bob".into())]);
        assert_eq!(t.to_string(), "{1 = 10, name = bob}");
        let var = Variable::new("t", t);
        assert_eq!(var.to_string(), "t = {1 = 10, name = bob}");
    }
}
