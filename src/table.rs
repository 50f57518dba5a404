//! Provides [`ParamTable`] and [`ParamRecord`].
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The max count of records which the loader accepts.
pub const MAX_PARAMS: usize = 400_000;

/// The parameter record, single line of par-formatted data.
///
/// We emphasize that the unit of `db` and `dl` is \[sec\], not \[deg\].
///
/// # Example
///
/// ```
/// # use tky2jgd::*;
/// let record = ParamRecord::new(54401027, 11.49105, -11.80078);
/// assert_eq!(record.code, 54401027);
/// assert_eq!(record.db, 11.49105);
/// assert_eq!(record.dl, -11.80078);
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParamRecord {
    /// The meshcode
    pub code: u32,
    /// The latitude parameter \[sec\]
    pub db: f64,
    /// The longitude parameter \[sec\]
    pub dl: f64,
}

impl From<(u32, f64, f64)> for ParamRecord {
    #[inline]
    fn from(value: (u32, f64, f64)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<(u32, (f64, f64))> for ParamRecord {
    #[inline]
    fn from(value: (u32, (f64, f64))) -> Self {
        Self::new(value.0, value.1 .0, value.1 .1)
    }
}

impl ParamRecord {
    /// Makes a [`ParamRecord`].
    #[inline]
    pub const fn new(code: u32, db: f64, dl: f64) -> Self {
        Self { code, db, dl }
    }
}

/// The parameter table, a deserializing result of par-formatted data.
///
/// The records are sorted by meshcode in ascending order without duplicates,
/// and the table is immutable after construction.
/// Hence, it is safe to share the table between threads without locking.
///
/// There is a builder, see [`ParamTableBuilder`](crate::ParamTableBuilder).
///
/// # Example
///
/// ```
/// # use tky2jgd::*;
/// let table = ParamTable::new(vec![
///     ParamRecord::new(54401037, 11.48732, -11.80198),
///     ParamRecord::new(54401027, 11.49105, -11.80078),
///     // duplicated, the first one wins
///     ParamRecord::new(54401027, 0.0, 0.0),
/// ]);
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.lookup(54401027), Some(0));
/// assert_eq!(table.at(0), &ParamRecord::new(54401027, 11.49105, -11.80078));
/// assert_eq!(table.lookup(54401028), None);
/// ```
#[derive(Debug, PartialEq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ParamTableRepr"))]
pub struct ParamTable {
    records: Box<[ParamRecord]>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    description: Option<String>,
}

impl ParamTable {
    /// Makes a [`ParamTable`].
    ///
    /// This sorts `records` by meshcode and drops later duplicates,
    /// that is, the first record of each meshcode is kept.
    pub fn new(mut records: Vec<ParamRecord>) -> Self {
        // stable, keeps the order of duplicates
        records.sort_by_key(|record| record.code);
        records.dedup_by_key(|record| record.code);

        Self {
            records: records.into_boxed_slice(),
            description: None,
        }
    }

    /// Makes a [`ParamTable`] with [`description`](ParamTable::description).
    ///
    /// See [`ParamTable::new`].
    pub fn with_description(records: Vec<ParamRecord>, description: String) -> Self {
        Self {
            description: Some(description),
            ..Self::new(records)
        }
    }

    /// Returns the index of the record of `code`.
    ///
    /// This is a binary search, `O(log n)`.
    #[inline]
    pub fn lookup(&self, code: u32) -> Option<usize> {
        let index = self.records.partition_point(|record| record.code < code);
        match self.records.get(index) {
            Some(record) if record.code == code => Some(index),
            _ => None,
        }
    }

    /// Returns the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds, as the slice indexing does.
    #[inline]
    pub fn at(&self, index: usize) -> &ParamRecord {
        &self.records[index]
    }

    /// Returns the record of `code`.
    ///
    /// ```
    /// # use tky2jgd::*;
    /// let table = ParamTable::new(vec![ParamRecord::new(54401027, 11.49105, -11.80078)]);
    /// assert_eq!(table.get(54401027).map(|r| r.db), Some(11.49105));
    /// assert_eq!(table.get(54401028), None);
    /// ```
    #[inline]
    pub fn get(&self, code: u32) -> Option<&ParamRecord> {
        self.lookup(code).map(|index| self.at(index))
    }

    /// Returns the count of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no record.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records sorted by meshcode.
    #[inline]
    pub fn records(&self) -> &[ParamRecord] {
        &self.records
    }

    /// Returns an iterator over the records in meshcode order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ParamRecord> {
        self.records.iter()
    }

    /// Returns the description, or the header of par-formatted data.
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl<'a> IntoIterator for &'a ParamTable {
    type Item = &'a ParamRecord;
    type IntoIter = std::slice::Iter<'a, ParamRecord>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ParamRecord> for ParamTable {
    fn from_iter<T: IntoIterator<Item = ParamRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Deserialized form of [`ParamTable`], the records may be unsorted.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct ParamTableRepr {
    records: Vec<ParamRecord>,
    #[serde(default)]
    description: Option<String>,
}

#[cfg(feature = "serde")]
impl From<ParamTableRepr> for ParamTable {
    fn from(value: ParamTableRepr) -> Self {
        match value.description {
            Some(description) => Self::with_description(value.records, description),
            None => Self::new(value.records),
        }
    }
}
