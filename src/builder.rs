use crate::{ParamRecord, ParamTable};

/// The builder of [`ParamTable`].
///
/// The records may be added in any order,
/// [`build`](ParamTableBuilder::build) sorts them and keeps the first record of each meshcode.
///
/// # Example
///
/// ```
/// # use tky2jgd::*;
/// #
/// // from TKY2JGD.par
/// let table: ParamTable = ParamTableBuilder::new()
///     .records([
///         (54401037, (11.48732, -11.80198)),
///         (54401027, (11.49105, -11.80078)),
///     ])
///     .description("My parameter".to_string())
///     .build();
///
/// assert_eq!(
///     table.records(),
///     &[
///         ParamRecord::new(54401027, 11.49105, -11.80078),
///         ParamRecord::new(54401037, 11.48732, -11.80198),
///     ]
/// );
/// assert_eq!(table.description(), Some("My parameter"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ParamTableBuilder {
    records: Vec<ParamRecord>,
    description: Option<String>,
}

impl ParamTableBuilder {
    /// Makes a [`ParamTableBuilder`].
    ///
    /// # Example
    ///
    /// ```
    /// # use tky2jgd::*;
    /// #
    /// let table = ParamTableBuilder::new().build();
    ///
    /// assert!(table.is_empty());
    /// assert_eq!(table.description(), None);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            description: None,
        }
    }

    /// Makes a [`ParamTableBuilder`] with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            description: None,
        }
    }

    /// Updates [`description`](ParamTable::description).
    #[inline]
    pub fn description(mut self, s: String) -> Self {
        self.description = Some(s);
        self
    }

    /// Adds a record, `parameter` is `(db, dl)` in \[sec\].
    ///
    /// # Example
    ///
    /// ```
    /// # use tky2jgd::*;
    /// #
    /// let table = ParamTableBuilder::new()
    ///     .record(54401027, (11.49105, -11.80078))
    ///     .build();
    ///
    /// assert_eq!(table.get(54401027), Some(&ParamRecord::new(54401027, 11.49105, -11.80078)));
    /// ```
    #[inline]
    pub fn record(mut self, code: u32, parameter: (f64, f64)) -> Self {
        self.records.push((code, parameter).into());
        self
    }

    /// Adds records.
    ///
    /// See [`ParamTableBuilder::record`].
    #[inline]
    pub fn records(mut self, records: impl IntoIterator<Item = (u32, (f64, f64))>) -> Self {
        self.records
            .extend(records.into_iter().map(ParamRecord::from));
        self
    }

    /// Builds [`ParamTable`].
    #[inline]
    pub fn build(self) -> ParamTable {
        match self.description {
            Some(description) => ParamTable::with_description(self.records, description),
            None => ParamTable::new(self.records),
        }
    }
}

impl Extend<ParamRecord> for ParamTableBuilder {
    fn extend<T: IntoIterator<Item = ParamRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_impl() {
        let table = ParamTableBuilder::new()
            .record(54401011, (4.0, 40.0))
            .record(54401000, (1.0, 10.0))
            .records([(54401010, (3.0, 30.0)), (54401001, (2.0, 20.0))])
            // ignored, 54401000 is already added
            .record(54401000, (-1.0, -10.0))
            .build();

        assert_eq!(
            table.records(),
            &[
                ParamRecord::new(54401000, 1.0, 10.0),
                ParamRecord::new(54401001, 2.0, 20.0),
                ParamRecord::new(54401010, 3.0, 30.0),
                ParamRecord::new(54401011, 4.0, 40.0),
            ]
        );
        assert_eq!(table.description(), None);
    }

    #[test]
    fn test_extend() {
        let mut builder = ParamTableBuilder::with_capacity(2);
        builder.extend([
            ParamRecord::new(2, 0.0, 0.0),
            ParamRecord::new(1, 0.0, 0.0),
        ]);
        let table = builder.description("header".to_string()).build();

        assert_eq!(table.len(), 2);
        assert_eq!(table.at(0).code, 1);
        assert_eq!(table.description(), Some("header"));
    }
}
