//! Provides [`Datum`], the parameter table loaded once and shared by all callers.
//!
//! The free functions [`load`], [`tokyo_to_jgd`] and [`jgd_to_tokyo`]
//! work on the process-wide [`Datum`], see [`global`].
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::par::Parser;
use crate::{Error, ParamTable, Position, Result};

static DATUM: Datum = Datum::new();

/// A handle of the parameter table, uninitialized or initialized.
///
/// The table is published once and never changes after that,
/// hence the transformations read it without locking.
/// The initialization is serialized by a mutex,
/// the second and later [`load`](Datum::load) are no-op.
///
/// # Example
///
/// ```no_run
/// # use std::error::Error;
/// use tky2jgd::{Datum, Position};
///
/// static TKY2JGD: Datum = Datum::new();
///
/// TKY2JGD.load("TKY2JGD.par")?;
///
/// let mut position = Position::from_degrees(36.103774791666666, 140.08785504166664, 0.0);
/// TKY2JGD.tokyo_to_jgd(&mut position)?;
/// // Prints JGD2000: (36.10696628160147, 140.08457686629436, 0.0)
/// println!("JGD2000: {:?}", position.to_degrees());
/// # Ok::<(), Box<dyn Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Datum {
    table: OnceLock<ParamTable>,
    init: Mutex<()>,
}

impl Datum {
    /// Makes an uninitialized [`Datum`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            table: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Loads the par file at `path` unless the table is already loaded.
    ///
    /// See [`Datum::load_with`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read,
    /// and [`Error::OutOfMemory`] when the record buffer cannot be allocated.
    #[inline]
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.load_with(&Parser::new(), path)
    }

    /// Loads the par file at `path` by `parser` unless the table is already loaded.
    ///
    /// When the table is already loaded, this returns [`Ok`]
    /// without opening the file. On [`Err`], the handle stays uninitialized
    /// and a later call retries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read,
    /// and [`Error::OutOfMemory`] when the record buffer cannot be allocated.
    pub fn load_with<P: AsRef<Path>>(&self, parser: &Parser, path: P) -> Result<()> {
        let path = path.as_ref();

        if self.table.get().is_some() {
            tracing::debug!(path = %path.display(), "parameter table is already loaded");
            return Ok(());
        }

        // the mutex guards no data, a poisoned one is still usable
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);

        if self.table.get().is_some() {
            tracing::debug!(path = %path.display(), "parameter table is already loaded");
            return Ok(());
        }

        let table = parser.read_path(path)?;
        tracing::debug!(path = %path.display(), records = table.len(), "parameter table loaded");

        // never fails, the table is set under the mutex only
        let _ = self.table.set(table);
        Ok(())
    }

    /// Publishes `table` unless the table is already loaded.
    ///
    /// Returns `true` if `table` is published.
    ///
    /// # Example
    ///
    /// ```
    /// # use tky2jgd::*;
    /// let datum = Datum::new();
    ///
    /// assert!(datum.install(ParamTableBuilder::new().record(54401027, (11.49105, -11.80078)).build()));
    /// assert!(!datum.install(ParamTable::default()));
    ///
    /// assert_eq!(datum.table().map(ParamTable::len).ok(), Some(1));
    /// ```
    pub fn install(&self, table: ParamTable) -> bool {
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        self.table.set(table).is_ok()
    }

    /// Returns the loaded table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoaded`] when the table is not loaded yet.
    #[inline]
    pub fn table(&self) -> Result<&ParamTable> {
        self.table.get().ok_or(Error::NotLoaded)
    }

    /// Returns `true` if the table is loaded.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Transforms `position` from Tokyo Datum to JGD2000 in place.
    ///
    /// `position` is not modified on [`Err`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoaded`] when the table is not loaded,
    /// and [`Error::OutOfCoverage`] when the position is not covered.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # use tky2jgd::*;
    /// #
    /// let datum = Datum::new();
    /// let mut position = Position::from_degrees(36.103774791666666, 140.08785504166664, 0.0);
    ///
    /// assert!(matches!(datum.tokyo_to_jgd(&mut position), Err(tky2jgd::Error::NotLoaded)));
    ///
    /// datum.install(ParamTableBuilder::new()
    ///     .records([
    ///         (54401027, (11.49105, -11.80078)),
    ///         (54401037, (11.48732, -11.80198)),
    ///         (54401028, (11.49096, -11.80476)),
    ///         (54401038, (11.48769, -11.80555)),
    ///     ])
    ///     .build());
    /// datum.tokyo_to_jgd(&mut position)?;
    ///
    /// let (latitude, longitude, _) = position.to_degrees();
    /// assert!((latitude - 36.106966281).abs() < 1e-8);
    /// assert!((longitude - 140.084576867).abs() < 1e-8);
    /// # Ok::<(), Box<dyn Error>>(())
    /// ```
    #[inline]
    pub fn tokyo_to_jgd(&self, position: &mut Position) -> Result<()> {
        *position = self.table()?.tokyo_to_jgd(position)?;
        Ok(())
    }

    /// Transforms `position` from JGD2000 to Tokyo Datum in place.
    ///
    /// See [`ParamTable::jgd_to_tokyo`] for detail.
    /// `position` is not modified on [`Err`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoaded`] when the table is not loaded,
    /// and [`Error::OutOfCoverage`] when the position is not covered.
    #[inline]
    pub fn jgd_to_tokyo(&self, position: &mut Position) -> Result<()> {
        *position = self.table()?.jgd_to_tokyo(position)?;
        Ok(())
    }
}

/// Returns the process-wide [`Datum`].
#[inline]
pub fn global() -> &'static Datum {
    &DATUM
}

/// Loads the par file at `path` into the process-wide [`Datum`].
///
/// This is no-op when it is already loaded, see [`Datum::load`].
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read,
/// and [`Error::OutOfMemory`] when the record buffer cannot be allocated.
#[inline]
pub fn load<P: AsRef<Path>>(path: P) -> Result<()> {
    DATUM.load(path)
}

/// Transforms `position` from Tokyo Datum to JGD2000 in place
/// by the process-wide [`Datum`].
///
/// See [`Datum::tokyo_to_jgd`].
///
/// # Errors
///
/// Returns [`Error::NotLoaded`] when [`load`] has not succeeded,
/// and [`Error::OutOfCoverage`] when the position is not covered.
#[inline]
pub fn tokyo_to_jgd(position: &mut Position) -> Result<()> {
    DATUM.tokyo_to_jgd(position)
}

/// Transforms `position` from JGD2000 to Tokyo Datum in place
/// by the process-wide [`Datum`].
///
/// See [`Datum::jgd_to_tokyo`].
///
/// # Errors
///
/// Returns [`Error::NotLoaded`] when [`load`] has not succeeded,
/// and [`Error::OutOfCoverage`] when the position is not covered.
#[inline]
pub fn jgd_to_tokyo(position: &mut Position) -> Result<()> {
    DATUM.jgd_to_tokyo(position)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::error::Coverage;
    use crate::Correction;

    use super::*;

    const SCENARIO: &str = "JGD2000-TokyoDatum Ver.2.1.2
MeshCode   dB(sec)   dL(sec)
54401011   4.00000  40.00000
54401000   1.00000  10.00000
54401010   3.00000  30.00000
54401001   2.00000  20.00000
54401022   7.00000  70.00000
54401012   5.00000  50.00000
54401021   6.00000  60.00000
";

    fn scenario_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SCENARIO.as_bytes()).unwrap();
        file
    }

    /// The center of the cell 54401000.
    fn center() -> Position {
        Position::from_degrees(2165.25 / 60., 8400.375 / 60., 12.5)
    }

    /// A position whose iterates stay in the cell 54401000.
    fn inner() -> Position {
        Position::from_degrees(2165.2 / 60., 8400.3 / 60., 7.0)
    }

    mod test_datum {
        use super::*;

        #[test]
        fn test_not_loaded() {
            let datum = Datum::new();
            assert!(!datum.is_loaded());
            assert!(matches!(datum.table(), Err(Error::NotLoaded)));

            let origin = center();
            let mut position = origin;
            assert!(matches!(
                datum.tokyo_to_jgd(&mut position),
                Err(Error::NotLoaded)
            ));
            assert_eq!(position, origin);
            assert!(matches!(
                datum.jgd_to_tokyo(&mut position),
                Err(Error::NotLoaded)
            ));
            assert_eq!(position, origin);
        }

        #[test]
        fn test_load() {
            let file = scenario_file();
            let datum = Datum::new();

            datum.load(file.path()).unwrap();
            assert!(datum.is_loaded());

            let table = datum.table().unwrap();
            assert_eq!(table.len(), 7);
            assert!(table
                .records()
                .windows(2)
                .all(|pair| pair[0].code < pair[1].code));
            assert_eq!(
                table.description(),
                Some("JGD2000-TokyoDatum Ver.2.1.2\nMeshCode   dB(sec)   dL(sec)")
            );

            let mut position = center();
            datum.tokyo_to_jgd(&mut position).unwrap();

            let origin = center();
            let (db, dl) = Correction::new(
                position.latitude - origin.latitude,
                position.longitude - origin.longitude,
            )
            .to_arcsec();
            approx::assert_abs_diff_eq!(db, 2.5, epsilon = 1e-9);
            approx::assert_abs_diff_eq!(dl, 25.0, epsilon = 1e-9);
            assert_eq!(position.height, 12.5);
        }

        #[test]
        fn test_load_twice() {
            let file = scenario_file();
            let path = file.path().to_path_buf();
            let datum = Datum::new();

            datum.load(&path).unwrap();

            // removes the file, the second load must not open it
            file.close().unwrap();
            assert!(!path.exists());

            datum.load(&path).unwrap();
            assert_eq!(datum.table().unwrap().len(), 7);
        }

        #[test]
        fn test_load_error() {
            let dir = tempfile::tempdir().unwrap();
            let datum = Datum::new();

            let actual = datum.load(dir.path().join("TKY2JGD.par")).unwrap_err();
            assert!(matches!(actual, Error::Io { .. }));
            assert!(!datum.is_loaded());

            // retry
            let file = scenario_file();
            datum.load(file.path()).unwrap();
            assert!(datum.is_loaded());
        }

        #[test]
        fn test_load_with() {
            let file = scenario_file();
            let datum = Datum::new();

            datum
                .load_with(&Parser::new().max_records(4), file.path())
                .unwrap();
            assert_eq!(
                datum
                    .table()
                    .unwrap()
                    .iter()
                    .map(|r| r.code)
                    .collect::<Vec<_>>(),
                vec![54401000, 54401001, 54401010, 54401011]
            );
        }

        #[test]
        fn test_install() {
            let file = scenario_file();
            let datum = Datum::new();

            assert!(datum.install(ParamTable::default()));
            assert!(!datum.install(ParamTable::default()));

            // no-op, the installed one remains
            datum.load(file.path()).unwrap();
            assert!(datum.table().unwrap().is_empty());
        }

        #[test]
        fn test_out_of_coverage() {
            let file = scenario_file();
            let datum = Datum::new();
            datum.load(file.path()).unwrap();

            // one cell north
            let origin = Position::from_degrees(2166.25 / 60., 8400.375 / 60., 0.0);
            let mut position = origin;

            let actual = datum.tokyo_to_jgd(&mut position).unwrap_err();
            assert!(matches!(
                actual,
                Error::OutOfCoverage(Coverage::ParameterNotFound {
                    meshcode: 54401020,
                    ..
                })
            ));
            assert_eq!(position, origin);

            let actual = datum.jgd_to_tokyo(&mut position).unwrap_err();
            assert!(actual.is_out_of_coverage());
            assert_eq!(position, origin);
        }

        #[test]
        fn test_round_trip() {
            let file = scenario_file();
            let datum = Datum::new();
            datum.load(file.path()).unwrap();

            let table = datum.table().unwrap();

            let origin = inner();
            let mut position = origin;

            datum.tokyo_to_jgd(&mut position).unwrap();
            let expected = table.tokyo_to_jgd(&origin).unwrap();
            assert_eq!(position, expected);

            datum.jgd_to_tokyo(&mut position).unwrap();
            let expected = table.jgd_to_tokyo(&expected).unwrap();
            assert_eq!(position, expected);
            assert_eq!(position.height, origin.height);
        }

        #[test]
        fn test_concurrent() {
            let file = scenario_file();
            let datum = Datum::new();

            let (datum, path) = (&datum, file.path());
            let results = std::thread::scope(|s| {
                let handles = (0..8)
                    .map(|_| {
                        s.spawn(move || {
                            datum.load(path).unwrap();

                            let mut position = center();
                            datum.tokyo_to_jgd(&mut position).unwrap();
                            position
                        })
                    })
                    .collect::<Vec<_>>();

                handles
                    .into_iter()
                    .map(|handle| handle.join().unwrap())
                    .collect::<Vec<_>>()
            });

            assert!(results.iter().all(|position| position == &results[0]));
            assert_eq!(datum.table().unwrap().len(), 7);
        }
    }

    #[test]
    fn test_global() {
        // the only test touching the process-wide Datum
        let origin = inner();
        let mut position = origin;
        assert!(matches!(tokyo_to_jgd(&mut position), Err(Error::NotLoaded)));
        assert!(matches!(jgd_to_tokyo(&mut position), Err(Error::NotLoaded)));
        assert_eq!(position, origin);

        let file = scenario_file();
        load(file.path()).unwrap();
        load(file.path()).unwrap();
        assert!(global().is_loaded());

        tokyo_to_jgd(&mut position).unwrap();
        jgd_to_tokyo(&mut position).unwrap();
        assert_eq!(position.height, origin.height);
    }
}
