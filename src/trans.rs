//! Provides the transformations on [`ParamTable`].
use crate::error::MeshCellCorner;
use crate::mesh::{self, LATITUDE_INTERVAL, LONGITUDE_INTERVAL};
use crate::{Correction, Error, ParamRecord, ParamTable, Position, Result};

/// The parameters on the four nodes of a cell.
struct Interpol<'a> {
    sw: &'a ParamRecord,
    se: &'a ParamRecord,
    nw: &'a ParamRecord,
    ne: &'a ParamRecord,
}

impl<'a> Interpol<'a> {
    /// Resolves the cell containing (`latitude`, `longitude`) \[arcmin\].
    #[inline(always)]
    fn from(table: &'a ParamTable, latitude: f64, longitude: f64) -> Result<Self> {
        macro_rules! get {
            ($lat_idx:literal, $lon_idx:literal, $corner:expr) => {{
                let meshcode = mesh::meshcode(
                    latitude + $lat_idx as f64 * LATITUDE_INTERVAL,
                    longitude + $lon_idx as f64 * LONGITUDE_INTERVAL,
                )
                .ok_or(Error::out_of_bounds())?;
                table
                    .get(meshcode)
                    .ok_or(Error::parameter_not_found(meshcode, $corner))?
            }};
        }

        let sw = get!(0, 0, MeshCellCorner::SouthWest);
        let se = get!(0, 1, MeshCellCorner::SouthEast);
        let nw = get!(1, 0, MeshCellCorner::NorthWest);
        let ne = get!(1, 1, MeshCellCorner::NorthEast);

        Ok(Self { sw, se, nw, ne })
    }

    /// Returns the bilinear interpolation of `(db, dl)` \[sec\].
    ///
    /// `a` and `b` are the fractional position of latitude and longitude.
    #[inline(always)]
    fn interpol(&self, a: f64, b: f64) -> (f64, f64) {
        let (c, d) = (1. - a, 1. - b);
        let (cd, ad, cb, ab) = (c * d, a * d, c * b, a * b);

        macro_rules! sum {
            ($field:ident) => {
                self.sw.$field * cd + self.nw.$field * ad + self.se.$field * cb + self.ne.$field * ab
            };
        }

        (sum!(db), sum!(dl))
    }
}

impl ParamTable {
    /// The iteration count of [`ParamTable::jgd_to_tokyo`].
    ///
    /// This is a fixed count, not a convergence criterion.
    pub const ITERATION: usize = 2;

    /// Max error of [`ParamTable::jgd_to_tokyo_verified`] \[rad\].
    pub const MAX_ERROR: f64 = 1e-14;

    /// Max iteration of [`ParamTable::jgd_to_tokyo_verified`].
    pub const MAX_ITERATION: usize = 10;

    /// Returns the interpolated parameter `(db, dl)` \[sec\] at the position \[arcmin\].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfCoverage`] when the position is not in the grid,
    /// or the table lacks a parameter on the nodes of the cell.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # use tky2jgd::*;
    /// #
    /// let table = ParamTableBuilder::new()
    ///     .records([
    ///         (54401000, (1., 10.)),
    ///         (54401001, (2., 20.)),
    ///         (54401010, (3., 30.)),
    ///         (54401011, (4., 40.)),
    ///     ])
    ///     .build();
    ///
    /// // the center of the cell
    /// assert_eq!(table.interpolate(2165.25, 8400.375)?, (2.5, 25.0));
    /// # Ok::<(), Box<dyn Error>>(())
    /// ```
    pub fn interpolate(&self, latitude: f64, longitude: f64) -> Result<(f64, f64)> {
        let interpol = Interpol::from(self, latitude, longitude)?;

        let (a, b) = mesh::fraction(latitude, longitude);

        Ok(interpol.interpol(a, b))
    }

    /// Returns the correction from Tokyo Datum to JGD2000 at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfCoverage`] when the position is not in the grid,
    /// or the table lacks a parameter on the nodes of the cell.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # use tky2jgd::*;
    /// #
    /// let table = ParamTableBuilder::new()
    ///     .records([
    ///         (54401027, (11.49105, -11.80078)),
    ///         (54401037, (11.48732, -11.80198)),
    ///         (54401028, (11.49096, -11.80476)),
    ///         (54401038, (11.48769, -11.80555)),
    ///     ])
    ///     .build();
    ///
    /// let origin = Position::from_degrees(36.103774791666666, 140.08785504166664, 0.0);
    /// let corr = table.tokyo_to_jgd_corr(&origin)?;
    ///
    /// assert_eq!(&origin + corr, table.tokyo_to_jgd(&origin)?);
    /// # Ok::<(), Box<dyn Error>>(())
    /// ```
    #[inline]
    pub fn tokyo_to_jgd_corr(&self, position: &Position) -> Result<Correction> {
        let (latitude, longitude) = position.to_arcmin();
        let (db, dl) = self.interpolate(latitude, longitude)?;
        Ok(Correction::from_arcsec(db, dl))
    }

    /// Returns the position transformed from Tokyo Datum to JGD2000.
    ///
    /// The height is copied as is.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] when fails to transform, see [`ParamTable::tokyo_to_jgd_corr`].
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # use tky2jgd::*;
    /// #
    /// // from TKY2JGD.par
    /// let table = ParamTableBuilder::new()
    ///     .records([
    ///         (54401027, (11.49105, -11.80078)),
    ///         (54401037, (11.48732, -11.80198)),
    ///         (54401028, (11.49096, -11.80476)),
    ///         (54401038, (11.48769, -11.80555)),
    ///     ])
    ///     .build();
    ///
    /// // GSI Tsukuba
    /// let origin = Position::from_degrees(36.103774791666666, 140.08785504166664, 12.5);
    /// let (latitude, longitude, height) = table.tokyo_to_jgd(&origin)?.to_degrees();
    ///
    /// assert!((latitude - 36.106966281).abs() < 1e-8);
    /// assert!((longitude - 140.084576867).abs() < 1e-8);
    /// assert_eq!(height, 12.5);
    /// # Ok::<(), Box<dyn Error>>(())
    /// ```
    #[inline]
    pub fn tokyo_to_jgd(&self, position: &Position) -> Result<Position> {
        self.tokyo_to_jgd_corr(position).map(|corr| position + corr)
    }

    /// Returns the correction from JGD2000 to Tokyo Datum at `position`.
    ///
    /// See [`ParamTable::jgd_to_tokyo`] for detail.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] when fails to interpolate on any iterate.
    pub fn jgd_to_tokyo_corr(&self, position: &Position) -> Result<Correction> {
        let mut current = *position;
        let mut corr = Correction::new(0., 0.);

        for _ in 0..Self::ITERATION {
            corr = self.tokyo_to_jgd_corr(&current)?;
            current = position - corr;
        }

        Ok(Correction::new(-corr.latitude, -corr.longitude))
    }

    /// Returns the position transformed from JGD2000 to Tokyo Datum.
    ///
    /// This solves `tokyo + correction(tokyo) = position`
    /// by the fixed-point iteration `t ← position − correction(t)` from `t = position`,
    /// exactly [`ITERATION`](ParamTable::ITERATION) times.
    /// It is compatible to the GSI TKY2JGD,
    /// see [`ParamTable::jgd_to_tokyo_verified`] for the iteration until convergence.
    ///
    /// The height is copied as is.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] when fails to interpolate on any iterate.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # use tky2jgd::*;
    /// #
    /// let table = ParamTableBuilder::new()
    ///     .records([
    ///         (54401027, (11.49105, -11.80078)),
    ///         (54401037, (11.48732, -11.80198)),
    ///         (54401028, (11.49096, -11.80476)),
    ///         (54401038, (11.48769, -11.80555)),
    ///     ])
    ///     .build();
    ///
    /// let origin = Position::from_degrees(36.1045, 140.0945, 0.0);
    /// let result = table.jgd_to_tokyo(&table.tokyo_to_jgd(&origin)?)?;
    ///
    /// assert!((result.latitude - origin.latitude).abs() < 1e-10);
    /// assert!((result.longitude - origin.longitude).abs() < 1e-10);
    /// # Ok::<(), Box<dyn Error>>(())
    /// ```
    #[inline]
    pub fn jgd_to_tokyo(&self, position: &Position) -> Result<Position> {
        self.jgd_to_tokyo_corr(position).map(|corr| position + corr)
    }

    /// Returns the position transformed from JGD2000 to Tokyo Datum,
    /// iterating until convergence.
    ///
    /// This iterates the same as [`ParamTable::jgd_to_tokyo`]
    /// until the difference of successive iterates is less than
    /// [`MAX_ERROR`](ParamTable::MAX_ERROR) on both latitude and longitude.
    ///
    /// This is not compatible to the GSI TKY2JGD, but more accurate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConvergent`] when it does not converge in
    /// [`MAX_ITERATION`](ParamTable::MAX_ITERATION) iterations,
    /// and [`Error::OutOfCoverage`] when fails to interpolate on any iterate.
    pub fn jgd_to_tokyo_verified(&self, position: &Position) -> Result<Position> {
        let mut current = *position;

        for _ in 0..Self::MAX_ITERATION {
            let corr = self.tokyo_to_jgd_corr(&current)?;
            let next = position - corr;

            if (next.latitude - current.latitude).abs() < Self::MAX_ERROR
                && (next.longitude - current.longitude).abs() < Self::MAX_ERROR
            {
                return Ok(next);
            }

            current = next;
        }

        Err(Error::NotConvergent {
            iteration: Self::MAX_ITERATION,
            criteria: Self::MAX_ERROR,
        })
    }
}
