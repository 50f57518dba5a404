//! Provides [`Error`] and its components.
use std::collections::TryReserveError;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Alias for a `Result<T, tky2jgd::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents all possible errors that can occur by this crate.
///
/// Every failure leaves the caller's [`Position`](crate::Position)
/// and the shared table as they were before the call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The parameter file cannot be opened or read.
    #[error("cannot read parameter file '{}'", .path.display())]
    Io {
        /// The file given to the loader
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The record buffer cannot be allocated.
    #[error("cannot allocate parameter table of {capacity} records")]
    OutOfMemory {
        /// Requested record capacity
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
    /// A transformation is requested before the parameter table is loaded.
    #[error("parameter table is not loaded")]
    NotLoaded,
    /// The position is not covered by the parameter grid.
    #[error("position is out of coverage: {0}")]
    OutOfCoverage(Coverage),
    /// The difference between successive iterates is still larger than
    /// `criteria` after `iteration` iterations.
    #[error("error is still higher than {criteria:?} even exhaust {iteration:?} iterations")]
    NotConvergent {
        /// Max iteration
        iteration: usize,
        /// Error criteria \[rad\]
        criteria: f64,
    },
}

impl Error {
    #[cold]
    pub(crate) const fn out_of_bounds() -> Self {
        Self::OutOfCoverage(Coverage::OutOfBounds)
    }

    #[cold]
    pub(crate) const fn parameter_not_found(meshcode: u32, corner: MeshCellCorner) -> Self {
        Self::OutOfCoverage(Coverage::ParameterNotFound { meshcode, corner })
    }

    /// Returns `true` if the error is [`Error::OutOfCoverage`].
    pub const fn is_out_of_coverage(&self) -> bool {
        matches!(self, Self::OutOfCoverage(_))
    }
}

/// The reason of [`Error::OutOfCoverage`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Coverage {
    /// The position cannot be expressed by a meshcode,
    /// e.g. west of 100°E or south of the equator.
    OutOfBounds,
    /// The table has no parameter on a corner of the cell.
    ParameterNotFound {
        /// Meshcode where the parameter not found
        meshcode: u32,
        /// Corner of the cell where the parameter not found
        corner: MeshCellCorner,
    },
}

/// A corner of the cell used by [`Coverage`].
///
/// South-west is `(0, 0)` in `(lat_idx, lon_idx)` order, north-east is `(1, 1)`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MeshCellCorner {
    SouthWest,
    SouthEast,
    NorthWest,
    NorthEast,
}

impl Display for Coverage {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("position is out-of-bounds of meshcode"),
            Self::ParameterNotFound { meshcode, corner } => {
                write!(f, "parameter not found: {meshcode} at {corner}")
            }
        }
    }
}

impl Display for MeshCellCorner {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::SouthWest => f.write_str("south-west"),
            Self::SouthEast => f.write_str("south-east"),
            Self::NorthWest => f.write_str("north-west"),
            Self::NorthEast => f.write_str("north-east"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let e = Error::parameter_not_found(54401020, MeshCellCorner::SouthWest);
        assert_eq!(
            e.to_string(),
            "position is out of coverage: parameter not found: 54401020 at south-west"
        );
        assert!(e.is_out_of_coverage());

        let e = Error::out_of_bounds();
        assert!(e.is_out_of_coverage());
        assert!(matches!(e, Error::OutOfCoverage(Coverage::OutOfBounds)));

        assert_eq!(Error::NotLoaded.to_string(), "parameter table is not loaded");
        assert!(!Error::NotLoaded.is_out_of_coverage());
    }

    #[test]
    fn test_io_source() {
        use std::error::Error as _;

        let e = Error::Io {
            path: PathBuf::from("TKY2JGD.par"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(e.to_string(), "cannot read parameter file 'TKY2JGD.par'");
        assert!(e.source().is_some());
    }
}
