//! Provides the meshcode of the TKY2JGD grid.
//!
//! The grid is the third mesh (the _1 km_ mesh) of Japan,
//! its cell is 0.5′ × 0.75′ \[arcmin\], namely, ≈925 m × ≈1.1 to 1.7 km.
//!
//! All functions in this module work in \[arcmin\],
//! and take the (unshifted) east longitude;
//! the shift by 100° (6000′) is done inside.
//!
//! We note that this supports positions in the first quadrant only,
//! that is, north of the equator and east of 100°E.
//! The functions return [`None`] otherwise.
use std::fmt::{Display, Formatter};

use crate::Position;

/// The latitude interval of the grid \[arcmin\].
pub const LATITUDE_INTERVAL: f64 = 0.5;

/// The longitude interval of the grid \[arcmin\].
pub const LONGITUDE_INTERVAL: f64 = 0.75;

/// The longitude origin of meshcode \[arcmin\], i.e. 100°.
pub(crate) const LONGITUDE_ORIGIN: f64 = 6000.0;

/// Represents the meshcode, the south-west node of a cell.
///
/// Each component has three digits,
/// the first takes values from 0 to 99, the second does from 0 to 7
/// and the third does from 0 to 9 inclusive.
///
/// # Example
///
/// ```
/// # use tky2jgd::mesh::MeshCode;
/// // GSI Tsukuba, 36.103774791666666°N 140.08785504166664°E
/// let code = MeshCode::from_arcmin(2166.2264875, 8405.2713025).unwrap();
/// assert_eq!(code.to_u32(), 54401027);
///
/// // The south-west node of the cell
/// assert_eq!(code.to_arcmin(), (2166.0, 8405.25));
///
/// // And back
/// assert_eq!(MeshCode::try_from_u32(54401027), Some(code));
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct MeshCode(
    /// latitude
    (u8, u8, u8),
    /// longitude
    (u8, u8, u8),
);

impl MeshCode {
    /// Makes a [`MeshCode`] of the cell containing the position \[arcmin\].
    ///
    /// Returns [`None`] when the position is not finite,
    /// south of the equator, west of 100°E, or north of 66.6°N / east of 200°E
    /// (where the first digit overflows).
    pub fn from_arcmin(latitude: f64, longitude: f64) -> Option<Self> {
        let mut lat = latitude;
        let mut lon = longitude - LONGITUDE_ORIGIN;

        if !(lat.is_finite() && lon.is_finite() && lat >= 0.0 && lon >= 0.0) {
            return None;
        }

        // `as` truncates toward zero, equals to floor on non-negative values
        let n1 = (lat / 40.0) as u32;
        lat -= n1 as f64 * 40.0;
        let m1 = (lon / 60.0) as u32;
        lon -= m1 as f64 * 60.0;

        if n1 > 99 || m1 > 99 {
            return None;
        }

        let n2 = (lat / 5.0) as u32;
        lat -= n2 as f64 * 5.0;
        let m2 = (lon / 7.5) as u32;
        lon -= m2 as f64 * 7.5;

        let n3 = (lat / LATITUDE_INTERVAL) as u32;
        let m3 = (lon / LONGITUDE_INTERVAL) as u32;

        Some(Self(
            (n1 as u8, n2.min(7) as u8, n3.min(9) as u8),
            (m1 as u8, m2.min(7) as u8, m3.min(9) as u8),
        ))
    }

    /// Makes a [`MeshCode`] of the cell containing `position`.
    ///
    /// See [`MeshCode::from_arcmin`].
    #[inline]
    pub fn from_position(position: &Position) -> Option<Self> {
        let (latitude, longitude) = position.to_arcmin();
        Self::from_arcmin(latitude, longitude)
    }

    /// Makes a [`MeshCode`] from an integer meshcode.
    ///
    /// Returns [`None`] when `code` has more than 8 digits,
    /// or the second digit of either component is larger than 7.
    ///
    /// ```
    /// # use tky2jgd::mesh::MeshCode;
    /// assert!(MeshCode::try_from_u32(54401000).is_some());
    /// // the second digit of the latitude is 8
    /// assert!(MeshCode::try_from_u32(54408000).is_none());
    /// // 9 digits
    /// assert!(MeshCode::try_from_u32(154401000).is_none());
    /// ```
    pub const fn try_from_u32(code: u32) -> Option<Self> {
        if code > 99_999_999 {
            return None;
        }

        let (lat1, lon1) = ((code / 1_000_000) as u8, (code / 10_000 % 100) as u8);
        let (lat2, lon2) = ((code / 1_000 % 10) as u8, (code / 100 % 10) as u8);
        let (lat3, lon3) = ((code / 10 % 10) as u8, (code % 10) as u8);

        if lat2 > 7 || lon2 > 7 {
            return None;
        }

        Some(Self((lat1, lat2, lat3), (lon1, lon2, lon3)))
    }

    /// Returns the integer meshcode.
    ///
    /// `n1·10⁶ + m1·10⁴ + n2·10³ + m2·10² + n3·10 + m3`.
    #[inline]
    pub const fn to_u32(&self) -> u32 {
        (self.0 .0 as u32 * 100 + self.1 .0 as u32) * 10_000
            + (self.0 .1 as u32 * 10 + self.1 .1 as u32) * 100
            + (self.0 .2 as u32 * 10 + self.1 .2 as u32)
    }

    /// Returns the latitude and the (unshifted) longitude
    /// of the south-west node of the cell \[arcmin\].
    #[inline]
    pub fn to_arcmin(&self) -> (f64, f64) {
        let latitude = self.0 .0 as f64 * 40.0
            + self.0 .1 as f64 * 5.0
            + self.0 .2 as f64 * LATITUDE_INTERVAL;
        let longitude = self.1 .0 as f64 * 60.0
            + self.1 .1 as f64 * 7.5
            + self.1 .2 as f64 * LONGITUDE_INTERVAL;
        (latitude, LONGITUDE_ORIGIN + longitude)
    }
}

impl From<MeshCode> for u32 {
    #[inline]
    fn from(value: MeshCode) -> Self {
        value.to_u32()
    }
}

impl Display for MeshCode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{:08}", self.to_u32())
    }
}

/// Returns the integer meshcode of the cell containing the position \[arcmin\].
///
/// See [`MeshCode::from_arcmin`].
///
/// # Example
///
/// ```
/// # use tky2jgd::mesh::meshcode;
/// assert_eq!(meshcode(2165.0, 8400.0), Some(54401000));
/// assert_eq!(meshcode(2165.5, 8400.75), Some(54401011));
/// // west of 100°E
/// assert_eq!(meshcode(2165.0, 5990.0), None);
/// ```
#[inline]
pub fn meshcode(latitude: f64, longitude: f64) -> Option<u32> {
    MeshCode::from_arcmin(latitude, longitude).map(|code| code.to_u32())
}

/// Returns the fractional position `(a, b)` in the cell, 0 <= a, b < 1.
///
/// `a` is of latitude and `b` is of longitude,
/// and (0, 0) is the south-west node.
#[inline]
pub(crate) fn fraction(latitude: f64, longitude: f64) -> (f64, f64) {
    let y = latitude / LATITUDE_INTERVAL;
    let x = longitude / LONGITUDE_INTERVAL;
    (y - y.trunc(), x - x.trunc())
}

#[cfg(test)]
mod test {
    use super::*;

    mod test_meshcode {
        use super::*;

        #[test]
        fn test_from_arcmin() {
            // GSI Tsukuba
            let code = MeshCode::from_arcmin(2166.2264875, 8405.2713025).unwrap();
            assert_eq!(code, MeshCode((54, 1, 2), (40, 0, 7)));
            assert_eq!(code.to_u32(), 54401027);

            // on the node
            assert_eq!(meshcode(2165.0, 8400.0), Some(54401000));
            assert_eq!(meshcode(2165.5, 8400.0), Some(54401010));
            assert_eq!(meshcode(2165.0, 8400.75), Some(54401001));
            assert_eq!(meshcode(2165.5, 8400.75), Some(54401011));

            // the last cell of a second mesh, and of a first mesh
            assert_eq!(meshcode(2164.99, 8459.99), Some(54400799));
            assert_eq!(meshcode(2199.99, 8459.99), Some(54407799));
        }

        #[test]
        fn test_out_of_bounds() {
            // south of the equator
            assert_eq!(meshcode(-1.0, 8400.0), None);
            // west of 100°E
            assert_eq!(meshcode(2165.0, 5999.0), None);
            // 70°N
            assert_eq!(meshcode(4200.0, 8400.0), None);
            // 200°E
            assert_eq!(meshcode(2165.0, 12000.0), None);

            assert_eq!(meshcode(f64::NAN, 8400.0), None);
            assert_eq!(meshcode(2165.0, f64::INFINITY), None);
        }

        #[test]
        fn test_try_from_u32() {
            let code = MeshCode::try_from_u32(54401027).unwrap();
            assert_eq!(code, MeshCode((54, 1, 2), (40, 0, 7)));
            assert_eq!(u32::from(code), 54401027);

            assert_eq!(
                MeshCode::try_from_u32(0),
                Some(MeshCode((0, 0, 0), (0, 0, 0)))
            );
            assert_eq!(MeshCode::try_from_u32(54400800), None);
            assert_eq!(MeshCode::try_from_u32(100_000_000), None);
        }

        #[test]
        fn test_to_arcmin() {
            let code = MeshCode::try_from_u32(54401027).unwrap();
            assert_eq!(code.to_arcmin(), (2166.0, 8405.25));

            // round trip on nodes
            for code in [54401000, 54401011, 36221234, 68475777] {
                let (lat, lon) = MeshCode::try_from_u32(code).unwrap().to_arcmin();
                assert_eq!(meshcode(lat, lon), Some(code));
            }
        }

        #[test]
        fn test_display() {
            let code = MeshCode::try_from_u32(5401000).unwrap();
            assert_eq!(code.to_string(), "05401000");
        }

        #[test]
        fn test_from_position() {
            let position = Position::from_degrees(36.103774791666666, 140.08785504166664, 0.0);
            assert_eq!(
                MeshCode::from_position(&position).map(u32::from),
                Some(54401027)
            );

            let position = Position::from_degrees(36.0, 99.0, 0.0);
            assert_eq!(MeshCode::from_position(&position), None);
        }
    }

    mod test_fraction {
        use super::*;

        #[test]
        fn test() {
            assert_eq!(fraction(2165.0, 8400.0), (0.0, 0.0));
            assert_eq!(fraction(2165.25, 8400.375), (0.5, 0.5));
            assert_eq!(fraction(2165.125, 8400.5625), (0.25, 0.75));
        }
    }
}
