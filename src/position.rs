//! Provides [`Position`] and [`Correction`].
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a position on the Earth, a triplet latitude, longitude and height.
///
/// We emphasize that the unit of latitude and longitude is \[rad\], not \[deg\].
///
/// # Example
///
/// ```
/// # use tky2jgd::*;
/// let position = Position::from_degrees(35.0, 135.0, 5.0);
/// assert_eq!(position.latitude, 35.0_f64.to_radians());
/// assert_eq!(position.longitude, 135.0_f64.to_radians());
/// assert_eq!(position.height, 5.0);
///
/// // Add/sub Correction, the height does not change
/// let result = &position + Correction::new(1.0, 1.0);
/// assert_eq!(result.latitude, 35.0_f64.to_radians() + 1.0);
/// assert_eq!(result.height, 5.0);
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// The latitude \[rad\], positive north
    pub latitude: f64,
    /// The longitude \[rad\], positive east
    pub longitude: f64,
    /// The height \[m\]
    pub height: f64,
}

impl From<(f64, f64, f64)> for Position {
    /// see [`Position::new()`]
    fn from(rhs: (f64, f64, f64)) -> Self {
        Self::new(rhs.0, rhs.1, rhs.2)
    }
}

impl From<[f64; 3]> for Position {
    /// see [`Position::new()`]
    fn from(rhs: [f64; 3]) -> Self {
        Self::new(rhs[0], rhs[1], rhs[2])
    }
}

impl Add<Correction> for &Position {
    type Output = Position;

    fn add(self, rhs: Correction) -> Self::Output {
        Position::new(
            self.latitude + rhs.latitude,
            self.longitude + rhs.longitude,
            self.height,
        )
    }
}

impl Add<&Correction> for &Position {
    type Output = Position;

    fn add(self, rhs: &Correction) -> Self::Output {
        self + *rhs
    }
}

impl Sub<Correction> for &Position {
    type Output = Position;

    fn sub(self, rhs: Correction) -> Self::Output {
        Position::new(
            self.latitude - rhs.latitude,
            self.longitude - rhs.longitude,
            self.height,
        )
    }
}

impl Sub<&Correction> for &Position {
    type Output = Position;

    fn sub(self, rhs: &Correction) -> Self::Output {
        self - *rhs
    }
}

impl Position {
    /// Makes a [`Position`] from \[rad\], \[rad\] and \[m\].
    ///
    /// This does not check the value range.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64, height: f64) -> Self {
        Self {
            latitude,
            longitude,
            height,
        }
    }

    /// Makes a [`Position`] from \[deg\], \[deg\] and \[m\].
    ///
    /// # Example
    ///
    /// ```
    /// # use tky2jgd::Position;
    /// let position = Position::from_degrees(36.0, 140.0, 0.0);
    /// assert_eq!(position, Position::new(36.0_f64.to_radians(), 140.0_f64.to_radians(), 0.0));
    /// ```
    #[inline]
    pub fn from_degrees(latitude: f64, longitude: f64, height: f64) -> Self {
        Self::new(latitude.to_radians(), longitude.to_radians(), height)
    }

    /// Returns the latitude \[deg\], the longitude \[deg\] and the height \[m\].
    #[inline]
    pub fn to_degrees(&self) -> (f64, f64, f64) {
        (
            self.latitude.to_degrees(),
            self.longitude.to_degrees(),
            self.height,
        )
    }

    /// Returns the latitude and the longitude in \[arcmin\].
    #[inline]
    pub(crate) fn to_arcmin(&self) -> (f64, f64) {
        (
            self.latitude.to_degrees() * 60.0,
            self.longitude.to_degrees() * 60.0,
        )
    }
}

/// The transformation correction of latitude and longitude.
///
/// We emphasize that the unit is \[rad\], not \[sec\].
/// There is no height component, datum transformation passes the height through.
///
/// # Example
///
/// ```
/// # use tky2jgd::*;
/// let correction = Correction::new(1., 2.);
/// assert_eq!(correction.latitude, 1.);
/// assert_eq!(correction.longitude, 2.);
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Correction {
    /// The latitude correction \[rad\].
    pub latitude: f64,
    /// The longitude correction \[rad\].
    pub longitude: f64,
}

impl Correction {
    /// Makes a [`Correction`].
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Makes a [`Correction`] from \[sec\].
    ///
    /// ```
    /// # use tky2jgd::Correction;
    /// let correction = Correction::from_arcsec(3600.0, -3600.0);
    /// assert_eq!(correction.latitude, 1.0_f64.to_radians());
    /// assert_eq!(correction.longitude, -1.0_f64.to_radians());
    /// ```
    #[inline]
    pub fn from_arcsec(latitude: f64, longitude: f64) -> Self {
        Self::new(
            (latitude / 3600.0).to_radians(),
            (longitude / 3600.0).to_radians(),
        )
    }

    /// Returns the latitude and the longitude correction in \[sec\].
    #[inline]
    pub fn to_arcsec(&self) -> (f64, f64) {
        (
            self.latitude.to_degrees() * 3600.0,
            self.longitude.to_degrees() * 3600.0,
        )
    }

    /// Returns √𝑙𝑎𝑡𝑖𝑡𝑢𝑑𝑒² + 𝑙𝑜𝑛𝑔𝑖𝑡𝑢𝑑𝑒².
    #[inline]
    pub fn horizontal(&self) -> f64 {
        f64::hypot(self.latitude, self.longitude)
    }
}
