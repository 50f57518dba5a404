//! # tky2jgd
//!
//! Unofficial datum transformer between Tokyo Datum and JGD2000
//! by _TKY2JGD_ gridded correction parameter
//! which Geospatial Information Authority of Japan (GIAJ) distributing [^1].
//!
//! 国土地理院が公開している TKY2JGD パラメータファイル（par ファイル）による
//! 日本測地系（旧日本測地系）と世界測地系（JGD2000）の相互変換を提供します [^1]。
//!
//! ```no_run
//! use std::error::Error;
//!
//! use tky2jgd::Position;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     // Loads TKY2JGD.par once for the process,
//!     // the second and later calls are no-op
//!     tky2jgd::load("TKY2JGD.par")?;
//!
//!     // Makes the origin of transformation, in [rad]
//!     let mut position = Position::from_degrees(36.103774791666666, 140.08785504166664, 0.0);
//!
//!     // Tokyo Datum to JGD2000, in place
//!     tky2jgd::tokyo_to_jgd(&mut position)?;
//!     // Prints JGD2000: (36.10696628160147, 140.08457686629436, 0.0)
//!     println!("JGD2000: {:?}", position.to_degrees());
//!
//!     // JGD2000 to Tokyo Datum, in place
//!     tky2jgd::jgd_to_tokyo(&mut position)?;
//!     println!("Tokyo: {:?}", position.to_degrees());
//!
//!     Ok(())
//! }
//! ```
//!
//! Features:
//!
//! - Supports offline transformation (no web API)
//! - Supports both forward (Tokyo Datum to JGD2000, [EPSG:4301] to [EPSG:4612])
//!   and backward transformation compatible to the GIAJ TKY2JGD
//! - Supports verified backward transformation, [`ParamTable::jgd_to_tokyo_verified`]
//! - The parameter is loaded once and shared by threads without locking, see [`Datum`]
//! - The height passes through untouched
//!
//! [EPSG:4301]: https://epsg.io/4301
//! [EPSG:4612]: https://epsg.io/4612
//!
//! This package does not contain parameter files, download it from GIAJ [^2].
//!
//! このパッケージはパラメータファイルを提供しません。公式サイトよりダウンロードしてください [^2]。
//!
//! # Without the Process-wide State
//!
//! [`ParamTable`] is a plain value, it transforms positions by itself.
//!
//! ```no_run
//! # use std::error::Error;
//! use tky2jgd::{par, Position};
//!
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let table = par::Parser::new().read_path("TKY2JGD.par")?;
//!
//! let origin = Position::from_degrees(36.103774791666666, 140.08785504166664, 0.0);
//! let result = table.tokyo_to_jgd(&origin)?;
//! let back = table.jgd_to_tokyo(&result)?;
//! println!("{result:?} {back:?}");
//! # Ok(())}
//! ```
//!
//! # Logging
//!
//! We emit events by [`tracing` crate](https://crates.io/crates/tracing),
//! an `ERROR` on the parameter file cannot be read,
//! and `DEBUG`/`WARN` on loading. This installs no subscriber.
//!
//! # Serialization and Deserialization
//!
//! ## Par File
//!
//! We provide API to parse par file, [`par::from_str`] and [`par::Parser`].
//!
//! ```
//! # use std::error::Error;
//! use tky2jgd::{par, ParamRecord};
//!
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let s = "JGD2000-TokyoDatum Ver.2.1.2
//! MeshCode   dB(sec)   dL(sec)
//! 54401027  11.49105 -11.80078";
//! let table = par::from_str(s)?;
//!
//! assert_eq!(table.records(), &[ParamRecord::new(54401027, 11.49105, -11.80078)]);
//! # Ok(())}
//! ```
//!
//! ## Json File
//!
//! It supports (de)serialization by [`serde` crate](https://crates.io/crates/serde)
//! for [`ParamTable`], [`ParamRecord`], [`Position`] and [`Correction`]
//! only if the feature `serde` is enabled.
//! We show a (de)serialization example to/from json;
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # {
//! use tky2jgd::{ParamTable, ParamTableBuilder};
//!
//! let table = ParamTableBuilder::new()
//!     .record(12345678, (1., 2.))
//!     .build();
//!
//! // Serialize to json
//! let json = serde_json::to_string(&table).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"records":[{"code":12345678,"db":1.0,"dl":2.0}]}"#
//! );
//!
//! // Deserialize from json
//! let result: ParamTable = serde_json::from_str(&json).unwrap();
//! assert_eq!(result, table);
//! # }
//! ```
//!
//! [^1]: Geospatial Information Authority of Japan (GIAJ, 国土地理院): <https://www.gsi.go.jp/>
//!       (English) <https://www.gsi.go.jp/ENGLISH/>.
//!
//! [^2]: TKY2JGD: <https://www.gsi.go.jp/sokuchikijun/tky2jgd_download.html>.

#[doc(inline)]
pub use builder::ParamTableBuilder;
#[doc(inline)]
pub use datum::{jgd_to_tokyo, load, tokyo_to_jgd, Datum};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use position::{Correction, Position};
#[doc(inline)]
pub use table::{ParamRecord, ParamTable, MAX_PARAMS};

mod builder;
pub mod datum;
pub mod error;
pub mod mesh;
pub mod par;
mod position;
mod table;
mod trans;
