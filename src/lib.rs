//! Ellipsoidal transverse Mercator projection.
//!
//! Converts geodetic (longitude, latitude) positions in radians to planar
//! (easting, northing) coordinates and back, and transforms axis-aligned
//! bounding boxes in either direction while accounting for the extrema that
//! appear where a box crosses the central meridian or the equator.

pub mod error;
pub mod geometry;
pub mod proj;

pub use error::ProjError;
pub use geometry::{BoundingBox, Point};
pub use proj::ellipsoid::{Ellipsoid, GRS80, WGS84};
pub use proj::params::{EllipsoidParams, TransverseMercatorParams};
pub use proj::transverse_mercator::TransverseMercator;
pub use proj::Projection;
