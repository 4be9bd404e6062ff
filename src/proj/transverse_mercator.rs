//! Transverse Mercator projection — Snyder's ellipsoidal series.
//!
//! Forward and inverse use the truncated power series of Snyder (1987,
//! USGS PP 1395, §8), which are accurate to well under a millimetre within a
//! few degrees of the central meridian. Box transforms add the extremal
//! points that appear where a box crosses the central meridian or the
//! equator, since corner sampling alone misses them.
//!
//! A projection is configured once and then shared immutably; the setters
//! take `&mut self`, so the borrow checker rules out concurrent
//! reconfiguration.

use tracing::{debug, trace};

use crate::error::ProjError;
use crate::geometry::{BoundingBox, Point};
use crate::proj::common::{Footpoint, MeridianArc};
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::Projection;

#[derive(Clone, Debug)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    lon0: f64,
    lat0: f64,
    k0: f64,
    false_easting: f64,
    false_northing: f64,
    // Derived from the ellipsoid and lat0 only; never touched by the setters
    arc: MeridianArc,
    footpoint: Footpoint,
    m0: f64, // Meridian arc length at lat0
}

impl TransverseMercator {
    /// Projection on the WGS84 ellipsoid, unit scale, zero false offset.
    pub fn new(lon0: f64, lat0: f64) -> Self {
        Self::with_ellipsoid(WGS84, lon0, lat0)
    }

    /// Projection on an ellipsoid given by semi-major axis and flattening.
    pub fn with_axis(lon0: f64, lat0: f64, radius: f64, flattening: f64) -> Self {
        Self::with_ellipsoid(Ellipsoid::new(radius, flattening), lon0, lat0)
    }

    pub fn with_ellipsoid(ellipsoid: Ellipsoid, lon0: f64, lat0: f64) -> Self {
        let arc = MeridianArc::new(&ellipsoid);
        let footpoint = Footpoint::new(&ellipsoid);
        let m0 = arc.length(lat0);

        debug!(
            lon0,
            lat0,
            radius = ellipsoid.radius,
            e2 = ellipsoid.squared_eccentricity,
            m0,
            e1 = footpoint.e1(),
            "derived transverse Mercator coefficients"
        );

        Self {
            ellipsoid,
            lon0,
            lat0,
            k0: 1.0,
            false_easting: 0.0,
            false_northing: 0.0,
            arc,
            footpoint,
            m0,
        }
    }

    /// Set the scale factor k0 on the central meridian.
    pub fn set_stretching(&mut self, k0: f64) {
        debug!(old = self.k0, new = k0, "transverse Mercator scale factor changed");
        self.k0 = k0;
    }

    pub fn set_false_easting(&mut self, false_easting: f64) {
        debug!(old = self.false_easting, new = false_easting, "false easting changed");
        self.false_easting = false_easting;
    }

    pub fn set_false_northing(&mut self, false_northing: f64) {
        debug!(old = self.false_northing, new = false_northing, "false northing changed");
        self.false_northing = false_northing;
    }

    /// Central meridian longitude (radians).
    pub fn central_meridian(&self) -> f64 {
        self.lon0
    }

    /// Latitude of origin (radians).
    pub fn reference_latitude(&self) -> f64 {
        self.lat0
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn scale_factor(&self) -> f64 {
        self.k0
    }

    /// (false easting, false northing).
    pub fn false_offset(&self) -> Point {
        Point::new(self.false_easting, self.false_northing)
    }

    /// Meridian arc length from the equator to the latitude of origin.
    pub fn m0(&self) -> f64 {
        self.m0
    }

    /// Northing of the equator on the central meridian.
    pub fn equator_northing(&self) -> f64 {
        -self.m0 * self.k0 + self.false_northing
    }

    pub fn meridian_arc(&self) -> &MeridianArc {
        &self.arc
    }

    pub fn footpoint(&self) -> &Footpoint {
        &self.footpoint
    }

    /// Geodetic (lon, lat) in radians to map (easting, northing).
    ///
    /// Undefined at the poles.
    pub fn geodetic_to_map(&self, geodetic: Point) -> Point {
        let e2 = self.ellipsoid.squared_eccentricity;
        let ep2 = self.ellipsoid.second_squared_eccentricity;
        let (sin_lat, cos_lat) = geodetic.y.sin_cos();
        let tan_lat = sin_lat / cos_lat;

        let n = self.ellipsoid.radius / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let t = tan_lat * tan_lat;
        let c = ep2 * cos_lat * cos_lat;
        let a = (geodetic.x - self.lon0) * cos_lat;
        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a2 * a2;
        let a5 = a4 * a;
        let a6 = a4 * a2;
        let m = self.arc.length(geodetic.y);

        let x = self.k0
            * n
            * (a + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0);
        let y = self.k0
            * (m - self.m0
                + n * tan_lat
                    * (a2 / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

        Point::new(x + self.false_easting, y + self.false_northing)
    }

    /// Map (easting, northing) to geodetic (lon, lat) in radians.
    ///
    /// The series diverges far from the central meridian; results there are
    /// not meaningful.
    pub fn map_to_geodetic(&self, map: Point) -> Point {
        let e2 = self.ellipsoid.squared_eccentricity;
        let ep2 = self.ellipsoid.second_squared_eccentricity;

        let m = self.m0 + (map.y - self.false_northing) / self.k0;
        let phi1 = self.footpoint.latitude(m);
        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let tan_phi1 = sin_phi1 / cos_phi1;

        let w = 1.0 - e2 * sin_phi1 * sin_phi1;
        let n1 = self.ellipsoid.radius / w.sqrt();
        let r1 = self.ellipsoid.radius * (1.0 - e2) / (w * w.sqrt());
        let t1 = tan_phi1 * tan_phi1;
        let c1 = ep2 * cos_phi1 * cos_phi1;
        let d = (map.x - self.false_easting) / (n1 * self.k0);
        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d2 * d2;
        let d5 = d4 * d;
        let d6 = d4 * d2;

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);
        let lon = self.lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d5
                    / 120.0)
                / cos_phi1;

        Point::new(lon, lat)
    }

    /// Smallest map-space box containing the image of a geodetic box.
    pub fn geodetic_to_map_box(&self, geodetic: &BoundingBox) -> BoundingBox {
        if geodetic.is_empty() {
            return BoundingBox::EMPTY;
        }

        let (min, max) = (geodetic.min, geodetic.max);
        let crosses_meridian = min.x < self.lon0 && self.lon0 < max.x;
        let crosses_equator = min.y < 0.0 && 0.0 < max.y;

        // Northing reaches its equator-ward extreme on the central meridian,
        // easting its outward extreme on the equator.
        let extrema = [
            (crosses_meridian && min.y > 0.0).then_some(Point::new(self.lon0, min.y)),
            (crosses_meridian && max.y < 0.0).then_some(Point::new(self.lon0, max.y)),
            (crosses_equator && min.x < self.lon0).then_some(Point::new(min.x, 0.0)),
            (crosses_equator && max.x > self.lon0).then_some(Point::new(max.x, 0.0)),
        ];

        bound_with_extrema(geodetic, extrema, |p| self.geodetic_to_map(p))
    }

    /// Smallest geodetic box containing the preimage of a map box.
    pub fn map_to_geodetic_box(&self, map: &BoundingBox) -> BoundingBox {
        if map.is_empty() {
            return BoundingBox::EMPTY;
        }

        let (min, max) = (map.min, map.max);
        let fe = self.false_easting;
        let equator = self.equator_northing();
        let crosses_meridian = min.x < fe && fe < max.x;
        let crosses_equator = min.y < equator && equator < max.y;

        // The easting conditions are reversed with respect to the forward
        // case: in map space the longitude extremum along the equator lies on
        // the edge nearest the central meridian.
        let extrema = [
            (crosses_meridian && min.y < equator).then_some(Point::new(fe, min.y)),
            (crosses_meridian && max.y > equator).then_some(Point::new(fe, max.y)),
            (crosses_equator && min.x > fe).then_some(Point::new(min.x, equator)),
            (crosses_equator && max.x < fe).then_some(Point::new(max.x, equator)),
        ];

        bound_with_extrema(map, extrema, |p| self.map_to_geodetic(p))
    }
}

/// Transform the four corners of `bbox` plus any crossing extrema and
/// accumulate the results.
fn bound_with_extrema<F>(
    bbox: &BoundingBox,
    extrema: [Option<Point>; 4],
    transform: F,
) -> BoundingBox
where
    F: Fn(Point) -> Point,
{
    let mut result: BoundingBox = bbox.vertices().into_iter().map(&transform).collect();
    for p in extrema.into_iter().flatten() {
        let q = transform(p);
        trace!(x = p.x, y = p.y, tx = q.x, ty = q.y, "adding crossing extremum to box");
        result.add_point(q);
    }
    result
}

impl Projection for TransverseMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let p = self.geodetic_to_map(Point::new(lon, lat));
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(ProjError::TransformFailed(format!(
                "transverse Mercator forward is undefined at lon={lon}, lat={lat}"
            )));
        }
        Ok(p.into())
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let p = self.map_to_geodetic(Point::new(x, y));
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(ProjError::TransformFailed(format!(
                "transverse Mercator inverse is undefined at x={x}, y={y}"
            )));
        }
        Ok(p.into())
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}
