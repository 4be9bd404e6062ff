//! Declarative transverse Mercator configuration.
//!
//! Angles are in degrees here so the parameters read naturally in TOML/JSON.
//! Missing fields fall back to unit scale, zero offsets and WGS84.

use serde::{Deserialize, Serialize};

use crate::error::ProjError;
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::transverse_mercator::TransverseMercator;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipsoidParams {
    pub radius: f64,
    pub flattening: f64,
}

impl Default for EllipsoidParams {
    fn default() -> Self {
        Self::from(&WGS84)
    }
}

impl From<&Ellipsoid> for EllipsoidParams {
    fn from(ellipsoid: &Ellipsoid) -> Self {
        Self {
            radius: ellipsoid.radius,
            flattening: ellipsoid.flattening,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransverseMercatorParams {
    /// Central meridian longitude (degrees)
    pub central_meridian: f64,
    /// Latitude of origin (degrees)
    pub reference_latitude: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    pub ellipsoid: EllipsoidParams,
}

impl Default for TransverseMercatorParams {
    fn default() -> Self {
        Self {
            central_meridian: 0.0,
            reference_latitude: 0.0,
            scale_factor: 1.0,
            false_easting: 0.0,
            false_northing: 0.0,
            ellipsoid: EllipsoidParams::default(),
        }
    }
}

impl TransverseMercatorParams {
    /// Check that every value lies in the domain the series are valid for.
    pub fn validate(&self) -> Result<(), ProjError> {
        let finite = [
            ("central_meridian", self.central_meridian),
            ("reference_latitude", self.reference_latitude),
            ("scale_factor", self.scale_factor),
            ("false_easting", self.false_easting),
            ("false_northing", self.false_northing),
            ("ellipsoid.radius", self.ellipsoid.radius),
            ("ellipsoid.flattening", self.ellipsoid.flattening),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ProjError::InvalidParameter(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.ellipsoid.radius <= 0.0 {
            return Err(ProjError::InvalidParameter(format!(
                "ellipsoid.radius must be positive, got {}",
                self.ellipsoid.radius
            )));
        }
        if !(0.0..1.0).contains(&self.ellipsoid.flattening) {
            return Err(ProjError::InvalidParameter(format!(
                "ellipsoid.flattening must be in [0, 1), got {}",
                self.ellipsoid.flattening
            )));
        }
        if self.scale_factor <= 0.0 {
            return Err(ProjError::InvalidParameter(format!(
                "scale_factor must be positive, got {}",
                self.scale_factor
            )));
        }
        if self.reference_latitude.abs() > 90.0 {
            return Err(ProjError::InvalidParameter(format!(
                "reference_latitude must be within ±90°, got {}",
                self.reference_latitude
            )));
        }
        Ok(())
    }
}

impl TransverseMercator {
    /// Build a projection from validated parameters.
    pub fn from_params(params: &TransverseMercatorParams) -> Result<Self, ProjError> {
        params.validate()?;
        let mut tm = TransverseMercator::with_axis(
            params.central_meridian.to_radians(),
            params.reference_latitude.to_radians(),
            params.ellipsoid.radius,
            params.ellipsoid.flattening,
        );
        tm.set_stretching(params.scale_factor);
        tm.set_false_easting(params.false_easting);
        tm.set_false_northing(params.false_northing);
        Ok(tm)
    }

    /// Current configuration in declarative form.
    pub fn params(&self) -> TransverseMercatorParams {
        let offset = self.false_offset();
        TransverseMercatorParams {
            central_meridian: self.central_meridian().to_degrees(),
            reference_latitude: self.reference_latitude().to_degrees(),
            scale_factor: self.scale_factor(),
            false_easting: offset.x,
            false_northing: offset.y,
            ellipsoid: EllipsoidParams::from(self.ellipsoid()),
        }
    }
}

impl TryFrom<&TransverseMercatorParams> for TransverseMercator {
    type Error = ProjError;

    fn try_from(params: &TransverseMercatorParams) -> Result<Self, Self::Error> {
        Self::from_params(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use approx::assert_relative_eq;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let params: TransverseMercatorParams = toml::from_str(
            r#"
            central_meridian = 15.0
            reference_latitude = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(params.scale_factor, 1.0);
        assert_eq!(params.false_easting, 0.0);
        assert_eq!(params.false_northing, 0.0);
        assert_eq!(params.ellipsoid, EllipsoidParams::from(&WGS84));

        let tm = TransverseMercator::from_params(&params).unwrap();
        assert_relative_eq!(tm.central_meridian(), 15.0_f64.to_radians());
        assert_relative_eq!(tm.reference_latitude(), 10.0_f64.to_radians());
        assert_eq!(tm.false_offset(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_full_toml() {
        let params: TransverseMercatorParams = toml::from_str(
            r#"
            central_meridian = -75.0
            reference_latitude = 0.0
            scale_factor = 0.9996
            false_easting = 500000.0
            false_northing = 10000000.0

            [ellipsoid]
            radius = 6378206.4
            flattening = 0.0033900753039287634
            "#,
        )
        .unwrap();
        let tm = TransverseMercator::try_from(&params).unwrap();
        assert_eq!(tm.scale_factor(), 0.9996);
        assert_eq!(tm.false_offset(), Point::new(500_000.0, 10_000_000.0));
        assert_eq!(tm.ellipsoid().radius, 6_378_206.4);
    }

    #[test]
    fn test_params_roundtrip_through_projection() {
        let params = TransverseMercatorParams {
            central_meridian: 9.0,
            reference_latitude: 42.5,
            scale_factor: 0.9996,
            false_easting: 500_000.0,
            false_northing: -100.0,
            ellipsoid: EllipsoidParams::default(),
        };
        let back = TransverseMercator::from_params(&params).unwrap().params();
        assert_relative_eq!(back.central_meridian, 9.0, epsilon = 1e-12);
        assert_relative_eq!(back.reference_latitude, 42.5, epsilon = 1e-12);
        assert_eq!(back.scale_factor, params.scale_factor);
        assert_eq!(back.false_easting, params.false_easting);
        assert_eq!(back.false_northing, params.false_northing);
        assert_eq!(back.ellipsoid, params.ellipsoid);

        let text = toml::to_string(&back).unwrap();
        let reparsed: TransverseMercatorParams = toml::from_str(&text).unwrap();
        assert_eq!(reparsed, back);
    }

    #[test]
    fn test_invalid_params() {
        let bad = [
            TransverseMercatorParams {
                scale_factor: 0.0,
                ..Default::default()
            },
            TransverseMercatorParams {
                reference_latitude: 91.0,
                ..Default::default()
            },
            TransverseMercatorParams {
                central_meridian: f64::NAN,
                ..Default::default()
            },
            TransverseMercatorParams {
                ellipsoid: EllipsoidParams {
                    radius: -1.0,
                    flattening: 0.0,
                },
                ..Default::default()
            },
            TransverseMercatorParams {
                ellipsoid: EllipsoidParams {
                    radius: 1.0,
                    flattening: 1.0,
                },
                ..Default::default()
            },
        ];
        for params in &bad {
            assert!(
                matches!(
                    TransverseMercator::from_params(params),
                    Err(ProjError::InvalidParameter(_))
                ),
                "{params:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(TransverseMercatorParams::default().validate().is_ok());
    }
}
