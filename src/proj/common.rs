//! Series coefficients for the ellipsoidal meridian arc and its inverse.

use super::ellipsoid::Ellipsoid;

/// Meridian arc length from the equator, truncated at e⁶.
///
/// M(φ) = a·(c1·φ − c2·sin 2φ + c3·sin 4φ − c4·sin 6φ)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeridianArc {
    radius: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    c4: f64,
}

impl MeridianArc {
    pub fn new(ellipsoid: &Ellipsoid) -> Self {
        let e2 = ellipsoid.squared_eccentricity;
        Self {
            radius: ellipsoid.radius,
            c1: 1.0 - (1.0 + (3.0 + 1.25 * e2) * e2 / 16.0) * e2 / 4.0,
            c2: (3.0 + (3.0 + 1.40625 * e2) * e2 / 4.0) * e2 / 8.0,
            c3: (15.0 + 11.25 * e2) * e2 * e2 / 256.0,
            c4: 35.0 * e2 * e2 * e2 / 3072.0,
        }
    }

    /// The four coefficients `[c1, c2, c3, c4]`.
    pub fn coefficients(&self) -> [f64; 4] {
        [self.c1, self.c2, self.c3, self.c4]
    }

    /// Arc length from the equator to latitude `phi` (radians).
    pub fn length(&self, phi: f64) -> f64 {
        self.radius
            * (self.c1 * phi - self.c2 * (2.0 * phi).sin() + self.c3 * (4.0 * phi).sin()
                - self.c4 * (6.0 * phi).sin())
    }
}

/// Footpoint latitude from meridian arc length (rectifying latitude series in e1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footpoint {
    e1: f64,
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    c4: f64,
}

impl Footpoint {
    pub fn new(ellipsoid: &Ellipsoid) -> Self {
        let e2 = ellipsoid.squared_eccentricity;
        let root = (1.0 - e2).sqrt();
        let e1 = (1.0 - root) / (1.0 + root);
        let e1_2 = e1 * e1;
        Self {
            e1,
            c0: ellipsoid.radius * (((-5.0 / 256.0 * e2 - 3.0 / 64.0) * e2 - 0.25) * e2 + 1.0),
            c1: (-27.0 / 32.0 * e1_2 + 1.5) * e1,
            c2: (-55.0 / 32.0 * e1_2 + 21.0 / 16.0) * e1_2,
            c3: 151.0 / 96.0 * e1_2 * e1,
            c4: 1097.0 / 512.0 * e1_2 * e1_2,
        }
    }

    /// Auxiliary eccentricity e1 = (1 − √(1−e²)) / (1 + √(1−e²)).
    pub fn e1(&self) -> f64 {
        self.e1
    }

    /// The five coefficients `[c0, c1, c2, c3, c4]`; `c0` carries the radius.
    pub fn coefficients(&self) -> [f64; 5] {
        [self.c0, self.c1, self.c2, self.c3, self.c4]
    }

    /// Latitude whose meridian arc length is `m`.
    pub fn latitude(&self, m: f64) -> f64 {
        let mu = m / self.c0;
        mu + self.c1 * (2.0 * mu).sin()
            + self.c2 * (4.0 * mu).sin()
            + self.c3 * (6.0 * mu).sin()
            + self.c4 * (8.0 * mu).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::WGS84;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_meridional_arc_equator() {
        let m = MeridianArc::new(&WGS84).length(0.0);
        assert_relative_eq!(m, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_meridional_arc_positive() {
        let m = MeridianArc::new(&WGS84).length(FRAC_PI_4);
        // Arc to 45 degrees on WGS84 is 4984944.378 m
        assert_relative_eq!(m, 4_984_944.378, epsilon = 0.01);
    }

    #[test]
    fn test_meridional_arc_is_odd() {
        let arc = MeridianArc::new(&WGS84);
        assert_relative_eq!(arc.length(-0.7), -arc.length(0.7), epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_reduces_to_radius_times_latitude() {
        let sphere = Ellipsoid::sphere(2.0);
        let arc = MeridianArc::new(&sphere);
        assert_eq!(arc.coefficients(), [1.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(arc.length(0.3), 0.6, epsilon = 1e-15);

        let fp = Footpoint::new(&sphere);
        assert_eq!(fp.e1(), 0.0);
        assert_relative_eq!(fp.latitude(0.6), 0.3, epsilon = 1e-15);
    }

    #[test]
    fn test_footpoint_scale_matches_arc_scale() {
        // c0 is a·c1 written in Horner form
        let arc = MeridianArc::new(&WGS84);
        let fp = Footpoint::new(&WGS84);
        assert_relative_eq!(
            fp.coefficients()[0],
            WGS84.radius * arc.coefficients()[0],
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_footpoint_inverts_arc() {
        let arc = MeridianArc::new(&WGS84);
        let fp = Footpoint::new(&WGS84);
        for deg in [-80.0_f64, -45.0, -10.0, 0.0, 5.0, 33.3, 60.0, 85.0] {
            let phi = deg.to_radians();
            assert_relative_eq!(fp.latitude(arc.length(phi)), phi, epsilon = 1e-9);
        }
    }
}
