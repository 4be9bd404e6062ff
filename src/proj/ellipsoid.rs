/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (caller's length unit, metres for the presets)
    pub radius: f64,
    /// Flattening (dimensionless)
    pub flattening: f64,
    /// First eccentricity squared: 2f - f^2
    pub squared_eccentricity: f64,
    /// Second eccentricity squared: e^2 / (1 - e^2)
    pub second_squared_eccentricity: f64,
}

impl Ellipsoid {
    pub const fn new(radius: f64, flattening: f64) -> Self {
        let e2 = 2.0 * flattening - flattening * flattening;
        let ep2 = e2 / (1.0 - e2);
        Self {
            radius,
            flattening,
            squared_eccentricity: e2,
            second_squared_eccentricity: ep2,
        }
    }

    /// A sphere of the given radius.
    pub const fn sphere(radius: f64) -> Self {
        Self::new(radius, 0.0)
    }

    /// Semi-minor axis: a * (1 - f).
    pub fn semi_minor_axis(&self) -> f64 {
        self.radius * (1.0 - self.flattening)
    }

    /// First eccentricity (computed at runtime, `sqrt` is not const).
    pub fn eccentricity(&self) -> f64 {
        self.squared_eccentricity.sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        WGS84
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_223_563);
pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_222_101);
