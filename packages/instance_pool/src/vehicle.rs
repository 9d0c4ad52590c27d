//! A reference domain for the pool: cars that only differ by type once placed on a map.

use std::fmt;
use std::str::FromStr;

use crate::{Error, PoolKey, Render};

/// The kind of a car. This is the closed key set of a vehicle pool.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VehicleKind {
    /// A small city car.
    Subcompact,
    /// A mid-size car.
    Compact,
    /// A sport utility vehicle.
    Suv,
}

impl PoolKey for VehicleKind {
    fn variants() -> &'static [Self] {
        &[Self::Subcompact, Self::Compact, Self::Suv]
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Subcompact => "subcompact",
            Self::Compact => "compact",
            Self::Suv => "suv",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// The intrinsic state of a pooled car.
///
/// The only thing all cars of one kind have in common is the kind itself, so that is
/// all this stores.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vehicle {
    kind: VehicleKind,
}

impl Vehicle {
    /// The kind this vehicle was created for.
    #[must_use]
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }
}

impl From<VehicleKind> for Vehicle {
    fn from(kind: VehicleKind) -> Self {
        Self { kind }
    }
}

/// The extrinsic state of a car: where it is drawn and in which color.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Placement {
    color: String,
    x: u32,
    y: u32,
}

impl Placement {
    /// Creates a placement at the given coordinates.
    #[must_use]
    pub fn new(color: impl Into<String>, x: u32, y: u32) -> Self {
        Self {
            color: color.into(),
            x,
            y,
        }
    }

    /// The color to draw the car in.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// The coordinates to draw the car at.
    #[must_use]
    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }
}

impl Render<Placement> for Vehicle {
    type Output = String;

    fn render(&self, extrinsic: &Placement) -> String {
        format!(
            "render a car of type {} and color {} at ({}, {})",
            self.kind, extrinsic.color, extrinsic.x, extrinsic.y
        )
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_name() {
        for kind in VehicleKind::variants() {
            assert_eq!(kind.name().parse::<VehicleKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn unknown_kind_is_invalid_key() {
        let error = "hovercraft".parse::<VehicleKind>().unwrap_err();

        assert!(matches!(error, Error::InvalidKey { key } if key == "hovercraft"));
    }

    #[test]
    fn render_describes_placement() {
        let vehicle = Vehicle::from(VehicleKind::Subcompact);

        assert_eq!(
            vehicle.render(&Placement::new("beige", 3, 97)),
            "render a car of type subcompact and color beige at (3, 97)"
        );
    }

    #[test]
    fn render_does_not_touch_vehicle() {
        let vehicle = Vehicle::from(VehicleKind::Compact);
        let before = vehicle.clone();

        let first = vehicle.render(&Placement::new("red", 1, 2));
        let second = vehicle.render(&Placement::new("blue", 3, 4));

        assert_ne!(first, second);
        assert_eq!(vehicle, before);
    }
}
