use crate::graph::EdgeInfo;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

bitflags! {
    /// The set of transport modes permitted to traverse an edge.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        const CAR = 1 << 0;
        const BICYCLE = 1 << 1;
        const FOOT = 1 << 2;

        const ALL = Self::CAR.bits() | Self::BICYCLE.bits() | Self::FOOT.bits();
    }
}

/// The classification of a way, which determines its default
/// free-flow speed and the transport modes which may use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum RoadClass {
    /// A restricted access major divided highway.
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Unclassified,
    Residential,

    /// Residential streets where pedestrians have legal priority over cars.
    LivingStreet,
    Service,
    Cycleway,
    Footway,
}

impl RoadClass {
    /// The free-flow speed of the class, in km/h.
    #[inline]
    pub const fn default_speed(&self) -> f64 {
        match self {
            RoadClass::Motorway => 100.0,
            RoadClass::Trunk => 80.0,
            RoadClass::Primary => 65.0,
            RoadClass::Secondary => 60.0,
            RoadClass::Tertiary => 50.0,
            RoadClass::Unclassified => 30.0,
            RoadClass::Residential => 30.0,
            RoadClass::LivingStreet => 10.0,
            RoadClass::Service => 20.0,
            RoadClass::Cycleway => 18.0,
            RoadClass::Footway => 5.0,
        }
    }

    #[inline]
    pub const fn access(&self) -> Access {
        match self {
            RoadClass::Motorway | RoadClass::Trunk => Access::CAR,
            RoadClass::Cycleway => Access::BICYCLE.union(Access::FOOT),
            RoadClass::Footway => Access::FOOT,
            _ => Access::ALL,
        }
    }
}

/// A general set of transportation modes, used to
/// select which edges of the network may be traversed.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Car,
    Bicycle,
    Foot,
}

impl TransportMode {
    #[inline]
    pub const fn access(&self) -> Access {
        match self {
            TransportMode::Car => Access::CAR,
            TransportMode::Bicycle => Access::BICYCLE,
            TransportMode::Foot => Access::FOOT,
        }
    }
}

/// Decides whether an edge may be used, both when searching for
/// candidates and when routing between them.
///
/// Any closure over an [`EdgeInfo`] is a filter, as is a [`TransportMode`].
pub trait EdgeFilter {
    fn permits(&self, edge: &EdgeInfo) -> bool;
}

impl EdgeFilter for TransportMode {
    #[inline]
    fn permits(&self, edge: &EdgeInfo) -> bool {
        edge.access.contains(self.access())
    }
}

impl<F> EdgeFilter for F
where
    F: Fn(&EdgeInfo) -> bool,
{
    #[inline]
    fn permits(&self, edge: &EdgeInfo) -> bool {
        self(edge)
    }
}
