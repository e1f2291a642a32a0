//! Synthetic road networks and GPS traces, expressed as WKT.
//!
//! Each network is a `MULTILINESTRING` where every linestring is one two-way
//! residential way. Vertices that share identical coordinates across ways
//! are intersections.

/// A single, straight east-west road of roughly 925m.
pub const STRAIGHT_ROAD: &str = "MULTILINESTRING ((151.18 -33.88, 151.19 -33.88))";

/// Two observations ~500m apart, ~10m north of [`STRAIGHT_ROAD`].
pub const STRAIGHT_ROAD_TRACE: &str = "LINESTRING (151.182 -33.87991, 151.187409 -33.87991)";

/// A 4x4 street grid, with blocks of ~185m (east-west) by ~200m (north-south).
pub const GRID: &str = "MULTILINESTRING (\
    (151.18 -33.88, 151.182 -33.88, 151.184 -33.88, 151.186 -33.88), \
    (151.18 -33.8818, 151.182 -33.8818, 151.184 -33.8818, 151.186 -33.8818), \
    (151.18 -33.8836, 151.182 -33.8836, 151.184 -33.8836, 151.186 -33.8836), \
    (151.18 -33.8854, 151.182 -33.8854, 151.184 -33.8854, 151.186 -33.8854), \
    (151.18 -33.88, 151.18 -33.8818, 151.18 -33.8836, 151.18 -33.8854), \
    (151.182 -33.88, 151.182 -33.8818, 151.182 -33.8836, 151.182 -33.8854), \
    (151.184 -33.88, 151.184 -33.8818, 151.184 -33.8836, 151.184 -33.8854), \
    (151.186 -33.88, 151.186 -33.8818, 151.186 -33.8836, 151.186 -33.8854))";

/// Heads east along the northern-most street of [`GRID`], then turns
/// south down the third avenue. Every position lies mid-block, within
/// ~5m of the street it was recorded on.
pub const GRID_TRACE: &str = "LINESTRING (\
    151.1805 -33.88003, 151.1812 -33.87998, \
    151.1826 -33.88004, 151.1835 -33.87997, \
    151.18403 -33.8806, 151.18397 -33.8812, \
    151.18404 -33.8826, 151.18396 -33.8831)";

/// Two parallel roads ~1.1km apart which are not connected to one another.
pub const ISLANDS: &str = "MULTILINESTRING (\
    (151.18 -33.88, 151.185 -33.88), \
    (151.18 -33.89, 151.185 -33.89))";

/// Starts on the northern road of [`ISLANDS`] and finishes on the southern one.
pub const ISLANDS_TRACE: &str = "LINESTRING (\
    151.181 -33.88003, 151.182 -33.87998, \
    151.183 -33.89002, 151.184 -33.88997)";

/// A position far (>1km) from any road in the fixtures above.
pub const NOWHERE: &str = "POINT (151.25 -33.95)";
