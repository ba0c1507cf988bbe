//! Data models for a technology radar.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::error::{RadarError, RadarResult};

/// Fixed slot of a ring, independent of declaration order in the spec file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingPosition {
    Inner,
    MidInner,
    MidOuter,
    Outer,
}

impl RingPosition {
    /// All ring positions, innermost first.
    pub const OUTWARD: [RingPosition; 4] = [
        RingPosition::Inner,
        RingPosition::MidInner,
        RingPosition::MidOuter,
        RingPosition::Outer,
    ];

    /// Positions handed out to rings declared as a plain list, innermost first.
    ///
    /// A three-ring radar keeps the innermost and outermost slots and drops
    /// `mid_outer`.
    pub fn for_count(count: usize) -> Option<&'static [RingPosition]> {
        const THREE: [RingPosition; 3] = [
            RingPosition::Inner,
            RingPosition::MidInner,
            RingPosition::Outer,
        ];
        match count {
            3 => Some(&THREE),
            4 => Some(&Self::OUTWARD),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RingPosition::Inner => "inner",
            RingPosition::MidInner => "mid_inner",
            RingPosition::MidOuter => "mid_outer",
            RingPosition::Outer => "outer",
        }
    }
}

impl fmt::Display for RingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed screen slot of a quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadrantPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl QuadrantPosition {
    pub const ALL: [QuadrantPosition; 4] = [
        QuadrantPosition::TopLeft,
        QuadrantPosition::TopRight,
        QuadrantPosition::BottomLeft,
        QuadrantPosition::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuadrantPosition::TopLeft => "top_left",
            QuadrantPosition::TopRight => "top_right",
            QuadrantPosition::BottomLeft => "bottom_left",
            QuadrantPosition::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for QuadrantPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permutation of the four quadrant positions.
///
/// Visualizers disagree on which screen slot is quadrant 0, so every
/// consumer asks for quadrants in its own order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantOrder([QuadrantPosition; 4]);

impl QuadrantOrder {
    /// Clockwise starting at the top left.
    pub const CLOCKWISE: QuadrantOrder = QuadrantOrder([
        QuadrantPosition::TopLeft,
        QuadrantPosition::TopRight,
        QuadrantPosition::BottomRight,
        QuadrantPosition::BottomLeft,
    ]);

    /// Column-wise: top left, bottom left, top right, bottom right.
    pub const TL_BL_TR_BR: QuadrantOrder = QuadrantOrder([
        QuadrantPosition::TopLeft,
        QuadrantPosition::BottomLeft,
        QuadrantPosition::TopRight,
        QuadrantPosition::BottomRight,
    ]);

    /// Bottom right, bottom left, top left, top right.
    pub const BR_BL_TL_TR: QuadrantOrder = QuadrantOrder([
        QuadrantPosition::BottomRight,
        QuadrantPosition::BottomLeft,
        QuadrantPosition::TopLeft,
        QuadrantPosition::TopRight,
    ]);

    /// Build an order, rejecting anything that is not a permutation.
    pub fn new(positions: [QuadrantPosition; 4]) -> RadarResult<Self> {
        for (i, position) in positions.iter().enumerate() {
            if positions[..i].contains(position) {
                let listed = positions
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(RadarError::InvalidQuadrantOrder(listed));
            }
        }
        Ok(Self(positions))
    }

    pub fn positions(&self) -> &[QuadrantPosition; 4] {
        &self.0
    }
}

/// A concentric adoption band.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ring {
    pub id: String,
    pub name: String,
}

impl Ring {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One of the four category sectors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quadrant {
    pub id: String,
    pub name: String,
}

impl Quadrant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One tracked item on the radar.
///
/// `ring` and `quadrant` hold the *names* of the containing ring and
/// quadrant. `previous_ring` is `None` for a new item, equal to `ring` for an
/// unchanged one, and different from `ring` for an item that moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blip {
    pub name: String,
    pub ring: String,
    pub quadrant: String,
    pub previous_ring: Option<String>,
    pub description: Vec<String>,
    pub references: Vec<String>,
    pub tags: Vec<String>,
}

impl Blip {
    /// Create a new (never seen before) blip.
    pub fn new(
        name: impl Into<String>,
        ring: impl Into<String>,
        quadrant: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ring: ring.into(),
            quadrant: quadrant.into(),
            previous_ring: None,
            description: Vec::new(),
            references: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_previous_ring(mut self, previous_ring: Option<String>) -> Self {
        self.previous_ring = previous_ring;
        self
    }

    pub fn with_description(mut self, description: Vec<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_references(mut self, references: Vec<String>) -> Self {
        self.references = references;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn is_new(&self) -> bool {
        self.previous_ring.is_none()
    }

    /// True unless the blip sits in the same ring as before. New blips count
    /// as moved.
    pub fn is_moved(&self) -> bool {
        self.previous_ring.as_deref() != Some(self.ring.as_str())
    }
}

impl fmt::Display for Blip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blip({}, r={}, q={}", self.name, self.ring, self.quadrant)?;
        if self.is_new() {
            f.write_str(" NEW")?;
        }
        f.write_str(")")
    }
}

/// The radar aggregate: rings, quadrants and the blips placed on them.
///
/// Cardinalities are checked once in [`Radar::new`]; afterwards the ring and
/// quadrant sets never change and blips are only appended.
#[derive(Debug, Clone)]
pub struct Radar {
    rings: BTreeMap<RingPosition, Ring>,
    quadrants: BTreeMap<QuadrantPosition, Quadrant>,
    blips: Vec<Blip>,
}

impl Radar {
    pub const MIN_RINGS: usize = 3;
    pub const MAX_RINGS: usize = 4;
    pub const QUADRANTS: usize = 4;

    /// Create an empty radar.
    pub fn new(
        rings: BTreeMap<RingPosition, Ring>,
        quadrants: BTreeMap<QuadrantPosition, Quadrant>,
    ) -> RadarResult<Self> {
        if !(Self::MIN_RINGS..=Self::MAX_RINGS).contains(&rings.len()) {
            return Err(RadarError::InvalidRings(rings.into_values().collect()));
        }
        if quadrants.len() != Self::QUADRANTS {
            return Err(RadarError::InvalidQuadrants(
                quadrants.into_values().collect(),
            ));
        }
        Ok(Self {
            rings,
            quadrants,
            blips: Vec::new(),
        })
    }

    /// Append a blip; discovery order is preserved.
    pub fn add_blip(&mut self, blip: Blip) {
        self.blips.push(blip);
    }

    pub fn blips(&self) -> &[Blip] {
        &self.blips
    }

    pub fn blip_count(&self) -> usize {
        self.blips.len()
    }

    pub fn ring(&self, position: RingPosition) -> Option<&Ring> {
        self.rings.get(&position)
    }

    pub fn quadrant(&self, position: QuadrantPosition) -> Option<&Quadrant> {
        self.quadrants.get(&position)
    }

    /// Rings from innermost to outermost, skipping unused positions.
    pub fn rings_outward(&self) -> Vec<&Ring> {
        RingPosition::OUTWARD
            .iter()
            .filter_map(|position| self.rings.get(position))
            .collect()
    }

    /// Rings from outermost to innermost.
    pub fn rings_inward(&self) -> Vec<&Ring> {
        let mut rings = self.rings_outward();
        rings.reverse();
        rings
    }

    /// Quadrants in the given order.
    pub fn quadrants(&self, order: QuadrantOrder) -> Vec<&Quadrant> {
        order
            .positions()
            .iter()
            .filter_map(|position| self.quadrants.get(position))
            .collect()
    }

    /// Index of the ring named `name` in [`Radar::rings_outward`].
    pub fn ring_index(&self, name: &str) -> Option<usize> {
        self.rings_outward().iter().position(|r| r.name == name)
    }

    /// Index of the quadrant named `name` in [`Radar::quadrants`] for `order`.
    pub fn quadrant_index(&self, name: &str, order: QuadrantOrder) -> Option<usize> {
        self.quadrants(order).iter().position(|q| q.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rings(positions: &[RingPosition]) -> BTreeMap<RingPosition, Ring> {
        positions
            .iter()
            .map(|p| (*p, Ring::new(p.as_str(), p.as_str().to_uppercase())))
            .collect()
    }

    fn quadrants() -> BTreeMap<QuadrantPosition, Quadrant> {
        QuadrantPosition::ALL
            .iter()
            .map(|p| (*p, Quadrant::new(p.as_str(), p.as_str().to_uppercase())))
            .collect()
    }

    #[test]
    fn test_radar_rejects_two_rings() {
        let result = Radar::new(rings(&[RingPosition::Inner, RingPosition::Outer]), quadrants());
        assert!(matches!(result, Err(RadarError::InvalidRings(r)) if r.len() == 2));
    }

    #[test]
    fn test_radar_rejects_three_quadrants() {
        let mut q = quadrants();
        q.remove(&QuadrantPosition::TopLeft);
        let result = Radar::new(rings(&RingPosition::OUTWARD), q);
        assert!(matches!(result, Err(RadarError::InvalidQuadrants(q)) if q.len() == 3));
    }

    #[test]
    fn test_rings_outward_skips_missing_position() {
        let radar = Radar::new(
            rings(&[RingPosition::Outer, RingPosition::Inner, RingPosition::MidOuter]),
            quadrants(),
        )
        .unwrap();

        let ids: Vec<_> = radar.rings_outward().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["inner", "mid_outer", "outer"]);
    }

    #[test]
    fn test_rings_inward_reverses_outward() {
        for positions in [
            &RingPosition::OUTWARD[..],
            &[RingPosition::Inner, RingPosition::MidInner, RingPosition::Outer][..],
        ] {
            let radar = Radar::new(rings(positions), quadrants()).unwrap();
            let mut inward = radar.rings_inward();
            inward.reverse();
            assert_eq!(inward, radar.rings_outward());
        }
    }

    #[test]
    fn test_quadrants_follow_order() {
        let radar = Radar::new(rings(&RingPosition::OUTWARD), quadrants()).unwrap();

        for order in [
            QuadrantOrder::CLOCKWISE,
            QuadrantOrder::TL_BL_TR_BR,
            QuadrantOrder::BR_BL_TL_TR,
        ] {
            let ids: Vec<_> = radar.quadrants(order).iter().map(|q| q.id.clone()).collect();
            let expected: Vec<_> = order.positions().iter().map(|p| p.as_str().to_string()).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_quadrant_order_rejects_duplicates() {
        let result = QuadrantOrder::new([
            QuadrantPosition::TopLeft,
            QuadrantPosition::TopLeft,
            QuadrantPosition::BottomLeft,
            QuadrantPosition::BottomRight,
        ]);
        assert!(matches!(result, Err(RadarError::InvalidQuadrantOrder(_))));
    }

    #[test]
    fn test_indices_use_ordered_views() {
        let radar = Radar::new(rings(&RingPosition::OUTWARD), quadrants()).unwrap();
        assert_eq!(radar.ring_index("OUTER"), Some(3));
        assert_eq!(
            radar.quadrant_index("BOTTOM_RIGHT", QuadrantOrder::BR_BL_TL_TR),
            Some(0)
        );
        assert_eq!(radar.ring_index("missing"), None);
    }

    #[test]
    fn test_blip_new_and_moved() {
        let new = Blip::new("Rust", "Adopt", "Languages");
        assert!(new.is_new());
        assert!(new.is_moved());
        assert_eq!(new.to_string(), "Blip(Rust, r=Adopt, q=Languages NEW)");

        let unchanged = new.clone().with_previous_ring(Some("Adopt".to_string()));
        assert!(!unchanged.is_new());
        assert!(!unchanged.is_moved());

        let moved = new.with_previous_ring(Some("Trial".to_string()));
        assert!(moved.is_moved());
    }
}
