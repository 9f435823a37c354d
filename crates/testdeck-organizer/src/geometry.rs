//! Pointer geometry: row bands, hit-testing, and band zones.

use crate::projection::{NodeRef, ProjectedRow};

/// Default pixel distance a press must travel before it becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 5.0;
/// Default fraction of a row's height treated as the hierarchy band.
pub const DEFAULT_HIERARCHY_BAND: f32 = 0.5;

/// A pointer position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The vertical zone of a row a pointer falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandZone {
    /// The reorder band above the row's center region.
    Upper,
    /// The central hierarchy band.
    Middle,
    /// The reorder band below the row's center region.
    Lower,
}

/// One row's vertical extent on screen.
///
/// The display layer reports these for the rows of the current
/// projection; the engine never sees widget objects, only bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBand {
    /// The node the row displays.
    pub node: NodeRef,
    /// Top edge, in pixels.
    pub top: f32,
    /// Row height, in pixels.
    pub height: f32,
}

impl RowBand {
    /// Create a band.
    pub fn new(node: NodeRef, top: f32, height: f32) -> Self {
        Self { node, top, height }
    }

    /// The vertical center of the row.
    pub fn center(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Classify a pointer y into this row's zones.
    ///
    /// `hierarchy_band` is the central fraction of the height (0.5 means
    /// the middle 50%, leaving 25% reorder bands above and below). A
    /// degenerate height classifies as the middle.
    pub fn zone(&self, y: f32, hierarchy_band: f32) -> BandZone {
        if self.height <= 0.0 {
            return BandZone::Middle;
        }
        let relative = ((y - self.top) / self.height).clamp(0.0, 1.0);
        let margin = (1.0 - hierarchy_band.clamp(0.0, 1.0)) / 2.0;
        if relative < margin {
            BandZone::Upper
        } else if relative > 1.0 - margin {
            BandZone::Lower
        } else {
            BandZone::Middle
        }
    }
}

/// The vertical layout of the currently visible rows.
#[derive(Debug, Clone, Default)]
pub struct RowLayout {
    rows: Vec<RowBand>,
}

impl RowLayout {
    /// Create a layout from explicit bands.
    pub fn new(rows: Vec<RowBand>) -> Self {
        Self { rows }
    }

    /// Create a layout of uniformly tall rows stacked from y = 0, one
    /// per projected row in order.
    pub fn uniform(projection: &[ProjectedRow], row_height: f32) -> Self {
        let rows = projection
            .iter()
            .enumerate()
            .map(|(i, row)| RowBand::new(row.node, i as f32 * row_height, row_height))
            .collect();
        Self { rows }
    }

    /// The bands, in display order.
    pub fn rows(&self) -> &[RowBand] {
        &self.rows
    }

    /// Whether the layout has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row whose vertical center is nearest the pointer.
    ///
    /// Ties resolve to the earlier row. Returns `None` for an empty
    /// layout; a pointer above or below all rows still snaps to the
    /// nearest edge row.
    pub fn nearest_row(&self, pointer: Point) -> Option<&RowBand> {
        self.rows
            .iter()
            .min_by(|a, b| {
                let da = (pointer.y - a.center()).abs();
                let db = (pointer.y - b.center()).abs();
                da.total_cmp(&db)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn band(top: f32, height: f32) -> RowBand {
        RowBand::new(NodeRef::Folder(Uuid::new_v4()), top, height)
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zones_split_25_50_25() {
        let row = band(100.0, 40.0);
        assert_eq!(row.zone(105.0, 0.5), BandZone::Upper);
        assert_eq!(row.zone(120.0, 0.5), BandZone::Middle);
        assert_eq!(row.zone(112.0, 0.5), BandZone::Middle);
        assert_eq!(row.zone(135.0, 0.5), BandZone::Lower);
    }

    #[test]
    fn pointer_outside_the_row_clamps_to_its_edges() {
        let row = band(100.0, 40.0);
        assert_eq!(row.zone(10.0, 0.5), BandZone::Upper);
        assert_eq!(row.zone(500.0, 0.5), BandZone::Lower);
    }

    #[test]
    fn degenerate_height_is_middle() {
        let row = band(100.0, 0.0);
        assert_eq!(row.zone(100.0, 0.5), BandZone::Middle);
    }

    #[test]
    fn nearest_row_picks_the_closest_center() {
        let rows = vec![band(0.0, 20.0), band(20.0, 20.0), band(40.0, 20.0)];
        let second = rows[1];
        let layout = RowLayout::new(rows);
        let hit = layout.nearest_row(Point::new(5.0, 33.0)).unwrap();
        assert_eq!(hit.node, second.node);
    }

    #[test]
    fn pointer_below_all_rows_snaps_to_the_last() {
        let rows = vec![band(0.0, 20.0), band(20.0, 20.0)];
        let last = rows[1];
        let layout = RowLayout::new(rows);
        let hit = layout.nearest_row(Point::new(0.0, 900.0)).unwrap();
        assert_eq!(hit.node, last.node);
    }

    #[test]
    fn empty_layout_has_no_candidate() {
        let layout = RowLayout::default();
        assert!(layout.nearest_row(Point::new(0.0, 0.0)).is_none());
    }
}
