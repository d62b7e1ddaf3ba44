use serde::{Deserialize, Serialize};

use crate::rect::{Point, Rect};

/// A rectangular region of a monitor's work area that windows snap into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub rect: Rect,
}

impl Zone {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// An ordered collection of zones plus a layout identifier.
///
/// The order is significant: snap hotkeys cycle through zones by index,
/// and per-window zone stamps record a 1-based position in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneLayout {
    /// Stable identifier used to key persisted per-app zone records.
    pub id: String,
    pub zones: Vec<Zone>,
}

impl ZoneLayout {
    pub fn new(id: impl Into<String>, zones: Vec<Zone>) -> Self {
        Self {
            id: id.into(),
            zones,
        }
    }

    /// Splits the work area into `count` equal vertical columns.
    pub fn columns(id: impl Into<String>, work_area: Rect, count: usize) -> Self {
        let mut zones = Vec::with_capacity(count);
        if count > 0 {
            let width = work_area.width / count as i32;
            for i in 0..count {
                zones.push(Zone::new(Rect::new(
                    work_area.x + width * i as i32,
                    work_area.y,
                    width,
                    work_area.height,
                )));
            }
        }
        Self {
            id: id.into(),
            zones,
        }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zone(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// Returns the index of the zone under the given point.
    ///
    /// Zones may overlap; the widest hit wins, and ties go to the earlier
    /// zone so repeated queries are stable.
    pub fn zone_at(&self, pt: Point) -> Option<usize> {
        self.zones
            .iter()
            .enumerate()
            .filter(|(_, z)| z.rect.contains(pt))
            .max_by(|(ai, a), (bi, b)| {
                a.rect
                    .width
                    .cmp(&b.rect.width)
                    .then(bi.cmp(ai)) // prefer the earlier index on ties
            })
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ZoneLayout {
        ZoneLayout::columns("cols", Rect::new(0, 0, 900, 600), 3)
    }

    #[test]
    fn columns_partition_the_work_area() {
        let l = layout();
        assert_eq!(l.len(), 3);
        assert_eq!(l.zone(0).unwrap().rect, Rect::new(0, 0, 300, 600));
        assert_eq!(l.zone(2).unwrap().rect, Rect::new(600, 0, 300, 600));
    }

    #[test]
    fn zone_at_finds_the_column_under_the_point() {
        let l = layout();
        assert_eq!(l.zone_at(Point::new(50, 50)), Some(0));
        assert_eq!(l.zone_at(Point::new(450, 50)), Some(1));
        assert_eq!(l.zone_at(Point::new(899, 599)), Some(2));
        assert_eq!(l.zone_at(Point::new(1000, 50)), None);
    }

    #[test]
    fn overlapping_zones_resolve_to_the_widest() {
        let l = ZoneLayout::new(
            "overlap",
            vec![
                Zone::new(Rect::new(0, 0, 400, 600)),
                Zone::new(Rect::new(0, 0, 900, 600)),
            ],
        );
        assert_eq!(l.zone_at(Point::new(100, 100)), Some(1));
    }

    #[test]
    fn equal_width_overlap_prefers_the_earlier_zone() {
        let l = ZoneLayout::new(
            "tie",
            vec![
                Zone::new(Rect::new(0, 0, 400, 600)),
                Zone::new(Rect::new(0, 0, 400, 600)),
            ],
        );
        assert_eq!(l.zone_at(Point::new(100, 100)), Some(0));
    }
}
