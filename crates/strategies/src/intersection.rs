// In crates/strategies/src/intersection.rs

use crate::aligner::MacdEntry;

/// A point on the (index, value) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Whether segment `a -> b` and segment `c -> d` cross strictly inside both.
///
/// Parallel and coincident segments never cross, and neither does a meeting
/// point that sits exactly on an endpoint of either segment.
pub fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let det = (b.x - a.x) * (d.y - c.y) - (d.x - c.x) * (b.y - a.y);
    if det == 0.0 {
        return false;
    }

    let lambda = ((d.y - c.y) * (d.x - a.x) + (c.x - d.x) * (d.y - a.y)) / det;
    let gamma = ((a.y - b.y) * (d.x - a.x) + (b.x - a.x) * (d.y - a.y)) / det;

    // NaN fails every comparison, so a NaN reading never crosses.
    (0.0 < lambda && lambda < 1.0) && (0.0 < gamma && gamma < 1.0)
}

/// Flags every entry whose MACD line crossed the signal line since the
/// previous entry. The first entry has no predecessor and is never flagged.
pub fn mark_crossings(entries: &mut [MacdEntry]) {
    for i in 1..entries.len() {
        let (prev, curr) = (entries[i - 1], entries[i]);
        let (x0, x1) = (prev.index as f64, curr.index as f64);

        let crossed = segments_cross(
            Point::new(x0, prev.macd),
            Point::new(x1, curr.macd),
            Point::new(x0, prev.signal),
            Point::new(x1, curr.signal),
        );
        if crossed {
            entries[i].is_intersecting = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(lines: &[(f64, f64)]) -> Vec<MacdEntry> {
        lines
            .iter()
            .enumerate()
            .map(|(index, &(macd, signal))| MacdEntry {
                index,
                macd,
                signal,
                histogram: macd - signal,
                is_intersecting: false,
            })
            .collect()
    }

    fn flags(entries: &[MacdEntry]) -> Vec<bool> {
        entries.iter().map(|e| e.is_intersecting).collect()
    }

    #[test]
    fn crossing_segments() {
        assert!(segments_cross(
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ));
    }

    #[test]
    fn parallel_segments_never_cross() {
        assert!(!segments_cross(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 2.0),
        ));
        // Coincident is parallel too.
        assert!(!segments_cross(
            Point::new(0.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 2.0),
        ));
    }

    #[test]
    fn touching_at_an_endpoint_is_not_a_crossing() {
        // Meet at the start.
        assert!(!segments_cross(
            Point::new(0.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.5),
        ));
        // Meet at the end.
        assert!(!segments_cross(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ));
    }

    #[test]
    fn nan_never_crosses() {
        assert!(!segments_cross(
            Point::new(0.0, f64::NAN),
            Point::new(1.0, 2.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ));
    }

    #[test]
    fn flags_the_later_index_of_each_crossing() {
        let mut series = entries(&[(0.0, 1.0), (2.0, 1.0), (3.0, 2.0), (1.0, 2.5), (0.5, 1.0)]);
        mark_crossings(&mut series);
        assert_eq!(flags(&series), vec![false, true, false, true, false]);
    }

    #[test]
    fn cross_through_a_shared_point_is_missed() {
        // MACD meets the signal exactly at index 1 and carries on through.
        let mut series = entries(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);
        mark_crossings(&mut series);
        assert_eq!(flags(&series), vec![false, false, false]);
    }

    #[test]
    fn short_series_have_nothing_to_flag() {
        let mut empty: Vec<MacdEntry> = Vec::new();
        mark_crossings(&mut empty);
        let mut single = entries(&[(1.0, 0.0)]);
        mark_crossings(&mut single);
        assert_eq!(flags(&single), vec![false]);
    }
}
