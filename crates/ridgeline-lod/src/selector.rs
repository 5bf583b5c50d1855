//! Coarsest-first LOD selection against the distance band table.

use crate::table::LodDistanceTable;

/// Selects LOD levels from squared camera-to-patch distances.
///
/// The scan runs from the coarsest band down to band 1 and takes the first
/// threshold the distance meets or exceeds; anything closer stays at LOD 0
/// (full resolution). There is no distance-based culling here — patches
/// beyond the last band are simply maximally decimated.
#[derive(Debug)]
pub struct LodSelector {
    table: LodDistanceTable,
}

impl LodSelector {
    /// Create a selector over the given band table.
    pub fn new(table: LodDistanceTable) -> Self {
        Self { table }
    }

    /// LOD level for a patch whose center is `distance_sq` from the camera.
    ///
    /// Returns a value in `[0, max_lod)`.
    pub fn select(&self, distance_sq: f32) -> u8 {
        debug_assert!(distance_sq >= 0.0, "squared distance must be non-negative");
        for lod in (1..self.table.max_lod()).rev() {
            if distance_sq >= self.table.threshold_sq(lod) {
                return lod as u8;
            }
        }
        0
    }

    /// Number of LOD levels.
    pub fn max_lod(&self) -> u32 {
        self.table.max_lod()
    }

    /// Access the underlying band table.
    pub fn table(&self) -> &LodDistanceTable {
        &self.table
    }

    /// Replace the band table (designer-tuned override).
    pub fn set_table(&mut self, table: LodDistanceTable) {
        self.table = table;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> LodSelector {
        // patch_size=17, unit scale: thresholds 289, 1156, 4624, 7225, 14161
        LodSelector::new(LodDistanceTable::geomip(17, 1.0, 1.0, 5))
    }

    /// A patch at the camera position must get full detail.
    #[test]
    fn test_zero_distance_selects_lod_0() {
        assert_eq!(selector().select(0.0), 0);
    }

    /// Distances beyond every band select the coarsest level.
    #[test]
    fn test_far_distance_selects_coarsest() {
        let s = selector();
        assert_eq!(s.select(1.0e9), 4);
        assert_eq!(s.select(f32::MAX), 4);
    }

    /// A distance exactly at a threshold belongs to that band (meets-or-exceeds).
    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let s = selector();
        assert_eq!(s.select(1156.0), 1);
        assert_eq!(s.select(1155.9), 0); // LOD 1 band starts at threshold[1]
        assert_eq!(s.select(4624.0), 2);
        assert_eq!(s.select(14161.0), 4);
    }

    /// threshold[0] never matters: everything below threshold[1] is LOD 0.
    #[test]
    fn test_band_zero_is_fallback() {
        let s = selector();
        assert_eq!(s.select(289.0), 0);
        assert_eq!(s.select(1000.0), 0);
    }

    /// LOD must be non-decreasing with distance.
    #[test]
    fn test_monotonic_in_distance() {
        let s = selector();
        let mut prev = 0u8;
        for i in 0..2000 {
            let d2 = i as f32 * 10.0;
            let lod = s.select(d2);
            assert!(
                lod >= prev,
                "LOD must not decrease with distance: d²={d2}, lod={lod}, prev={prev}"
            );
            prev = lod;
        }
        assert_eq!(prev, 4, "sweep should reach the coarsest band");
    }

    /// Selected LOD always lies in [0, max_lod).
    #[test]
    fn test_selection_in_range() {
        let s = selector();
        for i in 0..100 {
            let lod = s.select((i * i) as f32 * 7.3);
            assert!((lod as u32) < s.max_lod());
        }
    }

    /// A single-band table always selects LOD 0.
    #[test]
    fn test_single_band_table() {
        let s = LodSelector::new(LodDistanceTable::geomip(17, 1.0, 1.0, 1));
        assert_eq!(s.select(0.0), 0);
        assert_eq!(s.select(f32::MAX), 0);
    }

    /// Replacing the table changes subsequent selections.
    #[test]
    fn test_override_changes_selection() {
        let mut s = selector();
        assert_eq!(s.select(500.0), 0);
        s.set_table(LodDistanceTable::from_thresholds(vec![10.0, 100.0]));
        assert_eq!(s.select(500.0), 1);
    }
}
