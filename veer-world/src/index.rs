use std::collections::{BTreeMap, BTreeSet};

use veer_core::{Aabb, EntityId, Vec3};

/// Integer grid cell coordinate. Ordering is lexicographic (x, y, z), which
/// defines the "ascending bin" enumeration order of neighborhood queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct BinCoord {
    x: i32,
    y: i32,
    z: i32,
}

/// Lightweight index entry: identifier + the position it was indexed at.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRecord {
    pub id: EntityId,
    pub position: Vec3,
}

struct IndexEntry {
    record: NearbyRecord,
    min: BinCoord,
    max: BinCoord,
}

/// Uniform grid over the world volume.
///
/// Each indexed entity has exactly one record, registered under every bin its
/// bounding box overlaps. Insert, remove and relocate are O(bins covered);
/// queries scan the query bin plus its 26 neighbors.
pub(crate) struct SpatialIndex {
    bin_size: f32,
    bins: BTreeMap<BinCoord, BTreeSet<EntityId>>,
    entries: BTreeMap<EntityId, IndexEntry>,
}

impl SpatialIndex {
    pub fn new(bin_size: f32) -> Self {
        Self {
            bin_size: bin_size.max(1e-3),
            bins: BTreeMap::new(),
            entries: BTreeMap::new(),
        }
    }

    pub fn bin_size(&self) -> f32 {
        self.bin_size
    }

    /// Number of non-empty bins.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn record(&self, id: &EntityId) -> Option<&NearbyRecord> {
        self.entries.get(id).map(|entry| &entry.record)
    }

    pub fn insert(&mut self, id: EntityId, position: Vec3, aabb: Aabb) {
        self.remove(&id);

        let min = self.bin_for(aabb.min);
        let max = self.bin_for(aabb.max);
        for_each_bin(min, max, |bin| {
            self.bins.entry(bin).or_default().insert(id.clone());
        });

        self.entries.insert(
            id.clone(),
            IndexEntry {
                record: NearbyRecord { id, position },
                min,
                max,
            },
        );
    }

    pub fn remove(&mut self, id: &EntityId) -> bool {
        let Some(entry) = self.entries.remove(id) else {
            return false;
        };
        for_each_bin(entry.min, entry.max, |bin| {
            if let Some(ids) = self.bins.get_mut(&bin) {
                ids.remove(id);
                if ids.is_empty() {
                    self.bins.remove(&bin);
                }
            }
        });
        true
    }

    pub fn relocate(&mut self, id: &EntityId, position: Vec3, aabb: Aabb) {
        self.insert(id.clone(), position, aabb);
    }

    /// Records found in the bin covering `position` and its 26 neighbors,
    /// enumerated in ascending bin order and deduplicated to first sighting.
    pub fn query(&self, position: Vec3) -> Vec<NearbyRecord> {
        let center = self.bin_for(position);
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();

        for x in (center.x - 1)..=(center.x + 1) {
            for y in (center.y - 1)..=(center.y + 1) {
                for z in (center.z - 1)..=(center.z + 1) {
                    let Some(ids) = self.bins.get(&BinCoord { x, y, z }) else {
                        continue;
                    };
                    for id in ids {
                        if seen.insert(id.clone()) {
                            if let Some(entry) = self.entries.get(id) {
                                out.push(entry.record.clone());
                            }
                        }
                    }
                }
            }
        }

        out
    }

    fn bin_for(&self, p: Vec3) -> BinCoord {
        BinCoord {
            x: (p.x / self.bin_size).floor() as i32,
            y: (p.y / self.bin_size).floor() as i32,
            z: (p.z / self.bin_size).floor() as i32,
        }
    }
}

fn for_each_bin(min: BinCoord, max: BinCoord, mut f: impl FnMut(BinCoord)) {
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                f(BinCoord { x, y, z });
            }
        }
    }
}
