//! Sparse BFS pattern database.
//!
//! Used when the composite coordinate space is too large for a byte per
//! state but the reachable set within the target depth still fits in memory
//! as a hash set. The builder keeps a sliding window of three depth sets
//! (previous / current / next) and records every state of every completed
//! depth into per-depth vectors, which later back a hash-based heuristic.

use std::collections::HashSet;
use std::mem;

/// Accounted bytes per stored node: hash-set slot plus the level-vector copy.
const BYTES_PER_NODE: u64 = 32;
/// Accounted bytes per hash bucket.
const BUCKET_BYTES: u64 = 4;
/// Target load factor of the depth sets.
const MAX_LOAD: f64 = 0.9;
/// Process overhead subtracted from the caller's memory budget.
const FIXED_OVERHEAD_KB: u64 = 20 * 1024;
/// Bucket-count probe range, largest first.
const MAX_PROBE_BUCKETS: u64 = 1 << 27;
const MIN_PROBE_BUCKETS: u64 = 1 << 21;

/// Per-depth node counts are unknown past the measured range.
pub const NODES_UNKNOWN: u64 = u64::MAX;

fn next_power_of_2(n: u64) -> u64 {
    n.max(1).next_power_of_two()
}

/// One BFS depth: a hash set with an optional mirror vector that records
/// every insertion, tagged with the depth it collects.
struct DepthSet {
    set: HashSet<u64>,
    mirror: Option<(usize, Vec<u64>)>,
    /// Planned node capacity; an insert beyond it would force a rehash.
    threshold: usize,
    /// Modelled bucket count backing the capacity plan.
    buckets: u64,
}

impl DepthSet {
    fn with_capacity(nodes: usize) -> Self {
        let buckets = next_power_of_2((nodes as f64 / MAX_LOAD).ceil() as u64);
        DepthSet {
            set: HashSet::with_capacity(nodes),
            mirror: None,
            // The bucket array is a power of two; it rehashes at its load
            // threshold, not at the requested node count.
            threshold: (buckets as f64 * MAX_LOAD) as usize,
            buckets,
        }
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn contains(&self, idx: u64) -> bool {
        self.set.contains(&idx)
    }

    /// True when one more insert would grow the bucket array.
    fn will_rehash_on_next_insert(&self) -> bool {
        self.set.len() >= self.threshold
    }

    /// Grow the capacity plan; reports failure instead of aborting.
    fn reserve(&mut self, nodes: usize) -> Result<(), ()> {
        let additional = nodes.saturating_sub(self.set.len());
        self.set.try_reserve(additional).map_err(|_| ())?;
        let buckets = next_power_of_2((nodes as f64 / MAX_LOAD).ceil() as u64);
        self.buckets = self.buckets.max(buckets);
        self.threshold = self
            .threshold
            .max((self.buckets as f64 * MAX_LOAD) as usize);
        if let Some((_, vec)) = &mut self.mirror {
            if vec.try_reserve(additional).is_err() {
                return Err(());
            }
        }
        Ok(())
    }

    fn insert(&mut self, idx: u64) {
        self.set.insert(idx);
        if let Some((_, vec)) = &mut self.mirror {
            vec.push(idx);
        }
    }

    fn attach_mirror(&mut self, depth: usize) {
        self.mirror = Some((depth, Vec::new()));
    }

    /// Detach the recording vector into its depth slot. Mirrors are in
    /// lockstep with the set, so the recorded count must match.
    fn detach_mirror(&mut self, levels: &mut [Vec<u64>]) {
        if let Some((depth, vec)) = self.mirror.take() {
            debug_assert_eq!(vec.len(), self.set.len());
            if depth < levels.len() {
                levels[depth] = vec;
            }
        }
    }
}

/// The sliding prev/cur/next frontier with a hard node budget.
struct SlidingDepthSets {
    prev: DepthSet,
    cur: DepthSet,
    next: DepthSet,
    max_total_nodes: u64,
    current_depth: usize,
    expansion_stopped: bool,
}

enum Encounter {
    Inserted,
    Duplicate,
    CapacityReached,
}

impl SlidingDepthSets {
    fn new(max_total_nodes: u64) -> Self {
        SlidingDepthSets {
            prev: DepthSet::with_capacity(1),
            cur: DepthSet::with_capacity(16),
            next: DepthSet::with_capacity(256),
            max_total_nodes,
            current_depth: 0,
            expansion_stopped: false,
        }
    }

    /// Frontier step for one candidate successor. The frozen current
    /// frontier is passed in separately while its storage is borrowed for
    /// iteration.
    ///
    /// The rehash predictor is queried before inserting: once the next set
    /// would have to grow past its plan, the latch trips and the ply is
    /// abandoned, so the bucket array never reallocates past the budget.
    fn encounter_and_mark_next(&mut self, idx: u64, frontier: &HashSet<u64>) -> Encounter {
        if self.expansion_stopped {
            return Encounter::CapacityReached;
        }
        if frontier.contains(&idx) || self.prev.contains(idx) || self.next.contains(idx) {
            return Encounter::Duplicate;
        }
        if self.next.will_rehash_on_next_insert() {
            self.expansion_stopped = true;
            return Encounter::CapacityReached;
        }
        self.next.insert(idx);
        Encounter::Inserted
    }

    fn set_initial(&mut self, idx: u64) {
        self.cur.insert(idx);
        self.current_depth = 0;
    }

    /// Rotate the window after a completed ply and size the fresh next set
    /// from the remaining memory budget.
    fn advance_depth(&mut self, levels: &mut [Vec<u64>], expected: &[u64]) {
        // Completed depths must be on record before the sets move.
        self.prev.detach_mirror(levels);
        self.cur.detach_mirror(levels);
        self.next.detach_mirror(levels);

        // Release prev outright, then slide the window.
        self.prev = DepthSet::with_capacity(1);
        self.prev = mem::replace(&mut self.cur, DepthSet::with_capacity(1));
        self.cur = mem::replace(&mut self.next, DepthSet::with_capacity(1));
        self.expansion_stopped = false;
        self.current_depth += 1;

        let next_depth = self.current_depth + 1;
        if next_depth >= levels.len() {
            return;
        }
        self.next.attach_mirror(next_depth);

        let estimated = expected.get(next_depth).copied().unwrap_or(NODES_UNKNOWN);
        let current_nodes = (self.prev.len() + self.cur.len()) as u64;
        if current_nodes >= self.max_total_nodes {
            return;
        }
        let remaining_nodes = self.max_total_nodes - current_nodes;
        let target_nodes = if estimated == NODES_UNKNOWN {
            remaining_nodes
        } else {
            estimated.min(remaining_nodes)
        };

        // The bucket array dominates at large powers of two: probe downwards
        // for the largest count whose buckets plus nodes still fit.
        let total_memory = self.max_total_nodes * BYTES_PER_NODE;
        let current_memory = current_nodes * BYTES_PER_NODE + self.cur.buckets * BUCKET_BYTES;
        let remaining_memory = total_memory.saturating_sub(current_memory);

        let mut max_affordable_buckets = 0u64;
        let mut probe = MAX_PROBE_BUCKETS;
        while probe >= MIN_PROBE_BUCKETS {
            let capacity = (probe as f64 * MAX_LOAD) as u64;
            if probe * BUCKET_BYTES + capacity * BYTES_PER_NODE <= remaining_memory {
                max_affordable_buckets = probe;
                break;
            }
            probe /= 2;
        }
        if max_affordable_buckets < MIN_PROBE_BUCKETS {
            self.expansion_stopped = true;
            return;
        }

        let ideal_buckets = next_power_of_2((target_nodes as f64 / MAX_LOAD).ceil() as u64);
        let reserve_value = if ideal_buckets > max_affordable_buckets {
            // Memory constrained: keep slack below the plan so the predictor
            // trips before the bucket array would grow.
            (max_affordable_buckets as f64 * MAX_LOAD * MAX_LOAD) as u64
        } else {
            target_nodes
        };
        if self.next.reserve(reserve_value as usize).is_err() {
            self.expansion_stopped = true;
        }
    }

    /// Final detach in prev, cur, next order, then drop the sets.
    fn cleanup(&mut self, levels: &mut [Vec<u64>]) {
        self.prev.detach_mirror(levels);
        self.cur.detach_mirror(levels);
        self.next.detach_mirror(levels);
        self.prev = DepthSet::with_capacity(1);
        self.cur = DepthSet::with_capacity(1);
        self.next = DepthSet::with_capacity(1);
    }
}

/// The recorded levels of a sparse BFS run.
pub struct SparseLevels {
    /// `levels[d]` holds every composite coordinate first reached at depth d.
    pub levels: Vec<Vec<u64>>,
    /// `num_list[d]` is the node count of depth d.
    pub num_list: Vec<u32>,
    /// Deepest ply that ran to completion within the budget.
    pub completed_depth: usize,
}

/// Flood a three-coordinate product space from the seed states, recording
/// each depth as a flat vector. `max_memory_kb` bounds the whole build; when
/// the budget is hit the deepest fully completed depth is returned and the
/// partial ply keeps whatever it reached.
#[allow(clippy::too_many_arguments)]
pub fn build_sparse_levels(
    seeds: &[u64],
    sizes: (u64, u64, u64),
    tables: (&[u32], &[u32], &[u32]),
    g: usize,
    max_depth: usize,
    max_memory_kb: u64,
    expected: &[u64],
) -> SparseLevels {
    let adjusted_kb = if max_memory_kb > FIXED_OVERHEAD_KB {
        max_memory_kb - FIXED_OVERHEAD_KB
    } else {
        max_memory_kb
    };
    let node_cap = adjusted_kb * 1024 / BYTES_PER_NODE;

    let (_, size2, size3) = sizes;
    let size23 = size2 * size3;
    let (table1, table2, table3) = tables;

    let mut visited = SlidingDepthSets::new(node_cap);
    let mut levels: Vec<Vec<u64>> = vec![Vec::new(); max_depth + 1];
    let mut num_list = vec![0u32; max_depth + 1];

    levels[0].reserve(seeds.len());
    for &s in seeds {
        visited.set_initial(s);
        levels[0].push(s);
    }
    num_list[0] = seeds.len() as u32;
    if max_depth >= 1 {
        visited.next.attach_mirror(1);
        if let Some(&estimate) = expected.get(1) {
            if estimate != NODES_UNKNOWN {
                let _ = visited.next.reserve(estimate as usize);
            }
        }
    }

    let mut stop = false;
    let mut next_depth = 0;

    for depth in 0..max_depth {
        next_depth = depth + 1;
        if visited.cur.len() == 0 {
            break;
        }

        // Freeze the current frontier for the whole ply by borrowing its
        // storage out of the window; membership checks still see it.
        let frontier = mem::take(&mut visited.cur.set);
        'ply: for &cur in &frontier {
            let cur1 = (cur / size23) as usize;
            let cur23 = cur % size23;
            let cur2 = (cur23 / size3) as usize;
            let cur3 = (cur23 % size3) as usize;
            for j in 0..g {
                let n1 = table1[cur1 * g + j] as u64;
                let n2 = table2[cur2 * g + j] as u64;
                let n3 = table3[cur3 * g + j] as u64;
                let next = n1 * size23 + n2 * size3 + n3;
                match visited.encounter_and_mark_next(next, &frontier) {
                    Encounter::Inserted => num_list[next_depth] += 1,
                    Encounter::Duplicate => {}
                    Encounter::CapacityReached => {
                        stop = true;
                        break 'ply;
                    }
                }
            }
        }
        visited.cur.set = frontier;
        if stop {
            break;
        }

        visited.advance_depth(&mut levels, expected);
    }

    visited.cleanup(&mut levels);
    for (d, level) in levels.iter().enumerate() {
        num_list[d] = level.len() as u32;
    }

    SparseLevels {
        levels,
        num_list,
        completed_depth: if stop { next_depth - 1 } else { next_depth },
    }
}

/// Hash-backed admissible heuristic over recorded levels: a state found at
/// depth d costs exactly d, anything unrecorded costs at least the horizon
/// plus one.
pub struct SparseHeuristic {
    depth_of: std::collections::HashMap<u64, u8>,
    horizon: u8,
}

impl SparseHeuristic {
    pub fn from_levels(db: &SparseLevels) -> Self {
        let mut depth_of = std::collections::HashMap::with_capacity(
            db.levels.iter().map(|l| l.len()).sum::<usize>(),
        );
        for (d, level) in db.levels.iter().enumerate() {
            for &idx in level {
                depth_of.entry(idx).or_insert(d as u8);
            }
        }
        SparseHeuristic {
            depth_of,
            horizon: db.completed_depth as u8,
        }
    }

    pub fn bound(&self, idx: u64) -> u32 {
        match self.depth_of.get(&idx) {
            Some(&d) => d as u32,
            None => self.horizon as u32 + 1,
        }
    }

    pub fn horizon(&self) -> u8 {
        self.horizon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::face_generators;
    use crate::tables::{corner_move_table, edge_move_table, multi_move_table};

    fn xcross_tables() -> (Vec<u32>, Vec<u32>, Vec<u32>) {
        let gens = face_generators();
        let single_edge = edge_move_table(&gens);
        let corner = corner_move_table(&gens);
        let multi = multi_move_table(4, 2, 12, 190080, &single_edge, 18);
        (multi, corner, single_edge)
    }

    #[test]
    fn test_levels_match_measured_counts() {
        let (multi, corner, edge) = xcross_tables();
        let seed = 187520u64 * (24 * 24) + 12 * 24 + 0;
        let db = build_sparse_levels(
            &[seed],
            (190080, 24, 24),
            (&multi, &corner, &edge),
            18,
            3,
            512 * 1024,
            &[1, 15, 182, 2286, NODES_UNKNOWN],
        );
        assert_eq!(db.num_list[0], 1);
        // Three of the 18 turns fix the whole goal coordinate.
        assert_eq!(db.num_list[1], 15);
        assert!(db.num_list[2] > db.num_list[1] * 10);
        assert!(db.num_list[3] > db.num_list[2] * 10);
        assert_eq!(db.completed_depth, 3);
    }

    #[test]
    fn test_levels_are_disjoint_and_connected() {
        let (multi, corner, edge) = xcross_tables();
        let seed = 187520u64 * (24 * 24) + 12 * 24 + 0;
        let db = build_sparse_levels(
            &[seed],
            (190080, 24, 24),
            (&multi, &corner, &edge),
            18,
            3,
            512 * 1024,
            &[1, 15, 182, 2286, NODES_UNKNOWN],
        );
        let mut seen = std::collections::HashSet::new();
        for level in &db.levels {
            for &idx in level {
                assert!(seen.insert(idx), "state recorded at two depths");
            }
        }
        // Every depth-d state has a predecessor one level up.
        let size23 = 24u64 * 24;
        for d in 1..=3usize {
            let prev: std::collections::HashSet<u64> =
                db.levels[d - 1].iter().copied().collect();
            for &idx in &db.levels[d] {
                let i1 = (idx / size23) as usize;
                let i2 = ((idx % size23) / 24) as usize;
                let i3 = (idx % 24) as usize;
                let mut found = false;
                for j in 0..18 {
                    let p = multi[i1 * 18 + j] as u64 * size23
                        + corner[i2 * 18 + j] as u64 * 24
                        + edge[i3 * 18 + j] as u64;
                    if prev.contains(&p) {
                        found = true;
                        break;
                    }
                }
                assert!(found, "depth {d} state without parent");
            }
        }
    }

    #[test]
    fn test_budget_latch_trips_before_rehash() {
        let (multi, corner, edge) = xcross_tables();
        let seed = 187520u64 * (24 * 24) + 12 * 24 + 0;
        // A budget this small cannot afford the minimum bucket probe for
        // deeper plies; the builder must stop early yet keep depth 0 intact.
        let db = build_sparse_levels(
            &[seed],
            (190080, 24, 24),
            (&multi, &corner, &edge),
            18,
            8,
            FIXED_OVERHEAD_KB + 64,
            &[1, 15, 182, 2286, 28611, 349811, NODES_UNKNOWN, NODES_UNKNOWN, NODES_UNKNOWN],
        );
        assert!(db.completed_depth < 8);
        assert_eq!(db.num_list[0], 1);
    }

    #[test]
    fn test_heuristic_bounds() {
        let (multi, corner, edge) = xcross_tables();
        let seed = 187520u64 * (24 * 24) + 12 * 24 + 0;
        let db = build_sparse_levels(
            &[seed],
            (190080, 24, 24),
            (&multi, &corner, &edge),
            18,
            2,
            512 * 1024,
            &[1, 15, 182, NODES_UNKNOWN],
        );
        let h = SparseHeuristic::from_levels(&db);
        assert_eq!(h.bound(seed), 0);
        assert_eq!(h.bound(db.levels[1][0]), 1);
        assert_eq!(h.bound(0xdead_beef), h.horizon() as u32 + 1);
    }
}
