//! Precomputed pattern-adjacency relation (the "propagator").

use crate::direction::Direction;
use crate::pattern::Pattern;

/// `(offset, length)` into [`Propagator::flat`] for one `(direction, pattern)`
/// pair.
#[derive(Clone, Copy, Debug, Default)]
struct Entry {
    offset: u32,
    length: u32,
}

/// For each `(pattern, direction)`, the ordered list of patterns allowed in
/// the neighbor cell in that direction.
///
/// Stored as a flat array plus a `(direction, pattern) -> (offset, length)`
/// index table, mirroring the reference implementation's `Array2D<Entry>` +
/// flat `vector<uint16_t>` rather than a `Vec<Vec<Vec<usize>>>` of
/// allocations per cell.
pub struct Propagator {
    flat: Vec<u32>,
    // indexed [direction as usize][pattern]
    table: Vec<Vec<Entry>>,
    num_patterns: usize,
}

impl Propagator {
    /// Builds the propagator from `patterns`, each of edge length `n`.
    pub fn build(patterns: &[Pattern], n: usize) -> Self {
        let num_patterns = patterns.len();
        let mut table = vec![vec![Entry::default(); num_patterns]; Direction::COUNT];
        let mut flat = Vec::new();

        let mut agreeing = 0u64;
        for p1 in 0..num_patterns {
            for d in Direction::ALL {
                let offset = flat.len() as u32;
                let mut length = 0u32;
                for p2 in 0..num_patterns {
                    if patterns_agree(&patterns[p1], &patterns[p2], d, n) {
                        flat.push(p2 as u32);
                        length += 1;
                    }
                }
                table[d as usize][p1] = Entry { offset, length };
                agreeing += length as u64;
            }
        }

        let density = if num_patterns == 0 {
            0.0
        } else {
            100.0 * agreeing as f64 / (4.0 * (num_patterns as f64).powi(2))
        };
        log::debug!("propagator density: {density:.2}%");

        Self { flat, table, num_patterns }
    }

    /// Patterns allowed in the neighbor cell in direction `d`, given `p1` is
    /// placed at the current cell.
    pub fn compatible(&self, p1: usize, d: Direction) -> &[u32] {
        let entry = self.table[d as usize][p1];
        let start = entry.offset as usize;
        let end = start + entry.length as usize;
        &self.flat[start..end]
    }

    /// `(offset, length)` into the flat array for `(p1, d)`, for callers
    /// that need to index one element at a time without holding a borrow of
    /// `self` across a mutation of unrelated state (the solver's hot loop).
    pub fn entry_range(&self, p1: usize, d: Direction) -> (u32, u32) {
        let entry = self.table[d as usize][p1];
        (entry.offset, entry.length)
    }

    #[inline]
    pub fn flat_at(&self, index: u32) -> u32 {
        self.flat[index as usize]
    }

    pub fn len(&self, p1: usize, d: Direction) -> u32 {
        self.table[d as usize][p1].length
    }

    pub fn num_patterns(&self) -> usize {
        self.num_patterns
    }
}

/// Patterns agree across direction `d` iff their overlap region matches
/// cell-wise (see spec §4.2).
fn patterns_agree(p1: &Pattern, p2: &Pattern, d: Direction, n: usize) -> bool {
    let dx = d.dx();
    let dy = d.dy();

    let xmin = dx.max(0) as usize;
    let xmax = (n as i32 + dx.min(0)) as usize;
    let ymin = dy.max(0) as usize;
    let ymax = (n as i32 + dy.min(0)) as usize;

    for y in ymin..ymax {
        for x in xmin..xmax {
            let x2 = (x as i32 - dx) as usize;
            let y2 = (y as i32 - dy) as usize;
            if p1.get(x, y) != p2.get(x2, y2) {
                return false;
            }
        }
    }
    true
}
