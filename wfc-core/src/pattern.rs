//! Pattern extraction: turning an [`Exemplar`] into a deduplicated,
//! weighted set of N×N color-index tiles.

use std::collections::HashMap;

use crate::color::Color;
use crate::error::ConfigError;
use crate::exemplar::Exemplar;

/// An N×N tile of palette color indices, possibly a rotation/reflection of
/// an exemplar window.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Pattern {
    size: usize,
    cells: Vec<u8>,
}

impl Pattern {
    pub fn new(size: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.size + x]
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// `rot90(p)[x, y] = p[N-1-y, x]`.
    fn rotate(&self) -> Self {
        let n = self.size;
        let mut out = vec![0u8; n * n];
        for y in 0..n {
            for x in 0..n {
                out[y * n + x] = self.get(n - 1 - y, x);
            }
        }
        Self::new(n, out)
    }

    /// `ref(p)[x, y] = p[N-1-x, y]`.
    fn reflect(&self) -> Self {
        let n = self.size;
        let mut out = vec![0u8; n * n];
        for y in 0..n {
            for x in 0..n {
                out[y * n + x] = self.get(n - 1 - x, y);
            }
        }
        Self::new(n, out)
    }

    /// The 8 elements of the dihedral group D4 in the spec's fixed order,
    /// filtered by `symmetry_mask` and deduplicated by content, preserving
    /// first-occurrence order (this is what makes extraction deterministic:
    /// a `HashSet`-based dedup would not preserve it).
    fn symmetries(&self, symmetry_mask: u8) -> Vec<Self> {
        let t0 = self.clone();
        let t1 = t0.reflect();
        let t2 = t0.rotate();
        let t3 = t2.reflect();
        let t4 = t2.rotate();
        let t5 = t4.reflect();
        let t6 = t4.rotate();
        let t7 = t6.reflect();
        let all = [t0, t1, t2, t3, t4, t5, t6, t7];

        let mut variants = Vec::with_capacity(8);
        for (i, t) in all.into_iter().enumerate() {
            if symmetry_mask & (1 << i) == 0 {
                continue;
            }
            if !variants.contains(&t) {
                variants.push(t);
            }
        }
        variants
    }
}

/// The output of pattern extraction: a deduplicated, weighted pattern set
/// plus the palette used to decode patterns back into colors.
pub struct PatternSet {
    pub patterns: Vec<Pattern>,
    pub weights: Vec<u32>,
    pub palette: Vec<Color>,
    /// Index of the last pattern extracted, recorded explicitly as the
    /// ground pattern rather than re-derived as `patterns.len() - 1`
    /// wherever the ground policy is applied.
    pub ground_pattern: usize,
}

/// Builds the palette of distinct colors in first-seen row-major order and
/// the corresponding byte sample of the exemplar.
fn build_palette(exemplar: &Exemplar) -> (Vec<u8>, Vec<Color>) {
    let mut palette = Vec::new();
    let mut index_of: HashMap<Color, u8> = HashMap::new();
    let mut sample = Vec::with_capacity(exemplar.width() * exemplar.height());

    for y in 0..exemplar.height() {
        for x in 0..exemplar.width() {
            let color = exemplar.get(x, y);
            let index = *index_of.entry(color).or_insert_with(|| {
                let idx = palette.len() as u8;
                palette.push(color);
                idx
            });
            sample.push(index);
        }
    }

    (sample, palette)
}

/// Base-`C` key for a pattern's cells, MSB first, used only to deduplicate
/// patterns during extraction.
fn pattern_key(cells: &[u8], colors: u64) -> Option<u64> {
    let mut key: u64 = 0;
    for &cell in cells {
        key = key.checked_mul(colors)?.checked_add(cell as u64)?;
    }
    Some(key)
}

fn pattern_from_key(mut key: u64, size: usize, colors: u64) -> Pattern {
    let mut cells = vec![0u8; size * size];
    for i in (0..cells.len()).rev() {
        cells[i] = (key % colors) as u8;
        key /= colors;
    }
    Pattern::new(size, cells)
}

/// Extracts the deduplicated, weighted pattern set from `exemplar`.
///
/// `symmetry_mask` selects which of the 8 dihedral transforms (see
/// [`Pattern::symmetries`]) are emitted per window. Dedup normally goes
/// through the base-`C` integer key (`pattern_key`); a palette/pattern_size
/// combination whose key would overflow `u64` falls back to hashing the
/// pattern's own cells directly (`Pattern` derives `Hash, Eq` for exactly
/// this case) instead of failing the whole extraction.
pub fn extract(
    exemplar: &Exemplar,
    pattern_size: usize,
    periodic_input: bool,
    symmetry_mask: u8,
) -> Result<PatternSet, ConfigError> {
    let (sample, palette) = build_palette(exemplar);
    let n = pattern_size;
    let colors = palette.len() as u64;
    let keyed = colors.checked_pow((n * n) as u32).is_some();

    let w = exemplar.width();
    let h = exemplar.height();
    let xmax = if periodic_input { w } else { w.saturating_sub(n - 1) };
    let ymax = if periodic_input { h } else { h.saturating_sub(n - 1) };

    let mut keyed_counts: HashMap<u64, u32> = HashMap::new();
    let mut keyed_ordering: Vec<u64> = Vec::new();
    let mut hashed_counts: HashMap<Pattern, u32> = HashMap::new();
    let mut hashed_ordering: Vec<Pattern> = Vec::new();
    let mut window = vec![0u8; n * n];

    for y in 0..ymax {
        for x in 0..xmax {
            for dy in 0..n {
                for dx in 0..n {
                    let sx = (x + dx) % w;
                    let sy = (y + dy) % h;
                    window[dy * n + dx] = sample[sy * w + sx];
                }
            }
            let base = Pattern::new(n, window.clone());

            for variant in base.symmetries(symmetry_mask) {
                if keyed {
                    let key = pattern_key(variant.cells(), colors).expect("checked above");
                    *keyed_counts.entry(key).or_insert_with(|| {
                        keyed_ordering.push(key);
                        0
                    }) += 1;
                } else {
                    *hashed_counts.entry(variant).or_insert_with_key(|v| {
                        hashed_ordering.push(v.clone());
                        0
                    }) += 1;
                }
            }
        }
    }

    let num_patterns = if keyed { keyed_ordering.len() } else { hashed_ordering.len() };
    if num_patterns == 0 {
        return Err(ConfigError::EmptyPatternSet);
    }

    let (patterns, weights) = if keyed {
        let patterns = keyed_ordering.iter().map(|&key| pattern_from_key(key, n, colors)).collect();
        let weights = keyed_ordering.iter().map(|key| keyed_counts[key]).collect();
        (patterns, weights)
    } else {
        log::debug!(
            "pattern_size={n} over a {}-color palette overflows the u64 key encoding; falling back to content-hash dedup",
            palette.len()
        );
        let weights = hashed_ordering.iter().map(|p| hashed_counts[p]).collect();
        (hashed_ordering, weights)
    };

    let ground_pattern = patterns.len() - 1;

    log::debug!(
        "extracted {} patterns from a {}-color palette (pattern_size={n})",
        patterns.len(),
        palette.len()
    );

    Ok(PatternSet { patterns, weights, palette, ground_pattern })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard() -> Exemplar {
        let black = Color([0, 0, 0]);
        let white = Color([255, 255, 255]);
        Exemplar::new(2, 2, vec![black, white, white, black])
    }

    #[test]
    fn rotate_matches_spec_formula() {
        // 2x2 pattern: [0 1; 2 3] (row-major, get(x,y) = cells[y*2+x])
        let p = Pattern::new(2, vec![0, 1, 2, 3]);
        let rotated = p.rotate();
        // rot90(x,y) = p.get(1-y, x)
        assert_eq!(rotated.get(0, 0), p.get(1, 0)); // = 1
        assert_eq!(rotated.get(1, 0), p.get(1, 1)); // = 3
        assert_eq!(rotated.get(0, 1), p.get(0, 0)); // = 0
        assert_eq!(rotated.get(1, 1), p.get(0, 1)); // = 2
    }

    #[test]
    fn reflect_matches_spec_formula() {
        let p = Pattern::new(2, vec![0, 1, 2, 3]);
        let reflected = p.reflect();
        assert_eq!(reflected.get(0, 0), p.get(1, 0));
        assert_eq!(reflected.get(1, 0), p.get(0, 0));
    }

    #[test]
    fn identity_only_mask_keeps_one_variant() {
        let p = Pattern::new(2, vec![0, 1, 2, 3]);
        let variants = p.symmetries(0x01);
        assert_eq!(variants, vec![p]);
    }

    #[test]
    fn single_color_exemplar_has_one_pattern() {
        let exemplar = Exemplar::new(4, 4, vec![Color([10, 20, 30]); 16]);
        let set = extract(&exemplar, 2, true, 0xFF).unwrap();
        assert_eq!(set.patterns.len(), 1);
        assert!(set.weights[0] >= 1);
    }

    #[test]
    fn checkerboard_identity_symmetry_has_two_patterns() {
        let set = extract(&checkerboard(), 2, true, 0x01).unwrap();
        assert_eq!(set.patterns.len(), 2);
        assert_eq!(set.weights.iter().sum::<u32>(), 4);
    }

    #[test]
    fn pattern_key_roundtrips() {
        let cells = vec![2u8, 0, 1, 3];
        let key = pattern_key(&cells, 4).unwrap();
        let decoded = pattern_from_key(key, 2, 4);
        assert_eq!(decoded.cells(), cells.as_slice());
    }

    #[test]
    fn empty_exemplar_window_range_is_a_config_error() {
        // 1x1 exemplar, non-periodic, pattern_size 2: xmax/ymax saturate to 0.
        let exemplar = Exemplar::new(1, 1, vec![Color([0, 0, 0])]);
        let err = extract(&exemplar, 2, false, 0xFF).unwrap_err();
        assert_eq!(err, ConfigError::EmptyPatternSet);
    }

    #[test]
    fn overflowing_key_space_falls_back_to_content_hash_dedup() {
        // 256 distinct colors with pattern_size 3: 256^9 overflows u64, so
        // extraction must go through the Pattern-hash path instead of
        // erroring out.
        let pixels: Vec<Color> = (0..256u32).map(|i| Color([(i / 16) as u8, (i % 16) as u8, 0])).collect();
        let exemplar = Exemplar::new(16, 16, pixels);
        let set = extract(&exemplar, 3, true, 0x01).unwrap();
        assert!(!set.patterns.is_empty());
        assert_eq!(set.weights.iter().sum::<u32>() as usize, 16 * 16);
    }
}
