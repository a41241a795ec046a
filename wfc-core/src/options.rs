//! Configuration record accepted by [`crate::solver::Solver`].

use crate::error::ConfigError;
use crate::exemplar::Exemplar;

/// Policy for picking the next cell to observe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Fixed left-to-right, top-to-bottom scan order.
    Scanline,
    /// Minimum remaining values: argmin of `count[cell]`.
    #[default]
    Mrv,
    /// Lowest Shannon entropy of the weighted admissible distribution.
    Entropy,
}

/// All tunables the solver needs beyond the exemplar itself.
#[derive(Clone, Debug)]
pub struct Options {
    /// Treat the exemplar as toric when extracting patterns.
    pub periodic_input: bool,
    /// Treat the output as toric when propagating.
    pub periodic_output: bool,
    /// Window edge length in pixels (N).
    pub pattern_size: usize,
    /// Output width in cells.
    pub output_width: usize,
    /// Output height in cells.
    pub output_height: usize,
    /// 8-bit mask selecting which of the 8 dihedral transforms to emit.
    pub symmetry: u8,
    /// Next-cell-to-observe policy.
    pub heuristic: Heuristic,
    /// Constrain a distinguished "ground" pattern to the bottom row.
    pub ground: bool,
    /// Maximum number of observations per run; `None` means unbounded.
    pub limit: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            periodic_input: true,
            periodic_output: false,
            pattern_size: 3,
            output_width: 48,
            output_height: 48,
            symmetry: 0xFF,
            heuristic: Heuristic::default(),
            ground: false,
            limit: None,
        }
    }
}

impl Options {
    /// Converts `symmetry ∈ [1, 8]` (the CLI convention) into the bit mask
    /// `extract` expects.
    pub fn symmetry_from_count(count: u8) -> u8 {
        debug_assert!((1..=8).contains(&count));
        (1u16 << count).wrapping_sub(1) as u8
    }

    /// Validates this record against a concrete exemplar, returning the
    /// `ConfigError` the spec requires be raised before any run begins.
    pub fn validate(&self, exemplar: &Exemplar) -> Result<(), ConfigError> {
        if self.pattern_size < 2 {
            return Err(ConfigError::PatternTooSmall(self.pattern_size));
        }

        if !self.periodic_output {
            if self.output_width < self.pattern_size {
                return Err(ConfigError::OutputTooSmall {
                    axis: "width",
                    got: self.output_width,
                    pattern_size: self.pattern_size,
                });
            }
            if self.output_height < self.pattern_size {
                return Err(ConfigError::OutputTooSmall {
                    axis: "height",
                    got: self.output_height,
                    pattern_size: self.pattern_size,
                });
            }
        }

        if !self.periodic_input
            && (exemplar.width() < self.pattern_size || exemplar.height() < self.pattern_size)
        {
            return Err(ConfigError::OutputTooSmall {
                axis: "exemplar",
                got: exemplar.width().min(exemplar.height()),
                pattern_size: self.pattern_size,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn exemplar(w: usize, h: usize) -> Exemplar {
        Exemplar::new(w, h, vec![Color([0, 0, 0]); w * h])
    }

    #[test]
    fn symmetry_from_count_matches_cli_convention() {
        assert_eq!(Options::symmetry_from_count(1), 0x01);
        assert_eq!(Options::symmetry_from_count(8), 0xFF);
    }

    #[test]
    fn rejects_too_small_pattern() {
        let opts = Options { pattern_size: 1, ..Options::default() };
        assert_eq!(
            opts.validate(&exemplar(8, 8)),
            Err(ConfigError::PatternTooSmall(1))
        );
    }

    #[test]
    fn rejects_undersized_non_periodic_output() {
        let opts = Options {
            pattern_size: 3,
            output_width: 2,
            periodic_output: false,
            ..Options::default()
        };
        assert!(matches!(
            opts.validate(&exemplar(8, 8)),
            Err(ConfigError::OutputTooSmall { axis: "width", .. })
        ));
    }

    #[test]
    fn accepts_default_options() {
        assert!(Options::default().validate(&exemplar(8, 8)).is_ok());
    }
}
