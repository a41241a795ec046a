//! Drives the observe/ban/propagate loop, owns the ban worklist, and
//! realizes the ground constraint.

use crate::direction::Direction;
use crate::error::Error;
use crate::exemplar::Exemplar;
use crate::options::Options;
use crate::pattern::Pattern;
use crate::propagator::Propagator;
use crate::rng::Rng;
use crate::wave::Wave;

type CellIndex = usize;
type PatternIndex = usize;

/// Owns patterns/propagator/wave for one exemplar and drives runs against
/// them. Patterns, weights and the propagator are built once and reused
/// across runs; only the wave and worklist are reset per `run`.
pub struct Solver {
    options: Options,
    patterns: Vec<Pattern>,
    palette: Vec<crate::color::Color>,
    propagator: Propagator,
    wave: Wave,
    ground_pattern: usize,
    worklist: Vec<(CellIndex, PatternIndex)>,
}

impl Solver {
    pub fn new(options: Options, exemplar: &Exemplar) -> Result<Self, Error> {
        options.validate(exemplar)?;

        let set = crate::pattern::extract(
            exemplar,
            options.pattern_size,
            options.periodic_input,
            options.symmetry,
        )?;

        let propagator = Propagator::build(&set.patterns, options.pattern_size);
        let l = options.output_width * options.output_height;
        let worklist = Vec::with_capacity(l * set.patterns.len());

        let wave = Wave::new(
            &propagator,
            &set.weights,
            options.output_width,
            options.output_height,
            options.pattern_size,
            options.periodic_output,
            options.heuristic,
        );

        Ok(Self {
            options,
            patterns: set.patterns,
            palette: set.palette,
            propagator,
            wave,
            ground_pattern: set.ground_pattern,
            worklist,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub(crate) fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub(crate) fn palette(&self) -> &[crate::color::Color] {
        &self.palette
    }

    pub(crate) fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Runs one full attempt from a fresh seed. Reuses patterns, weights and
    /// the propagator; the wave is reset in place.
    pub fn run(&mut self, seed: u64) -> Result<(), Error> {
        let mut rng = Rng::seed_from_u64(seed);

        self.wave.reset(&self.propagator);
        self.worklist.clear();

        if self.apply_ground() {
            self.propagate()?;
        }

        for _ in 0..self.options.limit.unwrap_or(usize::MAX) {
            let Some(cell) = self.wave.observe_next(&mut rng) else { break };
            self.observe(cell, &mut rng);
            self.propagate()?;
        }

        log::info!("solver run (seed={seed}) completed successfully");
        Ok(())
    }

    /// Ground policy: if enabled, bans every pattern but the ground pattern
    /// from the bottom row, and bans the ground pattern everywhere else.
    /// Returns whether the worklist now needs draining.
    fn apply_ground(&mut self) -> bool {
        if !self.options.ground {
            return false;
        }

        let mx = self.options.output_width;
        let my = self.options.output_height;
        let ground = self.ground_pattern;

        for x in 0..mx {
            let bottom = x + (my - 1) * mx;
            for p in 0..self.patterns.len() {
                if p != ground && self.wave.get(bottom, p) {
                    self.ban(bottom, p);
                }
            }
            for y in 0..my - 1 {
                let cell = x + y * mx;
                if self.wave.get(cell, ground) {
                    self.ban(cell, ground);
                }
            }
        }

        true
    }

    /// Collapses `cell` to a single pattern by weighted random sampling,
    /// banning every other still-admissible pattern.
    fn observe(&mut self, cell: usize, rng: &mut Rng) {
        let num_patterns = self.patterns.len();
        let total: f64 = (0..num_patterns)
            .filter(|&p| self.wave.get(cell, p))
            .map(|p| self.wave.weight(p))
            .sum();

        let threshold = rng.next_unit() * total;
        let mut running = 0.0;
        let mut chosen = 0;
        let mut found = false;
        for p in 0..num_patterns {
            if !self.wave.get(cell, p) {
                continue;
            }
            running += self.wave.weight(p);
            if running >= threshold {
                chosen = p;
                found = true;
                break;
            }
        }
        if !found {
            chosen = (0..num_patterns).find(|&p| self.wave.get(cell, p)).unwrap_or(0);
        }

        for p in 0..num_patterns {
            if p != chosen && self.wave.get(cell, p) {
                self.ban(cell, p);
            }
        }
    }

    fn ban(&mut self, cell: CellIndex, pattern: PatternIndex) {
        self.wave.ban(cell, pattern);
        self.worklist.push((cell, pattern));
    }

    /// Drains the ban worklist, propagating each ban to its neighbors.
    /// Returns `Err(Error::Contradiction)` the moment any cell's admissible
    /// set becomes empty.
    fn propagate(&mut self) -> Result<(), Error> {
        let mx = self.options.output_width;
        let my = self.options.output_height;
        let n = self.options.pattern_size;
        let periodic = self.options.periodic_output;

        while let Some((cell, pattern)) = self.worklist.pop() {
            let x1 = (cell % mx) as i32;
            let y1 = (cell / mx) as i32;

            for d in Direction::ALL {
                let mut x2 = x1 + d.dx();
                let mut y2 = y1 + d.dy();

                if periodic {
                    x2 = x2.rem_euclid(mx as i32);
                    y2 = y2.rem_euclid(my as i32);
                } else if x2 < 0
                    || y2 < 0
                    || x2 as usize + n > mx
                    || y2 as usize + n > my
                {
                    continue;
                }

                let neighbor = x2 as usize + y2 as usize * mx;

                let (offset, length) = self.propagator.entry_range(pattern, d);
                for i in offset..offset + length {
                    let p2 = self.propagator.flat_at(i) as usize;
                    if self.wave.decrement_compatibility(d, p2, neighbor) == 0 {
                        self.ban(neighbor, p2);
                        if self.wave.count(neighbor) == 0 {
                            return Err(Error::Contradiction { cell: neighbor });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::options::Heuristic;

    fn single_color_exemplar() -> Exemplar {
        Exemplar::new(4, 4, vec![Color([10, 20, 30]); 16])
    }

    fn checkerboard_exemplar() -> Exemplar {
        let black = Color([0, 0, 0]);
        let white = Color([255, 255, 255]);
        Exemplar::new(2, 2, vec![black, white, white, black])
    }

    #[test]
    fn single_color_solves_immediately() {
        let exemplar = single_color_exemplar();
        let options = Options { output_width: 6, output_height: 6, ..Options::default() };
        let mut solver = Solver::new(options, &exemplar).unwrap();
        solver.run(1).unwrap();
        for cell in 0..solver.wave().num_cells() {
            assert_eq!(solver.wave().count(cell), 1);
        }
    }

    #[test]
    fn checkerboard_collapses_to_alternating_pattern() {
        let exemplar = checkerboard_exemplar();
        let options = Options {
            pattern_size: 2,
            periodic_input: true,
            periodic_output: true,
            output_width: 8,
            output_height: 8,
            symmetry: 0x01,
            heuristic: Heuristic::Mrv,
            ground: false,
            limit: None,
        };
        let mut solver = Solver::new(options, &exemplar).unwrap();
        assert_eq!(solver.patterns().len(), 2);

        for seed in 0..5u64 {
            solver.run(seed).unwrap();
            for cell in 0..solver.wave().num_cells() {
                assert_eq!(solver.wave().count(cell), 1);
            }
        }
    }

    #[test]
    fn count_never_increases_during_a_run() {
        let exemplar = checkerboard_exemplar();
        let options = Options {
            pattern_size: 2,
            periodic_input: true,
            periodic_output: true,
            output_width: 6,
            output_height: 6,
            symmetry: 0xFF,
            heuristic: Heuristic::Entropy,
            ground: false,
            limit: None,
        };
        let mut solver = Solver::new(options, &exemplar).unwrap();
        solver.run(3).unwrap();
        // After a successful run every cell is fully collapsed.
        for cell in 0..solver.wave().num_cells() {
            assert_eq!(solver.wave().count(cell), 1);
        }
    }

    #[test]
    fn rejects_invalid_options_before_extraction() {
        let exemplar = single_color_exemplar();
        let options = Options { pattern_size: 1, ..Options::default() };
        assert!(Solver::new(options, &exemplar).is_err());
    }
}
