//! Turns a fully-collapsed (or best-effort) wave into an output image.

use crate::color::Color;
use crate::grid::FixedGrid2D;
use crate::solver::Solver;

/// Reads one pattern cell per output position and renders it to an RGB
/// grid. Safe to call even if the wave is not fully collapsed: an empty
/// cell falls back to pattern 0 and logs a warning, but the returned grid
/// always has the requested dimensions.
pub fn render(solver: &Solver) -> FixedGrid2D<Color> {
    let options = solver.options();
    let mx = options.output_width;
    let my = options.output_height;
    let n = options.pattern_size;
    let patterns = solver.patterns();
    let palette = solver.palette();
    let wave = solver.wave();

    let mut out = FixedGrid2D::filled(mx, my, Color::default());
    let mut unresolved = false;

    for y in 0..my {
        let dy = if options.periodic_output || y + n <= my { 0 } else { n - 1 };
        for x in 0..mx {
            let dx = if options.periodic_output || x + n <= mx { 0 } else { n - 1 };

            // Saturating: for outputs barely larger than pattern_size, dx/dy
            // can exceed x/y; clamping to 0 is the safe-Rust analogue of the
            // reference implementation's (unchecked) pointer arithmetic here.
            let src = x.saturating_sub(dx) + y.saturating_sub(dy) * mx;
            let chosen = (0..patterns.len()).find(|&p| wave.get(src, p));
            let pattern_index = match chosen {
                Some(p) => p,
                None => {
                    unresolved = true;
                    0
                }
            };

            let color_index = patterns[pattern_index].get(dx, dy);
            out.set(x, y, palette[color_index as usize]);
        }
    }

    if unresolved {
        log::warn!("render() called on a wave with at least one unresolved cell");
    }

    out
}
