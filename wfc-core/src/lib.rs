//! Constraint-propagation core of an overlapping Wave Function Collapse
//! generator.
//!
//! Given a small 2D exemplar, [`Solver`] extracts the set of N×N patterns
//! it contains (under requested dihedral symmetries), builds the
//! pattern-adjacency [`Propagator`], and repeatedly observes/propagates
//! against a [`Wave`] until every output cell is collapsed to a single
//! pattern or a contradiction is found. [`render`] turns a collapsed wave
//! into an RGB grid.
//!
//! This crate never decodes image files, parses a config format, or reads
//! `argv`/the filesystem — a CLI collaborator is expected to do that and
//! call [`Solver::new`]/[`Solver::run`] with an in-memory [`Exemplar`].

mod color;
mod direction;
mod error;
mod exemplar;
mod grid;
mod options;
mod pattern;
mod propagator;
mod render;
mod rng;
mod solver;
mod wave;

pub use color::Color;
pub use error::{ConfigError, Error};
pub use exemplar::Exemplar;
pub use grid::FixedGrid2D;
pub use options::{Heuristic, Options};
pub use render::render;
pub use solver::Solver;
