//! Distance estimates for heuristic-guided search.
//!
//! A heuristic estimates the number of edges left between two cells. A* only
//! returns shortest paths when the estimate never exceeds the true remaining
//! edge count (admissibility). Each heuristic reports whether it holds that
//! contract through [`Heuristic::is_admissible`]. Inadmissible heuristics
//! still find a path, usually after fewer expansions, but it may be longer
//! than the shortest one.

use crate::grid::Cell;
use serde::{Deserialize, Serialize};

pub trait Heuristic {
    /// Estimated remaining edge count from `from` to `to`
    fn estimate(&self, from: &Cell, to: &Cell) -> f64;

    /// Whether `estimate` is a lower bound on the true remaining edge count
    fn is_admissible(&self) -> bool {
        true
    }
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    fn estimate(&self, from: &Cell, to: &Cell) -> f64 {
        (**self).estimate(from, to)
    }

    fn is_admissible(&self) -> bool {
        (**self).is_admissible()
    }
}

impl<H: Heuristic + ?Sized> Heuristic for Box<H> {
    fn estimate(&self, from: &Cell, to: &Cell) -> f64 {
        (**self).estimate(from, to)
    }

    fn is_admissible(&self) -> bool {
        (**self).is_admissible()
    }
}

/// Manhattan distance. Exact on an obstacle-free 4-connected grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, from: &Cell, to: &Cell) -> f64 {
        from.manhattan(to) as f64
    }
}

/// Straight-line distance. Never larger than Manhattan.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    fn estimate(&self, from: &Cell, to: &Cell) -> f64 {
        from.euclidean(to)
    }
}

/// Manhattan distance scaled by `factor`.
///
/// Makes the search greedier. Admissible only for `factor <= 1`.
#[derive(Debug, Clone, Copy)]
pub struct Aggressive {
    pub factor: f64,
}

impl Aggressive {
    pub fn new(factor: f64) -> Self {
        Aggressive { factor }
    }
}

impl Heuristic for Aggressive {
    fn estimate(&self, from: &Cell, to: &Cell) -> f64 {
        from.manhattan(to) as f64 * self.factor
    }

    fn is_admissible(&self) -> bool {
        self.factor <= 1.0
    }
}

/// How [`MinMax`] combines its two estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Min,
    Max,
}

/// Combinator that takes the min or max of two heuristics.
///
/// The max of two admissible heuristics is admissible and at least as tight
/// as either. The min is admissible if either input is.
#[derive(Debug, Clone, Copy)]
pub struct MinMax<A, B> {
    pub first: A,
    pub second: B,
    pub blend: Blend,
}

impl<A: Heuristic, B: Heuristic> MinMax<A, B> {
    pub fn max(first: A, second: B) -> Self {
        MinMax { first, second, blend: Blend::Max }
    }

    pub fn min(first: A, second: B) -> Self {
        MinMax { first, second, blend: Blend::Min }
    }
}

impl<A: Heuristic, B: Heuristic> Heuristic for MinMax<A, B> {
    fn estimate(&self, from: &Cell, to: &Cell) -> f64 {
        let a = self.first.estimate(from, to);
        let b = self.second.estimate(from, to);
        match self.blend {
            Blend::Min => a.min(b),
            Blend::Max => a.max(b),
        }
    }

    fn is_admissible(&self) -> bool {
        match self.blend {
            Blend::Min => self.first.is_admissible() || self.second.is_admissible(),
            Blend::Max => self.first.is_admissible() && self.second.is_admissible(),
        }
    }
}

/// Adapter for a plain function or closure. The caller states admissibility.
pub struct FnHeuristic<F> {
    estimate: F,
    admissible: bool,
}

/// Wrap a function as a heuristic
pub fn from_fn<F>(estimate: F, admissible: bool) -> FnHeuristic<F>
where
    F: Fn(&Cell, &Cell) -> f64,
{
    FnHeuristic { estimate, admissible }
}

impl<F> Heuristic for FnHeuristic<F>
where
    F: Fn(&Cell, &Cell) -> f64,
{
    fn estimate(&self, from: &Cell, to: &Cell) -> f64 {
        (self.estimate)(from, to)
    }

    fn is_admissible(&self) -> bool {
        self.admissible
    }
}

/// Heuristic choice as written in `config.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    Manhattan,
    Euclidean,
    Aggressive,
    MinMax,
}

impl HeuristicKind {
    /// Instantiate the heuristic. `aggressive_factor` only affects `Aggressive`.
    pub fn build(self, aggressive_factor: f64) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Manhattan => Box::new(Manhattan),
            HeuristicKind::Euclidean => Box::new(Euclidean),
            HeuristicKind::Aggressive => Box::new(Aggressive::new(aggressive_factor)),
            HeuristicKind::MinMax => Box::new(MinMax::max(Manhattan, Euclidean)),
        }
    }
}
