use crate::{evaluated_solution::EvaluatedSolution, level::Level, objective_value::ObjectiveValue};

/// An ordered hierarchy of levels. `evaluate` produces an `ObjectiveValue`
/// that compares lexicographically, which is what lets the ILP variants
/// reuse a single machinery for both single-objective (max riders) and
/// multi-level (lexicographic max-min) solves.
pub struct Objective<S> {
    levels: Vec<Level<S>>,
}

impl<S> Objective<S> {
    pub fn new(levels: Vec<Level<S>>) -> Objective<S> {
        Objective { levels }
    }

    pub fn evaluate(&self, solution: S) -> EvaluatedSolution<S> {
        let value = ObjectiveValue::new(self.levels.iter().map(|l| l.evaluate(&solution)).collect());
        EvaluatedSolution::new(solution, value)
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn describe(&self) -> String {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, l)| format!("level {}: {}", i, l.describe()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
