pub mod base_value;
pub mod coefficient;
pub mod evaluated_solution;
pub mod indicator;
pub mod level;
pub mod objective;
pub mod objective_value;

pub use base_value::BaseValue;
pub use coefficient::Coefficient;
pub use evaluated_solution::EvaluatedSolution;
pub use indicator::Indicator;
pub use level::Level;
pub use objective::Objective;
pub use objective_value::ObjectiveValue;

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstIndicator(i64, &'static str);
    impl Indicator<()> for ConstIndicator {
        fn evaluate(&self, _solution: &()) -> BaseValue {
            BaseValue::Integer(self.0)
        }
        fn name(&self) -> String {
            self.1.to_string()
        }
    }

    #[test]
    fn lexicographic_ordering_prefers_first_level() {
        let better = Level::new(vec![(Coefficient::Integer(1), Box::new(ConstIndicator(1, "a")) as Box<dyn Indicator<()>>)]);
        let worse = Level::new(vec![(Coefficient::Integer(1), Box::new(ConstIndicator(2, "a")) as Box<dyn Indicator<()>>)]);
        let obj_better = Objective::new(vec![better]);
        let obj_worse = Objective::new(vec![worse]);
        let a = obj_better.evaluate(());
        let b = obj_worse.evaluate(());
        assert!(a.objective_value() < b.objective_value());
    }
}
