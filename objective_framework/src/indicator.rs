use crate::base_value::BaseValue;

/// A named scalar measurement over a solution. Each assignment variant's
/// objective is assembled from a handful of these, e.g. "total riders",
/// "negative minimum load", "count of drivers at load >= t".
pub trait Indicator<S> {
    fn evaluate(&self, solution: &S) -> BaseValue;
    fn name(&self) -> String;
}
