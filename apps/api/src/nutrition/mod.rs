// Nutrition & hydration targets for match day.
// Pure arithmetic only: no I/O, no errors. Inputs are validated upstream (profile module).

pub mod calculator;

pub use calculator::{calculate, NutritionCalcs, NutritionInputs};
