pub mod athlete;
pub mod routine;
