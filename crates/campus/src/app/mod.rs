mod bootstrap;
mod gameplay;
mod loop_runner;

pub use bootstrap::Variant;
pub use loop_runner::run;
