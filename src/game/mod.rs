pub mod attempt;
pub mod judgment;
pub mod replay;
pub mod tracker;
pub mod tunables;
