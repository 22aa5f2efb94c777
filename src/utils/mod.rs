pub mod lines;
pub mod parallel;
pub mod progress;
