#![forbid(unsafe_code)]

pub mod graph;
pub mod model;
pub mod time;
pub mod wizard;

pub use time::Clock;
