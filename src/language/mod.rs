pub mod detector;

pub use detector::{Direction, Lang};
