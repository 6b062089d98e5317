pub mod calculator;
pub mod error;
pub mod model;
pub mod reference;
pub mod util;

pub use error::EmissionError;
