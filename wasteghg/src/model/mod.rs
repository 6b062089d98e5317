mod calculation_context;
mod input_file;
pub mod landfill;
pub mod pathway;
pub mod scenario;

pub use calculation_context::CalculationContext;
pub use input_file::read_input;
