mod fuel_calculator;
mod gwp;

pub use fuel_calculator::{FuelEmissionCalculator, FuelLookupPolicy, MJ_PER_KWH};
pub use gwp::GwpTable;
