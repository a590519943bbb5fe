#[macro_use]
mod macros;

pub mod certificates;
pub mod currency;
pub mod energy;
