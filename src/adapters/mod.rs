pub mod fs;
pub mod generator;
