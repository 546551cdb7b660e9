#[cfg(test)]
pub mod memory;
pub mod model;
pub mod repo;
