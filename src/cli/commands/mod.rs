pub mod mcp;
pub mod seed;
pub mod serve;
pub mod stats;
pub mod store;
pub mod todo;



#[cfg(test)]
#[path = "seed_test.rs"]
mod seed_test;
