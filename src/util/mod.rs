mod interner;

pub use interner::*;

#[cfg(test)]
pub mod testing;
