mod diagnostic;
mod message;

pub use diagnostic::*;
pub use message::*;

#[cfg(test)]
mod diagnostic_test;
