pub mod span;
pub mod interval;
pub mod trigger;
pub mod status;
pub mod payload;
pub mod lexicon;
pub mod dictionary;
pub mod matcher;
pub mod resolver;
pub mod propagation;
pub mod assign;
pub mod segment;
pub mod cortex;

pub use span::*;
pub use interval::*;
pub use trigger::*;
pub use status::*;
pub use payload::*;
pub use dictionary::*;
pub use resolver::*;
pub use propagation::*;
pub use assign::*;
pub use segment::*;
pub use cortex::*;

#[cfg(test)]
mod tests;
