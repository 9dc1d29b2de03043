pub mod config;
pub mod index;
pub mod math;
pub mod scorer;
pub mod weight;

pub use config::*;
pub use index::*;
pub use math::*;
pub use scorer::*;
pub use weight::*;
