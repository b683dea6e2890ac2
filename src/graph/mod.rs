pub mod builder;
pub mod frozen;
pub mod generators;

pub use builder::GraphBuilder;
pub use frozen::{Edge, FrozenGraph};
