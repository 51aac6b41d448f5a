pub mod laptop;

pub use laptop::*;
