// HTTP routes
pub mod health;
pub mod laptops;

pub use health::*;
pub use laptops::*;
