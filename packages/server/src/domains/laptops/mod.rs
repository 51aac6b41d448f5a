pub mod data;
pub mod filter;
pub mod models;

pub use data::{BrandCount, BrandList, LaptopCreated, LaptopList, LaptopRecord};
pub use filter::LaptopQuery;
pub use models::{Laptop, LAPTOP_COLLECTION};
