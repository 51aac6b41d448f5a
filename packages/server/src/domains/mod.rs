// Business domains
pub mod laptops;
