pub mod aggregate;
pub mod calendar;
pub mod derive;
pub mod filter;
pub mod load;
pub mod rasterize;
pub mod render;
