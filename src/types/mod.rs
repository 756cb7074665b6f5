pub mod calendar;
pub mod filter;
pub mod palette;
pub mod record;
pub mod summary;
pub mod viz;
