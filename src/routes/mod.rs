pub mod calendar;
pub mod dashboard;
pub mod health;
pub mod options;
pub mod query;
pub mod upload;
