pub mod common;
pub mod identity;
pub mod locations;
pub mod person;
pub mod report;
pub mod sorting;
