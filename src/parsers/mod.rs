//! Loaders turning city trip files into records

pub mod trips;

pub use trips::TripCsvParser;
