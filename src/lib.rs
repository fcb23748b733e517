pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod graph;
pub mod model;
pub mod repos;
pub mod scan;
