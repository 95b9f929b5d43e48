pub mod nested;
pub mod populator;
pub mod tracker;
