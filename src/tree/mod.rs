pub mod builder;
pub mod element_model;
pub mod registry;
