pub mod form;
pub mod hooks;
pub mod properties;
pub mod request;
