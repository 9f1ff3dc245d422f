pub mod document;
pub mod features;
