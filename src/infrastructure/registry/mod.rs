mod json;

pub use json::JsonContentRegistry;
