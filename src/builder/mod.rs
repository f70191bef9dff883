pub mod fabrication;
pub mod page_object_builder;
pub mod paths;
