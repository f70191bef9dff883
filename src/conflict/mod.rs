pub mod duplicates;
pub mod resolver;
