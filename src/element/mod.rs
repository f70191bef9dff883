pub mod case;
pub mod element_model;
pub mod merge;
pub mod restrictor;
