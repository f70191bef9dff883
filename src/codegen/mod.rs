pub mod code_builder;
pub mod fingerprint;
pub mod imports;
pub mod page_object;
pub mod queued;
pub mod snippets;
