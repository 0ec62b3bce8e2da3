pub mod checks;
pub mod sequences;
