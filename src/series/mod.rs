pub mod assembler;
pub mod error;
