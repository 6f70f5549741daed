pub mod branch;
pub mod cli;
pub mod parse;
