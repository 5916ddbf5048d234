pub mod cli;
pub mod commands;
pub mod search;
pub mod utils;
pub mod writers;
