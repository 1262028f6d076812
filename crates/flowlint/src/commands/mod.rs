pub mod check;
pub mod vocabulary;

pub use check::run_check;
pub use vocabulary::run_commands;
