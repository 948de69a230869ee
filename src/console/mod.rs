pub mod output;
pub mod types;

pub use output::{spawn_writer, Console};
pub use types::ConsoleCommand;
