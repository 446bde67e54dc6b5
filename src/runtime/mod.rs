// Container runtime: dependency check, command composition, execution.

pub mod command;
pub mod engine;
pub mod run;
pub mod types;

pub use command::compose;
pub use engine::{ensure_available, stdin_is_tty, tty_flag, user_args};
pub use run::execute;
pub use types::{ContainerCommand, ContainerResult};
