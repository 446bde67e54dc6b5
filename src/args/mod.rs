// Argument classification and container-path rewriting.

pub mod rewrite;

pub use rewrite::{ArgKind, Argument, base_name, container_args, rewrite};
