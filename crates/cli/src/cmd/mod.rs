mod create;
mod defaults;

pub use create::{CreateArgs, cmd_create};
pub use defaults::{DefaultsCommand, cmd_defaults};
