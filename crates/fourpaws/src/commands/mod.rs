//! Command dispatch: bridges CLI args -> platform calls -> output formatting.

pub mod animals;
pub mod auth;
pub mod comments;
pub mod communities;
pub mod config_cmd;
pub mod posts;
pub mod util;

use fourpaws_core::Platform;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    platform: &Platform,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(platform, args, global).await,
        Command::Animals(args) => animals::handle(platform, args, global).await,
        Command::Communities(args) => communities::handle(platform, args, global).await,
        Command::Posts(args) => posts::handle(platform, args, global).await,
        Command::Comments(args) => comments::handle(platform, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
