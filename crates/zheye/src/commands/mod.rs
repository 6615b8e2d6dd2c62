//! Command dispatch: bridges CLI args -> store actions -> output formatting.

pub mod columns;
pub mod config_cmd;
pub mod posts;
pub mod route;
pub mod session;
pub mod util;

use zheye_core::Store;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Columns(args) => columns::handle(store, args, global).await,
        Command::Posts(args) => posts::handle(store, args, global).await,
        Command::Login(args) => session::login(store, args, global).await,
        Command::Logout => {
            session::logout(store, global);
            Ok(())
        }
        Command::Whoami => session::whoami(store, global).await,
        Command::Route { path } => route::handle(store, &path, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not need a server connection".into(),
        )),
    }
}
