//! Auth command handlers.

use fourpaws_core::{NewAccount, Platform, User};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(user: &User) -> String {
    [
        format!("ID:       {}", user.id),
        format!("Username: {}", user.username),
        format!("Role:     {}", user.role.as_deref().unwrap_or("-")),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    platform: &Platform,
    args: AuthArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Login { username, password } => {
            let username = match username {
                Some(name) => name,
                None => dialoguer::Input::new()
                    .with_prompt("Username")
                    .interact_text()
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
            };
            let password = util::password_or_prompt(password)?;

            let user = platform.session().login(&username, password).await?;
            output::status(
                &format!("Logged in as {}", user.username),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        AuthCommand::Register {
            username,
            email,
            birth_date,
            password,
        } => {
            let password = util::password_or_prompt(password)?;
            let user = platform
                .session()
                .register(NewAccount {
                    username,
                    email,
                    password,
                    birth_date,
                })
                .await?;
            output::status(
                &format!("Account created, logged in as {}", user.username),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        AuthCommand::Logout => {
            // Local only: drops the in-memory session and the saved file.
            platform.session().logout();
            output::status("Logged out", &global.color, global.quiet);
            Ok(())
        }

        AuthCommand::Whoami => match platform.session().current_user() {
            Some(user) => {
                let out =
                    output::render_single(&global.output, &user, detail, |u| u.username.clone());
                output::print_output(&out, global.quiet);
                Ok(())
            }
            None => Err(CliError::AuthRequired),
        },
    }
}
