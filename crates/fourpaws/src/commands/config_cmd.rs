//! Config command handlers. These work on the local file and never
//! touch the backend.

use fourpaws_config::Settings;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn detail(s: &Settings) -> String {
    [
        format!("Backend: {}", s.backend),
        format!("Timeout: {}s", s.timeout),
        format!(
            "Retry:   {} attempts, {}ms base backoff",
            s.retry.attempts, s.retry.backoff
        ),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let settings = fourpaws_config::load_settings()?;
            let out =
                output::render_single(&global.output, &settings, detail, |s| s.backend.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let current = fourpaws_config::load_settings_or_default();

            let backend: String = dialoguer::Input::new()
                .with_prompt("Backend URL")
                .default(current.backend.clone())
                .validate_with(|input: &String| -> Result<(), String> {
                    url::Url::parse(input)
                        .map(|_| ())
                        .map_err(|e| format!("invalid URL: {e}"))
                })
                .interact_text()
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

            let timeout: u64 = dialoguer::Input::new()
                .with_prompt("Request timeout (seconds)")
                .default(current.timeout)
                .interact_text()
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

            let settings = Settings {
                backend,
                timeout,
                ..current
            };
            fourpaws_config::save_settings(&settings)?;

            output::status(
                &format!(
                    "Configuration written to {}",
                    fourpaws_config::config_path().display()
                ),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &fourpaws_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
    }
}
