//! Config subcommand handlers.

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

fn invalid(key: &str, reason: impl Into<String>) -> CliError {
    CliError::Validation {
        field: key.into(),
        reason: reason.into(),
    }
}

/// Apply `key = value` to `cfg`.
fn set_value(cfg: &mut Config, key: &str, value: &str) -> Result<(), CliError> {
    match key {
        "base_url" => cfg.base_url = value.into(),
        "timeout" => {
            cfg.timeout = value
                .parse()
                .map_err(|_| invalid(key, format!("expected seconds, got '{value}'")))?;
        }
        "insecure" => {
            cfg.insecure = value
                .parse()
                .map_err(|_| invalid(key, format!("expected true or false, got '{value}'")))?;
        }
        "ca_cert" => cfg.ca_cert = (!value.is_empty()).then(|| value.into()),
        "storage_path" => cfg.storage_path = (!value.is_empty()).then(|| value.into()),
        "output" => cfg.defaults.output = value.into(),
        "color" => cfg.defaults.color = value.into(),
        other => return Err(invalid("key", format!("unknown config key '{other}'"))),
    }
    // Reject values the client could not use.
    cfg.to_client_config()?;
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let path = config::config_path();
            eprintln!("zheye configuration");
            eprintln!("   Config path: {}\n", path.display());

            let defaults = config::load_config().unwrap_or_default();
            let base_url: String = Input::new()
                .with_prompt("API root URL")
                .default(defaults.base_url.clone())
                .interact_text()
                .map_err(prompt_err)?;
            let timeout: u64 = Input::new()
                .with_prompt("Request timeout (seconds)")
                .default(defaults.timeout)
                .interact_text()
                .map_err(prompt_err)?;

            let mut cfg = defaults;
            set_value(&mut cfg, "base_url", &base_url)?;
            set_value(&mut cfg, "timeout", &timeout.to_string())?;
            config::save_config(&cfg)?;
            output::status(&format!("Saved {}", path.display()), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            let out = toml::to_string_pretty(&cfg)
                .map_err(|e| CliError::Internal(format!("failed to render config: {e}")))?;
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            set_value(&mut cfg, &key, &value)?;
            config::save_config(&cfg)?;
            output::status(&format!("Set {key} = {value}"), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_value_parses_types() {
        let mut cfg = Config::default();
        set_value(&mut cfg, "timeout", "12").unwrap();
        set_value(&mut cfg, "insecure", "true").unwrap();
        assert_eq!(cfg.timeout, 12);
        assert!(cfg.insecure);
    }

    #[test]
    fn set_value_rejects_unknown_key_and_bad_url() {
        let mut cfg = Config::default();
        assert!(set_value(&mut cfg, "nope", "1").is_err());
        assert!(set_value(&mut cfg, "base_url", "not a url").is_err());
        assert!(set_value(&mut cfg, "timeout", "soon").is_err());
    }
}
