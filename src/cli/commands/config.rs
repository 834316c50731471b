use exameets_config::Config;

use crate::auth::Role;
use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::{io, output};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View or change endpoints, session and preferences",
        "config [show|path|set <key> <value>|unset <key>]",
        cmd_config,
    )]
}

const KEYS: &[&str] = &[
    "api_url",
    "timeout",
    "dwell_ms",
    "login_route",
    "user",
    "role",
    "token",
    "cloud_name",
    "upload_preset",
    "upload_url",
    "color",
    "log_filter",
];

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None | Some("show") => {
            show_config(&context.config);
            Ok(())
        }
        Some("path") => {
            io::print_info(context.config_manager.config_path().display());
            Ok(())
        }
        Some("set") => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    KEYS.join("|")
                )));
            }
            let value = args[2..].join(" ");
            set_value(&mut context.config, args[1], Some(value.trim()))?;
            persist(context, args[1])
        }
        Some("unset") => {
            let key = args.get(1).ok_or_else(|| {
                CommandError::InvalidArguments("usage: config unset <key>".into())
            })?;
            set_value(&mut context.config, key, None)?;
            persist(context, key)
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`"
        ))),
    }
}

fn persist(context: &mut ShellContext, key: &str) -> CommandResult {
    context.config_manager.save(&context.config)?;
    context.refresh_from_config()?;
    io::print_success(format!("Updated `{}`.", key.to_lowercase()));
    Ok(())
}

fn show_config(config: &Config) {
    let or_unset = |value: Option<&str>| value.unwrap_or("(unset)").to_string();
    output::section("Configuration");
    output::rows(&[
        ("api_url".into(), config.api_base_url.clone()),
        ("timeout".into(), format!("{}s", config.request_timeout_secs)),
        ("dwell_ms".into(), config.success_dwell_ms.to_string()),
        ("login_route".into(), config.login_route.clone()),
        ("user".into(), or_unset(config.session.user_id.as_deref())),
        ("role".into(), or_unset(config.session.role.as_deref())),
        (
            "token".into(),
            if config.session.auth_token.is_some() { "(set)" } else { "(unset)" }.into(),
        ),
        ("cloud_name".into(), config.media.cloud_name.clone()),
        ("upload_preset".into(), config.media.upload_preset.clone()),
        ("upload_url".into(), config.media.resolve_upload_url()),
        ("color".into(), config.ui_color_enabled.to_string()),
        ("log_filter".into(), or_unset(config.log_filter.as_deref())),
    ]);
}

fn set_value(config: &mut Config, key: &str, value: Option<&str>) -> CommandResult {
    let required = |value: Option<&str>| {
        value
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_else(|| CommandError::InvalidArguments(format!("`{key}` cannot be unset")))
    };
    let optional = |value: Option<&str>| {
        value
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    let number = |value: Option<&str>| -> Result<u64, CommandError> {
        required(value)?
            .parse::<u64>()
            .map_err(|_| CommandError::InvalidArguments(format!("`{key}` expects a whole number")))
    };

    match key.to_lowercase().as_str() {
        "api_url" => config.api_base_url = required(value)?.trim_end_matches('/').to_string(),
        "timeout" => config.request_timeout_secs = number(value)?,
        "dwell_ms" => config.success_dwell_ms = number(value)?,
        "login_route" => config.login_route = required(value)?,
        "user" => config.session.user_id = optional(value),
        "role" => {
            let role = optional(value);
            if let Some(raw) = &role {
                raw.parse::<Role>().map_err(CommandError::InvalidArguments)?;
            }
            config.session.role = role;
        }
        "token" => config.session.auth_token = optional(value),
        "cloud_name" => config.media.cloud_name = optional(value).unwrap_or_default(),
        "upload_preset" => config.media.upload_preset = optional(value).unwrap_or_default(),
        "upload_url" => config.media.upload_url = optional(value),
        "color" => {
            config.ui_color_enabled = match required(value)?.to_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "`color` expects on/off, got `{other}`"
                    )))
                }
            }
        }
        "log_filter" => config.log_filter = optional(value),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{other}`; expected one of {}",
                KEYS.join(", ")
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::testing::harness;

    #[test]
    fn role_values_are_checked() {
        let mut config = Config::default();
        assert!(set_value(&mut config, "role", Some("superuser")).is_err());
        set_value(&mut config, "role", Some("manager")).unwrap();
        assert_eq!(config.session.role.as_deref(), Some("manager"));
        set_value(&mut config, "role", None).unwrap();
        assert_eq!(config.session.role, None);
    }

    #[test]
    fn required_keys_cannot_be_unset() {
        let mut config = Config::default();
        assert!(set_value(&mut config, "api_url", None).is_err());
        assert!(set_value(&mut config, "timeout", Some("soon")).is_err());
        set_value(&mut config, "api_url", Some("https://api.example/")).unwrap();
        assert_eq!(config.api_base_url, "https://api.example");
    }

    #[test]
    fn set_persists_and_refreshes_the_session() {
        let mut h = harness(None);
        h.run(&["config set role admin", "config set user a1"]);
        let reloaded = h.context.config_manager.load().unwrap();
        assert_eq!(reloaded.session.role.as_deref(), Some("admin"));
        assert!(h.context.prompt().contains("a1@admin"));
    }
}
