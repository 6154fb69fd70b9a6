//! Config file inspection and creation.

use serde_json::json;

use gluelock_config::Settings;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;

use super::util;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = config::effective_path(global);
            util::emit(global, &json!({ "path": path }), |_| println!("{}", path.display()))
        }

        ConfigCommand::Show => {
            let settings = config::load(global)?;
            // Serialization skips the password.
            let has_password = settings.password.is_some();
            util::emit(global, &settings, |s| {
                println!("name                      = {}", s.name);
                println!("url                       = {}", s.url);
                println!("username                  = {}", s.username.as_deref().unwrap_or("(unset)"));
                println!("password                  = {}", if has_password { "(set)" } else { "(unset)" });
                println!("hub-id                    = {}", s.hub_id.as_deref().unwrap_or("(discover)"));
                println!("lock-id                   = {}", s.lock_id.as_deref().unwrap_or("(discover)"));
                println!("check-for-events          = {}", s.check_for_events);
                println!("check-for-events-interval = {}s", s.check_for_events_interval);
                println!("timeout                   = {}s", s.timeout);
            })
        }

        ConfigCommand::Init {
            username,
            check_for_events_interval,
            force,
        } => {
            let path = config::effective_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut settings = Settings {
                username: Some(username),
                hub_id: global.hub_id.clone(),
                lock_id: global.lock_id.clone(),
                ..Settings::default()
            };
            if let Some(ref url) = global.url {
                settings.url.clone_from(url);
            }
            if let Some(secs) = check_for_events_interval {
                settings.check_for_events_interval = secs;
            }

            gluelock_config::save_settings(&settings, &path)?;
            eprintln!("Config written to {}", path.display());
            eprintln!("Add `password = \"...\"` to it or export GLUE_PASSWORD.");
            Ok(())
        }
    }
}
