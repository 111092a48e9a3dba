//! CLI configuration: a thin layer over `wavespa_config` that applies
//! `GlobalOpts` overrides (--api-root, --username, --timeout).

use std::time::Duration;

use wavespa_core::ControllerConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use wavespa_config::{
    Config, Profile, Region, config_path, load_config, load_config_or_default, save_config,
    store_password,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Build the profile the command runs with: the stored one (if any) with
/// flag overrides on top. A profile named with `--profile` must exist.
pub fn effective_profile(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<Profile, CliError> {
    let mut profile = match config.profile(profile_name) {
        Ok(profile) => profile.clone(),
        Err(_) if global.profile.is_none() => Profile::default(),
        Err(_) => {
            return Err(CliError::ProfileNotFound {
                name: profile_name.into(),
                available: available_profiles(config),
            });
        }
    };

    if let Some(ref root) = global.api_root {
        profile.api_root = Some(root.clone());
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    Ok(profile)
}

/// Translate config + flags into a `ControllerConfig`.
pub fn resolve_controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let config = load_config_or_default();
    let name = active_profile_name(global, &config);
    let profile = effective_profile(global, &config, &name)?;

    let mut controller_config =
        wavespa_config::profile_to_controller_config(&profile, &name, &config.defaults)?;
    if let Some(secs) = global.timeout {
        controller_config.timeout = Duration::from_secs(secs);
    }
    Ok(controller_config)
}

pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["wavespa"];
        argv.extend_from_slice(args);
        argv.push("devices");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut config = Config::default();
        config.profiles.insert(name.into(), profile);
        config
    }

    #[test]
    fn flags_override_profile() {
        let config = config_with(
            "default",
            Profile {
                username: Some("stored@example.com".into()),
                region: Some(Region::Us),
                ..Profile::default()
            },
        );
        let opts = global(&["--username", "flag@example.com", "--api-root", "http://localhost:1"]);

        let profile = effective_profile(&opts, &config, "default").unwrap();
        assert_eq!(profile.username.as_deref(), Some("flag@example.com"));
        assert_eq!(profile.api_root.as_deref(), Some("http://localhost:1"));
        assert_eq!(profile.region, Some(Region::Us));
    }

    #[test]
    fn implicit_default_profile_may_be_absent() {
        let profile = effective_profile(&global(&[]), &Config::default(), "default").unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn explicit_profile_must_exist() {
        let config = config_with("home", Profile::default());
        let opts = global(&["--profile", "cabin"]);
        match effective_profile(&opts, &config, "cabin") {
            Err(CliError::ProfileNotFound { name, available }) => {
                assert_eq!(name, "cabin");
                assert_eq!(available, "home");
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }
}
