use std::{env, path::PathBuf};

#[must_use]
pub fn get_current_dir() -> String {
    // Prefer PWD environment variable over cwd if available to better support symbolic links
    match env::var("PWD") {
        Ok(v) => v,
        Err(_) => match env::current_dir() {
            Ok(dir) => dir.display().to_string(),
            Err(_) => String::new(),
        },
    }
}

/// Fetch the home directory on unix systems via the $HOME env variable.
///
/// Falls back to the current directory when $HOME is not set, so that retour
/// still works (with a local data dir) in stripped down environments.
#[must_use]
pub fn get_home_dir() -> PathBuf {
    env::var("HOME").map_or_else(|_| PathBuf::from(get_current_dir()), PathBuf::from)
}

/// Fetch the data directory for retour to store data.
///
/// Defaults to `$XDG_DATA_HOME` or `$HOME/.local/share/retour` if `$XDG_DATA_HOME` cannot be found.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    let data_dir = env::var("XDG_DATA_HOME").map_or_else(
        |_| get_home_dir().join(".local").join("share"),
        PathBuf::from,
    );
    data_dir.join("retour")
}

/// Fetch the config directory for locating any user set retour configuration.
///
/// Defaults to `$XDG_CONFIG_HOME` or `$HOME/.config/retour` if `$XDG_CONFIG_HOME` cannot be found.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    let config_dir = env::var("XDG_CONFIG_HOME")
        .map_or_else(|_| get_home_dir().join(".config"), PathBuf::from);
    config_dir.join("retour")
}
