//! XDG base-directory resolution.
//!
//! Every lookup takes the environment as a closure so callers and tests can
//! substitute their own variables instead of mutating the process
//! environment.
use std::path::PathBuf;

/// Subdirectory name used under each base directory.
pub const APP_DIR: &str = "sideload";

/// Read a variable from the process environment, treating empty as unset.
#[must_use]
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn home(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    env("HOME")
        .or_else(|| env("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
}

fn base_dir(env: &impl Fn(&str) -> Option<String>, var: &str, fallback: &[&str]) -> PathBuf {
    env(var).map_or_else(
        || fallback.iter().fold(home(env), |dir, part| dir.join(part)),
        PathBuf::from,
    )
}

/// `$XDG_CONFIG_HOME/sideload` (default `~/.config/sideload`).
#[must_use]
pub fn config_dir(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    base_dir(env, "XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
}

/// `$XDG_DATA_HOME/sideload` (default `~/.local/share/sideload`).
#[must_use]
pub fn data_dir(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    base_dir(env, "XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR)
}

/// `$XDG_CACHE_HOME/sideload` (default `~/.cache/sideload`).
#[must_use]
pub fn cache_dir(env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    base_dir(env, "XDG_CACHE_HOME", &[".cache"]).join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn xdg_variables_take_precedence() {
        let env = env_of(&[
            ("HOME", "/home/u"),
            ("XDG_CONFIG_HOME", "/cfg"),
            ("XDG_DATA_HOME", "/data"),
            ("XDG_CACHE_HOME", "/cache"),
        ]);
        assert_eq!(config_dir(&env), PathBuf::from("/cfg/sideload"));
        assert_eq!(data_dir(&env), PathBuf::from("/data/sideload"));
        assert_eq!(cache_dir(&env), PathBuf::from("/cache/sideload"));
    }

    #[test]
    fn home_fallbacks() {
        let env = env_of(&[("HOME", "/home/u")]);
        assert_eq!(config_dir(&env), PathBuf::from("/home/u/.config/sideload"));
        assert_eq!(
            data_dir(&env),
            PathBuf::from("/home/u/.local/share/sideload")
        );
        assert_eq!(cache_dir(&env), PathBuf::from("/home/u/.cache/sideload"));
    }

    #[test]
    fn userprofile_used_without_home() {
        let env = env_of(&[("USERPROFILE", "/users/u")]);
        assert_eq!(cache_dir(&env), PathBuf::from("/users/u/.cache/sideload"));
    }

    #[test]
    fn no_home_falls_back_to_current_dir() {
        let env = env_of(&[]);
        assert_eq!(data_dir(&env), PathBuf::from("./.local/share/sideload"));
    }
}
