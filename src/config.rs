use crate::cmds::Cmd;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use termion::event::Key;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "CARECAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(mut path) = dirs::config_dir() {
        path.push("carecal");
        path.push("config.toml");
        locations.push(path);
    }

    if let Some(mut path) = dirs::home_dir() {
        path.push(".carecal.toml");
        locations.push(path);
    }

    locations
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key_map: KeyMap,
    pub tick_rate: Duration,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            key_map: HashMap::new(),
            tick_rate: Duration::from_millis(500),
        };

        config.key_map.insert(Key::Char('l'), Cmd::NextDay);
        config.key_map.insert(Key::Char('h'), Cmd::PrevDay);
        config.key_map.insert(Key::Char('j'), Cmd::NextWeek);
        config.key_map.insert(Key::Char('k'), Cmd::PrevWeek);
        config.key_map.insert(Key::Char('L'), Cmd::NextMonth);
        config.key_map.insert(Key::Char('H'), Cmd::PrevMonth);
        config.key_map.insert(Key::Char('t'), Cmd::SelectToday);
        config.key_map.insert(Key::Char('f'), Cmd::NextFilter);
        config.key_map.insert(Key::Char('F'), Cmd::PrevFilter);
        config.key_map.insert(Key::Char(']'), Cmd::NextItem);
        config.key_map.insert(Key::Char('['), Cmd::PrevItem);
        config.key_map.insert(Key::Char('a'), Cmd::EnterInsert);
        config.key_map.insert(Key::Char('q'), Cmd::Exit);

        config
    }
}

/// On-disk representation. Everything is optional and overlays the
/// defaults, e.g.:
///
/// ```toml
/// tick_rate_ms = 1000
///
/// [keys]
/// next-month = "n"
/// prev-month = "p"
/// ```
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    tick_rate_ms: Option<u64>,
    #[serde(default)]
    keys: HashMap<String, String>,
}

impl Config {
    pub fn from_file(path: &Path) -> io::Result<Config> {
        let raw = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&raw)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut config = Config::default();

        if let Some(ms) = file.tick_rate_ms {
            config.tick_rate = Duration::from_millis(ms);
        }

        for (cmd_name, key_name) in &file.keys {
            match (parse_cmd(cmd_name), parse_key(key_name)) {
                (Some(cmd), Some(key)) => {
                    config.key_map.insert(key, cmd);
                }
                _ => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("invalid key binding '{} = \"{}\"'", cmd_name, key_name),
                    ))
                }
            }
        }

        Ok(config)
    }
}

/// Loads the explicitly given file, else the first existing candidate
/// location, else the built-in defaults.
pub fn load_suitable_config(explicit: Option<&Path>) -> io::Result<Config> {
    if let Some(path) = explicit {
        return Config::from_file(path);
    }

    for location in find_configfile_locations() {
        if location.exists() {
            log::info!("using config file {}", location.display());
            return Config::from_file(&location);
        }
    }

    Ok(Config::default())
}

fn parse_cmd(name: &str) -> Option<Cmd> {
    match name {
        "next-day" => Some(Cmd::NextDay),
        "prev-day" => Some(Cmd::PrevDay),
        "next-week" => Some(Cmd::NextWeek),
        "prev-week" => Some(Cmd::PrevWeek),
        "next-month" => Some(Cmd::NextMonth),
        "prev-month" => Some(Cmd::PrevMonth),
        "today" => Some(Cmd::SelectToday),
        "next-filter" => Some(Cmd::NextFilter),
        "prev-filter" => Some(Cmd::PrevFilter),
        "next-item" => Some(Cmd::NextItem),
        "prev-item" => Some(Cmd::PrevItem),
        "insert" => Some(Cmd::EnterInsert),
        "quit" => Some(Cmd::Exit),
        _ => None,
    }
}

fn parse_key(name: &str) -> Option<Key> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(Key::Char(c));
    }

    match name {
        "left" => Some(Key::Left),
        "right" => Some(Key::Right),
        "up" => Some(Key::Up),
        "down" => Some(Key::Down),
        "esc" => Some(Key::Esc),
        "backspace" => Some(Key::Backspace),
        "enter" => Some(Key::Char('\n')),
        "tab" => Some(Key::Char('\t')),
        "space" => Some(Key::Char(' ')),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_the_basics() {
        let config = Config::default();
        assert_eq!(config.key_map.get(&Key::Char('q')), Some(&Cmd::Exit));
        assert_eq!(config.key_map.get(&Key::Char('L')), Some(&Cmd::NextMonth));
        assert_eq!(config.tick_rate, Duration::from_millis(500));
    }

    #[test]
    fn file_overlays_defaults() {
        let raw: ConfigFile = toml::from_str(
            r#"
            tick_rate_ms = 1000

            [keys]
            next-month = "n"
            quit = "esc"
            "#,
        )
        .unwrap();

        assert_eq!(raw.tick_rate_ms, Some(1000));
        assert_eq!(parse_cmd("next-month"), Some(Cmd::NextMonth));
        assert_eq!(parse_key(raw.keys.get("quit").unwrap()), Some(Key::Esc));
    }

    #[test]
    fn unknown_binding_is_reported() {
        assert_eq!(parse_cmd("warp-ten"), None);
        assert_eq!(parse_key("hyper-x"), None);
    }
}
