//! Saved flag defaults.
//!
//! Config files hold the same flag tokens as the command line, one or more
//! per line, with `#` comments. The global file is merged with a local
//! `.taskdeckrc`, then with the flags actually passed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub perf: bool,
    pub render_debug_log: Option<PathBuf>,
    pub api_base: Option<String>,
    pub strategy: Option<String>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans are OR-ed, options take
    /// `other`'s value when it has one.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            perf: self.perf || other.perf,
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
            api_base: other.api_base.clone().or_else(|| self.api_base.clone()),
            strategy: other.strategy.clone().or_else(|| self.strategy.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("taskdeck").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("taskdeck")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("taskdeck").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("taskdeck")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".taskdeckrc")
}

/// # Errors
/// Fails if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// # Errors
/// Fails if the config directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# taskdeck defaults (saved with --save)".to_string()];
    if let Some(api_base) = &flags.api_base {
        lines.push(format!("--api-base {api_base}"));
    }
    if let Some(strategy) = &flags.strategy {
        lines.push(format!("--strategy {strategy}"));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// # Errors
/// Fails if the file exists and cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list. Anything else, including the
/// program name and the FILE argument, is skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--perf" => flags.perf = true,
            "--render-debug-log" | "--api-base" | "--strategy" => {
                if let Some(next) = tokens.get(i + 1) {
                    set_option(&mut flags, token, next);
                    i += 1;
                }
            }
            _ => {
                if let Some((name, value)) = token.split_once('=') {
                    set_option(&mut flags, name, value);
                }
            }
        }
        i += 1;
    }
    flags
}

fn set_option(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--render-debug-log" => flags.render_debug_log = Some(PathBuf::from(value)),
        "--api-base" => flags.api_base = Some(value.to_string()),
        "--strategy" => flags.strategy = Some(value.to_string()),
        _ => {}
    }
}
