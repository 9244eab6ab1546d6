/// Startup settings, read from a fixed-order line-based config file.
///
/// Nine required lines, in order: title, player speed, start x, start y,
/// collision enabled, enemy collision enabled, bullet capacity, bullet
/// cooldown ticks, debug flag.  Anything missing or malformed is a fatal
/// startup error — there is no partial or default configuration.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

pub const DEFAULT_PATH: &str = "maze.config";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub title: String,
    pub player_speed: i32,
    pub start_x: i32,
    pub start_y: i32,
    pub collision: bool,
    pub enemy_collision: bool,
    pub bullets_amount: u32,
    pub bullets_cooldown: u32,
    pub debug: bool,
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    parse_settings(&text).with_context(|| format!("invalid config file {}", path.display()))
}

/// Parse the nine-line settings text.  Extra trailing lines are ignored;
/// CRLF endings and surrounding whitespace are tolerated.
pub fn parse_settings(text: &str) -> Result<Settings> {
    let lines: Vec<&str> = text.lines().collect();
    Ok(Settings {
        title: field(&lines, 0, "title")?.to_string(),
        player_speed: int_field(&lines, 1, "player speed")?,
        start_x: int_field(&lines, 2, "start x")?,
        start_y: int_field(&lines, 3, "start y")?,
        collision: flag_field(&lines, 4, "collision enabled")?,
        enemy_collision: flag_field(&lines, 5, "enemy collision enabled")?,
        bullets_amount: count_field(&lines, 6, "bullet capacity")?,
        bullets_cooldown: count_field(&lines, 7, "bullet cooldown ticks")?,
        debug: flag_field(&lines, 8, "debug flag")?,
    })
}

fn field<'a>(lines: &[&'a str], index: usize, name: &str) -> Result<&'a str> {
    match lines.get(index).map(|line| line.trim()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => bail!("line {} ({}) is missing", index + 1, name),
    }
}

fn int_field(lines: &[&str], index: usize, name: &str) -> Result<i32> {
    let value = field(lines, index, name)?;
    value
        .parse()
        .with_context(|| format!("line {} ({}): `{}` is not an integer", index + 1, name, value))
}

fn count_field(lines: &[&str], index: usize, name: &str) -> Result<u32> {
    let value = field(lines, index, name)?;
    value.parse().with_context(|| {
        format!("line {} ({}): `{}` is not a non-negative integer", index + 1, name, value)
    })
}

fn flag_field(lines: &[&str], index: usize, name: &str) -> Result<bool> {
    match field(lines, index, name)? {
        "0" => Ok(false),
        "1" => Ok(true),
        other => bail!("line {} ({}): expected 0 or 1, got `{}`", index + 1, name, other),
    }
}
