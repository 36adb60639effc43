use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use medborg::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();

    [exe_dir, cur_dir, dirs::config_dir()]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Err(anyhow!("Could not find {} in the executable dir, current dir or user config dir", CFG_FILE_NAME)),
    };

    eprintln!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)
        .with_context(|| format!("Could not load {}", config_path.display()))?;

    if let Some(mut log) = config.log.take() {
        if log.location.is_none() {
            log.location = dirs::cache_dir().map(|dir| dir.join("Medborg").join("log").join("medborg.log"));
        }
        match log.location {
            Some(ref location) => eprintln!("Log enabled. Files will be written in {}", location.display()),
            None => eprintln!("Log enabled. No cache dir found, using the console"),
        }
        config.log = Some(log);
    }

    Ok(config)
}
