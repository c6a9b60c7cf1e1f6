use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Default tgops data directory: ~/.tgops
pub fn get_tgops_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".tgops"))
}

/// Load the app config: ~/.tgops/config.toml first, ./tgops.toml second,
/// built-in defaults last. `TGOPS_TERRAGRUNT_BIN` overrides the runner
/// binary regardless of file contents.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let user_config = get_tgops_data_dir()?.join("config.toml");
    let local_config = Path::new("tgops.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    if let Ok(v) = std::env::var("TGOPS_TERRAGRUNT_BIN") {
        if !v.trim().is_empty() {
            cfg.runner.terragrunt_bin = v;
        }
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [runner]
            terragrunt_bin = "tg-wrapper"
            stack_root = "/srv/stacks/prod"
            non_interactive = true

            [logging]
            level = "debug"
            file = true
            directory = "/tmp/tgops-logs"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.runner.terragrunt_bin, "tg-wrapper");
        assert_eq!(cfg.runner.stack_root.as_deref(), Some("/srv/stacks/prod"));
        assert!(cfg.runner.non_interactive);
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.file);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.runner.terragrunt_bin, "terragrunt");
        assert!(cfg.runner.stack_root.is_none());
        assert!(!cfg.runner.non_interactive);
        assert!(cfg.logging.enabled);
        assert!(cfg.logging.console);
    }
}
