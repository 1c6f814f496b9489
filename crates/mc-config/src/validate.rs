use crate::mockcond::MockCondConfig;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Called from `MockCondConfig::from_str` / `load`.
pub(crate) fn validate(config: &MockCondConfig) -> anyhow::Result<()> {
    let logging = &config.logging;

    if !LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
        anyhow::bail!(
            "logging.level must be one of {LEVELS:?}, got {:?}",
            logging.level,
        );
    }

    for (module, level) in &logging.modules {
        if module.trim().is_empty() {
            anyhow::bail!("logging.modules: module name must not be empty");
        }
        if !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            anyhow::bail!(
                "logging.modules.{module}: level must be one of {LEVELS:?}, got {level:?}"
            );
        }
    }

    if let Some(ref file) = logging.file
        && file.as_os_str().is_empty()
    {
        anyhow::bail!("logging.file must not be empty when set");
    }

    Ok(())
}
