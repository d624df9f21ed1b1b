use anyhow::{Context, Result};
use steer_core::config::SteerConfig;
use steer_infrastructure::ConfigService;

pub fn show(config: &SteerConfig) -> Result<()> {
    let rendered = toml_string(config)?;
    print!("{rendered}");
    Ok(())
}

pub fn path(service: &ConfigService) {
    println!("{}", service.path().display());
}

pub fn init(service: &ConfigService) -> Result<()> {
    let created = service
        .init_default()
        .with_context(|| format!("Failed to write {}", service.path().display()))?;
    if created {
        println!("Created {}", service.path().display());
    } else {
        println!("{} already exists", service.path().display());
    }
    Ok(())
}

fn toml_string(config: &SteerConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rendered_defaults_parse_back() {
        let rendered = toml_string(&SteerConfig::default()).unwrap();
        assert!(rendered.contains("log_level = \"info\""));
        assert_eq!(
            toml::from_str::<SteerConfig>(&rendered).unwrap(),
            SteerConfig::default()
        );
    }

    #[test]
    fn test_init_writes_once() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));

        init(&service).unwrap();
        init(&service).unwrap();

        assert!(service.path().exists());
    }
}
