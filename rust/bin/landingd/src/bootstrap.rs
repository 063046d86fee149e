use crate::config::ServerConfig;

/// Verify the config is usable before the server starts serving.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.storage.data_dir.trim().is_empty() {
        anyhow::bail!("storage.data_dir must be set");
    }
    if config.security.api_key.trim().is_empty() {
        anyhow::bail!("security.api_key must be set");
    }
    if config.geocode.endpoint.trim().is_empty() {
        anyhow::bail!("geocode.endpoint must not be empty");
    }
    // geocode.api_key may be empty: geocoding is then disabled and
    // locations are stored without a resolved city.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.storage.data_dir = "/var/lib/landingd".to_string();
        config.security.api_key = "secret".to_string();
        config
    }

    #[test]
    fn accepts_valid_config() {
        assert!(verify_config(&valid_config()).is_ok());
    }

    #[test]
    fn accepts_empty_geocode_key() {
        let config = valid_config();
        assert!(config.geocode.api_key.is_empty());
        assert!(verify_config(&config).is_ok());
    }

    #[test]
    fn rejects_missing_data_dir() {
        let mut config = valid_config();
        config.storage.data_dir = "  ".to_string();
        assert!(verify_config(&config).is_err());
    }

    #[test]
    fn rejects_missing_api_key() {
        let mut config = valid_config();
        config.security.api_key = String::new();
        assert!(verify_config(&config).is_err());
    }
}
