use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // MongoDB connection string (MONGO_URI)
    pub mongo_uri: String,

    // Overrides the database named in the connection string
    #[serde(default)]
    pub mongo_database: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }
}

fn default_port() -> u16 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config: Config =
            envy::from_iter(vars(&[("MONGO_URI", "mongodb://localhost:27017/demo")])).unwrap();
        assert_eq!(config.mongo_uri, "mongodb://localhost:27017/demo");
        assert_eq!(config.mongo_database, None);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_port_override() {
        let config: Config = envy::from_iter(vars(&[
            ("MONGO_URI", "mongodb://localhost"),
            ("PORT", "8080"),
            ("MONGO_DATABASE", "ubicaciones"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.mongo_database.as_deref(), Some("ubicaciones"));
    }

    #[test]
    fn test_missing_mongo_uri_is_error() {
        let result: Result<Config, _> = envy::from_iter(vars(&[("PORT", "8080")]));
        assert!(result.is_err());
    }
}
