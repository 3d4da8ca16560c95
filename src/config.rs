use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub options: OptionsConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Field-id -> human-readable label table used when reporting missing
    /// fields. Operator language is data, not logic.
    #[serde(default = "default_labels")]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where the event store lives
    pub data: String,
    /// Where generated reports are written
    pub exports: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file (false = stderr)
    #[serde(default)]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: false,
        }
    }
}

/// Option vocabularies consumed by the validator and step renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    #[serde(default = "default_contract_types")]
    pub contract_types: Vec<String>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Per-category subcategory lists shown on the components step
    #[serde(default = "default_subcategories")]
    pub subcategories: HashMap<String, Vec<String>>,
}

fn default_contract_types() -> Vec<String> {
    ["prime", "subcontract", "in_house"]
        .map(String::from)
        .to_vec()
}

fn default_categories() -> Vec<String> {
    ["stage", "sound", "lighting", "video", "decoration", "catering"]
        .map(String::from)
        .to_vec()
}

fn default_subcategories() -> HashMap<String, Vec<String>> {
    let mut map = HashMap::new();
    map.insert(
        "stage".to_string(),
        ["truss", "riser", "backdrop"].map(String::from).to_vec(),
    );
    map.insert(
        "sound".to_string(),
        ["pa", "monitor", "wireless"].map(String::from).to_vec(),
    );
    map.insert(
        "lighting".to_string(),
        ["moving_head", "wash", "spot"].map(String::from).to_vec(),
    );
    map.insert(
        "video".to_string(),
        ["led_wall", "projector", "camera"].map(String::from).to_vec(),
    );
    map
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            contract_types: default_contract_types(),
            categories: default_categories(),
            subcategories: default_subcategories(),
        }
    }
}

/// Table-driven required fields per wizard step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Step key -> required field names. Conditional rules (venue branches,
    /// per-category component checks) live in the validator itself.
    #[serde(default = "default_required_fields")]
    pub required_fields: HashMap<String, Vec<String>>,
}

fn default_required_fields() -> HashMap<String, Vec<String>> {
    let mut map = HashMap::new();
    map.insert(
        "basic_info".to_string(),
        [
            "event_name",
            "organizer",
            "event_type",
            "contract_type",
            "start_date",
            "end_date",
        ]
        .map(String::from)
        .to_vec(),
    );
    // Venue step requirements branch on event type; only the branch roots
    // are table-driven.
    map.insert("venue_info".to_string(), Vec::new());
    map.insert(
        "components".to_string(),
        ["selected_categories"].map(String::from).to_vec(),
    );
    map.insert(
        "finalize".to_string(),
        ["contract_amount"].map(String::from).to_vec(),
    );
    map
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            required_fields: default_required_fields(),
        }
    }
}

fn default_labels() -> HashMap<String, String> {
    [
        ("event_name", "Event name"),
        ("organizer", "Organizer"),
        ("event_type", "Event type"),
        ("contract_type", "Contract type"),
        ("start_date", "Start date"),
        ("end_date", "End date"),
        ("setup_date", "Setup date"),
        ("teardown_date", "Teardown date"),
        ("location_needed", "Location needed"),
        ("location_type", "Location sourcing"),
        ("location_preference", "Indoor/outdoor preference"),
        ("indoor_location_description", "Indoor location description"),
        ("outdoor_location_description", "Outdoor location description"),
        ("venue_status", "Venue status"),
        ("desired_region", "Desired region"),
        ("venues", "Venue candidates"),
        ("venues.name", "Venue name"),
        ("venues.address", "Venue address"),
        ("selected_categories", "Selected categories"),
        ("components.status", "Component status"),
        ("components.items", "Component line items"),
        ("contract_amount", "Contract amount"),
    ]
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .into()
}

impl Config {
    /// Path to the project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from("eventplan.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the tool works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // Project-local config (primary config location)
        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/eventplan/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("eventplan").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with EVENTPLAN_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("EVENTPLAN")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to eventplan.toml
    pub fn save(&self) -> Result<()> {
        let config_path = Self::local_config_path();

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        std::fs::write(&config_path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    /// Get absolute path to the data directory
    pub fn data_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.data);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to the exports directory
    pub fn exports_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.exports);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to the logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.data_path().join("logs")
    }

    /// Required fields for a step key, empty when the table has no entry
    pub fn required_fields(&self, step_key: &str) -> &[String] {
        self.validation
            .required_fields
            .get(step_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve a raw field id to a human-readable label.
    ///
    /// Supports the two addressing schemes the validator emits: dotted
    /// component paths (`components.stage.status`) and bracket-indexed list
    /// entries (`venues[2].name`). Unknown ids fall back to the raw id.
    pub fn label_for(&self, field_id: &str) -> String {
        if let Some(label) = self.labels.get(field_id) {
            return label.clone();
        }

        // venues[2].name -> "venues.name" + 0-based index
        if let Some((list_part, sub)) = field_id.split_once("].") {
            if let Some((list_name, idx)) = list_part.split_once('[') {
                let base = format!("{list_name}.{sub}");
                if let Some(label) = self.labels.get(&base) {
                    let ordinal = idx.parse::<usize>().map(|i| i + 1).unwrap_or(0);
                    return format!("{label} (entry {ordinal})");
                }
            }
        }

        // components.stage.status -> "components.status", category prefixed
        let parts: Vec<&str> = field_id.split('.').collect();
        if parts.len() == 3 && parts[0] == "components" {
            let base = format!("components.{}", parts[2]);
            if let Some(label) = self.labels.get(&base) {
                return format!("{}: {}", parts[1], label);
            }
        }

        field_id.to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                data: ".eventplan".to_string(), // Relative to cwd
                exports: "exports".to_string(),
            },
            logging: LoggingConfig::default(),
            options: OptionsConfig::default(),
            validation: ValidationConfig::default(),
            labels: default_labels(),
        }
    }
}
