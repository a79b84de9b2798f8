use crate::utils::error::{DashError, Result};
use crate::utils::validation::{
    validate_ordered, validate_path, validate_positive_number, validate_range, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_PATH: &str = "data/gdp_data.csv";
pub const DEFAULT_MIN_YEAR: i32 = 1960;
pub const DEFAULT_MAX_YEAR: i32 = 2022;
pub const DEFAULT_NICKNAME_COUNT: usize = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub gdp: GdpSettings,
    pub nickname: NicknameSettings,
}

/// Title and icon of a page. Applied once when the page header is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub title: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GdpSettings {
    pub page: PageConfig,
    pub data_path: String,
    /// Takes precedence over `data_path` when set.
    pub data_url: Option<String>,
    pub timeout_seconds: u64,
    /// Year columns are named `<prefix><yyyy>`.
    pub year_column_prefix: String,
    pub min_year: i32,
    pub max_year: i32,
    pub default_countries: Vec<String>,
}

impl Default for GdpSettings {
    fn default() -> Self {
        Self {
            page: PageConfig {
                title: "GDP dashboard".to_string(),
                icon: "🌎".to_string(),
            },
            data_path: DEFAULT_DATA_PATH.to_string(),
            data_url: None,
            timeout_seconds: 30,
            year_column_prefix: String::new(),
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            default_countries: ["DEU", "FRA", "GBR", "BRA", "MEX", "JPN"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NicknameSettings {
    pub page: PageConfig,
    pub count: usize,
}

impl Default for NicknameSettings {
    fn default() -> Self {
        Self {
            page: PageConfig {
                title: "제목학원 - 브랜딩 도우미".to_string(),
                icon: "✨".to_string(),
            },
            count: DEFAULT_NICKNAME_COUNT,
        }
    }
}

impl DashConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Defaults when no file is given.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value, leaving unknown variables as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for GdpSettings {
    fn validate(&self) -> Result<()> {
        match &self.data_url {
            Some(url) => validate_url("gdp.data_url", url)?,
            None => validate_path("gdp.data_path", &self.data_path)?,
        }
        validate_positive_number("gdp.timeout_seconds", self.timeout_seconds as usize, 1)?;
        validate_range("gdp.min_year", self.min_year, 1000, 9999)?;
        validate_range("gdp.max_year", self.max_year, 1000, 9999)?;
        validate_ordered("gdp.min_year..gdp.max_year", self.min_year, self.max_year)?;
        if self.year_column_prefix.chars().any(|c| c.is_ascii_digit()) {
            return Err(DashError::InvalidConfigValueError {
                field: "gdp.year_column_prefix".to_string(),
                value: self.year_column_prefix.clone(),
                reason: "Prefix must not contain digits".to_string(),
            });
        }
        Ok(())
    }
}

impl Validate for NicknameSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_number("nickname.count", self.count, 1)
    }
}

impl Validate for DashConfig {
    fn validate(&self) -> Result<()> {
        self.gdp.validate()?;
        self.nickname.validate()
    }
}
