use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How long a restored card keeps its highlight.
pub const DEFAULT_HIGHLIGHT_DURATION_MS: u64 = 700;

/// Rows left between the header and a restored card's top edge.
pub const DEFAULT_SCROLL_MARGIN: u16 = 1;

/// Duration of the smooth scroll toward a restored card.
pub const DEFAULT_SCROLL_ANIMATION_MS: u64 = 250;

/// Suggested file name for the downloaded resume.
pub const DEFAULT_RESUME_FILE_NAME: &str = "Nisanth_Nimashakavi_Resume.pdf";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_theme_name")]
    pub theme: String,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub resume: ResumeConfig,

    /// Optional JSON file replacing the built-in portfolio content
    #[serde(default)]
    pub content: Option<PathBuf>,

    /// Keybinding overrides, checked before the built-in bindings
    #[serde(default)]
    pub keybindings: Vec<Keybinding>,
}

fn default_theme_name() -> String {
    "terminal".to_string()
}

/// Scrolling, highlight and pointer behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NavigationConfig {
    /// How long a restored card stays highlighted, in milliseconds
    #[serde(default = "default_highlight_duration")]
    pub highlight_duration_ms: u64,

    /// Rows between the header and a restored card after scrolling to it
    #[serde(default = "default_scroll_margin")]
    pub scroll_margin: u16,

    /// Duration of the smooth scroll animation, in milliseconds (0 jumps)
    #[serde(default = "default_scroll_animation")]
    pub scroll_animation_ms: u64,

    /// Whether to capture the mouse for clicks and wheel scrolling
    #[serde(default = "default_true")]
    pub mouse: bool,
}

fn default_highlight_duration() -> u64 {
    DEFAULT_HIGHLIGHT_DURATION_MS
}

fn default_scroll_margin() -> u16 {
    DEFAULT_SCROLL_MARGIN
}

fn default_scroll_animation() -> u64 {
    DEFAULT_SCROLL_ANIMATION_MS
}

fn default_true() -> bool {
    true
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            highlight_duration_ms: default_highlight_duration(),
            scroll_margin: default_scroll_margin(),
            scroll_animation_ms: default_scroll_animation(),
            mouse: true,
        }
    }
}

/// Resume download settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResumeConfig {
    /// Path of the resume asset. Defaults to `<data dir>/termfolio/resume.pdf`.
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// File name the resume is saved under in the downloads directory
    #[serde(default = "default_resume_file_name")]
    pub file_name: String,
}

fn default_resume_file_name() -> String {
    DEFAULT_RESUME_FILE_NAME.to_string()
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            source: None,
            file_name: default_resume_file_name(),
        }
    }
}

/// Keybinding definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Keybinding {
    /// Key name (e.g., "p", "Enter", "F1", "Esc")
    pub key: String,

    /// Modifiers (e.g., ["ctrl"], ["ctrl", "shift"])
    #[serde(default)]
    pub modifiers: Vec<String>,

    /// Action to perform (e.g., "toggle_pin", "scroll_down")
    pub action: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            navigation: NavigationConfig::default(),
            resume: ResumeConfig::default(),
            content: None,
            keybindings: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Highlight must stay transient
        if self.navigation.highlight_duration_ms == 0 || self.navigation.highlight_duration_ms > 5_000
        {
            return Err(ConfigError::ValidationError(
                "highlight_duration_ms must be between 1 and 5000".to_string(),
            ));
        }

        if self.navigation.scroll_animation_ms > 2_000 {
            return Err(ConfigError::ValidationError(
                "scroll_animation_ms must be <= 2000".to_string(),
            ));
        }

        if self.navigation.scroll_margin > 20 {
            return Err(ConfigError::ValidationError(
                "scroll_margin must be <= 20".to_string(),
            ));
        }

        let file_name = self.resume.file_name.trim();
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(ConfigError::ValidationError(
                "resume.file_name must be a plain, non-empty file name".to_string(),
            ));
        }

        for binding in &self.keybindings {
            if binding.key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding key cannot be empty".to_string(),
                ));
            }
            if binding.action.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding action cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
