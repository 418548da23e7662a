use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable color representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorDef {
    /// RGB color as [r, g, b]
    Rgb(u8, u8, u8),
    /// Named color
    Named(String),
}

impl From<ColorDef> for Color {
    fn from(def: ColorDef) -> Self {
        match def {
            ColorDef::Rgb(r, g, b) => Color::Rgb(r, g, b),
            ColorDef::Named(name) => match name.as_str() {
                "Black" => Color::Black,
                "Red" => Color::Red,
                "Green" => Color::Green,
                "Yellow" => Color::Yellow,
                "Blue" => Color::Blue,
                "Magenta" => Color::Magenta,
                "Cyan" => Color::Cyan,
                "Gray" => Color::Gray,
                "DarkGray" => Color::DarkGray,
                "LightRed" => Color::LightRed,
                "LightGreen" => Color::LightGreen,
                "LightYellow" => Color::LightYellow,
                "LightBlue" => Color::LightBlue,
                "LightMagenta" => Color::LightMagenta,
                "LightCyan" => Color::LightCyan,
                "White" => Color::White,
                // Default/Reset uses the terminal's default color (preserves transparency)
                "Default" | "Reset" => Color::Reset,
                _ => Color::White, // Default fallback
            },
        }
    }
}

/// Serializable theme definition (matches JSON structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeFile {
    name: String,
    page: PageColors,
    card: CardColors,
    chrome: ChromeColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PageColors {
    bg: ColorDef,
    fg: ColorDef,
    muted_fg: ColorDef,
    dim_fg: ColorDef,
    prompt_fg: ColorDef,
    heading_fg: ColorDef,
    link_fg: ColorDef,
    #[serde(default = "default_link_selected_bg")]
    link_selected_bg: ColorDef,
    badge_fg: ColorDef,
    badge_bg: ColorDef,
}

fn default_link_selected_bg() -> ColorDef {
    ColorDef::Rgb(6, 78, 59)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CardColors {
    bg: ColorDef,
    border_fg: ColorDef,
    focus_border_fg: ColorDef,
    highlight_border_fg: ColorDef,
    #[serde(default = "default_highlight_bg")]
    highlight_bg: ColorDef,
    title_fg: ColorDef,
    pin_dot_fg: ColorDef,
    minimize_dot_fg: ColorDef,
    expand_dot_fg: ColorDef,
    disabled_dot_fg: ColorDef,
}

fn default_highlight_bg() -> ColorDef {
    ColorDef::Rgb(10, 40, 32)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChromeColors {
    header_bg: ColorDef,
    header_fg: ColorDef,
    header_rule_fg: ColorDef,
    button_fg: ColorDef,
    button_bg: ColorDef,
    status_bar_fg: ColorDef,
    status_bar_bg: ColorDef,
    status_error_fg: ColorDef,
}

/// Comprehensive theme structure with all UI colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,

    pub page_bg: Color,
    pub page_fg: Color,
    pub muted_fg: Color,
    pub dim_fg: Color,
    pub prompt_fg: Color,
    pub heading_fg: Color,
    pub link_fg: Color,
    pub link_selected_bg: Color,
    pub badge_fg: Color,
    pub badge_bg: Color,

    pub card_bg: Color,
    pub border_fg: Color,
    pub focus_border_fg: Color,
    pub highlight_border_fg: Color,
    pub highlight_bg: Color,
    pub title_fg: Color,
    pub pin_dot_fg: Color,
    pub minimize_dot_fg: Color,
    pub expand_dot_fg: Color,
    pub disabled_dot_fg: Color,

    pub header_bg: Color,
    pub header_fg: Color,
    pub header_rule_fg: Color,
    pub button_fg: Color,
    pub button_bg: Color,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub status_error_fg: Color,
}

impl From<ThemeFile> for Theme {
    fn from(file: ThemeFile) -> Self {
        Self {
            name: file.name,
            page_bg: file.page.bg.into(),
            page_fg: file.page.fg.into(),
            muted_fg: file.page.muted_fg.into(),
            dim_fg: file.page.dim_fg.into(),
            prompt_fg: file.page.prompt_fg.into(),
            heading_fg: file.page.heading_fg.into(),
            link_fg: file.page.link_fg.into(),
            link_selected_bg: file.page.link_selected_bg.into(),
            badge_fg: file.page.badge_fg.into(),
            badge_bg: file.page.badge_bg.into(),
            card_bg: file.card.bg.into(),
            border_fg: file.card.border_fg.into(),
            focus_border_fg: file.card.focus_border_fg.into(),
            highlight_border_fg: file.card.highlight_border_fg.into(),
            highlight_bg: file.card.highlight_bg.into(),
            title_fg: file.card.title_fg.into(),
            pin_dot_fg: file.card.pin_dot_fg.into(),
            minimize_dot_fg: file.card.minimize_dot_fg.into(),
            expand_dot_fg: file.card.expand_dot_fg.into(),
            disabled_dot_fg: file.card.disabled_dot_fg.into(),
            header_bg: file.chrome.header_bg.into(),
            header_fg: file.chrome.header_fg.into(),
            header_rule_fg: file.chrome.header_rule_fg.into(),
            button_fg: file.chrome.button_fg.into(),
            button_bg: file.chrome.button_bg.into(),
            status_bar_fg: file.chrome.status_bar_fg.into(),
            status_bar_bg: file.chrome.status_bar_bg.into(),
            status_error_fg: file.chrome.status_error_fg.into(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::terminal()
    }
}

impl Theme {
    /// Load theme from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file: {}", e))?;
        let theme_file: ThemeFile = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse theme file: {}", e))?;
        Ok(theme_file.into())
    }

    /// Load a user theme from `~/.config/termfolio/themes/<name>.json`
    fn load_user_theme(name: &str) -> Option<Self> {
        let path = dirs::config_dir()?
            .join("termfolio")
            .join("themes")
            .join(format!("{}.json", name));
        if !path.exists() {
            return None;
        }
        match Self::from_file(&path) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!("Ignoring theme {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Resolve a theme by name: a path to a JSON file, a user theme, or a
    /// built-in theme. Unknown names fall back to the default theme.
    pub fn from_name(name: &str) -> Self {
        if name.ends_with(".json") {
            match Self::from_file(name) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!("{}; using default theme", e),
            }
        }

        let normalized_name = name.to_lowercase().replace('_', "-");
        if let Some(theme) = Self::load_user_theme(&normalized_name) {
            return theme;
        }

        match normalized_name.as_str() {
            "mono" => Self::mono(),
            "terminal" => Self::terminal(),
            other => {
                tracing::warn!("Unknown theme {:?}; using default theme", other);
                Self::terminal()
            }
        }
    }

    /// Emerald on near-black, the default look
    pub fn terminal() -> Self {
        Self {
            name: "terminal".to_string(),
            page_bg: Color::Rgb(11, 15, 15),
            page_fg: Color::Rgb(241, 245, 249),
            muted_fg: Color::Rgb(203, 213, 225),
            dim_fg: Color::Rgb(148, 163, 184),
            prompt_fg: Color::Rgb(52, 211, 153),
            heading_fg: Color::Rgb(167, 243, 208),
            link_fg: Color::Rgb(110, 231, 183),
            link_selected_bg: Color::Rgb(6, 78, 59),
            badge_fg: Color::Rgb(167, 243, 208),
            badge_bg: Color::Rgb(6, 46, 36),
            card_bg: Color::Rgb(15, 20, 19),
            border_fg: Color::Rgb(6, 78, 59),
            focus_border_fg: Color::Rgb(16, 185, 129),
            highlight_border_fg: Color::Rgb(110, 231, 183),
            highlight_bg: Color::Rgb(10, 40, 32),
            title_fg: Color::Rgb(148, 163, 184),
            pin_dot_fg: Color::Rgb(239, 68, 68),
            minimize_dot_fg: Color::Rgb(234, 179, 8),
            expand_dot_fg: Color::Rgb(34, 197, 94),
            disabled_dot_fg: Color::Rgb(71, 85, 105),
            header_bg: Color::Rgb(8, 11, 11),
            header_fg: Color::Rgb(52, 211, 153),
            header_rule_fg: Color::Rgb(6, 78, 59),
            button_fg: Color::Rgb(209, 250, 229),
            button_bg: Color::Rgb(6, 78, 59),
            status_bar_fg: Color::Rgb(148, 163, 184),
            status_bar_bg: Color::Rgb(8, 11, 11),
            status_error_fg: Color::Rgb(248, 113, 113),
        }
    }

    /// Terminal default colors with the 16-color palette only
    pub fn mono() -> Self {
        Self {
            name: "mono".to_string(),
            page_bg: Color::Reset,
            page_fg: Color::Reset,
            muted_fg: Color::Gray,
            dim_fg: Color::DarkGray,
            prompt_fg: Color::Green,
            heading_fg: Color::White,
            link_fg: Color::Cyan,
            link_selected_bg: Color::DarkGray,
            badge_fg: Color::White,
            badge_bg: Color::Reset,
            card_bg: Color::Reset,
            border_fg: Color::DarkGray,
            focus_border_fg: Color::White,
            highlight_border_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            title_fg: Color::Gray,
            pin_dot_fg: Color::Red,
            minimize_dot_fg: Color::Yellow,
            expand_dot_fg: Color::Green,
            disabled_dot_fg: Color::DarkGray,
            header_bg: Color::Reset,
            header_fg: Color::Green,
            header_rule_fg: Color::DarkGray,
            button_fg: Color::Black,
            button_bg: Color::Green,
            status_bar_fg: Color::Gray,
            status_bar_bg: Color::Reset,
            status_error_fg: Color::Red,
        }
    }

    /// Names of the built-in themes
    pub fn builtin_names() -> &'static [&'static str] {
        &["terminal", "mono"]
    }

    pub fn prompt(&self) -> Style {
        Style::default().fg(self.prompt_fg)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.heading_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn body(&self) -> Style {
        Style::default().fg(self.muted_fg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.dim_fg)
    }

    pub fn badge(&self) -> Style {
        Style::default().fg(self.badge_fg).bg(self.badge_bg)
    }

    pub fn link(&self) -> Style {
        Style::default()
            .fg(self.link_fg)
            .add_modifier(Modifier::UNDERLINED)
    }
}
