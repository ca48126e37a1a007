use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Colors every screen draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub government: Color,
    pub volunteer: Color,
    pub success: Color,
    pub danger: Color,
}

const DARK: Palette = Palette {
    background: Color::Reset,
    text: Color::White,
    muted: Color::Gray,
    accent: Color::Yellow,
    border: Color::Yellow,
    highlight_bg: Color::Rgb(0, 0, 238),
    highlight_fg: Color::White,
    government: Color::Cyan,
    volunteer: Color::Green,
    success: Color::Green,
    danger: Color::Red,
};

const LIGHT: Palette = Palette {
    background: Color::Rgb(248, 250, 252),
    text: Color::Black,
    muted: Color::DarkGray,
    accent: Color::Blue,
    border: Color::Rgb(100, 116, 139),
    highlight_bg: Color::Rgb(191, 219, 254),
    highlight_fg: Color::Black,
    government: Color::Blue,
    volunteer: Color::Rgb(22, 163, 74),
    success: Color::Rgb(22, 163, 74),
    danger: Color::Rgb(220, 38, 38),
};

/// Owned by the app; screens read the palette through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeProvider {
    mode: ThemeMode,
}

impl ThemeProvider {
    pub const fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub const fn palette(&self) -> Palette {
        match self.mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }

    /// Red for severe issues, yellow for moderate, green otherwise.
    pub const fn severity_color(&self, severity: u8) -> Color {
        let palette = self.palette();
        match severity {
            8..=u8::MAX => palette.danger,
            5..=7 => palette.accent,
            _ => palette.success,
        }
    }
}
