use ratatui::style::Color;

/// Terminal colour set for the reader.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub anchor: Color,
    pub dimmed: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::slate()
    }
}

impl Theme {
    /// Near-black slate with a red pivot letter
    pub fn slate() -> Self {
        Self {
            background: Color::Rgb(2, 6, 23),   // #020617
            surface: Color::Rgb(15, 23, 42),    // #0F172A
            text: Color::Rgb(203, 213, 225),    // #CBD5E1
            anchor: Color::Rgb(239, 68, 68),    // #EF4444
            dimmed: Color::Rgb(100, 116, 139),  // #64748B
            border: Color::Rgb(30, 41, 59),     // #1E293B
        }
    }

    pub fn current() -> Self {
        Self::slate()
    }
}

/// Convenience access to current theme colors
pub mod colors {
    use super::Theme;
    use ratatui::style::Color;

    pub fn background() -> Color {
        Theme::current().background
    }
    pub fn surface() -> Color {
        Theme::current().surface
    }
    pub fn text() -> Color {
        Theme::current().text
    }
    pub fn anchor() -> Color {
        Theme::current().anchor
    }
    pub fn dimmed() -> Color {
        Theme::current().dimmed
    }
    pub fn border() -> Color {
        Theme::current().border
    }
}
