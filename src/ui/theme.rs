use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Green;
    pub const HIGHLIGHT: Color = Color::Cyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Field colors, matching the advisory bands
    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_OPTIMAL: Color = Color::Green;
    pub const TEMP_HOT: Color = Color::Red;
    pub const MOISTURE_DRY: Color = Color::Red;
    pub const MOISTURE_DRYING: Color = Color::Yellow;
    pub const MOISTURE_OK: Color = Color::Green;
    pub const AIR_GOOD: Color = Color::Green;
    pub const AIR_POOR: Color = Color::Yellow;
    pub const AIR_DANGEROUS: Color = Color::Red;

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    pub fn temp_color(temp_c: f64) -> Color {
        if temp_c < 15.0 {
            Self::TEMP_COLD
        } else if temp_c <= 35.0 {
            Self::TEMP_OPTIMAL
        } else {
            Self::TEMP_HOT
        }
    }

    pub fn moisture_color(moisture_percent: f64) -> Color {
        if moisture_percent < 30.0 {
            Self::MOISTURE_DRY
        } else if moisture_percent < 40.0 {
            Self::MOISTURE_DRYING
        } else {
            Self::MOISTURE_OK
        }
    }

    pub fn air_quality_color(ppm: f64) -> Color {
        if ppm > 2000.0 {
            Self::AIR_DANGEROUS
        } else if ppm > 1000.0 {
            Self::AIR_POOR
        } else {
            Self::AIR_GOOD
        }
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_follow_band_edges() {
        assert_eq!(Theme::temp_color(14.9), Theme::TEMP_COLD);
        assert_eq!(Theme::temp_color(35.0), Theme::TEMP_OPTIMAL);
        assert_eq!(Theme::temp_color(35.1), Theme::TEMP_HOT);
        assert_eq!(Theme::moisture_color(29.0), Theme::MOISTURE_DRY);
        assert_eq!(Theme::moisture_color(30.0), Theme::MOISTURE_DRYING);
        assert_eq!(Theme::moisture_color(40.0), Theme::MOISTURE_OK);
        assert_eq!(Theme::air_quality_color(1000.0), Theme::AIR_GOOD);
        assert_eq!(Theme::air_quality_color(2000.0), Theme::AIR_POOR);
        assert_eq!(Theme::air_quality_color(2000.5), Theme::AIR_DANGEROUS);
    }
}
