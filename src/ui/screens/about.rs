use crate::ui::components::NavBar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct AboutScreen;

impl Widget for AboutScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(1)])
            .split(area);

        let block = Block::default()
            .title(Span::styled("About", Theme::title()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines = vec![
            Line::from(Span::styled(
                format!("Smart Farming Assistant v{}", env!("CARGO_PKG_VERSION")),
                Theme::header(),
            )),
            Line::from(""),
            Line::from(
                "Live soil moisture, air quality, temperature and humidity from a field \
                 sensor station, combined with local weather.",
            ),
            Line::from(
                "Plain-language farming advice in English, Hindi and Marathi, with \
                 optional spoken playback.",
            ),
            Line::from("Remote control of the irrigation motor."),
            Line::from("Crop disease detection from a photo of the plant."),
            Line::from("A local assistant and a cloud crop advisory for detailed questions."),
            Line::from(""),
            Line::from(Span::styled(
                "Data: ThingSpeak, OpenWeatherMap, Plant.id, Blynk, Ollama, OpenAI",
                Theme::dim(),
            )),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        NavBar::new(&[("1-5", "Tabs"), ("Esc", "Dashboard"), ("q", "Quit")])
            .render(chunks[1], buf);
    }
}
