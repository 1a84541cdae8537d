use crate::app::DiseaseState;
use crate::ui::components::{InputWidget, NavBar};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct DiseaseScreen<'a> {
    pub state: &'a DiseaseState,
    pub busy: bool,
}

impl<'a> DiseaseScreen<'a> {
    pub fn new(state: &'a DiseaseState) -> Self {
        Self { state, busy: false }
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for DiseaseScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Image path
                Constraint::Min(6),    // Result
                Constraint::Length(1), // Nav
            ])
            .split(area);

        Paragraph::new(Line::from(vec![
            Span::styled("Crop Disease Detection", Theme::title()),
            Span::styled(" - jpg, jpeg or png", Theme::dim()),
        ]))
        .render(chunks[0], buf);

        InputWidget::new("Image path", &self.state.image_path)
            .placeholder("/path/to/leaf.jpg")
            .focused(!self.busy)
            .render(chunks[1], buf);

        let block = Block::default()
            .title(Span::styled("Diagnosis", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines = if self.busy {
            vec![Line::from(Span::styled("Analyzing image...", Theme::dim()))]
        } else if let Some(ref error) = self.state.error {
            vec![Line::from(Span::styled(error.as_str(), Theme::error()))]
        } else if let Some(ref diagnosis) = self.state.diagnosis {
            vec![
                Line::from(vec![
                    Span::styled("Disease: ", Theme::dim()),
                    Span::styled(diagnosis.name.as_str(), Theme::warning()),
                ]),
                Line::from(""),
                Line::from(Span::styled("Description", Theme::header())),
                Line::from(diagnosis.description.as_str()),
                Line::from(""),
                Line::from(Span::styled("Treatment", Theme::header())),
                Line::from(diagnosis.treatment.as_str()),
            ]
        } else {
            vec![Line::from(Span::styled(
                "Enter the path to a crop photo and press Enter",
                Theme::dim(),
            ))]
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        NavBar::new(&[("Enter", "Analyze"), ("Esc", "Dashboard"), ("Ctrl-C", "Quit")])
            .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiseaseDiagnosis;

    #[test]
    fn shows_diagnosis() {
        let mut state = DiseaseState::new();
        state.diagnosis = Some(DiseaseDiagnosis {
            name: "leaf rust".into(),
            description: "Orange pustules on leaves.".into(),
            treatment: "Remove infected leaves.".into(),
        });

        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        DiseaseScreen::new(&state).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("leaf rust"));
        assert!(text.contains("Remove infected leaves."));
    }
}
