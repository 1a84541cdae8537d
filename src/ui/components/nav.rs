use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Bottom line of key hints, e.g. `[r]Refresh [q]Quit`.
pub struct NavBar<'a> {
    items: &'a [(&'a str, &'a str)],
}

impl<'a> NavBar<'a> {
    pub fn new(items: &'a [(&'a str, &'a str)]) -> Self {
        Self { items }
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let last = self.items.len().saturating_sub(1);
        let spans: Vec<Span> = self
            .items
            .iter()
            .enumerate()
            .flat_map(|(i, (key, label))| {
                let label = if i == last {
                    label.to_string()
                } else {
                    format!("{} ", label)
                };
                [
                    Span::styled(format!("[{}]", key), Theme::nav_key()),
                    Span::styled(label, Theme::nav_label()),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
