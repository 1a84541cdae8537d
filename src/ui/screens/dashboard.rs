use crate::logic::FieldSummary;
use crate::models::{AdvisoryMessage, Language, SensorField, Severity};
use crate::ui::components::{
    air_quality_gauge, humidity_gauge, moisture_gauge, temperature_gauge, NavBar,
};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Sparkline, Widget, Wrap},
};

pub struct DashboardScreen<'a> {
    pub summary: &'a FieldSummary,
    pub advisory: Option<&'a AdvisoryMessage>,
    pub language: Language,
    pub status_message: Option<&'a str>,
    pub motor_configured: bool,
    pub busy: bool,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        summary: &'a FieldSummary,
        advisory: Option<&'a AdvisoryMessage>,
        language: Language,
    ) -> Self {
        Self {
            summary,
            advisory,
            language,
            status_message: None,
            motor_configured: true,
            busy: false,
        }
    }

    pub fn motor_configured(mut self, configured: bool) -> Self {
        self.motor_configured = configured;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Gauges row
                Constraint::Length(6), // Weather and field status
                Constraint::Min(8),    // Trends and advisory
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_gauges(chunks[1], buf);
        self.render_field_status(chunks[2], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[3]);

        self.render_trends(middle[0], buf);
        self.render_advisory(middle[1], buf);

        self.render_status_message(chunks[4], buf);

        NavBar::new(&[
            ("1-5", "Tabs"),
            ("l", "Language"),
            ("r", "Refresh"),
            ("m", "Motor"),
            ("p", "Speak"),
            ("q", "Quit"),
        ])
        .render(chunks[5], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Smart Farming Dashboard", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let last_updated = self
            .summary
            .last_updated
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let info = Line::from(vec![
            Span::styled(format!("Last updated: {}", last_updated), Theme::dim()),
            Span::styled("  Language: ", Theme::dim()),
            Span::styled(self.language.as_str(), Theme::highlight()),
        ]);
        Paragraph::new(info).block(block).render(area, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let snapshot = self.summary.snapshot.as_ref();

        moisture_gauge("Soil Moisture", snapshot.map(|s| s.soil_moisture_percent()))
            .render(gauge_chunks[0], buf);
        air_quality_gauge("Air Quality", snapshot.map(|s| s.air_quality_ppm()))
            .render(gauge_chunks[1], buf);
        temperature_gauge("Temperature", snapshot.map(|s| s.temperature_c()))
            .render(gauge_chunks[2], buf);
        humidity_gauge("Humidity", snapshot.map(|s| s.humidity_percent()))
            .render(gauge_chunks[3], buf);
    }

    fn render_field_status(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Field Status", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();

        match self.summary.weather.as_ref() {
            Some(weather) => {
                let mut spans = vec![Span::styled(weather.headline(), Theme::normal())];
                if !weather.city.is_empty() {
                    spans.push(Span::styled(format!(" - {}", weather.city), Theme::dim()));
                }
                lines.push(Line::from(spans));
            }
            None => lines.push(Line::from(Span::styled(
                "Weather unavailable",
                Theme::dim(),
            ))),
        }

        if let Some(status) = self.summary.irrigation_status() {
            lines.push(Line::from(Span::styled(
                status.message(),
                Style::default().fg(status.color()),
            )));
        }
        if let Some(status) = self.summary.air_quality_status() {
            lines.push(Line::from(Span::styled(
                status.message(),
                Style::default().fg(status.color()),
            )));
        }

        let motor = match self.summary.motor {
            Some(state) => {
                let style = if state.is_on() {
                    Theme::success()
                } else {
                    Theme::normal()
                };
                Span::styled(state.as_str(), style)
            }
            None if self.motor_configured => Span::styled("unknown", Theme::dim()),
            None => Span::styled("not configured", Theme::dim()),
        };
        lines.push(Line::from(vec![
            Span::styled("Motor: ", Theme::dim()),
            motor,
        ]));

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_trends(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!("Trends (last {} readings)", self.summary.feed.entries.len()),
                Theme::header(),
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.summary.feed.is_empty() {
            Paragraph::new(Span::styled("No readings yet", Theme::dim())).render(inner, buf);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(inner);

        for (field, row) in SensorField::ALL.iter().zip(rows.iter()) {
            let series = self.summary.feed.series(*field);
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(22), Constraint::Min(5)])
                .split(*row);

            let latest = series
                .last()
                .map(|v| format!("{:.1}{}", v, field.unit()))
                .unwrap_or_else(|| "-".to_string());
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", field.as_str()), Theme::dim()),
                Span::styled(latest, Theme::normal()),
            ]))
            .render(cols[0], buf);

            Sparkline::default()
                .data(sparkline_points(&series))
                .style(Style::default().fg(Theme::HIGHLIGHT))
                .render(cols[1], buf);
        }
    }

    fn render_advisory(&self, area: Rect, buf: &mut Buffer) {
        // Border takes the color of the most urgent warning
        let border = match self.advisory.and_then(|a| a.highest_severity()) {
            Some(severity) if severity >= Severity::Warning => {
                Style::default().fg(severity.color())
            }
            _ => Theme::border(),
        };
        let block = Block::default()
            .title(Span::styled(
                format!("Farmer Advice ({})", self.language.as_str()),
                Theme::header(),
            ))
            .borders(Borders::ALL)
            .border_style(border);

        let inner = block.inner(area);
        block.render(area, buf);

        let advisory = match self.advisory {
            Some(a) => a,
            None => {
                let message = self
                    .summary
                    .sensor_error
                    .as_deref()
                    .unwrap_or("No sensor data yet");
                Paragraph::new(Span::styled(message, Theme::warning()))
                    .wrap(Wrap { trim: true })
                    .render(inner, buf);
                return;
            }
        };

        let items: Vec<ListItem> = advisory
            .advice
            .iter()
            .map(|advice| {
                let severity = advice.severity();
                let dimension = advice.dimension();
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", severity.symbol()),
                        Style::default().fg(severity.color()),
                    ),
                    Span::styled(
                        format!("{}: ", dimension),
                        Style::default().fg(dimension.color()),
                    ),
                    Span::styled(advice.text, Theme::normal()),
                ]))
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        let text = if self.busy {
            Some("Working...")
        } else {
            self.status_message
        };
        if let Some(msg) = text {
            let style = if msg.contains("failed") || msg.contains("unavailable") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }
}

/// Sparklines take unsigned bars; keep one decimal of resolution.
fn sparkline_points(series: &[f64]) -> Vec<u64> {
    series
        .iter()
        .map(|v| (v.max(0.0) * 10.0).round() as u64)
        .collect()
}
