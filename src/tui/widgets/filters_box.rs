use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_filters_box(f: &mut Frame, area: Rect, summary: &str) {
    let paragraph = Paragraph::new(summary)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("f: Filters")
                .style(Style::default().fg(Color::Gray)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
