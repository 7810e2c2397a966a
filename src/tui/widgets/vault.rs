use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Credential;
use crate::tui::widgets::{format_tags_brackets, highlight_style};

pub fn render_credential_list(
    f: &mut Frame,
    area: Rect,
    credentials: &[Credential],
    total_count: usize,
    list_state: &mut ListState,
) {
    let max_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = credentials
        .iter()
        .map(|credential| {
            let mut text = format!("{}  {}", credential.title, credential.host);
            if text.chars().count() > max_width {
                text = text.chars().take(max_width.saturating_sub(3)).collect::<String>() + "...";
            }
            ListItem::new(Line::from(text))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Credentials ({}/{})", credentials.len(), total_count)),
        )
        .highlight_style(highlight_style());

    f.render_stateful_widget(list, area, list_state);
}

pub fn render_credential_view(f: &mut Frame, area: Rect, credential: Option<&Credential>) {
    let Some(credential) = credential else {
        let empty = Paragraph::new("Select a credential to view details")
            .block(Block::default().borders(Borders::ALL).title("Credential"))
            .style(Style::default().fg(Color::Gray));
        f.render_widget(empty, area);
        return;
    };

    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            credential.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Host", credential.host.clone()),
    ];
    if let Some(ref project) = credential.project {
        lines.push(field("Project", project.clone()));
    }
    if let Some(ref username) = credential.username {
        lines.push(field("Username", username.clone()));
    }
    lines.push(field("Password", credential.password.clone()));
    if credential.monthly_cost_usd > 0.0 || credential.monthly_cost_eur > 0.0 {
        lines.push(field(
            "Monthly cost",
            format!(
                "${:.2} / \u{20ac}{:.2}",
                credential.monthly_cost_usd, credential.monthly_cost_eur
            ),
        ));
    }
    if !credential.tags.is_empty() {
        lines.push(field("Tags", format_tags_brackets(&credential.tags)));
    }
    if let Some(ref notes) = credential.notes {
        lines.push(Line::from(""));
        for text_line in notes.lines() {
            lines.push(Line::from(text_line.to_string()));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Credential"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
