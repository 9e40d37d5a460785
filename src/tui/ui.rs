use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, PathInputKind};
use crate::models::{CoverImage, Platform};
use crate::tracker::GenerationStatus;

pub fn draw(frame: &mut Frame, app: &App) {
    // Main horizontal split: 1/3 left, 2/3 right
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3), // Left pane: article batch
            Constraint::Ratio(2, 3), // Right pane: generation
        ])
        .split(frame.area());

    // Left pane: header + article list + key hints
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Article list
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[0]);

    // Right pane: article details + platform row + post + status
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Article details
            Constraint::Length(3), // Platform selector
            Constraint::Min(0),    // Generated post
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[1]);

    render_header(frame, app, left_chunks[0]);
    render_article_list(frame, app, left_chunks[1]);
    render_left_status(frame, left_chunks[2]);

    render_article_details(frame, app, right_chunks[0]);
    render_platform_row(frame, app, right_chunks[1]);
    render_post(frame, app, right_chunks[2]);
    render_right_status(frame, app, right_chunks[3]);

    if app.path_input_active() {
        render_path_input(frame, app);
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = " Social Post Automator ";
    let stats = format!(" {} Articles", app.articles.len());

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(stats).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn status_glyph(status: GenerationStatus) -> (&'static str, Color) {
    match status {
        GenerationStatus::Idle => ("  ", Color::DarkGray),
        GenerationStatus::InFlight => ("⏳ ", Color::Yellow),
        GenerationStatus::Succeeded => ("✓ ", Color::Green),
        GenerationStatus::Failed => ("✗ ", Color::Red),
    }
}

fn render_article_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .articles
        .iter()
        .map(|article| {
            let status = app
                .tracker
                .state(&article.url)
                .map(|s| s.status)
                .unwrap_or_default();
            let (glyph, color) = status_glyph(status);

            let line = Line::from(vec![
                Span::styled(glyph, Style::default().fg(color)),
                Span::styled(&article.title, Style::default().fg(Color::White)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_left_status(frame: &mut Frame, area: Rect) {
    let status = "j/k:nav  l:load json  d:remove  x:clear  ?:help  q:quit";
    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_article_details(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = match app.selected_article() {
        Some(article) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    article.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    article.url.clone(),
                    Style::default().fg(Color::Blue),
                )),
            ];
            if let Some(summary) = &article.summary {
                lines.push(Line::from(summary.clone()));
            }
            let image_note = match &article.image {
                Some(CoverImage::Remote(url)) => format!("Cover image: {url}"),
                Some(CoverImage::Embedded(_)) => "Cover image: attached".to_string(),
                None => "No cover image (i:attach)".to_string(),
            };
            lines.push(Line::from(Span::styled(
                image_note,
                Style::default().fg(Color::DarkGray),
            )));
            lines
        }
        None => vec![Line::from("No articles loaded. Press 'l' to load a JSON file.")],
    };

    let block = Block::default()
        .title(" Article ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_platform_row(frame: &mut Frame, app: &App, area: Rect) {
    let selected = app
        .selected_state()
        .map(|s| s.platform)
        .unwrap_or_default();

    let mut spans: Vec<Span> = Vec::new();
    for (i, platform) in Platform::ALL.into_iter().enumerate() {
        let style = if platform == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {}:{} ", i + 1, platform.label()), style));
        spans.push(Span::raw(" "));
    }

    let block = Block::default()
        .title(" Platform (Tab to cycle) ")
        .borders(Borders::ALL);

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_post(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_state() {
        None => "Load a batch to get started.".to_string(),
        Some(state) => match state.status {
            GenerationStatus::Idle => "Press Enter to generate a post...".to_string(),
            GenerationStatus::InFlight => "Generating post...".to_string(),
            GenerationStatus::Failed => state
                .error_message
                .clone()
                .unwrap_or_else(|| "Generation failed. Press Enter to retry.".to_string()),
            GenerationStatus::Succeeded => state
                .result_text
                .clone()
                .unwrap_or_else(|| "No post available".to_string()),
        },
    };

    let title = match app.selected_state().and_then(|s| s.generated_at) {
        Some(at) => format!(" Generated Post ({}) ", at.format("%H:%M UTC")),
        None => " Generated Post ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_right_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(error) = &app.inline_error {
        Span::styled(error.clone(), Style::default().fg(Color::Red))
    } else if app
        .selected_article()
        .is_some_and(|a| app.copied_active(&a.url))
    {
        Span::styled("✓ Copied!", Style::default().fg(Color::Green))
    } else {
        let hint = match app.selected_state().map(|s| s.status) {
            Some(GenerationStatus::Succeeded) => "c:copy  s:share  Enter:regenerate",
            _ => "Enter:generate  1-4:platform",
        };
        Span::styled(hint, Style::default().fg(Color::DarkGray))
    };

    let paragraph = Paragraph::new(Line::from(text));
    frame.render_widget(paragraph, area);
}

fn render_path_input(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 20, frame.area());

    let title = match app.path_input_kind {
        Some(PathInputKind::AttachImage) => " Attach cover image - enter file path ",
        _ => " Load articles - enter path to .json file ",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);

    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(block, area);

    let input_text = format!("> {}_", app.path_input);
    let paragraph = Paragraph::new(input_text).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        "",
        " Navigation:",
        "   j / ↓    Move down",
        "   k / ↑    Move up",
        "   Tab      Cycle platform",
        "   1-4      Select platform directly",
        "",
        " Actions:",
        "   l        Load article JSON file",
        "   i        Attach cover image",
        "   Enter    Generate post (again to regenerate)",
        "   c        Copy generated text",
        "   s        Share (opens browser)",
        "   d        Remove article",
        "   x        Clear batch",
        "",
        " General:",
        "   ?        Toggle this help",
        "   q        Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(ratatui::widgets::Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
