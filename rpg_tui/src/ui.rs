//! UI rendering

mod help_view;
mod inventory_view;
mod quest_view;
mod stat_view;
mod world_view;

use crate::app::{App, InventoryFocus, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Stats => stat_view::draw(f, app, chunks[1]),
        Tab::Inventory => inventory_view::draw(f, app, chunks[1]),
        Tab::Quests => quest_view::draw(f, app, chunks[1]),
        Tab::World => world_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    draw_keybindings(f, app, chunks[2]);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("Tab", "Next tab"), ("?", "Help"), ("q", "Quit")];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Stats => vec![("↑/↓", "Scroll")],
        Tab::Inventory => match app.inventory_focus {
            InventoryFocus::Slots => vec![("←/→", "Focus"), ("Enter/u", "Unequip")],
            InventoryFocus::Backpack => vec![
                ("←/→", "Focus"),
                ("Enter", "Equip"),
                ("c", "Use"),
                ("d", "Drop"),
                ("x", "Split"),
                ("m", "Merge"),
            ],
        },
        Tab::Quests => vec![("↑/↓", "Select"), ("Enter", "Accept/Turn in"), ("b", "Abandon")],
        Tab::World => vec![
            ("←/→", "Move"),
            ("a", "Attack"),
            ("s", "Dash"),
            ("w", "Weather"),
            ("n", "Respawn"),
        ],
        Tab::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::White)));
    }

    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let weather = app
        .weather
        .current()
        .map(|w| w.name())
        .unwrap_or("Unknown");
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Road Warden │ {} │ {:.0}s ", weather, app.time_elapsed)),
        )
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

pub fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

pub fn health_bar(current: f64, max: f64, width: usize) -> Line<'static> {
    let percent = if max > 0.0 { (current / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (percent * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    let color = if percent > 0.5 {
        Color::Green
    } else if percent > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };

    Line::from(vec![
        Span::styled(
            format!("{}{}", "█".repeat(filled), "░".repeat(empty)),
            Style::default().fg(color),
        ),
        Span::styled(
            format!(" {:.0}/{:.0}", current, max),
            Style::default().fg(Color::White),
        ),
    ])
}

pub fn stat_line(name: &str, value: f64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:24}", name), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:.2}", value), Style::default().fg(Color::White)),
    ])
}

/// Stat line that shows the base value when attached modifiers change it
pub fn stat_line_with_base(name: &str, base: f64, current: f64, highlight: bool) -> Line<'static> {
    let name_style = if highlight {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    if (base - current).abs() < 1e-9 {
        return Line::from(vec![
            Span::styled(format!("{:24}", name), name_style),
            Span::styled(format!("{:.2}", current), Style::default().fg(Color::White)),
        ]);
    }
    let color = if current > base { Color::Green } else { Color::Red };
    Line::from(vec![
        Span::styled(format!("{:24}", name), name_style),
        Span::styled(format!("{:.2}", current), Style::default().fg(color)),
        Span::styled(format!(" (base: {:.2})", base), Style::default().fg(Color::DarkGray)),
    ])
}
