//! Help tab view

use super::section_header;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, _app: &App, area: Rect) {
    let lines = vec![
        section_header("Navigation"),
        key_line("1-5", "Jump to tab (Stats/Inventory/Quests/World/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Navigate lists / scroll"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        section_header("Inventory"),
        key_line("←/→", "Switch between slots and backpack"),
        key_line("Enter", "Equip selected item / unequip selected slot"),
        key_line("c", "Use consumable"),
        key_line("d", "Drop one"),
        key_line("x / m", "Split stack in half / merge stacks"),
        Line::from(""),
        section_header("Quests"),
        key_line("Enter", "Accept, or turn in when complete"),
        key_line("b", "Abandon"),
        Line::from(""),
        section_header("World"),
        key_line("←/→", "Walk"),
        key_line("a / Space", "Attack"),
        key_line("s", "Dash away"),
        key_line("w", "Change weather"),
        key_line("n", "Spawn a new enemy"),
        Line::from(""),
        section_header("Mechanics"),
        Line::from(Span::styled("Stats:", Style::default().fg(Color::Yellow))),
        Line::from("  Current = Base + Σ attached"),
        Line::from("  Base stays within [min, max]; equipment and weather attach, potions change base"),
        Line::from(""),
        Line::from(Span::styled("Damage taken:", Style::default().fg(Color::Yellow))),
        Line::from("  Incoming × (1 - Damage Resistance)"),
        Line::from(""),
        Line::from(Span::styled("Enemies:", Style::default().fg(Color::Yellow))),
        Line::from("  Notice you within Detection Radius, give up beyond Evasion Radius"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
