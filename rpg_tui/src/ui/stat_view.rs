//! Stats tab view

use super::{health_bar, section_header, stat_line, stat_line_with_base};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rpg_core::{Character, StatType};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_character(f, app, &app.player, " Player Stats ", chunks[0]);
    draw_character(f, app, &app.encounter.npc, " Enemy Stats ", chunks[1]);
}

fn draw_character(f: &mut Frame, app: &App, character: &Character, title: &str, area: Rect) {
    let stats = character.stats();
    let bar_width = area.width.saturating_sub(16) as usize;

    let mut lines = vec![
        section_header(&character.name),
        health_bar(character.health(), character.max_health(), bar_width),
        Line::from(""),
        section_header("Combat"),
    ];
    lines.extend(stat_lines(app, character, &[
        StatType::Damage,
        StatType::CriticalChance,
        StatType::CriticalDamageMultiplier,
        StatType::AttackRange,
        StatType::AttackDelay,
        StatType::DamageResistance,
    ]));

    lines.push(Line::from(""));
    lines.push(section_header("Movement"));
    lines.extend(stat_lines(app, character, &[
        StatType::MovementSpeed,
        StatType::DashSpeedMultiplier,
        StatType::PushingForce,
        StatType::TelekinesisForce,
        StatType::TelekinesisDistance,
    ]));
    if stats.contains(StatType::MovementSpeed) && stats.contains(StatType::DashSpeedMultiplier) {
        lines.push(stat_line("Dash speed", character.dash_speed()));
    }

    lines.push(Line::from(""));
    lines.push(section_header("Senses"));
    lines.extend(stat_lines(app, character, &[StatType::DetectionRadius, StatType::EvasionRadius]));

    let attached: usize = stats.iter().map(|s| s.attached_count()).sum();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{} attached modifier(s)", attached),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .scroll((app.stats_scroll as u16, 0));

    f.render_widget(paragraph, area);
}

fn stat_lines(app: &App, character: &Character, types: &[StatType]) -> Vec<Line<'static>> {
    let is_player = std::ptr::eq(character, &app.player);
    types
        .iter()
        .filter_map(|t| character.stats().stat(*t))
        .map(|stat| {
            let highlight = is_player && app.recent_changes.contains(&stat.stat_type());
            stat_line_with_base(
                stat.stat_type().name(),
                stat.base_value(),
                stat.current_value(),
                highlight,
            )
        })
        .collect()
}
