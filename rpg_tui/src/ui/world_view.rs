//! World tab: the road, the NPC and the event log

use super::{health_bar, section_header, stat_line};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rpg_core::{NpcState, StatType, WeatherKind};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(50), Constraint::Length(36)])
        .split(area);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(chunks[0]);

    draw_road(f, app, main_chunks[0]);
    draw_log(f, app, main_chunks[1]);
    draw_status(f, app, chunks[1]);
}

/// One-dimensional map of the player and the NPC
fn draw_road(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;
    let npc_x = app.encounter.pose.position.x;
    let player_x = app.player_position.x;
    let center = (npc_x + player_x) / 2.0;
    // Two cells per unit, centred between both characters
    let column = |x: f32| -> Option<usize> {
        let col = (x - center) * 2.0 + width as f32 / 2.0;
        (col >= 0.0 && (col as usize) < width).then_some(col as usize)
    };

    let mut cells: Vec<Span> = vec![Span::styled("·", Style::default().fg(Color::DarkGray)); width];
    let npc_color = if !app.encounter.npc.is_alive() {
        Color::DarkGray
    } else if app.encounter.brain.state() == NpcState::Alerted {
        Color::Red
    } else {
        Color::Yellow
    };
    if let Some(col) = column(npc_x) {
        let glyph = app.encounter.tag.chars().next().unwrap_or('?').to_string();
        cells[col] = Span::styled(glyph, Style::default().fg(npc_color).add_modifier(Modifier::BOLD));
    }
    if let Some(col) = column(player_x) {
        cells[col] = Span::styled("@", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    }

    let distance = app.encounter.distance_to(app.player_position);
    let lines = vec![
        Line::from(cells),
        Line::from(Span::styled(
            format!("Distance {:.1}", distance),
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Road "));
    f.render_widget(paragraph, area);
}

fn draw_log(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .log
        .iter()
        .skip(app.log_scroll)
        .map(|entry| {
            let color = if entry.starts_with("You hit") {
                Color::Green
            } else if entry.contains("hits you") {
                Color::Red
            } else if entry.starts_with("Quest") || entry.starts_with("Completed") {
                Color::Yellow
            } else {
                Color::White
            };
            ListItem::new(Span::styled(entry.clone(), Style::default().fg(color)))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Log "));
    f.render_widget(list, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let npc = &app.encounter.npc;
    let bar_width = area.width.saturating_sub(14) as usize;
    let weather = app.weather.current();

    let mut lines = vec![
        section_header("You"),
        health_bar(app.player.health(), app.player.max_health(), bar_width),
        stat_line(
            "Attack ready in",
            app.player.attack_cooldown_remaining(),
        ),
        Line::from(""),
        section_header(&npc.name),
        health_bar(npc.health(), npc.max_health(), bar_width),
        Line::from(vec![
            Span::styled(format!("{:24}", "State"), Style::default().fg(Color::Gray)),
            Span::styled(app.encounter.brain.state().name(), Style::default().fg(Color::White)),
        ]),
        stat_line("Detects at", npc.stats().get_current_value(StatType::DetectionRadius)),
        stat_line("Gives up at", npc.stats().get_current_value(StatType::EvasionRadius)),
        Line::from(""),
        section_header("Weather"),
        Line::from(Span::styled(
            weather.map(|w| w.name()).unwrap_or("Unknown"),
            Style::default().fg(weather_color(weather)).add_modifier(Modifier::BOLD),
        )),
        stat_line("Next report in", app.weather.until_poll().max(0.0)),
    ];
    if let Some(kind) = weather {
        for modifier in app.weather.effects().modifiers_for(kind) {
            lines.push(Line::from(Span::styled(
                format!("  {:+.2} {}", modifier.value, modifier.stat_type.name()),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Status "));
    f.render_widget(paragraph, area);
}

fn weather_color(weather: Option<WeatherKind>) -> Color {
    match weather {
        Some(WeatherKind::Clear) => Color::Yellow,
        Some(WeatherKind::Clouds) => Color::Gray,
        Some(WeatherKind::Rain) => Color::Blue,
        Some(WeatherKind::Snow) => Color::White,
        Some(WeatherKind::Extreme) => Color::Magenta,
        None => Color::DarkGray,
    }
}
