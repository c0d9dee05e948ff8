//! Quests tab view

use super::section_header;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use rpg_core::QuestObjective;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_quest_list(f, app, chunks[0]);
    draw_quest_details(f, app, chunks[1]);
}

fn draw_quest_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .quests
        .iter()
        .enumerate()
        .map(|(i, quest)| {
            let selected = i == app.selected_quest;
            let (status, color) = match app.quest_log.get(&quest.id) {
                Some(p) if p.is_complete() => ("[done]".to_string(), Color::Green),
                Some(p) => (format!("[{}/{}]", p.progress, p.required()), Color::Yellow),
                None => ("[new]".to_string(), Color::DarkGray),
            };
            let name_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(if selected { "> " } else { "  " }, name_style),
                Span::styled(format!("{:8} ", status), Style::default().fg(color)),
                Span::styled(quest.name.clone(), name_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Quests ({} active) ", app.quest_log.active().len())),
    );
    f.render_widget(list, area);
}

fn draw_quest_details(f: &mut Frame, app: &App, area: Rect) {
    let Some(quest) = app.quests.get(app.selected_quest) else {
        f.render_widget(
            Paragraph::new("No quests available")
                .block(Block::default().borders(Borders::ALL).title(" Details ")),
            area,
        );
        return;
    };

    let objective = match &quest.objective {
        QuestObjective::Collect { item_id, amount } => {
            let name = app
                .catalog
                .get(item_id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| item_id.clone());
            format!("Collect {} x {}", amount, name)
        }
        QuestObjective::Destroy { target_tag, amount } => {
            format!("Defeat {} x {}", amount, target_tag)
        }
    };

    let mut lines = vec![
        Line::from(Span::styled(
            quest.name.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(quest.description.clone(), Style::default().fg(Color::Gray))),
        Line::from(""),
        section_header("Objective"),
        Line::from(objective),
    ];
    if let Some(progress) = app.quest_log.get(&quest.id) {
        lines.push(Line::from(Span::styled(
            format!("Progress: {}/{}", progress.progress, progress.required()),
            Style::default().fg(Color::White),
        )));
    }

    lines.push(Line::from(""));
    lines.push(section_header("Reward"));
    for modifier in &quest.reward.modifiers {
        lines.push(Line::from(Span::styled(
            format!("  {:+.1} {} ({:?})", modifier.value, modifier.stat_type.name(), modifier.kind),
            Style::default().fg(Color::Green),
        )));
    }
    for item in &quest.reward.items {
        let name = app
            .catalog
            .get(&item.item_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| item.item_id.clone());
        lines.push(Line::from(Span::styled(
            format!("  {} x{}", name, item.quantity),
            Style::default().fg(Color::Cyan),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(paragraph, area);
}
