//! Inventory tab view: equipment slots, backpack and item details

use super::section_header;
use crate::app::{App, InventoryFocus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rpg_core::{EquipmentSlot, ItemDefinition, ItemVariant, ModifierKind};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(area);

    draw_slots(f, app, chunks[0]);
    draw_backpack(f, app, chunks[1]);
    draw_details(f, app, chunks[2]);
}

fn focus_border(app: &App, focus: InventoryFocus) -> Style {
    if app.inventory_focus == focus {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_slots(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = EquipmentSlot::all()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let selected = app.inventory_focus == InventoryFocus::Slots && i == app.selected_slot;
            let marker = if selected { "> " } else { "  " };
            let (text, color) = match app.player.inventory().equipped(*slot) {
                Some(item) => (item.definition().name.clone(), Color::Green),
                None => ("(empty)".to_string(), Color::DarkGray),
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(format!("{:8}", slot.name()), Style::default().fg(Color::Gray)),
                Span::styled(text, Style::default().fg(color)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(app, InventoryFocus::Slots))
            .title(" Equipment "),
    );
    f.render_widget(list, area);
}

fn draw_backpack(f: &mut Frame, app: &App, area: Rect) {
    let backpack = app.player.inventory().backpack();
    let items: Vec<ListItem> = if backpack.is_empty() {
        vec![ListItem::new(Span::styled(
            "  Backpack is empty",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        backpack
            .iter()
            .enumerate()
            .map(|(i, stack)| {
                let selected =
                    app.inventory_focus == InventoryFocus::Backpack && i == app.selected_backpack;
                let style = if selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let count = if stack.definition().is_stackable() {
                    format!(" {}/{}", stack.stack_size(), stack.definition().max_stack_size())
                } else {
                    String::new()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(if selected { "> " } else { "  " }, style),
                    Span::styled(stack.definition().name.clone(), style),
                    Span::styled(count, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(app, InventoryFocus::Backpack))
            .title(format!(" Backpack ({}) ", backpack.len())),
    );
    f.render_widget(list, area);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let definition = match app.inventory_focus {
        InventoryFocus::Slots => app
            .player
            .inventory()
            .equipped(app.current_slot())
            .map(|item| item.definition()),
        InventoryFocus::Backpack => app
            .player
            .inventory()
            .backpack()
            .get(app.selected_backpack)
            .map(|item| item.definition()),
    };

    let lines = match definition {
        Some(definition) => detail_lines(definition),
        None => vec![Line::from(Span::styled(
            "Nothing selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(paragraph, area);
}

fn detail_lines(definition: &ItemDefinition) -> Vec<Line<'static>> {
    let kind = match definition.variant() {
        ItemVariant::Armor { slot } => format!("Armor ({})", slot_name(*slot)),
        ItemVariant::Weapon { .. } => "Weapon".to_string(),
        ItemVariant::Consumable => "Consumable".to_string(),
        ItemVariant::Healing { amount } => format!("Healing ({:.0})", amount),
        ItemVariant::Material => "Material".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            definition.name.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(kind, Style::default().fg(Color::Gray))),
    ];
    if definition.max_stack_size() > 1 {
        lines.push(Line::from(Span::styled(
            format!("Stacks to {}", definition.max_stack_size()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if !definition.equip_modifiers().is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("When equipped"));
        for modifier in definition.equip_modifiers() {
            lines.push(modifier_line(modifier.stat_type.name(), modifier.kind, modifier.value));
        }
    }
    if !definition.consume_modifiers().is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("When used"));
        for modifier in definition.consume_modifiers() {
            lines.push(modifier_line(modifier.stat_type.name(), modifier.kind, modifier.value));
        }
    }
    lines
}

fn slot_name(slot: rpg_core::ArmorSlot) -> &'static str {
    EquipmentSlot::from(slot).name()
}

fn modifier_line(stat: &str, kind: ModifierKind, value: f64) -> Line<'static> {
    let target = match kind {
        ModifierKind::IncreaseMinBaseValue => " min",
        ModifierKind::IncreaseMaxBaseValue => " max",
        ModifierKind::IncreaseBaseValue | ModifierKind::Attached => "",
    };
    let color = if value >= 0.0 { Color::Green } else { Color::Red };
    Line::from(vec![
        Span::styled(format!("  {:+.2} ", value), Style::default().fg(color)),
        Span::styled(format!("{}{}", stat, target), Style::default().fg(Color::White)),
    ])
}
