use chrono::{DateTime, Local, Utc};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{Breach, PriceLimits, PricePoint},
    quantity::rate::KilowattHourRate,
};

/// Render the published points one row per hour, bolding the row that covers `now`.
#[must_use]
pub fn build_price_table(points: &[PricePoint], limits: PriceLimits, now: DateTime<Utc>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Start", "End", "Price"]);
    for point in points {
        let start = point.interval.start.with_timezone(&Local);
        let end = point.interval.end.with_timezone(&Local);
        let mut cells = vec![
            Cell::new(start.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(start.format("%H:%M")),
            Cell::new(end.format("%H:%M")).add_attribute(Attribute::Dim),
            price_cell(point.price, limits),
        ];
        if point.interval.contains(now) {
            cells = embolden(cells);
        }
        table.add_row(cells);
    }
    table
}

/// Two-row view of the current and next-hour prices.
#[must_use]
pub fn build_hour_prices_table(current: PricePoint, next: PricePoint, limits: PriceLimits) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Date", "Start", "End", "Price"]);
    for (label, point, bold) in [("Current", current, true), ("Next", next, false)] {
        let start = point.interval.start.with_timezone(&Local);
        let end = point.interval.end.with_timezone(&Local);
        let mut cells = vec![
            Cell::new(label),
            Cell::new(start.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(start.format("%H:%M")),
            Cell::new(end.format("%H:%M")).add_attribute(Attribute::Dim),
            price_cell(point.price, limits),
        ];
        if bold {
            cells = embolden(cells);
        }
        table.add_row(cells);
    }
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn price_cell(price: KilowattHourRate, limits: PriceLimits) -> Cell {
    let color = match limits.breach(price) {
        Some(Breach::Below) => Color::Green,
        Some(Breach::Above) => Color::Red,
        None => Color::Reset,
    };
    Cell::new(price).set_alignment(CellAlignment::Right).fg(color)
}

fn embolden(cells: Vec<Cell>) -> Vec<Cell> {
    cells.into_iter().map(|cell| cell.add_attribute(Attribute::Bold)).collect()
}
