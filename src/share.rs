//! Share Export
//!
//! Renders a shopping list as plain text for the share sheet or
//! clipboard. Nothing here is persisted; the caller hands the text to an
//! external messaging surface.

use chrono::{Datelike, NaiveDate};

use crate::domain::{ShoppingList, MONTHS_ES, WEEKDAYS_ES};

/// Human-readable export of one list
///
/// Pending and completed items are listed in separate sections as
/// `[ ] name - qty unit` / `[x] name - qty unit`; a non-zero total cost
/// adds a trailing currency line.
pub fn format_list_for_share(list: &ShoppingList) -> String {
    let mut message = format!("Lista de compra: {}\n\n", list.name);

    message.push_str(&format!("Supermercado: {}\n", list.store_label()));
    message.push_str(&format!("Fecha: {}\n\n", format_date_es(list.shopping_date)));

    let pending: Vec<_> = list.items.iter().filter(|i| !i.completed).collect();
    let completed: Vec<_> = list.items.iter().filter(|i| i.completed).collect();

    if !pending.is_empty() {
        message.push_str("PENDIENTES:\n");
        for item in pending {
            message.push_str(&format!(
                "[ ] {} - {} {}\n",
                item.name, item.quantity, item.unit
            ));
        }
        message.push('\n');
    }

    if !completed.is_empty() {
        message.push_str("COMPLETADOS:\n");
        for item in completed {
            message.push_str(&format!(
                "[x] {} - {} {}\n",
                item.name, item.quantity, item.unit
            ));
        }
        message.push('\n');
    }

    // Zero behaves like "no cost recorded", matching the entry flow
    if let Some(cost) = list.total_cost.filter(|c| *c != 0.0) {
        message.push_str(&format!("Total: {}", format_eur(cost)));
    }

    message
}

/// Long-form es-ES date: "lunes, 3 de marzo de 2025"
pub fn format_date_es(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_ES[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS_ES[date.month0() as usize];
    format!("{}, {} de {} de {}", weekday, date.day(), month, date.year())
}

/// es-ES currency rendering: comma decimals, dot thousands, trailing €
pub fn format_eur(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut integer = String::new();
    let digits = whole.to_string();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            integer.push('.');
        }
        integer.push(ch);
    }

    format!(
        "{}{},{:02} €",
        if negative { "-" } else { "" },
        integer,
        fraction
    )
}
