//! Fixed Choice Sets
//!
//! Supermarkets and units offered by the entry forms, plus the Spanish
//! calendar names used by statistics and share formatting.

/// A value/label pair as presented by a select input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Supermarkets selectable when creating a list
pub const SUPERMARKETS: [Choice; 8] = [
    Choice { value: "mercadona", label: "Mercadona" },
    Choice { value: "carrefour", label: "Carrefour" },
    Choice { value: "lidl", label: "Lidl" },
    Choice { value: "aldi", label: "Aldi" },
    Choice { value: "masymas", label: "Mas y Mas" },
    Choice { value: "consum", label: "Consum" },
    Choice { value: "alcampo", label: "Alcampo" },
    Choice { value: "otro", label: "Otro" },
];

/// Sentinel supermarket value that enables the free-text store name
pub const OTHER_SUPERMARKET: &str = "otro";

/// Units selectable for a list item
pub const UNITS: [Choice; 8] = [
    Choice { value: "unidad", label: "unidad" },
    Choice { value: "kg", label: "kg" },
    Choice { value: "g", label: "g" },
    Choice { value: "l", label: "l" },
    Choice { value: "ml", label: "ml" },
    Choice { value: "pack", label: "pack" },
    Choice { value: "botella", label: "botella" },
    Choice { value: "bolsa", label: "bolsa" },
];

/// Unit applied when the entry form leaves the field blank
pub const DEFAULT_UNIT: &str = "unidad";

/// Month names, calendar order
pub const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Weekday names, Monday first (matches `Weekday::num_days_from_monday`)
pub const WEEKDAYS_ES: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

/// Display label for a supermarket value; unknown values pass through
pub fn supermarket_label(value: &str) -> &str {
    SUPERMARKETS
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.label)
        .unwrap_or(value)
}
