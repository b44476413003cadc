//! Output formatting utilities

use clap::ValueEnum;
use kinship_core::{Direction, Generation, LineageView, Person};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Pretty-printed JSON
pub fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Render persons as an aligned table
pub fn persons_table(persons: &[Person]) -> String {
    const HEADERS: [&str; 5] = ["ID", "NAME", "BORN", "PLACE", "PARENTS"];

    let rows: Vec<[String; 5]> = persons
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                p.date_of_birth.to_string(),
                p.place_of_birth.clone().unwrap_or_else(|| "-".to_string()),
                p.parent_ids.len().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// One-line summary: `Name (born 1990-01-01 in Place) [id]`
pub fn person_line(person: &Person) -> String {
    match &person.place_of_birth {
        Some(place) => format!(
            "{} (born {} in {}) [{}]",
            person.name, person.date_of_birth, place, person.id
        ),
        None => format!("{} (born {}) [{}]", person.name, person.date_of_birth, person.id),
    }
}

/// Human label for a generation, e.g. "Grandparents" or "2x great-grandchildren"
pub fn generation_label(direction: Direction, depth: u32) -> String {
    let (one, two) = match direction {
        Direction::Ancestors => ("Parents", "grandparents"),
        Direction::Descendants => ("Children", "grandchildren"),
    };
    match depth {
        0 | 1 => one.to_string(),
        2 => capitalize(two),
        3 => format!("Great-{}", two),
        n => format!("{}x great-{}", n - 2, two),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn push_generations(out: &mut String, generations: &[Generation], direction: Direction) {
    for generation in generations {
        out.push_str(&format!("  {}:\n", generation_label(direction, generation.depth)));
        for person in &generation.persons {
            out.push_str(&format!("    {}\n", person_line(person)));
        }
    }
}

/// Render a lineage view with ancestors above and descendants below the person
pub fn lineage_tree(view: &LineageView) -> String {
    let mut out = format!("{}\n", person_line(&view.person));

    if view.is_isolated() {
        out.push_str("  No recorded ancestors or descendants\n");
        return out;
    }

    if view.ancestors.is_empty() {
        out.push_str("Ancestors: none\n");
    } else {
        out.push_str("Ancestors:\n");
        push_generations(&mut out, &view.ancestors, Direction::Ancestors);
    }

    if view.descendants.is_empty() {
        out.push_str("Descendants: none\n");
    } else {
        out.push_str("Descendants:\n");
        push_generations(&mut out, &view.descendants, Direction::Descendants);
    }

    out
}
