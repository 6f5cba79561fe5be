use std::io::Write;

use data_character::{initials, Character, CharacterDetail, Wand};
use data_query::HouseCounts;
use serde::Serialize;

use crate::AppError;

const NO_HOUSE: &str = "No house";

pub fn write_json<W, T>(out: &mut W, value: &T) -> Result<(), AppError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// One line of a character list: favorite marker, initials, name, house
/// and the id to pass to `character`.
pub fn character_line(character: &Character, favorite: bool) -> String {
    format!(
        "{} {:<3} {} ({}) [{}]",
        if favorite { '*' } else { ' ' },
        initials(&character.name),
        character.name,
        character.house.as_deref().unwrap_or(NO_HOUSE),
        character.id
    )
}

pub fn house_counts(counts: &HouseCounts) -> String {
    if counts.is_empty() {
        return "no house members".to_owned();
    }
    counts
        .iter()
        .map(|(house, count)| format!("{}: {}", house, count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn detail_lines(detail: &CharacterDetail, favorite: bool) -> Vec<String> {
    let character = &detail.character;
    let mut lines = vec![
        format!(
            "{}{}",
            character.name,
            if favorite { " (favorite)" } else { "" }
        ),
        field("Id", &character.id),
        field("House", character.house.as_deref().unwrap_or(NO_HOUSE)),
    ];

    let optional = [
        ("Species", Some(character.species.as_str())),
        ("Actor", character.actor.as_deref()),
        ("Born", detail.date_of_birth.as_deref()),
        ("Ancestry", detail.ancestry.as_deref()),
        ("Eyes", detail.eye_colour.as_deref()),
        ("Hair", detail.hair_colour.as_deref()),
        ("Patronus", detail.patronus.as_deref()),
    ];
    lines.extend(
        optional
            .iter()
            .filter_map(|(name, value)| {
                value.filter(|v| !v.is_empty()).map(|v| field(name, v))
            }),
    );

    lines.push(field(
        "Status",
        if character.is_alive() { "alive" } else { "deceased" },
    ));
    let mut roles = Vec::new();
    if character.is_wizard() {
        roles.push("wizard");
    }
    if character.hogwarts_student {
        roles.push("Hogwarts student");
    }
    if character.hogwarts_staff {
        roles.push("Hogwarts staff");
    }
    if !roles.is_empty() {
        lines.push(field("Roles", &roles.join(", ")));
    }
    if let Some(wand) = character.wand.as_ref().filter(|w| !w.is_empty()) {
        lines.push(field("Wand", &wand_line(wand)));
    }
    if !detail.alternate_names.is_empty() {
        lines.push(field("Also known as", &detail.alternate_names.join(", ")));
    }
    if let Some(image) = &character.image {
        lines.push(field("Image", image));
    }

    lines
}

fn wand_line(wand: &Wand) -> String {
    [
        wand.wood.as_deref(),
        wand.core.as_deref(),
        wand.length.as_deref(),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<_>>()
    .join(", ")
}

fn field(name: &str, value: &str) -> String {
    format!("  {:<14}{}", format!("{}:", name), value)
}
