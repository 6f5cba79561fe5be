use std::io::Write;

use data_character::HOUSES;
use serde::Serialize;

use crate::context::Context;
use crate::render::write_json;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "house", about = "Show or choose your house")]
pub struct House {
    #[clap(help = "One of Gryffindor, Slytherin, Hufflepuff, Ravenclaw")]
    name: Option<String>,
    #[clap(long, action, conflicts_with = "name", help = "Forget the chosen house")]
    clear: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Selection<'a> {
    selected_house: Option<&'a str>,
}

impl House {
    pub fn run<W: Write>(
        &self,
        ctx: &mut Context,
        out: &mut W,
    ) -> Result<(), AppError> {
        if self.clear {
            ctx.preferences
                .set_selected_house(None)
                .map_err(|err| AppError::PreferencesError(err.to_string()))?;
        } else if let Some(name) = &self.name {
            let house = canonical_house(name)?;
            ctx.preferences
                .set_selected_house(house.map(str::to_owned))
                .map_err(|err| AppError::PreferencesError(err.to_string()))?;
        }

        let selected_house = ctx.preferences.selected_house();
        if ctx.json {
            return write_json(out, &Selection { selected_house });
        }
        match selected_house {
            Some(house) => writeln!(out, "Your house: {}", house)?,
            None => writeln!(out, "No house chosen")?,
        }
        Ok(())
    }
}

/// Match `name` against the known houses ignoring case. An empty name
/// clears the selection.
fn canonical_house(name: &str) -> Result<Option<&'static str>, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    HOUSES
        .iter()
        .find(|house| house.eq_ignore_ascii_case(name))
        .map(|house| Some(*house))
        .ok_or_else(|| AppError::UnknownHouse(name.to_owned()))
}
