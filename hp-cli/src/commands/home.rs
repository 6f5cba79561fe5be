use std::io::Write;

use data_cache::Route;
use data_query::{count_by_house, overview, Overview};
use serde::Serialize;

use crate::context::Context;
use crate::render::{house_counts, write_json};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "home", about = "Show an overview of the catalog")]
pub struct Home {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HomeView<'a> {
    #[serde(flatten)]
    overview: Overview,
    favorites: usize,
    selected_house: Option<&'a str>,
}

impl Home {
    pub async fn run<W: Write>(
        &self,
        ctx: &Context,
        out: &mut W,
    ) -> Result<(), AppError> {
        let all = ctx.cache.load(&Route::Home).await?.into_characters()?;

        let view = HomeView {
            overview: overview(&all),
            favorites: ctx.preferences.favorite_ids().len(),
            selected_house: ctx.preferences.selected_house(),
        };
        if ctx.json {
            return write_json(out, &view);
        }

        writeln!(out, "Characters: {}", view.overview.characters)?;
        writeln!(out, "Students:   {}", view.overview.students)?;
        writeln!(out, "Staff:      {}", view.overview.staff)?;
        writeln!(out, "Favorites:  {}", view.favorites)?;
        writeln!(out, "Houses:     {}", house_counts(&count_by_house(&all)))?;
        if let Some(house) = view.selected_house {
            writeln!(out, "Your house: {}", house)?;
        }
        Ok(())
    }
}
