use std::io::Write;

use data_cache::{Route, Subset};
use data_query::favorites;
use serde::Serialize;

use crate::commands::list::write_list;
use crate::context::Context;
use crate::render::write_json;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "favorites", about = "List your favorite characters")]
pub struct Favorites {}

impl Favorites {
    pub async fn run<W: Write>(
        &self,
        ctx: &Context,
        out: &mut W,
    ) -> Result<(), AppError> {
        let all = ctx.cache.load(&Route::Favorites).await?.into_characters()?;
        let selected = favorites(&all, ctx.preferences.favorite_ids());

        if ctx.json {
            return write_json(out, &selected);
        }
        write_list(ctx, out, &all, &selected)
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "favorite", about = "Add or remove a favorite character")]
pub struct Favorite {
    #[clap(help = "Id of the character")]
    id: String,
}

#[derive(Serialize)]
struct Toggled<'a> {
    id: &'a str,
    favorite: bool,
}

impl Favorite {
    pub async fn run<W: Write>(
        &self,
        ctx: &mut Context,
        out: &mut W,
    ) -> Result<(), AppError> {
        let name = ctx
            .cache
            .characters(Subset::All)
            .await
            .ok()
            .and_then(|all| {
                all.iter()
                    .find(|c| c.id == self.id)
                    .map(|c| c.name.clone())
            });
        if name.is_none() {
            log::warn!("{} is not a known character id", self.id);
        }

        let favorite = ctx
            .preferences
            .toggle_favorite(&self.id)
            .map_err(|err| AppError::PreferencesError(err.to_string()))?;

        if ctx.json {
            return write_json(
                out,
                &Toggled {
                    id: &self.id,
                    favorite,
                },
            );
        }
        let name = name.as_deref().unwrap_or(&self.id);
        if favorite {
            writeln!(out, "Added {} to favorites", name)?;
        } else {
            writeln!(out, "Removed {} from favorites", name)?;
        }
        Ok(())
    }
}
