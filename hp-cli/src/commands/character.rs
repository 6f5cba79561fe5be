use std::io::Write;

use data_cache::{LoaderOutcome, Route};
use data_error::CatalogError;

use crate::commands::home::Home;
use crate::context::Context;
use crate::render::{detail_lines, write_json};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "character", about = "Show one character")]
pub struct Character {
    #[clap(help = "Id of the character, as printed by the lists")]
    id: String,
}

impl Character {
    /// Show the character, or the home overview when there is no such
    /// character. The note about the redirect goes to stderr so `--json`
    /// output stays a single document.
    pub async fn run<W: Write>(
        &self,
        ctx: &Context,
        out: &mut W,
    ) -> Result<(), AppError> {
        let route = Route::CharacterDetail(Some(self.id.clone()));
        match ctx.cache.load(&route).await? {
            LoaderOutcome::Detail(detail) => {
                if ctx.json {
                    return write_json(out, &*detail);
                }
                let favorite = ctx.preferences.is_favorite(detail.id());
                for line in detail_lines(&detail, favorite) {
                    writeln!(out, "{}", line)?;
                }
                Ok(())
            }
            LoaderOutcome::Redirect(path) => {
                log::info!("character {} not found, redirecting to {}", self.id, path);
                eprintln!("No character with id '{}'", self.id);
                Home {}.run(ctx, out).await
            }
            LoaderOutcome::Characters(_) => Err(CatalogError::Cache(format!(
                "loaded a list for character {}",
                self.id
            ))
            .into()),
        }
    }
}
