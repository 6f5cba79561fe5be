use std::io::Write;

use data_cache::Route;
use data_character::Character;
use data_query::{apply, count_by_house, Criteria};

use crate::context::Context;
use crate::models::{FilterArgs, SubsetArgs};
use crate::render::{character_line, house_counts, write_json};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "characters", about = "List every character")]
pub struct Characters {
    #[clap(flatten)]
    filter: FilterArgs,
}

impl Characters {
    pub async fn run<W: Write>(
        &self,
        ctx: &Context,
        out: &mut W,
    ) -> Result<(), AppError> {
        show(ctx, out, &Route::Characters, &self.filter.criteria()).await
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "students", about = "List the Hogwarts students")]
pub struct Students {
    #[clap(flatten)]
    filter: SubsetArgs,
}

impl Students {
    pub async fn run<W: Write>(
        &self,
        ctx: &Context,
        out: &mut W,
    ) -> Result<(), AppError> {
        show(ctx, out, &Route::Students, &self.filter.criteria()).await
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "staff", about = "List the Hogwarts staff")]
pub struct Staff {
    #[clap(flatten)]
    filter: SubsetArgs,
}

impl Staff {
    pub async fn run<W: Write>(
        &self,
        ctx: &Context,
        out: &mut W,
    ) -> Result<(), AppError> {
        show(ctx, out, &Route::Staff, &self.filter.criteria()).await
    }
}

async fn show<W: Write>(
    ctx: &Context,
    out: &mut W,
    route: &Route,
    criteria: &Criteria,
) -> Result<(), AppError> {
    let list = ctx.cache.load(route).await?.into_characters()?;
    let selected = apply(&list, criteria);
    log::debug!(
        "{} of {} characters match {:?}",
        selected.len(),
        list.len(),
        criteria
    );

    if ctx.json {
        return write_json(out, &selected);
    }
    write_list(ctx, out, &list, &selected)
}

/// Write `selected` followed by the house counts of the whole `list`.
pub fn write_list<W: Write>(
    ctx: &Context,
    out: &mut W,
    list: &[Character],
    selected: &[&Character],
) -> Result<(), AppError> {
    if selected.is_empty() {
        writeln!(out, "No characters found")?;
    }
    for character in selected {
        let favorite = ctx.preferences.is_favorite(&character.id);
        writeln!(out, "{}", character_line(character, favorite))?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{} shown, {}",
        selected.len(),
        house_counts(&count_by_house(list))
    )?;
    Ok(())
}
