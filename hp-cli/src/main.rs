use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;
use crate::commands::Commands;
use crate::context::Context;

mod cli;
mod commands;
mod context;
mod error;
mod models;
mod render;
#[cfg(test)]
mod testing;

pub use error::AppError;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let mut ctx = Context::new(&args)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Commands::Home(home) => home.run(&ctx, &mut out).await?,
        Commands::Characters(characters) => {
            characters.run(&ctx, &mut out).await?
        }
        Commands::Students(students) => students.run(&ctx, &mut out).await?,
        Commands::Staff(staff) => staff.run(&ctx, &mut out).await?,
        Commands::Character(character) => {
            character.run(&ctx, &mut out).await?
        }
        Commands::Favorites(favorites) => {
            favorites.run(&ctx, &mut out).await?
        }
        Commands::Favorite(favorite) => {
            favorite.run(&mut ctx, &mut out).await?
        }
        Commands::House(house) => house.run(&mut ctx, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
