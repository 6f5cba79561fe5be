use std::path::PathBuf;

use clap::Parser;
use data_character::API_BASE_URL;

use crate::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "hp-cli")]
#[clap(about = "Browse the Harry Potter characters catalog", long_about = None)]
pub struct Cli {
    #[clap(
        long,
        global = true,
        env = "HP_API_URL",
        default_value = API_BASE_URL,
        help = "Base url of the characters API"
    )]
    pub api_url: String,

    #[clap(
        long,
        global = true,
        env = "HP_DATA_DIR",
        help = "Directory holding the user preferences"
    )]
    pub data_dir: Option<PathBuf>,

    #[clap(long, global = true, action, help = "Print JSON instead of text")]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
