use clap::Subcommand;

mod character;
mod favorites;
mod home;
mod house;
mod list;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Home(home::Home),
    Characters(list::Characters),
    Students(list::Students),
    Staff(list::Staff),
    Character(character::Character),
    Favorites(favorites::Favorites),
    Favorite(favorites::Favorite),
    House(house::House),
}
