mod filter;

pub use filter::{FilterArgs, SubsetArgs};
