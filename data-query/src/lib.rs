mod criteria;
mod pipeline;

pub use criteria::{Criteria, SortBy};
pub use pipeline::{
    apply, count_by_house, favorites, locale_cmp, overview, HouseCounts,
    Overview,
};
