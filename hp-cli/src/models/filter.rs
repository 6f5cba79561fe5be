use data_query::{Criteria, SortBy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    Name,
    House,
}

impl From<SortKey> for SortBy {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => SortBy::Name,
            SortKey::House => SortBy::House,
        }
    }
}

/// Filters of the characters list.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct FilterArgs {
    #[clap(long, short, help = "Keep names containing this text")]
    pub search: Option<String>,
    #[clap(long, help = "Keep members of this house")]
    pub house: Option<String>,
    #[clap(long, value_enum, help = "Sort the list, by name when omitted")]
    pub sort_by: Option<SortKey>,
    #[clap(long, action, help = "Keep living characters only")]
    pub alive: bool,
    #[clap(long, action, help = "Keep wizards only")]
    pub wizards: bool,
    #[clap(
        long,
        conflicts_with_all = ["search", "house", "sort_by", "alive", "wizards"],
        help = "Raw query string, e.g. \"search=har&alive=true\""
    )]
    pub query: Option<String>,
}

impl FilterArgs {
    pub fn criteria(&self) -> Criteria {
        if let Some(query) = &self.query {
            return Criteria::from_query(query);
        }

        let mut criteria = Criteria::default()
            .sorted_by(self.sort_by.unwrap_or(SortKey::Name).into());
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.as_str());
        }
        if let Some(house) = &self.house {
            criteria = criteria.with_house(house.as_str());
        }
        if self.alive {
            criteria = criteria.only_alive();
        }
        if self.wizards {
            criteria = criteria.only_wizards();
        }
        criteria
    }
}

/// Filters of the students and staff lists, which keep source order.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct SubsetArgs {
    #[clap(long, short, help = "Keep names containing this text")]
    pub search: Option<String>,
    #[clap(long, help = "Keep members of this house")]
    pub house: Option<String>,
}

impl SubsetArgs {
    pub fn criteria(&self) -> Criteria {
        let mut criteria = Criteria::default();
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.as_str());
        }
        if let Some(house) = &self.house {
            criteria = criteria.with_house(house.as_str());
        }
        criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_name_order() {
        let args = FilterArgs {
            search: Some("har".to_owned()),
            alive: true,
            ..Default::default()
        };
        let criteria = args.criteria();
        assert_eq!(criteria.search.as_deref(), Some("har"));
        assert_eq!(criteria.sort_by, Some(SortBy::Name));
        assert!(criteria.only_alive);
        assert!(!criteria.only_wizards);
    }

    #[test]
    fn raw_query_wins() {
        let args = FilterArgs {
            query: Some("house=Slytherin&sortBy=house&wizards=true".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            args.criteria(),
            Criteria::default()
                .with_house("Slytherin")
                .sorted_by(SortBy::House)
                .only_wizards()
        );
    }

    #[test]
    fn subset_filters_keep_source_order() {
        let args = SubsetArgs {
            house: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(args.criteria(), Criteria::default());
    }
}
