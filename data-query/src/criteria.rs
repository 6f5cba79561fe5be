use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

const SEARCH_PARAM: &str = "search";
const HOUSE_PARAM: &str = "house";
const SORT_BY_PARAM: &str = "sortBy";
const ALIVE_PARAM: &str = "alive";
const WIZARDS_PARAM: &str = "wizards";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    House,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::House => "house",
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortBy::Name),
            "house" => Ok(SortBy::House),
            _ => Err(format!("Unknown sort key '{}'", s)),
        }
    }
}

/// Filter and sort options of a character list.
///
/// `sort_by: None` keeps the order of the source list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub search: Option<String>,
    pub house: Option<String>,
    pub sort_by: Option<SortBy>,
    pub only_alive: bool,
    pub only_wizards: bool,
}

impl Criteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(search.into());
        self
    }

    pub fn with_house(mut self, house: impl Into<String>) -> Self {
        self.house = non_empty(house.into());
        self
    }

    pub fn sorted_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn only_alive(mut self) -> Self {
        self.only_alive = true;
        self
    }

    pub fn only_wizards(mut self) -> Self {
        self.only_wizards = true;
        self
    }

    /// Read criteria from a url query string such as
    /// `search=har&house=Gryffindor&sortBy=house&alive=true`.
    ///
    /// A missing `sortBy` means sorting by name, an unknown one leaves the
    /// list unsorted. Flags are set only by the literal value `true`.
    /// When a parameter repeats, its first value wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut criteria = Criteria {
            sort_by: Some(SortBy::Name),
            ..Default::default()
        };

        let mut seen = HashSet::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if !seen.insert(key.clone()) {
                continue;
            }
            match key.as_ref() {
                SEARCH_PARAM => criteria.search = non_empty(value.into_owned()),
                HOUSE_PARAM => criteria.house = non_empty(value.into_owned()),
                SORT_BY_PARAM => {
                    criteria.sort_by = if value.is_empty() {
                        Some(SortBy::Name)
                    } else {
                        value.parse().ok()
                    }
                }
                ALIVE_PARAM => criteria.only_alive = value == "true",
                WIZARDS_PARAM => criteria.only_wizards = value == "true",
                _ => (),
            }
        }

        criteria
    }

    /// Write the criteria back as a query string; only set values are
    /// kept.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(search) = &self.search {
            query.append_pair(SEARCH_PARAM, search);
        }
        if let Some(house) = &self.house {
            query.append_pair(HOUSE_PARAM, house);
        }
        if let Some(sort_by) = self.sort_by {
            query.append_pair(SORT_BY_PARAM, sort_by.as_str());
        }
        if self.only_alive {
            query.append_pair(ALIVE_PARAM, "true");
        }
        if self.only_wizards {
            query.append_pair(WIZARDS_PARAM, "true");
        }
        query.finish()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_query_sorts_by_name() {
        let criteria = Criteria::from_query("");
        assert_eq!(criteria, Criteria::default().sorted_by(SortBy::Name));
    }

    #[test]
    fn full_query_is_parsed() {
        let criteria = Criteria::from_query(
            "?search=Har&house=Gryffindor&sortBy=house&alive=true&wizards=true",
        );
        assert_eq!(
            criteria,
            Criteria::default()
                .with_search("Har")
                .with_house("Gryffindor")
                .sorted_by(SortBy::House)
                .only_alive()
                .only_wizards()
        );
    }

    #[rstest]
    #[case("alive=1", false)]
    #[case("alive=TRUE", false)]
    #[case("alive=", false)]
    #[case("alive=true", true)]
    fn flags_need_literal_true(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(Criteria::from_query(query).only_alive, expected);
    }

    #[rstest]
    #[case("search=har&search=ron", Criteria::default().with_search("har"))]
    #[case("house=&house=Slytherin", Criteria::default())]
    #[case("alive=true&alive=false", Criteria::default().only_alive())]
    #[case("wizards=no&wizards=true", Criteria::default())]
    fn repeated_parameter_keeps_first_value(
        #[case] query: &str,
        #[case] expected: Criteria,
    ) {
        assert_eq!(
            Criteria::from_query(query),
            expected.sorted_by(SortBy::Name)
        );
    }

    #[test]
    fn repeated_sort_key_keeps_first_value() {
        assert_eq!(
            Criteria::from_query("sortBy=house&sortBy=name").sort_by,
            Some(SortBy::House)
        );
        assert_eq!(Criteria::from_query("sortBy=age&sortBy=name").sort_by, None);
    }

    #[test]
    fn unknown_sort_key_keeps_order() {
        assert_eq!(Criteria::from_query("sortBy=age").sort_by, None);
        assert_eq!(
            Criteria::from_query("sortBy=").sort_by,
            Some(SortBy::Name)
        );
    }

    #[test]
    fn empty_values_are_absent() {
        let criteria = Criteria::from_query("search=&house=");
        assert_eq!(criteria.search, None);
        assert_eq!(criteria.house, None);
    }

    #[test]
    fn query_is_written_back() {
        let criteria = Criteria::default()
            .with_search("ron w")
            .sorted_by(SortBy::House)
            .only_wizards();
        let query = criteria.to_query();
        assert_eq!(query, "search=ron+w&sortBy=house&wizards=true");
        assert_eq!(Criteria::from_query(&query), criteria);
    }
}
