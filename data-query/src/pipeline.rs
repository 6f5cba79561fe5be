use std::cmp::Ordering;
use std::collections::BTreeMap;

use data_character::Character;
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::Serialize;

use crate::criteria::{Criteria, SortBy};

/// Number of characters per house, house-less characters are omitted.
pub type HouseCounts = BTreeMap<String, usize>;

/// Filter and sort `characters` according to `criteria`.
///
/// Filters run in this order: alive, wizard, name search, house. The
/// input is left untouched and equal inputs always give equal outputs.
pub fn apply<'a>(
    characters: &'a [Character],
    criteria: &Criteria,
) -> Vec<&'a Character> {
    let search = criteria.search.as_ref().map(|s| s.to_lowercase());

    let mut selected: Vec<&Character> = characters
        .iter()
        .filter(|c| !criteria.only_alive || c.is_alive())
        .filter(|c| !criteria.only_wizards || c.is_wizard())
        .filter(|c| match &search {
            Some(term) => c.name.to_lowercase().contains(term.as_str()),
            None => true,
        })
        .filter(|c| match &criteria.house {
            Some(house) => c.house.as_ref() == Some(house),
            None => true,
        })
        .collect();

    // `sort_by` is stable, ties keep the filtered order
    match criteria.sort_by {
        Some(SortBy::Name) => {
            selected.sort_by(|a, b| locale_cmp(&a.name, &b.name))
        }
        Some(SortBy::House) => selected.sort_by(|a, b| house_cmp(a, b)),
        None => (),
    }

    selected
}

/// Count characters per house over the whole list.
pub fn count_by_house(characters: &[Character]) -> HouseCounts {
    characters
        .iter()
        .filter_map(|c| c.house.as_ref())
        .fold(HouseCounts::new(), |mut acc, house| {
            *acc.entry(house.clone()).or_insert(0) += 1;
            acc
        })
}

/// Characters whose identifier is among `ids`, in list order.
pub fn favorites<'a>(
    characters: &'a [Character],
    ids: &[String],
) -> Vec<&'a Character> {
    characters
        .iter()
        .filter(|c| ids.contains(&c.id))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub characters: usize,
    pub students: usize,
    pub staff: usize,
}

pub fn overview(characters: &[Character]) -> Overview {
    Overview {
        characters: characters.len(),
        students: characters
            .iter()
            .filter(|c| c.hogwarts_student)
            .count(),
        staff: characters
            .iter()
            .filter(|c| c.hogwarts_staff)
            .count(),
    }
}

thread_local! {
    static COLLATOR: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            log::warn!("collator unavailable, sorting by case-folded text: {}", err);
            None
        }
    }
}

/// Compare two strings with the root locale collation: accents and case
/// only break ties between otherwise equal letters, and lower case sorts
/// before upper case.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => folded_cmp(a, b),
    })
}

fn folded_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

fn house_cmp(a: &Character, b: &Character) -> Ordering {
    match (&a.house, &b.house) {
        (Some(x), Some(y)) => locale_cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::{fixture, rstest};

    fn character(
        name: &str,
        house: Option<&str>,
        alive: bool,
        wizard: bool,
    ) -> Character {
        Character {
            id: data_character::derive_id(name),
            name: name.to_owned(),
            image: None,
            species: "human".to_owned(),
            house: house.map(str::to_owned),
            actor: None,
            wand: None,
            alive: Some(alive),
            wizard: Some(wizard),
            hogwarts_student: false,
            hogwarts_staff: false,
        }
    }

    #[fixture]
    fn trio() -> Vec<Character> {
        vec![
            character("Harry Potter", Some("Gryffindor"), true, true),
            character("Draco Malfoy", Some("Slytherin"), true, true),
            character("Moaning Myrtle", None, false, true),
        ]
    }

    fn names(characters: &[&Character]) -> Vec<String> {
        characters.iter().map(|c| c.name.clone()).collect()
    }

    #[rstest]
    fn alive_sorted_by_name(trio: Vec<Character>) {
        let criteria = Criteria::default()
            .only_alive()
            .sorted_by(SortBy::Name);
        assert_eq!(
            names(&apply(&trio, &criteria)),
            vec!["Draco Malfoy", "Harry Potter"]
        );
    }

    #[rstest]
    fn houses_are_counted_over_the_whole_list(trio: Vec<Character>) {
        let counts = count_by_house(&trio);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("Gryffindor"), Some(&1));
        assert_eq!(counts.get("Slytherin"), Some(&1));
    }

    #[rstest]
    #[case("potter", vec!["Harry Potter"])]
    #[case("MY", vec!["Moaning Myrtle"])]
    #[case("o", vec!["Draco Malfoy", "Harry Potter", "Moaning Myrtle"])]
    #[case("hermione", vec![])]
    fn search_is_case_insensitive(
        trio: Vec<Character>,
        #[case] term: &str,
        #[case] expected: Vec<&str>,
    ) {
        let criteria = Criteria::default()
            .with_search(term)
            .sorted_by(SortBy::Name);
        assert_eq!(names(&apply(&trio, &criteria)), expected);
    }

    #[rstest]
    fn house_filter_is_exact(trio: Vec<Character>) {
        let criteria = Criteria::default().with_house("Slytherin");
        assert_eq!(names(&apply(&trio, &criteria)), vec!["Draco Malfoy"]);

        let criteria = Criteria::default().with_house("slytherin");
        assert!(apply(&trio, &criteria).is_empty());
    }

    #[rstest]
    fn unsorted_keeps_source_order(trio: Vec<Character>) {
        let criteria = Criteria::default();
        assert_eq!(
            names(&apply(&trio, &criteria)),
            vec!["Harry Potter", "Draco Malfoy", "Moaning Myrtle"]
        );
    }

    #[test]
    fn houseless_characters_sort_last() {
        let characters = vec![
            character("Aragog", None, true, false),
            character("Zacharias Smith", Some("Hufflepuff"), true, true),
            character("Peeves", None, true, false),
            character("Cho Chang", Some("Ravenclaw"), true, true),
            character("Blaise Zabini", Some("Slytherin"), true, true),
            character("Albus Dumbledore", Some("Gryffindor"), false, true),
        ];
        let criteria = Criteria::default().sorted_by(SortBy::House);
        assert_eq!(
            names(&apply(&characters, &criteria)),
            vec![
                "Albus Dumbledore",
                "Zacharias Smith",
                "Cho Chang",
                "Blaise Zabini",
                "Aragog",
                "Peeves",
            ]
        );
    }

    #[test]
    fn filters_combine() {
        let characters = vec![
            character("Harry Potter", Some("Gryffindor"), true, true),
            character("Lily Potter", Some("Gryffindor"), false, true),
            character("Dudley Dursley", None, true, false),
            character("Hedwig", None, false, false),
        ];
        let criteria = Criteria::default()
            .only_alive()
            .only_wizards()
            .with_search("potter");
        assert_eq!(names(&apply(&characters, &criteria)), vec!["Harry Potter"]);
    }

    #[rstest]
    fn favorites_follow_list_order(trio: Vec<Character>) {
        let ids = vec!["moaning-myrtle".to_owned(), "harry-potter".to_owned()];
        assert_eq!(
            names(&favorites(&trio, &ids)),
            vec!["Harry Potter", "Moaning Myrtle"]
        );
    }

    #[test]
    fn overview_counts_subsets() {
        let mut characters = vec![
            character("Harry Potter", Some("Gryffindor"), true, true),
            character("Ron Weasley", Some("Gryffindor"), true, true),
            character("Severus Snape", Some("Slytherin"), false, true),
        ];
        characters[0].hogwarts_student = true;
        characters[1].hogwarts_student = true;
        characters[2].hogwarts_staff = true;

        assert_eq!(
            overview(&characters),
            Overview {
                characters: 3,
                students: 2,
                staff: 1
            }
        );
    }

    #[rstest]
    #[case("a", "B", Ordering::Less)]
    #[case("b", "A", Ordering::Greater)]
    #[case("a", "A", Ordering::Less)]
    #[case("Harry", "harry", Ordering::Greater)]
    #[case("same", "same", Ordering::Equal)]
    #[case("Émile", "Fred", Ordering::Less)]
    #[case("Émile", "Dobby", Ordering::Greater)]
    #[case("emile", "émile", Ordering::Less)]
    fn locale_comparison(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(locale_cmp(a, b), expected);
    }

    #[test]
    fn accented_names_sort_among_plain_ones() {
        let characters = vec![
            character("Zacharias Smith", Some("Hufflepuff"), true, true),
            character("Éloïse Midgen", Some("Hufflepuff"), true, true),
            character("Fleur Delacour", None, true, true),
            character("Dean Thomas", Some("Gryffindor"), true, true),
        ];
        let criteria = Criteria::default().sorted_by(SortBy::Name);
        assert_eq!(
            names(&apply(&characters, &criteria)),
            vec![
                "Dean Thomas",
                "Éloïse Midgen",
                "Fleur Delacour",
                "Zacharias Smith",
            ]
        );
    }

    #[quickcheck]
    fn prop_apply_is_repeatable(
        names: Vec<String>,
        houses: Vec<bool>,
        by_house: bool,
    ) -> bool {
        let characters: Vec<Character> = names
            .iter()
            .zip(houses.iter().chain(std::iter::repeat(&false)))
            .map(|(name, has_house)| {
                let house = if *has_house { Some("Ravenclaw") } else { None };
                character(name, house, true, true)
            })
            .collect();
        let criteria = Criteria::default().sorted_by(if by_house {
            SortBy::House
        } else {
            SortBy::Name
        });

        let first = apply(&characters, &criteria);
        let second = apply(&characters, &criteria);
        first == second
    }

    #[quickcheck]
    fn prop_houseless_after_housed(houses: Vec<bool>) -> bool {
        let characters: Vec<Character> = houses
            .iter()
            .enumerate()
            .map(|(i, has_house)| {
                let house = if *has_house { Some("Hufflepuff") } else { None };
                character(&format!("Character {}", i), house, true, true)
            })
            .collect();
        let criteria = Criteria::default().sorted_by(SortBy::House);
        let sorted = apply(&characters, &criteria);

        let first_houseless = sorted
            .iter()
            .position(|c| c.house.is_none())
            .unwrap_or(sorted.len());
        sorted[first_houseless..]
            .iter()
            .all(|c| c.house.is_none())
    }
}
