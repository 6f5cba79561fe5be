use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::id::character_id;

/// The fixed set of houses a character may belong to.
pub const HOUSES: [&str; 4] = ["Gryffindor", "Slytherin", "Hufflepuff", "Ravenclaw"];

/// Summary record of a character as returned by the list endpoints.
///
/// The upstream API encodes missing values as empty strings, these are
/// read as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(default)]
    pub species: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub house: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub actor: Option<String>,
    #[serde(
        default,
        deserialize_with = "wand_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub wand: Option<Wand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wizard: Option<bool>,
    #[serde(default)]
    pub hogwarts_student: bool,
    #[serde(default)]
    pub hogwarts_staff: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Wand {
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub wood: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub core: Option<String>,
    #[serde(
        default,
        deserialize_with = "length_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub length: Option<String>,
}

impl Wand {
    pub fn is_empty(&self) -> bool {
        self.wood.is_none() && self.core.is_none() && self.length.is_none()
    }
}

/// A character with the extended attributes of the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetail {
    #[serde(flatten)]
    pub character: Character,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub ancestry: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub eye_colour: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub hair_colour: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub patronus: Option<String>,
    #[serde(rename = "alternate_names", default)]
    pub alternate_names: Vec<String>,
}

impl Character {
    /// Replace the identifier with the resolved one: the upstream id when
    /// present, otherwise the slug of the name.
    pub fn with_derived_id(mut self) -> Self {
        self.id = character_id(Some(self.id.as_str()), &self.name);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.alive == Some(true)
    }

    pub fn is_wizard(&self) -> bool {
        self.wizard == Some(true)
    }
}

impl CharacterDetail {
    pub fn with_derived_id(mut self) -> Self {
        self.character = self.character.with_derived_id();
        self
    }

    pub fn id(&self) -> &str {
        &self.character.id
    }
}

impl AsRef<Character> for CharacterDetail {
    fn as_ref(&self) -> &Character {
        &self.character
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// Wand length comes as a number, an empty string or null.
fn length_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn wand_or_none<'de, D>(deserializer: D) -> Result<Option<Wand>, D::Error>
where
    D: Deserializer<'de>,
{
    let wand = Option::<Wand>::deserialize(deserializer)?;
    Ok(wand.filter(|w| !w.is_empty()))
}
