use std::fmt;

pub const CHARACTERS_DOMAIN: &str = "characters";

/// List endpoints of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subset {
    All,
    Students,
    Staff,
}

impl Subset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subset::All => "all",
            Subset::Students => "students",
            Subset::Staff => "staff",
        }
    }
}

/// Key of a cache entry: `characters/all`, `characters/students`,
/// `characters/staff` or `characters/detail/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Characters(Subset),
    Detail(String),
}

impl QueryKey {
    pub fn all() -> Self {
        QueryKey::Characters(Subset::All)
    }

    pub fn students() -> Self {
        QueryKey::Characters(Subset::Students)
    }

    pub fn staff() -> Self {
        QueryKey::Characters(Subset::Staff)
    }

    pub fn detail(id: impl Into<String>) -> Self {
        QueryKey::Detail(id.into())
    }

    /// The ordered segments of the key.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            QueryKey::Characters(subset) => {
                vec![CHARACTERS_DOMAIN, subset.as_str()]
            }
            QueryKey::Detail(id) => vec![CHARACTERS_DOMAIN, "detail", id],
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join("/"))
    }
}
