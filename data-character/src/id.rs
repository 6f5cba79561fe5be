/// Identifier used when a display name yields an empty slug.
const UNNAMED_ID: &str = "unnamed";

/// Derive a slug from a display name.
///
/// The name is lower-cased and every run of whitespace is replaced by a
/// single `-`. Leading and trailing runs are kept as hyphens, so
/// `" Harry"` becomes `"-harry"`. Applying the function to its own output
/// returns the same string.
///
/// Two distinct names may produce the same slug (e.g. `"Harry Potter"`
/// and `"harry  potter"`); callers should not rely on slugs being unique.
pub fn derive_id(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    if slug.is_empty() {
        return UNNAMED_ID.to_owned();
    }
    slug
}

/// Resolve the identifier of a record.
///
/// An explicit upstream identifier is used verbatim when it is non-empty,
/// otherwise the identifier is derived from the display name.
pub fn character_id(explicit: Option<&str>, name: &str) -> String {
    match explicit {
        Some(id) if !id.is_empty() => id.to_owned(),
        _ => derive_id(name),
    }
}

/// Up to two upper-cased initials of a display name, e.g. `"HP"`.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
