/// Everything the mock endpoint can find.
pub const FRUITS: &[&str] = &[
    "apple",
    "apricot",
    "avocado",
    "banana",
    "blackberry",
    "blueberry",
    "cantaloupe",
    "cherry",
    "coconut",
    "cranberry",
    "date",
    "dragonfruit",
    "durian",
    "elderberry",
    "fig",
    "grape",
    "grapefruit",
    "guava",
    "honeydew",
    "jackfruit",
    "kiwi",
    "kumquat",
    "lemon",
    "lime",
    "lychee",
    "mango",
    "mulberry",
    "nectarine",
    "orange",
    "papaya",
    "passionfruit",
    "peach",
    "pear",
    "persimmon",
    "pineapple",
    "plum",
    "pomegranate",
    "quince",
    "raspberry",
    "starfruit",
    "strawberry",
    "tangerine",
    "watermelon",
];

/// Fruits starting with `query`, ignoring case, in list order.
///
/// A blank query matches nothing.
pub fn matching(query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    FRUITS
        .iter()
        .filter(|fruit| fruit.starts_with(&needle))
        .map(|fruit| (*fruit).to_string())
        .collect()
}
