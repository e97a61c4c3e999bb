//! Last-write-wins merge of frontmatter layers.

use serde_yaml::Value;

use super::Frontmatter;

/// Merge layers left to right. A key present in several layers takes the
/// value of the latest one; nested mappings are replaced, not combined.
/// A replaced key keeps the position where it first appeared.
pub fn merge_layers<I>(layers: I) -> Frontmatter
where
    I: IntoIterator<Item = Frontmatter>,
{
    layers.into_iter().fold(Frontmatter::new(), |mut merged, layer| {
        for (key, value) in layer {
            merged.insert(key, value);
        }
        merged
    })
}

/// Build a layer from string keys
pub fn layer<K, V, I>(entries: I) -> Frontmatter
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (Value::String(k.into()), v.into()))
        .collect()
}
