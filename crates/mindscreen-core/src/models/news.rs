use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Response envelope of the news search endpoint.
///
/// Feeds are third-party data: `null` fields read as their defaults, and an
/// entry that still fails to parse is dropped instead of failing the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsResponse {
    #[serde(default, deserialize_with = "skip_bad_entries")]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: ArticleSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// `None` when missing or not an RFC 3339 timestamp.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<jiff::Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub name: Option<String>,
}

impl Article {
    /// Lower-cased title and description, the text keyword filters run on.
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Parsed(T),
    Unreadable(#[allow(dead_code)] IgnoredAny),
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<jiff::Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Lenient<String>>::deserialize(deserializer)? {
        Some(Lenient::Parsed(text)) => text.parse().ok(),
        _ => None,
    })
}

fn skip_bad_entries<'de, D>(deserializer: D) -> Result<Vec<Article>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Lenient<Article>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Lenient::Parsed(article) => Some(article),
            Lenient::Unreadable(_) => None,
        })
        .collect())
}
