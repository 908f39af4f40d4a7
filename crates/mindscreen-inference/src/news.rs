//! Mental-health news feed.
//!
//! Fetches recent articles from a NewsAPI-compatible search endpoint and
//! keeps only those whose title or description mentions a mental-health
//! topic.

use std::future::Future;

use mindscreen_core::models::news::{Article, ArticleSource, NewsResponse};
use tracing::{info, warn};

use crate::client::HttpClient;
use crate::error::InferenceError;

pub const DEFAULT_NEWS_URL: &str = "https://newsapi.org/v2/everything";
pub const SEARCH_QUERY: &str = "mental health OR anxiety OR depression";
pub const MAX_ARTICLES: usize = 10;

pub const KEYWORDS: [&str; 22] = [
    "mental health",
    "depression",
    "anxiety",
    "therapy",
    "psychological",
    "psychiatry",
    "wellness",
    "stress",
    "trauma",
    "counseling",
    "mindfulness",
    "suicide",
    "bipolar",
    "schizophrenia",
    "ptsd",
    "eating disorder",
    "addiction",
    "self-care",
    "meditation",
    "emotional",
    "behavioral",
    "cognitive",
];

pub trait NewsSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Article>, InferenceError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpNewsSource {
    client: HttpClient,
    url: String,
    api_key: Option<String>,
}

impl HttpNewsSource {
    pub fn new(client: HttpClient, url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            url: url.to_string(),
            api_key,
        }
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("q".to_string(), SEARCH_QUERY.to_string()),
            ("language".to_string(), "en".to_string()),
            ("sortBy".to_string(), "publishedAt".to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("apiKey".to_string(), key.clone()));
        }
        query
    }
}

impl NewsSource for HttpNewsSource {
    async fn fetch(&self) -> Result<Vec<Article>, InferenceError> {
        let text = self.client.get(&self.url, self.query()).await?;
        let response: NewsResponse = serde_json::from_str(&text)
            .map_err(|e| InferenceError::malformed(&self.url, e.to_string()))?;
        info!(count = response.articles.len(), "news articles fetched");
        Ok(response.articles)
    }
}

pub fn is_mental_health_article(article: &Article) -> bool {
    let text = article.search_text();
    KEYWORDS.iter().any(|k| text.contains(k))
}

/// Keep relevant articles, at most [`MAX_ARTICLES`].
pub fn filter_articles(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .filter(is_mental_health_article)
        .take(MAX_ARTICLES)
        .collect()
}

/// Fetch and filter the feed, falling back to the bundled sample articles
/// (filtered the same way) when the source is unavailable.
pub async fn headlines<S: NewsSource>(source: &S) -> Vec<Article> {
    match source.fetch().await {
        Ok(articles) => filter_articles(articles),
        Err(e) => {
            warn!(error = %e, "failed to load news articles, using samples");
            filter_articles(sample_articles())
        }
    }
}

/// Articles shown when the feed cannot be reached.
pub fn sample_articles() -> Vec<Article> {
    let sample = |source: &str, author: &str, title: &str, description: &str, url: &str, at: &str| {
        Article {
            title: title.to_string(),
            description: Some(description.to_string()),
            source: ArticleSource {
                name: Some(source.to_string()),
            },
            author: Some(author.to_string()),
            url: url.to_string(),
            url_to_image: None,
            published_at: at.parse().ok(),
        }
    };

    vec![
        sample(
            "Psychology Today",
            "Allan E. Barsky PhD, MSW, JD",
            "End-of-Life Discussions and Planning for a Good Death",
            "For many people, the topic of death brings up a lot of \"bad stuff.\" But what if \
             there was a way to discuss death in a good way. What would that conversation look like?",
            "https://www.psychologytoday.com/us/blog/agens-scientiam/202508/end-of-life-discussions-and-planning-for-a-good-death",
            "2025-08-01T20:55:25Z",
        ),
        sample(
            "Medical Daily",
            "Matt Emma",
            "The Mental Health Impact Of Major Life Transitions",
            "Life has its fair share of challenges. Even the happiest moments of life, celebrating \
             a new job or becoming a parent, can be difficult.",
            "https://www.medicaldaily.com/mental-health-impact-major-life-transitions-473730",
            "2025-08-01T19:52:27Z",
        ),
        sample(
            "GMA",
            "Yi-jin Yu",
            "Illinois becomes 1st state to require student mental health screenings",
            "Students in Illinois will soon have to get mental health screenings alongside annual \
             vision and hearing exams.",
            "https://www.goodmorningamerica.com/wellness/story/illinois-1st-state-require-student-mental-health-screenings-124275407",
            "2025-08-01T18:40:53Z",
        ),
    ]
}
