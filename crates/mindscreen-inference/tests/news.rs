use mindscreen_core::models::news::{Article, ArticleSource, NewsResponse};
use mindscreen_inference::error::InferenceError;
use mindscreen_inference::news::{
    MAX_ARTICLES, NewsSource, filter_articles, headlines, is_mental_health_article,
    sample_articles,
};

fn article(title: &str, description: Option<&str>) -> Article {
    Article {
        title: title.to_string(),
        description: description.map(str::to_string),
        source: ArticleSource::default(),
        author: None,
        url: "https://example.org/a".to_string(),
        url_to_image: None,
        published_at: None,
    }
}

struct Fixed(Vec<Article>);

impl NewsSource for Fixed {
    async fn fetch(&self) -> Result<Vec<Article>, InferenceError> {
        Ok(self.0.clone())
    }
}

struct Unreachable;

impl NewsSource for Unreachable {
    async fn fetch(&self) -> Result<Vec<Article>, InferenceError> {
        Err(InferenceError::Status {
            endpoint: "https://newsapi.org/v2/everything".into(),
            status: 401,
            message: "apiKey missing".into(),
        })
    }
}

#[test]
fn keyword_match_is_case_insensitive() {
    assert!(is_mental_health_article(&article("New PTSD Treatment", None)));
    assert!(is_mental_health_article(&article(
        "Markets",
        Some("Traders report high Stress levels")
    )));
    assert!(!is_mental_health_article(&article("Football scores", Some("Weekend recap"))));
}

#[test]
fn filter_caps_results() {
    let articles = (0..25)
        .map(|i| article(&format!("Anxiety study {i}"), None))
        .collect();
    let kept = filter_articles(articles);
    assert_eq!(kept.len(), MAX_ARTICLES);
    assert_eq!(kept[0].title, "Anxiety study 0");
}

#[test]
fn sample_articles_parse_timestamps() {
    let samples = sample_articles();
    assert_eq!(samples.len(), 3);
    assert!(samples.iter().all(|a| a.published_at.is_some()));
    assert!(samples.iter().all(|a| a.source.name.is_some()));
}

#[test]
fn filter_drops_off_topic_samples() {
    let kept = filter_articles(sample_articles());
    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|a| a.title.contains("Mental Health") || a.title.contains("mental health")));
}

#[test]
fn news_response_tolerates_missing_fields() {
    let body = r#"{
        "status": "ok",
        "articles": [
            {"title": "Therapy access grows", "source": {"id": null, "name": "Wire"},
             "url": "https://example.org/t", "publishedAt": "2025-08-01T18:40:53Z"},
            {"title": "Untitled"}
        ]
    }"#;
    let response: NewsResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.articles.len(), 2);
    assert_eq!(response.articles[0].source.name.as_deref(), Some("Wire"));
    assert!(response.articles[1].description.is_none());
}

#[test]
fn news_response_tolerates_null_and_bad_values() {
    let body = r#"{
        "articles": [
            {"title": "Anxiety study", "url": "https://example.org/a",
             "source": null, "publishedAt": "last Tuesday"},
            {"title": null, "url": null, "description": "Removed", "publishedAt": 1722537653},
            42
        ]
    }"#;
    let response: NewsResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.articles.len(), 2);
    assert_eq!(response.articles[0].source, ArticleSource::default());
    assert!(response.articles[0].published_at.is_none());
    assert_eq!(response.articles[1].title, "");
    assert_eq!(response.articles[1].url, "");

    let kept = filter_articles(response.articles);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].title, "Anxiety study");
}

#[test]
fn news_response_tolerates_null_articles() {
    let response: NewsResponse = serde_json::from_str(r#"{"articles": null}"#).unwrap();
    assert!(response.articles.is_empty());
}

#[tokio::test]
async fn headlines_filters_live_results() {
    let source = Fixed(vec![
        article("Depression research", None),
        article("Stock tips", Some("Buy low")),
    ]);
    let items = headlines(&source).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Depression research");
}

#[tokio::test]
async fn headlines_fall_back_to_samples() {
    let items = headlines(&Unreachable).await;
    assert_eq!(items, filter_articles(sample_articles()));
}
