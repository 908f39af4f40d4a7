use mindscreen_inference::client::HttpClient;
use mindscreen_inference::news::HttpNewsSource;
use mindscreen_inference::predict::HttpPredictor;
use mindscreen_inference::recommend::HttpTextGenerator;

use crate::config::MindscreenConfig;

/// Collaborators built once from the effective config.
pub struct AppState {
    pub predictor: HttpPredictor,
    pub generator: HttpTextGenerator,
    pub news: HttpNewsSource,
}

impl AppState {
    pub fn new(config: MindscreenConfig) -> Self {
        let client = HttpClient::new(&config.predictor_base_url, config.timeout());
        let news = HttpNewsSource::new(client.clone(), &config.news_url, config.news_api_key.clone());

        tracing::debug!(
            predictor = client.base_url(),
            timeout_secs = config.timeout_secs,
            "collaborators ready"
        );

        Self {
            predictor: HttpPredictor::new(client.clone()),
            generator: HttpTextGenerator::new(client),
            news,
        }
    }
}
