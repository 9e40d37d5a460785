use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::ai::PostGenerator;
use crate::config::Config;
use crate::error::Result;
use crate::models::{Article, Platform};
use crate::services::{self, ClipboardSink, SharePolicy, SystemClipboard};
use crate::tracker::{GenerationState, GenerationStatus, GenerationTracker};
use crate::tui::AppAction;

/// How long the "Copied!" acknowledgement stays up before reverting.
const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

// Message for a completed generation call
pub struct GenerationOutcome {
    pub key: String,
    pub seq: u64,
    pub result: std::result::Result<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathInputKind {
    LoadBatch,
    AttachImage,
}

pub struct App {
    // Data
    pub articles: Vec<Article>,
    pub tracker: GenerationTracker,

    // UI State
    pub selected_index: usize,
    pub show_help: bool,
    pub path_input: String,
    pub path_input_kind: Option<PathInputKind>,
    pub inline_error: Option<String>,
    copied: Option<(String, Instant)>,

    // Async state
    outcome_rx: mpsc::Receiver<GenerationOutcome>,
    outcome_tx: mpsc::Sender<GenerationOutcome>,

    // Services
    generator: Arc<PostGenerator>,
    clipboard: Box<dyn ClipboardSink>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_clipboard(config, Box::new(SystemClipboard::new()))
    }

    pub fn with_clipboard(config: &Config, clipboard: Box<dyn ClipboardSink>) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let generator = Arc::new(PostGenerator::new(api_key));

        let (outcome_tx, outcome_rx) = mpsc::channel(16);

        Ok(Self {
            articles: Vec::new(),
            tracker: GenerationTracker::new(),
            selected_index: 0,
            show_help: false,
            path_input: String::new(),
            path_input_kind: None,
            inline_error: None,
            copied: None,
            outcome_rx,
            outcome_tx,
            generator,
            clipboard,
        })
    }

    pub fn path_input_active(&self) -> bool {
        self.path_input_kind.is_some()
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected_index)
    }

    pub fn selected_state(&self) -> Option<&GenerationState> {
        self.selected_article()
            .and_then(|article| self.tracker.state(&article.url))
    }

    /// Whether the copy acknowledgement is currently showing for `key`.
    pub fn copied_active(&self, key: &str) -> bool {
        matches!(&self.copied, Some((copied_key, _)) if copied_key == key)
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::MoveUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }

            AppAction::MoveDown => {
                if !self.articles.is_empty() && self.selected_index < self.articles.len() - 1 {
                    self.selected_index += 1;
                }
            }

            AppAction::NextPlatform => {
                if let Some(platform) = self.selected_state().map(|s| s.platform.next()) {
                    self.select_platform(platform);
                }
            }

            AppAction::PrevPlatform => {
                if let Some(platform) = self.selected_state().map(|s| s.platform.prev()) {
                    self.select_platform(platform);
                }
            }

            AppAction::SelectPlatform(platform) => {
                self.select_platform(platform);
            }

            AppAction::Generate => {
                self.start_generation_for_selected();
            }

            AppAction::CopyText => {
                if let Err(e) = self.copy_generated() {
                    self.inline_error = Some(e.to_string());
                }
            }

            AppAction::Share => {
                if let Err(e) = self.share_selected() {
                    self.inline_error = Some(e.to_string());
                }
            }

            AppAction::RemoveArticle => {
                self.remove_selected();
            }

            AppAction::ClearBatch => {
                self.articles.clear();
                self.tracker.clear();
                self.selected_index = 0;
                self.inline_error = None;
                self.copied = None;
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::LoadFileStart => {
                self.path_input_kind = Some(PathInputKind::LoadBatch);
                self.path_input.clear();
            }

            AppAction::AttachImageStart => {
                if self.selected_article().is_some() {
                    self.path_input_kind = Some(PathInputKind::AttachImage);
                    self.path_input.clear();
                }
            }

            AppAction::PathInputChar(c) => {
                self.path_input.push(c);
            }

            AppAction::PathInputBackspace => {
                self.path_input.pop();
            }

            AppAction::PathInputConfirm => {
                let kind = self.path_input_kind.take();
                let path = PathBuf::from(self.path_input.trim());
                self.path_input.clear();

                let result = match kind {
                    Some(PathInputKind::LoadBatch) => self.load_batch(&path).await,
                    Some(PathInputKind::AttachImage) => self.attach_image(&path).await,
                    None => Ok(()),
                };
                if let Err(e) = result {
                    self.inline_error = Some(e.to_string());
                }
            }

            AppAction::PathInputCancel => {
                self.path_input_kind = None;
                self.path_input.clear();
            }
        }

        Ok(false)
    }

    /// Replaces the current batch with the contents of a JSON file.
    /// Validation failure rejects the whole file and keeps the old batch.
    pub async fn load_batch(&mut self, path: &std::path::Path) -> Result<()> {
        let articles = services::load_articles(path).await?;

        self.tracker.clear();
        for article in &articles {
            self.tracker.insert(&article.url);
        }
        self.articles = articles;
        self.selected_index = 0;
        self.inline_error = None;
        self.copied = None;

        Ok(())
    }

    /// Attaches a cover image to the selected article. A read failure leaves
    /// the article's JSON-derived fields untouched.
    async fn attach_image(&mut self, path: &std::path::Path) -> Result<()> {
        if self.selected_article().is_none() {
            return Ok(());
        }

        let encoded = services::read_image_base64(path).await?;
        let updated = self.articles[self.selected_index].with_embedded_image(encoded);
        self.articles[self.selected_index] = updated;
        self.inline_error = None;

        Ok(())
    }

    fn select_platform(&mut self, platform: Platform) {
        if let Some(article) = self.selected_article() {
            let key = article.url.clone();
            self.tracker.select_platform(&key, platform);
        }
    }

    /// Issues a generation request for the selected article on its chosen
    /// platform. A request issued while another is in flight supersedes it;
    /// the tracker discards the earlier call's outcome when it lands.
    fn start_generation_for_selected(&mut self) {
        let Some(article) = self.selected_article().cloned() else {
            return;
        };
        let Some(state) = self.tracker.state(&article.url) else {
            return;
        };

        let platform = state.platform;
        let key = article.url.clone();
        let seq = self.tracker.start_generation(&key, platform);
        self.inline_error = None;

        let generator = Arc::clone(&self.generator);
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = generator
                .generate(&article, platform)
                .await
                .map_err(|e| e.to_string());

            let _ = tx.send(GenerationOutcome { key, seq, result }).await;
        });
    }

    /// Poll for completed generation outcomes (non-blocking). Stale outcomes
    /// from superseded requests are dropped by the tracker.
    pub fn poll_generation_outcome(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            let applied = match outcome.result {
                Ok(text) => self.tracker.on_success(&outcome.key, outcome.seq, text),
                Err(message) => self.tracker.on_failure(&outcome.key, outcome.seq, message),
            };

            if !applied {
                tracing::debug!("Discarded stale generation outcome for {}", outcome.key);
            }
        }
    }

    /// Copies the generated text for the selected article and raises the
    /// transient acknowledgement.
    fn copy_generated(&mut self) -> Result<()> {
        let Some((key, text)) = self.generated_text() else {
            return Ok(());
        };

        self.clipboard.write_text(&text)?;
        self.copied = Some((key, Instant::now()));
        Ok(())
    }

    /// Opens the platform share URL in the browser. LinkedIn and Facebook
    /// copy the text to the clipboard first; if that write fails, the
    /// navigation does not happen.
    fn share_selected(&mut self) -> Result<()> {
        let Some((key, text)) = self.generated_text() else {
            return Ok(());
        };
        let Some(state) = self.tracker.state(&key) else {
            return Ok(());
        };

        let platform = state.platform;
        let url = services::share_url(platform, &key, &text);

        if SharePolicy::for_platform(platform) == SharePolicy::CopyThenNavigate {
            self.clipboard.write_text(&text)?;
            self.copied = Some((key, Instant::now()));
        }

        open::that(&url)?;
        Ok(())
    }

    fn generated_text(&self) -> Option<(String, String)> {
        let article = self.selected_article()?;
        let state = self.tracker.state(&article.url)?;
        if state.status != GenerationStatus::Succeeded {
            return None;
        }
        let text = state.result_text.clone()?;
        Some((article.url.clone(), text))
    }

    fn remove_selected(&mut self) {
        if self.selected_index >= self.articles.len() {
            return;
        }

        let removed = self.articles.remove(self.selected_index);
        self.tracker.remove(&removed.url);

        if self.selected_index >= self.articles.len() && self.selected_index > 0 {
            self.selected_index -= 1;
        }
        if self.copied_active(&removed.url) {
            self.copied = None;
        }
    }

    /// Expires the copy acknowledgement once its window has elapsed.
    /// Called on every loop tick; no user action required.
    pub fn tick(&mut self) {
        if let Some((_, copied_at)) = &self.copied {
            if copied_at.elapsed() >= COPY_ACK_WINDOW {
                self.copied = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clipboard::testing::MockClipboard;
    use serde_json::json;

    fn test_app() -> App {
        let config = Config {
            gemini_api_key: Some("test-key".to_string()),
        };
        App::with_clipboard(&config, Box::<MockClipboard>::default()).unwrap()
    }

    fn seed_batch(app: &mut App) {
        let value = json!([
            {"title": "AI Trends", "url": "https://ex.com/a"},
            {"title": "Rust Notes", "url": "https://ex.com/b"},
        ]);
        let articles = Article::batch_from_value(&value).unwrap();
        for article in &articles {
            app.tracker.insert(&article.url);
        }
        app.articles = articles;
    }

    #[tokio::test]
    async fn missing_api_key_refuses_construction() {
        let config = Config {
            gemini_api_key: None,
        };
        assert!(App::with_clipboard(&config, Box::<MockClipboard>::default()).is_err());
    }

    #[tokio::test]
    async fn platform_selection_does_not_trigger_generation() {
        let mut app = test_app();
        seed_batch(&mut app);

        app.handle_action(AppAction::SelectPlatform(Platform::Threads))
            .await
            .unwrap();

        let state = app.selected_state().unwrap();
        assert_eq!(state.platform, Platform::Threads);
        assert_eq!(state.status, GenerationStatus::Idle);
    }

    #[tokio::test]
    async fn superseded_outcome_never_lands_in_state() {
        let mut app = test_app();
        seed_batch(&mut app);

        let key = "https://ex.com/a".to_string();
        let first = app.tracker.start_generation(&key, Platform::Twitter);
        let second = app.tracker.start_generation(&key, Platform::LinkedIn);

        // First call resolves after being superseded: discarded.
        app.outcome_tx
            .try_send(GenerationOutcome {
                key: key.clone(),
                seq: first,
                result: Ok("twitter post".to_string()),
            })
            .unwrap();
        app.poll_generation_outcome();
        assert_eq!(
            app.tracker.state(&key).unwrap().status,
            GenerationStatus::InFlight
        );

        app.outcome_tx
            .try_send(GenerationOutcome {
                key: key.clone(),
                seq: second,
                result: Ok("linkedin post".to_string()),
            })
            .unwrap();
        app.poll_generation_outcome();

        let state = app.tracker.state(&key).unwrap();
        assert_eq!(state.status, GenerationStatus::Succeeded);
        assert_eq!(state.result_text.as_deref(), Some("linkedin post"));
    }

    #[tokio::test]
    async fn copy_raises_acknowledgement_that_expires() {
        let mut app = test_app();
        seed_batch(&mut app);

        let key = "https://ex.com/a".to_string();
        let seq = app.tracker.start_generation(&key, Platform::Twitter);
        assert!(app.tracker.on_success(&key, seq, "post text".to_string()));

        app.handle_action(AppAction::CopyText).await.unwrap();
        assert!(app.copied_active(&key));

        // Within the window the acknowledgement stays.
        app.tick();
        assert!(app.copied_active(&key));

        // Backdate past the window; the next tick reverts it.
        app.copied = Some((key.clone(), Instant::now() - COPY_ACK_WINDOW * 2));
        app.tick();
        assert!(!app.copied_active(&key));
    }

    #[tokio::test]
    async fn failed_clipboard_blocks_share_navigation() {
        let mut app = test_app();
        seed_batch(&mut app);
        app.clipboard = Box::new(MockClipboard {
            fail: true,
            ..Default::default()
        });

        let key = "https://ex.com/a".to_string();
        app.tracker.select_platform(&key, Platform::LinkedIn);
        let seq = app.tracker.start_generation(&key, Platform::LinkedIn);
        assert!(app.tracker.on_success(&key, seq, "post text".to_string()));

        // Clipboard write fails, so share_selected errors out before it
        // would have opened the browser.
        app.handle_action(AppAction::Share).await.unwrap();
        assert!(app.inline_error.as_deref().unwrap_or("").contains("Clipboard"));
        assert!(!app.copied_active(&key));
    }

    #[tokio::test]
    async fn twitter_flow_from_json_to_share_url() {
        let mut app = test_app();

        let value = json!({"title": "AI Trends", "url": "https://ex.com/a"});
        let articles = Article::batch_from_value(&value).unwrap();
        for article in &articles {
            app.tracker.insert(&article.url);
        }
        app.articles = articles;

        let prompt = crate::ai::build_prompt(&app.articles[0], Platform::Twitter);
        assert!(prompt.contains("AI Trends"));
        assert!(!prompt.contains("Summary:"));

        let key = "https://ex.com/a".to_string();
        let seq = app.tracker.start_generation(&key, Platform::Twitter);
        assert!(app
            .tracker
            .on_success(&key, seq, "Check this out! #AI #Trends".to_string()));

        let (article_url, text) = app.generated_text().unwrap();
        let url = services::share_url(Platform::Twitter, &article_url, &text);
        assert_eq!(
            url,
            "https://twitter.com/intent/tweet?text=Check%20this%20out%21%20%23AI%20%23Trends&url=https%3A%2F%2Fex.com%2Fa"
        );
    }

    #[tokio::test]
    async fn removing_an_article_drops_its_state_only() {
        let mut app = test_app();
        seed_batch(&mut app);

        let other = "https://ex.com/b".to_string();
        let seq = app.tracker.start_generation(&other, Platform::Twitter);
        assert!(app.tracker.on_success(&other, seq, "kept".to_string()));

        app.handle_action(AppAction::RemoveArticle).await.unwrap();

        assert_eq!(app.articles.len(), 1);
        assert!(app.tracker.state("https://ex.com/a").is_none());
        let kept = app.tracker.state(&other).unwrap();
        assert_eq!(kept.result_text.as_deref(), Some("kept"));
    }
}
