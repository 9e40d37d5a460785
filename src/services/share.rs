use urlencoding::encode;

use crate::models::Platform;

/// What a share action does before (or instead of) opening the browser.
///
/// LinkedIn's share-offsite intent and Facebook's sharer both ignore or
/// limit prefilled text, so those flows copy the post to the clipboard
/// before navigating; if the copy fails, navigation must not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePolicy {
    NavigateOnly,
    CopyThenNavigate,
}

impl SharePolicy {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Twitter | Platform::Threads => SharePolicy::NavigateOnly,
            Platform::LinkedIn | Platform::Facebook => SharePolicy::CopyThenNavigate,
        }
    }
}

/// Builds the external share URL for a platform. Pure string construction;
/// the caller decides whether a clipboard copy must precede navigation
/// (see `SharePolicy`).
pub fn share_url(platform: Platform, article_url: &str, text: &str) -> String {
    match platform {
        Platform::Twitter => format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            encode(text),
            encode(article_url)
        ),
        Platform::Facebook => format!(
            "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
            encode(article_url),
            encode(text)
        ),
        // The share-offsite intent does not accept prefilled text; only the
        // article URL goes in.
        Platform::LinkedIn => format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}",
            encode(article_url)
        ),
        Platform::Threads => {
            let combined = format!("{text}\n\n{article_url}");
            format!(
                "https://www.threads.net/intent/post?text={}",
                encode(&combined)
            )
        }
    }
}
