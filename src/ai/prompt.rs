use crate::models::{Article, Platform};

/// Builds the generation instruction for one article/platform pair.
///
/// The prompt always carries the title, carries the summary only when one is
/// present, and never contains the article URL: the share step appends the
/// URL itself, so the generator is told explicitly not to produce one.
pub fn build_prompt(article: &Article, platform: Platform) -> String {
    let summary_line = article
        .summary
        .as_deref()
        .map(|summary| format!("- Summary: {summary}\n"))
        .unwrap_or_default();

    format!(
        "You are a social media marketing expert specializing in promoting \
         AI-focused blog content.\n\
         Your task is to generate a compelling social media post for {platform}.\n\
         \n\
         Article details:\n\
         - Title: {title}\n\
         {summary_line}\
         \n\
         Instructions:\n\
         1. Create a post that accurately reflects the article's content and \
         entices users to click the link.\n\
         2. Adhere to the following platform-specific guidelines: {guidance}\n\
         3. DO NOT include the article URL in your response. The URL will be \
         appended automatically.\n\
         4. Your response must be only the text content for the social media \
         post. Do not add any preamble like \"Here is the post:\".",
        platform = platform.label(),
        title = article.title,
        summary_line = summary_line,
        guidance = platform.guidance(),
    )
}
