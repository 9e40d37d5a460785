pub mod clipboard;
mod ingest;
mod share;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use ingest::{load_articles, read_image_base64};
pub use share::{share_url, SharePolicy};
