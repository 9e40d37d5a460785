mod article;
mod platform;

pub use article::{Article, CoverImage};
pub use platform::Platform;
