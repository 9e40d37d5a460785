use crate::error::{AppError, Result};

/// Write-only clipboard seam. The app depends on this trait so tests can
/// run headless with a recording implementation.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard. Constructed lazily so the app can
/// start on systems where no clipboard is available; the failure surfaces
/// on first copy instead.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }

        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| AppError::Clipboard("clipboard not initialized".to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}


#[cfg(test)]
pub mod testing {
    use super::*;

    /// Records writes; optionally fails every write to exercise the
    /// copy-before-navigate error path.
    #[derive(Default)]
    pub struct MockClipboard {
        pub writes: Vec<String>,
        pub fail: bool,
    }

    impl ClipboardSink for MockClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                return Err(AppError::Clipboard("denied".to_string()));
            }
            self.writes.push(text.to_string());
            Ok(())
        }
    }
}
