//! Console-backed info panel

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::SessionResult;
use crate::traits::InfoPanel;

/// Info panel that prints to the console and keeps the current content,
/// mirroring the replace/append behavior of the original page's panel
pub struct ConsolePanel {
    content: Arc<RwLock<String>>,
}

impl ConsolePanel {
    pub fn new() -> Self {
        Self {
            content: Arc::new(RwLock::new(String::new())),
        }
    }

    /// Current panel content
    pub async fn content(&self) -> String {
        self.content.read().await.clone()
    }
}

impl Default for ConsolePanel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfoPanel for ConsolePanel {
    async fn show(&self, text: &str) -> SessionResult<()> {
        *self.content.write().await = text.to_string();
        println!("📊 {text}");
        Ok(())
    }

    async fn append(&self, text: &str) -> SessionResult<()> {
        let mut content = self.content.write().await;
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(text);
        println!("📊 {text}");
        Ok(())
    }

    async fn alert(&self, text: &str) -> SessionResult<()> {
        println!("⚠️  {text}");
        Ok(())
    }
}
