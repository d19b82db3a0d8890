use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

pub mod openai_chat;

pub use openai_chat::OpenAIChatProvider;

pub trait SummaryProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    fn summarize<'a>(
        &'a self,
        transcript: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
}
