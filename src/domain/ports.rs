use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::time::Duration;

/// 外部生成式文字服務（解卦）
#[async_trait]
pub trait InterpretationService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: InterpretationService + ?Sized> InterpretationService for Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt).await
    }
}

/// 重試之間的等待，測試時可替換成不真的睡眠的實作
pub trait Backoff: Send + Sync {
    fn wait(&self, delay: Duration) -> impl std::future::Future<Output = ()> + Send;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// 隨機起卦用的兩個種子數
pub trait SeedSource: Send + Sync {
    fn draw(&self) -> (i64, i64);
}
