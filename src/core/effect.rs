use crate::core::Event;
use crate::domain::ports::FortuneApi;
use crate::utils::error::FetchError;

/// 由 reducer 產生、在 reducer 之外執行的副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchFortune,
    SubmitFortune(String),
}

/// 執行副作用，並把結果轉成完成事件
pub async fn perform<A: FortuneApi + ?Sized>(effect: Effect, api: &A) -> Event {
    match effect {
        Effect::FetchFortune => match api.fetch_fortune().await {
            Ok(text) => Event::FetchSucceeded(text),
            Err(e) => Event::FetchFailed(e),
        },
        Effect::SubmitFortune(text) => match api.submit_fortune(&text).await {
            Ok(text) => Event::SubmitSucceeded(text),
            Err(e) => Event::SubmitFailed(e),
        },
    }
}

/// 副作用沒有正常完成（例如 task panic）時的失敗事件
pub fn aborted(effect: &Effect, reason: String) -> Event {
    let error = FetchError::Aborted { reason };
    match effect {
        Effect::FetchFortune => Event::FetchFailed(error),
        Effect::SubmitFortune(_) => Event::SubmitFailed(error),
    }
}
