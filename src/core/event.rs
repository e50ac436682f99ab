use crate::utils::error::FetchError;

/// 所有會改變元件狀態的事件：使用者操作與網路回應
#[derive(Debug)]
pub enum Event {
    FetchRequested,
    FetchSucceeded(String),
    FetchFailed(FetchError),
    DraftChanged(String),
    SubmitRequested,
    SubmitSucceeded(String),
    SubmitFailed(FetchError),
}

impl Event {
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Event::FetchFailed(e) | Event::SubmitFailed(e) => Some(e),
            _ => None,
        }
    }
}
