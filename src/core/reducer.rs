use crate::core::{Effect, Event};
use crate::domain::model::FortuneState;

/// 元件建立時的初始狀態與掛載時要執行一次的副作用
pub fn init() -> (FortuneState, Vec<Effect>) {
    (FortuneState::default(), vec![Effect::FetchFortune])
}

/// 純狀態轉移，不做 I/O
pub fn update(state: &mut FortuneState, event: Event) -> Option<Effect> {
    match event {
        Event::FetchRequested => Some(Effect::FetchFortune),
        Event::FetchSucceeded(text) => {
            state.current_fortune = text;
            None
        }
        Event::DraftChanged(text) => {
            state.draft = text;
            None
        }
        Event::SubmitRequested => Some(Effect::SubmitFortune(state.draft.clone())),
        Event::SubmitSucceeded(text) => {
            state.current_fortune = text;
            state.draft.clear();
            None
        }
        // 失敗不改變狀態（草稿也保留）
        Event::FetchFailed(_) | Event::SubmitFailed(_) => None,
    }
}
