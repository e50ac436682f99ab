pub mod effect;
pub mod event;
pub mod reducer;
pub mod runtime;
pub mod view;

pub use crate::domain::model::FortuneState;
pub use crate::domain::ports::{ConfigProvider, FortuneApi};
pub use crate::utils::error::{FetchError, Result};
pub use effect::Effect;
pub use event::Event;
pub use runtime::Runtime;
