use crate::core::Event;
use crate::domain::model::FortuneState;
use std::fmt;

pub const HEADING_PREFIX: &str = "Your Fortune: ";
pub const BUTTON_LABEL: &str = "Get another fortune";
pub const INPUT_LABEL: &str = "New Fortune:";
pub const SUBMIT_LABEL: &str = "Submit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub heading: Heading,
    pub button: Button,
    pub form: Form,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
}

impl Button {
    pub fn activate(&self) -> Event {
        Event::FetchRequested
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub label: String,
    pub input: TextInput,
    pub submit_label: String,
    /// 送出表單永遠不觸發頁面導覽
    pub prevents_default: bool,
}

impl Form {
    pub fn submit(&self) -> Event {
        Event::SubmitRequested
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
}

impl TextInput {
    pub fn change(&self, text: impl Into<String>) -> Event {
        Event::DraftChanged(text.into())
    }
}

/// 狀態 -> 畫面，純函式
pub fn render(state: &FortuneState) -> View {
    View {
        heading: Heading {
            text: format!("{}{}", HEADING_PREFIX, state.current_fortune),
        },
        button: Button {
            label: BUTTON_LABEL.to_string(),
        },
        form: Form {
            label: INPUT_LABEL.to_string(),
            input: TextInput {
                value: state.draft.clone(),
            },
            submit_label: SUBMIT_LABEL.to_string(),
            prevents_default: true,
        },
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.heading.text)?;
        writeln!(f, "[ {} ]  (/fetch)", self.button.label)?;
        writeln!(
            f,
            "{} [{}]  [ {} ]  (/submit)",
            self.form.label, self.form.input.value, self.form.submit_label
        )
    }
}
