use crate::core::{Event, FortuneApi, Runtime};
use crate::utils::error::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch,
    Submit,
    Quit,
    Draft(String),
}

/// `/fetch`、`/submit`、`/quit` 之外的輸入都當作草稿內容
pub fn parse_command(line: &str) -> Command {
    match line.trim() {
        "/fetch" => Command::Fetch,
        "/submit" => Command::Submit,
        "/quit" => Command::Quit,
        _ => Command::Draft(line.to_string()),
    }
}

/// 在終端機上掛載元件：每行輸入轉成事件，狀態改變就重繪
pub struct TerminalHost<A: FortuneApi + 'static> {
    runtime: Runtime<A>,
}

impl<A: FortuneApi + 'static> TerminalHost<A> {
    pub fn new(api: A) -> Self {
        Self {
            runtime: Runtime::new(api),
        }
    }

    pub async fn run<R, W>(mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.runtime.mount();
        self.draw(&mut output).await?;

        let mut lines = input.lines();
        let mut quit = false;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };

                    let view = self.runtime.view();
                    let event: Event = match parse_command(&line) {
                        Command::Quit => {
                            quit = true;
                            break;
                        }
                        Command::Fetch => view.button.activate(),
                        Command::Submit => view.form.submit(),
                        Command::Draft(text) => view.form.input.change(text),
                    };

                    if self.runtime.dispatch(event) {
                        self.draw(&mut output).await?;
                    }
                }
                Some(changed) = self.runtime.next_completion(), if self.runtime.in_flight() > 0 => {
                    if changed {
                        self.draw(&mut output).await?;
                    }
                }
            }
        }

        // 輸入結束時等待已送出的請求，/quit 則直接離開
        if !quit {
            while let Some(changed) = self.runtime.next_completion().await {
                if changed {
                    self.draw(&mut output).await?;
                }
            }
        }

        self.runtime.unmount();
        output.flush().await?;
        tracing::info!("👋 Bye");
        Ok(())
    }

    async fn draw<W: AsyncWrite + Unpin>(&self, output: &mut W) -> Result<()> {
        let frame = format!("{}\n", self.runtime.view());
        output.write_all(frame.as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }
}
