use crate::core::{effect, reducer, view, Effect, Event};
use crate::domain::model::FortuneState;
use crate::domain::ports::FortuneApi;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// 元件的宿主：唯一擁有並修改狀態的地方。
///
/// 副作用以 tokio task 執行，完成事件經由 channel 回到這裡，
/// 依照完成順序套用，所以同時進行的請求以最後完成者為準。
pub struct Runtime<A: FortuneApi + 'static> {
    state: FortuneState,
    api: Arc<A>,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    alive: Arc<AtomicBool>,
    mounted: bool,
    in_flight: usize,
    init_effects: Vec<Effect>,
}

impl<A: FortuneApi + 'static> Runtime<A> {
    pub fn new(api: A) -> Self {
        Self::with_shared_api(Arc::new(api))
    }

    pub fn with_shared_api(api: Arc<A>) -> Self {
        let (state, init_effects) = reducer::init();
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            state,
            api,
            tx,
            rx,
            alive: Arc::new(AtomicBool::new(false)),
            mounted: false,
            in_flight: 0,
            init_effects,
        }
    }

    /// 執行初始化副作用，只會發生一次
    pub fn mount(&mut self) {
        if self.mounted {
            tracing::warn!("Component already mounted, ignoring");
            return;
        }

        self.mounted = true;
        self.alive.store(true, Ordering::Release);
        tracing::debug!("Component mounted");

        for effect in std::mem::take(&mut self.init_effects) {
            self.spawn(effect);
        }
    }

    /// 卸載後，仍在進行中的請求完成時不再更新狀態
    pub fn unmount(&mut self) {
        if !self.alive.swap(false, Ordering::AcqRel) {
            return;
        }

        if self.in_flight > 0 {
            tracing::debug!("Unmounting with {} request(s) in flight", self.in_flight);
        }
        self.in_flight = 0;
    }

    /// 套用事件，回傳狀態是否改變（需要重繪）
    pub fn dispatch(&mut self, event: Event) -> bool {
        if !self.is_alive() {
            tracing::debug!("Ignoring {:?} on unmounted component", event);
            return false;
        }

        if let Some(error) = event.error() {
            tracing::error!("Error in fetch: {}", error);
        }

        let before = self.state.clone();
        if let Some(effect) = reducer::update(&mut self.state, event) {
            self.spawn(effect);
        }

        self.state != before
    }

    /// 等待下一個完成事件並套用；沒有進行中的請求時回傳 None
    pub async fn next_completion(&mut self) -> Option<bool> {
        if !self.is_alive() || self.in_flight == 0 {
            return None;
        }

        let event = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(self.dispatch(event))
    }

    /// 套用所有進行中請求的結果
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    pub fn state(&self) -> &FortuneState {
        &self.state
    }

    pub fn view(&self) -> view::View {
        view::render(&self.state)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    fn spawn(&mut self, effect: Effect) {
        tracing::debug!("Running effect {:?}", effect);
        self.in_flight += 1;

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let alive = Arc::clone(&self.alive);

        tokio::spawn(async move {
            // 內層 task panic 時仍要送出完成事件，否則 in_flight 永遠不會歸零
            let pending = effect.clone();
            let task = tokio::spawn(async move { effect::perform(effect, api.as_ref()).await });
            let event = match task.await {
                Ok(event) => event,
                Err(e) => effect::aborted(&pending, e.to_string()),
            };

            if alive.load(Ordering::Acquire) {
                let _ = tx.send(event);
            } else {
                tracing::debug!("Dropping {:?}, component unmounted", event);
            }
        });
    }
}

impl<A: FortuneApi + 'static> Drop for Runtime<A> {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FetchError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type Reply = Result<String, FetchError>;

    /// 每次呼叫取走一個 gate，直到測試送出回應才完成
    struct GatedApi {
        fetch_calls: AtomicUsize,
        submit_calls: AtomicUsize,
        gates: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    }

    impl GatedApi {
        fn new(count: usize) -> (Self, Vec<oneshot::Sender<Reply>>) {
            let mut senders = Vec::new();
            let mut gates = VecDeque::new();
            for _ in 0..count {
                let (tx, rx) = oneshot::channel();
                senders.push(tx);
                gates.push_back(rx);
            }

            let api = Self {
                fetch_calls: AtomicUsize::new(0),
                submit_calls: AtomicUsize::new(0),
                gates: Mutex::new(gates),
            };
            (api, senders)
        }

        async fn wait(&self) -> Reply {
            let gate = self.gates.lock().unwrap().pop_front().expect("unexpected call");
            gate.await.expect("gate dropped")
        }
    }

    #[async_trait]
    impl FortuneApi for GatedApi {
        async fn fetch_fortune(&self) -> Reply {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.wait().await
        }

        async fn submit_fortune(&self, _text: &str) -> Reply {
            self.submit_calls.fetch_add(1, Ordering::SeqCst);
            self.wait().await
        }
    }

    fn reply(text: &str) -> Reply {
        Ok(text.to_string())
    }

    #[tokio::test]
    async fn test_mount_fetches_once() {
        let (api, mut senders) = GatedApi::new(1);
        let api = Arc::new(api);
        let mut runtime = Runtime::with_shared_api(Arc::clone(&api));

        runtime.mount();
        runtime.mount();
        assert_eq!(runtime.in_flight(), 1);

        senders.remove(0).send(reply("abc")).unwrap();
        runtime.settle().await;

        assert_eq!(api.fetch_calls.load(Ordering::SeqCst), 1);
        assert_eq!(runtime.state().current_fortune, "abc");
        assert_eq!(runtime.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_events_before_mount_are_ignored() {
        let (api, _senders) = GatedApi::new(0);
        let mut runtime = Runtime::new(api);

        assert!(!runtime.dispatch(Event::DraftChanged("early".to_string())));
        assert_eq!(runtime.state().draft, "");
        assert_eq!(runtime.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_last_resolved_fetch_wins() {
        let (api, senders) = GatedApi::new(3);
        let mut runtime = Runtime::new(api);
        let mut senders = senders.into_iter();

        runtime.mount();
        senders.next().unwrap().send(reply("initial")).unwrap();
        assert_eq!(runtime.next_completion().await, Some(true));

        runtime.dispatch(Event::FetchRequested);
        runtime.dispatch(Event::FetchRequested);
        assert_eq!(runtime.in_flight(), 2);

        let first = senders.next().unwrap();
        let second = senders.next().unwrap();

        second.send(reply("second")).unwrap();
        runtime.next_completion().await;
        assert_eq!(runtime.state().current_fortune, "second");

        first.send(reply("first")).unwrap();
        runtime.next_completion().await;
        assert_eq!(runtime.state().current_fortune, "first");
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft() {
        let (api, senders) = GatedApi::new(2);
        let api = Arc::new(api);
        let mut runtime = Runtime::with_shared_api(Arc::clone(&api));
        let mut senders = senders.into_iter();

        runtime.mount();
        senders.next().unwrap().send(reply("abc")).unwrap();
        runtime.settle().await;

        assert!(runtime.dispatch(Event::DraftChanged("xyz".to_string())));
        runtime.dispatch(Event::SubmitRequested);

        senders
            .next()
            .unwrap()
            .send(Err(FetchError::Status {
                status: 422,
                reason: "Unprocessable Entity".to_string(),
            }))
            .unwrap();
        assert_eq!(runtime.next_completion().await, Some(false));

        assert_eq!(api.submit_calls.load(Ordering::SeqCst), 1);
        assert_eq!(runtime.state().current_fortune, "abc");
        assert_eq!(runtime.state().draft, "xyz");
    }

    #[tokio::test]
    async fn test_completion_after_unmount_is_dropped() {
        let (api, mut senders) = GatedApi::new(1);
        let mut runtime = Runtime::new(api);

        runtime.mount();
        runtime.unmount();
        senders.remove(0).send(reply("late")).unwrap();

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(runtime.next_completion().await, None);
        assert!(!runtime.dispatch(Event::FetchSucceeded("late".to_string())));
        assert_eq!(runtime.state().current_fortune, "");
        assert_eq!(runtime.in_flight(), 0);
    }

    struct PanickingApi;

    #[async_trait]
    impl FortuneApi for PanickingApi {
        async fn fetch_fortune(&self) -> Reply {
            panic!("backend client exploded");
        }

        async fn submit_fortune(&self, _text: &str) -> Reply {
            panic!("backend client exploded");
        }
    }

    #[tokio::test]
    async fn test_panicking_effect_still_completes() {
        let mut runtime = Runtime::new(PanickingApi);

        runtime.mount();
        let settled =
            tokio::time::timeout(std::time::Duration::from_secs(2), runtime.settle()).await;
        assert!(settled.is_ok());
        assert_eq!(runtime.in_flight(), 0);
        assert_eq!(runtime.state().current_fortune, "");

        runtime.dispatch(Event::DraftChanged("xyz".to_string()));
        runtime.dispatch(Event::SubmitRequested);
        let settled =
            tokio::time::timeout(std::time::Duration::from_secs(2), runtime.settle()).await;
        assert!(settled.is_ok());
        assert_eq!(runtime.state().draft, "xyz");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn take(&self) -> String {
            let bytes = std::mem::take(&mut *self.0.lock().unwrap());
            String::from_utf8(bytes).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failures_log_error_in_fetch() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (api, _senders) = GatedApi::new(1);
        let mut runtime = Runtime::new(api);
        runtime.mount();

        runtime.dispatch(Event::FetchFailed(FetchError::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
        }));
        runtime.dispatch(Event::SubmitFailed(FetchError::Status {
            status: 422,
            reason: "Unprocessable Entity".to_string(),
        }));

        let output = logs.take();
        assert!(output.contains("ERROR"));
        assert!(output.contains("Error in fetch: 500 (Internal Server Error)"));
        assert!(output.contains("Error in fetch: 422 (Unprocessable Entity)"));
        assert_eq!(output.matches("Error in fetch:").count(), 2);

        runtime.dispatch(Event::FetchSucceeded("abc".to_string()));
        runtime.dispatch(Event::DraftChanged("xyz".to_string()));
        runtime.dispatch(Event::SubmitSucceeded("xyz-confirmed".to_string()));
        assert_eq!(logs.take(), "");
    }
}
