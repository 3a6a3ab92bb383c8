use std::sync::Arc;

use async_trait::async_trait;
use coach_core::model::{AttachmentDraft, ChatTurn};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{CoachBackend, CoachError, CoachService};

use crate::context::{UiApp, build_app_context};
use crate::views::{CoachView, LibraryView};

struct CannedBackend {
    reply: String,
}

#[async_trait]
impl CoachBackend for CannedBackend {
    async fn send(
        &self,
        _message: &str,
        _history: &[ChatTurn],
        _attachment: Option<&AttachmentDraft>,
    ) -> Result<String, CoachError> {
        Ok(self.reply.clone())
    }
}

#[derive(Clone)]
struct TestApp {
    coach: Arc<CoachService>,
}

impl UiApp for TestApp {
    fn coach(&self) -> Arc<CoachService> {
        Arc::clone(&self.coach)
    }

    fn backend_label(&self) -> String {
        "http://127.0.0.1:0".into()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Coach,
    Library,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view {
        ViewKind::Coach => rsx! {
            CoachView {}
        },
        ViewKind::Library => rsx! {
            LibraryView {}
        },
    }
}

pub struct Harness {
    pub dom: VirtualDom,
}

impl Harness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, canned_reply: &str) -> Harness {
    let backend = Arc::new(CannedBackend {
        reply: canned_reply.to_string(),
    });
    let coach = Arc::new(CoachService::new(backend));
    let app = Arc::new(TestApp { coach });
    let dom = VirtualDom::new_with_props(ViewHarness, ViewHarnessProps { app, view });
    Harness { dom }
}
