use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

use services::{ExerciseApi, ExerciseServiceError};
use writing_core::model::{ActivityKind, Evaluation, Question, StudentProfile};

use crate::context::{UiApp, build_app_context};
use crate::views::ExerciseView;
use crate::views::exercise::ExerciseTestHandles;

/// Scripted gateway stand-in. Each call pops the next queued result and
/// records what the view sent.
pub struct StubExerciseApi {
    questions: Mutex<VecDeque<Result<Question, ExerciseServiceError>>>,
    evaluations: Mutex<VecDeque<Result<Evaluation, ExerciseServiceError>>>,
    generate_calls: Mutex<Vec<ActivityKind>>,
    evaluate_calls: Mutex<Vec<(String, Value)>>,
    evaluate_gate: Option<Arc<Semaphore>>,
}

impl StubExerciseApi {
    pub fn new() -> Self {
        Self {
            questions: Mutex::new(VecDeque::new()),
            evaluations: Mutex::new(VecDeque::new()),
            generate_calls: Mutex::new(Vec::new()),
            evaluate_calls: Mutex::new(Vec::new()),
            evaluate_gate: None,
        }
    }

    pub fn push_question(&self, result: Result<Question, ExerciseServiceError>) {
        self.questions.lock().unwrap().push_back(result);
    }

    pub fn push_evaluation(&self, result: Result<Evaluation, ExerciseServiceError>) {
        self.evaluations.lock().unwrap().push_back(result);
    }

    /// Hold every evaluation until the test releases a permit.
    pub fn gate_evaluations(&mut self, gate: Arc<Semaphore>) {
        self.evaluate_gate = Some(gate);
    }

    pub fn generate_calls(&self) -> Vec<ActivityKind> {
        self.generate_calls.lock().unwrap().clone()
    }

    pub fn evaluate_calls(&self) -> Vec<(String, Value)> {
        self.evaluate_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExerciseApi for StubExerciseApi {
    async fn generate_question(
        &self,
        activity: ActivityKind,
        _student: &StudentProfile,
    ) -> Result<Question, ExerciseServiceError> {
        self.generate_calls.lock().unwrap().push(activity);
        self.questions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExerciseServiceError::Service("no scripted question".into())))
    }

    async fn evaluate_answer(
        &self,
        answer: &str,
        activity_payload: &Value,
        _student: &StudentProfile,
    ) -> Result<Evaluation, ExerciseServiceError> {
        self.evaluate_calls
            .lock()
            .unwrap()
            .push((answer.to_string(), activity_payload.clone()));
        if let Some(gate) = self.evaluate_gate.as_ref() {
            let permit = gate.acquire().await.expect("gate stays open");
            permit.forget();
        }
        self.evaluations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExerciseServiceError::Service("no scripted evaluation".into())))
    }
}

struct TestApp {
    api: Arc<StubExerciseApi>,
    student: Arc<StudentProfile>,
}

impl UiApp for TestApp {
    fn exercise_api(&self) -> Arc<dyn ExerciseApi> {
        self.api.clone()
    }

    fn student(&self) -> Arc<StudentProfile> {
        Arc::clone(&self.student)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: ExerciseTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ExerciseHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { ExerciseView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: Arc<StubExerciseApi>,
    pub handles: ExerciseTestHandles,
}

impl ViewHarness {
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

pub fn setup_view_harness(api: StubExerciseApi) -> ViewHarness {
    let api = Arc::new(api);
    let handles = ExerciseTestHandles::default();
    let app = Arc::new(TestApp {
        api: Arc::clone(&api),
        student: Arc::new(StudentProfile::sample()),
    });

    let dom = VirtualDom::new_with_props(
        ExerciseHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, api, handles }
}

pub fn sample_question(title: &str) -> Question {
    question_with_activity(title, json!({ "id": 42 }))
}

pub fn question_with_activity(title: &str, activity: Value) -> Question {
    serde_json::from_value(json!({
        "item_body": {
            "stimulus_title": title,
            "stimulus_content": { "content": "<p>C</p>" }
        },
        "activity": activity
    }))
    .expect("well-formed question fixture")
}

pub fn sample_evaluation() -> Evaluation {
    serde_json::from_value(json!({
        "critique": "Good start",
        "structure": 3,
        "coherence": 4,
        "unity": 3,
        "well_constructed_sentences": 2
    }))
    .expect("well-formed evaluation fixture")
}
