use dioxus::prelude::*;

use writing_core::model::{ActivityCursor, ActivityKind};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{EvaluationVm, QuestionVm, map_evaluation, map_question, view_error_from};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// User actions the view dispatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseIntent {
    Retreat,
    Advance,
    Evaluate,
}

/// Lifecycle of the evaluation request for the current answer.
#[derive(Clone, Debug, PartialEq)]
enum EvaluationState {
    Idle,
    Requesting,
    Ready(EvaluationVm),
    Failed(ViewError),
}

#[component]
pub fn ExerciseView() -> Element {
    let ctx = use_context::<AppContext>();
    let api = ctx.exercise_api();
    let student = ctx.student();

    let cursor = use_signal(ActivityCursor::new);
    let mut answer = use_signal(String::new);
    let evaluation = use_signal(|| EvaluationState::Idle);

    // Reading the cursor inside the closure restarts the fetch on every
    // transition, which also drops a still-loading question for the
    // activity we just left.
    let api_for_questions = api.clone();
    let student_for_questions = student.clone();
    let question_resource = use_resource(move || {
        let api = api_for_questions.clone();
        let student = student_for_questions.clone();
        let activity = cursor().current();
        async move {
            api.generate_question(activity, &student)
                .await
                .map(|question| map_question(activity, &question))
                .map_err(|err| view_error_from(&err))
        }
    });
    let question_state = view_state_from_resource(&question_resource);

    let dispatch_intent = {
        let api = api.clone();
        let student = student.clone();
        use_callback(move |intent: ExerciseIntent| {
            let mut cursor = cursor;
            let mut answer = answer;
            let mut evaluation = evaluation;

            match intent {
                ExerciseIntent::Retreat => {
                    let position = cursor();
                    if position.is_first() {
                        return;
                    }
                    cursor.set(position.retreated());
                    answer.set(String::new());
                    evaluation.set(EvaluationState::Idle);
                }
                ExerciseIntent::Advance => {
                    let position = cursor();
                    if position.is_last() {
                        return;
                    }
                    cursor.set(position.advanced());
                    answer.set(String::new());
                    evaluation.set(EvaluationState::Idle);
                }
                ExerciseIntent::Evaluate => {
                    let text = answer();
                    if text.is_empty() || *evaluation.read() == EvaluationState::Requesting {
                        return;
                    }
                    let issued_for = cursor();
                    // The payload must come from a settled question for the
                    // current activity. Right after a transition the resource
                    // still holds the previous activity's question until the
                    // new fetch lands.
                    let payload = match view_state_from_resource(&question_resource) {
                        ViewState::Ready(question) if question.activity == issued_for.current() => {
                            question.activity_payload
                        }
                        _ => return,
                    };
                    let api = api.clone();
                    let student = student.clone();
                    evaluation.set(EvaluationState::Requesting);
                    spawn(async move {
                        let result = api.evaluate_answer(&text, &payload, &student).await;
                        // The student moved on while the request was in
                        // flight. The response belongs to the old activity.
                        if cursor() != issued_for {
                            return;
                        }
                        match result {
                            Ok(evaluated) => {
                                evaluation.set(EvaluationState::Ready(map_evaluation(&evaluated)));
                            }
                            Err(err) => {
                                evaluation.set(EvaluationState::Failed(view_error_from(&err)));
                            }
                        }
                    });
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ExerciseTestHandles>() {
                handles.register(dispatch_intent, answer);
            }
        }
    }

    let position = cursor();
    let activity = position.current();
    let step_label = format!(
        "Activity {} of {}",
        position.position() + 1,
        ActivityKind::SEQUENCE.len()
    );

    let evaluation_now = evaluation.read().clone();
    let banner = match (&question_state, &evaluation_now) {
        (ViewState::Error(err), _) => Some(err.clone()),
        (_, EvaluationState::Failed(err)) => Some(err.clone()),
        _ => None,
    };
    let busy = matches!(question_state, ViewState::Loading)
        || evaluation_now == EvaluationState::Requesting;
    let evaluate_label = if evaluation_now == EvaluationState::Requesting {
        "Evaluating..."
    } else {
        "Evaluate"
    };
    let question_ready = matches!(question_state, ViewState::Ready(_));
    let previous_disabled = position.is_first() || busy;
    let next_disabled = position.is_last() || busy;
    let evaluate_disabled = answer().is_empty() || !question_ready || busy;

    rsx! {
        div { class: "page exercise-page",
            header { class: "exercise-header",
                h1 { class: "exercise-title", "Writing Exercise" }
                p { class: "exercise-subtitle", "{activity.title()}" }
            }
            if let Some(err) = banner {
                div { class: "exercise-alert", role: "alert",
                    h3 { class: "exercise-alert__title", "Error" }
                    p { class: "exercise-alert__message", "{err.message()}" }
                }
            }
            match question_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { class: "exercise-loading", "Loading question..." }
                },
                ViewState::Error(_) => rsx! {},
                ViewState::Ready(question) => rsx! {
                    QuestionCard { question }
                },
            }
            textarea {
                class: "exercise-answer",
                id: "exercise-answer",
                rows: 6,
                placeholder: "Type your answer here...",
                value: "{answer()}",
                oninput: move |evt| answer.set(evt.value()),
            }
            div { class: "exercise-controls",
                button {
                    class: "btn btn-secondary",
                    id: "exercise-previous",
                    r#type: "button",
                    disabled: previous_disabled,
                    onclick: move |_| dispatch_intent.call(ExerciseIntent::Retreat),
                    "Previous"
                }
                button {
                    class: "btn btn-primary",
                    id: "exercise-evaluate",
                    r#type: "button",
                    disabled: evaluate_disabled,
                    onclick: move |_| dispatch_intent.call(ExerciseIntent::Evaluate),
                    "{evaluate_label}"
                }
                button {
                    class: "btn btn-secondary",
                    id: "exercise-next",
                    r#type: "button",
                    disabled: next_disabled,
                    onclick: move |_| dispatch_intent.call(ExerciseIntent::Advance),
                    "Next"
                }
            }
            if let EvaluationState::Ready(evaluated) = evaluation_now {
                EvaluationPanel { evaluation: evaluated }
            }
            footer { class: "exercise-footer",
                span { class: "exercise-footer__item", "{step_label}" }
                span { class: "exercise-footer__item", "{activity.title()}" }
            }
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm) -> Element {
    rsx! {
        section { class: "exercise-question",
            h2 { class: "exercise-question__title", "{question.title}" }
            div {
                class: "exercise-question__body",
                dangerous_inner_html: "{question.prompt_html}",
            }
            if let Some(requirement) = question.requirement {
                p { class: "exercise-question__requirement", "Requirement: {requirement}" }
            }
        }
    }
}

#[component]
fn EvaluationPanel(evaluation: EvaluationVm) -> Element {
    let score_rows = evaluation.scores.iter().map(|row| {
        rsx! {
            li { class: "exercise-evaluation__score", "{row.label}: {row.value}" }
        }
    });

    rsx! {
        section { class: "exercise-evaluation",
            h2 { class: "exercise-evaluation__title", "Evaluation" }
            p { class: "exercise-evaluation__critique",
                strong { "Critique:" }
                " {evaluation.critique}"
            }
            p { class: "exercise-evaluation__scores-label",
                strong { "Scores:" }
            }
            ul { class: "exercise-evaluation__scores", {score_rows} }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ExerciseTestHandles {
    dispatch: Rc<RefCell<Option<Callback<ExerciseIntent>>>>,
    answer: Rc<RefCell<Option<Signal<String>>>>,
}

#[cfg(test)]
impl ExerciseTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<ExerciseIntent>, answer: Signal<String>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.answer.borrow_mut() = Some(answer);
    }

    pub(crate) fn dispatch(&self) -> Callback<ExerciseIntent> {
        (*self.dispatch.borrow()).expect("exercise dispatch registered")
    }

    pub(crate) fn answer(&self) -> Signal<String> {
        (*self.answer.borrow()).expect("exercise answer signal registered")
    }
}
