use std::sync::Arc;

use leptos::*;
use tracing::debug;

use crate::{
    components::{notice_line, run_exclusive, settle, AnswerControl, AnswerItem},
    config::PageContext,
    error::Result,
    models::Answer,
    services::{QaApi, SharedApi},
    utils::{cache::IdCache, validation::validate_content},
};

/// Answer form followed by every answer of the question, oldest first.
#[derive(Debug, Clone)]
pub struct AnswerListControl {
    question_id: i64,
    owner_question_id: Option<i64>,
    answers: IdCache<Answer>,
    draft: String,
    notice: Option<String>,
}

impl AnswerListControl {
    pub fn new(question_id: i64, owner_question_id: Option<i64>, answers: Vec<Answer>) -> Self {
        Self {
            question_id,
            owner_question_id,
            answers: IdCache::new(answers),
            draft: String::new(),
            notice: None,
        }
    }

    pub fn answers(&self) -> &IdCache<Answer> {
        &self.answers
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Element id of the answer compose box.
    pub fn input_id(&self) -> String {
        format!("answer-content-{}", self.question_id)
    }

    /// Control for one of the listed answers, carrying the owner id down.
    pub fn answer_control(&self, answer: Answer) -> AnswerControl {
        AnswerControl::new(self.question_id, self.owner_question_id, answer)
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub async fn submit<A: QaApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let payload = validate_content(&self.draft)?;
        let answer = api.post_answer(self.question_id, payload).await?;
        debug!("Answer {} created on question {}", answer.id, self.question_id);

        self.answers = std::mem::take(&mut self.answers).inserted(answer);
        self.draft.clear();
        Ok(())
    }

    /// Submits the draft and records the outcome in the notice line.
    pub async fn submit_and_settle<A: QaApi + ?Sized>(&mut self, api: &A) {
        let result = self.submit(api).await;
        settle(&mut self.notice, "Posting answer", result);
    }
}

async fn run_submit(state: RwSignal<AnswerListControl>, busy: RwSignal<bool>, api: SharedApi) {
    run_exclusive(state, busy, |mut list| async move {
        list.submit_and_settle(api.as_ref()).await;
        list
    })
    .await
}

#[component]
pub fn AnswerList(
    context: Arc<PageContext>,
    api: SharedApi,
    control: AnswerListControl,
) -> impl IntoView {
    let input_id = control.input_id();
    let state = create_rw_signal(control);
    let busy = create_rw_signal(false);
    let context = store_value(context);
    let api = store_value(api);

    view! {
        <div class="answers">
            <div class="answer-form">
                <textarea
                    id=input_id
                    placeholder="Type your answer here..."
                    disabled=move || busy.get()
                    prop:value=move || state.with(|list| list.draft().to_string())
                    on:input=move |ev| {
                        if !busy.get_untracked() {
                            state.update(|list| list.set_draft(event_target_value(&ev)));
                        }
                    }
                ></textarea>
                <button
                    class="btn btn-primary"
                    disabled=move || busy.get()
                    on:click=move |_| spawn_local(run_submit(state, busy, api.get_value()))
                >
                    "Post answer"
                </button>
                {move || notice_line(state.with(|list| list.notice().map(str::to_string)))}
            </div>
            <div>
                <For
                    each=move || state.with(|list| list.answers().iter().cloned().collect::<Vec<_>>())
                    key=|answer: &Answer| answer.id
                    children=move |answer: Answer| {
                        let control = state.with_untracked(|list| list.answer_control(answer));
                        view! { <AnswerItem context=context.get_value() api=api.get_value() control=control/> }
                    }
                />
            </div>
        </div>
    }
}
