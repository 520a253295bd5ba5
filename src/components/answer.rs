use std::sync::Arc;

use leptos::*;

use crate::{
    components::{
        notice_line, run_exclusive, settle, CommentList, CommentListControl, CommentTarget,
        LikeButton, LikeControl,
    },
    config::PageContext,
    error::{AppError, Result},
    models::Answer,
    services::{QaApi, SharedApi},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMsg {
    MarkSolution,
    RemoveSolutionMark,
}

/// One answer and, for the question owner, its solution toggle.
#[derive(Debug, Clone)]
pub struct AnswerControl {
    question_id: i64,
    /// Present only when the viewer owns the question.
    owner_question_id: Option<i64>,
    answer: Answer,
    notice: Option<String>,
}

impl AnswerControl {
    pub fn new(question_id: i64, owner_question_id: Option<i64>, answer: Answer) -> Self {
        Self {
            question_id,
            owner_question_id: owner_question_id.filter(|id| *id != 0),
            answer,
            notice: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.answer.id
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn solution(&self) -> bool {
        self.answer.solution
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the viewer may mark or unmark this answer.
    pub fn can_mark(&self) -> bool {
        self.owner_question_id.is_some()
    }

    /// Like counter bound to this answer.
    pub fn like_control(&self, context: &PageContext) -> LikeControl {
        LikeControl::new(
            context.answer_url(self.question_id, self.answer.id),
            self.answer.likes_count,
            self.answer.already_liked,
        )
    }

    /// Comment thread bound to this answer.
    pub fn comment_control(&self, context: &PageContext) -> CommentListControl {
        CommentListControl::new(
            context,
            CommentTarget::Answer {
                question_id: self.question_id,
                answer_id: self.answer.id,
            },
            self.answer.comments.clone(),
        )
    }

    pub fn next_msg(&self) -> AnswerMsg {
        if self.answer.solution {
            AnswerMsg::RemoveSolutionMark
        } else {
            AnswerMsg::MarkSolution
        }
    }

    fn owner_question_id(&self) -> Result<i64> {
        self.owner_question_id
            .ok_or_else(|| AppError::validation("Only the question author can choose a solution"))
    }

    pub async fn mark_solution<A: QaApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let question_id = self.owner_question_id()?;
        api.mark_solution(question_id, self.answer.id).await?;
        self.answer.solution = true;
        Ok(())
    }

    pub async fn remove_solution_mark<A: QaApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let question_id = self.owner_question_id()?;
        api.remove_solution_mark(question_id, self.answer.id).await?;
        self.answer.solution = false;
        Ok(())
    }

    pub async fn update<A: QaApi + ?Sized>(&mut self, api: &A, msg: AnswerMsg) {
        let result = match msg {
            AnswerMsg::MarkSolution => self.mark_solution(api).await,
            AnswerMsg::RemoveSolutionMark => self.remove_solution_mark(api).await,
        };
        settle(&mut self.notice, "Solution mark", result);
    }
}

async fn run_solution_toggle(state: RwSignal<AnswerControl>, busy: RwSignal<bool>, api: SharedApi) {
    run_exclusive(state, busy, |mut answer| async move {
        let msg = answer.next_msg();
        answer.update(api.as_ref(), msg).await;
        answer
    })
    .await
}

#[component]
pub fn AnswerItem(context: Arc<PageContext>, api: SharedApi, control: AnswerControl) -> impl IntoView {
    let like = control.like_control(&context);
    let comments = control.comment_control(&context);
    let Answer {
        id, content, author, ..
    } = control.answer().clone();
    let author_link = context.account_link(author.id);
    let can_mark = control.can_mark();

    let state = create_rw_signal(control);
    let busy = create_rw_signal(false);
    let like_api = Arc::clone(&api);
    let mark_api = Arc::clone(&api);

    let solution = move || state.with(AnswerControl::solution);
    let badge = move || solution().then(|| view! { <span class="label label-success">"solution"</span> });
    let mark_button = can_mark.then(|| {
        view! {
            <button
                class=move || if solution() { "btn btn-warning mark" } else { "btn btn-success mark" }
                disabled=move || busy.get()
                on:click=move |_| spawn_local(run_solution_toggle(state, busy, Arc::clone(&mark_api)))
            >
                {move || if solution() { "Remove solution mark" } else { "Mark as solution" }}
            </button>
        }
    });

    view! {
        <div class="answer" data-key=id.to_string()>
            <div class="answer-header">
                <img src=author.photo.unwrap_or_default()/>
                <a href=author_link>{author.username}</a>
                {badge}
            </div>
            <div class="answer-content">{content}</div>
            <div>
                <LikeButton api=like_api control=like/>
                {mark_button}
                {move || notice_line(state.with(|answer| answer.notice().map(str::to_string)))}
            </div>
            <div>
                <CommentList context=context api=api control=comments/>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{render_html, test_support::count};
    use crate::models::Account;
    use crate::services::api::MockQaApi;

    fn context() -> PageContext {
        PageContext::resolve("http://127.0.0.1/questions/5/", "", 8000).unwrap()
    }

    fn answer(id: i64, solution: bool) -> Answer {
        Answer {
            id,
            content: "Use a mutex".to_string(),
            author: Account {
                id: 2,
                username: "bob".to_string(),
                photo: Some("/media/bob.png".to_string()),
            },
            solution,
            likes_count: 1,
            already_liked: false,
            comments: vec![],
        }
    }

    fn render(control: AnswerControl) -> String {
        let context = Arc::new(context());
        let api: SharedApi = Arc::new(MockQaApi::new());
        render_html(move || view! { <AnswerItem context=context api=api control=control/> })
    }

    #[test]
    fn test_children_bound_to_answer_urls() {
        let control = AnswerControl::new(5, None, answer(9, false));
        let ctx = context();

        assert_eq!(
            control.like_control(&ctx).target_url(),
            "http://127.0.0.1:8000/questions/5/answers/9/"
        );
        assert_eq!(
            control.comment_control(&ctx).target_url(),
            "http://127.0.0.1:8000/questions/5/answers/9/comment_it/"
        );
    }

    #[tokio::test]
    async fn test_mark_and_unmark_solution() {
        let mut api = MockQaApi::new();
        api.expect_mark_solution()
            .withf(|qid, aid| *qid == 5 && *aid == 9)
            .times(1)
            .returning(|_, _| Ok(()));
        api.expect_remove_solution_mark()
            .withf(|qid, aid| *qid == 5 && *aid == 9)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut control = AnswerControl::new(5, Some(5), answer(9, false));
        assert!(render(control.clone()).contains("Mark as solution"));

        control.update(&api, control.next_msg()).await;
        assert!(control.solution());
        let html = render(control.clone());
        assert!(html.contains("Remove solution mark"));
        assert!(!html.contains("Mark as solution"));
        assert!(html.contains("label label-success"));

        control.update(&api, control.next_msg()).await;
        assert!(!control.solution());
        assert!(render(control).contains("Mark as solution"));
    }

    #[tokio::test]
    async fn test_failed_mark_keeps_flag() {
        let mut api = MockQaApi::new();
        api.expect_mark_solution()
            .times(1)
            .returning(|_, _| Err(AppError::internal("boom")));

        let mut control = AnswerControl::new(5, Some(5), answer(9, false));
        control.update(&api, AnswerMsg::MarkSolution).await;

        assert!(!control.solution());
        assert!(control.notice().is_some());
        assert!(render(control).contains("alert alert-danger"));
    }

    #[tokio::test]
    async fn test_non_owner_has_no_toggle() {
        let api = MockQaApi::new();
        let mut control = AnswerControl::new(5, None, answer(9, true));

        let html = render(control.clone());
        assert!(!html.contains("Mark as solution"));
        assert!(!html.contains("Remove solution mark"));
        assert_eq!(count(&html, "mark\""), 0);
        assert!(html.contains("label label-success"));

        assert!(control.mark_solution(&api).await.is_err());
        assert!(control.solution());

        let zero_owner = AnswerControl::new(5, Some(0), answer(9, false));
        assert!(!zero_owner.can_mark());
    }

    #[tokio::test]
    async fn test_toggle_click_runs_through_signal() {
        let runtime = create_runtime();
        let mut api = MockQaApi::new();
        api.expect_mark_solution()
            .withf(|qid, aid| *qid == 5 && *aid == 9)
            .times(1)
            .returning(|_, _| Ok(()));
        let api: SharedApi = Arc::new(api);

        let state = create_rw_signal(AnswerControl::new(5, Some(5), answer(9, false)));
        let busy = create_rw_signal(false);

        run_solution_toggle(state, busy, api).await;
        assert!(state.with_untracked(AnswerControl::solution));
        runtime.dispose();
    }

    #[test]
    fn test_render_nests_like_and_comments() {
        let html = render(AnswerControl::new(5, None, answer(9, false)));

        assert!(html.contains("data-key=\"9\""));
        assert!(html.contains("Use a mutex"));
        assert!(html.contains("http://127.0.0.1:8000/account/2/"));
        assert_eq!(count(&html, "like-button"), 1);
        assert!(html.contains("Show comments"));
    }
}
