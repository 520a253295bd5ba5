use std::sync::Arc;

use leptos::*;
use tracing::debug;

use crate::{
    components::{notice_line, run_exclusive, settle},
    config::PageContext,
    error::{AppError, Result},
    models::Comment,
    services::{QaApi, SharedApi},
    utils::{cache::IdCache, validation::validate_content},
};

/// What a comment thread hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTarget {
    Question(i64),
    Answer { question_id: i64, answer_id: i64 },
}

impl CommentTarget {
    pub fn url(&self, context: &PageContext) -> String {
        match *self {
            CommentTarget::Question(question_id) => context.question_comment_url(question_id),
            CommentTarget::Answer {
                question_id,
                answer_id,
            } => context.answer_comment_url(question_id, answer_id),
        }
    }

    /// Element id of the thread's compose box, unique on the page.
    pub fn input_id(&self) -> String {
        match *self {
            CommentTarget::Question(question_id) => format!("comment-content-question-{}", question_id),
            CommentTarget::Answer { answer_id, .. } => format!("comment-content-answer-{}", answer_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentListMsg {
    Post,
    /// Carries the id of the comment whose removal affordance was clicked.
    Remove(i64),
}

/// Collapsible comment thread of a question or answer.
#[derive(Debug, Clone)]
pub struct CommentListControl {
    target: CommentTarget,
    target_url: String,
    comments: IdCache<Comment>,
    shown: bool,
    draft: String,
    notice: Option<String>,
}

impl CommentListControl {
    pub fn new(context: &PageContext, target: CommentTarget, comments: Vec<Comment>) -> Self {
        Self {
            target,
            target_url: target.url(context),
            comments: IdCache::new(comments),
            shown: false,
            draft: String::new(),
            notice: None,
        }
    }

    pub fn target(&self) -> CommentTarget {
        self.target
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn comments(&self) -> &IdCache<Comment> {
        &self.comments
    }

    pub fn shown(&self) -> bool {
        self.shown
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn show(&mut self) {
        self.shown = true;
    }

    pub fn hide(&mut self) {
        self.shown = false;
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Posts the draft; the created comment is appended and the thread opened.
    pub async fn post<A: QaApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let payload = validate_content(&self.draft)?;
        let comment = api.post_comment(&self.target_url, payload).await?;
        debug!("Comment {} created on {}", comment.id, self.target_url);

        self.comments = std::mem::take(&mut self.comments).inserted(comment);
        self.shown = true;
        self.draft.clear();
        Ok(())
    }

    /// Deletes one of the viewer's own comments and drops it from the thread.
    pub async fn remove<A: QaApi + ?Sized>(&mut self, api: &A, comment_id: i64) -> Result<()> {
        match self.comments.get(comment_id) {
            Some(comment) if comment.my => {}
            _ => return Err(AppError::validation("This comment cannot be removed")),
        }

        api.delete_comment(comment_id).await?;

        let (comments, _) = std::mem::take(&mut self.comments).removed(comment_id);
        self.comments = comments;
        self.shown = true;
        Ok(())
    }

    pub async fn update<A: QaApi + ?Sized>(&mut self, api: &A, msg: CommentListMsg) {
        match msg {
            CommentListMsg::Post => {
                let result = self.post(api).await;
                settle(&mut self.notice, "Posting comment", result);
            }
            CommentListMsg::Remove(id) => {
                let result = self.remove(api, id).await;
                settle(&mut self.notice, "Removing comment", result);
            }
        }
    }
}

async fn run_comment_action(
    state: RwSignal<CommentListControl>,
    busy: RwSignal<bool>,
    api: SharedApi,
    msg: CommentListMsg,
) {
    run_exclusive(state, busy, |mut list| async move {
        list.update(api.as_ref(), msg).await;
        list
    })
    .await
}

#[component]
pub fn CommentList(
    context: Arc<PageContext>,
    api: SharedApi,
    control: CommentListControl,
) -> impl IntoView {
    let input_id = store_value(control.target().input_id());
    let state = create_rw_signal(control);
    let busy = create_rw_signal(false);
    let context = store_value(context);
    let api = store_value(api);

    let dispatch = move |msg: CommentListMsg| {
        spawn_local(run_comment_action(state, busy, api.get_value(), msg))
    };
    // Local edits wait for the outstanding request, which writes the whole thread back.
    let edit = move |f: &dyn Fn(&mut CommentListControl)| {
        if !busy.get_untracked() {
            state.update(|list| f(list));
        }
    };

    let rows = move || {
        let context = context.get_value();
        state.with(|list| {
            list.comments()
                .iter()
                .map(|comment| comment_row(&context, comment, dispatch))
                .collect_view()
        })
    };

    let expanded = move || {
        view! {
            <div class="comments-container">{rows}</div>
            <div class="comment-form">
                <textarea
                    id=input_id.get_value()
                    placeholder="Type your comment here..."
                    disabled=move || busy.get()
                    prop:value=move || state.with(|list| list.draft().to_string())
                    on:input=move |ev| {
                        let draft = event_target_value(&ev);
                        edit(&move |list: &mut CommentListControl| list.set_draft(draft.clone()))
                    }
                ></textarea>
                <button
                    class="btn btn-primary"
                    disabled=move || busy.get()
                    on:click=move |_| dispatch(CommentListMsg::Post)
                >
                    "Leave comment"
                </button>
            </div>
            <p class="comments-toggle" on:click=move |_| edit(&CommentListControl::hide)>
                "Hide comments"
            </p>
        }
    };

    view! {
        <div class="comments">
            {move || {
                if state.with(CommentListControl::shown) {
                    expanded().into_view()
                } else {
                    view! {
                        <p class="comments-toggle" on:click=move |_| edit(&CommentListControl::show)>
                            "Show comments"
                        </p>
                    }
                        .into_view()
                }
            }}
            {move || notice_line(state.with(|list| list.notice().map(str::to_string)))}
        </div>
    }
}

fn comment_row(
    context: &PageContext,
    comment: &Comment,
    dispatch: impl Fn(CommentListMsg) + Copy + 'static,
) -> impl IntoView {
    let id = comment.id;
    // Only the author's own comments get a removal affordance.
    let remove = comment.my.then(|| {
        view! {
            <span
                class="comment-delete"
                data-comment-id=id.to_string()
                on:click=move |_| dispatch(CommentListMsg::Remove(id))
            >
                "remove"
            </span>
        }
    });

    view! {
        <div class="comment" data-key=id.to_string()>
            <div class="comment-heading">
                <img src=comment.author.photo.clone().unwrap_or_default()/>
                <a href=context.account_link(comment.author.id)>{comment.author.username.clone()}</a>
                {remove}
            </div>
            <div class="comment-content">{comment.content.clone()}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{render_html, test_support::count};
    use crate::models::{Account, ContentPayload};
    use crate::services::api::MockQaApi;

    const QUESTION: CommentTarget = CommentTarget::Question(5);

    fn context() -> PageContext {
        PageContext::resolve("http://127.0.0.1/questions/5/", "", 8000).unwrap()
    }

    fn comment(id: i64, content: &str, my: bool) -> Comment {
        Comment {
            id,
            content: content.to_string(),
            author: Account {
                id: 1,
                username: "ann".to_string(),
                photo: None,
            },
            my,
        }
    }

    fn render(control: CommentListControl) -> String {
        let context = Arc::new(context());
        let api: SharedApi = Arc::new(MockQaApi::new());
        render_html(move || view! { <CommentList context=context api=api control=control/> })
    }

    #[test]
    fn test_target_urls_and_input_ids() {
        let ctx = context();
        let answer = CommentTarget::Answer {
            question_id: 5,
            answer_id: 9,
        };

        assert_eq!(QUESTION.url(&ctx), "http://127.0.0.1:8000/questions/5/comment_it/");
        assert_eq!(answer.url(&ctx), "http://127.0.0.1:8000/questions/5/answers/9/comment_it/");
        assert_eq!(QUESTION.input_id(), "comment-content-question-5");
        assert_eq!(answer.input_id(), "comment-content-answer-9");
    }

    #[tokio::test]
    async fn test_post_appends_and_opens() {
        let mut api = MockQaApi::new();
        api.expect_post_comment()
            .withf(|url, payload| url.ends_with("/questions/5/comment_it/") && payload.content == "nice")
            .times(1)
            .returning(|_, payload: ContentPayload| Ok(comment(30, &payload.content, true)));

        let mut list = CommentListControl::new(&context(), QUESTION, vec![comment(1, "first", false)]);
        list.set_draft("nice");
        list.post(&api).await.unwrap();

        assert_eq!(list.comments().ids(), vec![1, 30]);
        assert!(list.shown());
        assert_eq!(list.draft(), "");
    }

    #[tokio::test]
    async fn test_blank_draft_sends_nothing() {
        let api = MockQaApi::new();
        let mut list = CommentListControl::new(&context(), QUESTION, vec![]);
        list.set_draft("   ");

        list.update(&api, CommentListMsg::Post).await;
        assert!(list.comments().is_empty());
        assert_eq!(list.notice(), Some("Text cannot be empty"));
        assert_eq!(list.draft(), "   ");
    }

    #[tokio::test]
    async fn test_remove_only_matching_comment() {
        let mut api = MockQaApi::new();
        api.expect_delete_comment()
            .withf(|id| *id == 2)
            .times(1)
            .returning(|_| Ok(()));

        let mut list = CommentListControl::new(
            &context(),
            QUESTION,
            vec![comment(1, "dup", true), comment(2, "dup", true), comment(3, "dup", true)],
        );
        list.remove(&api, 2).await.unwrap();

        assert_eq!(list.comments().ids(), vec![1, 3]);
        assert!(list.shown());
    }

    #[tokio::test]
    async fn test_remove_foreign_comment_refused() {
        let api = MockQaApi::new();
        let mut list = CommentListControl::new(&context(), QUESTION, vec![comment(4, "theirs", false)]);

        assert!(list.remove(&api, 4).await.is_err());
        assert_eq!(list.comments().ids(), vec![4]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_comment() {
        let mut api = MockQaApi::new();
        api.expect_delete_comment()
            .times(1)
            .returning(|_| Err(AppError::internal("boom")));

        let mut list = CommentListControl::new(&context(), QUESTION, vec![comment(4, "mine", true)]);
        list.update(&api, CommentListMsg::Remove(4)).await;

        assert_eq!(list.comments().ids(), vec![4]);
        assert!(list.notice().is_some());
    }

    #[tokio::test]
    async fn test_remove_click_runs_through_signal() {
        let runtime = create_runtime();
        let mut api = MockQaApi::new();
        api.expect_delete_comment()
            .withf(|id| *id == 2)
            .times(1)
            .returning(|_| Ok(()));
        let api: SharedApi = Arc::new(api);

        let control = CommentListControl::new(&context(), QUESTION, vec![comment(1, "a", true), comment(2, "b", true)]);
        let state = create_rw_signal(control);
        let busy = create_rw_signal(false);

        run_comment_action(state, busy, api, CommentListMsg::Remove(2)).await;

        assert_eq!(state.with_untracked(|list| list.comments().ids()), vec![1]);
        assert!(state.with_untracked(CommentListControl::shown));
        runtime.dispose();
    }

    #[test]
    fn test_collapsed_thread_renders_only_toggle() {
        let html = render(CommentListControl::new(&context(), QUESTION, vec![comment(2, "mine", true)]));

        assert!(html.contains("Show comments"));
        assert!(!html.contains("Hide comments"));
        assert!(!html.contains("textarea"));
        assert_eq!(count(&html, "comment-delete"), 0);
    }

    #[test]
    fn test_remove_affordance_only_for_own_comments() {
        let mut list = CommentListControl::new(
            &context(),
            QUESTION,
            vec![comment(1, "theirs", false), comment(2, "mine", true)],
        );
        list.show();
        let html = render(list);

        assert_eq!(count(&html, "class=\"comment\""), 2);
        assert_eq!(count(&html, "comment-delete"), 1);
        assert!(html.contains("data-comment-id=\"2\""));
        assert!(!html.contains("data-comment-id=\"1\""));
        assert!(!html.contains(" id=\"2\""));
        assert!(html.contains("Hide comments"));
        assert!(html.contains("Leave comment"));
    }

    #[test]
    fn test_threads_on_one_page_use_distinct_input_ids() {
        let ctx = context();
        let mut question = CommentListControl::new(&ctx, QUESTION, vec![]);
        let mut answer = CommentListControl::new(
            &ctx,
            CommentTarget::Answer {
                question_id: 5,
                answer_id: 9,
            },
            vec![],
        );
        question.show();
        answer.show();

        let html = render(question) + &render(answer);
        assert_eq!(count(&html, "id=\"comment-content-question-5\""), 1);
        assert_eq!(count(&html, "id=\"comment-content-answer-9\""), 1);
        assert_eq!(count(&html, "id=\"comment-content\""), 0);
    }
}
