use std::sync::Arc;

use leptos::*;

use crate::{
    components::{notice_line, run_exclusive, settle},
    error::Result,
    services::{QaApi, SharedApi},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeMsg {
    Like,
    Dislike,
}

/// Like counter bound to one likeable resource.
#[derive(Debug, Clone, PartialEq)]
pub struct LikeControl {
    target_url: String,
    likes: i64,
    liked: bool,
    notice: Option<String>,
}

impl LikeControl {
    pub fn new(target_url: impl Into<String>, likes: i64, liked: bool) -> Self {
        Self {
            target_url: target_url.into(),
            likes,
            liked,
            notice: None,
        }
    }

    pub fn likes(&self) -> i64 {
        self.likes
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The only direction the button offers in the current state.
    pub fn next_msg(&self) -> LikeMsg {
        if self.liked {
            LikeMsg::Dislike
        } else {
            LikeMsg::Like
        }
    }

    /// Counts move only after the server confirmed the like.
    pub async fn like<A: QaApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        api.like(&self.target_url).await?;
        self.likes += 1;
        self.liked = true;
        Ok(())
    }

    pub async fn dislike<A: QaApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        api.dislike(&self.target_url).await?;
        self.likes -= 1;
        self.liked = false;
        Ok(())
    }

    pub async fn toggle<A: QaApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        match self.next_msg() {
            LikeMsg::Like => self.like(api).await,
            LikeMsg::Dislike => self.dislike(api).await,
        }
    }

    pub async fn update<A: QaApi + ?Sized>(&mut self, api: &A, msg: LikeMsg) {
        let result = match msg {
            LikeMsg::Like => self.like(api).await,
            LikeMsg::Dislike => self.dislike(api).await,
        };
        settle(&mut self.notice, "Like", result);
    }
}

/// Click on the button: sends whichever direction is valid when the run starts.
async fn run_like(state: RwSignal<LikeControl>, busy: RwSignal<bool>, api: SharedApi) {
    run_exclusive(state, busy, |mut like| async move {
        let msg = like.next_msg();
        like.update(api.as_ref(), msg).await;
        like
    })
    .await
}

#[component]
pub fn LikeButton(api: SharedApi, control: LikeControl) -> impl IntoView {
    let state = create_rw_signal(control);
    let busy = create_rw_signal(false);

    let on_click = move |_| spawn_local(run_like(state, busy, Arc::clone(&api)));

    view! {
        <span>
            <button
                class=move || {
                    if state.with(LikeControl::liked) {
                        "btn btn-warning like-button"
                    } else {
                        "btn btn-success like-button"
                    }
                }
                disabled=move || busy.get()
                on:click=on_click
            >
                {move || if state.with(LikeControl::liked) { "You like it" } else { "Like" }}
                <span class="counter">{move || state.with(LikeControl::likes)}</span>
            </button>
            {move || notice_line(state.with(|like| like.notice().map(str::to_string)))}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::count;
    use crate::error::{AppError, ErrorPayload};
    use crate::services::api::MockQaApi;
    use crate::components::render_html;

    const TARGET: &str = "http://127.0.0.1:8000/questions/5/";

    fn rejected(status: u16) -> AppError {
        AppError::Status {
            status,
            expected: 201,
            payload: ErrorPayload::Text(String::new()),
        }
    }

    fn render(control: LikeControl) -> String {
        let api: SharedApi = Arc::new(MockQaApi::new());
        render_html(move || view! { <LikeButton api=api control=control/> })
    }

    #[tokio::test]
    async fn test_toggle_like_then_dislike() {
        let mut api = MockQaApi::new();
        api.expect_like()
            .withf(|url| url.ends_with("/questions/5/"))
            .times(1)
            .returning(|_| Ok(()));
        api.expect_dislike()
            .withf(|url| url.ends_with("/questions/5/"))
            .times(1)
            .returning(|_| Ok(()));

        let mut like = LikeControl::new(TARGET, 0, false);

        like.toggle(&api).await.unwrap();
        assert_eq!((like.likes(), like.liked()), (1, true));

        like.toggle(&api).await.unwrap();
        assert_eq!((like.likes(), like.liked()), (0, false));
    }

    #[tokio::test]
    async fn test_failed_like_keeps_state() {
        let mut api = MockQaApi::new();
        api.expect_like().times(1).returning(|_| Err(rejected(400)));

        let mut like = LikeControl::new(TARGET, 3, false);
        assert!(like.like(&api).await.is_err());
        assert_eq!((like.likes(), like.liked()), (3, false));
    }

    #[tokio::test]
    async fn test_update_records_notice() {
        let mut api = MockQaApi::new();
        api.expect_dislike().times(1).returning(|_| Err(rejected(403)));
        api.expect_like().times(1).returning(|_| Ok(()));

        let mut like = LikeControl::new(TARGET, 2, true);
        like.update(&api, LikeMsg::Dislike).await;
        assert_eq!(like.notice(), Some("You are not allowed to do that"));
        assert_eq!((like.likes(), like.liked()), (2, true));

        like.liked = false;
        like.update(&api, LikeMsg::Like).await;
        assert_eq!(like.notice(), None);
        assert_eq!(like.likes(), 3);
    }

    #[tokio::test]
    async fn test_click_runs_through_signal() {
        let runtime = create_runtime();
        let mut api = MockQaApi::new();
        api.expect_like().times(1).returning(|_| Ok(()));
        api.expect_dislike().times(1).returning(|_| Ok(()));
        let api: SharedApi = Arc::new(api);

        let state = create_rw_signal(LikeControl::new(TARGET, 0, false));
        let busy = create_rw_signal(false);

        run_like(state, busy, Arc::clone(&api)).await;
        assert_eq!(state.with_untracked(|l| (l.likes(), l.liked())), (1, true));

        run_like(state, busy, Arc::clone(&api)).await;
        assert_eq!(state.with_untracked(|l| (l.likes(), l.liked())), (0, false));
        assert!(!busy.get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn test_click_ignored_while_outstanding() {
        let runtime = create_runtime();
        let api: SharedApi = Arc::new(MockQaApi::new());

        let state = create_rw_signal(LikeControl::new(TARGET, 4, false));
        let busy = create_rw_signal(true);

        run_like(state, busy, api).await;
        assert_eq!(state.with_untracked(LikeControl::likes), 4);
        runtime.dispose();
    }

    #[test]
    fn test_render_reflects_liked_state() {
        let html = render(LikeControl::new(TARGET, 4, false));
        assert!(html.contains("btn btn-success like-button"));
        assert!(html.contains("Like"));
        assert!(!html.contains("You like it"));
        assert_eq!(count(&html, "class=\"counter\""), 1);
        assert_eq!(count(&html, ">4<"), 1);

        let html = render(LikeControl::new(TARGET, 5, true));
        assert!(html.contains("btn btn-warning like-button"));
        assert!(html.contains("You like it"));
        assert!(!html.contains("alert-danger"));
    }
}
