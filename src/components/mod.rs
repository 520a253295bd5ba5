pub mod answer;
pub mod answer_list;
pub mod comment_list;
pub mod like;
pub mod page;
pub mod profile_tabs;
pub mod question;

pub use answer::{AnswerControl, AnswerItem, AnswerMsg};
pub use answer_list::{AnswerList, AnswerListControl};
pub use comment_list::{CommentList, CommentListControl, CommentListMsg, CommentTarget};
pub use like::{LikeButton, LikeControl, LikeMsg};
pub use page::{MountPoint, MountedControl};
pub use profile_tabs::{ProfileTabs, ProfileTabsControl, Tab};
pub use question::{QuestionControl, QuestionPage};

use std::future::Future;

use leptos::*;
use tracing::{debug, warn};

use crate::error::Result;

/// Applies the outcome of a user action to a control's notice line.
///
/// A failure is logged and shown; state was already left untouched by the
/// operation. A success clears any earlier notice.
pub(crate) fn settle(notice: &mut Option<String>, action: &str, result: Result<()>) {
    match result {
        Ok(()) => *notice = None,
        Err(e) => {
            warn!("{} failed: {}", action, e);
            *notice = Some(e.notice());
        }
    }
}

/// Runs one asynchronous operation on the control held in `state`.
///
/// Skipped while another operation of the same control is outstanding. The
/// operation works on a snapshot which is written back once it resolves; if
/// the component was unmounted meanwhile the write lands on a disposed signal
/// and is dropped.
pub(crate) async fn run_exclusive<T, F, Fut>(state: RwSignal<T>, busy: RwSignal<bool>, op: F)
where
    T: Clone + 'static,
    F: FnOnce(T) -> Fut,
    Fut: Future<Output = T>,
{
    if busy.get_untracked() {
        debug!("Ignoring action while a request is outstanding");
        return;
    }

    busy.set(true);
    let next = op(state.get_untracked()).await;
    state.set(next);
    busy.set(false);
}

/// Renders a component tree to HTML in a fresh reactive runtime.
pub fn render_html<F, N>(f: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    leptos::ssr::render_to_string(f).to_string()
}

/// Alert line rendered under a control after a failed action.
pub(crate) fn notice_line(notice: Option<String>) -> Option<impl IntoView> {
    notice.map(|message| view! { <p class="alert alert-danger">{message}</p> })
}
