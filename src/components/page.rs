use std::sync::Arc;

use leptos::*;

use crate::{
    components::{render_html, ProfileTabs, ProfileTabsControl, QuestionControl, QuestionPage},
    config::PageContext,
    services::SharedApi,
};

/// Elements a top-level control can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    QuestionDetail,
    Profile,
}

impl MountPoint {
    pub const ALL: [MountPoint; 2] = [MountPoint::QuestionDetail, MountPoint::Profile];

    pub fn element_id(&self) -> &'static str {
        match self {
            MountPoint::QuestionDetail => "question-app-container",
            MountPoint::Profile => "profile-container",
        }
    }
}

/// A top-level control ready to attach to its mount point.
#[derive(Debug, Clone)]
pub enum MountedControl {
    Question(QuestionControl),
    Profile(ProfileTabsControl),
}

impl MountedControl {
    pub fn mount_point(&self) -> MountPoint {
        match self {
            MountedControl::Question(_) => MountPoint::QuestionDetail,
            MountedControl::Profile(_) => MountPoint::Profile,
        }
    }

    pub fn view(self, context: Arc<PageContext>, api: SharedApi) -> View {
        match self {
            MountedControl::Question(control) => {
                view! { <QuestionPage context=context api=api control=control/> }.into_view()
            }
            MountedControl::Profile(control) => {
                view! { <ProfileTabs context=context control=control/> }.into_view()
            }
        }
    }

    /// Server-side rendering of the control's initial state.
    pub fn render(self, context: Arc<PageContext>, api: SharedApi) -> String {
        render_html(move || self.view(context, api))
    }
}
