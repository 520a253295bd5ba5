use std::sync::Arc;

use leptos::*;

use crate::{
    config::PageContext,
    models::{AnswerSummary, Profile, QuestionSummary},
    utils::date::format_date,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Questions,
    Answers,
}

/// Tabs on a profile page switching between the user's questions and answers.
#[derive(Debug, Clone)]
pub struct ProfileTabsControl {
    profile: Profile,
    current_tab: Tab,
}

impl ProfileTabsControl {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            current_tab: Tab::default(),
        }
    }

    pub fn current_tab(&self) -> Tab {
        self.current_tab
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }
}

#[component]
pub fn ProfileTabs(context: Arc<PageContext>, control: ProfileTabsControl) -> impl IntoView {
    let state = create_rw_signal(control);
    let context = store_value(context);

    let tab_label = move |tab: Tab, label: &'static str| {
        view! {
            <span
                class=move || {
                    if state.with(|c| c.current_tab() == tab) {
                        "label label-primary"
                    } else {
                        "label label-default"
                    }
                }
                on:click=move |_| state.update(|c| c.select_tab(tab))
            >
                {label}
            </span>
        }
    };

    let cards = move || {
        let context = context.get_value();
        state.with(|c| match c.current_tab() {
            Tab::Questions => c
                .profile()
                .own_questions
                .iter()
                .map(|question| question_card(&context, question))
                .collect_view(),
            Tab::Answers => c.profile().own_answers.iter().map(answer_card).collect_view(),
        })
    };

    view! {
        <div>
            <div class="profile-tabs">
                {tab_label(Tab::Questions, "Questions")}
                {tab_label(Tab::Answers, "Answers")}
            </div>
            <div class="question-wrapper question-profile-wrapper">{cards}</div>
        </div>
    }
}

fn question_card(context: &PageContext, question: &QuestionSummary) -> impl IntoView {
    view! {
        <div class="question" data-key=question.id.to_string()>
            <h5>
                <a href=context.question_link(question.id)>{question.summary.clone()}</a>
            </h5>
            {date_line(question.created_at.as_deref())}
            {counters(question.answers_count, question.comments_count, question.likes_count, false)}
        </div>
    }
}

fn answer_card(answer: &AnswerSummary) -> impl IntoView {
    view! {
        <div class="question" data-key=answer.id.to_string()>
            <h5>{answer.content.clone()}</h5>
            {date_line(answer.created_at.as_deref())}
            {counters(answer.answers_count, answer.comments_count, answer.likes_count, answer.solution)}
        </div>
    }
}

fn date_line(created_at: Option<&str>) -> impl IntoView {
    view! { <p class="question-date">{created_at.map(format_date).unwrap_or_default()}</p> }
}

fn counters(answers: i64, comments: i64, likes: i64, solution: bool) -> impl IntoView {
    view! {
        <p>
            <span class="label label-primary question-answers-count">{format!("{} answers", answers)}</span>
            <span class="label label-success question-comments-count">{format!("{} comments", comments)}</span>
            <span class="label label-warning question-likes-count">{format!("{} likes", likes)}</span>
            {solution.then(|| view! { <span class="label label-success">"solution"</span> })}
        </p>
    }
}
