use std::sync::Arc;

use leptos::*;

use crate::{
    components::{
        AnswerList, AnswerListControl, CommentList, CommentListControl, CommentTarget, LikeButton,
        LikeControl,
    },
    config::PageContext,
    models::Question,
    services::SharedApi,
};

/// Interactive part of a question detail page.
///
/// Holds no state of its own: the like button, comment thread and answer list
/// each start from the slice of the question they are handed here and own it
/// from then on.
#[derive(Debug, Clone)]
pub struct QuestionControl {
    id: i64,
    like: LikeControl,
    comments: CommentListControl,
    answers: AnswerListControl,
}

impl QuestionControl {
    pub fn new(context: &PageContext, question: Question) -> Self {
        let owner_question_id = question.owner_question_id();

        Self {
            id: question.id,
            like: LikeControl::new(
                context.question_url(question.id),
                question.likes_count,
                question.already_liked,
            ),
            comments: CommentListControl::new(context, CommentTarget::Question(question.id), question.comments),
            answers: AnswerListControl::new(question.id, owner_question_id, question.answers),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn like(&self) -> &LikeControl {
        &self.like
    }

    pub fn like_mut(&mut self) -> &mut LikeControl {
        &mut self.like
    }

    pub fn comments(&self) -> &CommentListControl {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut CommentListControl {
        &mut self.comments
    }

    pub fn answers(&self) -> &AnswerListControl {
        &self.answers
    }

    pub fn answers_mut(&mut self) -> &mut AnswerListControl {
        &mut self.answers
    }
}

#[component]
pub fn QuestionPage(context: Arc<PageContext>, api: SharedApi, control: QuestionControl) -> impl IntoView {
    let QuestionControl {
        like,
        comments,
        answers,
        ..
    } = control;
    let like_api = Arc::clone(&api);
    let comments_api = Arc::clone(&api);
    let comments_context = Arc::clone(&context);

    view! {
        <div class="question-controls">
            <div>
                <LikeButton api=like_api control=like/>
            </div>
            <div>
                <CommentList context=comments_context api=comments_api control=comments/>
            </div>
            <div>
                <AnswerList context=context api=api control=answers/>
            </div>
        </div>
    }
}
