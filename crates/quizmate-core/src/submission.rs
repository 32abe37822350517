//! Submission payload builder.

use crate::model::{AnswerMap, Quiz, SubmissionRecord};

/// Build the wire submission payload from the final answer map.
///
/// Emits exactly one record per question, in quiz order, with `""` for
/// unanswered questions. Answers for ids not in the quiz are ignored.
pub fn build_submission(quiz: &Quiz, answers: &AnswerMap) -> Vec<SubmissionRecord> {
    quiz.questions
        .iter()
        .map(|q| SubmissionRecord {
            question_id: q.id,
            user_answer: answers.get(q.id).unwrap_or("").to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CognitiveLevel, Question, QuestionKind};

    fn quiz_with_ids(ids: &[i64]) -> Quiz {
        Quiz {
            id: 1,
            title: "Test".into(),
            description: None,
            score: None,
            total_questions: ids.len() as u32,
            questions: ids
                .iter()
                .map(|&id| Question {
                    id,
                    text: format!("Question {id}"),
                    kind: QuestionKind::ShortAnswer,
                    options: None,
                    level: CognitiveLevel::Remember,
                    source_page: None,
                    source_context: None,
                })
                .collect(),
        }
    }

    #[test]
    fn one_record_per_question_in_quiz_order() {
        let quiz = quiz_with_ids(&[3, 1, 2]);
        let mut answers = AnswerMap::new();
        answers.set(1, "one");
        answers.set(3, "three");

        let submission = build_submission(&quiz, &answers);
        assert_eq!(submission.len(), 3);
        assert_eq!(submission[0].question_id, 3);
        assert_eq!(submission[0].user_answer, "three");
        assert_eq!(submission[1].question_id, 1);
        assert_eq!(submission[1].user_answer, "one");
        assert_eq!(submission[2].question_id, 2);
        assert_eq!(submission[2].user_answer, "");
    }

    #[test]
    fn empty_answer_map_yields_empty_strings() {
        let quiz = quiz_with_ids(&[1, 2]);
        let submission = build_submission(&quiz, &AnswerMap::new());
        assert_eq!(submission.len(), 2);
        assert!(submission.iter().all(|r| r.user_answer.is_empty()));
    }

    #[test]
    fn answers_for_unknown_questions_are_ignored() {
        let quiz = quiz_with_ids(&[1]);
        let mut answers = AnswerMap::new();
        answers.set(99, "stray");

        let submission = build_submission(&quiz, &answers);
        assert_eq!(submission.len(), 1);
        assert_eq!(submission[0].user_answer, "");
    }
}
