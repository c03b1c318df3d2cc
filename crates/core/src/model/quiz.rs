use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::TeamName;

/// Ordered difficulty progression. A fan advances one step at a time and
/// the backend serves a separate question pool per team/difficulty pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The next step up, or `None` at the top of the progression.
    #[must_use]
    pub fn next(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => None,
        }
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.next().is_none()
    }

    /// Wire name, matching the serde representation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single question as served by the backend.
///
/// Read-only on the client; the full question set is echoed back on submit
/// so the server can correlate answers for scoring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a quiz needs at least one question")]
    Empty,

    #[error("question index {index} out of range (quiz has {total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("option {option} out of range for question {index} ({available} options)")]
    OptionOutOfRange {
        index: usize,
        option: usize,
        available: usize,
    },

    #[error("only {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
}

/// One in-progress attempt at a team/difficulty question set.
///
/// The question set is fixed at construction. Answers map question index to
/// the selected option index; reselecting overwrites, so only the final
/// choice per question is ever submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    team: TeamName,
    difficulty: Difficulty,
    questions: Vec<Question>,
    answers: BTreeMap<usize, usize>,
}

impl QuizSession {
    /// Start a fresh attempt over the given question set.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the backend served no questions.
    pub fn new(
        team: TeamName,
        difficulty: Difficulty,
        questions: Vec<Question>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        Ok(Self {
            team,
            difficulty,
            questions,
            answers: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn team(&self) -> &TeamName {
        &self.team
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Total number of questions in this attempt.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Number of questions with a recorded answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// The currently selected option for a question, if any.
    #[must_use]
    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(&index).copied()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// Record the selected option for a question. Selecting again for the
    /// same question overwrites the previous choice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionOutOfRange` or `QuizError::OptionOutOfRange`
    /// when the indices do not address this question set.
    pub fn select_answer(&mut self, index: usize, option: usize) -> Result<(), QuizError> {
        let Some(question) = self.questions.get(index) else {
            return Err(QuizError::QuestionOutOfRange {
                index,
                total: self.questions.len(),
            });
        };
        if option >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                index,
                option,
                available: question.options.len(),
            });
        }
        self.answers.insert(index, option);
        Ok(())
    }

    /// The wire answer map (question index to chosen option text).
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Incomplete` unless every question has an answer,
    /// which is the local gate that keeps partial attempts off the network.
    pub fn answer_sheet(&self) -> Result<BTreeMap<usize, String>, QuizError> {
        if !self.is_complete() {
            return Err(QuizError::Incomplete {
                answered: self.answers.len(),
                total: self.questions.len(),
            });
        }
        Ok(self
            .answers
            .iter()
            .map(|(&index, &option)| (index, self.questions[index].options[option].clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str, options: &[&str]) -> Question {
        Question {
            prompt: prompt.to_string(),
            options: options.iter().map(ToString::to_string).collect(),
        }
    }

    fn three_question_session() -> QuizSession {
        QuizSession::new(
            TeamName::new("Liverpool").unwrap(),
            Difficulty::Easy,
            vec![
                question("Q1", &["A", "B", "C", "D"]),
                question("Q2", &["A", "B", "C", "D"]),
                question("Q3", &["A", "B", "C", "D"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_question_set_is_rejected() {
        let err = QuizSession::new(
            TeamName::new("Liverpool").unwrap(),
            Difficulty::Easy,
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err, QuizError::Empty);
    }

    #[test]
    fn reselecting_overwrites_previous_choice() {
        let mut session = three_question_session();
        session.select_answer(0, 0).unwrap();
        session.select_answer(1, 1).unwrap();
        session.select_answer(2, 2).unwrap();
        session.select_answer(1, 3).unwrap();

        assert_eq!(session.answer(1), Some(3));
        assert_eq!(session.answer(0), Some(0));

        let sheet = session.answer_sheet().unwrap();
        assert_eq!(sheet[&0], "A");
        assert_eq!(sheet[&1], "D");
        assert_eq!(sheet[&2], "C");
        assert_eq!(session.answered_count(), 3);
    }

    #[test]
    fn answer_sheet_requires_every_question_answered() {
        let mut session = three_question_session();
        session.select_answer(0, 0).unwrap();
        session.select_answer(1, 1).unwrap();

        let err = session.answer_sheet().unwrap_err();
        assert_eq!(
            err,
            QuizError::Incomplete {
                answered: 2,
                total: 3
            }
        );
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut session = three_question_session();
        assert!(matches!(
            session.select_answer(7, 0),
            Err(QuizError::QuestionOutOfRange { index: 7, total: 3 })
        ));
        assert!(matches!(
            session.select_answer(0, 9),
            Err(QuizError::OptionOutOfRange {
                index: 0,
                option: 9,
                available: 4
            })
        ));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn difficulty_progression_tops_out_at_hard() {
        assert_eq!(Difficulty::Easy.next(), Some(Difficulty::Medium));
        assert_eq!(Difficulty::Medium.next(), Some(Difficulty::Hard));
        assert_eq!(Difficulty::Hard.next(), None);
        assert!(Difficulty::Hard.is_max());
    }
}
