//! 答题与评分服务 - 业务能力层
//!
//! 只负责"记录作答、计算得分"能力

use std::collections::HashMap;
use std::fmt;

use crate::models::{OptionLetter, Quiz, TrueFalse};

/// 题目在答题卡中的键
///
/// 每类题目各自从 0 开始编号，字符串形式为 `mc-0` / `tf-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKey {
    MultipleChoice(usize),
    TrueFalse(usize),
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleChoice(i) => write!(f, "mc-{}", i),
            Self::TrueFalse(i) => write!(f, "tf-{}", i),
        }
    }
}

impl std::str::FromStr for QuestionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, index) = s
            .split_once('-')
            .ok_or_else(|| format!("无效的题目键: {}", s))?;
        let index: usize = index
            .parse()
            .map_err(|_| format!("无效的题目序号: {}", s))?;
        match kind {
            "mc" => Ok(Self::MultipleChoice(index)),
            "tf" => Ok(Self::TrueFalse(index)),
            _ => Err(format!("无效的题目类型: {}", s)),
        }
    }
}

/// 一次作答
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Choice(OptionLetter),
    TrueFalse(TrueFalse),
}

/// 答题卡
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: HashMap<QuestionKey, Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 作答选择题，重复作答以最后一次为准
    pub fn answer_mcq(&mut self, index: usize, letter: OptionLetter) {
        self.answers
            .insert(QuestionKey::MultipleChoice(index), Answer::Choice(letter));
    }

    /// 作答判断题
    pub fn answer_tf(&mut self, index: usize, answer: TrueFalse) {
        self.answers
            .insert(QuestionKey::TrueFalse(index), Answer::TrueFalse(answer));
    }

    pub fn get(&self, key: QuestionKey) -> Option<Answer> {
        self.answers.get(&key).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// 是否每道题都已作答
    pub fn is_complete(&self, quiz: &Quiz) -> bool {
        let mcq_done = (0..quiz.multiple_choice.len())
            .all(|i| self.answers.contains_key(&QuestionKey::MultipleChoice(i)));
        let tf_done = (0..quiz.true_false.len())
            .all(|i| self.answers.contains_key(&QuestionKey::TrueFalse(i)));
        quiz.total_questions() > 0 && mcq_done && tf_done
    }
}

/// 得分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// 百分比，题目总数为 0 时返回 0
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.0}%)", self.correct, self.total, self.percentage())
    }
}

/// 计算得分，未作答的题目按错误计
pub fn grade(quiz: &Quiz, sheet: &AnswerSheet) -> Score {
    let mcq_correct = quiz
        .multiple_choice
        .iter()
        .enumerate()
        .filter(|(i, q)| {
            sheet.get(QuestionKey::MultipleChoice(*i)) == Some(Answer::Choice(q.answer))
        })
        .count();

    let tf_correct = quiz
        .true_false
        .iter()
        .enumerate()
        .filter(|(i, q)| sheet.get(QuestionKey::TrueFalse(*i)) == Some(Answer::TrueFalse(q.answer)))
        .count();

    Score {
        correct: mcq_correct + tf_correct,
        total: quiz.total_questions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MultipleChoiceQuestion, TrueFalseQuestion};

    fn sample_quiz() -> Quiz {
        Quiz {
            multiple_choice: vec![
                MultipleChoiceQuestion {
                    question: "2 + 2 = ?".to_string(),
                    options: vec!["A) 3".into(), "B) 4".into(), "C) 5".into(), "D) 22".into()],
                    answer: OptionLetter::B,
                },
                MultipleChoiceQuestion {
                    question: "Capital of France?".to_string(),
                    options: vec!["A) Paris".into(), "B) Rome".into(), "C) Oslo".into(), "D) Bern".into()],
                    answer: OptionLetter::A,
                },
            ],
            true_false: vec![TrueFalseQuestion {
                question: "The sun is a star.".to_string(),
                answer: TrueFalse::True,
            }],
        }
    }

    #[test]
    fn test_question_key_round_trip() {
        assert_eq!("mc-0".parse::<QuestionKey>().unwrap(), QuestionKey::MultipleChoice(0));
        assert_eq!(QuestionKey::TrueFalse(3).to_string(), "tf-3");
        assert!("xx-1".parse::<QuestionKey>().is_err());
        assert!("mc-a".parse::<QuestionKey>().is_err());
    }

    #[test]
    fn test_grade_counts_correct_answers() {
        let quiz = sample_quiz();
        let mut sheet = AnswerSheet::new();
        sheet.answer_mcq(0, OptionLetter::B);
        sheet.answer_mcq(1, OptionLetter::C);
        sheet.answer_tf(0, TrueFalse::True);

        let score = grade(&quiz, &sheet);
        assert_eq!(score, Score { correct: 2, total: 3 });
        assert!(sheet.is_complete(&quiz));
    }

    #[test]
    fn test_unanswered_counts_as_wrong() {
        let quiz = sample_quiz();
        let mut sheet = AnswerSheet::new();
        sheet.answer_tf(0, TrueFalse::True);

        assert_eq!(grade(&quiz, &sheet).correct, 1);
        assert!(!sheet.is_complete(&quiz));
        assert_eq!(sheet.answered_count(), 1);
    }

    #[test]
    fn test_last_answer_wins() {
        let quiz = sample_quiz();
        let mut sheet = AnswerSheet::new();
        sheet.answer_mcq(0, OptionLetter::A);
        sheet.answer_mcq(0, OptionLetter::B);
        assert_eq!(grade(&quiz, &sheet).correct, 1);
    }

    #[test]
    fn test_empty_quiz_percentage_is_zero() {
        let score = grade(&Quiz::default(), &AnswerSheet::new());
        assert_eq!(score.total, 0);
        assert_eq!(score.percentage(), 0.0);
        assert!(!AnswerSheet::new().is_complete(&Quiz::default()));
    }
}
