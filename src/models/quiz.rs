use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 选项前缀，如 "A) "、"B. "、"C "
fn option_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-D])\)?\.?\s*").expect("选项前缀正则无效"))
}

/// 解析选项的字母标签，如 "B) Paris" → `Some(B)`
pub fn option_letter(option: &str) -> Option<OptionLetter> {
    option_prefix_regex()
        .captures(option)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// 去掉选项的字母标签，如 "B) Paris" → "Paris"
pub fn option_text(option: &str) -> &str {
    let rest = match option_prefix_regex().find(option) {
        Some(m) => &option[m.end()..],
        None => option,
    };
    rest.trim()
}

/// 选择题选项字母
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionLetter {
    type Err = String;

    /// 接受 "B"、"b"、"B)"、"B." 这类写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches([')', '.']);
        match trimmed.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            _ => Err(format!("无效的选项字母: {}", s)),
        }
    }
}

/// 判断题答案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrueFalse {
    True,
    False,
}

impl TrueFalse {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
        }
    }
}

impl fmt::Display for TrueFalse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrueFalse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" => Ok(Self::True),
            "false" | "f" => Ok(Self::False),
            _ => Err(format!("无效的判断题答案: {}", s)),
        }
    }
}

impl From<bool> for TrueFalse {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

/// 选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceQuestion {
    pub question: String,
    /// 四个带标签的选项，形如 "A) ..."
    pub options: Vec<String>,
    pub answer: OptionLetter,
}

/// 判断题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueFalseQuestion {
    pub question: String,
    pub answer: TrueFalse,
}

/// 每类题目的数量，用于分块配额和总目标
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionQuota {
    pub mcq: usize,
    pub tf: usize,
}

impl QuestionQuota {
    pub fn new(mcq: usize, tf: usize) -> Self {
        Self { mcq, tf }
    }

    pub fn total(&self) -> usize {
        self.mcq + self.tf
    }
}

impl fmt::Display for QuestionQuota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 道选择题 + {} 道判断题", self.mcq, self.tf)
    }
}

/// 测验
///
/// 顺序即插入顺序：分块顺序，块内保持后端返回的顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub multiple_choice: Vec<MultipleChoiceQuestion>,
    pub true_false: Vec<TrueFalseQuestion>,
}

impl Quiz {
    pub fn is_empty(&self) -> bool {
        self.multiple_choice.is_empty() && self.true_false.is_empty()
    }

    pub fn total_questions(&self) -> usize {
        self.multiple_choice.len() + self.true_false.len()
    }

    /// 当前各类题目数量
    pub fn counts(&self) -> QuestionQuota {
        QuestionQuota::new(self.multiple_choice.len(), self.true_false.len())
    }

    /// 按类别追加另一份测验，保持顺序
    pub fn append(&mut self, other: Quiz) {
        self.multiple_choice.extend(other.multiple_choice);
        self.true_false.extend(other.true_false);
    }

    /// 按类别截断到给定数量，多余的从尾部丢弃
    pub fn truncate(&mut self, limit: QuestionQuota) {
        self.multiple_choice.truncate(limit.mcq);
        self.true_false.truncate(limit.tf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tf(question: &str) -> TrueFalseQuestion {
        TrueFalseQuestion {
            question: question.to_string(),
            answer: TrueFalse::True,
        }
    }

    #[test]
    fn test_option_letter_parsing() {
        assert_eq!("B".parse::<OptionLetter>().unwrap(), OptionLetter::B);
        assert_eq!(" c) ".parse::<OptionLetter>().unwrap(), OptionLetter::C);
        assert_eq!("D.".parse::<OptionLetter>().unwrap(), OptionLetter::D);
        assert!("E".parse::<OptionLetter>().is_err());
        assert!("".parse::<OptionLetter>().is_err());
    }

    #[test]
    fn test_option_label_helpers() {
        assert_eq!(option_letter("B) Paris"), Some(OptionLetter::B));
        assert_eq!(option_letter("C. Rome"), Some(OptionLetter::C));
        assert_eq!(option_letter("paris"), None);
        assert_eq!(option_text("B) Paris"), "Paris");
        assert_eq!(option_text("D.   Madrid "), "Madrid");
        assert_eq!(option_text("no label"), "no label");
    }

    #[test]
    fn test_true_false_parsing() {
        assert_eq!("True".parse::<TrueFalse>().unwrap(), TrueFalse::True);
        assert_eq!("false".parse::<TrueFalse>().unwrap(), TrueFalse::False);
        assert!("maybe".parse::<TrueFalse>().is_err());
    }

    #[test]
    fn test_quiz_json_shape() {
        let json = r#"{
            "multiple_choice": [
                {"question": "Q1", "options": ["A) a", "B) b", "C) c", "D) d"], "answer": "B"}
            ],
            "true_false": [{"question": "Q2", "answer": "False"}]
        }"#;
        let quiz: Quiz = serde_json::from_str(json).unwrap();
        assert_eq!(quiz.multiple_choice[0].answer, OptionLetter::B);
        assert_eq!(quiz.true_false[0].answer, TrueFalse::False);
        assert_eq!(quiz.total_questions(), 2);
    }

    #[test]
    fn test_append_then_truncate_drops_tail() {
        let mut quiz = Quiz {
            multiple_choice: vec![],
            true_false: vec![tf("a"), tf("b")],
        };
        quiz.append(Quiz {
            multiple_choice: vec![],
            true_false: vec![tf("c")],
        });
        quiz.truncate(QuestionQuota::new(0, 2));

        let questions: Vec<&str> = quiz.true_false.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(questions, vec!["a", "b"]);
        assert_eq!(quiz.counts().total(), 2);
    }
}
