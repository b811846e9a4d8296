//! LLM 服务 - 业务能力层
//!
//! 只负责"根据一段文本生成题目"能力，不关心分块和合并
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini, Azure, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{
    option_letter, MultipleChoiceQuestion, OptionLetter, QuestionQuota, Quiz, TrueFalse,
    TrueFalseQuestion,
};
use crate::services::quiz_generator::{GenerateError, QuizGenerator};

const SYSTEM_MESSAGE: &str = "You are a Quiz Question Creator for Educators. \
You read study material and write clear, age-appropriate questions that evenly cover it. \
You answer with JSON only, without explanations or commentary.";

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API，为单个分块生成题目
/// - 解析并清洗返回的 JSON
/// - 不出现分块列表
/// - 不关心总数量和截断
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, GenerateError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(request_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(request_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(request_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            request_failed(e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerateError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

impl QuizGenerator for LlmService {
    async fn generate(&self, text: &str, quota: QuestionQuota) -> Result<Quiz, GenerateError> {
        let prompt = build_quiz_prompt(text, quota);
        let response = self.send_to_llm(&prompt, Some(SYSTEM_MESSAGE)).await?;
        parse_quiz_response(&response, quota)
    }
}

fn request_failed(e: impl std::fmt::Display) -> GenerateError {
    GenerateError::RequestFailed(e.to_string())
}

/// 构建出题提示词
fn build_quiz_prompt(text: &str, quota: QuestionQuota) -> String {
    let mcq_task = match quota.mcq {
        0 => "- No multiple-choice questions (return an empty \"multiple_choice\" array).".to_string(),
        n => format!(
            "- Up to {} Multiple-Choice Questions (MCQs) with exactly 4 options each. Clearly mark the correct answer.",
            n
        ),
    };
    let tf_task = match quota.tf {
        0 => "- No true/false questions (return an empty \"true_false\" array).".to_string(),
        n => format!("- Up to {} True/False questions with correct answers.", n),
    };

    format!(
        r#"Input: the raw text of a study document is provided below.

Task:
1. Read the provided text.
2. Extract the main ideas, facts, and key points.
3. Create:
{}
{}
4. Ensure questions are clear, age-appropriate, and evenly cover the text. Write them in the same language as the text.
5. Output the result in JSON format using exactly this structure:

{{
  "multiple_choice": [
    {{
      "question": "....",
      "options": ["A) ...", "B) ...", "C) ...", "D) ..."],
      "answer": "B"
    }}
  ],
  "true_false": [
    {{
      "question": "....",
      "answer": "True"
    }}
  ]
}}

Do not include explanations or commentary, only the questions, options, and answers in the JSON.

---
{}
---
"#,
        mcq_task, tf_task, text
    )
}

#[derive(Debug, Deserialize)]
struct RawQuiz {
    multiple_choice: Vec<RawMultipleChoice>,
    true_false: Vec<RawTrueFalse>,
}

#[derive(Debug, Deserialize)]
struct RawMultipleChoice {
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    answer: String,
}

#[derive(Debug, Deserialize)]
struct RawTrueFalse {
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
}

/// 解析 LLM 返回的测验 JSON
///
/// 两个键都必须存在；单道格式不对的题目会被丢弃，超过配额的部分被截掉
fn parse_quiz_response(response: &str, quota: QuestionQuota) -> Result<Quiz, GenerateError> {
    let json = extract_json(response);

    let raw: RawQuiz = serde_json::from_str(json).map_err(|e| {
        warn!("无法解析 LLM 返回的 JSON: {}", e);
        GenerateError::InvalidFormat(e.to_string())
    })?;

    let mut quiz = Quiz {
        multiple_choice: raw
            .multiple_choice
            .into_iter()
            .filter_map(normalize_mcq)
            .collect(),
        true_false: raw.true_false.into_iter().filter_map(normalize_tf).collect(),
    };
    quiz.truncate(quota);

    Ok(quiz)
}

/// 去掉 Markdown 代码块，必要时截取第一个 `{` 到最后一个 `}`
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    let unfenced = match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
            rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    };

    if unfenced.starts_with('{') {
        return unfenced;
    }

    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => &unfenced[start..=end],
        _ => unfenced,
    }
}

fn normalize_mcq(raw: RawMultipleChoice) -> Option<MultipleChoiceQuestion> {
    let question = raw.question.trim();
    if question.is_empty() {
        warn!("丢弃选择题: 题干为空");
        return None;
    }
    if raw.options.len() != OptionLetter::ALL.len() {
        warn!("丢弃选择题 (选项数 {}): {}", raw.options.len(), question);
        return None;
    }
    let answer: OptionLetter = match raw.answer.parse() {
        Ok(answer) => answer,
        Err(e) => {
            warn!("丢弃选择题 ({}): {}", e, question);
            return None;
        }
    };

    // 缺少 "A) " 标签的选项按位置补上
    let options = raw
        .options
        .iter()
        .zip(OptionLetter::ALL)
        .map(|(option, letter)| {
            let option = option.trim();
            if option_letter(option) == Some(letter) {
                option.to_string()
            } else {
                format!("{}) {}", letter, option)
            }
        })
        .collect();

    Some(MultipleChoiceQuestion {
        question: question.to_string(),
        options,
        answer,
    })
}

fn normalize_tf(raw: RawTrueFalse) -> Option<TrueFalseQuestion> {
    let question = raw.question.trim();
    if question.is_empty() {
        warn!("丢弃判断题: 题干为空");
        return None;
    }
    let answer: TrueFalse = match raw.answer.parse() {
        Ok(answer) => answer,
        Err(e) => {
            warn!("丢弃判断题 ({}): {}", e, question);
            return None;
        }
    };

    Some(TrueFalseQuestion {
        question: question.to_string(),
        answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "multiple_choice": [
            {"question": "Where does photosynthesis happen?",
             "options": ["A) Mitochondria", "B) Chloroplast", "C) Nucleus", "D) Ribosome"],
             "answer": "B"}
        ],
        "true_false": [
            {"question": "Plants need light for photosynthesis.", "answer": "True"}
        ]
    }"#;

    #[test]
    fn test_prompt_contains_quota() {
        let prompt = build_quiz_prompt("Some text", QuestionQuota::new(3, 2));
        assert!(prompt.contains("Up to 3 Multiple-Choice"));
        assert!(prompt.contains("Up to 2 True/False"));
        assert!(prompt.contains("Some text"));
    }

    #[test]
    fn test_prompt_with_zero_category() {
        let prompt = build_quiz_prompt("Some text", QuestionQuota::new(1, 0));
        assert!(prompt.contains("No true/false questions"));
    }

    #[test]
    fn test_parse_plain_json() {
        let quiz = parse_quiz_response(SAMPLE, QuestionQuota::new(5, 5)).unwrap();
        assert_eq!(quiz.multiple_choice.len(), 1);
        assert_eq!(quiz.multiple_choice[0].answer, OptionLetter::B);
        assert_eq!(quiz.true_false[0].answer, TrueFalse::True);
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{}\n```", SAMPLE);
        let quiz = parse_quiz_response(&fenced, QuestionQuota::new(5, 5)).unwrap();
        assert_eq!(quiz.total_questions(), 2);

        let chatty = format!("Here is your quiz:\n{}\nEnjoy!", SAMPLE);
        let quiz = parse_quiz_response(&chatty, QuestionQuota::new(5, 5)).unwrap();
        assert_eq!(quiz.total_questions(), 2);
    }

    #[test]
    fn test_missing_key_is_invalid_format() {
        let result = parse_quiz_response(r#"{"multiple_choice": []}"#, QuestionQuota::new(5, 5));
        assert!(matches!(result, Err(GenerateError::InvalidFormat(_))));

        let result = parse_quiz_response("not json at all", QuestionQuota::new(5, 5));
        assert!(matches!(result, Err(GenerateError::InvalidFormat(_))));
    }

    #[test]
    fn test_malformed_questions_are_dropped() {
        let json = r#"{
            "multiple_choice": [
                {"question": "Three options", "options": ["A) x", "B) y", "C) z"], "answer": "A"},
                {"question": "Bad answer", "options": ["A) w", "B) x", "C) y", "D) z"], "answer": "E"},
                {"question": "Unlabeled", "options": ["w", "x", "y", "z"], "answer": "c"}
            ],
            "true_false": [
                {"question": "", "answer": "True"},
                {"question": "Maybe?", "answer": "Maybe"},
                {"question": "Lowercase", "answer": "false"}
            ]
        }"#;
        let quiz = parse_quiz_response(json, QuestionQuota::new(5, 5)).unwrap();

        assert_eq!(quiz.multiple_choice.len(), 1);
        let mcq = &quiz.multiple_choice[0];
        assert_eq!(mcq.question, "Unlabeled");
        assert_eq!(mcq.answer, OptionLetter::C);
        assert_eq!(mcq.options, vec!["A) w", "B) x", "C) y", "D) z"]);

        assert_eq!(quiz.true_false.len(), 1);
        assert_eq!(quiz.true_false[0].answer, TrueFalse::False);
    }

    #[test]
    fn test_surplus_is_cut_to_quota() {
        let json = r#"{
            "multiple_choice": [],
            "true_false": [
                {"question": "one", "answer": "True"},
                {"question": "two", "answer": "False"},
                {"question": "three", "answer": "True"}
            ]
        }"#;
        let quiz = parse_quiz_response(json, QuestionQuota::new(0, 2)).unwrap();
        assert_eq!(quiz.true_false.len(), 2);
        assert_eq!(quiz.true_false[1].question, "two");
    }

    /// 测试真实 LLM 调用
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=... cargo test test_generate_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_generate_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = LlmService::new(&Config::from_env());
        let text = "Photosynthesis is the process by which green plants use sunlight, \
                    water and carbon dioxide to produce glucose and oxygen. \
                    It takes place mainly in the chloroplasts of leaf cells.";

        let quiz = service
            .generate(text, QuestionQuota::new(2, 2))
            .await
            .expect("LLM 调用失败");

        println!("{}", serde_json::to_string_pretty(&quiz).unwrap());
        assert!(quiz.multiple_choice.len() <= 2);
        assert!(quiz.true_false.len() <= 2);
    }
}
