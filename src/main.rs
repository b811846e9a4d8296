use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};

use quiz_assembler::models::{load_source_text, option_text, OptionLetter, Quiz, TrueFalse};
use quiz_assembler::services::{grade, AnswerSheet, QuizExporter};
use quiz_assembler::utils::logging;
use quiz_assembler::{Config, LlmService, QuizFlow};

/// 从学习材料生成测验
#[derive(Debug, Parser)]
#[command(name = "quiz_assembler", version)]
struct Args {
    /// 材料文件（.txt / .md）
    input: Option<PathBuf>,

    /// 直接提供材料文本
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// 题目数量：5、10、20、Max 或 1-50 的自定义数量
    #[arg(short, long, default_value = "10")]
    count: String,

    /// TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 导出为纯文本文件
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// 生成后在终端作答并评分
    #[arg(short, long)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置
    let config = match &args.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::from_env(),
    };
    config.validate().context("配置校验失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    if config.llm_api_key.is_empty() {
        bail!("未设置 LLM_API_KEY");
    }

    let text = match (&args.input, &args.text) {
        (Some(path), _) => load_source_text(path).await?,
        (None, Some(text)) => text.clone(),
        (None, None) => bail!("请提供材料文件或 --text"),
    };

    let flow = QuizFlow::new(&config, LlmService::new(&config));

    let quiz = match flow.run(&text, &args.count).await {
        Ok(quiz) => quiz,
        Err(e) => {
            error!("❌ 生成失败: {}", e);
            return Err(e.into());
        }
    };

    let exporter = QuizExporter::new();
    let export_path = args
        .export
        .clone()
        .or_else(|| config.export_path.as_ref().map(PathBuf::from));

    match export_path {
        Some(path) => exporter.write_to(&quiz, &path).await?,
        None if !args.interactive => println!("{}", exporter.render(&quiz)),
        None => {}
    }

    if args.interactive {
        take_quiz(&quiz)?;
    }

    Ok(())
}

/// 在终端逐题作答，最后输出得分
fn take_quiz(quiz: &Quiz) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut sheet = AnswerSheet::new();
    let mcq_count = quiz.multiple_choice.len();

    for (i, q) in quiz.multiple_choice.iter().enumerate() {
        println!("\n{}. {}", i + 1, q.question);
        for (option, letter) in q.options.iter().zip(OptionLetter::ALL) {
            println!("   {}) {}", letter, option_text(option));
        }
        loop {
            let input = prompt(&mut lines, "你的答案 (A-D): ")?;
            match input.parse::<OptionLetter>() {
                Ok(letter) => {
                    sheet.answer_mcq(i, letter);
                    break;
                }
                Err(e) => println!("{}", e),
            }
        }
    }

    for (i, q) in quiz.true_false.iter().enumerate() {
        println!("\n{}. {}", mcq_count + i + 1, q.question);
        loop {
            let input = prompt(&mut lines, "你的答案 (True/False): ")?;
            match input.parse::<TrueFalse>() {
                Ok(answer) => {
                    sheet.answer_tf(i, answer);
                    break;
                }
                Err(e) => println!("{}", e),
            }
        }
    }

    let score = grade(quiz, &sheet);
    info!("🏁 测验完成，得分: {}", score);
    println!("\n得分: {}", score);

    for (i, q) in quiz.multiple_choice.iter().enumerate() {
        println!("{}. 正确答案 {}", i + 1, q.answer);
    }
    for (i, q) in quiz.true_false.iter().enumerate() {
        println!("{}. 正确答案 {}", mcq_count + i + 1, q.answer);
    }

    Ok(())
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => bail!("输入已结束，测验未完成"),
    }
}
