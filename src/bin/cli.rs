//! GraphLab CLI 工具
//!
//! 交互式图编辑与分析命令行界面

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use graphlab::cli::{CommandCompleter, CommandResult, Session};
use graphlab::Graph;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graphlab")]
#[command(version, about = "GraphLab 图编辑与分析工具")]
struct Args {
    /// 启动时读取的图文件
    file: Option<PathBuf>,

    /// 未指定文件时新建有向图
    #[arg(long)]
    directed: bool,

    /// 未指定文件时新建带权图
    #[arg(long)]
    weighted: bool,

    /// 依次执行命令后退出（可重复）
    #[arg(short = 'e', long)]
    execute: Vec<String>,

    /// 算法结果以 JSON 输出
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "graphlab=debug"
    } else {
        "graphlab=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut session = match &args.file {
        Some(path) => {
            let (session, report) = Session::open(path)
                .with_context(|| format!("无法读取图文件 {}", path.display()))?;
            if report.malformed > 0 || report.rejected > 0 {
                eprintln!(
                    "{} 跳过 {} 行格式错误，{} 行被拒绝",
                    "警告:".yellow().bold(),
                    report.malformed,
                    report.rejected
                );
            }
            session
        }
        None => Session::new(Graph::new(args.directed, args.weighted)),
    }
    .with_json(args.json);

    // 批处理模式
    if !args.execute.is_empty() {
        let mut failed = false;
        for command in &args.execute {
            match session.execute(command) {
                CommandResult::Exit => break,
                result => failed |= !report(result),
            }
        }
        if failed {
            anyhow::bail!("部分命令执行失败");
        }
        return Ok(());
    }

    run_interactive(&mut session)
}

fn run_interactive(session: &mut Session) -> anyhow::Result<()> {
    println!("GraphLab CLI v{}", graphlab::VERSION);
    println!("输入 'help' 查看命令列表，'quit' 退出\n");

    let mut editor: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CommandCompleter::new()));

    let history = history_path();
    if let Some(path) = &history {
        // 首次运行时历史文件不存在
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("graphlab> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                match session.execute(&line) {
                    CommandResult::Exit => break,
                    result => {
                        report(result);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        if let Err(e) = editor.save_history(path) {
            tracing::warn!(error = %e, "failed to save history");
        }
    }

    println!("再见！");
    Ok(())
}

/// 打印命令结果，返回是否成功
fn report(result: CommandResult) -> bool {
    match result {
        CommandResult::Message(message) => {
            println!("{}", message.trim_end());
            true
        }
        CommandResult::Error(e) => {
            eprintln!("{} {}", "错误:".red().bold(), e);
            false
        }
        CommandResult::Continue | CommandResult::Exit => true,
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("graphlab").join("history.txt"))
}
