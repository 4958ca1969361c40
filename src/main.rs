// ==========================================
// 学籍成绩管理系统 - 命令行主入口
// ==========================================
// 外壳只做参数解析、装配与输出，不含业务逻辑
// ==========================================

mod cli;

use academic_records::app::{get_default_db_path, AppState};
use academic_records::logging;
use clap::Parser;
use cli::args::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();
    logging::init(args.log_json);

    let db_path = args
        .db
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(get_default_db_path);
    tracing::debug!("使用数据库: {}", db_path);

    let state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("无法初始化数据库: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // 操作人在分发前统一校验
    let actor_id = match state.resolve_actor(args.actor) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("错误: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli::commands::run(&state, actor_id, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}
