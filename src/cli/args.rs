//! 命令行参数定义

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use academic_records::StudentStatus;

/// 学籍成绩管理系统命令行
#[derive(Debug, Parser)]
#[command(name = "academic-records", version, about = "学籍、课程、成绩管理与统计分析")]
pub struct Cli {
    /// 数据库文件（默认: 用户数据目录，或环境变量 ACADEMIC_DB_PATH）
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// 审计操作人 ID（默认取配置 audit.default_actor_id）
    #[arg(long, global = true, value_name = "ID")]
    pub actor: Option<i64>,

    /// 日志以 JSON 行输出
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// 学生状态参数
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StatusArg {
    Active,
    Inactive,
    Graduated,
}

impl From<StatusArg> for StudentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => Self::Active,
            StatusArg::Inactive => Self::Inactive,
            StatusArg::Graduated => Self::Graduated,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 初始化数据库（建表，幂等）
    Init,
    /// 学生管理
    Student {
        #[command(subcommand)]
        subcommand: StudentSubcommand,
    },
    /// 课程管理
    Course {
        #[command(subcommand)]
        subcommand: CourseSubcommand,
    },
    /// 成绩录入
    Grade {
        #[command(subcommand)]
        subcommand: GradeSubcommand,
    },
    /// 统计报表
    Report {
        #[command(subcommand)]
        subcommand: ReportSubcommand,
    },
    /// CSV 导入
    Import {
        #[command(subcommand)]
        subcommand: ImportSubcommand,
    },
    /// CSV 导出
    Export {
        #[command(subcommand)]
        subcommand: ExportSubcommand,
    },
    /// 配置管理
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// 查看操作日志（时间倒序）
    Log {
        /// 只看该操作人
        #[arg(long, value_name = "ID")]
        user: Option<i64>,
        /// 只看该操作类型，如 add_grade
        #[arg(long, conflicts_with = "user")]
        action: Option<String>,
        #[arg(long, default_value_t = academic_records::api::activity_log_api::DEFAULT_LOG_LIMIT)]
        limit: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum StudentSubcommand {
    /// 新增学生
    Add {
        /// 学号（至少 3 位字母或数字）
        id: String,
        /// 姓名
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        major: Option<String>,
        /// 入学年份
        #[arg(long, value_name = "YEAR")]
        year: Option<i32>,
    },
    /// 修改学生（未给出的可选字段将被清空）
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        major: Option<String>,
        #[arg(long, value_enum, default_value = "active")]
        status: StatusArg,
    },
    /// 删除学生（成绩一并删除）
    Delete { id: String },
    /// 删除全部学生
    DeleteAll {
        /// 确认删除
        #[arg(long)]
        yes: bool,
    },
    /// 列出全部学生
    List,
    /// 按学号、姓名、专业检索
    Search { query: String },
    /// 成绩单
    Transcript { id: String },
}

#[derive(Debug, Subcommand)]
pub enum CourseSubcommand {
    /// 新增课程
    Add {
        id: String,
        name: String,
        semester: String,
        /// 学分（1-6）
        #[arg(long, default_value_t = 3)]
        credits: i32,
        #[arg(long)]
        instructor: Option<String>,
    },
    /// 删除课程（成绩一并删除并重算 GPA）
    Delete { id: String },
    /// 删除全部课程（所有 GPA 归零）
    DeleteAll {
        /// 确认删除
        #[arg(long)]
        yes: bool,
    },
    /// 列出全部课程
    List,
}

#[derive(Debug, Subcommand)]
pub enum GradeSubcommand {
    /// 录入成绩（已存在则覆盖）
    Record {
        student_id: String,
        course_id: String,
        /// 百分制成绩 0-100
        grade: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportSubcommand {
    /// 不及格名单
    Failing,
    /// GPA 排名
    Rankings,
    /// 学业状态
    Status,
    /// 课程成绩统计
    Courses,
}

#[derive(Debug, Subcommand)]
pub enum ImportSubcommand {
    /// 导入学生 CSV（表头 id,name,email,major,enrollment_year）
    Students {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExportSubcommand {
    /// 导出完整报表 CSV
    Report {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// 显示配置；不给 KEY 时显示全部
    Get {
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// 写入配置
    Set {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
}
