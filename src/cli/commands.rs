//! 子命令执行：只做参数转换与输出格式化

use academic_records::api::{ApiError, ApiResult};
use academic_records::app::AppState;
use academic_records::{NewCourse, NewStudent, StudentUpdate};
use serde_json::Value as JsonValue;

use crate::cli::args::{
    Command, ConfigSubcommand, CourseSubcommand, ExportSubcommand, GradeSubcommand,
    ImportSubcommand, ReportSubcommand, StudentSubcommand,
};

/// 执行子命令
pub fn run(state: &AppState, actor_id: i64, command: Command) -> ApiResult<()> {
    match command {
        Command::Init => {
            println!("数据库已就绪: {}", state.db_path);
            Ok(())
        }
        Command::Student { subcommand } => student(state, actor_id, subcommand),
        Command::Course { subcommand } => course(state, actor_id, subcommand),
        Command::Grade { subcommand } => grade(state, actor_id, subcommand),
        Command::Report { subcommand } => report(state, subcommand),
        Command::Import {
            subcommand: ImportSubcommand::Students { file },
        } => {
            let summary = state.student_importer.import(&file, actor_id)?;
            println!(
                "导入 {} 名学生（已存在 {}，无效 {}）",
                summary.imported, summary.duplicates, summary.skipped
            );
            Ok(())
        }
        Command::Export {
            subcommand: ExportSubcommand::Report { file },
        } => {
            let rows = state.report_exporter.export_full_report(&file, actor_id)?;
            println!("已导出 {} 行到 {}", rows, file.display());
            Ok(())
        }
        Command::Config { subcommand } => config(state, subcommand),
        Command::Log { user, action, limit } => {
            let entries = state.activity_log_api.recent(user, action.as_deref(), limit)?;
            for e in entries {
                let at = e
                    .timestamp
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default();
                println!(
                    "{:<19} {:>4} {:<16} {}",
                    at,
                    e.user_id,
                    e.action,
                    e.details.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }
    }
}

fn require_confirmation(yes: bool) -> ApiResult<()> {
    if yes {
        Ok(())
    } else {
        Err(ApiError::ValidationError(
            "批量删除不可恢复，请加 --yes 确认".to_string(),
        ))
    }
}

fn student(state: &AppState, actor_id: i64, subcommand: StudentSubcommand) -> ApiResult<()> {
    let api = &state.student_api;
    match subcommand {
        StudentSubcommand::Add {
            id,
            name,
            email,
            major,
            year,
        } => {
            api.add(
                &NewStudent {
                    id: id.clone(),
                    name,
                    email,
                    major,
                    enrollment_year: year,
                },
                actor_id,
            )?;
            println!("已新增学生 {}", id);
        }
        StudentSubcommand::Update {
            id,
            name,
            email,
            major,
            status,
        } => {
            api.update(
                &id,
                &StudentUpdate {
                    name,
                    email,
                    major,
                    status: status.into(),
                },
                actor_id,
            )?;
            println!("已修改学生 {}", id);
        }
        StudentSubcommand::Delete { id } => {
            let name = api.delete(&id, actor_id)?;
            println!("已删除学生 {} ({})", name, id);
        }
        StudentSubcommand::DeleteAll { yes } => {
            require_confirmation(yes)?;
            let count = api.delete_all(actor_id)?;
            println!("已删除全部 {} 名学生", count);
        }
        StudentSubcommand::List => print_students(&api.list_all()?),
        StudentSubcommand::Search { query } => print_students(&api.search(&query)?),
        StudentSubcommand::Transcript { id } => {
            println!("{:<30} {:<14} {:>3} {:>7} {:<2} {}", "Course", "Semester", "Cr", "Grade", "L", "Graded");
            for e in api.transcript(&id)? {
                println!(
                    "{:<30} {:<14} {:>3} {:>7.2} {:<2} {}",
                    e.course_name, e.semester, e.credits, e.grade, e.letter_grade, e.graded_at
                );
            }
        }
    }
    Ok(())
}

fn print_students(students: &[academic_records::Student]) {
    println!("{:<10} {:<24} {:<28} {:<16} {:>5} {:>5} {}", "ID", "Name", "Email", "Major", "Year", "GPA", "Status");
    for s in students {
        println!(
            "{:<10} {:<24} {:<28} {:<16} {:>5} {:>5.2} {}",
            s.id,
            s.name,
            s.email.as_deref().unwrap_or("-"),
            s.major.as_deref().unwrap_or("-"),
            s.enrollment_year.map(|y| y.to_string()).unwrap_or_default(),
            s.gpa,
            s.status.as_str()
        );
    }
}

fn course(state: &AppState, actor_id: i64, subcommand: CourseSubcommand) -> ApiResult<()> {
    let api = &state.course_api;
    match subcommand {
        CourseSubcommand::Add {
            id,
            name,
            semester,
            credits,
            instructor,
        } => {
            let mut course = NewCourse::new(&id, &name, &semester).with_credits(credits);
            course.instructor = instructor;
            api.add(&course, actor_id)?;
            println!("已新增课程 {}", id);
        }
        CourseSubcommand::Delete { id } => {
            let name = api.delete(&id, actor_id)?;
            println!("已删除课程 {} ({})", name, id);
        }
        CourseSubcommand::DeleteAll { yes } => {
            require_confirmation(yes)?;
            let count = api.delete_all(actor_id)?;
            println!("已删除全部 {} 门课程，所有 GPA 已归零", count);
        }
        CourseSubcommand::List => {
            println!("{:<10} {:<30} {:<14} {:>3} {:<20} {:>4}", "ID", "Name", "Semester", "Cr", "Instructor", "Cap");
            for c in api.list_all()? {
                println!(
                    "{:<10} {:<30} {:<14} {:>3} {:<20} {:>4}",
                    c.id,
                    c.name,
                    c.semester,
                    c.credits,
                    c.instructor.as_deref().unwrap_or("-"),
                    c.max_capacity
                );
            }
        }
    }
    Ok(())
}

fn grade(state: &AppState, actor_id: i64, subcommand: GradeSubcommand) -> ApiResult<()> {
    match subcommand {
        GradeSubcommand::Record {
            student_id,
            course_id,
            grade,
        } => {
            let recorded = state
                .grade_engine
                .record_grade_str(&student_id, &course_id, &grade, actor_id)?;
            match recorded.gpa {
                Some(gpa) => println!(
                    "{} 在 {} 的成绩 {} ({})，当前 GPA {:.2}",
                    student_id,
                    course_id,
                    recorded.grade,
                    recorded.letter_grade.as_str(),
                    gpa
                ),
                None => println!("{} 在 {} 的成绩已录入", student_id, course_id),
            }
        }
    }
    Ok(())
}

fn report(state: &AppState, subcommand: ReportSubcommand) -> ApiResult<()> {
    match subcommand {
        ReportSubcommand::Failing => {
            let rows = state.grade_engine.list_failing_students()?;
            if rows.is_empty() {
                println!("没有不及格成绩");
            }
            for r in rows {
                println!(
                    "{:<24} {:<10} {:<28} {:<30} {:>6.2} {}",
                    r.student_name,
                    r.student_id,
                    r.email.as_deref().unwrap_or("-"),
                    r.course_name,
                    r.grade,
                    r.letter_grade
                );
            }
        }
        ReportSubcommand::Rankings => {
            for (rank, r) in state.analytics_engine.gpa_rankings()?.iter().enumerate() {
                println!("{:>3}. {:<24} {:<10} {:>5.2} ({} 门)", rank + 1, r.name, r.id, r.gpa, r.course_count);
            }
        }
        ReportSubcommand::Status => {
            for r in state.analytics_engine.academic_status()? {
                println!("{:<24} {:<10} {:>5.2} {:>3} {}", r.name, r.id, r.gpa, r.course_count, r.standing);
            }
        }
        ReportSubcommand::Courses => {
            for r in state.analytics_engine.course_statistics()? {
                println!(
                    "{:<30} {:<14} n={:<4} avg={:>6.2} min={:>6.2} max={:>6.2}",
                    r.course_name, r.semester, r.enrolled_count, r.avg_grade, r.min_grade, r.max_grade
                );
            }
        }
    }
    Ok(())
}

fn config(state: &AppState, subcommand: ConfigSubcommand) -> ApiResult<()> {
    match subcommand {
        ConfigSubcommand::Get { key } => {
            let snapshot: JsonValue = serde_json::from_str(&state.config_manager.get_config_snapshot()?)
                .map_err(|e| ApiError::InternalError(e.to_string()))?;
            match key {
                Some(key) => match snapshot.get(&key) {
                    Some(value) => println!("{} = {}", key, value),
                    None => return Err(ApiError::NotFound(format!("配置项 {} 不存在", key))),
                },
                None => {
                    if let JsonValue::Object(map) = snapshot {
                        for (key, value) in map {
                            println!("{} = {}", key, value);
                        }
                    }
                }
            }
        }
        ConfigSubcommand::Set { key, value } => {
            state.config_manager.set_value(&key, &value)?;
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}
