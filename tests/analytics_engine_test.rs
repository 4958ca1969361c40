// ==========================================
// AnalyticsEngine 集成测试
// ==========================================
// 测试范围: GPA 排名、学业状态、课程统计
// ==========================================

mod helpers;

use helpers::api_test_helper::*;

fn setup() -> ApiTestEnv {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    for (id, name) in [("S001", "Alice"), ("S002", "Bob"), ("S003", "Carol"), ("S004", "Dan")] {
        env.prepare_student(id, name).unwrap();
    }
    env.prepare_course("C101", "Algorithms", 3).unwrap();
    env.prepare_course("C102", "Databases", 3).unwrap();
    env.prepare_course("C103", "Networks", 3).unwrap();
    env
}

#[test]
fn test_zero_gpa_students_absent_by_default() {
    let env = setup();
    env.grade_engine.record_grade("S001", "C101", 92.0, ACTOR).unwrap();
    env.grade_engine.record_grade("S002", "C101", 30.0, ACTOR).unwrap(); // gpa 0

    let analytics = env.analytics(false);
    let rankings = analytics.gpa_rankings().unwrap();
    assert_eq!(rankings.len(), 1);
    assert_eq!(rankings[0].id, "S001");

    let status = analytics.academic_status().unwrap();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].standing, "Dean's List");
}

#[test]
fn test_rankings_ordered_by_gpa_desc() {
    let env = setup();
    env.grade_engine.record_grade("S001", "C101", 72.0, ACTOR).unwrap(); // 2.0
    env.grade_engine.record_grade("S002", "C101", 95.0, ACTOR).unwrap(); // 4.0
    env.grade_engine.record_grade("S003", "C101", 85.0, ACTOR).unwrap(); // 3.0
    env.grade_engine.record_grade("S003", "C102", 65.0, ACTOR).unwrap(); // (3+1)/2 = 2.0

    let rankings = env.analytics(false).gpa_rankings().unwrap();
    let gpas: Vec<f64> = rankings.iter().map(|r| r.gpa).collect();
    assert_eq!(gpas, vec![4.0, 2.0, 2.0]);
    assert_eq!(rankings[0].id, "S002");
    let carol = rankings.iter().find(|r| r.id == "S003").unwrap();
    assert_eq!(carol.course_count, 2);
}

#[test]
fn test_academic_status_labels() {
    let env = setup();
    env.grade_engine.record_grade("S001", "C101", 91.0, ACTOR).unwrap(); // 4.0
    env.grade_engine.record_grade("S002", "C101", 81.0, ACTOR).unwrap(); // 3.0
    env.grade_engine.record_grade("S003", "C101", 61.0, ACTOR).unwrap(); // 1.0
    env.grade_engine.record_grade("S004", "C101", 61.0, ACTOR).unwrap();
    env.grade_engine.record_grade("S004", "C102", 10.0, ACTOR).unwrap(); // 0.5

    let status = env.analytics(false).academic_status().unwrap();
    let labels: Vec<(&str, &str)> = status
        .iter()
        .map(|r| (r.id.as_str(), r.standing.as_str()))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("S001", "Dean's List"),
            ("S002", "Good Standing"),
            ("S003", "Warning"),
            ("S004", "Academic Probation"),
        ]
    );
}

#[test]
fn test_include_zero_gpa_switch() {
    let env = setup();
    env.grade_engine.record_grade("S001", "C101", 92.0, ACTOR).unwrap();

    let status = env.analytics(true).academic_status().unwrap();
    assert_eq!(status.len(), 4);
    assert_eq!(status[0].id, "S001");
    assert!(status[1..]
        .iter()
        .all(|r| r.gpa == 0.0 && r.standing == "Academic Probation"));
}

#[test]
fn test_course_statistics() {
    let env = setup();
    env.grade_engine.record_grade("S001", "C101", 90.0, ACTOR).unwrap();
    env.grade_engine.record_grade("S002", "C101", 85.5, ACTOR).unwrap();
    env.grade_engine.record_grade("S003", "C101", 70.0, ACTOR).unwrap();
    env.grade_engine.record_grade("S001", "C102", 60.0, ACTOR).unwrap();

    let stats = env.analytics(false).course_statistics().unwrap();
    assert_eq!(stats.len(), 2, "无成绩的课程不出现");

    assert_eq!(stats[0].course_name, "Algorithms");
    assert_eq!(stats[0].semester, "Fall 2024");
    assert_eq!(stats[0].enrolled_count, 3);
    assert_eq!(stats[0].avg_grade, 81.83);
    assert_eq!(stats[0].min_grade, 70.0);
    assert_eq!(stats[0].max_grade, 90.0);

    assert_eq!(stats[1].course_name, "Databases");
    assert_eq!(stats[1].avg_grade, 60.0);
}
