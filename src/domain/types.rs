// ==========================================
// 学籍成绩管理系统 - 领域类型定义
// ==========================================
// 内容: 学籍状态 / 字母等级 / 学业状态 / 用户角色
// 成绩换算表: (下限, 字母, 绩点) 三元组，字母与绩点共用一张表
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 学籍状态 (Student Status)
// ==========================================
// 序列化格式: 小写 (与数据库 CHECK 约束一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,    // 在读
    Inactive,  // 休学
    Graduated, // 毕业
}

impl StudentStatus {
    /// 转换为数据库存储值
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
            StudentStatus::Graduated => "graduated",
        }
    }

    /// 从数据库值解析（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Some(StudentStatus::Active),
            "inactive" => Some(StudentStatus::Inactive),
            "graduated" => Some(StudentStatus::Graduated),
            _ => None,
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 字母等级 (Letter Grade)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 成绩换算表
// ==========================================
// 下限为闭区间: 恰好 90/80/70/60 归入较高等级
// 顺序: 下限从高到低，首个命中即结果

/// 换算表条目
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeBand {
    pub lower_bound: f64,
    pub letter: LetterGrade,
    pub points: f64,
}

/// 成绩换算表
pub static GRADE_SCALE: [GradeBand; 5] = [
    GradeBand { lower_bound: 90.0, letter: LetterGrade::A, points: 4.0 },
    GradeBand { lower_bound: 80.0, letter: LetterGrade::B, points: 3.0 },
    GradeBand { lower_bound: 70.0, letter: LetterGrade::C, points: 2.0 },
    GradeBand { lower_bound: 60.0, letter: LetterGrade::D, points: 1.0 },
    GradeBand { lower_bound: f64::NEG_INFINITY, letter: LetterGrade::F, points: 0.0 },
];

/// 不及格线（严格小于）
pub const PASSING_GRADE: f64 = 60.0;

/// 查找分数所在档位
pub fn grade_band(grade: f64) -> &'static GradeBand {
    GRADE_SCALE
        .iter()
        .find(|band| grade >= band.lower_bound)
        .unwrap_or(&GRADE_SCALE[GRADE_SCALE.len() - 1])
}

/// 分数 → 字母等级
pub fn letter_for(grade: f64) -> LetterGrade {
    grade_band(grade).letter
}

/// 分数 → 绩点
pub fn gpa_points_for(grade: f64) -> f64 {
    grade_band(grade).points
}

// ==========================================
// 学业状态 (Academic Standing)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    DeansList,         // ≥3.5
    GoodStanding,      // ≥2.0
    Warning,           // ≥1.0
    AcademicProbation, // 其余
}

impl Standing {
    /// 根据 GPA 判定学业状态
    pub fn classify(gpa: f64) -> Self {
        if gpa >= 3.5 {
            Standing::DeansList
        } else if gpa >= 2.0 {
            Standing::GoodStanding
        } else if gpa >= 1.0 {
            Standing::Warning
        } else {
            Standing::AcademicProbation
        }
    }

    /// 展示标签
    pub fn label(&self) -> &'static str {
        match self {
            Standing::DeansList => "Dean's List",
            Standing::GoodStanding => "Good Standing",
            Standing::Warning => "Warning",
            Standing::AcademicProbation => "Academic Probation",
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 用户角色 (User Role)
// ==========================================
// 仅作为标签存储，不做授权判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Student => "student",
        }
    }
}

/// 保留两位小数，恰好居中时取偶（2.125 → 2.12，2.375 → 2.38）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
