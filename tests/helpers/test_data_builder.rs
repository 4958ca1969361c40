// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use academic_records::domain::course::NewCourse;
use academic_records::domain::student::NewStudent;

// ==========================================
// NewStudent 构建器
// ==========================================

pub struct StudentBuilder {
    id: String,
    name: String,
    email: Option<String>,
    major: Option<String>,
    enrollment_year: Option<i32>,
}

impl StudentBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: None,
            major: None,
            enrollment_year: Some(2023),
        }
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn major(mut self, major: &str) -> Self {
        self.major = Some(major.to_string());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.enrollment_year = Some(year);
        self
    }

    pub fn build(self) -> NewStudent {
        NewStudent {
            id: self.id,
            name: self.name,
            email: self.email,
            major: self.major,
            enrollment_year: self.enrollment_year,
        }
    }
}

// ==========================================
// NewCourse 构建器
// ==========================================

pub struct CourseBuilder {
    course: NewCourse,
}

impl CourseBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            course: NewCourse::new(id, name, "Fall 2024"),
        }
    }

    pub fn semester(mut self, semester: &str) -> Self {
        self.course.semester = semester.to_string();
        self
    }

    pub fn credits(mut self, credits: i32) -> Self {
        self.course = self.course.with_credits(credits);
        self
    }

    pub fn instructor(mut self, instructor: &str) -> Self {
        self.course = self.course.with_instructor(instructor);
        self
    }

    pub fn build(self) -> NewCourse {
        self.course
    }
}
