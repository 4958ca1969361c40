// ==========================================
// 学籍成绩管理系统 - 输入校验
// ==========================================
// 职责: 本地可判定的约束在写库前校验，快速失败
// 红线: 唯一性不在这里判断，由数据库约束报出
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::course::{MAX_CREDITS, MIN_CREDITS};

/// 学号最短长度
pub const MIN_STUDENT_ID_LEN: usize = 3;

/// 学号: 至少 3 位，仅字母数字
pub fn validate_student_id(id: &str) -> ApiResult<()> {
    if id.chars().count() < MIN_STUDENT_ID_LEN || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::ValidationError(format!(
            "学号必须为至少 {} 位字母或数字: '{}'",
            MIN_STUDENT_ID_LEN, id
        )));
    }
    Ok(())
}

/// 必填文本字段（去除首尾空白后非空）
pub fn validate_required(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{}不能为空", field)));
    }
    Ok(())
}

/// 邮箱格式: `local@domain.tld`
///
/// local 与 domain 只允许字母、数字、下划线、`.`、`-`；
/// 最后一个 `.` 之后为至少一位的字母数字或下划线
pub fn is_valid_email(email: &str) -> bool {
    fn word_or(c: char, extra: &[char]) -> bool {
        c.is_alphanumeric() || c == '_' || extra.contains(&c)
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(|c| word_or(c, &['.', '-'])) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host.chars().all(|c| word_or(c, &['.', '-']))
        && !tld.is_empty()
        && tld.chars().all(|c| word_or(c, &[]))
}

/// 可选邮箱: 空白视为未填写（存 NULL），否则校验格式
///
/// # 返回
/// - `Ok(None)`: 未填写
/// - `Ok(Some(email))`: 去除首尾空白后的邮箱
pub fn normalize_email(email: Option<&str>) -> ApiResult<Option<String>> {
    match email.map(str::trim) {
        None | Some("") => Ok(None),
        Some(e) if is_valid_email(e) => Ok(Some(e.to_string())),
        Some(e) => Err(ApiError::ValidationError(format!("邮箱格式不正确: '{}'", e))),
    }
}

/// 学分范围
pub fn validate_credits(credits: i32) -> ApiResult<()> {
    if !(MIN_CREDITS..=MAX_CREDITS).contains(&credits) {
        return Err(ApiError::ValidationError(format!(
            "学分必须在 {} 到 {} 之间: {}",
            MIN_CREDITS, MAX_CREDITS, credits
        )));
    }
    Ok(())
}

/// 可选文本: 空白视为未填写
pub(crate) fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
