use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N} ._-]+$").expect("Invalid name regex"));

/// 校验班级/科目名称
///
/// 长度 1..=64，允许字母、数字、空格和 . _ - 连接符。
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.len() > 64 {
        return Err("Name must be at most 64 characters");
    }
    if !NAME_RE.is_match(trimmed) {
        return Err("Name contains invalid characters");
    }
    Ok(())
}

/// 校验班级容量：至少 1，至多 1000
pub fn validate_capacity(capacity: i32) -> Result<(), &'static str> {
    if !(1..=1000).contains(&capacity) {
        return Err("Capacity must be between 1 and 1000");
    }
    Ok(())
}

/// 校验年级：1 到 12
pub fn validate_grade(grade: i32) -> Result<(), &'static str> {
    if !(1..=12).contains(&grade) {
        return Err("Grade must be between 1 and 12");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("5A").is_ok());
        assert!(validate_name("Mathematics").is_ok());
        assert!(validate_name("Grade 5 - Section A").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(65)).is_err());
        assert!(validate_name("name;drop").is_err());
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(1).is_ok());
        assert!(validate_capacity(30).is_ok());
        assert!(validate_capacity(0).is_err());
        assert!(validate_capacity(-3).is_err());
        assert!(validate_capacity(1001).is_err());
    }

    #[test]
    fn test_validate_grade() {
        assert!(validate_grade(1).is_ok());
        assert!(validate_grade(12).is_ok());
        assert!(validate_grade(0).is_err());
        assert!(validate_grade(13).is_err());
    }
}
