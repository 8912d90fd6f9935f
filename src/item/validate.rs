//! 도서/유통사 필드 유효성 검사 함수
//!
//! 모든 함수는 부수 효과가 없으며 실패시 [`ItemError::InvalidField`]를 반환한다.

use crate::item::{Field, ItemError};
use regex::Regex;
use std::sync::LazyLock;

/// 두 자리 - 구분자 - 두 자리 - 구분자 - 네 자리
/// 구분자는 점(.)이 아니어도 임의의 한 글자면 통과한다.
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}.[0-9]{2}.[0-9]{4}$").expect("date pattern must compile"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+359|0)[0-9]{9}$").expect("phone pattern must compile"));

pub fn is_valid_date(value: &str) -> bool {
    DATE_PATTERN.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

pub fn validate_non_empty(field: Field, value: &str) -> Result<(), ItemError> {
    if value.is_empty() {
        return Err(ItemError::invalid_field(field, format!("{} cannot be empty.", field)));
    }
    Ok(())
}

pub fn validate_positive_int(field: Field, value: i32) -> Result<(), ItemError> {
    if value <= 0 {
        return Err(ItemError::invalid_field(field, format!("{} must be greater than 0.", field)));
    }
    Ok(())
}

/// NaN과 무한대는 양수로 보지 않는다.
pub fn validate_positive_real(field: Field, value: f64) -> Result<(), ItemError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ItemError::invalid_field(field, format!("{} must be greater than 0.", field)));
    }
    Ok(())
}

/// # Example
/// ```
/// use textbook_distribution::item::Field;
/// use textbook_distribution::item::validate::validate_date;
///
/// assert!(validate_date(Field::PublishDate, "25.12.2024").is_ok());
/// assert!(validate_date(Field::PublishDate, "25X12X2024").is_ok());
/// assert!(validate_date(Field::PublishDate, "2025-12-01").is_err());
/// ```
pub fn validate_date(field: Field, value: &str) -> Result<(), ItemError> {
    if !is_valid_date(value) {
        return Err(ItemError::invalid_field(field, format!("{} must be in the format DD.MM.YYYY.", field)));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), ItemError> {
    if !is_valid_phone(value) {
        return Err(ItemError::invalid_field(
            Field::Phone,
            "Phone number is invalid. Please provide a valid phone number.",
        ));
    }
    Ok(())
}

/// 승인된 도서는 승인일이 필수이며, 승인 여부와 관계 없이 입력된 승인일은 날짜 형식이어야 한다.
pub fn validate_approval_date(value: &str, approved: bool) -> Result<(), ItemError> {
    if value.is_empty() {
        if approved {
            return Err(ItemError::invalid_field(
                Field::ApprovalDate,
                "Approval date cannot be empty for an approved textbook.",
            ));
        }
        return Ok(());
    }
    validate_date(Field::ApprovalDate, value)
}
