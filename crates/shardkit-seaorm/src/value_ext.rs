use sea_orm::Value;

/// 为 [`Value`] 补充空值判定
///
/// 本版本 sea-query 的 `Value` 以 `Value::Xxx(None)` 表达 SQL NULL,
/// 但未提供直接的空值判定方法; `as_null()` 会返回同类型的空变体,
/// 故 `value == value.as_null()` 当且仅当该值本身已是空变体
pub(crate) trait ValueNullExt {
    fn is_null(&self) -> bool;
}

impl ValueNullExt for Value {
    fn is_null(&self) -> bool {
        self.as_null() == *self
    }
}
