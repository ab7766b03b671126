use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 分页查询参数
//
// page/size 允许前端传字符串，无法解析时回退到默认值，
// 与旧版仪表盘 parseInt 失败后回退首页的行为保持一致。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_lenient_page")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "deserialize_lenient_size")]
    pub size: i64,
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationQuery {
    /// 规范化页码和单页条数：页码至少为 1，条数夹在 1..=max 之间
    pub fn normalize(&self, max_size: i64) -> (u64, u64) {
        let page = self.page.max(1) as u64;
        let size = self.size.clamp(1, max_size.max(1)) as u64;
        (page, size)
    }

    /// 偏移量 = 单页条数 × (页码 - 1)，极端页码下饱和而不是溢出
    pub fn offset(&self, max_size: i64) -> u64 {
        let (page, size) = self.normalize(max_size);
        size.saturating_mul(page - 1)
    }
}

// 自定义反序列化函数，支持字符串到i64的转换，解析失败时回退默认值
fn deserialize_lenient_i64<'de, D>(deserializer: D, fallback: i64) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct LenientI64Visitor(i64);

    impl<'de> Visitor<'de> for LenientI64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value.trim().parse().unwrap_or(self.0))
        }
    }

    deserializer.deserialize_any(LenientI64Visitor(fallback))
}

fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_lenient_i64(deserializer, default_page())
}

fn deserialize_lenient_size<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_lenient_i64(deserializer, default_size())
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_defaults_to_one_when_absent() {
        let q: PaginationQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.size, 10);
    }

    #[test]
    fn test_page_defaults_to_one_when_not_numeric() {
        let q: PaginationQuery = serde_json::from_value(json!({"page": "abc"})).unwrap();
        assert_eq!(q.page, 1);

        let q: PaginationQuery = serde_json::from_value(json!({"page": ""})).unwrap();
        assert_eq!(q.page, 1);
    }

    #[test]
    fn test_page_parses_string_numbers() {
        let q: PaginationQuery =
            serde_json::from_value(json!({"page": "3", "size": "20"})).unwrap();
        assert_eq!(q.page, 3);
        assert_eq!(q.size, 20);
    }

    #[test]
    fn test_size_falls_back_to_default_when_garbage() {
        let q: PaginationQuery = serde_json::from_value(json!({"size": "huge"})).unwrap();
        assert_eq!(q.size, 10);
    }

    #[test]
    fn test_offset_formula() {
        let q = PaginationQuery { page: 1, size: 10 };
        assert_eq!(q.offset(100), 0);

        let q = PaginationQuery { page: 4, size: 25 };
        assert_eq!(q.offset(100), 75);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let q = PaginationQuery {
            page: i64::MAX,
            size: 10,
        };
        assert_eq!(q.offset(100), u64::MAX);
    }

    #[test]
    fn test_normalize_clamps_page_and_size() {
        let q = PaginationQuery { page: 0, size: 10 };
        assert_eq!(q.normalize(100), (1, 10));

        let q = PaginationQuery { page: -5, size: 0 };
        assert_eq!(q.normalize(100), (1, 1));

        let q = PaginationQuery {
            page: 2,
            size: 9999,
        };
        assert_eq!(q.normalize(100), (2, 100));
    }
}
