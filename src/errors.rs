//! 统一错误处理模块
//!
//! 使用宏生成错误枚举，每个变体带错误代码与类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 生成 enum、`code()`、`error_type()`、`message()` 以及 snake_case 构造函数。
macro_rules! define_parc_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ParcError {
            $($variant(String),)*
        }

        impl ParcError {
            /// 错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ParcError::$variant(_) => $code,)*
                }
            }

            /// 错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ParcError::$variant(_) => $type_name,)*
                }
            }

            /// 错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ParcError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl ParcError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ParcError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_parc_errors! {
    CacheConnection("P001", "Cache Connection Error"),
    CachePluginNotFound("P002", "Cache Plugin Not Found"),
    DatabaseConfig("P003", "Database Configuration Error"),
    DatabaseConnection("P004", "Database Connection Error"),
    DatabaseOperation("P005", "Database Operation Error"),
    FileOperation("P006", "File Operation Error"),
    Validation("P007", "Validation Error"),
    NotFound("P008", "Resource Not Found"),
    Serialization("P009", "Serialization Error"),
    Conflict("P010", "Resource Conflict"),
    DateParse("P011", "Date Parse Error"),
    Authentication("P012", "Authentication Error"),
    Authorization("P013", "Authorization Error"),
    Mail("P014", "Mail Delivery Error"),
    Import("P015", "Roster Import Error"),
}

impl ParcError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 唯一约束冲突会被映射为 Conflict，其他数据库错误保持原样
    pub fn is_conflict(&self) -> bool {
        matches!(self, ParcError::Conflict(_))
    }
}

impl fmt::Display for ParcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ParcError {}

impl From<sea_orm::DbErr> for ParcError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                ParcError::Conflict(detail)
            }
            _ => ParcError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for ParcError {
    fn from(err: std::io::Error) -> Self {
        ParcError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ParcError {
    fn from(err: serde_json::Error) -> Self {
        ParcError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ParcError {
    fn from(err: chrono::ParseError) -> Self {
        ParcError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ParcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ParcError::cache_connection("test").code(), "P001");
        assert_eq!(ParcError::database_config("test").code(), "P003");
        assert_eq!(ParcError::validation("test").code(), "P007");
        assert_eq!(ParcError::conflict("test").code(), "P010");
        assert_eq!(ParcError::mail("test").code(), "P014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ParcError::not_found("college").error_type(),
            "Resource Not Found"
        );
        assert_eq!(ParcError::import("row 3").error_type(), "Roster Import Error");
    }

    #[test]
    fn test_format_simple() {
        let err = ParcError::validation("end_date must not be before start_date");
        let formatted = err.format_simple();
        assert!(formatted.starts_with("Validation Error: "));
        assert!(formatted.contains("end_date"));
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_io_error_maps_to_file_operation() {
        let err: ParcError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.code(), "P006");
        assert!(err.message().contains("gone"));
    }
}
