//! 元数据定义
//!
//! 提供 Rust 类型的运行时元数据，供转换器做类型匹配

use std::any::TypeId;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 模块路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        Self {
            name: short_type_name(full_name).to_string(),
            id: TypeId::of::<T>(),
            module_path: full_name.to_string(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        short_type_name(&self.name)
    }

    /// 以点号分隔的限定名，与类型目录中的命名一致
    pub fn qualified_name(&self) -> String {
        self.module_path.replace("::", ".")
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.module_path)
    }
}

fn short_type_name(full_name: &str) -> &str {
    // 泛型参数里也有 `::`，只截取最外层路径
    let head = full_name.split('<').next().unwrap_or(full_name);
    let start = head.rfind("::").map_or(0, |index| index + 2);
    &full_name[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample;

    #[test]
    fn test_type_info_of_struct() {
        let info = TypeInfo::of::<Sample>();
        assert_eq!(info.name, "Sample");
        assert!(info.module_path.ends_with("metadata::tests::Sample"));
        assert!(info.is::<Sample>());
        assert!(!info.is::<String>());
    }

    #[test]
    fn test_short_name_keeps_generic_arguments() {
        let info = TypeInfo::of::<Vec<std::string::String>>();
        assert_eq!(info.short_name(), "Vec<alloc::string::String>");
    }

    #[test]
    fn test_qualified_name_uses_dots() {
        let info = TypeInfo::of::<Sample>();
        assert!(info.qualified_name().contains("metadata.tests.Sample"));
        assert!(!info.qualified_name().contains("::"));
    }
}
