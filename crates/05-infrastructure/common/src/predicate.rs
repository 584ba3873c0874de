//! 能力谓词
//!
//! 封闭的谓词集合：实现契约、继承父类型、带有标记。谓词无状态，可在多次扫描间复用。

use crate::{ComponentResult, Contract, Marker, TypeCatalog, TypeDescriptor};
use std::fmt;

/// 能力谓词
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityPredicate {
    /// 自身或任一祖先实现了契约
    Implements(Contract),
    /// 自身即为该类型，或任一祖先为该类型
    Extends(String),
    /// 自身声明了标记
    Annotated(Marker),
}

impl CapabilityPredicate {
    /// 对描述符求值
    ///
    /// `Implements` 与 `Extends` 需要沿继承链解析父类型，元数据异常时返回错误。
    pub fn matches(&self, descriptor: &TypeDescriptor, catalog: &TypeCatalog) -> ComponentResult<bool> {
        match self {
            Self::Annotated(marker) => Ok(descriptor.has_marker(*marker)),
            Self::Implements(contract) => {
                if descriptor.contracts().contains(contract) {
                    return Ok(true);
                }
                let ancestors = catalog.ancestors_of(descriptor)?;
                Ok(ancestors
                    .iter()
                    .any(|ancestor| ancestor.contracts().contains(contract)))
            }
            Self::Extends(base) => {
                if descriptor.qualified_name() == base {
                    return Ok(true);
                }
                let ancestors = catalog.ancestors_of(descriptor)?;
                Ok(ancestors
                    .iter()
                    .any(|ancestor| ancestor.qualified_name() == base))
            }
        }
    }
}

impl fmt::Display for CapabilityPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implements(contract) => write!(f, "implements {contract}"),
            Self::Extends(base) => write!(f, "extends {base}"),
            Self::Annotated(marker) => write!(f, "annotated {marker}"),
        }
    }
}
