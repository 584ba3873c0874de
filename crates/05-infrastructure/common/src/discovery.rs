//! 类型目录
//!
//! 进程内的"类型宇宙"：所有可被发现的类型描述符，按注册顺序保存。
//! `#[discoverable]` 宏生成的描述符在启动时注册到全局目录；测试可以创建独立的目录。

use crate::{ComponentError, ComponentResult, TypeDescriptor};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct CatalogEntries {
    ordered: Vec<Arc<TypeDescriptor>>,
    by_name: HashMap<String, Arc<TypeDescriptor>>,
}

/// 类型目录
#[derive(Debug, Default)]
pub struct TypeCatalog {
    entries: RwLock<CatalogEntries>,
}

impl TypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 从描述符列表创建目录
    pub fn from_descriptors<I>(descriptors: I) -> ComponentResult<Self>
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let catalog = Self::new();
        for descriptor in descriptors {
            catalog.register(descriptor)?;
        }
        Ok(catalog)
    }

    /// 注册描述符，限定名重复时报错
    pub fn register(&self, descriptor: TypeDescriptor) -> ComponentResult<()> {
        let mut entries = self.entries.write();
        let name = descriptor.qualified_name().to_string();
        if entries.by_name.contains_key(&name) {
            return Err(ComponentError::registration_error(name, "类型已注册"));
        }

        debug!("注册类型描述符: {}", name);
        let descriptor = Arc::new(descriptor);
        entries.ordered.push(Arc::clone(&descriptor));
        entries.by_name.insert(name, descriptor);
        Ok(())
    }

    /// 按限定名解析
    pub fn resolve(&self, qualified_name: &str) -> Option<Arc<TypeDescriptor>> {
        self.entries.read().by_name.get(qualified_name).cloned()
    }

    /// 是否包含指定类型
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.entries.read().by_name.contains_key(qualified_name)
    }

    /// 按注册顺序返回所有描述符的快照
    pub fn descriptors(&self) -> Vec<Arc<TypeDescriptor>> {
        self.entries.read().ordered.clone()
    }

    /// 描述符数量
    pub fn len(&self) -> usize {
        self.entries.read().ordered.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.read().ordered.is_empty()
    }

    /// 解析类型的全部祖先（不含自身），深度优先
    ///
    /// 父类型无法解析时返回 `UnresolvedType`，继承链成环时返回 `CircularHierarchy`。
    pub fn ancestors_of(&self, descriptor: &TypeDescriptor) -> ComponentResult<Vec<Arc<TypeDescriptor>>> {
        let mut ancestors = Vec::new();
        let mut visited = HashSet::new();
        let mut path = vec![descriptor.qualified_name().to_string()];
        self.collect_ancestors(descriptor, &mut path, &mut visited, &mut ancestors)?;
        Ok(ancestors)
    }

    fn collect_ancestors(
        &self,
        descriptor: &TypeDescriptor,
        path: &mut Vec<String>,
        visited: &mut HashSet<String>,
        ancestors: &mut Vec<Arc<TypeDescriptor>>,
    ) -> ComponentResult<()> {
        for supertype in descriptor.supertypes() {
            if path.iter().any(|name| name == supertype) {
                let mut cycle = path.clone();
                cycle.push(supertype.clone());
                return Err(ComponentError::CircularHierarchy {
                    cycle: cycle.join(" -> "),
                });
            }
            if !visited.insert(supertype.clone()) {
                continue;
            }

            let parent = self
                .resolve(supertype)
                .ok_or_else(|| ComponentError::UnresolvedType {
                    type_name: supertype.clone(),
                })?;

            path.push(supertype.clone());
            self.collect_ancestors(&parent, path, visited, ancestors)?;
            path.pop();
            ancestors.push(parent);
        }
        Ok(())
    }
}

/// 全局类型目录
static GLOBAL_TYPE_CATALOG: Lazy<Arc<TypeCatalog>> = Lazy::new(|| Arc::new(TypeCatalog::new()));

/// 获取全局类型目录
pub fn global_type_catalog() -> Arc<TypeCatalog> {
    Arc::clone(&GLOBAL_TYPE_CATALOG)
}

/// 注册到全局类型目录
pub fn register_global_type(descriptor: TypeDescriptor) -> ComponentResult<()> {
    GLOBAL_TYPE_CATALOG.register(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TypeCatalog {
        TypeCatalog::from_descriptors([
            TypeDescriptor::new("base.Root").abstract_type(),
            TypeDescriptor::new("base.Middle").abstract_type().extending("base.Root"),
            TypeDescriptor::new("app.Leaf").extending("base.Middle"),
        ])
        .expect("目录构建应该成功")
    }

    #[test]
    fn test_register_preserves_order_and_rejects_duplicates() {
        let catalog = catalog();
        let names: Vec<String> = catalog
            .descriptors()
            .iter()
            .map(|descriptor| descriptor.qualified_name().to_string())
            .collect();
        assert_eq!(names, vec!["base.Root", "base.Middle", "app.Leaf"]);

        let result = catalog.register(TypeDescriptor::new("app.Leaf"));
        assert!(matches!(result, Err(ComponentError::RegistrationError { .. })));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_ancestors_are_transitive() {
        let catalog = catalog();
        let leaf = catalog.resolve("app.Leaf").expect("应该能解析 Leaf");
        let ancestors: Vec<String> = catalog
            .ancestors_of(&leaf)
            .expect("祖先解析应该成功")
            .iter()
            .map(|descriptor| descriptor.qualified_name().to_string())
            .collect();
        assert_eq!(ancestors, vec!["base.Root", "base.Middle"]);
    }

    #[test]
    fn test_unresolved_supertype() {
        let catalog = TypeCatalog::new();
        let orphan = TypeDescriptor::new("app.Orphan").extending("missing.Base");
        let result = catalog.ancestors_of(&orphan);
        assert_eq!(
            result.unwrap_err(),
            ComponentError::UnresolvedType {
                type_name: "missing.Base".to_string()
            }
        );
    }

    #[test]
    fn test_cycle_is_reported() {
        let catalog = TypeCatalog::from_descriptors([
            TypeDescriptor::new("app.A").extending("app.B"),
            TypeDescriptor::new("app.B").extending("app.A"),
        ])
        .expect("目录构建应该成功");
        let a = catalog.resolve("app.A").expect("应该能解析 A");
        assert!(matches!(
            catalog.ancestors_of(&a),
            Err(ComponentError::CircularHierarchy { .. })
        ));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let catalog = TypeCatalog::from_descriptors([
            TypeDescriptor::new("app.Top").abstract_type(),
            TypeDescriptor::new("app.Left").abstract_type().extending("app.Top"),
            TypeDescriptor::new("app.Right").abstract_type().extending("app.Top"),
            TypeDescriptor::new("app.Bottom").extending("app.Left").extending("app.Right"),
        ])
        .expect("目录构建应该成功");
        let bottom = catalog.resolve("app.Bottom").expect("应该能解析 Bottom");
        assert_eq!(catalog.ancestors_of(&bottom).expect("菱形继承合法").len(), 3);
    }
}
