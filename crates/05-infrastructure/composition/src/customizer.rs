//! 映射配置定制器

use crate::mapper::MapperBuilder;

/// 映射配置定制器
///
/// 在累加器冻结前最后执行，可以追加转换器或调整选项。闭包自动实现此 trait。
pub trait MapperBuilderCustomizer: Send + Sync {
    /// 定制累加器
    fn customize(&self, builder: &mut MapperBuilder);
}

impl<F> MapperBuilderCustomizer for F
where
    F: Fn(&mut MapperBuilder) + Send + Sync,
{
    fn customize(&self, builder: &mut MapperBuilder) {
        self(builder);
    }
}
