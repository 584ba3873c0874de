//! 严格配对校验

use autoconfig_common::{PairingFailure, TypeDescriptor};

/// 严格配对校验器 trait
pub trait StrictPairValidator: Send + Sync {
    /// 校验严格一方与宽松一方
    fn validate(
        &self,
        strict: &TypeDescriptor,
        lenient: &TypeDescriptor,
    ) -> Result<(), PairingFailure>;
}

/// 属性完整性校验：严格一方的每个属性都必须在另一方出现
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyCompletenessValidator;

impl StrictPairValidator for PropertyCompletenessValidator {
    fn validate(
        &self,
        strict: &TypeDescriptor,
        lenient: &TypeDescriptor,
    ) -> Result<(), PairingFailure> {
        let missing: Vec<String> = strict
            .properties()
            .iter()
            .filter(|property| !lenient.properties().contains(property))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PairingFailure::MissingProperties {
                strict_side: strict.qualified_name().to_string(),
                missing,
            })
        }
    }
}
