//! Facing enumeration and fallback resolution

use crate::device::DeviceProvider;
use crate::Facing;

/// Decides which facing a session opens, falling back to the opposite one
/// when the requested facing is not attached (binary front/back model).
pub struct FacingResolver<'a> {
    provider: &'a dyn DeviceProvider,
}

impl<'a> FacingResolver<'a> {
    /// Create a resolver over the given provider
    pub fn new(provider: &'a dyn DeviceProvider) -> Self {
        Self { provider }
    }

    /// True if any attached device reports `facing`
    pub fn has_facing(&self, facing: Facing) -> bool {
        self.provider.enumerate().iter().any(|d| d.facing == facing)
    }

    /// The requested facing when attached, otherwise the opposite
    pub fn resolve(&self, requested: Facing) -> Facing {
        if self.has_facing(requested) {
            requested
        } else {
            requested.opposite()
        }
    }

    /// True when both facings are attached and switching is meaningful
    pub fn can_switch(&self) -> bool {
        self.has_facing(Facing::Front) && self.has_facing(Facing::Back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimProvider;

    #[test]
    fn test_has_facing() {
        let provider = SimProvider::single(Facing::Front);
        let resolver = FacingResolver::new(&provider);
        assert!(resolver.has_facing(Facing::Front));
        assert!(!resolver.has_facing(Facing::Back));
    }

    #[test]
    fn test_resolve_keeps_attached_facing() {
        let provider = SimProvider::with_both_facings();
        let resolver = FacingResolver::new(&provider);
        assert_eq!(resolver.resolve(Facing::Front), Facing::Front);
        assert_eq!(resolver.resolve(Facing::Back), Facing::Back);
    }

    #[test]
    fn test_resolve_falls_back_to_opposite() {
        let provider = SimProvider::single(Facing::Back);
        let resolver = FacingResolver::new(&provider);
        assert_eq!(resolver.resolve(Facing::Front), Facing::Back);
    }

    #[test]
    fn test_can_switch_requires_both_facings() {
        assert!(FacingResolver::new(&SimProvider::with_both_facings()).can_switch());
        assert!(!FacingResolver::new(&SimProvider::single(Facing::Front)).can_switch());
        assert!(!FacingResolver::new(&SimProvider::single(Facing::Back)).can_switch());
    }
}
