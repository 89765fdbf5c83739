//! Feature flags

use serde::Deserialize;

/// Feature flags
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Seed the patient-safety demo checklist at startup when absent
    #[serde(default)]
    pub seed_demo_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_off_by_default() {
        assert!(!FeatureFlags::default().seed_demo_data);
    }
}
