//! Provider selection for generated tasks.
//!
//! Assignment is deterministic: given the same provider list, the same
//! provider is chosen every time. Inactive providers are never candidates.

use careops_core::{Case, Provider, ProviderRole};

/// First active provider, in list order.
pub fn first_active(providers: &[Provider]) -> Option<&Provider> {
    providers.iter().find(|p| p.active)
}

/// First active provider holding `role`.
pub fn by_role(providers: &[Provider], role: ProviderRole) -> Option<&Provider> {
    providers.iter().find(|p| p.active && p.role == role)
}

/// Resolves a blueprint's assignee preference.
///
/// A requested role that no active provider holds falls back to any active
/// provider rather than leaving the task unassigned.
pub fn by_role_or_first(providers: &[Provider], role: Option<ProviderRole>) -> Option<&Provider> {
    role.and_then(|r| by_role(providers, r))
        .or_else(|| first_active(providers))
}

/// Picks who handles an urgent-case escalation.
///
/// Preference order: the provider already assigned to the case, then any
/// active physician, then any active provider.
pub fn escalation_assignee<'a>(case: &Case, providers: &'a [Provider]) -> Option<&'a Provider> {
    if let Some(assigned) = case.assigned_provider_id.as_deref() {
        if let Some(provider) = providers.iter().find(|p| p.active && p.id == assigned) {
            return Some(provider);
        }
    }
    by_role(providers, ProviderRole::Physician).or_else(|| first_active(providers))
}
