//! Per-deployment check toggles.

/// Optional checks enabled per deployment surface.
///
/// One engine serves both surfaces; the presets say which optional checks
/// each one runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnginePolicy {
    /// Reject stays ending more than one calendar year out.
    pub enforce_calendar_year_cap: bool,
    /// Require the `allowAdditionalNights` opt-in before a multi-night stay.
    pub require_additional_nights_opt_in: bool,
    /// Accept the legacy compact string forms in blocklists.
    pub accept_legacy_blocklist_strings: bool,
}

impl EnginePolicy {
    /// Server-side preset: year cap enforced, legacy blocklist strings
    /// accepted, at least one additional night required.
    pub fn trusted() -> Self {
        EnginePolicy {
            enforce_calendar_year_cap: true,
            require_additional_nights_opt_in: false,
            accept_legacy_blocklist_strings: true,
        }
    }

    /// Browser-side preset: no year cap, opt-in gate for additional nights,
    /// object-form blocklist entries only.
    pub fn restricted() -> Self {
        EnginePolicy {
            enforce_calendar_year_cap: false,
            require_additional_nights_opt_in: true,
            accept_legacy_blocklist_strings: false,
        }
    }
}
