//! Maps human-friendly service names to the canonical Meevo service GUIDs
//! for the Phoenix Encanto location.

pub const HAIRCUT_STANDARD: &str = "f9160450-0b51-4ddc-bcc7-ac150103d5c0";
pub const HAIRCUT_SKIN_FADE: &str = "14000cb7-a5bb-4a26-9f23-b0f3016cc009";
pub const LONG_LOCKS: &str = "721e907d-fdae-41a5-bec4-ac150104229b";
pub const WASH: &str = "67c644bc-237f-4794-8b48-ac150106d5ae";
pub const GROOMING: &str = "65ee2a0d-e995-4d8d-a286-ac150106994b";

/// Inputs longer than this that contain a separator are treated as a GUID
/// and passed through without a table lookup.
const GUID_MIN_LEN: usize = 30;

const ALIASES: &[(&str, &str)] = &[
    // Haircut Standard
    ("haircut_standard", HAIRCUT_STANDARD),
    ("haircut standard", HAIRCUT_STANDARD),
    ("standard", HAIRCUT_STANDARD),
    ("haircut", HAIRCUT_STANDARD),
    ("mens_haircut", HAIRCUT_STANDARD),
    ("mens haircut", HAIRCUT_STANDARD),
    // Haircut Skin Fade
    ("haircut_skin_fade", HAIRCUT_SKIN_FADE),
    ("haircut skin fade", HAIRCUT_SKIN_FADE),
    ("skin_fade", HAIRCUT_SKIN_FADE),
    ("skin fade", HAIRCUT_SKIN_FADE),
    ("fade", HAIRCUT_SKIN_FADE),
    // Long Locks
    ("long_locks", LONG_LOCKS),
    ("long locks", LONG_LOCKS),
    ("long", LONG_LOCKS),
    ("womens_haircut", LONG_LOCKS),
    ("womens haircut", LONG_LOCKS),
    // Wash
    ("wash", WASH),
    ("shampoo", WASH),
    // Grooming
    ("grooming", GROOMING),
    ("beard", GROOMING),
    ("beard_trim", GROOMING),
    ("beard trim", GROOMING),
];

/// Reference subsets served by `GET /services`.
pub const PRIMARY_SERVICES: &[(&str, &str)] = &[
    ("haircut_standard", HAIRCUT_STANDARD),
    ("haircut_skin_fade", HAIRCUT_SKIN_FADE),
    ("long_locks", LONG_LOCKS),
];

pub const ADDON_SERVICES: &[(&str, &str)] = &[("wash", WASH), ("grooming", GROOMING)];

/// Resolve a service name or GUID to the canonical service id. GUID-shaped
/// inputs pass through unchanged; names are matched case-insensitively after
/// trimming.
pub fn resolve_service_id(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    if input.contains('-') && input.len() > GUID_MIN_LEN {
        return Some(input.to_string());
    }

    let normalized = input.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, id)| (*id).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_known_aliases() {
        assert_eq!(
            resolve_service_id("haircut").as_deref(),
            Some(HAIRCUT_STANDARD)
        );
        assert_eq!(resolve_service_id("wash").as_deref(), Some(WASH));
        assert_eq!(resolve_service_id("beard trim").as_deref(), Some(GROOMING));
    }

    #[test]
    fn test_resolution_is_case_and_whitespace_insensitive() {
        assert_eq!(
            resolve_service_id("SKIN FADE").as_deref(),
            Some(HAIRCUT_SKIN_FADE)
        );
        assert_eq!(
            resolve_service_id("  Skin_Fade  ").as_deref(),
            Some(HAIRCUT_SKIN_FADE)
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = resolve_service_id("fade");
        let second = resolve_service_id("fade");
        assert_eq!(first, second);
    }

    #[test]
    fn test_aliases_share_canonical_id() {
        assert_eq!(resolve_service_id("shampoo"), resolve_service_id("wash"));
        assert_eq!(
            resolve_service_id("womens haircut"),
            resolve_service_id("long_locks")
        );
    }

    #[test]
    fn test_guid_passes_through_unchanged() {
        let unknown_guid = "00000000-0000-0000-0000-000000000000";
        assert_eq!(
            resolve_service_id(unknown_guid).as_deref(),
            Some(unknown_guid)
        );
    }

    #[test]
    fn test_unknown_name_is_not_resolved() {
        assert_eq!(resolve_service_id("perm"), None);
    }

    #[test]
    fn test_empty_input_is_not_resolved() {
        assert_eq!(resolve_service_id(""), None);
    }

    #[test]
    fn test_short_hyphenated_name_is_not_a_guid() {
        // Contains a separator but is far too short to be a GUID.
        assert_eq!(resolve_service_id("blow-dry"), None);
    }
}
