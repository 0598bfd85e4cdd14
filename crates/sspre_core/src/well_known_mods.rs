//! Mods the game exposes as toggles. A replay may still carry any other
//! `m_*` token; those are kept and re-emitted like these.

pub const MOD_TOKEN_PREFIX: &str = "m_";

struct WellKnownMod {
    name: &'static str,
    display_name: &'static str,
}

#[rustfmt::skip]
const WELL_KNOWN_MODS: &[WellKnownMod] = &[
    WellKnownMod { name: "earthquake", display_name: "Earthquake" },
    WellKnownMod { name: "chaos",      display_name: "Chaos" },
    WellKnownMod { name: "flashlight", display_name: "Flashlight" },
    WellKnownMod { name: "ghost",      display_name: "Ghost" },
    WellKnownMod { name: "hardrock",   display_name: "Hardrock" },
];

pub fn names() -> impl Iterator<Item = &'static str> {
    WELL_KNOWN_MODS.iter().map(|m| m.name)
}

pub fn display_name(name: &str) -> Option<&'static str> {
    WELL_KNOWN_MODS
        .iter()
        .find(|m| m.name == name)
        .map(|m| m.display_name)
}

pub fn is_well_known(name: &str) -> bool {
    display_name(name).is_some()
}

/// The metadata token for a mod name, e.g. `chaos` -> `m_chaos`.
pub fn token_text(name: &str) -> String {
    format!("{MOD_TOKEN_PREFIX}{name}")
}

#[cfg(test)]
mod tests {
    use super::{display_name, is_well_known, names, token_text};

    #[test]
    fn lists_the_five_toggles_in_order() {
        let all: Vec<&str> = names().collect();
        assert_eq!(all, ["earthquake", "chaos", "flashlight", "ghost", "hardrock"]);
    }

    #[test]
    fn unknown_mods_have_no_display_name() {
        assert_eq!(display_name("ghost"), Some("Ghost"));
        assert!(!is_well_known("nofail"));
        assert_eq!(token_text("nofail"), "m_nofail");
    }
}
