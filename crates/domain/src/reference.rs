//! Read-only reference data: ability, skill, and tool definitions plus
//! spell-slot pool presentation metadata.
//!
//! These tables are rules-supplied presentation data, not derived
//! state. The sheet layer reads them to title and decorate favorites;
//! it never writes them.

/// Default icon when a referent supplies none.
pub const FALLBACK_ICON: &str = "icons/svg/mystery-man.svg";

/// Icon used for legacy resource counters.
pub const RESOURCE_ICON: &str = "icons/svg/upgrade.svg";

/// Display label substituted for a suppressed effect's subtitle.
pub const SUPPRESSED_LABEL: &str = "Suppressed";

/// Recovery cadence abbreviations.
pub const SHORT_REST_ABBR: &str = "SR";
pub const LONG_REST_ABBR: &str = "LR";

/// Number of exhaustion levels; the final level is death.
pub const EXHAUSTION_LEVELS: u8 = 6;

// =============================================================================
// Abilities
// =============================================================================

/// Definition of an ability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityDef {
    pub key: &'static str,
    pub label: &'static str,
    pub abbreviation: &'static str,
}

/// The six abilities, in canonical display order.
pub const ABILITIES: [AbilityDef; 6] = [
    AbilityDef { key: "str", label: "Strength", abbreviation: "STR" },
    AbilityDef { key: "dex", label: "Dexterity", abbreviation: "DEX" },
    AbilityDef { key: "con", label: "Constitution", abbreviation: "CON" },
    AbilityDef { key: "int", label: "Intelligence", abbreviation: "INT" },
    AbilityDef { key: "wis", label: "Wisdom", abbreviation: "WIS" },
    AbilityDef { key: "cha", label: "Charisma", abbreviation: "CHA" },
];

/// Look up an ability definition by key.
pub fn ability(key: &str) -> Option<&'static AbilityDef> {
    ABILITIES.iter().find(|a| a.key == key)
}

// =============================================================================
// Skills
// =============================================================================

/// Definition of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillDef {
    pub key: &'static str,
    pub label: &'static str,
    /// Governing ability key.
    pub ability: &'static str,
    pub icon: &'static str,
    /// Rules-reference identifier for tooltips.
    pub reference: &'static str,
}

/// The standard skill list, in canonical display order.
pub const SKILLS: [SkillDef; 18] = [
    SkillDef { key: "acr", label: "Acrobatics", ability: "dex", icon: "icons/skills/acrobatics.svg", reference: "rules.skill.acr" },
    SkillDef { key: "ani", label: "Animal Handling", ability: "wis", icon: "icons/skills/animal-handling.svg", reference: "rules.skill.ani" },
    SkillDef { key: "arc", label: "Arcana", ability: "int", icon: "icons/skills/arcana.svg", reference: "rules.skill.arc" },
    SkillDef { key: "ath", label: "Athletics", ability: "str", icon: "icons/skills/athletics.svg", reference: "rules.skill.ath" },
    SkillDef { key: "dec", label: "Deception", ability: "cha", icon: "icons/skills/deception.svg", reference: "rules.skill.dec" },
    SkillDef { key: "his", label: "History", ability: "int", icon: "icons/skills/history.svg", reference: "rules.skill.his" },
    SkillDef { key: "ins", label: "Insight", ability: "wis", icon: "icons/skills/insight.svg", reference: "rules.skill.ins" },
    SkillDef { key: "itm", label: "Intimidation", ability: "cha", icon: "icons/skills/intimidation.svg", reference: "rules.skill.itm" },
    SkillDef { key: "inv", label: "Investigation", ability: "int", icon: "icons/skills/investigation.svg", reference: "rules.skill.inv" },
    SkillDef { key: "med", label: "Medicine", ability: "wis", icon: "icons/skills/medicine.svg", reference: "rules.skill.med" },
    SkillDef { key: "nat", label: "Nature", ability: "int", icon: "icons/skills/nature.svg", reference: "rules.skill.nat" },
    SkillDef { key: "prc", label: "Perception", ability: "wis", icon: "icons/skills/perception.svg", reference: "rules.skill.prc" },
    SkillDef { key: "prf", label: "Performance", ability: "cha", icon: "icons/skills/performance.svg", reference: "rules.skill.prf" },
    SkillDef { key: "per", label: "Persuasion", ability: "cha", icon: "icons/skills/persuasion.svg", reference: "rules.skill.per" },
    SkillDef { key: "rel", label: "Religion", ability: "int", icon: "icons/skills/religion.svg", reference: "rules.skill.rel" },
    SkillDef { key: "slt", label: "Sleight of Hand", ability: "dex", icon: "icons/skills/sleight-of-hand.svg", reference: "rules.skill.slt" },
    SkillDef { key: "ste", label: "Stealth", ability: "dex", icon: "icons/skills/stealth.svg", reference: "rules.skill.ste" },
    SkillDef { key: "sur", label: "Survival", ability: "wis", icon: "icons/skills/survival.svg", reference: "rules.skill.sur" },
];

/// Look up a skill definition by key.
pub fn skill(key: &str) -> Option<&'static SkillDef> {
    SKILLS.iter().find(|s| s.key == key)
}

// =============================================================================
// Tools
// =============================================================================

/// Tool proficiency keys mapped to their canonical catalogue entries.
/// Display name and icon come from the catalogue, not from here.
const TOOL_CATALOGUE_KEYS: [(&str, &str); 10] = [
    ("alchemist", "alchemists-supplies"),
    ("brewer", "brewers-supplies"),
    ("calligrapher", "calligraphers-supplies"),
    ("disg", "disguise-kit"),
    ("forg", "forgery-kit"),
    ("herb", "herbalism-kit"),
    ("navg", "navigators-tools"),
    ("pois", "poisoners-kit"),
    ("thief", "thieves-tools"),
    ("tinker", "tinkers-tools"),
];

/// Resolve a tool key to its catalogue key.
pub fn tool_catalogue_key(tool_key: &str) -> Option<&'static str> {
    TOOL_CATALOGUE_KEYS
        .iter()
        .find(|(key, _)| *key == tool_key)
        .map(|(_, catalogue)| *catalogue)
}

// =============================================================================
// Proficiency
// =============================================================================

/// Proficiency rank in a skill, tool, or saving throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProficiencyRank {
    #[default]
    None,
    Half,
    Proficient,
    Expertise,
}

impl ProficiencyRank {
    /// CSS class used for the proficiency pip.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Half => "half",
            Self::Proficient => "full",
            Self::Expertise => "double",
        }
    }

    /// Hover label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Not Proficient",
            Self::Half => "Half Proficient",
            Self::Proficient => "Proficient",
            Self::Expertise => "Expertise",
        }
    }
}

// =============================================================================
// Spell-slot pools
// =============================================================================

/// A spell-slot pool selector parsed from a favorite id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPool {
    /// A leveled slot pool (`spell1`..`spell9`).
    Leveled(u8),
    /// The pact magic pool, with its own recovery cadence.
    Pact,
}

impl SlotPool {
    /// Parse a pool id. Leveled pools only exist for levels 1-9.
    pub fn parse(id: &str) -> Option<Self> {
        if id == "pact" {
            return Some(Self::Pact);
        }
        let level: u8 = id.strip_prefix("spell")?.parse().ok()?;
        if (1..=9).contains(&level) {
            Some(Self::Leveled(level))
        } else {
            None
        }
    }

    /// The persisted pool id.
    pub fn id(&self) -> String {
        match self {
            Self::Leveled(level) => format!("spell{level}"),
            Self::Pact => "pact".to_string(),
        }
    }

    /// Whether this pool recovers on a short rest.
    pub fn recovers_on_short_rest(&self) -> bool {
        matches!(self, Self::Pact)
    }

    /// Recovery cadence abbreviation for subtitles.
    pub fn recovery_abbr(&self) -> &'static str {
        if self.recovers_on_short_rest() {
            SHORT_REST_ABBR
        } else {
            LONG_REST_ABBR
        }
    }

    /// Icon path; leveled pools have per-level variants.
    pub fn icon(&self) -> String {
        match self {
            Self::Leveled(level) => format!("icons/magic/slots/slot-level-{level}.webp"),
            Self::Pact => "icons/magic/slots/pact-slot.webp".to_string(),
        }
    }

    /// Display title ("3rd-Level Spell Slots", "Pact Magic").
    pub fn title(&self) -> String {
        match self {
            Self::Leveled(level) => format!("{}-Level Spell Slots", ordinal(*level as u32)),
            Self::Pact => "Pact Magic".to_string(),
        }
    }
}

/// Ordinal-aware English formatting ("1st", "2nd", "3rd", "4th"...).
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
