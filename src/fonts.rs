//! FIGlet font catalog.
//!
//! An ordered, non-empty list of font names. Index arithmetic always wraps,
//! so a catalog index can never go out of range.

/// Built-in font names, in cycling order. `standard` is first and is the
/// only font guaranteed to be available without a font directory.
pub const FIGLET_FONTS: &[&str] = &[
    "standard", "big", "doom", "slant", "shadow", "block", "banner", "larry3d", "speed",
    "smslant", "small", "isometric1", "3-d", "3x5", "5lineoblique", "acrobatic", "alligator",
    "alligator2", "alphabet", "avatar", "banner3-D", "banner3", "banner4", "barbwire", "basic",
    "bell", "bigchief", "binary", "bubble", "bulbhead", "calgphy2", "caligraphy", "catwalk",
    "chunky", "coinstak", "colossal", "computer", "contessa", "contrast", "cosmic", "cosmike",
    "cricket", "cursive", "cyberlarge", "cybermedium", "cybersmall", "diamond", "digital",
    "doh", "dotmatrix", "drpepper", "eftichess", "eftifont", "eftipiti", "eftirobot",
    "eftitalic", "eftiwall", "eftiwater", "epic", "fender", "fourtops", "fuzzy", "goofy",
    "gothic", "graffiti", "hollywood", "invita", "isometric2", "isometric3", "isometric4",
    "italic", "ivrit", "jazmine", "jerusalem", "katakana", "kban", "lcd", "lean", "letters",
    "linux", "lockergnome", "madrid", "marquee", "maxfour", "mike", "mini", "mirror",
    "mnemonic", "morse", "moscow", "nancyj-fancy", "nancyj-underlined", "nancyj", "nipples",
    "ntgreek", "o8", "ogre", "pawp", "peaks", "pebbles", "pepper", "poison", "puffy",
    "pyramid", "rectangles", "relief", "relief2", "rev", "roman", "rot13", "rounded",
    "rowancap", "rozzo", "runic", "runyc", "sblood", "script", "serifcap", "short", "slide",
    "slscript", "smisome1", "smkeyboard", "smscript", "smshadow", "smtengwar", "stampatello",
    "starwars", "stellar", "stop", "straight", "tanja", "tengwar", "term", "thick", "thin",
    "threepoint", "ticks", "ticksslant", "tinker-toy", "tombstone", "trek", "tsalagi",
    "twopoint", "univers", "usaflag", "wavy", "weird",
];

/// Ordered font-name table handed to the banner builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCatalog {
    names: Vec<String>,
}

impl Default for FontCatalog {
    fn default() -> Self {
        FontCatalog::builtin()
    }
}

impl FontCatalog {
    /// The built-in catalog ([`FIGLET_FONTS`]).
    pub fn builtin() -> Self {
        FontCatalog {
            names: FIGLET_FONTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build a catalog from arbitrary names. Returns None if empty.
    pub fn new(names: Vec<String>) -> Option<Self> {
        if names.is_empty() {
            None
        } else {
            Some(FontCatalog { names })
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Catalogs are never empty, so this is always false.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name at `index`, wrapped into range.
    pub fn name(&self, index: usize) -> &str {
        &self.names[index % self.names.len()]
    }

    /// Index of the entry after `index`, wrapping to 0.
    pub fn next(&self, index: usize) -> usize {
        (index % self.names.len() + 1) % self.names.len()
    }

    /// Index of the entry before `index`, wrapping to the last entry.
    pub fn prev(&self, index: usize) -> usize {
        let len = self.names.len();
        (index % len + len - 1) % len
    }

    /// Case-insensitive lookup by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

// ============================================================================
// TESTS
// ============================================================================
