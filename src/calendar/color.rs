use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Calendar cell background, ordered from mood 1 to mood 5, plus the
/// neutral color for days without a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    Awful,
    Bad,
    Okay,
    Good,
    Great,
    Neutral,
}

impl CellColor {
    pub const fn hex(self) -> &'static str {
        match self {
            CellColor::Awful => "#e74c3c",
            CellColor::Bad => "#e67e22",
            CellColor::Okay => "#f1c40f",
            CellColor::Good => "#9acd32",
            CellColor::Great => "#2ecc71",
            CellColor::Neutral => "#2596be",
        }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        ALL.into_iter().find(|c| c.hex().eq_ignore_ascii_case(hex))
    }
}

const ALL: [CellColor; 6] = [
    CellColor::Awful,
    CellColor::Bad,
    CellColor::Okay,
    CellColor::Good,
    CellColor::Great,
    CellColor::Neutral,
];

impl Serialize for CellColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

impl<'de> Deserialize<'de> for CellColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        CellColor::from_hex(&hex)
            .ok_or_else(|| de::Error::custom(format!("unknown cell color {hex}")))
    }
}

/// Anything outside 1..=5 is treated as no rating.
pub fn color_of(mood: Option<i32>) -> CellColor {
    match mood {
        Some(1) => CellColor::Awful,
        Some(2) => CellColor::Bad,
        Some(3) => CellColor::Okay,
        Some(4) => CellColor::Good,
        Some(5) => CellColor::Great,
        _ => CellColor::Neutral,
    }
}
