use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Classification grade from the flat lookup table: 1 = Jōyō, 2 = Jinmeiyō,
/// anything else is uncategorized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Grade {
    Joyo,
    Jinmeiyo,
    #[default]
    Other,
}

impl Grade {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Joyo,
            2 => Self::Jinmeiyo,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Joyo => "Jōyō Kanji",
            Self::Jinmeiyo => "Jinmeiyō Kanji",
            Self::Other => "Other Kanji",
        }
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        Ok(Self::from_code(code))
    }
}

/// One record of the flat kanji lookup table.
#[derive(Clone, Debug, Deserialize)]
pub struct KanjiInfo {
    #[serde(rename = "k")]
    pub kanji: String,
    #[serde(default, rename = "g")]
    pub grade: Grade,
    #[serde(default, rename = "m")]
    pub meaning: String,
    #[serde(default, rename = "r")]
    pub reading: String,
    #[serde(default)]
    pub frequency: Option<u32>,
}

/// The flat lookup table with a one-time id index, so repeated per-selection
/// lookups stay O(1) instead of scanning the list each time.
#[derive(Clone, Debug, Default)]
pub struct KanjiLookup {
    records: Vec<KanjiInfo>,
    index_by_id: HashMap<String, usize>,
}

impl KanjiLookup {
    pub fn new(records: Vec<KanjiInfo>) -> Self {
        let mut index_by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            // First record wins on duplicate ids.
            index_by_id.entry(record.kanji.clone()).or_insert(index);
        }
        Self {
            records,
            index_by_id,
        }
    }

    pub fn get(&self, id: &str) -> Option<&KanjiInfo> {
        self.index_by_id
            .get(id)
            .and_then(|&index| self.records.get(index))
    }

    pub fn records(&self) -> &[KanjiInfo] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
