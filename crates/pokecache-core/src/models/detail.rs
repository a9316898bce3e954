use serde::{Deserialize, Serialize};

/// Extended per-item data fetched from the remote detail endpoint.
///
/// `height` and `weight` are in tenths of a unit (decimetres and
/// hectograms on PokeAPI). Fields beyond `id`/`height`/`weight` are optional
/// and unknown fields are ignored, so the full PokeAPI document decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: i64,
    pub height: i64,
    pub weight: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub base_experience: Option<i64>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl DetailRecord {
    pub fn new(id: i64, height: i64, weight: i64) -> Self {
        Self {
            id,
            height,
            weight,
            name: None,
            base_experience: None,
            types: Vec::new(),
        }
    }

    /// Type names ordered by slot, joined for display ("grass / poison")
    pub fn types_display(&self) -> String {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        let names: Vec<&str> = slots.iter().map(|t| t.kind.name.as_str()).collect();
        if names.is_empty() {
            "Unknown".to_string()
        } else {
            names.join(" / ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record() {
        let record: DetailRecord =
            serde_json::from_str(r#"{"id":25,"height":4,"weight":60}"#).expect("minimal record");
        assert_eq!(record, DetailRecord::new(25, 4, 60));
    }

    #[test]
    fn test_pokeapi_shaped_record() {
        let json = r#"{
            "abilities": [],
            "base_experience": 64,
            "height": 7,
            "id": 1,
            "name": "bulbasaur",
            "order": 1,
            "types": [
                {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}},
                {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}}
            ],
            "weight": 69
        }"#;
        let record: DetailRecord = serde_json::from_str(json).expect("pokeapi record");
        assert_eq!(record.id, 1);
        assert_eq!(record.name.as_deref(), Some("bulbasaur"));
        assert_eq!(record.base_experience, Some(64));
        assert_eq!(record.types_display(), "grass / poison");
    }

    #[test]
    fn test_missing_required_field_fails() {
        assert!(serde_json::from_str::<DetailRecord>(r#"{"id":25,"height":4}"#).is_err());
    }

    #[test]
    fn test_types_display_empty() {
        assert_eq!(DetailRecord::new(1, 1, 1).types_display(), "Unknown");
    }
}
