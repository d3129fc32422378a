//! Patient record and search keyword derivation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient record as stored in the patient collection.
///
/// The `search_keywords` field is a derived cache over the name and id
/// fields, maintained by the keyword reconciler; it is never authored
/// directly and can be recomputed at any time with [`search_keywords`].
/// Freshly seeded records omit it until the reconciler first runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Nine-character patient code, also used as the document key.
    /// Immutable once assigned.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    /// Free-text postal address.
    pub address: String,
    /// Optional free-text notes; stored as an explicit null when absent.
    pub extra_info: Option<String>,
    /// References to the caregivers assigned to this patient.
    pub caregivers: Vec<String>,
    /// Derived lowercase search tokens; absent until first reconciled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_keywords: Option<Vec<String>>,
}

/// Derive the search keyword list for a patient.
///
/// Always exactly three entries, in order: the lowercased first name, the
/// lowercased last name, and the lowercased patient code. The application
/// matches prefix searches against this list, so order and casing are part
/// of the contract.
pub fn search_keywords(first_name: &str, last_name: &str, id: &str) -> Vec<String> {
    vec![
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        id.to_lowercase(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_patient() -> Patient {
        Patient {
            id: "25005ABCD".to_string(),
            first_name: "Marie".to_string(),
            last_name: "Curie".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1957, 11, 7).unwrap(),
            address: "12 Rue de la Paix, 75002, Paris".to_string(),
            extra_info: None,
            caregivers: vec!["YqIMZG0vYPeGdc9yzRnK9SkTiEi1".to_string()],
            search_keywords: None,
        }
    }

    #[test]
    fn test_search_keywords() {
        let keywords = search_keywords("Marie", "Curie", "25005ABCD");

        assert_eq!(keywords, vec!["marie", "curie", "25005abcd"]);
    }

    #[test]
    fn test_search_keywords_preserves_order() {
        let keywords = search_keywords("Jean", "Dupont", "2516DXY12");

        assert_eq!(keywords[0], "jean");
        assert_eq!(keywords[1], "dupont");
        assert_eq!(keywords[2], "2516dxy12");
    }

    #[test]
    fn test_patient_wire_field_names() {
        let patient = sample_patient();

        let value = serde_json::to_value(&patient).unwrap();
        let fields = value.as_object().unwrap();

        assert_eq!(fields["id"], "25005ABCD");
        assert_eq!(fields["firstName"], "Marie");
        assert_eq!(fields["lastName"], "Curie");
        assert_eq!(fields["dateOfBirth"], "1957-11-07");
        assert_eq!(fields["address"], "12 Rue de la Paix, 75002, Paris");
        assert_eq!(fields["extraInfo"], json!(null));
        assert_eq!(fields["caregivers"], json!(["YqIMZG0vYPeGdc9yzRnK9SkTiEi1"]));
    }

    #[test]
    fn test_patient_omits_keywords_until_reconciled() {
        let patient = sample_patient();

        let value = serde_json::to_value(&patient).unwrap();

        assert!(value.as_object().unwrap().get("searchKeywords").is_none());
    }

    #[test]
    fn test_patient_serializes_keywords_once_present() {
        let mut patient = sample_patient();
        patient.search_keywords = Some(search_keywords(
            &patient.first_name,
            &patient.last_name,
            &patient.id,
        ));

        let value = serde_json::to_value(&patient).unwrap();

        assert_eq!(
            value["searchKeywords"],
            json!(["marie", "curie", "25005abcd"])
        );
    }

    #[test]
    fn test_patient_roundtrip_keeps_missing_keywords_absent() {
        let raw = json!({
            "id": "25005ABCD",
            "firstName": "Marie",
            "lastName": "Curie",
            "dateOfBirth": "1957-11-07",
            "address": "12 Rue de la Paix, 75002, Paris",
            "extraInfo": null,
            "caregivers": ["YqIMZG0vYPeGdc9yzRnK9SkTiEi1"]
        });

        let patient: Patient = serde_json::from_value(raw).unwrap();

        assert_eq!(patient, sample_patient());
    }
}
