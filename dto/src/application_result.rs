use chrono::{DateTime, SecondsFormat, Utc};
use derive_getters::Getters;
use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Key under which the submission handler stores the result,
/// both in web storages and in `window.__appStorage`.
pub const APPLICATION_RESULT_STORAGE_KEY: &str = "applicationSuccessData";

pub const DEFAULT_FULL_NAME: &str = "Applicant";
pub const DEFAULT_INSTITUTION_NAME: &str = "Your Institution";
pub const DEFAULT_AMOUNT: &str = "0";

/// Where an [ApplicationResult] has been found.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    UrlParams,
    SessionStorage,
    LocalStorage,
    WindowVariable,
}

impl Display for ResultSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResultSource::UrlParams => "url_params",
            ResultSource::SessionStorage => "session_storage",
            ResultSource::LocalStorage => "local_storage",
            ResultSource::WindowVariable => "window_variable",
        };
        write!(f, "{name}")
    }
}

/// The outcome of a submitted bursary application, as displayed on the confirmation page.
///
/// The record is produced by the submission handler, so deserialization is lenient:
/// missing fields are empty and numbers are accepted where text is expected.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
#[serde(default)]
pub struct ApplicationResult {
    #[serde(deserialize_with = "lenient_string")]
    reference_number: String,
    #[serde(deserialize_with = "lenient_string")]
    full_name: String,
    #[serde(deserialize_with = "lenient_string")]
    email: String,
    #[serde(deserialize_with = "lenient_string")]
    phone_number: String,
    #[serde(deserialize_with = "lenient_string")]
    institution_name: String,
    #[serde(deserialize_with = "lenient_string")]
    amount: String,
    #[serde(deserialize_with = "lenient_string")]
    ward: String,
    #[serde(deserialize_with = "lenient_string")]
    submitted_at: String,
    /// Set by whoever reads the record back, whatever it was stored with.
    #[serde(skip_serializing_if = "Option::is_none", skip_deserializing)]
    source: Option<ResultSource>,
}

impl ApplicationResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reference_number: String,
        full_name: String,
        email: String,
        phone_number: String,
        institution_name: String,
        amount: String,
        ward: String,
        submitted_at: String,
        source: Option<ResultSource>,
    ) -> Self {
        Self {
            reference_number,
            full_name,
            email,
            phone_number,
            institution_name,
            amount,
            ward,
            submitted_at,
            source,
        }
    }

    /// Build a result from the query parameters the submission handler redirects with.
    ///
    /// `parameter` returns the (already decoded) value of a query parameter.
    /// Empty values are considered missing.
    /// Nothing is built unless `ref` is present and `success` is exactly `true`.
    pub fn from_url_parameters<F>(parameter: F, now: DateTime<Utc>) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parameter = |name: &str| parameter(name).filter(|value| !value.is_empty());

        let reference_number = parameter("ref")?;
        if parameter("success").as_deref() != Some("true") {
            return None;
        }

        Some(Self {
            reference_number,
            full_name: parameter("name").unwrap_or_else(|| DEFAULT_FULL_NAME.to_owned()),
            email: parameter("email").unwrap_or_default(),
            phone_number: parameter("phone").unwrap_or_default(),
            institution_name: parameter("institution")
                .unwrap_or_else(|| DEFAULT_INSTITUTION_NAME.to_owned()),
            amount: parameter("amount").unwrap_or_else(|| DEFAULT_AMOUNT.to_owned()),
            ward: parameter("ward").unwrap_or_default(),
            submitted_at: parameter("submitted")
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            source: Some(ResultSource::UrlParams),
        })
    }

    pub fn with_source(self, source: ResultSource) -> Self {
        Self {
            source: Some(source),
            ..self
        }
    }
}

/// Accept strings, numbers, booleans and nulls, and turn them into text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientStringVisitor;

    impl Visitor<'_> for LenientStringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
            formatter.write_str("a string, a number, a boolean or null")
        }

        fn visit_bool<E: Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
            // Integral floats are written without decimals, as JS does.
            if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
                Ok((v as i64).to_string())
            } else {
                Ok(v.to_string())
            }
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }

        fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(LenientStringVisitor)
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    impl ApplicationResult {
        pub fn new_test(reference_number: &str) -> Self {
            Self::new(
                reference_number.to_owned(),
                "Jane Wanjiku".to_owned(),
                "jane@example.com".to_owned(),
                "0712345678".to_owned(),
                "University of Nairobi".to_owned(),
                "50000".to_owned(),
                "nairobi-west".to_owned(),
                "2026-10-15T10:30:00.000Z".to_owned(),
                None,
            )
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 8, 5, 0).unwrap()
    }

    fn from_query(query: &[(&str, &str)]) -> Option<ApplicationResult> {
        let parameters = query
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        ApplicationResult::from_url_parameters(|name| parameters.get(name).cloned(), now())
    }

    // region from_url_parameters
    #[test]
    fn should_build_from_url_parameters() {
        let result = from_query(&[
            ("ref", "ABC123"),
            ("success", "true"),
            ("amount", "50000"),
            ("ward", "nairobi-west"),
        ])
        .unwrap();

        assert_eq!("ABC123", result.reference_number());
        assert_eq!("50000", result.amount());
        assert_eq!("nairobi-west", result.ward());
        assert_eq!(&Some(ResultSource::UrlParams), result.source());
    }

    #[test]
    fn should_apply_defaults_when_building_from_url_parameters() {
        let result = from_query(&[("ref", "ABC123"), ("success", "true"), ("email", "")]).unwrap();

        assert_eq!(DEFAULT_FULL_NAME, result.full_name());
        assert_eq!("", result.email());
        assert_eq!("", result.phone_number());
        assert_eq!(DEFAULT_INSTITUTION_NAME, result.institution_name());
        assert_eq!(DEFAULT_AMOUNT, result.amount());
        assert_eq!("", result.ward());
        assert_eq!("2026-10-15T08:05:00.000Z", result.submitted_at());
    }

    #[test]
    fn should_keep_provided_values_when_building_from_url_parameters() {
        let result = from_query(&[
            ("ref", "ABC123"),
            ("success", "true"),
            ("name", "Jane Wanjiku"),
            ("phone", "0712345678"),
            ("institution", "Moi University"),
            ("submitted", "2026-10-01T09:00:00Z"),
        ])
        .unwrap();

        assert_eq!("Jane Wanjiku", result.full_name());
        assert_eq!("0712345678", result.phone_number());
        assert_eq!("Moi University", result.institution_name());
        assert_eq!("2026-10-01T09:00:00Z", result.submitted_at());
    }

    #[test]
    fn should_not_build_from_url_parameters_without_success() {
        assert_eq!(None, from_query(&[("ref", "ABC123")]));
        assert_eq!(None, from_query(&[("ref", "ABC123"), ("success", "1")]));
        assert_eq!(None, from_query(&[("ref", "ABC123"), ("success", "TRUE")]));
    }

    #[test]
    fn should_not_build_from_url_parameters_without_reference() {
        assert_eq!(None, from_query(&[("success", "true")]));
        assert_eq!(None, from_query(&[("ref", ""), ("success", "true")]));
    }
    // endregion

    // region Deserialization
    #[test]
    fn should_deserialize_stored_record() {
        let json = r#"{
            "reference_number": "ABC123",
            "full_name": "Jane Wanjiku",
            "email": "jane@example.com",
            "phone_number": "0712345678",
            "institution_name": "University of Nairobi",
            "amount": "50000",
            "ward": "nairobi-west",
            "submitted_at": "2026-10-15T10:30:00.000Z",
            "source": "url_params"
        }"#;

        let result: ApplicationResult = serde_json::from_str(json).unwrap();

        assert_eq!(ApplicationResult::new_test("ABC123"), result);
    }

    #[test]
    fn should_deserialize_partial_record_leniently() {
        let json = r#"{"reference_number": "ABC123", "amount": 50000, "ward": null, "extra": [1, 2]}"#;

        let result: ApplicationResult = serde_json::from_str(json).unwrap();

        assert_eq!("ABC123", result.reference_number());
        assert_eq!("50000", result.amount());
        assert_eq!("", result.ward());
        assert_eq!("", result.full_name());
        assert_eq!(&None, result.source());
    }

    #[test]
    fn should_ignore_stored_source() {
        for json in [
            r#"{"reference_number":"ABC123","full_name":"Jane","source":"form_submission"}"#,
            r#"{"reference_number":"ABC123","full_name":"Jane","source":42}"#,
            r#"{"reference_number":"ABC123","full_name":"Jane","source":"local_storage"}"#,
        ] {
            let result: ApplicationResult = serde_json::from_str(json).unwrap();

            assert_eq!("ABC123", result.reference_number());
            assert_eq!("Jane", result.full_name());
            assert_eq!(&None, result.source());
            assert_eq!(
                &Some(ResultSource::SessionStorage),
                result.with_source(ResultSource::SessionStorage).source()
            );
        }
    }

    #[test]
    fn should_not_serialize_missing_source() {
        let json = serde_json::to_string(&ApplicationResult::new_test("ABC123")).unwrap();

        assert!(!json.contains("source"));
        assert!(json.contains(r#""reference_number":"ABC123""#));
    }
    // endregion

    #[test]
    fn should_display_source_as_serialized() {
        for source in [
            ResultSource::UrlParams,
            ResultSource::SessionStorage,
            ResultSource::LocalStorage,
            ResultSource::WindowVariable,
        ] {
            let serialized = serde_json::to_string(&source).unwrap();
            assert_eq!(format!("\"{source}\""), serialized);
        }
    }
}
