use serde::Deserialize;

use crate::common::{FieldError, Theme, Validator};
use crate::domains::users::models::PreferencesUpdate;
use llm_client::Provider;

/// Body of `PUT /api/users/:userId/preferences`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPayload {
    pub theme: Option<String>,
    pub hints_enabled: Option<bool>,
    pub debug_enabled: Option<bool>,
    pub preferred_llm: Option<String>,
}

impl PreferencesPayload {
    pub fn validate(self) -> Result<PreferencesUpdate, Vec<FieldError>> {
        let mut v = Validator::new();

        let theme = self.theme.as_deref().and_then(|raw| {
            v.parse::<Theme>("theme", Some(raw), "Theme must be 'light' or 'dark'")
        });
        let preferred_llm = self.preferred_llm.as_deref().and_then(|raw| {
            v.parse::<Provider>(
                "preferredLlm",
                Some(raw),
                "Preferred LLM must be 'gemini' or 'openai'",
            )
        });

        v.finish()?;
        Ok(PreferencesUpdate {
            theme,
            hints_enabled: self.hints_enabled,
            debug_enabled: self.debug_enabled,
            preferred_llm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update() {
        let update = PreferencesPayload {
            theme: Some("dark".to_string()),
            hints_enabled: Some(false),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(update.theme, Some(Theme::Dark));
        assert_eq!(update.hints_enabled, Some(false));
        assert!(update.debug_enabled.is_none());
        assert!(update.preferred_llm.is_none());
    }

    #[test]
    fn test_provider_parsed() {
        let update = PreferencesPayload {
            preferred_llm: Some("OpenAI".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(update.preferred_llm, Some(Provider::OpenAi));
    }

    #[test]
    fn test_invalid_values_reported() {
        let errors = PreferencesPayload {
            theme: Some("solarized".to_string()),
            preferred_llm: Some("claude".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["theme", "preferredLlm"]);
    }
}
