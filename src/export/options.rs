/// Raw value of a boolean-like request parameter
///
/// Checkbox UIs submit both the checkbox value ("1" when checked) and a
/// hidden "0" fallback, so a single option can arrive as either a scalar
/// or a short list of strings.
#[derive(Debug, Clone)]
pub enum RawToggle {
    One(String),
    Many(Vec<String>),
}

/// Collapse a raw checkbox value to a single canonical string
///
/// For lists, "1" wins over the hidden fallback to respect the checked
/// state; otherwise the last element applies. Scalars pass through
/// unchanged. An empty list counts as absent. Never fails: the value is
/// only coerced to a boolean at the point of use.
pub fn normalize_checkbox(value: RawToggle) -> Option<String> {
    match value {
        RawToggle::One(value) => Some(value),
        RawToggle::Many(values) => {
            if values.iter().any(|v| v == "1") {
                Some("1".to_string())
            } else {
                values.into_iter().last()
            }
        }
    }
}

/// Truthy-string parse with a per-option default for absent values
fn truthy(value: Option<&str>, default: bool) -> bool {
    match value {
        None => default,
        Some(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true"),
    }
}

/// Effective flags for one export
///
/// Constructed from raw request input, passed to the renderer, discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_participants: bool,
    pub include_outcomes: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_participants: true,
            include_outcomes: true,
        }
    }
}

impl ExportOptions {
    /// Build effective flags from raw request parameters
    ///
    /// Each absent option defaults to `true`.
    pub fn from_raw(participants: Option<RawToggle>, outcomes: Option<RawToggle>) -> Self {
        let participants = participants.and_then(normalize_checkbox);
        let outcomes = outcomes.and_then(normalize_checkbox);

        Self {
            include_participants: truthy(participants.as_deref(), true),
            include_outcomes: truthy(outcomes.as_deref(), true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_wins_over_hidden_fallback() {
        let value = RawToggle::Many(vec!["1".to_string(), "0".to_string()]);
        assert_eq!(normalize_checkbox(value), Some("1".to_string()));

        let value = RawToggle::Many(vec!["0".to_string(), "1".to_string()]);
        assert_eq!(normalize_checkbox(value), Some("1".to_string()));
    }

    #[test]
    fn list_without_checked_takes_last() {
        let value = RawToggle::Many(vec!["0".to_string(), "off".to_string()]);
        assert_eq!(normalize_checkbox(value), Some("off".to_string()));
    }

    #[test]
    fn empty_list_counts_as_absent() {
        assert_eq!(normalize_checkbox(RawToggle::Many(vec![])), None);
    }

    #[test]
    fn scalar_passes_through() {
        let value = RawToggle::One("whatever".to_string());
        assert_eq!(normalize_checkbox(value), Some("whatever".to_string()));
    }

    #[test]
    fn absent_options_default_to_true() {
        let options = ExportOptions::from_raw(None, None);
        assert!(options.include_participants);
        assert!(options.include_outcomes);
    }

    #[test]
    fn zero_scalar_disables_option() {
        let options = ExportOptions::from_raw(Some(RawToggle::One("0".to_string())), None);
        assert!(!options.include_participants);
        assert!(options.include_outcomes);
    }

    #[test]
    fn true_string_enables_option() {
        let options = ExportOptions::from_raw(None, Some(RawToggle::One("true".to_string())));
        assert!(options.include_outcomes);

        let options = ExportOptions::from_raw(None, Some(RawToggle::One("false".to_string())));
        assert!(!options.include_outcomes);
    }
}
