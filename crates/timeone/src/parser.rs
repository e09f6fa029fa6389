//! Structural extraction of records from the vendor XML documents.
//!
//! The feeds are small and regular, so records are located with anchored
//! patterns rather than a full XML parser. Missing fields fall back to the
//! defaults in [`crate::mapping`]; records without their key fields are
//! dropped.

use std::collections::HashMap;
use std::sync::LazyLock;

use rdvtrack_core::status::{ActionType, AppointmentStatus};
use rdvtrack_core::types::Timestamp;
use regex::Regex;
use serde::Serialize;

use crate::mapping;

static PROGRAM_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<program(\s[^>]*)?>(.*?)</program>").expect("valid regex")
});
static ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<action(\s[^>]*?)?/>").expect("valid regex"));
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w.:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| text_element_re("name"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| text_element_re("description"));
static STATUS_RE: LazyLock<Regex> = LazyLock::new(|| text_element_re("status"));

/// Pattern for `<tag ...>text</tag>` where the text may be CDATA-wrapped.
fn text_element_re(tag: &str) -> Regex {
    Regex::new(&format!(
        r"(?is)<{tag}(?:\s[^>]*)?>\s*(?:<!\[CDATA\[(.*?)\]\]>|([^<]*))\s*</{tag}>"
    ))
    .expect("valid regex")
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One entry of the program catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedProgram {
    /// Vendor program id. Empty when the block carries none.
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// One performance action with its program name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedAction {
    pub id: String,
    pub program_id: Option<String>,
    /// Name of the enclosing program, when the document declares it.
    pub program_name: Option<String>,
    /// Raw `ActionDate` text.
    pub action_date: String,
    pub validation_date: Option<String>,
    pub status_code: String,
    pub type_code: String,
    pub commission: f64,
    pub cart_amount: f64,
    pub sub_id: Option<String>,
}

impl FeedAction {
    pub fn status(&self) -> AppointmentStatus {
        mapping::map_status(&self.status_code)
    }

    pub fn action_type(&self) -> ActionType {
        mapping::map_action_type(&self.type_code)
    }

    pub fn operator(&self) -> String {
        mapping::operator_label(self.sub_id.as_deref())
    }

    /// `None` when the action date is in an unsupported format.
    pub fn scheduled_at(&self) -> Option<Timestamp> {
        mapping::parse_action_date(&self.action_date)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Extract the program catalog. Programs without a name are discarded.
pub fn parse_programs(xml: &str) -> Vec<FeedProgram> {
    PROGRAM_BLOCK_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = attributes(caps.get(1).map_or("", |m| m.as_str()));
            let body = caps.get(2).map_or("", |m| m.as_str());
            let name = element_text(&NAME_RE, body)?;
            Some(FeedProgram {
                id: attrs.get("id").cloned().unwrap_or_default(),
                name,
                description: element_text(&DESCRIPTION_RE, body),
                status: element_text(&STATUS_RE, body),
            })
        })
        .collect()
}

/// Extract actions and join each to its program name by program id.
///
/// Actions missing an id or an action date are discarded.
pub fn parse_actions(xml: &str) -> Vec<FeedAction> {
    let names = program_names(xml);

    ACTION_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = attributes(caps.get(1).map_or("", |m| m.as_str()));
            let id = non_empty(attrs.get("id"))?;
            let action_date = non_empty(attrs.get("actiondate"))?;
            let program_id = non_empty(attrs.get("programid"));
            let program_name = program_id
                .as_ref()
                .and_then(|pid| names.get(pid))
                .cloned();

            Some(FeedAction {
                id,
                program_name,
                program_id,
                action_date,
                validation_date: non_empty(attrs.get("validationdate")),
                status_code: attrs.get("actionstatus").cloned().unwrap_or_default(),
                type_code: attrs.get("actiontype").cloned().unwrap_or_default(),
                commission: mapping::parse_amount(attrs.get("actioncommission").map(String::as_str)),
                cart_amount: mapping::parse_amount(attrs.get("cartamount").map(String::as_str)),
                sub_id: non_empty(attrs.get("subid")),
            })
        })
        .collect()
}

/// Program id to name associations declared anywhere in the document.
fn program_names(xml: &str) -> HashMap<String, String> {
    PROGRAM_BLOCK_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = attributes(caps.get(1).map_or("", |m| m.as_str()));
            let id = non_empty(attrs.get("id"))?;
            let name = element_text(&NAME_RE, caps.get(2).map_or("", |m| m.as_str()))?;
            Some((id, name))
        })
        .collect()
}

/// Attributes of a start tag, keyed by lowercased name. The first
/// occurrence of a name wins.
fn attributes(tag: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for caps in ATTRIBUTE_RE.captures_iter(tag) {
        let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        attrs
            .entry(caps[1].to_ascii_lowercase())
            .or_insert_with(|| decode_entities(value));
    }
    attrs
}

/// Trimmed text of the first matching element, `None` if absent or blank.
fn element_text(re: &Regex, body: &str) -> Option<String> {
    let caps = re.captures(body)?;
    let text = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();
    if text.is_empty() {
        None
    } else if caps.get(1).is_some() {
        Some(text.to_string())
    } else {
        Some(decode_entities(text))
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<programs>
  <program id="101">
    <name><![CDATA[ Acme Energy ]]></name>
    <description><![CDATA[Green electricity offers]]></description>
    <status>active</status>
  </program>
  <program id="102">
    <name><![CDATA[]]></name>
    <status>active</status>
  </program>
  <program id="103">
    <name>Beta &amp; Co</name>
  </program>
</programs>"#;

    const ACTIONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<report>
  <program id="101">
    <name><![CDATA[Acme Energy]]></name>
    <action id="A-1" ProgramID="101" ActionDate="2024-03-15 10:12:00" ValidationDate="2024-03-20 00:00:00" ActionStatus="2" ActionType="4" ActionCommission="12.50" CartAmount="" SubID="alice"/>
    <action id="A-2" ProgramID="101" ActionDate="2024-03-15 11:00:00" ActionStatus="0" ActionType="1" ActionCommission="abc" CartAmount="99.9"/>
  </program>
  <action ProgramID="101" ActionDate="2024-03-15 12:00:00" ActionStatus="2"/>
  <action id="A-3" programid="999" actiondate="2024-03-16" actionstatus="9"/>
  <action id="A-4" ProgramID="101" ActionStatus="2"/>
</report>"#;

    #[test]
    fn parses_catalog_and_drops_nameless_programs() {
        let programs = parse_programs(CATALOG);
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].id, "101");
        assert_eq!(programs[0].name, "Acme Energy");
        assert_eq!(programs[0].description.as_deref(), Some("Green electricity offers"));
        assert_eq!(programs[0].status.as_deref(), Some("active"));
        assert_eq!(programs[1].name, "Beta & Co");
        assert_eq!(programs[1].description, None);
    }

    #[test]
    fn wrapper_element_is_not_a_program() {
        let programs = parse_programs("<programs><program id=\"1\"><name>X</name></program></programs>");
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].id, "1");
    }

    #[test]
    fn parses_actions_with_program_names() {
        let actions = parse_actions(ACTIONS);
        let ids: Vec<_> = actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["A-1", "A-2", "A-3"]);

        let first = &actions[0];
        assert_eq!(first.program_name.as_deref(), Some("Acme Energy"));
        assert_eq!(first.status(), AppointmentStatus::Realized);
        assert_eq!(first.action_type(), ActionType::Lead);
        assert_eq!(first.commission, 12.5);
        assert_eq!(first.cart_amount, 0.0);
        assert_eq!(first.operator(), "alice");
        assert_eq!(first.validation_date.as_deref(), Some("2024-03-20 00:00:00"));
        assert!(first.scheduled_at().is_some());
    }

    #[test]
    fn action_defaults_for_missing_fields() {
        let actions = parse_actions(ACTIONS);
        let second = &actions[1];
        assert_eq!(second.status(), AppointmentStatus::Cancelled);
        assert_eq!(second.action_type(), ActionType::Sale);
        assert_eq!(second.commission, 0.0);
        assert_eq!(second.cart_amount, 99.9);
        assert_eq!(second.operator(), mapping::FALLBACK_OPERATOR);
    }

    #[test]
    fn attribute_names_are_case_insensitive() {
        let actions = parse_actions(ACTIONS);
        let third = &actions[2];
        assert_eq!(third.program_id.as_deref(), Some("999"));
        assert_eq!(third.program_name, None);
        assert_eq!(third.status(), AppointmentStatus::Pending);
    }

    #[test]
    fn program_id_attribute_does_not_shadow_id() {
        let actions = parse_actions(r#"<action ProgramID="7" id="X-9" ActionDate="2024-01-01"/>"#);
        assert_eq!(actions[0].id, "X-9");
        assert_eq!(actions[0].program_id.as_deref(), Some("7"));
    }

    #[test]
    fn empty_document_yields_nothing() {
        assert!(parse_programs("").is_empty());
        assert!(parse_actions("<report/>").is_empty());
    }
}
