//! String-backed status enums shared by the store, the synchronizer and the API.
//!
//! Each enum maps 1:1 onto the text stored in the corresponding database
//! column. Unknown strings parse to `None`; callers decide the fallback.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Return the value as stored in the database.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }

            /// Parse a stored value. Returns `None` for unknown values.
            pub fn from_str(s: &str) -> Option<Self> {
                match s {
                    $( $text => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// All valid stored values.
            pub const ALL: &'static [&'static str] = &[ $( $text ),+ ];
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_str(&value).ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Unknown {} value: {value}",
                        stringify!($name)
                    ))
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_text_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Active => "active",
        Paused => "paused",
    }
}

define_text_enum! {
    /// Appointment (RDV) status.
    ///
    /// `Pending` only arises from the vendor feed: an action awaiting
    /// validation on the vendor side.
    AppointmentStatus {
        Realized => "realized",
        Planned => "planned",
        Pending => "pending",
        Cancelled => "cancelled",
    }
}

define_text_enum! {
    /// Kind of vendor action an appointment was imported from.
    ActionType {
        Sale => "sale",
        Lead => "lead",
    }
}

define_text_enum! {
    /// Alert severity, rendered as a traffic-light colour.
    AlertSeverity {
        Red => "red",
        Yellow => "yellow",
        Green => "green",
    }
}

impl ProjectStatus {
    /// The status a pause/resume toggle moves to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Paused,
            Self::Paused => Self::Active,
        }
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        Self::Realized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_stored_value() {
        for s in AppointmentStatus::ALL {
            assert_eq!(AppointmentStatus::from_str(s).unwrap().as_str(), *s);
        }
        for s in AlertSeverity::ALL {
            assert_eq!(AlertSeverity::from_str(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn unknown_value_is_none() {
        assert_eq!(ProjectStatus::from_str("archived"), None);
        assert_eq!(ActionType::from_str(""), None);
    }

    #[test]
    fn try_from_rejects_unknown_text() {
        assert_eq!(
            ProjectStatus::try_from("paused".to_string()).unwrap(),
            ProjectStatus::Paused
        );
        assert!(AlertSeverity::try_from("blue".to_string()).is_err());
    }

    #[test]
    fn toggle_flips_status() {
        assert_eq!(ProjectStatus::Active.toggled(), ProjectStatus::Paused);
        assert_eq!(ProjectStatus::Paused.toggled(), ProjectStatus::Active);
    }

    #[test]
    fn serde_uses_stored_text() {
        let json = serde_json::to_string(&AppointmentStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let parsed: ActionType = serde_json::from_str("\"lead\"").unwrap();
        assert_eq!(parsed, ActionType::Lead);
    }
}
