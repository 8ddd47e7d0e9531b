//! Presentation vocabulary shared by the screens.
//!
//! Variants and icon names are closed enums; parsing an unknown name is an
//! error rather than a silently unstyled element.

use std::str::FromStr;

use chrono::Datelike;

use crate::error::CoreError;
use crate::models::task::{Priority, Task, TaskStatus};
use crate::types::parse_timestamp;

// ---------------------------------------------------------------------------
// Closed enumerations
// ---------------------------------------------------------------------------

macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| CoreError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

named_enum!(
    /// Colour scheme of a badge.
    BadgeVariant, "badge variant" {
        Success => "success",
        Warning => "warning",
        Danger => "danger",
        Info => "info",
        Default => "default",
    }
);

named_enum!(
    /// Colour scheme of a button.
    ButtonVariant, "button variant" {
        Primary => "primary",
        Secondary => "secondary",
        Danger => "danger",
        Success => "success",
        Warning => "warning",
        Info => "info",
        Accent => "accent",
    }
);

named_enum!(
    ComponentSize, "component size" {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
);

named_enum!(
    /// Icons used across the screens.
    Icon, "icon" {
        People => "people",
        Person => "person",
        List => "list",
        CheckmarkCircle => "checkmark-circle",
        Checkmark => "checkmark",
        Time => "time",
        Add => "add",
        Create => "create",
        Trash => "trash",
        ArrowBack => "arrow-back",
        ChevronForward => "chevron-forward",
        Search => "search",
        Calendar => "calendar",
        Mail => "mail",
        Call => "call",
        Briefcase => "briefcase",
        Business => "business",
        SettingsOutline => "settings-outline",
        AlertCircleOutline => "alert-circle-outline",
        EllipsisVertical => "ellipsis-vertical",
    }
);

// ---------------------------------------------------------------------------
// Derived presentation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: &'static str,
    pub variant: BadgeVariant,
}

pub fn priority_badge(priority: Option<Priority>) -> Option<Badge> {
    let variant = match priority? {
        Priority::High => BadgeVariant::Danger,
        Priority::Medium => BadgeVariant::Warning,
        Priority::Low => BadgeVariant::Info,
    };
    Some(Badge {
        text: priority?.label(),
        variant,
    })
}

/// Accent bar colour for a task card.
pub fn priority_color(priority: Option<Priority>) -> &'static str {
    match priority {
        Some(Priority::High) => "#EF4444",
        Some(Priority::Medium) => "#F59E0B",
        Some(Priority::Low) => "#3B82F6",
        None => "#9CA3AF",
    }
}

/// Status badge. The completion flag wins over the status label; a
/// `terminée` label on an uncompleted task gets no badge.
pub fn status_badge(task: &Task) -> Option<Badge> {
    if task.completed {
        return Some(Badge {
            text: TaskStatus::Done.label(),
            variant: BadgeVariant::Success,
        });
    }
    match task.status? {
        TaskStatus::InProgress => Some(Badge {
            text: TaskStatus::InProgress.label(),
            variant: BadgeVariant::Info,
        }),
        TaskStatus::Todo => Some(Badge {
            text: TaskStatus::Todo.label(),
            variant: BadgeVariant::Warning,
        }),
        TaskStatus::Done => None,
    }
}

/// Upper-case the first character; `None` and empty input give `""`.
pub fn capitalize(s: Option<&str>) -> String {
    let Some(s) = s else {
        return String::new();
    };
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `12 juin 2023` with abbreviated month names (`janv.`, `févr.`).
    Short,
    /// `12 juin 2023` with full month names (`janvier`, `février`).
    Long,
}

const MONTHS_LONG: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];

const MONTHS_SHORT: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// Placeholder for an absent due date on cards.
pub const UNSET_DATE_LABEL: &str = "Non définie";

/// French calendar date of a server timestamp, or `None` when the input is
/// absent or unparsable.
pub fn format_date_fr(raw: Option<&str>, style: DateStyle) -> Option<String> {
    let ts = parse_timestamp(raw?)?;
    let month = ts.month0() as usize;
    let name = match style {
        DateStyle::Short => MONTHS_SHORT[month],
        DateStyle::Long => MONTHS_LONG[month],
    };
    Some(format!("{} {} {}", ts.day(), name, ts.year()))
}
