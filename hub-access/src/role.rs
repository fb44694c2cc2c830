// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform roles and the normalization of untrusted role strings.
//!
//! Role values usually arrive as plain text from a persisted user profile. [`normalize_role`] is
//! the only way such a string turns into a [`PlatformRole`]; everything past it works with the
//! closed enum.
use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A user's platform-wide category, driving their default access to every space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlatformRole {
    PatientAdvocate,
    Clinician,
    Researcher,
    Moderator,
    HubCoordinator,
    IndustryPartner,
    BoardMember,

    /// Holds `Manage` on every space, regardless of defaults or overrides.
    PlatformAdmin,
}

/// Historical and alternate spellings of roles, keyed by their trimmed, lower-case form.
const LEGACY_ALIASES: &[(&str, PlatformRole)] = &[
    ("patientadvocate", PlatformRole::PatientAdvocate),
    ("patient_advocate", PlatformRole::PatientAdvocate),
    ("patient-advocate", PlatformRole::PatientAdvocate),
    ("patient advocate", PlatformRole::PatientAdvocate),
    ("patient", PlatformRole::PatientAdvocate),
    ("advocate", PlatformRole::PatientAdvocate),
    ("member", PlatformRole::PatientAdvocate),
    ("clinician", PlatformRole::Clinician),
    ("doctor", PlatformRole::Clinician),
    ("physician", PlatformRole::Clinician),
    ("researcher", PlatformRole::Researcher),
    ("scientist", PlatformRole::Researcher),
    ("moderator", PlatformRole::Moderator),
    ("mod", PlatformRole::Moderator),
    ("hubcoordinator", PlatformRole::HubCoordinator),
    ("hub_coordinator", PlatformRole::HubCoordinator),
    ("hub-coordinator", PlatformRole::HubCoordinator),
    ("coordinator", PlatformRole::HubCoordinator),
    ("industrypartner", PlatformRole::IndustryPartner),
    ("industry_partner", PlatformRole::IndustryPartner),
    ("industry-partner", PlatformRole::IndustryPartner),
    ("industry", PlatformRole::IndustryPartner),
    ("partner", PlatformRole::IndustryPartner),
    ("boardmember", PlatformRole::BoardMember),
    ("board_member", PlatformRole::BoardMember),
    ("board-member", PlatformRole::BoardMember),
    ("board", PlatformRole::BoardMember),
    ("platformadmin", PlatformRole::PlatformAdmin),
    ("platform_admin", PlatformRole::PlatformAdmin),
    ("platform-admin", PlatformRole::PlatformAdmin),
    ("admin", PlatformRole::PlatformAdmin),
    ("superadmin", PlatformRole::PlatformAdmin),
];

impl PlatformRole {
    /// Role assigned to anyone whose stored role is missing or unrecognised.
    pub const DEFAULT: PlatformRole = PlatformRole::PatientAdvocate;

    pub const ALL: [PlatformRole; 8] = [
        PlatformRole::PatientAdvocate,
        PlatformRole::Clinician,
        PlatformRole::Researcher,
        PlatformRole::Moderator,
        PlatformRole::HubCoordinator,
        PlatformRole::IndustryPartner,
        PlatformRole::BoardMember,
        PlatformRole::PlatformAdmin,
    ];

    /// Canonical identifier of this role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlatformRole::PatientAdvocate => "PatientAdvocate",
            PlatformRole::Clinician => "Clinician",
            PlatformRole::Researcher => "Researcher",
            PlatformRole::Moderator => "Moderator",
            PlatformRole::HubCoordinator => "HubCoordinator",
            PlatformRole::IndustryPartner => "IndustryPartner",
            PlatformRole::BoardMember => "BoardMember",
            PlatformRole::PlatformAdmin => "PlatformAdmin",
        }
    }

    /// Returns `true` for the one role which always resolves to `Manage`.
    pub const fn is_privileged(&self) -> bool {
        matches!(self, PlatformRole::PlatformAdmin)
    }

    /// Normalizes a raw role string, see [`normalize_role`].
    pub fn normalize(input: &str) -> Self {
        normalize_role(Some(input))
    }
}

impl Default for PlatformRole {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for PlatformRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps any role string onto a known [`PlatformRole`].
///
/// 1. Missing or empty input yields [`PlatformRole::DEFAULT`].
/// 2. An exact canonical identifier (`"HubCoordinator"`) is returned as is.
/// 3. Otherwise the trimmed, lower-cased input is looked up in the legacy alias table.
/// 4. Anything still unmatched yields [`PlatformRole::DEFAULT`].
///
/// This never fails and never grants the privileged role to input which doesn't explicitly name
/// it.
pub fn normalize_role(input: Option<&str>) -> PlatformRole {
    let Some(input) = input.filter(|input| !input.is_empty()) else {
        return PlatformRole::DEFAULT;
    };

    if let Some(role) = PlatformRole::ALL
        .into_iter()
        .find(|role| role.as_str() == input)
    {
        return role;
    }

    let key = input.trim().to_lowercase();
    LEGACY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, role)| *role)
        .unwrap_or(PlatformRole::DEFAULT)
}
