//! Wire types for the call-control endpoints.
//!
//! Field names follow the PBX payloads verbatim; every response type uses
//! defaults so partial payloads from older PBX versions still parse.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call-control state of a single DN: its devices and active participants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnState {
    /// The DN number.
    pub dn: String,
    /// The DN type, e.g. `Extension` or `Queue`.
    #[serde(rename = "type")]
    pub dn_type: String,
    /// Devices registered against the DN.
    pub devices: Vec<Device>,
    /// Participants of calls the DN is currently involved in.
    pub participants: Vec<Participant>,
}

/// A device registered against a DN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    /// The DN the device belongs to.
    pub dn: String,
    /// The device identifier.
    pub device_id: String,
    /// The SIP user agent string reported by the device.
    pub user_agent: String,
}

/// One leg of an active call as seen from a DN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    /// Participant identifier, unique per DN.
    pub id: i32,
    /// Current participant status.
    pub status: String,
    /// The DN this participant belongs to.
    pub dn: String,
    /// Display name of the remote party.
    pub party_caller_name: String,
    /// DN of the remote party.
    pub party_dn: String,
    /// Caller id of the remote party.
    pub party_caller_id: String,
    /// DID of the remote party.
    pub party_did: String,
    /// Device handling this leg.
    pub device_id: String,
    /// DN type of the remote party.
    pub party_dn_type: String,
    /// Whether the participant can be controlled directly.
    pub direct_control: bool,
    /// DN that originated the call.
    pub originated_by_dn: String,
    /// DN type of the originator.
    pub originated_by_type: String,
    /// DN that referred the call, when transferred.
    pub referred_by_dn: String,
    /// DN type of the referrer.
    pub referred_by_type: String,
    /// DN on whose behalf the call is made.
    pub on_behalf_of_dn: String,
    /// DN type of the on-behalf-of party.
    pub on_behalf_of_type: String,
    /// PBX-wide call identifier.
    #[serde(rename = "callid")]
    pub call_id: i32,
    /// Leg identifier within the call.
    #[serde(rename = "legid")]
    pub leg_id: i32,
}

/// Outcome of a call-control action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionResponse {
    /// Final status reported by the PBX.
    #[serde(rename = "finalstatus")]
    pub final_status: String,
    /// Machine-readable reason.
    pub reason: String,
    /// The affected participant, when the action produced one.
    pub result: Option<Participant>,
    /// Human-readable reason.
    #[serde(rename = "reasontext")]
    pub reason_text: String,
}

/// A call as reported by the PBX status feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallStatus {
    /// Call identifier.
    pub id: String,
    /// Current call state.
    #[serde(rename = "callstate")]
    pub call_state: String,
    /// The calling party.
    #[serde(rename = "partyA")]
    pub party_a: PartyInfo,
    /// The called party.
    #[serde(rename = "partyB")]
    pub party_b: PartyInfo,
    /// When the call started.
    #[serde(rename = "startTimeUtc")]
    pub start_time_utc: Option<DateTime<Utc>>,
    /// When the call was answered, if it was.
    #[serde(rename = "answerTimeUtc")]
    pub answer_time_utc: Option<DateTime<Utc>>,
    /// When the call ended, if it has.
    #[serde(rename = "endTimeUtc")]
    pub end_time_utc: Option<DateTime<Utc>>,
    /// Call duration in seconds.
    pub duration: i32,
}

/// One party of a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyInfo {
    /// The party's number.
    pub number: String,
    /// The party's display name.
    pub name: String,
    /// The party's DN, when it is an internal party.
    pub dn: String,
}

/// Parameters for initiating a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MakeCallParameters {
    /// The destination number to call.
    pub destination: String,
    /// Call timeout in seconds.
    pub timeout: i32,
    /// Optional attached data forwarded with the call.
    #[serde(rename = "attacheddata", skip_serializing_if = "Option::is_none")]
    pub attached_data: Option<HashMap<String, String>>,
}

impl MakeCallParameters {
    /// Creates parameters calling `destination` with default timeout.
    pub fn to_destination(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }
}

/// Parameters for an action on a participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantActionParameters {
    /// The reason for performing the action.
    pub reason: String,
    /// The destination, for `divert`, `routeto`, and `transferto`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// The timeout value for the action, in seconds.
    pub timeout: i32,
    /// Optional attached data forwarded with the action.
    #[serde(rename = "attacheddata", skip_serializing_if = "Option::is_none")]
    pub attached_data: Option<HashMap<String, String>>,
}
