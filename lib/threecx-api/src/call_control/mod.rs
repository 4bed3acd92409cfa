//! Call-control endpoints: DN state, devices, participants, and actions.
//!
//! Every method is a direct mapping onto one PBX request; the client does
//! not model call state itself, it only relays. Transport and status
//! failures of these calls propagate as [`Error`]; authentication is
//! handled upstream by the token pipeline and never surfaces here.

use crate::client::{Error, ThreeCxClient, encode_segment};

mod models;
pub use self::models::{
    ActionResponse, CallStatus, Device, DnState, MakeCallParameters, Participant,
    ParticipantActionParameters, PartyInfo,
};

/// Typed access to the `/callcontrol` endpoints.
///
/// Obtained from [`ThreeCxClient::call_control`].
#[derive(Debug, Clone, Copy)]
pub struct CallControlApi<'a> {
    client: &'a ThreeCxClient,
}

impl<'a> CallControlApi<'a> {
    pub(crate) fn new(client: &'a ThreeCxClient) -> Self {
        Self { client }
    }

    /// Gets the call-control state for all DNs.
    pub async fn state(&self) -> Result<Vec<DnState>, Error> {
        self.client.get_json("/callcontrol").await
    }

    /// Gets the call-control state for a specific DN.
    pub async fn dn_state(&self, dn_number: &str) -> Result<DnState, Error> {
        let dn_number = require("dn_number", dn_number)?;
        self.client
            .get_json(&format!("/callcontrol/{dn_number}"))
            .await
    }

    /// Gets the devices registered against a DN.
    pub async fn devices(&self, dn_number: &str) -> Result<Vec<Device>, Error> {
        let dn_number = require("dn_number", dn_number)?;
        self.client
            .get_json(&format!("/callcontrol/{dn_number}/devices"))
            .await
    }

    /// Gets a specific device registered against a DN.
    pub async fn device(&self, dn_number: &str, device_id: &str) -> Result<Device, Error> {
        let dn_number = require("dn_number", dn_number)?;
        let device_id = require("device_id", device_id)?;
        self.client
            .get_json(&format!("/callcontrol/{dn_number}/devices/{device_id}"))
            .await
    }

    /// Gets the participants of calls a DN is involved in.
    pub async fn participants(&self, dn_number: &str) -> Result<Vec<Participant>, Error> {
        let dn_number = require("dn_number", dn_number)?;
        self.client
            .get_json(&format!("/callcontrol/{dn_number}/participants"))
            .await
    }

    /// Gets a specific participant of a DN.
    pub async fn participant(
        &self,
        dn_number: &str,
        participant_id: i32,
    ) -> Result<Participant, Error> {
        let dn_number = require("dn_number", dn_number)?;
        self.client
            .get_json(&format!(
                "/callcontrol/{dn_number}/participants/{participant_id}"
            ))
            .await
    }

    /// Initiates a call from a DN.
    pub async fn make_call(
        &self,
        dn_number: &str,
        parameters: &MakeCallParameters,
    ) -> Result<ActionResponse, Error> {
        let dn_number = require("dn_number", dn_number)?;
        non_empty("destination", &parameters.destination)?;
        self.client
            .post_json(&format!("/callcontrol/{dn_number}/makecall"), parameters)
            .await
    }

    /// Initiates a call from a specific device of a DN.
    pub async fn make_call_from_device(
        &self,
        dn_number: &str,
        device_id: &str,
        parameters: &MakeCallParameters,
    ) -> Result<ActionResponse, Error> {
        let dn_number = require("dn_number", dn_number)?;
        let device_id = require("device_id", device_id)?;
        non_empty("destination", &parameters.destination)?;
        self.client
            .post_json(
                &format!("/callcontrol/{dn_number}/devices/{device_id}/makecall"),
                parameters,
            )
            .await
    }

    /// Performs an arbitrary action on a participant.
    ///
    /// The PBX knows actions such as `drop`, `answer`, `divert`, `routeto`,
    /// and `transferto`; the convenience methods below cover the common
    /// ones.
    pub async fn participant_action(
        &self,
        dn_number: &str,
        participant_id: i32,
        action: &str,
        parameters: &ParticipantActionParameters,
    ) -> Result<ActionResponse, Error> {
        let dn_number = require("dn_number", dn_number)?;
        let action = require("action", action)?;
        self.client
            .post_json(
                &format!("/callcontrol/{dn_number}/participants/{participant_id}/{action}"),
                parameters,
            )
            .await
    }

    /// Drops a participant from its call.
    pub async fn drop_participant(
        &self,
        dn_number: &str,
        participant_id: i32,
    ) -> Result<ActionResponse, Error> {
        let parameters = ParticipantActionParameters {
            reason: "None".to_string(),
            ..ParticipantActionParameters::default()
        };
        self.participant_action(dn_number, participant_id, "drop", &parameters)
            .await
    }

    /// Answers the call for a participant.
    pub async fn answer_call(
        &self,
        dn_number: &str,
        participant_id: i32,
    ) -> Result<ActionResponse, Error> {
        let parameters = ParticipantActionParameters {
            reason: "None".to_string(),
            ..ParticipantActionParameters::default()
        };
        self.participant_action(dn_number, participant_id, "answer", &parameters)
            .await
    }

    /// Transfers a participant's call to another destination.
    pub async fn transfer_call(
        &self,
        dn_number: &str,
        participant_id: i32,
        destination: &str,
    ) -> Result<ActionResponse, Error> {
        non_empty("destination", destination)?;
        let parameters = ParticipantActionParameters {
            reason: "None".to_string(),
            destination: Some(destination.to_string()),
            timeout: 30,
            ..ParticipantActionParameters::default()
        };
        self.participant_action(dn_number, participant_id, "transferto", &parameters)
            .await
    }
}

/// Rejects empty caller-supplied values and percent-encodes the rest for
/// use as a path segment.
fn require(name: &'static str, value: &str) -> Result<String, Error> {
    non_empty(name, value)?;
    Ok(encode_segment(value))
}

/// Rejects empty caller-supplied values destined for a request body.
fn non_empty(name: &'static str, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::EmptyArgument { name });
    }
    Ok(())
}
