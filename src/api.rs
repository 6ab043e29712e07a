//! Contract with the remote game API.
//!
//! | operation   | method | path                   |
//! |-------------|--------|------------------------|
//! | grid        | GET    | `/tableau`             |
//! | wait time   | GET    | `/temps-attente?uid=`  |
//! | player list | GET    | `/liste-joueurs?uid=`  |
//! | choose team | PUT    | `/choisir-equipe`      |
//! | place pixel | PUT    | `/modifier-case`       |

use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::grid::{CellPos, Grid};
use crate::model::{PlayerRecord, Uid};

pub const GRID_PATH: &str = "/tableau";
pub const WAIT_TIME_PATH: &str = "/temps-attente";
pub const PLAYERS_PATH: &str = "/liste-joueurs";
pub const CHOOSE_TEAM_PATH: &str = "/choisir-equipe";
pub const PLACE_PIXEL_PATH: &str = "/modifier-case";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamChoice {
    pub uid: Uid,
    #[serde(rename = "nouvelleEquipe")]
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelChange {
    pub color: String,
    pub uid: Uid,
    pub col: usize,
    pub row: usize,
}

impl PixelChange {
    pub fn new(uid: Uid, pos: CellPos, color: impl Into<String>) -> Self {
        PixelChange {
            color: color.into(),
            uid,
            col: pos.col,
            row: pos.row,
        }
    }
}

/// `{ "msg": ... }`, used both for confirmations and for errors.
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub msg: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WaitTimeBody {
    #[serde(rename = "tempsAttente")]
    pub wait_ms: f64,
}

impl WaitTimeBody {
    pub fn remaining_ms(&self) -> u64 {
        if self.wait_ms.is_finite() && self.wait_ms > 0.0 {
            self.wait_ms as u64
        } else {
            0
        }
    }
}

/// Turns a raw HTTP answer into the payload or a classified error.
///
/// Non-2xx answers become [`ClientError::Server`] carrying the `msg`
/// field; a success body that does not parse is a transport failure.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> ClientResult<T> {
    if !(200..300).contains(&status) {
        let msg = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|err| err.msg)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        return Err(ClientError::Server(msg));
    }
    serde_json::from_str(body)
        .map_err(|err| ClientError::Transport(format!("malformed response: {err}")))
}

/// The five remote operations. Each call resolves exactly once; there is
/// no retry and no cancellation at this layer.
pub trait Gateway {
    fn fetch_grid(&self) -> LocalBoxFuture<'_, ClientResult<Grid>>;

    /// Remaining cooldown in milliseconds.
    fn fetch_wait_time(&self, uid: &Uid) -> LocalBoxFuture<'_, ClientResult<u64>>;

    fn fetch_players(&self, uid: &Uid) -> LocalBoxFuture<'_, ClientResult<Vec<PlayerRecord>>>;

    fn submit_team_choice(&self, choice: &TeamChoice) -> LocalBoxFuture<'_, ClientResult<String>>;

    fn submit_pixel(&self, change: &PixelChange) -> LocalBoxFuture<'_, ClientResult<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid() -> Uid {
        Uid::parse("abcdefgh").unwrap()
    }

    #[test]
    fn request_bodies_use_server_field_names() {
        let choice = TeamChoice {
            uid: uid(),
            team: "2".into(),
        };
        assert_eq!(
            serde_json::to_string(&choice).unwrap(),
            r#"{"uid":"abcdefgh","nouvelleEquipe":"2"}"#
        );

        let change = PixelChange::new(uid(), CellPos { row: 3, col: 7 }, "#ff0000");
        assert_eq!(
            serde_json::to_string(&change).unwrap(),
            r##"{"color":"#ff0000","uid":"abcdefgh","col":7,"row":3}"##
        );
    }

    #[test]
    fn error_status_carries_server_message() {
        let err = decode::<MessageBody>(403, r#"{"msg":"team full"}"#).unwrap_err();
        assert_eq!(err, ClientError::Server("team full".into()));
    }

    #[test]
    fn error_without_message_names_the_status() {
        let err = decode::<Grid>(502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err, ClientError::Server("request failed with status 502".into()));
    }

    #[test]
    fn malformed_success_is_a_transport_failure() {
        let err = decode::<WaitTimeBody>(200, r#"{"msg":"ok"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn wait_time_clamps_to_whole_millis() {
        let body: WaitTimeBody = decode(200, r#"{"tempsAttente":2500.7}"#).unwrap();
        assert_eq!(body.remaining_ms(), 2500);
        let body: WaitTimeBody = decode(200, r#"{"tempsAttente":-12}"#).unwrap();
        assert_eq!(body.remaining_ms(), 0);
    }
}
