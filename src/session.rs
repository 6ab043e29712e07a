use crate::error::ValidationError;
use crate::model::Uid;

/// What the user has typed or picked, as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub uid: String,
    pub team: String,
    pub color: String,
}

impl SessionState {
    pub fn validated_uid(&self) -> Result<Uid, ValidationError> {
        Uid::parse(&self.uid)
    }

    pub fn require_team(&self) -> Result<&str, ValidationError> {
        if self.team.is_empty() {
            return Err(ValidationError::NoTeamSelected);
        }
        Ok(&self.team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_team_is_rejected() {
        let session = SessionState {
            uid: "abcdefgh".into(),
            ..Default::default()
        };
        assert!(session.validated_uid().is_ok());
        assert_eq!(session.require_team(), Err(ValidationError::NoTeamSelected));
    }

    #[test]
    fn selected_team_passes_through() {
        let session = SessionState {
            team: "3".into(),
            ..Default::default()
        };
        assert_eq!(session.require_team(), Ok("3"));
        assert_eq!(session.validated_uid(), Err(ValidationError::InvalidUid));
    }
}
