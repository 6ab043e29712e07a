use std::cell::RefCell;

use futures_util::future::join;
use log::{debug, error};

use crate::api::{Gateway, PixelChange, TeamChoice};
use crate::cooldown::{Cooldown, CooldownPhase};
use crate::error::{ClientError, ClientResult};
use crate::grid::{CellPos, Grid};
use crate::identity::IdentityStore;
use crate::model::{PlayerRecord, ServerMessage, Uid};
use crate::ranking::{recent_players, RECENT_PLAYER_LIMIT};
use crate::sequence::Sequencer;
use crate::session::SessionState;

/// Display side of the client. Every call replaces what was shown before.
pub trait View {
    fn render_grid(&self, grid: &Grid);
    fn render_players(&self, players: &[&PlayerRecord]);
    fn show_wait(&self, label: &str);
    fn show_message(&self, message: &ServerMessage);
    /// Blocking notice for rejected input.
    fn alert(&self, text: &str);
}

/// Drives [`Controller::poll_wait_time`] on a fixed period.
pub trait Poller {
    /// Starts polling for `uid`, cancelling any poll already running.
    fn arm(&self, uid: Uid);
    fn disarm(&self);
}

pub struct Controller<G, V, S, P> {
    gateway: G,
    view: V,
    identity: S,
    poller: P,
    cooldown: RefCell<Cooldown>,
    grid_seq: Sequencer,
    players_seq: Sequencer,
    wait_seq: Sequencer,
}

impl<G, V, S, P> Controller<G, V, S, P>
where
    G: Gateway,
    V: View,
    S: IdentityStore,
    P: Poller,
{
    pub fn new(gateway: G, view: V, identity: S, poller: P) -> Self {
        Controller {
            gateway,
            view,
            identity,
            poller,
            cooldown: RefCell::new(Cooldown::new()),
            grid_seq: Sequencer::new(),
            players_seq: Sequencer::new(),
            wait_seq: Sequencer::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn identity(&self) -> &S {
        &self.identity
    }

    pub fn poller(&self) -> &P {
        &self.poller
    }

    pub fn cooldown_phase(&self) -> CooldownPhase {
        self.cooldown.borrow().phase()
    }

    /// Page load: draw the grid once.
    pub async fn start(&self) {
        self.refresh_grid().await;
    }

    /// Last stored UID, unvalidated, for prefilling the input.
    pub fn restore_identity(&self) -> Option<String> {
        self.identity.load()
    }

    pub async fn choose_team(&self, session: &SessionState) {
        if let Err(err) = self.try_choose_team(session).await {
            self.report(err);
        }
    }

    pub async fn activate_cell(&self, session: &SessionState, pos: CellPos) {
        if let Err(err) = self.try_activate_cell(session, pos).await {
            self.report(err);
        }
    }

    /// One poller tick. Stops the poller once an observed countdown ends.
    pub async fn poll_wait_time(&self, uid: &Uid) {
        let ticket = self.wait_seq.issue();
        match self.gateway.fetch_wait_time(uid).await {
            Ok(remaining_ms) => {
                if !self.wait_seq.accept(ticket) {
                    debug!("dropping stale wait time {remaining_ms}ms");
                    return;
                }
                let update = self.cooldown.borrow_mut().observe(remaining_ms);
                self.view.show_wait(&update.label);
                if update.expired {
                    debug!("cooldown over, stopping poller");
                    self.poller.disarm();
                }
            }
            Err(err) => self.report(err),
        }
    }

    pub async fn refresh_grid(&self) {
        let ticket = self.grid_seq.issue();
        match self.gateway.fetch_grid().await {
            Ok(grid) => {
                if self.grid_seq.accept(ticket) {
                    self.view.render_grid(&grid);
                } else {
                    debug!("dropping stale grid snapshot");
                }
            }
            // Grid failures never reach the status line.
            Err(err) => error!("grid fetch failed: {err}"),
        }
    }

    pub async fn refresh_players(&self, uid: &Uid) {
        let ticket = self.players_seq.issue();
        match self.gateway.fetch_players(uid).await {
            Ok(players) => {
                if self.players_seq.accept(ticket) {
                    self.view
                        .render_players(&recent_players(&players, RECENT_PLAYER_LIMIT));
                } else {
                    debug!("dropping stale player list");
                }
            }
            Err(err) => self.report(err),
        }
    }

    async fn try_choose_team(&self, session: &SessionState) -> ClientResult<()> {
        let uid = self.accept_uid(session)?;
        let choice = TeamChoice {
            uid: uid.clone(),
            team: session.team.clone(),
        };
        let msg = self.gateway.submit_team_choice(&choice).await?;
        self.view.show_message(&ServerMessage::success(msg));
        self.refresh_all(&uid).await;
        Ok(())
    }

    async fn try_activate_cell(&self, session: &SessionState, pos: CellPos) -> ClientResult<()> {
        let uid = self.accept_uid(session)?;
        session.require_team()?;

        self.cooldown.borrow_mut().arm();
        self.poller.arm(uid.clone());

        let change = PixelChange::new(uid.clone(), pos, session.color.clone());
        let (_, placed) = join(self.poll_wait_time(&uid), self.gateway.submit_pixel(&change)).await;
        let msg = placed?;
        self.view.show_message(&ServerMessage::success(msg));
        self.refresh_all(&uid).await;
        Ok(())
    }

    fn accept_uid(&self, session: &SessionState) -> ClientResult<Uid> {
        let uid = session.validated_uid()?;
        self.identity.save(&uid);
        Ok(uid)
    }

    async fn refresh_all(&self, uid: &Uid) {
        join(self.refresh_players(uid), self.refresh_grid()).await;
    }

    fn report(&self, err: ClientError) {
        match err {
            ClientError::Validation(invalid) => self.view.alert(&invalid.to_string()),
            ClientError::Server(msg) => self.view.show_message(&ServerMessage::error(msg)),
            ClientError::Transport(detail) => error!("Error: {detail}"),
        }
    }
}
